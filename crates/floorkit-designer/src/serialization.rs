//! Saving and loading documents.
//!
//! Two formats are supported:
//!
//! - the plan document, a list of shape snapshots each with an optional
//!   label snapshot, which restores shapes with their original ids;
//! - the floor document, which describes corners by number and walls by
//!   pairs of corner numbers and is rebuilt through the corner and wall
//!   commands.

use floorkit_core::{Result, ShapeId, SnapshotError};
use floorkit_settings::FloorSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::commands::{Command, CornerCreateCommand, WallCreateCommand};
use crate::document::EditorDocument;
use crate::labeler::LabelSnapshot;
use crate::model::{Point, ShapeSnapshot};

/// One shape of a plan, with its label if it has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub shape: ShapeSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSnapshot>,
}

/// Every shape and label of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub shapes: Vec<PlanEntry>,
}

impl PlanDocument {
    /// Snapshot the document in shape insertion order.
    pub fn from_document(doc: &EditorDocument) -> Self {
        let shapes = doc
            .shapes
            .shapes()
            .map(|shape| PlanEntry {
                shape: shape.snapshot(),
                label: doc.labels.label(shape.id).map(|label| label.snapshot()),
            })
            .collect();
        Self { shapes }
    }

    /// Add the plan's shapes and labels to `doc`, keeping their ids.
    pub fn restore(&self, doc: &mut EditorDocument, emit_event: bool) -> Result<Vec<ShapeId>> {
        let mut restored = Vec::with_capacity(self.shapes.len());
        for entry in &self.shapes {
            let id = doc.shapes.add_shape_from_snapshot(&entry.shape, emit_event)?;
            if let Some(label) = &entry.label {
                doc.labels.add_label_from_snapshot(id, label.clone());
            }
            restored.push(id);
        }
        tracing::info!("Restored {} shapes", restored.len());
        Ok(restored)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save plan to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Load plan from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json(&content)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorCorner {
    pub id: u64,
    pub position_x: f64,
    pub position_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorWall {
    pub start_corner_id: u64,
    pub end_corner_id: u64,
}

/// A saved floor: numbered corners and the walls between them.
///
/// Walls are listed once per direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub corners: Vec<FloorCorner>,
    #[serde(default)]
    pub walls: Vec<FloorWall>,
}

/// Ids assigned while importing a floor.
#[derive(Debug, Clone, Default)]
pub struct FloorImport {
    /// File corner number -> corner shape.
    pub corners: HashMap<u64, ShapeId>,
    pub walls: Vec<ShapeId>,
}

impl FloorDocument {
    /// Describe the corner graph of `doc`. Corners are numbered from 1 in
    /// graph order.
    pub fn from_document(
        doc: &EditorDocument,
        name: impl Into<String>,
    ) -> std::result::Result<Self, SnapshotError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(missing_name());
        }

        let mut numbers = HashMap::new();
        let mut corners = Vec::new();
        for corner in doc.corners.corners() {
            let Some(shape) = doc.shapes.shape(corner) else {
                tracing::warn!("Corner {} has no shape, skipping", corner);
                continue;
            };
            let id = corners.len() as u64 + 1;
            let position = shape.position();
            numbers.insert(corner, id);
            corners.push(FloorCorner {
                id,
                position_x: position.x,
                position_y: position.y,
            });
        }

        let walls = doc
            .corners
            .edges()
            .filter_map(|(corner, neighbour, _)| {
                Some(FloorWall {
                    start_corner_id: *numbers.get(&corner)?,
                    end_corner_id: *numbers.get(&neighbour)?,
                })
            })
            .collect();

        Ok(Self {
            name,
            corners,
            walls,
        })
    }

    /// Check that the floor is named and every wall refers to a listed
    /// corner.
    pub fn validate(&self) -> std::result::Result<(), SnapshotError> {
        if self.name.trim().is_empty() {
            return Err(missing_name());
        }
        for wall in &self.walls {
            for corner_id in [wall.start_corner_id, wall.end_corner_id] {
                if !self.corners.iter().any(|corner| corner.id == corner_id) {
                    return Err(SnapshotError::UnknownCorner { corner_id });
                }
            }
        }
        Ok(())
    }

    /// Rebuild the floor in `doc` through the corner and wall commands,
    /// without publishing events.
    ///
    /// Walls that repeat an existing connection are skipped, as are walls
    /// naming a corner that is not in the file.
    pub async fn import_into(
        &self,
        doc: &mut EditorDocument,
        settings: &FloorSettings,
    ) -> Result<FloorImport> {
        if self.name.trim().is_empty() {
            return Err(missing_name().into());
        }

        let mut import = FloorImport::default();
        let mut positions = HashMap::new();
        for corner in &self.corners {
            let position = Point::new(corner.position_x, corner.position_y);
            let mut command = CornerCreateCommand::at(position, settings).with_emit_event(false);
            if let Some(id) = command.execute(doc).await?.shape_id() {
                if import.corners.insert(corner.id, id).is_some() {
                    tracing::warn!("Corner number {} appears twice in '{}'", corner.id, self.name);
                }
                positions.insert(id, position);
            }
        }

        for wall in &self.walls {
            let ends = (
                import.corners.get(&wall.start_corner_id),
                import.corners.get(&wall.end_corner_id),
            );
            let (Some(&start), Some(&end)) = ends else {
                tracing::warn!(
                    "Skipping wall {} -> {}: unknown corner",
                    wall.start_corner_id,
                    wall.end_corner_id
                );
                continue;
            };
            if start == end || doc.corners.wall_between(start, end).is_some() {
                continue;
            }
            let (Some(&from), Some(&to)) = (positions.get(&start), positions.get(&end)) else {
                continue;
            };
            let mut command =
                WallCreateCommand::between(start, end, from, to, settings).with_emit_event(false);
            if let Some(id) = command.execute(doc).await?.shape_id() {
                import.walls.push(id);
            }
        }

        tracing::info!(
            "Imported floor '{}': {} corners, {} walls",
            self.name,
            import.corners.len(),
            import.walls.len()
        );
        Ok(import)
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save floor to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Load floor from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json(&content)?)
    }
}

fn missing_name() -> SnapshotError {
    SnapshotError::MissingField {
        kind: "floor".to_string(),
        field: "name",
    }
}
