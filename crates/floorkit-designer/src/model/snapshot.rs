//! Serializable shape snapshots.
//!
//! The JSON layout is:
//!
//! ```json
//! {
//!   "transform": { "x": 0, "y": 0, "width": 128, "height": 128, "rotation": 0 },
//!   "specific": { "color": 16777215, "alpha": 1 },
//!   "metadata": { "type": "rectangle", "zoneName": "A" },
//!   "additionalData": { "id": "…", "interactive": null, "managers": [] }
//! }
//! ```
//!
//! Type-specific fields (`points`, `radius`, `startAngle`, `endAngle`,
//! `anticlockwise`, `from`, `to`, `lineWidth`) appear in `specific` only for
//! the kinds that have them.

use floorkit_core::{ShapeId, SnapshotError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::polygon::{points_from_flat, points_to_flat};
use super::{Geometry, Point, Segment, Shape, ShapeKind, Style, Transform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSnapshot {
    pub transform: Transform,
    pub specific: SpecificSnapshot,
    pub metadata: MetadataSnapshot,
    pub additional_data: AdditionalDataSnapshot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificSnapshot {
    pub color: u32,
    pub alpha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticlockwise: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalDataSnapshot {
    pub id: ShapeId,
    #[serde(default)]
    pub interactive: Option<Value>,
    #[serde(default)]
    pub managers: Vec<String>,
}

impl ShapeSnapshot {
    pub fn id(&self) -> ShapeId {
        self.additional_data.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.metadata.kind
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Shape {
    /// Capture everything needed to rebuild this shape.
    pub fn snapshot(&self) -> ShapeSnapshot {
        let mut specific = SpecificSnapshot {
            color: self.style.color,
            alpha: self.style.alpha,
            ..SpecificSnapshot::default()
        };
        match &self.geometry {
            Geometry::Rectangle | Geometry::Ellipse => {}
            Geometry::Polygon { points } => specific.points = Some(points_to_flat(points)),
            Geometry::Arc {
                radius,
                start_angle,
                end_angle,
                anticlockwise,
            } => {
                specific.radius = Some(*radius);
                specific.start_angle = Some(*start_angle);
                specific.end_angle = Some(*end_angle);
                specific.anticlockwise = Some(*anticlockwise);
            }
            Geometry::Line {
                segment,
                line_width,
            } => {
                specific.from = Some(segment.from);
                specific.to = Some(segment.to);
                specific.line_width = Some(*line_width);
            }
        }

        ShapeSnapshot {
            transform: self.transform,
            specific,
            metadata: MetadataSnapshot {
                kind: self.kind(),
                fields: self.metadata.clone(),
            },
            additional_data: AdditionalDataSnapshot {
                id: self.id,
                interactive: self.interactive.clone(),
                managers: self.managers.clone(),
            },
        }
    }

    /// Rebuild a shape, identity included, from a snapshot.
    pub fn from_snapshot(snapshot: &ShapeSnapshot) -> Result<Self, SnapshotError> {
        let kind = snapshot.kind();
        let specific = &snapshot.specific;
        let missing = |field: &'static str| SnapshotError::MissingField {
            kind: kind.to_string(),
            field,
        };

        let geometry = match kind {
            ShapeKind::Rectangle => Geometry::Rectangle,
            ShapeKind::Ellipse => Geometry::Ellipse,
            ShapeKind::Polygon => {
                let coords = specific.points.as_ref().ok_or_else(|| missing("points"))?;
                let points = points_from_flat(coords).ok_or_else(|| SnapshotError::Malformed {
                    reason: format!("polygon has odd number of coordinates ({})", coords.len()),
                })?;
                Geometry::Polygon { points }
            }
            ShapeKind::Arc => Geometry::Arc {
                radius: specific.radius.ok_or_else(|| missing("radius"))?,
                start_angle: specific.start_angle.unwrap_or(0.0),
                end_angle: specific.end_angle.unwrap_or(360.0),
                anticlockwise: specific.anticlockwise.unwrap_or(false),
            },
            ShapeKind::Line => Geometry::Line {
                segment: Segment::new(
                    specific.from.ok_or_else(|| missing("from"))?,
                    specific.to.ok_or_else(|| missing("to"))?,
                ),
                line_width: specific.line_width.unwrap_or(1.0),
            },
        };

        let mut metadata = snapshot.metadata.fields.clone();
        metadata.remove("type");

        Ok(Shape {
            id: snapshot.id(),
            transform: snapshot.transform,
            style: Style {
                color: specific.color,
                alpha: specific.alpha,
            },
            geometry,
            metadata,
            interactive: snapshot.additional_data.interactive.clone(),
            managers: snapshot.additional_data.managers.clone(),
        })
    }
}
