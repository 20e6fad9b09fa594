use async_trait::async_trait;
use floorkit_core::{RegistryError, Result, ShapeId};
use serde_json::Value;

use super::{Command, CommandOutput};
use crate::document::EditorDocument;
use crate::model::{AdditionalData, Dimensions, Point, Shape, ShapeKind};

/// Creates a shape through the registry.
///
/// The first execute builds the shape with its factory. Undo keeps the
/// removed instance so that redo reinserts the very same shape.
#[derive(Debug, Clone)]
pub struct AddShapeCommand {
    kind: ShapeKind,
    params: Value,
    additional_data: AdditionalData,
    emit_event: bool,
    shape_id: Option<ShapeId>,
    /// The undone shape and its index in insertion order.
    removed: Option<(usize, Shape)>,
}

impl AddShapeCommand {
    pub fn new(kind: ShapeKind, params: Value, additional_data: AdditionalData) -> Self {
        Self {
            kind,
            params,
            additional_data,
            emit_event: true,
            shape_id: None,
            removed: None,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Id of the created shape, known once the command has run or when the
    /// caller pinned it through the additional data.
    pub fn shape_id(&self) -> Option<ShapeId> {
        self.shape_id.or(self.additional_data.id)
    }
}

#[async_trait]
impl Command for AddShapeCommand {
    fn name(&self) -> &str {
        "Add Shape"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        if let Some((index, shape)) = self.removed.take() {
            let id = shape.id;
            if doc.shapes.contains(id) {
                self.removed = Some((index, shape));
                return Err(RegistryError::DuplicateShape { id }.into());
            }
            doc.shapes.restore_shape(shape, index, self.emit_event)?;
            return Ok(CommandOutput::Shape(id));
        }

        if let Some(id) = self.shape_id {
            if doc.shapes.contains(id) {
                tracing::warn!("Shape {} was already added", id);
                return Ok(CommandOutput::Shape(id));
            }
        }

        // Rebuilding after a lost instance keeps the id handed out before.
        let additional_data = AdditionalData {
            id: self.shape_id.or(self.additional_data.id),
            ..self.additional_data.clone()
        };
        let id = doc
            .shapes
            .add_shape(self.kind, &self.params, additional_data, self.emit_event)
            .await?;
        self.shape_id = Some(id);
        Ok(CommandOutput::Shape(id))
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        let Some(id) = self.shape_id else {
            tracing::warn!("Cannot undo {}: shape was never created", self.kind);
            return Ok(());
        };
        match doc.shapes.take_shape(id, self.emit_event) {
            Some(removed) => self.removed = Some(removed),
            None => tracing::warn!("Cannot undo add of shape {}: not found", id),
        }
        Ok(())
    }
}

/// Removes a shape, keeping the instance and its place in the drawing order
/// for undo.
#[derive(Debug, Clone)]
pub struct RemoveShapeCommand {
    shape_id: ShapeId,
    emit_event: bool,
    removed: Option<(usize, Shape)>,
}

impl RemoveShapeCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            emit_event: true,
            removed: None,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }
}

#[async_trait]
impl Command for RemoveShapeCommand {
    fn name(&self) -> &str {
        "Remove Shape"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        if self.removed.is_some() {
            tracing::warn!("Shape {} is already removed", self.shape_id);
            return Ok(CommandOutput::Removed(false));
        }
        match doc.shapes.take_shape(self.shape_id, self.emit_event) {
            Some(removed) => {
                self.removed = Some(removed);
                Ok(CommandOutput::Removed(true))
            }
            None => {
                tracing::warn!("Cannot remove shape {}: not found", self.shape_id);
                Ok(CommandOutput::Removed(false))
            }
        }
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        let Some((index, shape)) = self.removed.take() else {
            tracing::warn!("Cannot restore shape {}: nothing was removed", self.shape_id);
            return Ok(());
        };
        if doc.shapes.contains(shape.id) {
            self.removed = Some((index, shape));
            return Err(RegistryError::DuplicateShape { id: self.shape_id }.into());
        }
        doc.shapes.restore_shape(shape, index, self.emit_event)
    }
}

#[derive(Debug, Clone)]
pub struct MoveShapeCommand {
    shape_id: ShapeId,
    old_position: Point,
    new_position: Point,
    emit_event: bool,
}

impl MoveShapeCommand {
    pub fn new(shape_id: ShapeId, old_position: Point, new_position: Point) -> Self {
        Self {
            shape_id,
            old_position,
            new_position,
            emit_event: true,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    fn apply(&self, doc: &mut EditorDocument, position: Point) {
        if !doc
            .shapes
            .set_position(self.shape_id, position.x, position.y, self.emit_event)
        {
            tracing::warn!("Cannot move shape {}: not found", self.shape_id);
        }
    }
}

#[async_trait]
impl Command for MoveShapeCommand {
    fn name(&self) -> &str {
        "Move Shape"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, self.new_position);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, self.old_position);
        Ok(())
    }
}

/// Changes position and size together.
#[derive(Debug, Clone)]
pub struct ResizeShapeCommand {
    shape_id: ShapeId,
    old_dimensions: Dimensions,
    new_dimensions: Dimensions,
    emit_event: bool,
}

impl ResizeShapeCommand {
    pub fn new(shape_id: ShapeId, old_dimensions: Dimensions, new_dimensions: Dimensions) -> Self {
        Self {
            shape_id,
            old_dimensions,
            new_dimensions,
            emit_event: true,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    fn apply(&self, doc: &mut EditorDocument, dimensions: Dimensions) {
        if !doc
            .shapes
            .set_dimensions(self.shape_id, dimensions, self.emit_event)
        {
            tracing::warn!("Cannot resize shape {}: not found", self.shape_id);
        }
    }
}

#[async_trait]
impl Command for ResizeShapeCommand {
    fn name(&self) -> &str {
        "Resize Shape"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, self.new_dimensions);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, self.old_dimensions);
        Ok(())
    }
}

/// Rotation in radians.
#[derive(Debug, Clone)]
pub struct RotateShapeCommand {
    shape_id: ShapeId,
    old_rotation: f64,
    new_rotation: f64,
    emit_event: bool,
}

impl RotateShapeCommand {
    pub fn new(shape_id: ShapeId, old_rotation: f64, new_rotation: f64) -> Self {
        Self {
            shape_id,
            old_rotation,
            new_rotation,
            emit_event: true,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    fn apply(&self, doc: &mut EditorDocument, rotation: f64) {
        if !doc
            .shapes
            .set_rotation(self.shape_id, rotation, self.emit_event)
        {
            tracing::warn!("Cannot rotate shape {}: not found", self.shape_id);
        }
    }
}

#[async_trait]
impl Command for RotateShapeCommand {
    fn name(&self) -> &str {
        "Rotate Shape"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, self.new_rotation);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, self.old_rotation);
        Ok(())
    }
}
