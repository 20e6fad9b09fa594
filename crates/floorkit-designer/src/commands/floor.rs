//! Floor topology commands.
//!
//! Corners are circle shapes with a node in the [`CornerGraph`]; walls are
//! line shapes recorded as edges between two corner nodes. Each command here
//! wraps the plain shape command and keeps the graph in step with it.
//!
//! [`CornerGraph`]: crate::corner_graph::CornerGraph

use async_trait::async_trait;
use floorkit_core::{Result, ShapeId};
use floorkit_settings::FloorSettings;

use super::{AddShapeCommand, Command, CommandOutput, RemoveShapeCommand};
use crate::document::EditorDocument;
use crate::model::{AdditionalData, ArcParams, LineParams, Point, Segment, ShapeKind};

/// Creates a corner shape and its graph node.
#[derive(Debug, Clone)]
pub struct CornerCreateCommand {
    create: AddShapeCommand,
}

impl CornerCreateCommand {
    pub fn new(create: AddShapeCommand) -> Self {
        Self { create }
    }

    /// A corner circle centred on `position`, styled from `settings`.
    pub fn at(position: Point, settings: &FloorSettings) -> Self {
        Self::with_data(position, settings, AdditionalData::default())
    }

    pub fn with_data(
        position: Point,
        settings: &FloorSettings,
        additional_data: AdditionalData,
    ) -> Self {
        let params = ArcParams::circle(
            position.x,
            position.y,
            settings.corner_radius,
            settings.corner_color,
        );
        Self::new(AddShapeCommand::new(
            ShapeKind::Arc,
            params.to_value(),
            additional_data,
        ))
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.create = self.create.with_emit_event(emit_event);
        self
    }

    pub fn corner_id(&self) -> Option<ShapeId> {
        self.create.shape_id()
    }
}

#[async_trait]
impl Command for CornerCreateCommand {
    fn name(&self) -> &str {
        "Create Corner"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let output = self.create.execute(doc).await?;
        if let Some(corner) = output.shape_id() {
            doc.corners.add_corner(corner);
        }
        Ok(output)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.create.undo(doc).await?;
        if let Some(corner) = self.create.shape_id() {
            doc.corners.remove_corner(corner);
        }
        Ok(())
    }
}

/// Removes a corner shape and its graph node.
///
/// Walls attached to the corner are left alone; remove them first. Undo
/// restores a node only if the shape had one.
#[derive(Debug, Clone)]
pub struct CornerRemoveCommand {
    remove: RemoveShapeCommand,
    had_node: bool,
}

impl CornerRemoveCommand {
    pub fn new(corner: ShapeId) -> Self {
        Self {
            remove: RemoveShapeCommand::new(corner),
            had_node: false,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.remove = self.remove.with_emit_event(emit_event);
        self
    }

    pub fn corner_id(&self) -> ShapeId {
        self.remove.shape_id()
    }
}

#[async_trait]
impl Command for CornerRemoveCommand {
    fn name(&self) -> &str {
        "Remove Corner"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let output = self.remove.execute(doc).await?;
        let removed_node = doc.corners.remove_corner(self.remove.shape_id());
        if output == CommandOutput::Removed(true) {
            self.had_node = removed_node;
        }
        Ok(output)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.remove.undo(doc).await?;
        let corner = self.remove.shape_id();
        if self.had_node && doc.shapes.contains(corner) {
            doc.corners.add_corner(corner);
        }
        Ok(())
    }
}

/// Creates a wall line between two corners and links them.
#[derive(Debug, Clone)]
pub struct WallCreateCommand {
    create: AddShapeCommand,
    start: ShapeId,
    end: ShapeId,
}

impl WallCreateCommand {
    pub fn new(create: AddShapeCommand, start: ShapeId, end: ShapeId) -> Self {
        Self { create, start, end }
    }

    /// A wall drawn from `from` to `to` in absolute coordinates.
    pub fn between(
        start: ShapeId,
        end: ShapeId,
        from: Point,
        to: Point,
        settings: &FloorSettings,
    ) -> Self {
        let params = LineParams::between(from, to, settings.wall_width, settings.wall_color);
        Self::new(
            AddShapeCommand::new(ShapeKind::Line, params.to_value(), AdditionalData::default()),
            start,
            end,
        )
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.create = self.create.with_emit_event(emit_event);
        self
    }

    pub fn wall_id(&self) -> Option<ShapeId> {
        self.create.shape_id()
    }

    pub fn corners(&self) -> (ShapeId, ShapeId) {
        (self.start, self.end)
    }
}

#[async_trait]
impl Command for WallCreateCommand {
    fn name(&self) -> &str {
        "Create Wall"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let output = self.create.execute(doc).await?;
        if let Some(wall) = output.shape_id() {
            if !doc.corners.link(self.start, self.end, wall) {
                tracing::warn!(
                    "Wall {} not linked: corners {} and {} are not both in the floor",
                    wall,
                    self.start,
                    self.end
                );
            }
        }
        Ok(output)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        doc.corners.unlink(self.start, self.end);
        self.create.undo(doc).await
    }
}

/// Removes a wall line and unlinks its corners.
#[derive(Debug, Clone)]
pub struct WallRemoveCommand {
    remove: RemoveShapeCommand,
    start: ShapeId,
    end: ShapeId,
}

impl WallRemoveCommand {
    pub fn new(wall: ShapeId, start: ShapeId, end: ShapeId) -> Self {
        Self {
            remove: RemoveShapeCommand::new(wall),
            start,
            end,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.remove = self.remove.with_emit_event(emit_event);
        self
    }

    pub fn wall_id(&self) -> ShapeId {
        self.remove.shape_id()
    }
}

#[async_trait]
impl Command for WallRemoveCommand {
    fn name(&self) -> &str {
        "Remove Wall"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let output = self.remove.execute(doc).await?;
        doc.corners.unlink(self.start, self.end);
        Ok(output)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.remove.undo(doc).await?;
        let wall = self.remove.shape_id();
        if doc.shapes.contains(wall) {
            doc.corners.link(self.start, self.end, wall);
        }
        Ok(())
    }
}

/// Moves the endpoints of a wall line.
#[derive(Debug, Clone)]
pub struct WallMoveCommand {
    wall: ShapeId,
    old_segment: Segment,
    new_segment: Segment,
    emit_event: bool,
}

impl WallMoveCommand {
    pub fn new(wall: ShapeId, old_segment: Segment, new_segment: Segment) -> Self {
        Self {
            wall,
            old_segment,
            new_segment,
            emit_event: true,
        }
    }

    pub fn with_emit_event(mut self, emit_event: bool) -> Self {
        self.emit_event = emit_event;
        self
    }

    fn apply(&self, doc: &mut EditorDocument, segment: Segment) {
        if !doc.shapes.set_segment(self.wall, segment, self.emit_event) {
            tracing::warn!("Cannot move wall {}: not found or not a line", self.wall);
        }
    }
}

#[async_trait]
impl Command for WallMoveCommand {
    fn name(&self) -> &str {
        "Move Wall"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, self.new_segment);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, self.old_segment);
        Ok(())
    }
}
