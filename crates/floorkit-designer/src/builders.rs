//! Commands for user interactions.
//!
//! A single gesture often touches more than one structure: moving a
//! labelled shape moves its label, dragging a corner drags the ends of its
//! walls, deleting a corner deletes its walls. The functions here look at
//! the document and build the command, grouped into a composite when more
//! than one step is needed, so that the gesture undoes as one unit.
//!
//! They only read the document; the caller executes or records the result.

use floorkit_core::{ShapeId, TextCallback};
use floorkit_settings::FloorSettings;
use serde_json::Value;

use crate::commands::{
    AddLabelCommand, AddShapeCommand, CompositeCommand, CornerCreateCommand, CornerRemoveCommand,
    EditLabelCommand, EditorCommand, MoveLabelCommand, MoveShapeCommand, RemoveLabelCommand,
    RemoveShapeCommand, ResizeShapeCommand, RotateShapeCommand, WallCreateCommand,
    WallMoveCommand, WallRemoveCommand,
};
use crate::document::EditorDocument;
use crate::labeler::TextEdit;
use crate::model::{AdditionalData, Dimensions, Point, Segment, ShapeKind};

fn group(name: &str, mut commands: Vec<EditorCommand>) -> EditorCommand {
    if commands.len() == 1 {
        if let Some(command) = commands.pop() {
            return command;
        }
    }
    let mut composite = CompositeCommand::named(name);
    for command in commands {
        composite.add_command(command);
    }
    composite.into()
}

/// Move a shape from `from` to `to`, dragging its label and, for a corner,
/// the near ends of its walls.
///
/// The label keeps its offset from the shape. Each wall keeps its direction;
/// only the endpoint nearest the corner follows the drag.
pub fn move_shape(
    doc: &EditorDocument,
    shape_id: ShapeId,
    from: Point,
    to: Point,
) -> Option<EditorCommand> {
    let Some(shape) = doc.shapes.shape(shape_id) else {
        tracing::warn!("Cannot move shape {}: not found", shape_id);
        return None;
    };
    let corner_at = shape.position();
    let mut commands: Vec<EditorCommand> = vec![MoveShapeCommand::new(shape_id, from, to).into()];
    if let Some(command) = follow_label(doc, shape_id, from, to) {
        commands.push(command);
    }
    for (_, wall) in doc.corners.neighbours(shape_id) {
        let Some(old) = doc.shapes.shape(wall).and_then(|line| line.segment()) else {
            tracing::warn!("Wall {} of corner {} is not a line", wall, shape_id);
            continue;
        };
        let new = if old.from.distance_to(&corner_at) <= old.to.distance_to(&corner_at) {
            Segment::new(to, old.to)
        } else {
            Segment::new(old.from, to)
        };
        commands.push(WallMoveCommand::new(wall, old, new).into());
    }
    Some(group("Move Shape", commands))
}

/// Resize a shape, carrying its label along with the shape's position.
pub fn resize_shape(
    doc: &EditorDocument,
    shape_id: ShapeId,
    from: Dimensions,
    to: Dimensions,
) -> Option<EditorCommand> {
    if !doc.shapes.contains(shape_id) {
        tracing::warn!("Cannot resize shape {}: not found", shape_id);
        return None;
    }
    let mut commands: Vec<EditorCommand> =
        vec![ResizeShapeCommand::new(shape_id, from, to).into()];
    let (from, to) = (Point::new(from.x, from.y), Point::new(to.x, to.y));
    if let Some(command) = follow_label(doc, shape_id, from, to) {
        commands.push(command);
    }
    Some(group("Resize Shape", commands))
}

/// Shift a shape's label by the same offset as the shape.
fn follow_label(doc: &EditorDocument, shape_id: ShapeId, from: Point, to: Point) -> Option<EditorCommand> {
    let old = doc.labels.label(shape_id)?.position;
    let new = Point::new(old.x + to.x - from.x, old.y + to.y - from.y);
    Some(MoveLabelCommand::new(shape_id, old, new).into())
}

/// Rotate a shape from its current rotation to `rotation` radians.
pub fn rotate_shape(doc: &EditorDocument, shape_id: ShapeId, rotation: f64) -> Option<EditorCommand> {
    let Some(shape) = doc.shapes.shape(shape_id) else {
        tracing::warn!("Cannot rotate shape {}: not found", shape_id);
        return None;
    };
    Some(RotateShapeCommand::new(shape_id, shape.transform.rotation, rotation).into())
}

/// Delete a shape together with its label, and for a corner its walls.
pub fn remove_shape(doc: &EditorDocument, shape_id: ShapeId) -> Option<EditorCommand> {
    if !doc.shapes.contains(shape_id) {
        tracing::warn!("Cannot remove shape {}: not found", shape_id);
        return None;
    }
    let mut commands: Vec<EditorCommand> = Vec::new();
    if doc.labels.label(shape_id).is_some() {
        commands.push(RemoveLabelCommand::new(shape_id).into());
    }
    if doc.corners.contains(shape_id) {
        for (neighbour, wall) in doc.corners.neighbours(shape_id) {
            commands.push(WallRemoveCommand::new(wall, shape_id, neighbour).into());
        }
        commands.push(CornerRemoveCommand::new(shape_id).into());
    } else {
        commands.push(RemoveShapeCommand::new(shape_id).into());
    }
    Some(group("Remove Shape", commands))
}

/// Create a shape with a label in one step.
///
/// The shape id is fixed up front so the label step can refer to it.
pub fn add_labeled_shape(
    kind: ShapeKind,
    params: Value,
    additional_data: AdditionalData,
    text: impl Into<String>,
    color: Option<&str>,
    on_update: Option<TextCallback>,
) -> EditorCommand {
    let shape_id = additional_data.id.unwrap_or_default();
    let additional_data = AdditionalData {
        id: Some(shape_id),
        ..additional_data
    };
    let mut label = AddLabelCommand::new(shape_id, text);
    if let Some(color) = color {
        label = label.with_color(color);
    }
    if let Some(on_update) = on_update {
        label = label.with_callback(on_update);
    }
    CompositeCommand::named("Add Shape")
        .with_command(AddShapeCommand::new(kind, params, additional_data))
        .with_command(label)
        .into()
}

/// Change a label's text. Returns `None` when the shape has no label or the
/// text is blank or unchanged.
pub fn edit_label(
    doc: &EditorDocument,
    shape_id: ShapeId,
    text: &str,
    callback: Option<TextCallback>,
) -> Option<EditorCommand> {
    let Some(label) = doc.labels.label(shape_id) else {
        tracing::warn!("Cannot edit label of shape {}: not found", shape_id);
        return None;
    };
    match TextEdit::classify(&label.text, text) {
        TextEdit::Changed => {}
        TextEdit::Unchanged => return None,
        TextEdit::Rejected => {
            tracing::warn!("Rejected blank label text for shape {}", shape_id);
            return None;
        }
    }
    let mut command = EditLabelCommand::new(shape_id, label.text.as_str(), text);
    if let Some(callback) = callback {
        command = command.with_callback(callback);
    }
    Some(command.into())
}

/// Place a corner, at the configured default position when none is given.
pub fn create_corner(position: Option<Point>, settings: &FloorSettings) -> EditorCommand {
    let position = position.unwrap_or_else(|| {
        let (x, y) = settings.default_corner_position;
        Point::new(x, y)
    });
    CornerCreateCommand::at(position, settings).into()
}

/// Connect two corners with a wall.
///
/// Returns `None` for a corner joined to itself, a pair that already has a
/// wall, or a corner that is not part of the floor.
pub fn create_wall(
    doc: &EditorDocument,
    start: ShapeId,
    end: ShapeId,
    settings: &FloorSettings,
) -> Option<EditorCommand> {
    if start == end {
        tracing::warn!("Cannot connect corner {} to itself", start);
        return None;
    }
    if doc.corners.wall_between(start, end).is_some() {
        tracing::warn!("Corners {} and {} are already connected", start, end);
        return None;
    }
    let position = |corner: ShapeId| {
        doc.corners
            .contains(corner)
            .then(|| doc.shapes.shape(corner).map(|shape| shape.position()))
            .flatten()
    };
    let (Some(from), Some(to)) = (position(start), position(end)) else {
        tracing::warn!("Cannot connect {} and {}: not both corners", start, end);
        return None;
    };
    Some(WallCreateCommand::between(start, end, from, to, settings).into())
}

/// Remove the wall joining two corners.
pub fn remove_wall(doc: &EditorDocument, start: ShapeId, end: ShapeId) -> Option<EditorCommand> {
    let Some(wall) = doc.corners.wall_between(start, end) else {
        tracing::warn!("No wall between {} and {}", start, end);
        return None;
    };
    Some(WallRemoveCommand::new(wall, start, end).into())
}
