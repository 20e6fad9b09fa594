//! Construction of commands by kind name.
//!
//! Scripts, saved macros and tests describe commands as `(kind, params)`
//! pairs with camelCase JSON parameters. The registry maps each kind to a
//! constructor; `"composite"` is handled here so that nested steps are built
//! through the same registry.

use floorkit_core::{CommandError, Result, ShapeId};
use floorkit_settings::FloorSettings;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use super::{
    AddLabelCommand, AddShapeCommand, CompositeCommand, CornerCreateCommand, CornerRemoveCommand,
    EditLabelCommand, EditorCommand, FailurePolicy, MoveLabelCommand, MoveShapeCommand,
    RemoveLabelCommand, RemoveShapeCommand, ResizeShapeCommand, RotateShapeCommand,
    WallCreateCommand, WallMoveCommand, WallRemoveCommand,
};
use crate::model::{AdditionalData, Dimensions, Point, Segment, ShapeKind};

/// The kind every command nominally derives from. It cannot be built.
pub const ABSTRACT_COMMAND_KIND: &str = "command";

const COMPOSITE_KIND: &str = "composite";

pub type CommandConstructor = Box<dyn Fn(&Value) -> Result<EditorCommand> + Send + Sync>;

pub struct CommandRegistry {
    constructors: HashMap<String, CommandConstructor>,
}

impl CommandRegistry {
    /// A registry with no constructors. `"composite"` is still available.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry with every built-in command.
    pub fn new() -> Self {
        Self::with_floor_settings(FloorSettings::default())
    }

    /// Built-in commands, with corners and walls styled from `floor`.
    pub fn with_floor_settings(floor: FloorSettings) -> Self {
        let mut registry = Self::empty();
        registry.insert("addShape", add_shape);
        registry.insert("removeShape", remove_shape);
        registry.insert("moveShape", move_shape);
        registry.insert("resizeShape", resize_shape);
        registry.insert("rotateShape", rotate_shape);
        registry.insert("addLabel", add_label);
        registry.insert("editLabel", edit_label);
        registry.insert("moveLabel", move_label);
        registry.insert("removeLabel", remove_label);
        let corner_settings = floor.clone();
        registry.insert("cornerCreate", move |params| {
            corner_create(params, &corner_settings)
        });
        registry.insert("cornerRemove", corner_remove);
        registry.insert("wallCreate", move |params| wall_create(params, &floor));
        registry.insert("wallRemove", wall_remove);
        registry.insert("wallMove", wall_move);
        registry
    }

    fn insert<F>(&mut self, kind: &str, constructor: F)
    where
        F: Fn(&Value) -> Result<EditorCommand> + Send + Sync + 'static,
    {
        self.constructors
            .insert(kind.to_string(), Box::new(constructor));
    }

    /// Add a constructor for a new kind.
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&Value) -> Result<EditorCommand> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if kind == ABSTRACT_COMMAND_KIND {
            return Err(CommandError::AbstractCommand { kind }.into());
        }
        if kind == COMPOSITE_KIND || self.constructors.contains_key(&kind) {
            return Err(CommandError::AlreadyRegistered { kind }.into());
        }
        self.constructors.insert(kind, Box::new(constructor));
        Ok(())
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        kind == COMPOSITE_KIND || self.constructors.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self
            .constructors
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(COMPOSITE_KIND))
            .collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn create(&self, kind: &str, params: &Value) -> Result<EditorCommand> {
        if kind == ABSTRACT_COMMAND_KIND {
            return Err(CommandError::AbstractCommand {
                kind: kind.to_string(),
            }
            .into());
        }
        if kind == COMPOSITE_KIND {
            return self.composite(params);
        }
        match self.constructors.get(kind) {
            Some(constructor) => constructor(params),
            None => Err(CommandError::UnknownCommand {
                kind: kind.to_string(),
            }
            .into()),
        }
    }

    fn composite(&self, params: &Value) -> Result<EditorCommand> {
        let composite_params: CompositeParams = parse(COMPOSITE_KIND, params)?;
        let mut composite = match composite_params.name {
            Some(name) => CompositeCommand::named(name),
            None => CompositeCommand::new(),
        }
        .with_policy(composite_params.policy);
        for step in &composite_params.commands {
            composite.add_command(self.create(&step.kind, &step.params)?);
        }
        Ok(composite.into())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

fn parse<T: DeserializeOwned>(kind: &str, params: &Value) -> Result<T> {
    serde_json::from_value(params.clone()).map_err(|e| {
        CommandError::InvalidParameters {
            kind: kind.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn emit_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompositeStep {
    kind: String,
    #[serde(default)]
    params: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompositeParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    policy: FailurePolicy,
    commands: Vec<CompositeStep>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddShapeParams {
    #[serde(rename = "type")]
    kind: ShapeKind,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    id: Option<ShapeId>,
    #[serde(default)]
    interactive: Option<Value>,
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(default)]
    managers: Vec<String>,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn add_shape(params: &Value) -> Result<EditorCommand> {
    let p: AddShapeParams = parse("addShape", params)?;
    let additional_data = AdditionalData {
        id: p.id,
        interactive: p.interactive,
        metadata: p.metadata,
        managers: p.managers,
    };
    Ok(AddShapeCommand::new(p.kind, p.params, additional_data)
        .with_emit_event(p.emit_event)
        .into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeRef {
    shape_id: ShapeId,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn remove_shape(params: &Value) -> Result<EditorCommand> {
    let p: ShapeRef = parse("removeShape", params)?;
    Ok(RemoveShapeCommand::new(p.shape_id)
        .with_emit_event(p.emit_event)
        .into())
}

/// `from`/`to` pair shared by the move, resize and rotate kinds.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Change<T> {
    shape_id: ShapeId,
    from: T,
    to: T,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn move_shape(params: &Value) -> Result<EditorCommand> {
    let p: Change<Point> = parse("moveShape", params)?;
    Ok(MoveShapeCommand::new(p.shape_id, p.from, p.to)
        .with_emit_event(p.emit_event)
        .into())
}

fn resize_shape(params: &Value) -> Result<EditorCommand> {
    let p: Change<Dimensions> = parse("resizeShape", params)?;
    Ok(ResizeShapeCommand::new(p.shape_id, p.from, p.to)
        .with_emit_event(p.emit_event)
        .into())
}

fn rotate_shape(params: &Value) -> Result<EditorCommand> {
    let p: Change<f64> = parse("rotateShape", params)?;
    Ok(RotateShapeCommand::new(p.shape_id, p.from, p.to)
        .with_emit_event(p.emit_event)
        .into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddLabelParams {
    shape_id: ShapeId,
    text: String,
    #[serde(default)]
    color: Option<String>,
}

fn add_label(params: &Value) -> Result<EditorCommand> {
    let p: AddLabelParams = parse("addLabel", params)?;
    let mut command = AddLabelCommand::new(p.shape_id, p.text);
    if let Some(color) = p.color {
        command = command.with_color(color);
    }
    Ok(command.into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditLabelParams {
    shape_id: ShapeId,
    old_text: String,
    new_text: String,
}

fn edit_label(params: &Value) -> Result<EditorCommand> {
    let p: EditLabelParams = parse("editLabel", params)?;
    Ok(EditLabelCommand::new(p.shape_id, p.old_text, p.new_text).into())
}

fn move_label(params: &Value) -> Result<EditorCommand> {
    let p: Change<Point> = parse("moveLabel", params)?;
    Ok(MoveLabelCommand::new(p.shape_id, p.from, p.to).into())
}

fn remove_label(params: &Value) -> Result<EditorCommand> {
    let p: ShapeRef = parse("removeLabel", params)?;
    Ok(RemoveLabelCommand::new(p.shape_id).into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CornerParams {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    id: Option<ShapeId>,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn corner_create(params: &Value, floor: &FloorSettings) -> Result<EditorCommand> {
    let params = if params.is_null() {
        Value::Object(Map::new())
    } else {
        params.clone()
    };
    let p: CornerParams = parse("cornerCreate", &params)?;
    let (default_x, default_y) = floor.default_corner_position;
    let position = Point::new(p.x.unwrap_or(default_x), p.y.unwrap_or(default_y));
    let additional_data = AdditionalData {
        id: p.id,
        ..AdditionalData::default()
    };
    Ok(CornerCreateCommand::with_data(position, floor, additional_data)
        .with_emit_event(p.emit_event)
        .into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CornerRef {
    corner_id: ShapeId,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn corner_remove(params: &Value) -> Result<EditorCommand> {
    let p: CornerRef = parse("cornerRemove", params)?;
    Ok(CornerRemoveCommand::new(p.corner_id)
        .with_emit_event(p.emit_event)
        .into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WallParams {
    start_corner_id: ShapeId,
    end_corner_id: ShapeId,
    from: Point,
    to: Point,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn wall_create(params: &Value, floor: &FloorSettings) -> Result<EditorCommand> {
    let p: WallParams = parse("wallCreate", params)?;
    Ok(
        WallCreateCommand::between(p.start_corner_id, p.end_corner_id, p.from, p.to, floor)
            .with_emit_event(p.emit_event)
            .into(),
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WallRef {
    wall_id: ShapeId,
    start_corner_id: ShapeId,
    end_corner_id: ShapeId,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn wall_remove(params: &Value) -> Result<EditorCommand> {
    let p: WallRef = parse("wallRemove", params)?;
    Ok(
        WallRemoveCommand::new(p.wall_id, p.start_corner_id, p.end_corner_id)
            .with_emit_event(p.emit_event)
            .into(),
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WallMoveParams {
    wall_id: ShapeId,
    from: Segment,
    to: Segment,
    #[serde(default = "emit_default")]
    emit_event: bool,
}

fn wall_move(params: &Value) -> Result<EditorCommand> {
    let p: WallMoveParams = parse("wallMove", params)?;
    Ok(WallMoveCommand::new(p.wall_id, p.from, p.to)
        .with_emit_event(p.emit_event)
        .into())
}
