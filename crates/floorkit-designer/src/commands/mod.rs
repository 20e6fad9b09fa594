//! Undoable editor commands.
//!
//! Every mutation of an [`EditorDocument`] that the user can take back is a
//! [`Command`]. Commands capture what they need to reverse themselves either
//! when they are built (positions, texts) or the first time they run
//! (removed shapes, label snapshots).
//!
//! The concrete commands are gathered in the closed [`EditorCommand`] enum,
//! which is what the undo/redo stacks and [`CompositeCommand`] hold.
//! [`EditorCommand::Custom`] carries commands defined outside this crate.

use async_trait::async_trait;
use floorkit_core::{CommandError, Error, Result, ShapeId};
use std::fmt;

use crate::document::EditorDocument;

mod composite;
mod floor;
mod label;
mod registry;
mod shape;

pub use composite::{CompositeCommand, FailurePolicy};
pub use floor::{
    CornerCreateCommand, CornerRemoveCommand, WallCreateCommand, WallMoveCommand,
    WallRemoveCommand,
};
pub use label::{AddLabelCommand, EditLabelCommand, MoveLabelCommand, RemoveLabelCommand};
pub use registry::{CommandConstructor, CommandRegistry, ABSTRACT_COMMAND_KIND};
pub use shape::{
    AddShapeCommand, MoveShapeCommand, RemoveShapeCommand, ResizeShapeCommand, RotateShapeCommand,
};

/// What a command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandOutput {
    #[default]
    None,
    /// A shape was created or reinserted.
    Shape(ShapeId),
    /// Whether a removal actually removed something.
    Removed(bool),
}

impl CommandOutput {
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            CommandOutput::Shape(id) => Some(*id),
            _ => None,
        }
    }
}

/// A reversible mutation of the document.
///
/// `undo` must exactly reverse the most recent `execute`, and `execute`
/// after `undo` must land in the same state as the first `execute`.
/// Implementations that leave either method out get an
/// [`CommandError::Unimplemented`] error naming the type.
#[async_trait]
pub trait Command: Send + Sync {
    /// Display name, e.g. for an "Undo Move Shape" menu entry.
    fn name(&self) -> &str;

    async fn execute(&mut self, _doc: &mut EditorDocument) -> Result<CommandOutput> {
        Err(unimplemented(std::any::type_name::<Self>(), "execute"))
    }

    async fn undo(&mut self, _doc: &mut EditorDocument) -> Result<()> {
        Err(unimplemented(std::any::type_name::<Self>(), "undo"))
    }
}

fn unimplemented(command: &'static str, method: &'static str) -> Error {
    CommandError::Unimplemented { command, method }.into()
}

/// Every command the undo/redo stacks can hold.
pub enum EditorCommand {
    AddShape(AddShapeCommand),
    RemoveShape(RemoveShapeCommand),
    MoveShape(MoveShapeCommand),
    ResizeShape(ResizeShapeCommand),
    RotateShape(RotateShapeCommand),
    AddLabel(AddLabelCommand),
    EditLabel(EditLabelCommand),
    MoveLabel(MoveLabelCommand),
    RemoveLabel(RemoveLabelCommand),
    CornerCreate(CornerCreateCommand),
    CornerRemove(CornerRemoveCommand),
    WallCreate(WallCreateCommand),
    WallRemove(WallRemoveCommand),
    WallMove(WallMoveCommand),
    Composite(CompositeCommand),
    Custom(Box<dyn Command>),
}

macro_rules! dispatch {
    ($self:expr, $cmd:ident => $body:expr) => {
        match $self {
            EditorCommand::AddShape($cmd) => $body,
            EditorCommand::RemoveShape($cmd) => $body,
            EditorCommand::MoveShape($cmd) => $body,
            EditorCommand::ResizeShape($cmd) => $body,
            EditorCommand::RotateShape($cmd) => $body,
            EditorCommand::AddLabel($cmd) => $body,
            EditorCommand::EditLabel($cmd) => $body,
            EditorCommand::MoveLabel($cmd) => $body,
            EditorCommand::RemoveLabel($cmd) => $body,
            EditorCommand::CornerCreate($cmd) => $body,
            EditorCommand::CornerRemove($cmd) => $body,
            EditorCommand::WallCreate($cmd) => $body,
            EditorCommand::WallRemove($cmd) => $body,
            EditorCommand::WallMove($cmd) => $body,
            EditorCommand::Composite($cmd) => $body,
            EditorCommand::Custom($cmd) => $body,
        }
    };
}

#[async_trait]
impl Command for EditorCommand {
    fn name(&self) -> &str {
        dispatch!(self, cmd => cmd.name())
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        dispatch!(self, cmd => cmd.execute(doc).await)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        dispatch!(self, cmd => cmd.undo(doc).await)
    }
}

impl EditorCommand {
    pub fn custom<C: Command + 'static>(command: C) -> Self {
        EditorCommand::Custom(Box::new(command))
    }
}

impl fmt::Debug for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EditorCommand").field(&self.name()).finish()
    }
}

macro_rules! impl_from_command {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for EditorCommand {
                fn from(command: $ty) -> Self {
                    EditorCommand::$variant(command)
                }
            }
        )*
    };
}

impl_from_command!(
    AddShape(AddShapeCommand),
    RemoveShape(RemoveShapeCommand),
    MoveShape(MoveShapeCommand),
    ResizeShape(ResizeShapeCommand),
    RotateShape(RotateShapeCommand),
    AddLabel(AddLabelCommand),
    EditLabel(EditLabelCommand),
    MoveLabel(MoveLabelCommand),
    RemoveLabel(RemoveLabelCommand),
    CornerCreate(CornerCreateCommand),
    CornerRemove(CornerRemoveCommand),
    WallCreate(WallCreateCommand),
    WallRemove(WallRemoveCommand),
    WallMove(WallMoveCommand),
    Composite(CompositeCommand),
    Custom(Box<dyn Command>),
);
