//! Error handling for FloorKit
//!
//! Provides error types for every layer of the command engine:
//! - Command errors (construction, dispatch, missing overrides)
//! - Registry errors (shape type registration, factories)
//! - Snapshot errors (serialized shapes, labels and plans)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::types::ShapeId;

/// Command error type
///
/// Represents errors raised while constructing or running editor commands.
/// The `AbstractCommand` and `Unimplemented` variants are programmer errors:
/// they signal misuse of the command contract rather than a runtime failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The abstract command kind was requested directly
    #[error("Cannot construct abstract command '{kind}' directly")]
    AbstractCommand {
        /// The abstract kind that was requested.
        kind: String,
    },

    /// A concrete command did not override a required operation
    #[error("Method '{method}()' must be implemented by {command}")]
    Unimplemented {
        /// Type name of the concrete command.
        command: &'static str,
        /// The missing operation (`execute` or `undo`).
        method: &'static str,
    },

    /// No constructor is registered for the requested command kind
    #[error("Unknown command kind: {kind}")]
    UnknownCommand {
        /// The unknown command kind.
        kind: String,
    },

    /// A constructor for this kind is already registered
    #[error("Command kind '{kind}' is already registered")]
    AlreadyRegistered {
        /// The duplicated command kind.
        kind: String,
    },

    /// Command parameters could not be interpreted
    #[error("Invalid parameters for '{kind}': {reason}")]
    InvalidParameters {
        /// The command kind being constructed.
        kind: String,
        /// Why the parameters were rejected.
        reason: String,
    },

    /// A command failed while running
    #[error("Command '{command}' failed: {reason}")]
    Failed {
        /// Display name of the failing command.
        command: String,
        /// The failure reason.
        reason: String,
    },
}

/// Shape registry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Shape type registered twice
    #[error("Shape type '{kind}' is already registered")]
    AlreadyRegistered {
        /// The shape type name.
        kind: String,
    },

    /// Shape type has no registered factory
    #[error("Shape type '{kind}' is not registered")]
    NotRegistered {
        /// The shape type name.
        kind: String,
    },

    /// A factory rejected its parameters
    #[error("Factory for shape type '{kind}' failed: {reason}")]
    FactoryFailed {
        /// The shape type name.
        kind: String,
        /// The failure reason.
        reason: String,
    },

    /// A shape with this id is already present
    #[error("Shape {id} already exists")]
    DuplicateShape {
        /// The conflicting id.
        id: ShapeId,
    },
}

/// Snapshot error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// A type-specific field is missing from the snapshot
    #[error("Snapshot of {kind} is missing field '{field}'")]
    MissingField {
        /// The shape type name.
        kind: String,
        /// The missing field.
        field: &'static str,
    },

    /// Snapshot text could not be parsed
    #[error("Malformed snapshot: {reason}")]
    Malformed {
        /// The parse failure.
        reason: String,
    },

    /// A wall refers to a corner that is not part of the document
    #[error("Wall refers to unknown corner {corner_id}")]
    UnknownCorner {
        /// The dangling corner reference.
        corner_id: u64,
    },
}

/// Main error type for FloorKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error reports misuse of the command contract
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Error::Command(CommandError::AbstractCommand { .. })
                | Error::Command(CommandError::Unimplemented { .. })
        )
    }

    /// Check if this is a command error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }

    /// Check if this is a registry error
    pub fn is_registry_error(&self) -> bool {
        matches!(self, Error::Registry(_))
    }

    /// Check if this is a snapshot error
    pub fn is_snapshot_error(&self) -> bool {
        matches!(self, Error::Snapshot(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
