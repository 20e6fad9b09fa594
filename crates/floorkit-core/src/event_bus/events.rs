//! Event type definitions for the event bus.
//!
//! This module defines all editor events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::types::ShapeId;

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Undo/redo history changes
    History(HistoryEvent),
    /// Shape registry changes
    Shape(ShapeEvent),
    /// Label registry changes
    Label(LabelEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::History(_) => EventCategory::History,
            EditorEvent::Shape(_) => EventCategory::Shape,
            EditorEvent::Label(_) => EventCategory::Label,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::History(e) => e.description().to_string(),
            EditorEvent::Shape(e) => e.description(),
            EditorEvent::Label(e) => e.description(),
        }
    }
}

impl From<HistoryEvent> for EditorEvent {
    fn from(event: HistoryEvent) -> Self {
        EditorEvent::History(event)
    }
}

impl From<ShapeEvent> for EditorEvent {
    fn from(event: ShapeEvent) -> Self {
        EditorEvent::Shape(event)
    }
}

impl From<LabelEvent> for EditorEvent {
    fn from(event: LabelEvent) -> Self {
        EditorEvent::Label(event)
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Undo/redo stack events.
    History,
    /// Shape registry events.
    Shape,
    /// Label registry events.
    Label,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::History => write!(f, "History"),
            EventCategory::Shape => write!(f, "Shape"),
            EventCategory::Label => write!(f, "Label"),
        }
    }
}

/// Undo/redo notifications.
///
/// These carry no payload: subscribers re-query `can_undo`/`can_redo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A command was pushed onto the undo stack.
    CommandPushed,
    /// The most recent command was undone.
    UndoPerformed,
    /// The most recently undone command was replayed.
    RedoPerformed,
}

impl HistoryEvent {
    fn description(&self) -> &'static str {
        match self {
            HistoryEvent::CommandPushed => "commandPushed",
            HistoryEvent::UndoPerformed => "undoPerformed",
            HistoryEvent::RedoPerformed => "redoPerformed",
        }
    }
}

/// Shape registry notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeEvent {
    /// A shape was created or reinserted.
    Added {
        /// Id of the shape.
        id: ShapeId,
        /// Shape type name.
        kind: String,
    },
    /// A shape was removed from the registry.
    Removed {
        /// Id of the shape.
        id: ShapeId,
    },
    /// A shape changed position.
    Moved {
        /// Id of the shape.
        id: ShapeId,
        /// New x coordinate.
        x: f64,
        /// New y coordinate.
        y: f64,
    },
    /// A shape changed position and size.
    Resized {
        /// Id of the shape.
        id: ShapeId,
        /// New display width.
        width: f64,
        /// New display height.
        height: f64,
    },
    /// A shape changed rotation.
    Rotated {
        /// Id of the shape.
        id: ShapeId,
        /// New rotation in radians.
        rotation: f64,
    },
}

impl ShapeEvent {
    fn description(&self) -> String {
        match self {
            ShapeEvent::Added { id, kind } => format!("Added {} {}", kind, id),
            ShapeEvent::Removed { id } => format!("Removed shape {}", id),
            ShapeEvent::Moved { id, x, y } => format!("Moved shape {} to ({}, {})", id, x, y),
            ShapeEvent::Resized { id, width, height } => {
                format!("Resized shape {} to {}x{}", id, width, height)
            }
            ShapeEvent::Rotated { id, rotation } => {
                format!("Rotated shape {} to {} rad", id, rotation)
            }
        }
    }
}

/// Label registry notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LabelEvent {
    /// A label was attached to a shape.
    Added {
        /// Owning shape.
        owner: ShapeId,
    },
    /// A label was detached from its shape.
    Removed {
        /// Owning shape.
        owner: ShapeId,
    },
    /// A label's text changed.
    TextChanged {
        /// Owning shape.
        owner: ShapeId,
        /// The new text.
        text: String,
    },
    /// A label changed position.
    Moved {
        /// Owning shape.
        owner: ShapeId,
    },
}

impl LabelEvent {
    fn description(&self) -> String {
        match self {
            LabelEvent::Added { owner } => format!("Label added to {}", owner),
            LabelEvent::Removed { owner } => format!("Label removed from {}", owner),
            LabelEvent::TextChanged { owner, text } => {
                format!("Label of {} set to '{}'", owner, text)
            }
            LabelEvent::Moved { owner } => format!("Label of {} moved", owner),
        }
    }
}
