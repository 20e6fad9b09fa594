//! # FloorKit Core
//!
//! Core types, errors, and events shared by the FloorKit crates.
//! Provides the stable shape identity, the unified error hierarchy,
//! and the event bus used to notify observers of editor changes.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{CommandError, Error, RegistryError, Result, SnapshotError};

// Re-export event bus for convenience
pub use event_bus::{
    shared_event_bus, EditorEvent, EventBus, EventBusConfig, EventBusError, EventCategory,
    EventFilter, HistoryEvent, LabelEvent, ShapeEvent, SubscriptionId,
};

// Re-export type aliases for convenience
pub use types::{
    text_callback, thread_safe_rw, DataCallback, ShapeId, TextCallback, ThreadSafeRw,
    ThreadSafeRwMap,
};
