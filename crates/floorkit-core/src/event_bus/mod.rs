//! # Event Bus Module
//!
//! Provides the event bus used for decoupled communication between the
//! command engine and its observers (toolbars, list views, renderers).
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both sync handlers and async broadcast receivers
//!
//! There is no process-wide bus: every editing session creates its own and
//! shares it by `Arc`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_core::event_bus::{shared_event_bus, EditorEvent, EventBusConfig, EventCategory, EventFilter};
//!
//! let bus = shared_event_bus(EventBusConfig::default());
//!
//! // Refresh undo/redo buttons whenever history changes
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::History]),
//!     |event| println!("history changed: {}", event.description()),
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
