//! The mutable state commands operate on.

use floorkit_core::{EditorEvent, EventBus, EventBusError};
use floorkit_settings::EditorConfig;
use std::sync::Arc;

use crate::corner_graph::CornerGraph;
use crate::labeler::ShapeLabeler;
use crate::shape_manager::ShapeManager;

/// Shapes, labels and floor topology of one editing session.
///
/// Commands receive `&mut EditorDocument`; everything else reads through
/// `&`.
#[derive(Debug, Default)]
pub struct EditorDocument {
    pub shapes: ShapeManager,
    pub labels: ShapeLabeler,
    pub corners: CornerGraph,
}

impl EditorDocument {
    /// An empty document with the built-in shape kinds registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            shapes: ShapeManager::with_default_shapes(),
            labels: ShapeLabeler::with_settings(config.labels.clone()),
            corners: CornerGraph::new(),
        }
    }

    /// Route registry notifications to `bus`.
    pub fn attach_event_bus(&mut self, bus: Arc<EventBus>) {
        self.shapes.set_event_bus(Some(Arc::clone(&bus)));
        self.labels.set_event_bus(Some(bus));
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.attach_event_bus(bus);
        self
    }

    /// Drop every shape, label and corner.
    pub fn clear(&mut self) {
        self.shapes.clear_all_shapes();
        self.labels.clear();
        self.corners.clear();
    }
}

/// Publish to an optional bus. Nobody listening is not an error.
pub(crate) fn publish_event(bus: Option<&Arc<EventBus>>, event: EditorEvent) {
    let Some(bus) = bus else {
        return;
    };
    match bus.publish(event) {
        Ok(_) | Err(EventBusError::NoSubscribers) => {}
        Err(e) => tracing::warn!("Failed to publish editor event: {}", e),
    }
}
