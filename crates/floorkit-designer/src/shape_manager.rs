//! Shape registry.
//!
//! Owns every shape in the document together with the per-kind factories
//! used to build them. All mutation goes through here so change
//! notifications stay in one place.

use floorkit_core::{EventBus, RegistryError, Result, ShapeEvent, ShapeId};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::document::publish_event;
use crate::model::{
    AdditionalData, ArcFactory, Dimensions, EllipseFactory, LineFactory, PolygonFactory,
    RectangleFactory, Segment, Shape, ShapeFactory, ShapeKind, ShapeSnapshot, ShapeTypeMetadata,
};

struct RegisteredShape {
    factory: Arc<dyn ShapeFactory>,
    metadata: ShapeTypeMetadata,
}

/// Authoritative set of shapes plus the factory registry.
pub struct ShapeManager {
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of `shapes`.
    order: Vec<ShapeId>,
    registry: HashMap<ShapeKind, RegisteredShape>,
    event_bus: Option<Arc<EventBus>>,
}

impl ShapeManager {
    /// An empty manager with no registered shape kinds.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            registry: HashMap::new(),
            event_bus: None,
        }
    }

    /// A manager with the built-in factories registered.
    pub fn with_default_shapes() -> Self {
        let mut manager = Self::new();
        let defaults: [(ShapeKind, Arc<dyn ShapeFactory>, ShapeTypeMetadata); 5] = [
            (ShapeKind::Rectangle, Arc::new(RectangleFactory), ShapeTypeMetadata::draggable()),
            (ShapeKind::Ellipse, Arc::new(EllipseFactory), ShapeTypeMetadata::draggable()),
            (ShapeKind::Polygon, Arc::new(PolygonFactory), ShapeTypeMetadata::draggable()),
            (ShapeKind::Arc, Arc::new(ArcFactory), ShapeTypeMetadata::draggable()),
            (ShapeKind::Line, Arc::new(LineFactory), ShapeTypeMetadata::default()),
        ];
        for (kind, factory, metadata) in defaults {
            manager.registry.insert(kind, RegisteredShape { factory, metadata });
        }
        manager
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn set_event_bus(&mut self, bus: Option<Arc<EventBus>>) {
        self.event_bus = bus;
    }

    /// Register the factory for a shape kind.
    ///
    /// Fails if the kind already has a factory.
    pub fn register_shape<F>(
        &mut self,
        kind: ShapeKind,
        factory: F,
        metadata: ShapeTypeMetadata,
    ) -> Result<()>
    where
        F: ShapeFactory + 'static,
    {
        if self.registry.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered {
                kind: kind.to_string(),
            }
            .into());
        }
        self.registry.insert(
            kind,
            RegisteredShape {
                factory: Arc::new(factory),
                metadata,
            },
        );
        Ok(())
    }

    pub fn is_registered(&self, kind: ShapeKind) -> bool {
        self.registry.contains_key(&kind)
    }

    /// Metadata a kind was registered with.
    pub fn shape_metadata(&self, kind: ShapeKind) -> Result<&ShapeTypeMetadata> {
        self.registry
            .get(&kind)
            .map(|entry| &entry.metadata)
            .ok_or_else(|| not_registered(kind))
    }

    /// Build a shape with the registered factory and insert it.
    ///
    /// The shape gets `additional_data.id` when given, else a fresh id. When
    /// no interactive config is supplied the kind's default is applied.
    pub async fn add_shape(
        &mut self,
        kind: ShapeKind,
        params: &Value,
        additional_data: AdditionalData,
        emit_event: bool,
    ) -> Result<ShapeId> {
        let (factory, metadata) = match self.registry.get(&kind) {
            Some(entry) => (Arc::clone(&entry.factory), entry.metadata.clone()),
            None => return Err(not_registered(kind)),
        };

        let id = additional_data.id.unwrap_or_default();
        if self.shapes.contains_key(&id) {
            return Err(RegistryError::DuplicateShape { id }.into());
        }

        let body = factory.create(params).await?;
        if body.kind() != kind {
            return Err(RegistryError::FactoryFailed {
                kind: kind.to_string(),
                reason: format!("factory built a {}", body.kind()),
            }
            .into());
        }

        let mut shape = Shape::from_body(id, body);
        shape.interactive = additional_data
            .interactive
            .or(metadata.default_interactive);
        shape.metadata = additional_data.metadata;
        shape.metadata.remove("type");
        shape.managers = additional_data.managers;

        self.insert(shape, emit_event);
        Ok(id)
    }

    /// Reinsert a shape that was previously removed, keeping its identity.
    pub fn add_existing_shape(&mut self, shape: Shape, emit_event: bool) -> Result<()> {
        if self.shapes.contains_key(&shape.id) {
            return Err(RegistryError::DuplicateShape { id: shape.id }.into());
        }
        self.insert(shape, emit_event);
        Ok(())
    }

    /// Put a removed shape back at `index` in insertion order, keeping its
    /// identity. An index past the end appends.
    pub fn restore_shape(&mut self, shape: Shape, index: usize, emit_event: bool) -> Result<()> {
        if self.shapes.contains_key(&shape.id) {
            return Err(RegistryError::DuplicateShape { id: shape.id }.into());
        }
        self.insert_at(shape, index, emit_event);
        Ok(())
    }

    /// Rebuild a shape from a snapshot, keeping the snapshot's id.
    pub fn add_shape_from_snapshot(
        &mut self,
        snapshot: &ShapeSnapshot,
        emit_event: bool,
    ) -> Result<ShapeId> {
        if !self.is_registered(snapshot.kind()) {
            return Err(not_registered(snapshot.kind()));
        }
        let shape = Shape::from_snapshot(snapshot)?;
        let id = shape.id;
        self.add_existing_shape(shape, emit_event)?;
        Ok(id)
    }

    fn insert(&mut self, shape: Shape, emit_event: bool) {
        let end = self.order.len();
        self.insert_at(shape, end, emit_event);
    }

    fn insert_at(&mut self, shape: Shape, index: usize, emit_event: bool) {
        let id = shape.id;
        let kind = shape.kind();
        self.order.insert(index.min(self.order.len()), id);
        self.shapes.insert(id, shape);
        tracing::debug!("Added {} {}", kind, id);
        self.publish(
            emit_event,
            ShapeEvent::Added {
                id,
                kind: kind.to_string(),
            },
        );
    }

    /// Remove a shape and hand it back to the caller.
    pub fn remove_shape(&mut self, id: ShapeId, emit_event: bool) -> Option<Shape> {
        self.take_shape(id, emit_event).map(|(_, shape)| shape)
    }

    /// Remove a shape, returning it with its index in insertion order so
    /// that [`restore_shape`](Self::restore_shape) can put it back in place.
    pub fn take_shape(&mut self, id: ShapeId, emit_event: bool) -> Option<(usize, Shape)> {
        let shape = self.shapes.remove(&id)?;
        let index = match self.order.iter().position(|existing| *existing == id) {
            Some(index) => {
                self.order.remove(index);
                index
            }
            None => self.order.len(),
        };
        tracing::debug!("Removed {} {}", shape.kind(), id);
        self.publish(emit_event, ShapeEvent::Removed { id });
        Some((index, shape))
    }

    /// Index of a shape in insertion order.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.order.iter().position(|existing| *existing == id)
    }

    /// Remove a shape, discarding it.
    pub fn remove_shape_by_id(&mut self, id: ShapeId) -> bool {
        self.remove_shape(id, true).is_some()
    }

    pub fn clear_all_shapes(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Move a shape. Returns `false` if it does not exist.
    pub fn set_position(&mut self, id: ShapeId, x: f64, y: f64, emit_event: bool) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.set_position(x, y);
        self.publish(emit_event, ShapeEvent::Moved { id, x, y });
        true
    }

    /// Set position and display size together.
    pub fn set_dimensions(&mut self, id: ShapeId, dimensions: Dimensions, emit_event: bool) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.set_dimensions(dimensions);
        self.publish(
            emit_event,
            ShapeEvent::Resized {
                id,
                width: dimensions.width,
                height: dimensions.height,
            },
        );
        true
    }

    pub fn set_rotation(&mut self, id: ShapeId, rotation: f64, emit_event: bool) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.set_rotation(rotation);
        self.publish(emit_event, ShapeEvent::Rotated { id, rotation });
        true
    }

    /// Replace the endpoints of a line. Returns `false` if the shape is
    /// missing or not a line.
    pub fn set_segment(&mut self, id: ShapeId, segment: Segment, emit_event: bool) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        if !shape.set_segment(segment) {
            return false;
        }
        let (width, height) = (shape.transform.width, shape.transform.height);
        self.publish(emit_event, ShapeEvent::Resized { id, width, height });
        true
    }

    fn publish(&self, emit_event: bool, event: ShapeEvent) {
        if emit_event {
            publish_event(self.event_bus.as_ref(), event.into());
        }
    }
}

impl Default for ShapeManager {
    fn default() -> Self {
        Self::with_default_shapes()
    }
}

impl std::fmt::Debug for ShapeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.registry.keys().collect();
        kinds.sort();
        f.debug_struct("ShapeManager")
            .field("shapes", &self.shapes.len())
            .field("registered", &kinds)
            .finish()
    }
}

fn not_registered(kind: ShapeKind) -> floorkit_core::Error {
    RegistryError::NotRegistered {
        kind: kind.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RectangleParams, ShapeBody};
    use async_trait::async_trait;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_and_remove() {
        let mut manager = ShapeManager::with_default_shapes();
        let id = manager
            .add_shape(
                ShapeKind::Rectangle,
                &RectangleParams::new(0.0, 0.0, 10.0, 10.0).to_value(),
                AdditionalData::default(),
                true,
            )
            .await
            .unwrap();

        assert!(manager.contains(id));
        assert_eq!(manager.len(), 1);

        let removed = manager.remove_shape(id, true).unwrap();
        assert_eq!(removed.id, id);
        assert!(manager.is_empty());
        assert!(!manager.remove_shape_by_id(id));
    }

    #[tokio::test]
    async fn test_default_interactive_applied() {
        let mut manager = ShapeManager::with_default_shapes();
        let id = manager
            .add_shape(ShapeKind::Ellipse, &Value::Null, AdditionalData::default(), false)
            .await
            .unwrap();
        assert_eq!(
            manager.shape(id).unwrap().interactive,
            Some(json!({ "draggable": true }))
        );

        let explicit = AdditionalData::default().with_interactive(json!({ "draggable": false }));
        let id = manager
            .add_shape(ShapeKind::Ellipse, &Value::Null, explicit, false)
            .await
            .unwrap();
        assert_eq!(
            manager.shape(id).unwrap().interactive,
            Some(json!({ "draggable": false }))
        );
    }

    #[test]
    fn test_register_twice_fails() {
        let mut manager = ShapeManager::new();
        manager
            .register_shape(ShapeKind::Rectangle, RectangleFactory, ShapeTypeMetadata::default())
            .unwrap();
        let err = manager
            .register_shape(ShapeKind::Rectangle, RectangleFactory, ShapeTypeMetadata::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Shape type 'rectangle' is already registered");
    }

    #[test]
    fn test_metadata_of_unregistered_kind() {
        let manager = ShapeManager::new();
        let err = manager.shape_metadata(ShapeKind::Arc).unwrap_err();
        assert_eq!(err.to_string(), "Shape type 'arc' is not registered");
    }

    #[tokio::test]
    async fn test_add_unregistered_kind() {
        let mut manager = ShapeManager::new();
        let err = manager
            .add_shape(ShapeKind::Polygon, &Value::Null, AdditionalData::default(), true)
            .await
            .unwrap_err();
        assert!(err.is_registry_error());
    }

    struct WrongKind;

    #[async_trait]
    impl ShapeFactory for WrongKind {
        async fn create(&self, params: &Value) -> Result<ShapeBody> {
            RectangleFactory.create(params).await
        }
    }

    #[tokio::test]
    async fn test_factory_kind_mismatch() {
        let mut manager = ShapeManager::new();
        manager
            .register_shape(ShapeKind::Ellipse, WrongKind, ShapeTypeMetadata::default())
            .unwrap();
        let err = manager
            .add_shape(ShapeKind::Ellipse, &Value::Null, AdditionalData::default(), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("factory built a rectangle"));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let mut manager = ShapeManager::with_default_shapes();
        let id = ShapeId::new();
        manager
            .add_shape(ShapeKind::Rectangle, &Value::Null, AdditionalData::default().with_id(id), true)
            .await
            .unwrap();
        let err = manager
            .add_shape(ShapeKind::Rectangle, &Value::Null, AdditionalData::default().with_id(id), true)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            floorkit_core::Error::Registry(RegistryError::DuplicateShape { .. })
        ));
    }

    #[tokio::test]
    async fn test_restore_keeps_insertion_order() {
        let mut manager = ShapeManager::with_default_shapes();
        let mut ids = Vec::new();
        for kind in [ShapeKind::Rectangle, ShapeKind::Ellipse, ShapeKind::Arc] {
            ids.push(
                manager
                    .add_shape(kind, &Value::Null, AdditionalData::default(), false)
                    .await
                    .unwrap(),
            );
        }

        let (index, shape) = manager.take_shape(ids[1], false).unwrap();
        assert_eq!(index, 1);
        assert_eq!(manager.index_of(ids[2]), Some(1));

        manager.restore_shape(shape.clone(), index, false).unwrap();
        let order: Vec<ShapeId> = manager.shapes().map(|shape| shape.id).collect();
        assert_eq!(order, ids);
        assert!(manager.restore_shape(shape, 0, false).is_err());
    }

    #[tokio::test]
    async fn test_setters_report_missing_shapes() {
        let mut manager = ShapeManager::with_default_shapes();
        let ghost = ShapeId::new();
        assert!(!manager.set_position(ghost, 1.0, 2.0, true));
        assert!(!manager.set_rotation(ghost, 1.0, true));

        let id = manager
            .add_shape(ShapeKind::Rectangle, &Value::Null, AdditionalData::default(), true)
            .await
            .unwrap();
        assert!(!manager.set_segment(id, Segment::default(), true));
        assert!(manager.set_position(id, 5.0, 6.0, true));
        assert_eq!(manager.shape(id).unwrap().transform.x, 5.0);
    }
}
