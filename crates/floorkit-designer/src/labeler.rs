//! Text labels attached to shapes.
//!
//! At most one label exists per shape. Labels are keyed by the owning
//! shape's id, so they survive the shape being removed and reinserted by
//! undo/redo.

use floorkit_core::{EventBus, LabelEvent, ShapeId, TextCallback};
use floorkit_settings::LabelSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::document::publish_event;
use crate::model::{Point, Shape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub color: String,
    pub font_size: u16,
    pub background_color: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::from_settings(&LabelSettings::default())
    }
}

impl LabelStyle {
    pub fn from_settings(settings: &LabelSettings) -> Self {
        Self {
            color: settings.default_color.clone(),
            font_size: settings.font_size,
            background_color: settings.background_color.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Label {
    pub owner: ShapeId,
    pub text: String,
    pub position: Point,
    pub style: LabelStyle,
    /// Notified with `(owner, text)` whenever the text is edited.
    pub on_update: Option<TextCallback>,
}

impl Label {
    pub fn snapshot(&self) -> LabelSnapshot {
        LabelSnapshot {
            text: self.text.clone(),
            x: self.position.x,
            y: self.position.y,
            style: self.style.clone(),
            update_callback: self.on_update.clone(),
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("owner", &self.owner)
            .field("text", &self.text)
            .field("position", &self.position)
            .field("style", &self.style)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// Everything needed to rebuild a label. The callback only survives in
/// memory.
#[derive(Clone, Serialize, Deserialize)]
pub struct LabelSnapshot {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub style: LabelStyle,
    #[serde(skip)]
    pub update_callback: Option<TextCallback>,
}

impl PartialEq for LabelSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.x == other.x
            && self.y == other.y
            && self.style == other.style
    }
}

impl fmt::Debug for LabelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelSnapshot")
            .field("text", &self.text)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("style", &self.style)
            .finish()
    }
}

/// How a proposed label text relates to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Changed,
    Unchanged,
    /// Blank text is never accepted.
    Rejected,
}

impl TextEdit {
    pub fn classify(current: &str, proposed: &str) -> Self {
        if proposed.trim().is_empty() {
            TextEdit::Rejected
        } else if proposed == current {
            TextEdit::Unchanged
        } else {
            TextEdit::Changed
        }
    }
}

/// Label registry keyed by owning shape.
pub struct ShapeLabeler {
    labels: HashMap<ShapeId, Label>,
    defaults: LabelSettings,
    event_bus: Option<Arc<EventBus>>,
}

impl ShapeLabeler {
    pub fn new() -> Self {
        Self::with_settings(LabelSettings::default())
    }

    pub fn with_settings(defaults: LabelSettings) -> Self {
        Self {
            labels: HashMap::new(),
            defaults,
            event_bus: None,
        }
    }

    pub fn set_event_bus(&mut self, bus: Option<Arc<EventBus>>) {
        self.event_bus = bus;
    }

    /// Label `shape` at its current position, replacing any existing label.
    pub fn add_label(
        &mut self,
        shape: &Shape,
        text: impl Into<String>,
        color: Option<&str>,
        on_update: Option<TextCallback>,
    ) -> &Label {
        let mut style = LabelStyle::from_settings(&self.defaults);
        if let Some(color) = color {
            style.color = color.to_string();
        }
        let label = Label {
            owner: shape.id,
            text: text.into(),
            position: shape.position(),
            style,
            on_update,
        };
        self.insert(label)
    }

    /// Rebuild a label from a snapshot, replacing any existing label.
    pub fn add_label_from_snapshot(&mut self, owner: ShapeId, snapshot: LabelSnapshot) -> &Label {
        let label = Label {
            owner,
            text: snapshot.text,
            position: Point::new(snapshot.x, snapshot.y),
            style: snapshot.style,
            on_update: snapshot.update_callback,
        };
        self.insert(label)
    }

    fn insert(&mut self, label: Label) -> &Label {
        let owner = label.owner;
        if self.labels.remove(&owner).is_some() {
            self.publish(LabelEvent::Removed { owner });
        }
        self.publish(LabelEvent::Added { owner });
        self.labels.entry(owner).or_insert(label)
    }

    pub fn label(&self, owner: ShapeId) -> Option<&Label> {
        self.labels.get(&owner)
    }

    pub fn label_mut(&mut self, owner: ShapeId) -> Option<&mut Label> {
        self.labels.get_mut(&owner)
    }

    pub fn remove_label(&mut self, owner: ShapeId) -> Option<Label> {
        let label = self.labels.remove(&owner)?;
        self.publish(LabelEvent::Removed { owner });
        Some(label)
    }

    /// Replace a label's text. Returns the previous text.
    pub fn set_text(&mut self, owner: ShapeId, text: &str) -> Option<String> {
        let label = self.labels.get_mut(&owner)?;
        let previous = std::mem::replace(&mut label.text, text.to_string());
        self.publish(LabelEvent::TextChanged {
            owner,
            text: text.to_string(),
        });
        Some(previous)
    }

    /// Move a label. Returns `false` if the shape has no label.
    pub fn set_position(&mut self, owner: ShapeId, position: Point) -> bool {
        let Some(label) = self.labels.get_mut(&owner) else {
            return false;
        };
        label.position = position;
        self.publish(LabelEvent::Moved { owner });
        true
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    fn publish(&self, event: LabelEvent) {
        publish_event(self.event_bus.as_ref(), event.into());
    }
}

impl Default for ShapeLabeler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeLabeler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeLabeler")
            .field("labels", &self.labels.len())
            .finish()
    }
}
