use async_trait::async_trait;
use floorkit_core::{Result, ShapeId, TextCallback};
use std::fmt;

use super::{Command, CommandOutput};
use crate::document::EditorDocument;
use crate::labeler::{Label, LabelSnapshot};
use crate::model::Point;

/// Attaches a label to an existing shape.
///
/// A label the shape already had is replaced, and comes back on undo.
#[derive(Clone)]
pub struct AddLabelCommand {
    shape_id: ShapeId,
    text: String,
    color: Option<String>,
    on_update: Option<TextCallback>,
    replaced: Option<LabelSnapshot>,
}

impl AddLabelCommand {
    pub fn new(shape_id: ShapeId, text: impl Into<String>) -> Self {
        Self {
            shape_id,
            text: text.into(),
            color: None,
            on_update: None,
            replaced: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_callback(mut self, on_update: TextCallback) -> Self {
        self.on_update = Some(on_update);
        self
    }
}

impl fmt::Debug for AddLabelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddLabelCommand")
            .field("shape_id", &self.shape_id)
            .field("text", &self.text)
            .field("color", &self.color)
            .field("replaced", &self.replaced)
            .finish()
    }
}

#[async_trait]
impl Command for AddLabelCommand {
    fn name(&self) -> &str {
        "Add Label"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let Some(shape) = doc.shapes.shape(self.shape_id) else {
            tracing::warn!("Cannot label shape {}: not found", self.shape_id);
            return Ok(CommandOutput::None);
        };
        self.replaced = doc.labels.label(self.shape_id).map(Label::snapshot);
        doc.labels.add_label(
            shape,
            self.text.as_str(),
            self.color.as_deref(),
            self.on_update.clone(),
        );
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        match self.replaced.take() {
            Some(previous) => {
                doc.labels.add_label_from_snapshot(self.shape_id, previous);
            }
            None => {
                if doc.labels.remove_label(self.shape_id).is_none() {
                    tracing::warn!("Cannot remove label of shape {}: not found", self.shape_id);
                }
            }
        }
        Ok(())
    }
}

/// Replaces a label's text and notifies the update callback.
///
/// The callback given to the command wins; otherwise the label's own
/// `on_update` is used.
#[derive(Clone)]
pub struct EditLabelCommand {
    shape_id: ShapeId,
    old_text: String,
    new_text: String,
    callback: Option<TextCallback>,
}

impl EditLabelCommand {
    pub fn new(shape_id: ShapeId, old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            shape_id,
            old_text: old_text.into(),
            new_text: new_text.into(),
            callback: None,
        }
    }

    pub fn with_callback(mut self, callback: TextCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    fn apply(&self, doc: &mut EditorDocument, text: &str) {
        if doc.labels.set_text(self.shape_id, text).is_none() {
            tracing::warn!("Cannot edit label of shape {}: not found", self.shape_id);
            return;
        }
        let callback = self.callback.clone().or_else(|| {
            doc.labels
                .label(self.shape_id)
                .and_then(|label| label.on_update.clone())
        });
        if let Some(callback) = callback {
            callback(self.shape_id, text);
        }
    }
}

impl fmt::Debug for EditLabelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditLabelCommand")
            .field("shape_id", &self.shape_id)
            .field("old_text", &self.old_text)
            .field("new_text", &self.new_text)
            .finish()
    }
}

#[async_trait]
impl Command for EditLabelCommand {
    fn name(&self) -> &str {
        "Edit Label"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, &self.new_text);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, &self.old_text);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MoveLabelCommand {
    shape_id: ShapeId,
    old_position: Point,
    new_position: Point,
}

impl MoveLabelCommand {
    pub fn new(shape_id: ShapeId, old_position: Point, new_position: Point) -> Self {
        Self {
            shape_id,
            old_position,
            new_position,
        }
    }

    fn apply(&self, doc: &mut EditorDocument, position: Point) {
        if !doc.labels.set_position(self.shape_id, position) {
            tracing::warn!("Cannot move label of shape {}: not found", self.shape_id);
        }
    }
}

#[async_trait]
impl Command for MoveLabelCommand {
    fn name(&self) -> &str {
        "Move Label"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        self.apply(doc, self.new_position);
        Ok(CommandOutput::None)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        self.apply(doc, self.old_position);
        Ok(())
    }
}

/// Detaches a label, keeping a snapshot to rebuild it.
#[derive(Debug, Clone)]
pub struct RemoveLabelCommand {
    shape_id: ShapeId,
    snapshot: Option<LabelSnapshot>,
}

impl RemoveLabelCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            snapshot: None,
        }
    }
}

#[async_trait]
impl Command for RemoveLabelCommand {
    fn name(&self) -> &str {
        "Remove Label"
    }

    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        match doc.labels.remove_label(self.shape_id) {
            Some(label) => {
                self.snapshot = Some(label.snapshot());
                Ok(CommandOutput::Removed(true))
            }
            None => {
                tracing::warn!("Cannot remove label of shape {}: not found", self.shape_id);
                Ok(CommandOutput::Removed(false))
            }
        }
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => {
                doc.labels.add_label_from_snapshot(self.shape_id, snapshot);
            }
            None => tracing::warn!("Cannot restore label of shape {}: no snapshot", self.shape_id),
        }
        Ok(())
    }
}
