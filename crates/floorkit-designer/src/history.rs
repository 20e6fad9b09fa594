//! Undo/Redo manager for editor commands

use floorkit_core::{EventBus, HistoryEvent, Result};
use floorkit_settings::HistorySettings;
use std::sync::Arc;

use crate::commands::{Command, CommandOutput, EditorCommand};
use crate::document::{publish_event, EditorDocument};

/// Number of entries on each stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackSizes {
    /// Commands that can be undone
    pub undo: usize,
    /// Commands that can be redone
    pub redo: usize,
}

/// Manages the undo and redo stacks of an editing session
pub struct UndoRedoManager {
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
    max_stack_size: usize,
    event_bus: Option<Arc<EventBus>>,
}

impl UndoRedoManager {
    /// Create a manager with the default depth (50)
    pub fn new() -> Self {
        Self::from_settings(&HistorySettings::default())
    }

    /// Create with a custom maximum undo depth
    pub fn with_max_stack_size(max_stack_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_stack_size: max_stack_size.max(1),
            event_bus: None,
        }
    }

    /// Create from history settings
    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self::with_max_stack_size(settings.max_stack_size)
    }

    /// Publish history events on `bus`
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Record an already executed command
    pub fn push_command(&mut self, command: impl Into<EditorCommand>) {
        let command = command.into();
        tracing::debug!("Pushed '{}'", command.name());

        // A new action invalidates everything that was undone
        self.redo_stack.clear();

        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_stack_size {
            let excess = self.undo_stack.len() - self.max_stack_size;
            self.undo_stack.drain(..excess);
        }

        self.publish(HistoryEvent::CommandPushed);
    }

    /// Execute a command and record it. A command that fails is not recorded.
    pub async fn execute_command(
        &mut self,
        command: impl Into<EditorCommand>,
        doc: &mut EditorDocument,
    ) -> Result<CommandOutput> {
        let mut command = command.into();
        let output = command.execute(doc).await?;
        self.push_command(command);
        Ok(output)
    }

    /// Undo the most recent command.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. If the command
    /// fails it stays on the undo stack.
    pub async fn undo(&mut self, doc: &mut EditorDocument) -> Result<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            tracing::debug!("Nothing to undo");
            return Ok(false);
        };
        if let Err(e) = command.undo(doc).await {
            self.undo_stack.push(command);
            return Err(e);
        }
        tracing::debug!("Undid '{}'", command.name());
        self.redo_stack.push(command);
        self.publish(HistoryEvent::UndoPerformed);
        Ok(true)
    }

    /// Redo the most recently undone command.
    ///
    /// Returns `Ok(false)` when there is nothing to redo. If the command
    /// fails it stays on the redo stack.
    pub async fn redo(&mut self, doc: &mut EditorDocument) -> Result<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            tracing::debug!("Nothing to redo");
            return Ok(false);
        };
        if let Err(e) = command.execute(doc).await {
            self.redo_stack.push(command);
            return Err(e);
        }
        tracing::debug!("Redid '{}'", command.name());
        self.undo_stack.push(command);
        self.publish(HistoryEvent::RedoPerformed);
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn stack_sizes(&self) -> StackSizes {
        StackSizes {
            undo: self.undo_stack.len(),
            redo: self.redo_stack.len(),
        }
    }

    /// Name of the command `undo` would reverse
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|command| command.name())
    }

    /// Name of the command `redo` would replay
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|command| command.name())
    }

    pub fn max_stack_size(&self) -> usize {
        self.max_stack_size
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn publish(&self, event: HistoryEvent) {
        publish_event(self.event_bus.as_ref(), event.into());
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UndoRedoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoRedoManager")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_stack_size", &self.max_stack_size)
            .finish()
    }
}
