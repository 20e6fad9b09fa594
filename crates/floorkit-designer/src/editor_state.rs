//! Editing session state.

use floorkit_core::{shared_event_bus, EventBus, Result};
use floorkit_settings::EditorConfig;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::commands::{CommandOutput, CommandRegistry, EditorCommand};
use crate::document::EditorDocument;
use crate::history::UndoRedoManager;
use crate::serialization::{FloorDocument, FloorImport, PlanDocument};

/// One editing session: the document, its history and the bus both publish
/// on.
pub struct EditorState {
    pub document: EditorDocument,
    pub history: UndoRedoManager,
    pub registry: CommandRegistry,
    pub config: EditorConfig,
    pub is_modified: bool,
    event_bus: Arc<EventBus>,
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let event_bus = shared_event_bus(config.events.bus_config());
        let document = EditorDocument::with_config(&config).with_event_bus(Arc::clone(&event_bus));
        let history =
            UndoRedoManager::from_settings(&config.history).with_event_bus(Arc::clone(&event_bus));
        let registry = CommandRegistry::with_floor_settings(config.floor.clone());
        Self {
            document,
            history,
            registry,
            config,
            is_modified: false,
            event_bus,
        }
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Execute a command and put it on the undo stack.
    pub async fn execute(&mut self, command: impl Into<EditorCommand>) -> Result<CommandOutput> {
        let output = self
            .history
            .execute_command(command, &mut self.document)
            .await?;
        self.is_modified = true;
        Ok(output)
    }

    /// Build a command by kind name, execute it and record it.
    pub async fn execute_named(&mut self, kind: &str, params: &Value) -> Result<CommandOutput> {
        let command = self.registry.create(kind, params)?;
        self.execute(command).await
    }

    /// Record a command whose effect is already in the document, such as the
    /// result of a drag.
    pub fn record(&mut self, command: impl Into<EditorCommand>) {
        self.history.push_command(command);
        self.is_modified = true;
    }

    pub async fn undo(&mut self) -> Result<bool> {
        let undone = self.history.undo(&mut self.document).await?;
        self.is_modified |= undone;
        Ok(undone)
    }

    pub async fn redo(&mut self) -> Result<bool> {
        let redone = self.history.redo(&mut self.document).await?;
        self.is_modified |= redone;
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Empty the document and forget its history.
    pub fn clear(&mut self) {
        self.document.clear();
        self.history.clear();
        self.is_modified = false;
    }

    pub fn export_plan(&self) -> PlanDocument {
        PlanDocument::from_document(&self.document)
    }

    /// Replace the document with a plan. History starts over.
    pub fn import_plan(&mut self, plan: &PlanDocument) -> Result<()> {
        self.clear();
        plan.restore(&mut self.document, true)?;
        Ok(())
    }

    pub fn export_floor(&self, name: &str) -> Result<FloorDocument> {
        Ok(FloorDocument::from_document(&self.document, name)?)
    }

    /// Replace the document with a floor. History starts over.
    pub async fn import_floor(&mut self, floor: &FloorDocument) -> Result<FloorImport> {
        self.clear();
        floor
            .import_into(&mut self.document, &self.config.floor)
            .await
    }

    pub fn save_plan(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.export_plan().save_to_file(path)?;
        self.is_modified = false;
        Ok(())
    }

    pub fn load_plan(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let plan = PlanDocument::load_from_file(path)?;
        self.import_plan(&plan)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("is_modified", &self.is_modified)
            .finish()
    }
}
