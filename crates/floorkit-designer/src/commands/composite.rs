use async_trait::async_trait;
use floorkit_core::Result;
use serde::{Deserialize, Serialize};

use super::{Command, CommandOutput, EditorCommand};
use crate::document::EditorDocument;

/// What a composite does when one of its steps fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Stop at the failing step and leave the earlier steps applied.
    #[default]
    BestEffort,
    /// Reverse the steps already applied before reporting the failure.
    AllOrNothing,
}

/// An ordered group of commands that is undone and redone as one step.
///
/// Steps run in order, each awaited before the next starts. Undo runs them
/// in reverse.
#[derive(Debug)]
pub struct CompositeCommand {
    name: String,
    commands: Vec<EditorCommand>,
    policy: FailurePolicy,
}

impl CompositeCommand {
    pub fn new() -> Self {
        Self::named("Composite")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_command(mut self, command: impl Into<EditorCommand>) -> Self {
        self.add_command(command);
        self
    }

    pub fn add_command(&mut self, command: impl Into<EditorCommand>) {
        self.commands.push(command.into());
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn commands(&self) -> &[EditorCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    async fn rollback(&mut self, doc: &mut EditorDocument, applied: usize) {
        for command in self.commands[..applied].iter_mut().rev() {
            if let Err(e) = command.undo(doc).await {
                tracing::error!("Rollback of '{}' failed: {}", command.name(), e);
            }
        }
    }

    async fn replay(&mut self, doc: &mut EditorDocument, from: usize) {
        for command in self.commands[from..].iter_mut() {
            if let Err(e) = command.execute(doc).await {
                tracing::error!("Replay of '{}' failed: {}", command.name(), e);
            }
        }
    }
}

impl Default for CompositeCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for CompositeCommand {
    fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first non-empty output of the steps, which for
    /// "create then decorate" groups is the created shape.
    async fn execute(&mut self, doc: &mut EditorDocument) -> Result<CommandOutput> {
        let mut output = CommandOutput::None;
        for index in 0..self.commands.len() {
            match self.commands[index].execute(doc).await {
                Ok(step) => {
                    if output == CommandOutput::None {
                        output = step;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "'{}' failed at step {} of {}: {}",
                        self.name,
                        index + 1,
                        self.commands.len(),
                        e
                    );
                    if self.policy == FailurePolicy::AllOrNothing {
                        self.rollback(doc, index).await;
                    }
                    return Err(e);
                }
            }
        }
        Ok(output)
    }

    async fn undo(&mut self, doc: &mut EditorDocument) -> Result<()> {
        for index in (0..self.commands.len()).rev() {
            if let Err(e) = self.commands[index].undo(doc).await {
                tracing::warn!("Undo of '{}' failed at step {}: {}", self.name, index + 1, e);
                if self.policy == FailurePolicy::AllOrNothing {
                    self.replay(doc, index + 1).await;
                }
                return Err(e);
            }
        }
        Ok(())
    }
}
