//! # FloorKit
//!
//! A command-driven editing engine for 2D floor plans and shape layouts.
//!
//! ## Architecture
//!
//! FloorKit is organized as a workspace with multiple crates:
//!
//! 1. **floorkit-core** - Shape ids, errors, the editor event bus
//! 2. **floorkit-settings** - Editor configuration and persistence
//! 3. **floorkit-designer** - Shapes, labels, corner graph, commands, undo/redo
//! 4. **floorkit** - This crate: re-exports, logging setup and a headless binary
//!
//! ## Features
//!
//! - **Undoable Commands**: Every edit is a command with an exact inverse
//! - **Composite Commands**: Multi-step gestures undo as one unit
//! - **Floor Topology**: Corners joined by walls, kept in step with the shapes
//! - **Plan Files**: Shape and label snapshots that restore with their ids

pub use floorkit_designer as designer;

pub use floorkit_core::{
    CommandError, EditorEvent, Error, EventBus, EventFilter, HistoryEvent, LabelEvent,
    RegistryError, Result, ShapeEvent, ShapeId, SnapshotError,
};

pub use floorkit_designer::{
    builders, Command, CommandOutput, CommandRegistry, CompositeCommand, EditorCommand,
    EditorDocument, EditorState, FailurePolicy, FloorDocument, PlanDocument, Point, Shape,
    ShapeKind, UndoRedoManager,
};

pub use floorkit_settings::{EditorConfig, FloorSettings, HistorySettings, LabelSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// One-line description of a document's contents.
pub fn summarize(doc: &EditorDocument) -> String {
    let walls = doc.corners.edges().count() / 2;
    format!(
        "{} shapes, {} labels, {} corners, {} walls",
        doc.shapes.len(),
        doc.labels.len(),
        doc.corners.len(),
        walls
    )
}
