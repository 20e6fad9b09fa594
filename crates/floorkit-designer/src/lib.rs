//! # FloorKit Designer
//!
//! This crate provides the editing engine of the floor-plan designer: the
//! shape and label registries, the corner graph that describes floor
//! topology, and the undoable commands that mutate them.
//!
//! ## Core Components
//!
//! ### Document
//! - **Shapes**: Rectangles, ellipses, polygons, arcs and lines built by
//!   per-kind factories, with snapshots for exact restore
//! - **Labels**: At most one text label per shape
//! - **Corner graph**: Corners joined by walls, keyed by shape id
//!
//! ### Commands
//! - **Shape commands**: Add, remove, move, resize, rotate
//! - **Label commands**: Add, edit, move, remove
//! - **Floor commands**: Corner create/remove, wall create/remove/move
//! - **Composite**: Ordered groups that undo as one step
//! - **Registry**: Construction by kind name from JSON parameters
//!
//! ### Session
//! - **History**: Undo/redo stacks with a bounded depth
//! - **Builders**: Commands for whole user gestures
//! - **Serialization**: Plan and floor documents
//!
//! ## Architecture
//!
//! ```text
//! EditorState (Session)
//!   ├── EditorDocument
//!   │     ├── ShapeManager (Shapes + factories)
//!   │     ├── ShapeLabeler (Labels)
//!   │     └── CornerGraph (Floor topology)
//!   ├── UndoRedoManager (History)
//!   │     └── EditorCommand (Concrete + composite commands)
//!   └── EventBus (Change notifications)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_designer::{builders, EditorState, Point};
//!
//! let mut state = EditorState::default();
//! let corner = state
//!     .execute(builders::create_corner(Some(Point::new(0.0, 0.0)), &state.config.floor))
//!     .await?;
//!
//! state.undo().await?;
//! state.redo().await?;
//! ```

pub mod builders;
pub mod commands;
pub mod corner_graph;
pub mod document;
pub mod editor_state;
pub mod history;
pub mod labeler;
pub mod model;
pub mod serialization;
pub mod shape_manager;

pub use commands::{
    AddLabelCommand, AddShapeCommand, Command, CommandOutput, CommandRegistry, CompositeCommand,
    CornerCreateCommand, CornerRemoveCommand, EditLabelCommand, EditorCommand, FailurePolicy,
    MoveLabelCommand, MoveShapeCommand, RemoveLabelCommand, RemoveShapeCommand,
    ResizeShapeCommand, RotateShapeCommand, WallCreateCommand, WallMoveCommand, WallRemoveCommand,
};
pub use corner_graph::{CornerGraph, NodeIndex};
pub use document::EditorDocument;
pub use editor_state::EditorState;
pub use history::{StackSizes, UndoRedoManager};
pub use labeler::{Label, LabelSnapshot, LabelStyle, ShapeLabeler, TextEdit};
pub use model::{
    AdditionalData, Dimensions, Geometry, Point, Segment, Shape, ShapeBody, ShapeFactory,
    ShapeKind, ShapeSnapshot, ShapeTypeMetadata, Style, Transform,
};
pub use serialization::{
    FloorCorner, FloorDocument, FloorImport, FloorWall, PlanDocument, PlanEntry,
};
pub use shape_manager::ShapeManager;
