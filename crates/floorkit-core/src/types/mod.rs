//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Arc<RwLock<T>>`, callbacks, etc.
//! - [`ids`]: Stable entity identifiers

pub mod aliases;
pub mod ids;

pub use aliases::*;
pub use ids::ShapeId;
