//! Type aliases for commonly used complex types.
//!
//! Complex types like `Arc<RwLock<HashMap<K, V>>>` are hard to read at a
//! glance. The aliases here give them names that carry intent and keep the
//! same pattern across crates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_core::types::*;
//!
//! // Instead of: Arc<RwLock<HashMap<SubscriptionId, Handler>>>
//! let handlers: ThreadSafeRwMap<SubscriptionId, Handler> = thread_safe_rw(HashMap::new());
//! ```

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::ShapeId;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<RwLock<T>>)
// =============================================================================

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
///
/// Multiple readers can access concurrently, but writes require exclusive
/// access. Uses `parking_lot::RwLock`, which never poisons.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// A thread-safe reader-writer hash map.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A callback that receives a single parameter.
///
/// Thread-safe, suitable for event handlers stored in a registry.
pub type DataCallback<T> = Box<dyn Fn(T) + Send + Sync>;

/// A cloneable callback notified when the text attached to a shape changes.
///
/// Labels and the commands that edit them share the same callback, so it is
/// reference counted rather than boxed.
pub type TextCallback = Arc<dyn Fn(ShapeId, &str) + Send + Sync>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

/// Wrap a closure as a [`TextCallback`].
#[inline]
pub fn text_callback<F>(f: F) -> TextCallback
where
    F: Fn(ShapeId, &str) + Send + Sync + 'static,
{
    Arc::new(f)
}
