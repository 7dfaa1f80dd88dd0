//! In-memory snapshot store backed by the engine's derivations.
//!
//! This module provides a fast, **ephemeral** store where the edge snapshot
//! is held in RAM. It supports optional JSONL persistence via
//! [`load_from_jsonl`] and [`save_to_jsonl`]: load once at startup, mutate
//! in memory, save on exit.
//!
//! # Architecture
//!
//! The implementation uses:
//! - `Vec<Edge>` as the insertion-ordered source of truth (duplicates and
//!   self-references preserved)
//! - the engine's [`AdjacencyList`](linkage_engine::AdjacencyList) rebuilt
//!   once per mutation, shared by every query
//! - cached critical path and dependency counts refreshed alongside it
//! - a petgraph `DiGraph` mirror used only for cycle diagnostics
//! - hash-based edge id generation with adaptive length
//!
//! # Thread Safety
//!
//! The store is wrapped in `Arc<Mutex<InMemoryStoreInner>>` to provide
//! thread-safe access in async contexts. All operations acquire the mutex,
//! ensuring safe access from multiple tasks.

mod cycle;
mod inner;
mod jsonl;
mod trait_impl;

use crate::store::DiagramStore;
use inner::InMemoryStoreInner;
use std::sync::Arc;
use tokio::sync::Mutex;

// Re-export public API
pub use jsonl::{load_from_jsonl, save_to_jsonl, LoadWarning};

/// Thread-safe in-memory store.
///
/// This type alias wraps the inner store in `Arc<Mutex<>>` for async
/// access. It implements [`DiagramStore`] via the trait implementation in
/// `trait_impl.rs`.
pub(crate) type InMemoryStore = Arc<Mutex<InMemoryStoreInner>>;

/// Create a new, empty in-memory store.
///
/// # Arguments
///
/// * `prefix` - The prefix for generated edge ids (e.g., "wire")
///
/// # Example
///
/// ```
/// use linkage::store::in_memory::new_in_memory_store;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let store = new_in_memory_store("wire".to_string());
///     // Use store...
/// }
/// ```
pub fn new_in_memory_store(prefix: String) -> Box<dyn DiagramStore> {
    Box::new(Arc::new(Mutex::new(InMemoryStoreInner::new(prefix))))
}
