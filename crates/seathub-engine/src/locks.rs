//! Per-tool serialization locks.
//!
//! The read-check-increment sequence in borrow admission is the system's
//! one true critical section: two concurrent borrows against the same
//! tool must never both observe capacity before either increments. Every
//! seat-count mutation — borrow, return, and governance edits that shrink
//! limits — goes through the same per-tool mutex.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// Registry of per-tool async mutexes, keyed by tool name.
///
/// Locks are created lazily on first use and kept for the lifetime of the
/// process; the tool catalog is small and bounded.
#[derive(Debug, Default)]
pub struct ToolLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ToolLocks {
    /// Create an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the mutex for a tool.
    ///
    /// The caller holds the returned `Arc` and awaits the lock itself:
    ///
    /// ```ignore
    /// let lock = locks.for_tool("cad_tool");
    /// let _guard = lock.lock().await;
    /// ```
    pub fn for_tool(&self, tool: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(tool.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
