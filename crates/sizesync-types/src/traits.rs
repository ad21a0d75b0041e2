//! Core traits for SizeSync operations
//!
//! This module defines the hooks the engine calls while it walks a tree and
//! the cancellation primitive checked between files.

use crate::FileClassification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Trait for observing a synchronization run as it progresses
///
/// All methods default to doing nothing so implementors only pick what they need.
pub trait SyncObserver {
    /// A file is about to be classified
    fn file_started(&self, _relative_path: &str) {}

    /// A file was classified and, where needed, copied
    fn file_finished(&self, _relative_path: &str, _classification: FileClassification) {}

    /// A file failed and was recorded as an error
    fn file_failed(&self, _relative_path: &str, _message: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// Trait for operation cancellation
pub trait Cancellable {
    /// Cancel the operation
    fn cancel(&self);

    /// Check if the operation is cancelled
    fn is_cancelled(&self) -> bool;
}

/// Shared cancellation flag
///
/// Clones share the same flag, so one handle can be given to the engine and
/// another kept by whoever decides to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
