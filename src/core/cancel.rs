use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Anything the matcher can poll for cancellation between provider evaluations
pub trait Cancellable: Sync {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;
}

/// Cooperative cancellation handle for a match call
///
/// Clones share one flag. The matcher checks it between provider
/// evaluations, so cancellation is coarse-grained.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}
