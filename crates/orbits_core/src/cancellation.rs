//! Shared shutdown flag for the frame loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable flag that, once signalled, stays signalled
///
/// Every clone observes the same flag, so any owner can end the frame loop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown
    pub fn signal(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_signalled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
