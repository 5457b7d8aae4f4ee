//! Single-flight guard for sync runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that allows at most one sync run at a time.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct SyncGate {
    running: Arc<AtomicBool>,
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` while another permit is alive.
    pub fn try_begin(&self) -> Option<SyncPermit> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncPermit {
                running: Arc::clone(&self.running),
            })
    }

    /// Check if a run currently holds the gate.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Proof of an exclusive run. Releases the gate on drop.
#[derive(Debug)]
pub struct SyncPermit {
    running: Arc<AtomicBool>,
}

impl Drop for SyncPermit {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
