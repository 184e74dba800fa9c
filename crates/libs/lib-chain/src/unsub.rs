//! # Detach Handle
//!
//! One-shot handle that stops a live status subscription. Detaching only
//! stops local updates; a broadcast transaction cannot be aborted, so the
//! chain-side outcome is unaffected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Clonable, idempotent unsubscribe handle.
///
/// The first [`call`](Unsubscribe::call) wins; every later call (from any
/// clone) is a no-op. Both the caller-facing handle and the internal
/// teardown-on-terminal path fire the same handle, so double-teardown cannot
/// happen.
#[derive(Clone, Debug)]
pub struct Unsubscribe {
    fired: Arc<AtomicBool>,
    tx: Arc<watch::Sender<bool>>,
}

impl Unsubscribe {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            tx: Arc::new(tx),
        }
    }

    /// Fire the handle. Returns `true` only for the call that actually
    /// detached; repeated calls return `false` and do nothing.
    pub fn call(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        let _ = self.tx.send(true);
        true
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Receiver that resolves once the handle fires. Used by subscription
    /// tasks to tear down their remote watch.
    pub fn signal(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for Unsubscribe {
    fn default() -> Self {
        Self::new()
    }
}
