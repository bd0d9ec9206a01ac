use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::registry::Registry;

/// Background activity that returns Pending items with expired leases to
/// Queued. Polls on an interval rather than a deadline-keyed heap — simpler,
/// and the granularity guarantee in spec.md §4.3 only asks for "well under
/// `default_lease`", which a sub-second poll satisfies comfortably.
///
/// Takes the per-queue lock for one sweep batch at a time and releases it
/// before moving to the next queue, so one busy queue never blocks the
/// sweep of another (spec.md §4.3).
pub struct Expirer {
    shutdown: Arc<Notify>,
}

impl Expirer {
    /// Spawn the sweeper loop on the current tokio runtime. Returns a handle
    /// whose `Drop` signals the loop to stop.
    pub fn spawn(registry: Arc<Registry>, interval: Duration) -> Self {
        let shutdown = Arc::new(Notify::new());
        let shutdown_rx = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = shutdown_rx.notified() => break,
                }
                for (qid, queue) in registry.snapshot() {
                    let moved = queue.sweep_expired();
                    if moved > 0 {
                        tracing::debug!(queue = %qid, moved, "lease expiry requeued items");
                    }
                }
            }
        });
        Self { shutdown }
    }
}

impl Drop for Expirer {
    fn drop(&mut self) {
        self.shutdown.notify_waiters();
    }
}
