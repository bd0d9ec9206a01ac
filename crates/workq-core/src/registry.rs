use std::sync::Arc;

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};
use crate::error::{QueueError, Result};
use crate::queue::Queue;

/// Process-wide mapping from queue id to [`Queue`]. Sole creator and
/// destroyer of queues.
///
/// `DashMap` gives the registry its own independent locking (sharded
/// internally), so a holder of a per-queue lock never needs the registry's
/// lock and vice versa — the ordering rule in spec.md §4.2 falls out for
/// free rather than needing to be hand-enforced.
pub struct Registry {
    clock: Arc<dyn Clock>,
    default_lease_ms: u64,
    queues: DashMap<String, Arc<Queue>>,
}

impl Registry {
    pub fn new(default_lease_ms: u64) -> Self {
        Self::with_clock(Arc::new(SystemClock), default_lease_ms)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, default_lease_ms: u64) -> Self {
        Self {
            clock,
            default_lease_ms,
            queues: DashMap::new(),
        }
    }

    /// Create a fresh, empty queue. Fails if `qid` already exists.
    pub fn create(&self, qid: &str) -> Result<()> {
        Self::validate_qid(qid)?;
        if self.queues.contains_key(qid) {
            return Err(QueueError::QueueExists(format!("queue {qid} already exists")));
        }
        self.queues.insert(
            qid.to_string(),
            Arc::new(Queue::new(self.clock.clone(), self.default_lease_ms)),
        );
        Ok(())
    }

    /// Remove a queue and every item it owns. Fails if `qid` is absent.
    pub fn delete(&self, qid: &str) -> Result<()> {
        self.queues
            .remove(qid)
            .map(|_| ())
            .ok_or_else(|| QueueError::NotFound(format!("queue {qid} not found")))
    }

    /// Snapshot of the current queue ids.
    pub fn list(&self) -> Vec<String> {
        self.queues.iter().map(|e| e.key().clone()).collect()
    }

    /// Resolve a queue by id for per-queue operations.
    pub fn lookup(&self, qid: &str) -> Result<Arc<Queue>> {
        Self::validate_qid(qid)?;
        self.queues
            .get(qid)
            .map(|e| e.value().clone())
            .ok_or_else(|| QueueError::NotFound(format!("queue {qid} not found")))
    }

    /// Queue ids are URL path segments (spec.md §6); a decoded id carrying a
    /// `/` would otherwise address a different, unintended path shape, so
    /// it's rejected outright rather than silently matched or truncated.
    fn validate_qid(qid: &str) -> Result<()> {
        if qid.is_empty() {
            return Err(QueueError::BadInput("queue id must not be empty".into()));
        }
        if qid.contains('/') {
            return Err(QueueError::BadInput(format!(
                "queue id {qid} must not contain '/'"
            )));
        }
        Ok(())
    }

    /// Weak snapshot of every live queue, used by the expirer so a
    /// concurrent deletion never crashes a scan in flight.
    pub(crate) fn snapshot(&self) -> Vec<(String, Arc<Queue>)> {
        self.queues
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_create_is_conflict() {
        let reg = Registry::new(300_000);
        reg.create("q").unwrap();
        assert!(matches!(reg.create("q"), Err(QueueError::QueueExists(_))));
    }

    #[test]
    fn missing_delete_is_not_found() {
        let reg = Registry::new(300_000);
        assert!(matches!(reg.delete("q"), Err(QueueError::NotFound(_))));
        reg.create("q").unwrap();
        reg.delete("q").unwrap();
        assert!(matches!(reg.delete("q"), Err(QueueError::NotFound(_))));
    }

    #[test]
    fn list_reflects_create_and_delete() {
        let reg = Registry::new(300_000);
        reg.create("a").unwrap();
        reg.create("b").unwrap();
        let mut ids = reg.list();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
        reg.delete("a").unwrap();
        assert_eq!(reg.list(), vec!["b".to_string()]);
    }

    #[test]
    fn lookup_unknown_queue_is_not_found() {
        let reg = Registry::new(300_000);
        assert!(matches!(reg.lookup("ghost"), Err(QueueError::NotFound(_))));
    }

    #[test]
    fn qid_with_slash_is_bad_input_not_not_found() {
        let reg = Registry::new(300_000);
        assert!(matches!(reg.create("a/b"), Err(QueueError::BadInput(_))));
        assert!(matches!(reg.lookup("a/b"), Err(QueueError::BadInput(_))));
    }
}
