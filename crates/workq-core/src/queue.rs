use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{QueueError, Result};
use crate::item::{Item, ItemState};

/// A single named queue: the items it owns, the three logical subsets
/// (Queued FIFO / Pending set / Done set), and the lease duration granted
/// on Pending entry.
///
/// All transition operations take `inner` under one lock; the section held
/// is O(1) or O(k-returned) and never awaits or sleeps, per SPEC_FULL.md §3.2.
pub struct Queue {
    clock: Arc<dyn Clock>,
    default_lease_ms: u64,
    inner: Mutex<Inner>,
}

struct Inner {
    items: HashMap<String, Item>,
    queued: VecDeque<String>,
    pending: HashSet<String>,
    done: HashSet<String>,
    next_order: u64,
}

/// Snapshot of the four `/show` counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub done: usize,
    pub pending: usize,
    pub queued: usize,
}

impl Counts {
    pub fn all(&self) -> usize {
        self.done + self.pending + self.queued
    }
}

impl Queue {
    pub fn new(clock: Arc<dyn Clock>, default_lease_ms: u64) -> Self {
        Self {
            clock,
            default_lease_ms,
            inner: Mutex::new(Inner {
                items: HashMap::new(),
                queued: VecDeque::new(),
                pending: HashSet::new(),
                done: HashSet::new(),
                next_order: 0,
            }),
        }
    }

    /// Append a new item; returns its minted id.
    pub fn enqueue(&self, payload: Vec<u8>) -> Result<String> {
        if payload.is_empty() {
            return Err(QueueError::BadInput("empty payload".into()));
        }
        let mut inner = self.inner.lock();
        let order = inner.next_order;
        inner.next_order += 1;
        let id = Uuid::new_v4().simple().to_string();
        let item = Item::new(id.clone(), payload, order);
        inner.queued.push_back(id.clone());
        inner.items.insert(id.clone(), item);
        Ok(id)
    }

    /// Lease the oldest Queued item, or `None` if the queue is empty.
    pub fn next(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        let id = inner.queued.pop_front()?;
        let deadline = self.clock.now_ms() + self.default_lease_ms;
        if let Some(item) = inner.items.get_mut(&id) {
            item.state = ItemState::Pending;
            item.lease_deadline_ms = Some(deadline);
        }
        inner.pending.insert(id.clone());
        Some(id)
    }

    /// Mark a leased item complete.
    pub fn done(&self, item_id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::require_pending(&inner, item_id)?;
        inner.pending.remove(item_id);
        inner.done.insert(item_id.to_string());
        if let Some(item) = inner.items.get_mut(item_id) {
            item.state = ItemState::Done;
            item.lease_deadline_ms = None;
        }
        Ok(())
    }

    /// Refresh the lease on a Pending item.
    pub fn extend(&self, item_id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::require_pending(&inner, item_id)?;
        let deadline = self.clock.now_ms() + self.default_lease_ms;
        if let Some(item) = inner.items.get_mut(item_id) {
            item.lease_deadline_ms = Some(deadline);
        }
        Ok(())
    }

    /// Force-return a Pending item to Queued, preserving its original
    /// `enqueue_order` position (ahead of any later-enqueued item).
    pub fn expire(&self, item_id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::require_pending(&inner, item_id)?;
        inner.pending.remove(item_id);
        Self::requeue_by_order(&mut inner, item_id);
        Ok(())
    }

    /// Remaining lease seconds for a Pending item.
    pub fn ttl_secs(&self, item_id: &str) -> Result<u64> {
        let inner = self.inner.lock();
        Self::require_pending(&inner, item_id)?;
        let deadline = inner
            .items
            .get(item_id)
            .and_then(|i| i.lease_deadline_ms)
            .unwrap_or(0);
        let now = self.clock.now_ms();
        Ok(deadline.saturating_sub(now) / 1000)
    }

    /// The four `/show` counters.
    pub fn counts(&self) -> Counts {
        let inner = self.inner.lock();
        Counts {
            done: inner.done.len(),
            pending: inner.pending.len(),
            queued: inner.queued.len(),
        }
    }

    /// Ids of every Pending item, in unspecified order.
    pub fn pending_ids(&self) -> Vec<String> {
        let inner = self.inner.lock();
        inner.pending.iter().cloned().collect()
    }

    /// Sweep every Pending item whose lease has expired back into Queued.
    /// Returns the number of items moved. Called by the background expirer;
    /// never sleeps or blocks beyond the lock itself.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock();
        let expired: Vec<String> = inner
            .pending
            .iter()
            .filter(|id| {
                inner
                    .items
                    .get(*id)
                    .and_then(|i| i.lease_deadline_ms)
                    .map(|d| d <= now)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        for id in &expired {
            inner.pending.remove(id);
            Self::requeue_by_order(&mut inner, id);
        }
        expired.len()
    }

    fn require_pending(inner: &Inner, item_id: &str) -> Result<()> {
        match inner.items.get(item_id) {
            None => Err(QueueError::NotFound(format!("unknown item {item_id}"))),
            Some(item) if item.state != ItemState::Pending => Err(QueueError::WrongState(
                format!("item {item_id} is not Pending"),
            )),
            Some(_) => Ok(()),
        }
    }

    /// Re-insert `item_id` into `queued` ahead of the first entry with a
    /// strictly larger `enqueue_order`, preserving FIFO by original order.
    fn requeue_by_order(inner: &mut Inner, item_id: &str) {
        let order = match inner.items.get(item_id) {
            Some(item) => item.enqueue_order,
            None => return,
        };
        let pos = inner
            .queued
            .iter()
            .position(|qid| {
                inner
                    .items
                    .get(qid)
                    .map(|i| i.enqueue_order > order)
                    .unwrap_or(false)
            })
            .unwrap_or(inner.queued.len());
        inner.queued.insert(pos, item_id.to_string());
        if let Some(item) = inner.items.get_mut(item_id) {
            item.state = ItemState::Queued;
            item.lease_deadline_ms = None;
        }
    }
}
