/// Logical state of an [`Item`] within its owning [`crate::Queue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Queued,
    Pending,
    Done,
}

/// A single unit of work.
///
/// `id` is a server-minted opaque token, distinct from `payload`, so two
/// items enqueued with identical payloads still have distinct handles (see
/// SPEC_FULL.md §1). `enqueue_order` is assigned once at initial enqueue and
/// never reassigned, including across re-queueing on expiry, so FIFO order
/// survives lease timeouts.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub payload: Vec<u8>,
    pub state: ItemState,
    pub lease_deadline_ms: Option<u64>,
    pub enqueue_order: u64,
}

impl Item {
    pub(crate) fn new(id: String, payload: Vec<u8>, enqueue_order: u64) -> Self {
        Self {
            id,
            payload,
            state: ItemState::Queued,
            lease_deadline_ms: None,
            enqueue_order,
        }
    }
}
