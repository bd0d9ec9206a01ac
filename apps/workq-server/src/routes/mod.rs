mod admin;
mod items;

pub use admin::{delete_queue, list_queues, new_queue, root};
pub use items::{done, enqueue, expire, extend, next, show, show_pending, ttl};

use serde::Deserialize;

/// Form body carrying the `item` handle/payload used by every per-item
/// route, matching the reference client's `data={"item": ...}` (spec.md §6).
#[derive(Deserialize)]
pub(crate) struct ItemForm {
    pub item: String,
}
