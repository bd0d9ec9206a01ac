//! In-memory, multi-queue work engine.
//!
//! Every item moves through a three-state lifecycle — Queued → Pending →
//! Done — with time-based lease expiry that automatically returns abandoned
//! Pending items to Queued. See SPEC_FULL.md for the full contract; this
//! crate is the state engine and lease-expiry scheduler only. The HTTP
//! transport lives in the `workq-server` binary crate.

mod clock;
mod error;
mod expirer;
mod item;
mod queue;
mod registry;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use error::{QueueError, Result};
pub use expirer::Expirer;
pub use item::{Item, ItemState};
pub use queue::{Counts, Queue};
pub use registry::Registry;

/// Lease duration granted on Pending entry and on `extend`, per spec.md §3.
pub const DEFAULT_LEASE_SECS: u64 = 300;
