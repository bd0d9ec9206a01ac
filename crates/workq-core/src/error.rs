/// Errors surfaced by `Queue` and `Registry` transitions.
///
/// Translated once, at the HTTP edge, into a status code and plain-text body
/// (see `workq-server`). The core never swallows an error or retries.
///
/// The two conflict shapes in spec.md §7 (queue-creation collision vs an
/// item operation requiring Pending) get distinct variants rather than one
/// `Conflict` carrying prose the HTTP edge would have to parse back apart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    QueueExists(String),

    #[error("{0}")]
    WrongState(String),

    #[error("{0}")]
    BadInput(String),
}

pub type Result<T> = std::result::Result<T, QueueError>;
