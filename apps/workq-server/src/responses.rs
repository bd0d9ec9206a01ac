use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use workq_core::QueueError;

/// Translate a core error into a status code + plain-text body, once, at
/// the HTTP edge (spec.md §7). Queue creation conflicts are 400 per
/// spec.md §6; item-state conflicts are 409 per the "recommended" branch
/// of spec.md §7's open question. The two conflict shapes are distinct
/// `QueueError` variants, so the mapping reads off the type, not the
/// message text.
pub fn queue_error_response(err: QueueError) -> Response {
    let (status, body) = match err {
        QueueError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
        QueueError::QueueExists(detail) => (StatusCode::BAD_REQUEST, detail),
        QueueError::WrongState(detail) => (StatusCode::CONFLICT, detail),
        QueueError::BadInput(detail) => (StatusCode::BAD_REQUEST, detail),
    };
    (status, body).into_response()
}
