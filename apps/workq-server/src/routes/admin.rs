use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;
use crate::responses::queue_error_response;

/// `GET /` — service banner.
pub async fn root() -> &'static str {
    concat!("workq-server ", env!("CARGO_PKG_VERSION"), "\n")
}

/// `GET /queues` — newline-separated queue ids.
pub async fn list_queues(State(state): State<AppState>) -> impl IntoResponse {
    state.registry().list().join("\n")
}

/// `POST /new/{qid}` — create a queue; 400 if it already exists.
pub async fn new_queue(State(state): State<AppState>, Path(qid): Path<String>) -> Response {
    match state.registry().create(&qid) {
        Ok(()) => "".into_response(),
        Err(e) => {
            tracing::debug!(queue = %qid, error = %e, "new queue rejected");
            queue_error_response(e)
        }
    }
}

/// `POST /delete/{qid}` — delete a queue; 404 if absent.
pub async fn delete_queue(State(state): State<AppState>, Path(qid): Path<String>) -> Response {
    match state.registry().delete(&qid) {
        Ok(()) => "".into_response(),
        Err(e) => {
            tracing::debug!(queue = %qid, error = %e, "delete queue rejected");
            queue_error_response(e)
        }
    }
}
