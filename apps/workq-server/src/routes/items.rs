use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Response};

use super::ItemForm;
use crate::app_state::AppState;
use crate::responses::queue_error_response;

/// `GET /show/{qid}` — the four counters, as
/// `Done: D. Pending: P. Queued: Q. All: A.` (spec.md §4.1).
pub async fn show(State(state): State<AppState>, Path(qid): Path<String>) -> Response {
    match state.registry().lookup(&qid) {
        Ok(queue) => {
            let c = queue.counts();
            format!(
                "Done: {}. Pending: {}. Queued: {}. All: {}.",
                c.done,
                c.pending,
                c.queued,
                c.all()
            )
            .into_response()
        }
        Err(e) => queue_error_response(e),
    }
}

/// `GET /show/{qid}/pending` — one pending item id per line.
pub async fn show_pending(State(state): State<AppState>, Path(qid): Path<String>) -> Response {
    match state.registry().lookup(&qid) {
        Ok(queue) => queue.pending_ids().join("\n").into_response(),
        Err(e) => queue_error_response(e),
    }
}

/// `POST /enqueue/{qid}` with form field `item=<bytes>`.
pub async fn enqueue(
    State(state): State<AppState>,
    Path(qid): Path<String>,
    Form(form): Form<ItemForm>,
) -> Response {
    let queue = match state.registry().lookup(&qid) {
        Ok(q) => q,
        Err(e) => return queue_error_response(e),
    };
    match queue.enqueue(form.item.into_bytes()) {
        Ok(id) => id.into_response(),
        Err(e) => queue_error_response(e),
    }
}

/// `POST /next/{qid}` — lease the oldest Queued item, or empty if none.
pub async fn next(State(state): State<AppState>, Path(qid): Path<String>) -> Response {
    match state.registry().lookup(&qid) {
        Ok(queue) => queue.next().unwrap_or_default().into_response(),
        Err(e) => queue_error_response(e),
    }
}

/// `POST /done/{qid}` with form field `item=<id>`.
pub async fn done(
    State(state): State<AppState>,
    Path(qid): Path<String>,
    Form(form): Form<ItemForm>,
) -> Response {
    per_item_op(&state, &qid, &form.item, |queue, id| queue.done(id))
}

/// `POST /expire/{qid}` with form field `item=<id>`.
pub async fn expire(
    State(state): State<AppState>,
    Path(qid): Path<String>,
    Form(form): Form<ItemForm>,
) -> Response {
    per_item_op(&state, &qid, &form.item, |queue, id| queue.expire(id))
}

/// `POST /extend/{qid}` with form field `item=<id>`.
pub async fn extend(
    State(state): State<AppState>,
    Path(qid): Path<String>,
    Form(form): Form<ItemForm>,
) -> Response {
    per_item_op(&state, &qid, &form.item, |queue, id| queue.extend(id))
}

/// `POST /ttl/{qid}` with form field `item=<id>`; decimal seconds remaining.
pub async fn ttl(
    State(state): State<AppState>,
    Path(qid): Path<String>,
    Form(form): Form<ItemForm>,
) -> Response {
    let queue = match state.registry().lookup(&qid) {
        Ok(q) => q,
        Err(e) => return queue_error_response(e),
    };
    match queue.ttl_secs(&form.item) {
        Ok(secs) => secs.to_string().into_response(),
        Err(e) => queue_error_response(e),
    }
}

fn per_item_op(
    state: &AppState,
    qid: &str,
    item_id: &str,
    op: impl FnOnce(&workq_core::Queue, &str) -> workq_core::Result<()>,
) -> Response {
    let queue = match state.registry().lookup(qid) {
        Ok(q) => q,
        Err(e) => return queue_error_response(e),
    };
    match op(&queue, item_id) {
        Ok(()) => "".into_response(),
        Err(e) => queue_error_response(e),
    }
}
