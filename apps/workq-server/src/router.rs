use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::routes;

// Route path constants, single source to reduce drift (mirrors arw-server's
// `paths` module).
mod paths {
    pub const ROOT: &str = "/";
    pub const QUEUES: &str = "/queues";
    pub const NEW: &str = "/new/{qid}";
    pub const DELETE: &str = "/delete/{qid}";
    pub const SHOW: &str = "/show/{qid}";
    pub const SHOW_PENDING: &str = "/show/{qid}/pending";
    pub const ENQUEUE: &str = "/enqueue/{qid}";
    pub const NEXT: &str = "/next/{qid}";
    pub const DONE: &str = "/done/{qid}";
    pub const EXPIRE: &str = "/expire/{qid}";
    pub const EXTEND: &str = "/extend/{qid}";
    pub const TTL: &str = "/ttl/{qid}";
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(paths::ROOT, get(routes::root))
        .route(paths::QUEUES, get(routes::list_queues))
        .route(paths::NEW, post(routes::new_queue))
        .route(paths::DELETE, post(routes::delete_queue))
        .route(paths::SHOW, get(routes::show))
        .route(paths::SHOW_PENDING, get(routes::show_pending))
        .route(paths::ENQUEUE, post(routes::enqueue))
        .route(paths::NEXT, post(routes::next))
        .route(paths::DONE, post(routes::done))
        .route(paths::EXPIRE, post(routes::expire))
        .route(paths::EXTEND, post(routes::extend))
        .route(paths::TTL, post(routes::ttl))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
