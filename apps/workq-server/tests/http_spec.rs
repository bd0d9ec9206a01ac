use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use workq_core::{Expirer, Registry};
use workq_server::app_state::AppState;
use workq_server::router::build_router;

/// Builds a fresh router over a fresh in-memory registry, with a lease
/// short enough to exercise expiry within a test's patience. Mirrors the
/// scenarios in spec.md §8 against the reference client in
/// `examples/original_source/test.py`.
fn app_with_lease(lease_ms: u64) -> axum::Router {
    let registry = Arc::new(Registry::new(lease_ms));
    let _expirer = Expirer::spawn(registry.clone(), Duration::from_millis(20));
    // Leak the expirer so the sweeper outlives the request under test; each
    // test process is short-lived and this keeps the helper trivially Sync.
    std::mem::forget(_expirer);
    build_router(AppState::new(registry))
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(path: &str) -> Request<Body> {
    Request::post(path).body(Body::empty()).unwrap()
}

fn post_form(path: &str, form: &str) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn empty_queue_show() {
    let app = app_with_lease(300_000);
    let resp = app.clone().oneshot(post("/new/q")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/show/q")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_text(resp).await,
        "Done: 0. Pending: 0. Queued: 0. All: 0."
    );
}

#[tokio::test]
async fn duplicate_create_and_missing_delete() {
    let app = app_with_lease(300_000);
    assert_eq!(
        app.clone().oneshot(post("/new/q")).await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        app.clone().oneshot(post("/new/q")).await.unwrap().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.clone()
            .oneshot(post("/delete/q"))
            .await
            .unwrap()
            .status(),
        StatusCode::OK
    );
    assert_eq!(
        app.oneshot(post("/delete/q")).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn fifo_under_enqueue_then_drain() {
    let app = app_with_lease(300_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();

    for item in ["x1", "x2", "x3", "x4"] {
        let resp = app
            .clone()
            .oneshot(post_form("/enqueue/q", &format!("item={item}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let mut ids = Vec::new();
    for _ in 0..4 {
        let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let id = body_text(resp).await;
        assert!(!id.is_empty());
        ids.push(id);
    }
    assert_eq!(ids.len(), 4);
    assert_eq!(ids.iter().collect::<std::collections::HashSet<_>>().len(), 4);

    let resp = app.oneshot(post("/next/q")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "");
}

#[tokio::test]
async fn done_reduces_pending() {
    let app = app_with_lease(300_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();
    for item in ["x1", "x2", "x3", "x4"] {
        app.clone()
            .oneshot(post_form("/enqueue/q", &format!("item={item}")))
            .await
            .unwrap();
    }
    let mut first = None;
    for i in 0..4 {
        let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
        let id = body_text(resp).await;
        if i == 0 {
            first = Some(id);
        }
    }
    let first = first.unwrap();

    let resp = app
        .clone()
        .oneshot(post_form("/done/q", &format!("item={first}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/show/q")).await.unwrap();
    assert_eq!(
        body_text(resp).await,
        "Done: 1. Pending: 3. Queued: 0. All: 4."
    );
}

#[tokio::test]
async fn done_twice_is_conflict_not_silent_success() {
    let app = app_with_lease(300_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();
    app.clone()
        .oneshot(post_form("/enqueue/q", "item=x1"))
        .await
        .unwrap();
    let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
    let id = body_text(resp).await;

    let resp = app
        .clone()
        .oneshot(post_form("/done/q", &format!("item={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(post_form("/done/q", &format!("item={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_queue_is_not_found_everywhere() {
    let app = app_with_lease(300_000);
    for req in [get("/show/ghost"), get("/show/ghost/pending")] {
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
    let resp = app
        .clone()
        .oneshot(post_form("/enqueue/ghost", "item=x1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = app.oneshot(post("/next/ghost")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ttl_decreases_and_lease_expiry_clears_pending() {
    // A 1s lease keeps this test fast while still exercising the real
    // background sweeper, not a mocked clock.
    let app = app_with_lease(1_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();
    app.clone()
        .oneshot(post_form("/enqueue/q", "item=x1"))
        .await
        .unwrap();
    let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
    let id = body_text(resp).await;

    let resp = app
        .clone()
        .oneshot(post_form("/ttl/q", &format!("item={id}")))
        .await
        .unwrap();
    let first_ttl: u64 = body_text(resp).await.parse().unwrap();
    assert!(first_ttl <= 1);

    tokio::time::sleep(Duration::from_millis(1_200)).await;

    let resp = app.oneshot(get("/show/q/pending")).await.unwrap();
    assert_eq!(body_text(resp).await, "");
}

#[tokio::test]
async fn extend_refreshes_ttl() {
    let app = app_with_lease(2_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();
    app.clone()
        .oneshot(post_form("/enqueue/q", "item=x1"))
        .await
        .unwrap();
    let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
    let id = body_text(resp).await;

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    let resp = app
        .clone()
        .oneshot(post_form("/extend/q", &format!("item={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(post_form("/ttl/q", &format!("item={id}")))
        .await
        .unwrap();
    let ttl: u64 = body_text(resp).await.parse().unwrap();
    assert!(ttl >= 1, "extend should have refreshed the lease, got {ttl}");
}

#[tokio::test]
async fn manual_expire_then_next_returns_same_item() {
    let app = app_with_lease(300_000);
    app.clone().oneshot(post("/new/q")).await.unwrap();
    app.clone()
        .oneshot(post_form("/enqueue/q", "item=x1"))
        .await
        .unwrap();
    let resp = app.clone().oneshot(post("/next/q")).await.unwrap();
    let id = body_text(resp).await;

    let resp = app
        .clone()
        .oneshot(post_form("/expire/q", &format!("item={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(post("/next/q")).await.unwrap();
    assert_eq!(body_text(resp).await, id);
}

#[tokio::test]
async fn queues_listing_reflects_create_and_delete() {
    let app = app_with_lease(300_000);
    app.clone().oneshot(post("/new/alpha")).await.unwrap();
    let resp = app.clone().oneshot(get("/queues")).await.unwrap();
    assert_eq!(body_text(resp).await, "alpha");

    app.clone().oneshot(post("/delete/alpha")).await.unwrap();
    let resp = app.oneshot(get("/queues")).await.unwrap();
    assert_eq!(body_text(resp).await, "");
}

#[tokio::test]
async fn root_banner_is_non_empty() {
    let app = app_with_lease(300_000);
    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_text(resp).await.is_empty());
}
