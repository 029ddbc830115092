//! Shared test helpers for server integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use duskhaven_character::application::persistence::PersistenceGateway;
use duskhaven_core::clock::Clock;
use duskhaven_engine::application::world::{GameWorld, WorldStatus};
use duskhaven_engine::domain::config::EngineConfig;
use duskhaven_server::routes;
use duskhaven_server::state::AppState;
use duskhaven_test_support::{FixedClock, FixedRng, RecordingStateStore, sample_pack};
use http_body_util::BodyExt;
use tokio::sync::watch;
use tower::ServiceExt;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A world over the sample pack. Saves go to a recording store whose
/// writer is spawned onto the current runtime.
pub fn build_world() -> GameWorld {
    let (gateway, writer) =
        PersistenceGateway::new(Arc::new(RecordingStateStore::new()), fixed_clock());
    tokio::spawn(writer.run());
    GameWorld::new(
        EngineConfig::default(),
        Arc::new(sample_pack()),
        gateway,
        fixed_clock(),
        Box::new(FixedRng::new(10, 1.0)),
    )
    .unwrap()
}

/// Build the full app router over a fixed status snapshot. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(status: WorldStatus) -> Router {
    let (_tx, rx) = watch::channel(status);
    routes::router(AppState::new(rx))
}

/// Send a GET request and return the status code and parsed JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
