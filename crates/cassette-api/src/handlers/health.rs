//! Health check handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cassette_storage::ObjectStore;

use crate::state::AppState;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Probe one store with a lookup for a key that can never exist.
async fn check_store(store: &ObjectStore, timeout: Duration) -> (String, bool) {
    match tokio::time::timeout(timeout, store.exists("health-check-non-existent-key")).await {
        Ok(Ok(_)) => ("ready".to_string(), true),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            (format!("not_ready: {}", e), false)
        }
        Err(_) => {
            tracing::error!("Storage readiness check timed out");
            ("timeout".to_string(), false)
        }
    }
}

/// Readiness probe - critical dependencies (object storage).
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = serde_json::json!({
        "status": "ready",
        "media_storage": "unknown",
        "transcript_storage": "unknown"
    });

    let mut overall_ready = true;

    let (status, ready) = check_store(&state.media_store, TIMEOUT).await;
    response["media_storage"] = serde_json::json!(status);
    overall_ready &= ready;

    let (status, ready) = check_store(&state.transcript_store, TIMEOUT).await;
    response["transcript_storage"] = serde_json::json!(status);
    overall_ready &= ready;

    if !overall_ready {
        response["status"] = serde_json::json!("not_ready");
    }

    let status_code = if overall_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
