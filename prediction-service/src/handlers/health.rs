use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe. Always succeeds while the process is serving.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "prediction-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness probe, backed by the predictor's own health check.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.predictor.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "model": state.config.model.kind
            })),
        ),
        Err(e) => {
            tracing::warn!(predictor = state.predictor.name(), "Predictor not ready: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "model": state.config.model.kind,
                    "error": e.to_string()
                })),
            )
        }
    }
}
