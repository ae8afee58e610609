//! API routes
//!
//! One module per endpoint family, wired into a single router with CORS,
//! request tracing, and the fixed 404 body for unknown paths.

pub mod crop;
pub mod disease;
pub mod fertilizer;
pub mod health;
pub mod history;
pub mod weather;
pub mod yield_pred;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Maximum upload size for disease-detection images.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Build the full application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(health::index))
        .route("/api/crop-recommendation", post(crop::recommend_crop))
        .route("/api/disease-detection", post(disease::detect_disease))
        .route("/api/crop-yield-prediction", post(yield_pred::predict_yield))
        .route(
            "/api/fertilizer-recommendation",
            post(fertilizer::recommend_fertilizer),
        )
        .route("/api/weather/:location", get(weather::get_weather))
        .route("/api/user/history/:user_id", get(history::user_history))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Fixed JSON body for unknown routes.
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "error": "Endpoint not found"})),
    )
}
