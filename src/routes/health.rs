//! Health check and service banner

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /health - liveness probe, always 200.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET / - service banner with loaded models and the endpoint directory.
pub async fn index(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "message": "🌾 AgriServe Agriculture Platform API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
        "models_loaded": state.registry.loaded_names(),
        "endpoints": {
            "crop_recommendation": "POST /api/crop-recommendation",
            "disease_detection": "POST /api/disease-detection",
            "crop_yield_prediction": "POST /api/crop-yield-prediction",
            "fertilizer_recommendation": "POST /api/fertilizer-recommendation",
            "weather": "GET /api/weather/<location>",
            "user_history": "GET /api/user/history/<user_id>"
        }
    }))
}
