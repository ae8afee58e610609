//! Crop recommendation endpoint

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::fields;
use crate::labels;
use crate::state::SharedState;

/// Required fields, in validation and feature-vector order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "nitrogen",
    "phosphorus",
    "potassium",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

#[derive(Serialize)]
pub struct CropResponse {
    pub success: bool,
    pub recommended_crop: String,
    pub confidence: f64,
    pub message: String,
    pub advice: String,
}

/// POST /api/crop-recommendation
pub async fn recommend_crop(
    State(state): State<SharedState>,
    Json(data): Json<Value>,
) -> ApiResult<Response> {
    fields::require(&data, &REQUIRED_FIELDS)?;

    let nitrogen = fields::float(&data, "nitrogen")?;
    let phosphorus = fields::float(&data, "phosphorus")?;
    let potassium = fields::float(&data, "potassium")?;
    let temperature = fields::float(&data, "temperature")?;
    let humidity = fields::float(&data, "humidity")?;
    let ph = fields::float(&data, "ph")?;
    let rainfall = fields::float(&data, "rainfall")?;
    let user_id = fields::user_id(&data);

    let model = state
        .registry
        .crop
        .as_ref()
        .ok_or(ApiError::ModelUnavailable("Crop recommendation"))?;

    // Feature order is part of the training contract.
    let features = [
        nitrogen,
        phosphorus,
        potassium,
        temperature,
        humidity,
        ph,
        rainfall,
    ];
    let (label, confidence) = model.predict(&features)?;
    debug!(label, confidence, "crop prediction");

    let Some(crop) = labels::crop_name(label) else {
        return Ok(Json(json!({
            "success": false,
            "message": "Could not determine the best crop with the provided data."
        }))
        .into_response());
    };

    state
        .record_prediction(
            "crop_recommendations",
            user_id.as_deref(),
            json!({
                "nitrogen": nitrogen,
                "phosphorus": phosphorus,
                "potassium": potassium,
                "temperature": temperature,
                "humidity": humidity,
                "ph_level": ph,
                "rainfall": rainfall,
                "recommended_crop": crop,
                "confidence_score": confidence,
            }),
        )
        .await;

    Ok(Json(CropResponse {
        success: true,
        recommended_crop: crop.to_string(),
        confidence,
        message: format!("{crop} is the best crop for these conditions"),
        advice: format!(
            "Based on your soil conditions (N:{nitrogen}, P:{phosphorus}, K:{potassium}) and \
             climate (temp:{temperature}°C, humidity:{humidity}%, pH:{ph}, rainfall:{rainfall}mm), \
             {crop} is recommended with {:.1}% confidence.",
            confidence * 100.0
        ),
    })
    .into_response())
}
