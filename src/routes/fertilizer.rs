//! Fertilizer recommendation endpoint
//!
//! Field names follow the training data verbatim: `Temparature` is the
//! trained spelling, and the humidity key is literally `"Humidity "` with a
//! trailing space.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::advisory::fertilizer::compose_advice;
use crate::error::{ApiError, ApiResult};
use crate::fields;
use crate::models::FertilizerInput;
use crate::state::SharedState;

/// Required fields, in validation order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "Temparature",
    "Humidity ",
    "Moisture",
    "Soil Type",
    "Crop Type",
    "Nitrogen",
    "Potassium",
    "Phosphorous",
];

#[derive(Serialize)]
pub struct FertilizerResponse {
    pub success: bool,
    pub recommended_fertilizer: String,
    pub confidence: f64,
    pub advice: String,
    pub soil_analysis: Value,
    pub conditions: Value,
}

/// POST /api/fertilizer-recommendation
pub async fn recommend_fertilizer(
    State(state): State<SharedState>,
    Json(data): Json<Value>,
) -> ApiResult<Json<FertilizerResponse>> {
    fields::require(&data, &REQUIRED_FIELDS)?;

    let input = FertilizerInput {
        temperature: fields::float(&data, "Temparature")?,
        humidity: fields::float(&data, "Humidity ")?,
        moisture: fields::float(&data, "Moisture")?,
        soil_type: fields::string(&data, "Soil Type")?,
        crop_type: fields::string(&data, "Crop Type")?,
        nitrogen: fields::float(&data, "Nitrogen")?,
        potassium: fields::float(&data, "Potassium")?,
        phosphorous: fields::float(&data, "Phosphorous")?,
    };
    let user_id = fields::user_id(&data);

    let model = state
        .registry
        .fertilizer
        .as_ref()
        .ok_or(ApiError::ModelUnavailable("Fertilizer"))?;

    let (fertilizer, confidence) = model.predict(&input)?;
    debug!(%fertilizer, confidence, "fertilizer prediction");

    let advice = compose_advice(&fertilizer, &input);

    state
        .record_prediction(
            "fertilizer_recommendations",
            user_id.as_deref(),
            json!({
                "temperature": input.temperature,
                "humidity": input.humidity,
                "moisture": input.moisture,
                "soil_type": &input.soil_type,
                "crop_type": &input.crop_type,
                "nitrogen": input.nitrogen,
                "potassium": input.potassium,
                "phosphorous": input.phosphorous,
                "recommended_fertilizer": &fertilizer,
                "confidence_score": confidence,
            }),
        )
        .await;

    Ok(Json(FertilizerResponse {
        success: true,
        recommended_fertilizer: fertilizer,
        confidence,
        advice,
        soil_analysis: json!({
            "nitrogen": input.nitrogen,
            "phosphorous": input.phosphorous,
            "potassium": input.potassium,
            "soil_type": &input.soil_type,
            "moisture": input.moisture,
        }),
        conditions: json!({
            "temperature": input.temperature,
            "humidity": input.humidity,
            "crop_type": &input.crop_type,
        }),
    }))
}
