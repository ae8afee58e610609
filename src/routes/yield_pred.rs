//! Crop yield prediction endpoint
//!
//! `Area` is a country name (string), matching the training data; `Year`
//! is the only integer field.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::fields;
use crate::state::SharedState;

/// Required fields, in validation and feature-vector order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "Year",
    "average_rain_fall_mm_per_year",
    "pesticides_tonnes",
    "avg_temp",
    "Area",
    "Item",
];

#[derive(Serialize)]
pub struct YieldResponse {
    pub success: bool,
    pub predicted_yield: f64,
    pub crop_type: String,
    pub area: String,
    pub message: String,
    pub factors: Value,
}

/// POST /api/crop-yield-prediction
pub async fn predict_yield(
    State(state): State<SharedState>,
    Json(data): Json<Value>,
) -> ApiResult<Json<YieldResponse>> {
    fields::require(&data, &REQUIRED_FIELDS)?;

    let year = fields::integer(&data, "Year")?;
    let rainfall = fields::float(&data, "average_rain_fall_mm_per_year")?;
    let pesticides = fields::float(&data, "pesticides_tonnes")?;
    let avg_temp = fields::float(&data, "avg_temp")?;
    let area = fields::string(&data, "Area")?;
    let item = fields::string(&data, "Item")?;
    let user_id = fields::user_id(&data);

    let model = state
        .registry
        .crop_yield
        .as_ref()
        .ok_or(ApiError::ModelUnavailable("Crop yield"))?;

    let predicted_yield = model.predict(year, rainfall, pesticides, avg_temp, &area, &item)?;
    debug!(predicted_yield, "yield prediction");

    state
        .record_prediction(
            "crop_yield_predictions",
            user_id.as_deref(),
            json!({
                "year": year,
                "average_rainfall": rainfall,
                "pesticides_usage": pesticides,
                "average_temperature": avg_temp,
                "area": &area,
                "crop_item": &item,
                "predicted_yield": predicted_yield,
            }),
        )
        .await;

    Ok(Json(YieldResponse {
        success: true,
        predicted_yield,
        message: format!("Predicted yield for {item} in {area}: {predicted_yield:.2} hg/ha"),
        factors: json!({
            "year": year,
            "rainfall": rainfall,
            "pesticides_used": pesticides,
            "temperature": avg_temp,
            "country": &area,
        }),
        crop_type: item,
        area,
    }))
}
