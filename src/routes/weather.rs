//! Weather lookup endpoint
//!
//! Proxies the third-party current-weather API and reshapes the payload
//! for the frontend. The outbound call rides the shared client and its
//! 10-second timeout.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

const WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// GET /api/weather/:location
pub async fn get_weather(
    State(state): State<SharedState>,
    Path(location): Path<String>,
) -> ApiResult<Json<Value>> {
    let api_key = state
        .config
        .weather_api_key
        .as_deref()
        .ok_or(ApiError::WeatherKeyMissing)?;

    let response = state
        .http
        .get(WEATHER_API_URL)
        .query(&[
            ("q", location.as_str()),
            ("appid", api_key),
            ("units", "metric"),
        ])
        .send()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    if !response.status().is_success() {
        warn!(%location, status = %response.status(), "weather lookup failed");
        return Err(ApiError::LocationNotFound);
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(shape_weather(&data)))
}

/// Reshape the upstream payload into the API's weather schema.
pub fn shape_weather(data: &Value) -> Value {
    json!({
        "success": true,
        "location": data["name"],
        "country": data["sys"]["country"],
        "temperature": data["main"]["temp"],
        "feels_like": data["main"]["feels_like"],
        "humidity": data["main"]["humidity"],
        "pressure": data["main"]["pressure"],
        "description": title_case(data["weather"][0]["description"].as_str().unwrap_or("")),
        "icon": data["weather"][0]["icon"],
        "wind_speed": data["wind"]["speed"],
        "wind_direction": data["wind"].get("deg").cloned().unwrap_or(json!(0)),
        "visibility": data.get("visibility").and_then(Value::as_f64).unwrap_or(0.0) / 1000.0,
        "timestamp": Utc::now().to_rfc3339(),
    })
}

/// Capitalize every word, like the upstream description formatting.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
