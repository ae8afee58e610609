//! Disease detection endpoint
//!
//! Accepts a multipart image upload, spools it to a scoped temp file
//! (removed on every exit path when the handle drops), and runs it through
//! the disease model.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::advisory::disease::{severity_level, treatment_for, Product};
use crate::error::{ApiError, ApiResult};
use crate::labels;
use crate::models::image;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct DiseaseResponse {
    pub success: bool,
    pub disease: String,
    pub confidence: f64,
    pub treatment_advice: String,
    pub recommended_products: Vec<Product>,
    pub prevention_tips: Vec<&'static str>,
    pub severity: &'static str,
}

/// POST /api/disease-detection (multipart: `file`, optional `user_id`)
pub async fn detect_disease(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Internal(e.to_string()))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("user_id") => {
                user_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::Internal(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or(ApiError::NoFileUploaded)?;
    if file_name.as_deref().unwrap_or("").is_empty() {
        return Err(ApiError::NoFileSelected);
    }

    let model = state
        .registry
        .disease
        .as_ref()
        .ok_or(ApiError::ModelUnavailable("Disease detection"))?;

    // Spool the upload; the temp file is deleted when `upload` drops,
    // on the error paths below as much as on success.
    let mut upload =
        tempfile::NamedTempFile::new().map_err(|e| ApiError::Internal(e.to_string()))?;
    upload
        .write_all(&bytes)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let pixels = image::load_and_preprocess(upload.path())?;
    let (class, confidence) = model.predict(&pixels)?;
    debug!(class, confidence, "disease prediction");

    let Some(disease) = labels::disease_label(class) else {
        return Ok(Json(json!({
            "success": false,
            "message": "Could not determine the condition from the provided image."
        }))
        .into_response());
    };

    let plan = treatment_for(disease);
    let severity = severity_level(confidence, disease);

    state
        .record_prediction(
            "disease_detections",
            user_id.as_deref(),
            json!({
                "detected_disease": disease,
                "confidence_score": confidence,
            }),
        )
        .await;

    Ok(Json(DiseaseResponse {
        success: true,
        disease: disease.to_string(),
        confidence,
        treatment_advice: plan.advice.to_string(),
        recommended_products: plan.products,
        prevention_tips: plan.prevention,
        severity,
    })
    .into_response())
}
