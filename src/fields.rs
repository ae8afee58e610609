//! Request field validation and coercion
//!
//! Prediction bodies arrive as free-form JSON objects because the field
//! names are a training-time contract (one of them literally ends in a
//! space). Validation is fail-fast over the endpoint's declared field list:
//! the first missing field, in order, names the 400 error. Coercion
//! failures after validation surface as 500s with the raw error text.

use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Check that every field in `required` is present, in declared order.
pub fn require(data: &Value, required: &[&str]) -> ApiResult<()> {
    let obj = data
        .as_object()
        .ok_or_else(|| ApiError::Internal("request body must be a JSON object".to_string()))?;

    for &field in required {
        if !obj.contains_key(field) {
            return Err(ApiError::MissingField(field.to_string()));
        }
    }
    Ok(())
}

/// Coerce a field to f64. Accepts JSON numbers and numeric strings.
pub fn float(data: &Value, name: &str) -> ApiResult<f64> {
    let value = data
        .get(name)
        .ok_or_else(|| ApiError::MissingField(name.to_string()))?;

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ApiError::Internal(format!("could not convert '{n}' to float"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ApiError::Internal(format!("could not convert string to float: '{s}'"))),
        other => Err(ApiError::Internal(format!(
            "could not convert {other} to float"
        ))),
    }
}

/// Coerce a field to i64. Accepts JSON integers and integer strings.
pub fn integer(data: &Value, name: &str) -> ApiResult<i64> {
    let value = data
        .get(name)
        .ok_or_else(|| ApiError::MissingField(name.to_string()))?;

    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ApiError::Internal(format!("could not convert '{n}' to int"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Internal(format!("could not convert string to int: '{s}'"))),
        other => Err(ApiError::Internal(format!(
            "could not convert {other} to int"
        ))),
    }
}

/// Extract a field as a string, unchanged.
pub fn string(data: &Value, name: &str) -> ApiResult<String> {
    let value = data
        .get(name)
        .ok_or_else(|| ApiError::MissingField(name.to_string()))?;

    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ApiError::Internal(format!("expected a string for '{name}'")))
}

/// The optional caller-supplied user identifier.
pub fn user_id(data: &Value) -> Option<String> {
    data.get("user_id")
        .and_then(Value::as_str)
        .map(str::to_string)
}
