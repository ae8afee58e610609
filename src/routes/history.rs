//! Per-user prediction history
//!
//! Reads back the last predictions per category from the persistence
//! store. Each category is independently failure-tolerant: a failed query
//! contributes an empty list, never an error, and `total_records` counts
//! only what was actually returned.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// History categories, one store table each.
pub const HISTORY_TABLES: [&str; 4] = [
    "crop_recommendations",
    "disease_detections",
    "fertilizer_recommendations",
    "crop_yield_predictions",
];

/// Rows returned per category.
const HISTORY_LIMIT: usize = 10;

/// GET /api/user/history/:user_id
pub async fn user_history(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let store = state.store.as_ref().ok_or(ApiError::DatabaseNotConfigured)?;

    let mut history = Map::new();
    let mut total_records = 0;

    for table in HISTORY_TABLES {
        let rows = match store.recent(table, &user_id, HISTORY_LIMIT).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(table, %err, "history query failed");
                Vec::new()
            }
        };
        total_records += rows.len();
        history.insert(table.to_string(), Value::Array(rows));
    }

    Ok(Json(json!({
        "success": true,
        "user_id": user_id,
        "history": history,
        "total_records": total_records,
    })))
}
