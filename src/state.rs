//! Shared application state
//!
//! Everything a handler needs is constructed once in `main` and injected
//! through an `Arc`: the model registry (immutable after load), the
//! optional persistence store, and the outbound HTTP client with its
//! bounded timeout. No ambient globals.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::models::ModelRegistry;
use crate::store::SupabaseStore;

/// Server configuration resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the model artifacts.
    pub models_dir: PathBuf,
    /// Key for the third-party weather API, if configured.
    pub weather_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            weather_api_key: None,
        }
    }
}

/// Shared application state.
pub struct AppState {
    pub config: ServerConfig,
    pub registry: ModelRegistry,
    pub store: Option<SupabaseStore>,
    /// Outbound client for the weather proxy; built with a 10s timeout.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        registry: ModelRegistry,
        store: Option<SupabaseStore>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            config,
            registry,
            store,
            http,
        }
    }

    /// Best-effort persistence of one prediction.
    ///
    /// A row is written at most once per successful prediction, and only
    /// when both a store and a caller-supplied user id are present;
    /// otherwise the write is silently skipped. Stamps `user_id` and
    /// `created_at` onto the row.
    pub async fn record_prediction(
        &self,
        table: &'static str,
        user_id: Option<&str>,
        mut row: Value,
    ) {
        let (Some(store), Some(user_id)) = (&self.store, user_id) else {
            return;
        };

        if let Some(obj) = row.as_object_mut() {
            obj.insert("user_id".to_string(), Value::String(user_id.to_string()));
            obj.insert(
                "created_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }

        store.record(table, row).await;
    }
}

/// Handle passed to every route handler.
pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_without_store() -> AppState {
        AppState::new(
            ServerConfig::default(),
            ModelRegistry::empty(),
            None,
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_record_skipped_without_store() {
        // No store configured: returns immediately, no panic.
        state_without_store()
            .record_prediction("crop_recommendations", Some("u-1"), json!({}))
            .await;
    }

    #[tokio::test]
    async fn test_record_skipped_without_user_id() {
        state_without_store()
            .record_prediction("crop_recommendations", None, json!({}))
            .await;
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert!(config.weather_api_key.is_none());
    }
}
