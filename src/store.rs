//! Persistence gateway
//!
//! Fire-and-forget logging of predictions to a hosted PostgREST-style
//! store, plus the per-user history reads. Writes are at-most-once and
//! best-effort: up to three attempts with a fixed one-second pause, then
//! the record is logged and dropped. A write failure never reaches the
//! caller of [`SupabaseStore::record`].

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Write attempts before a record is dropped.
pub const MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Client for the hosted store's REST interface.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: String, api_key: String, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Append one row to `table`. Never fails the caller: all errors are
    /// logged and swallowed after the retry budget is spent.
    pub async fn record(&self, table: &str, row: Value) {
        let started = Instant::now();

        for attempt in 1..=MAX_ATTEMPTS {
            match self.insert(table, &row).await {
                Ok(()) => {
                    info!(
                        table,
                        attempt,
                        latency_ms = started.elapsed().as_millis() as u64,
                        "prediction recorded"
                    );
                    return;
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    warn!(table, attempt, %err, "store write failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => {
                    error!(
                        table,
                        attempt,
                        latency_ms = started.elapsed().as_millis() as u64,
                        %err,
                        "store write dropped after {MAX_ATTEMPTS} attempts"
                    );
                }
            }
        }
    }

    async fn insert(&self, table: &str, row: &Value) -> Result<(), reqwest::Error> {
        self.client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Most recent rows for a user in `table`, newest first.
    pub async fn recent(
        &self,
        table: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Value>, reqwest::Error> {
        debug!(table, user_id, limit, "history query");

        let rows = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                ("select", "*"),
                ("user_id", &format!("eq.{user_id}")),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }
}
