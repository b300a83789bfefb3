//! Best-effort diagnostics for `GET /test`
//!
//! The report never fails: each probe returns a `Result` and a failing probe
//! only degrades the matching field of the report.

use crate::config::ServerConfig;
use crate::core::error::truncate_detail;
use crate::core::store::DocumentStore;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

/// Collections listed in the report at most
pub const MAX_LISTED_COLLECTIONS: usize = 10;
/// Probe error text kept in the `database` field
pub const MAX_PROBE_ERROR_CHARS: usize = 50;

const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn set_or_not(value: &Option<String>) -> String {
    if value.is_some() { SET } else { NOT_SET }.to_string()
}

impl DiagnosticReport {
    /// Probe `store` and summarize the configuration
    pub async fn collect(store: Option<&dyn DocumentStore>, config: &ServerConfig) -> Self {
        let mut report = DiagnosticReport {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: set_or_not(&config.database_url),
            database_name: set_or_not(&config.database_name),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        };

        let Some(store) = store else {
            if config.database().is_some() {
                report.database = "⚠️  Available but not initialized".to_string();
            }
            return report;
        };

        report.database = "✅ Available".to_string();
        report.connection_status = "Connected".to_string();
        if let Some(name) = store.database_name() {
            report.database_name = name;
        }

        match store.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = names;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Diagnostics could not list collections: {}", e);
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_detail(&e.to_string(), MAX_PROBE_ERROR_CHARS)
                );
            }
        }

        report
    }
}

/// GET /test
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(DiagnosticReport::collect(state.store().map(|store| &**store), state.config()).await)
}
