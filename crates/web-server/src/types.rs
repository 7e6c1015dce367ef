// In crates/web-server/src/types.rs

use analytics::SignalDetail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strategies::MACrossoverSettings;

/// Window lengths from the query string (e.g., `?short_window=5&long_window=20`).
/// Missing values fall back to the configured defaults.
#[derive(Debug, Deserialize, Default)]
pub struct WindowParams {
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
}

impl WindowParams {
    pub fn resolve(&self, defaults: &MACrossoverSettings) -> MACrossoverSettings {
        MACrossoverSettings::new(
            self.short_window.unwrap_or(defaults.short_window),
            self.long_window.unwrap_or(defaults.long_window),
        )
    }
}

/// Body of `GET /strategy/signals`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub recent_signals: Vec<SignalDetail>,
    pub total_signals: usize,
    pub parameters: MACrossoverSettings,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: i64,
    pub timestamp: DateTime<Utc>,
}
