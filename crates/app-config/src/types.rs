// In crates/app-config/src/types.rs

use serde::Deserialize;

use strategies::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the price-bar store.
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    /// Window lengths used when a request does not specify its own.
    #[serde(default)]
    pub strategy: MACrossoverSettings,
    #[serde(default)]
    pub import: ImportSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    /// The SQLite connection URL, e.g. `sqlite://trading.db` or `sqlite::memory:`.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Fill an empty store with generated sample bars on start-up.
    #[serde(default)]
    pub seed_if_empty: bool,
    /// Number of daily bars generated when seeding.
    #[serde(default = "default_sample_days")]
    pub sample_days: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Where the `import` command looks for a CSV file when none is given.
#[derive(Deserialize, Debug, Clone)]
pub struct ImportSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Substring the file name must contain.
    #[serde(default = "default_file_marker")]
    pub file_marker: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_marker: default_file_marker(),
        }
    }
}

/// Helper functions for serde defaults
fn default_max_connections() -> u32 { 5 }
fn default_sample_days() -> u32 { 100 }
fn default_data_dir() -> String { ".".into() }
fn default_file_marker() -> String { "HINDALCO".into() }
