// In app/src/main.rs

use analytics::AnalyticsEngine;
use anyhow::{Result, bail};
use app_config::types::Settings;
use clap::{Parser, Subcommand};
use database::sample;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strategies::MACrossoverSettings;
use tracing_subscriber::prelude::*;
use web_server::AppState;

mod importer;
mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Moving-average crossover signals over stored daily price bars."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serves the HTTP API.
    Serve,

    /// Evaluates the crossover strategy on the stored data and prints the report.
    Evaluate {
        /// Short moving-average window. Defaults to the configured value.
        #[arg(long)]
        short_window: Option<usize>,

        /// Long moving-average window. Defaults to the configured value.
        #[arg(long)]
        long_window: Option<usize>,

        /// Print the summary as JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },

    /// Replaces the stored data with bars read from a CSV file.
    Import {
        /// The CSV file to import. When omitted, the configured data
        /// directory is searched for a file carrying the configured marker.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Replaces the stored data with a generated random-walk sample.
    Seed {
        /// Number of daily bars to generate.
        #[arg(short, long)]
        days: Option<u32>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting crossover");

    match cli.command {
        Commands::Serve => {
            handle_serve(settings).await?;
        }
        Commands::Evaluate {
            short_window,
            long_window,
            json,
        } => {
            handle_evaluate(settings, short_window, long_window, json).await?;
        }
        Commands::Import { file } => {
            handle_import(settings, file).await?;
        }
        Commands::Seed { days } => {
            handle_seed(settings, days).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = tracing::Level::from_str(log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

async fn handle_serve(settings: Settings) -> Result<()> {
    let db = database::connect(&settings.database).await?;
    if settings.database.seed_if_empty {
        db.seed_if_empty(settings.database.sample_days).await?;
    }

    let state = AppState {
        db,
        defaults: settings.strategy,
    };
    web_server::run(settings.server, state).await?;
    Ok(())
}

async fn handle_evaluate(
    settings: Settings,
    short_window: Option<usize>,
    long_window: Option<usize>,
    json: bool,
) -> Result<()> {
    let params = MACrossoverSettings::new(
        short_window.unwrap_or(settings.strategy.short_window),
        long_window.unwrap_or(settings.strategy.long_window),
    );
    params.validate()?;

    let db = database::connect(&settings.database).await?;
    let available = db.count().await?;
    if available < params.long_window as i64 {
        bail!(
            "Need at least {} records. Available: {}",
            params.long_window,
            available
        );
    }

    let series = db.get_price_series().await?;
    let summary = AnalyticsEngine::new().evaluate(&series, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let report = report::Report {
            settings: &params,
            bars: series.len(),
            summary: &summary,
        };
        print!("{report}");
    }
    Ok(())
}

async fn handle_import(settings: Settings, file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => importer::find_data_file(
            Path::new(&settings.import.data_dir),
            &settings.import.file_marker,
        )?,
    };
    tracing::info!(path = %path.display(), "Importing price data.");

    let bars = importer::load_bars(&path)?;
    let db = database::connect(&settings.database).await?;
    let inserted = db.replace_all(&bars).await?;

    tracing::info!(inserted, read = bars.len(), "Import completed.");
    Ok(())
}

async fn handle_seed(settings: Settings, days: Option<u32>) -> Result<()> {
    let days = days.unwrap_or(settings.database.sample_days);
    let bars = sample::generate_sample_bars(sample::sample_start(), days);

    let db = database::connect(&settings.database).await?;
    let inserted = db.replace_all(&bars).await?;

    tracing::info!(inserted, days, "Seeded sample data.");
    Ok(())
}
