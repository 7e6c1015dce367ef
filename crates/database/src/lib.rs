// In crates/database/src/lib.rs

use app_config::types::DatabaseSettings;
use core_types::{PriceBar, PriceSeries};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteQueryResult};
use sqlx::{Executor, Sqlite, SqlitePool};
use std::str::FromStr;

pub mod error;
pub mod sample;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::StoredBar;

use types::StockDataRow;

/// A wrapper around the `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct Db(SqlitePool);

/// Opens the SQLite store (creating the file if needed) and runs migrations.
///
/// In-memory databases live and die with their connection, so they are pinned
/// to a single connection that is never recycled.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    let options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);

    let in_memory = settings.url.contains(":memory:") || settings.url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    // The `?` operator uses the `#[from]` attribute in our error enum
    // to convert the `sqlx::Error` into a `database::Error`.
    let pool = pool_options.connect_with(options).await?;

    // Run database migrations. This ensures the database schema is up-to-date.
    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(Db(pool))
}

impl Db {
    /// Number of stored bars.
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_data")
            .fetch_one(&self.0)
            .await
            .map_err(Error::OperationFailed)
    }

    /// All stored bars, oldest first.
    pub async fn get_all_bars(&self) -> Result<Vec<StoredBar>> {
        let rows = sqlx::query_as::<_, StockDataRow>(
            r#"
            SELECT id, datetime, open, high, low, close, volume
            FROM stock_data
            ORDER BY datetime
            "#,
        )
        .fetch_all(&self.0)
        .await
        .map_err(Error::OperationFailed)?;

        Ok(rows.into_iter().map(StoredBar::from).collect())
    }

    /// A validated snapshot of every stored bar, ready for the signal engine.
    pub async fn get_price_series(&self) -> Result<PriceSeries> {
        let bars = self
            .get_all_bars()
            .await?
            .into_iter()
            .map(|stored| stored.bar)
            .collect();

        Ok(PriceSeries::new(bars)?)
    }

    /// Inserts one bar. A bar with an already-stored timestamp is rejected with
    /// [`Error::RecordExists`].
    pub async fn insert_bar(&self, bar: &PriceBar) -> Result<StoredBar> {
        match insert(&self.0, bar, false).await {
            Ok(done) => Ok(StoredBar {
                id: done.last_insert_rowid(),
                bar: *bar,
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(Error::RecordExists),
            Err(e) => Err(Error::OperationFailed(e)),
        }
    }

    /// Clears the store and inserts `bars` in one transaction.
    ///
    /// Bars whose timestamp was already inserted by this call are skipped.
    /// Returns the number of rows written.
    pub async fn replace_all(&self, bars: &[PriceBar]) -> Result<u64> {
        let mut tx = self.0.begin().await.map_err(Error::OperationFailed)?;

        sqlx::query("DELETE FROM stock_data")
            .execute(&mut *tx)
            .await
            .map_err(Error::OperationFailed)?;

        let mut inserted = 0;
        for bar in bars {
            let done = insert(&mut *tx, bar, true)
                .await
                .map_err(Error::OperationFailed)?;
            inserted += done.rows_affected();

            if done.rows_affected() > 0 && inserted % 50 == 0 {
                tracing::debug!(inserted, "Imported records...");
            }
        }

        tx.commit().await.map_err(Error::OperationFailed)?;

        tracing::info!(inserted, skipped = bars.len() as u64 - inserted, "Replaced stored price data.");
        Ok(inserted)
    }

    /// Fills an empty store with `days` generated sample bars. Does nothing if
    /// any data is already present. Returns the number of rows written.
    pub async fn seed_if_empty(&self, days: u32) -> Result<u64> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let bars = sample::generate_sample_bars(sample::sample_start(), days);
        let inserted = self.replace_all(&bars).await?;
        tracing::info!(inserted, "Seeded empty store with sample data.");

        Ok(inserted)
    }
}

async fn insert<'e, E>(executor: E, bar: &PriceBar, skip_existing: bool) -> sqlx::Result<SqliteQueryResult>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = if skip_existing {
        "INSERT OR IGNORE INTO stock_data (datetime, open, high, low, close, volume) VALUES (?, ?, ?, ?, ?, ?)"
    } else {
        "INSERT INTO stock_data (datetime, open, high, low, close, volume) VALUES (?, ?, ?, ?, ?, ?)"
    };

    sqlx::query(sql)
        .bind(bar.timestamp)
        .bind(bar.open)
        .bind(bar.high)
        .bind(bar.low)
        .bind(bar.close)
        .bind(bar.volume)
        .execute(executor)
        .await
}
