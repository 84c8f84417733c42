//! Pipeline coordinator - orchestrates one batch run
//!
//! Drives the run from connection to completion: connect, optional
//! teardown, ensure schema, then transform-and-load currencies, item
//! prices, and per-date conversion rates. Steps run strictly in order and
//! the first failure aborts the rest; committed prior steps stand. The run
//! is not atomic end-to-end, only atomic per load transaction.

use crate::adapters::batch::BatchReader;
use crate::adapters::postgres::{PgClient, PgWriter, SchemaManager};
use crate::adapters::rates::RatesApiClient;
use crate::config::KursConfig;
use crate::core::pipeline::summary::RunSummary;
use crate::core::transform;
use crate::domain::{CurrencyCode, KursError, Result};
use std::time::Instant;

/// Pipeline coordinator
pub struct Pipeline {
    config: KursConfig,
}

impl Pipeline {
    /// Create a pipeline from resolved configuration
    ///
    /// Configuration is immutable from here on; in particular the reinit
    /// flag was fixed when the config was loaded.
    pub fn new(config: KursConfig) -> Self {
        Self { config }
    }

    /// Execute one run
    ///
    /// # Errors
    ///
    /// Propagates the first failure of any step. The connection pool is
    /// dropped on every exit path; an open transaction at failure time is
    /// rolled back by the writer.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let policy = self.config.load.on_invalid;
        let mut summary = RunSummary::new();

        if self.config.load.dry_run {
            tracing::info!("Dry run: no data will be written");
        }

        // Connection is a single attempt; readiness gating is external.
        let client = PgClient::connect(&self.config.database).await?;

        // DDL is a write too: a dry run must leave the schema untouched.
        if self.config.load.dry_run {
            tracing::info!("Dry run: skipping schema teardown and creation");
        } else {
            let schema = SchemaManager::new(&client);
            if self.config.load.reinit {
                tracing::info!("Reinit requested, tearing down schema objects");
                schema.teardown().await?;
                summary.reinitialized = true;
            }
            schema.ensure().await?;
        }

        let writer = PgWriter::new(&client, self.config.load.dry_run);
        let rates_api = RatesApiClient::new(&self.config.rates)?;
        let base = CurrencyCode::new(self.config.rates.base_currency.as_str())
            .map_err(KursError::Configuration)?;

        // Currency reference data first: both other tables reference it.
        let raw_currencies = rates_api.currencies().await?;
        let currencies =
            transform::currencies_from_api(&raw_currencies, policy, &mut summary.invalid_skipped)?;
        summary.currencies_loaded = writer.load_currencies(&currencies).await?;

        // Item prices from the ordered batch files.
        let batches = BatchReader::new(&self.config.batches.dir).read_all()?;
        let outcome = transform::prices_from_batches(&batches, policy)?;
        summary.checkpoint_skipped = outcome.checkpoint_skipped;
        summary.invalid_skipped += outcome.invalid_skipped;
        summary.price_rows_loaded = writer.load_item_prices(&outcome.rows).await?;

        // Conversion rates for every date the prices referenced.
        summary.rate_dates = outcome.rate_dates.len();
        for date in &outcome.rate_dates {
            let response = rates_api.historical_rates(*date).await?;
            let rows =
                transform::rebase_rates(&response, &base, policy, &mut summary.invalid_skipped)?;
            summary.rates_loaded += writer.load_rates(&rows).await?;
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
