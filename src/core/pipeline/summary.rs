//! Run summary and reporting

use std::time::Duration;

/// Summary of one pipeline run
///
/// A run either reaches the end with one of these or aborts on the first
/// error, so the summary only carries counts, not per-record failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether the schema was torn down and recreated first
    pub reinitialized: bool,

    /// Rows upserted into `currency.currencies`
    pub currencies_loaded: u64,

    /// Rows upserted into `public.item_prices`
    pub price_rows_loaded: u64,

    /// Price rows skipped by the `system_timestamp` checkpoint
    pub checkpoint_skipped: usize,

    /// Source records skipped as invalid (skip policy only)
    pub invalid_skipped: usize,

    /// Distinct dates for which rates were fetched
    pub rate_dates: usize,

    /// Rows upserted into `currency.currency_conversion_rate`
    pub rates_loaded: u64,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self {
            reinitialized: false,
            currencies_loaded: 0,
            price_rows_loaded: 0,
            checkpoint_skipped: 0,
            invalid_skipped: 0,
            rate_dates: 0,
            rates_loaded: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            reinitialized = self.reinitialized,
            currencies = self.currencies_loaded,
            item_prices = self.price_rows_loaded,
            checkpoint_skipped = self.checkpoint_skipped,
            invalid_skipped = self.invalid_skipped,
            rate_dates = self.rate_dates,
            rates = self.rates_loaded,
            duration_secs = self.duration.as_secs(),
            "Load completed"
        );

        if self.invalid_skipped > 0 {
            tracing::warn!(
                invalid_skipped = self.invalid_skipped,
                "Some source records were skipped as invalid"
            );
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
