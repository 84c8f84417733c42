//! Data transformation
//!
//! Pure, deterministic mappings from raw source records to target rows:
//!
//! - [`currencies`] - API currency map → `currency.currencies` rows
//! - [`prices`] - CSV batch rows → `public.item_prices` rows, with the
//!   `system_timestamp` checkpoint and the set of rate dates to fetch
//! - [`rates`] - EUR-base historical quotes → base-currency rows for
//!   `currency.currency_conversion_rate`
//!
//! None of these touch the clock, randomness, or any external state:
//! identical input always produces identical output. Invalid records are
//! handled through [`reject`], which applies the configured
//! [`InvalidRecordPolicy`] uniformly.

use crate::config::InvalidRecordPolicy;
use crate::domain::{KursError, Result};

pub mod currencies;
pub mod prices;
pub mod rates;

pub use currencies::currencies_from_api;
pub use prices::{prices_from_batches, BatchOutcome};
pub use rates::rebase_rates;

/// Apply the invalid-record policy to one rejected record.
///
/// Under `Skip` the record is counted and logged; under `Abort` the reason
/// becomes a fatal `TransformationError`.
pub(crate) fn reject(
    policy: InvalidRecordPolicy,
    reason: String,
    skipped: &mut usize,
) -> Result<()> {
    match policy {
        InvalidRecordPolicy::Skip => {
            tracing::warn!(reason = %reason, "Skipping invalid source record");
            *skipped += 1;
            Ok(())
        }
        InvalidRecordPolicy::Abort => Err(KursError::Transformation(reason)),
    }
}
