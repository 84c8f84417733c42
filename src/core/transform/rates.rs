//! Exchange-rate re-basing
//!
//! Historical quotes arrive EUR-based. The target table stores them
//! re-based to the configured base currency (NOK by default):
//! `rate(base → target) = rate(EUR → target) / rate(EUR → base)`.
//! Rates are rounded to 10 decimal places, the scale of the target column.

use crate::adapters::rates::RatesResponse;
use crate::config::InvalidRecordPolicy;
use crate::domain::{ConversionRate, CurrencyCode, Result};

/// Scale of `currency.currency_conversion_rate.rate`
const RATE_SCALE: u32 = 10;

/// Re-base one day of quotes to `base`
///
/// Rows come out ordered by target code and include the identity quote
/// (base → base = 1). A response without a usable quote for `base`
/// cannot be re-based; that follows `policy` for the whole date.
///
/// # Errors
///
/// Returns `KursError::Transformation` under the `Abort` policy when the
/// base quote is missing/zero or an entry is invalid.
pub fn rebase_rates(
    response: &RatesResponse,
    base: &CurrencyCode,
    policy: InvalidRecordPolicy,
    invalid_skipped: &mut usize,
) -> Result<Vec<ConversionRate>> {
    let base_quote = response.rates.get(base.as_str()).copied();

    let base_quote = match base_quote {
        Some(rate) if !rate.is_zero() => rate,
        _ => {
            super::reject(
                policy,
                format!(
                    "no usable {} quote for {}: cannot re-base rates",
                    base, response.date
                ),
                invalid_skipped,
            )?;
            return Ok(Vec::new());
        }
    };

    let mut rows = Vec::with_capacity(response.rates.len());
    for (raw_code, quote) in &response.rates {
        let target = match CurrencyCode::new(raw_code.as_str()) {
            Ok(code) => code,
            Err(e) => {
                super::reject(
                    policy,
                    format!("rate entry for {} rejected: {e}", response.date),
                    invalid_skipped,
                )?;
                continue;
            }
        };

        let rebased = match quote.checked_div(base_quote) {
            Some(rate) => rate.round_dp(RATE_SCALE),
            None => {
                super::reject(
                    policy,
                    format!(
                        "rate for {} on {} does not divide by the {} quote",
                        target, response.date, base
                    ),
                    invalid_skipped,
                )?;
                continue;
            }
        };

        rows.push(ConversionRate {
            date: response.date,
            base: base.clone(),
            target,
            rate: rebased,
        });
    }

    Ok(rows)
}
