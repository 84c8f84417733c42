//! Currency reference transformation

use crate::adapters::rates::CurrenciesResponse;
use crate::config::InvalidRecordPolicy;
use crate::domain::{Currency, CurrencyCode, Result};
use std::collections::BTreeMap;

/// Map the `/currencies` response to `currency.currencies` rows
///
/// Rows come out ordered by code. Codes that normalize to the same value
/// collapse to the last entry; codes that fail validation follow `policy`.
///
/// # Errors
///
/// Returns `KursError::Transformation` for an invalid entry when the
/// policy is `Abort`.
pub fn currencies_from_api(
    response: &CurrenciesResponse,
    policy: InvalidRecordPolicy,
    invalid_skipped: &mut usize,
) -> Result<Vec<Currency>> {
    let mut by_code: BTreeMap<CurrencyCode, Currency> = BTreeMap::new();

    for (raw_code, info) in response {
        match CurrencyCode::new(raw_code.as_str()) {
            Ok(code) => {
                by_code.insert(
                    code.clone(),
                    Currency {
                        code,
                        name: info.name.clone(),
                        symbol: info.symbol.clone(),
                    },
                );
            }
            Err(e) => super::reject(policy, format!("currency entry rejected: {e}"), invalid_skipped)?,
        }
    }

    Ok(by_code.into_values().collect())
}
