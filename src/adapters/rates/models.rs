//! Rates API response models
//!
//! Maps use `BTreeMap` rather than `HashMap` so iteration order is fixed
//! by currency code and transformations stay deterministic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One entry of the `/currencies` response
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Full `/currencies` response: code → info
pub type CurrenciesResponse = BTreeMap<String, CurrencyInfo>;

/// `/rates?date=...` response
///
/// Historical quotes are EUR-based; re-basing happens in the transform
/// layer, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesResponse {
    pub date: NaiveDate,
    pub base: String,
    pub rates: BTreeMap<String, Decimal>,
}
