//! Target row types
//!
//! These are the shapes written to the database, one struct per target
//! table. Transformations produce them from raw source records; the writer
//! binds their fields directly to statement parameters, so the field types
//! mirror the column types.

use crate::domain::codes::CurrencyCode;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Row for `currency.currencies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Primary key, `VARCHAR(3)`
    pub code: CurrencyCode,

    /// Human-readable name, `NOT NULL`
    pub name: String,

    /// Display symbol, nullable
    pub symbol: Option<String>,
}

/// Row for `currency.currency_conversion_rate`
///
/// One quote: on `date`, 1 unit of `base` buys `rate` units of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRate {
    pub date: NaiveDate,
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: Decimal,
}

/// Row for `public.item_prices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrice {
    /// Primary key, `VARCHAR(100)`
    pub id: String,
    pub item: String,
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub system_timestamp: DateTime<Utc>,
}
