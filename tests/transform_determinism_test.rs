//! Transformation determinism tests
//!
//! The load contract requires that the same source records always produce
//! the same target rows: no wall clock, no randomness, no ambient state.
//! These tests feed generated-but-fixed-seed record sets through each
//! transformation twice and require identical output.

use kurs::adapters::batch::{BatchFile, PriceRecord};
use kurs::adapters::rates::{CurrenciesResponse, CurrencyInfo, RatesResponse};
use kurs::config::InvalidRecordPolicy;
use kurs::core::transform::{currencies_from_api, prices_from_batches, rebase_rates};
use kurs::domain::CurrencyCode;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

const CURRENCIES: [&str; 5] = ["NOK", "USD", "EUR", "GBP", "SEK"];

/// Well-formed price batches from a seeded generator
fn arbitrary_batches(seed: u64, batch_count: usize, rows_per_batch: usize) -> Vec<BatchFile> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut batches = Vec::new();

    for batch_index in 0..batch_count {
        let mut rows = Vec::new();
        for row_index in 0..rows_per_batch {
            let day = rng.gen_range(1..=28);
            let hour = rng.gen_range(0..24);
            let currency = CURRENCIES[rng.gen_range(0..CURRENCIES.len())];
            let price_cents: u32 = rng.gen_range(1..=99_999);

            let timestamp = format!("2024-03-{day:02}T{hour:02}:00:00Z");
            rows.push(PriceRecord {
                id: format!("sku-{batch_index}-{row_index}"),
                item: format!("item-{row_index}"),
                price: format!("{}.{:02}", price_cents / 100, price_cents % 100),
                currency: currency.to_string(),
                created_at: timestamp.clone(),
                updated_at: timestamp.clone(),
                system_timestamp: timestamp,
            });
        }
        batches.push(BatchFile {
            name: format!("batch{}.csv", batch_index + 1),
            rows,
        });
    }

    batches
}

#[test]
fn test_price_transformation_is_repeatable() {
    let batches = arbitrary_batches(42, 3, 50);

    let first = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();
    let second = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();

    assert_eq!(first.rows, second.rows);
    assert_eq!(first.rate_dates, second.rate_dates);
    assert_eq!(first.checkpoint_skipped, second.checkpoint_skipped);
    assert_eq!(first.invalid_skipped, second.invalid_skipped);
}

#[test]
fn test_price_transformation_is_repeatable_across_seeds() {
    for seed in [7, 1234, 987_654] {
        let batches = arbitrary_batches(seed, 2, 25);
        let first = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();
        let second = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();
        assert_eq!(first.rows, second.rows, "seed {seed}");
        assert_eq!(first.rate_dates, second.rate_dates, "seed {seed}");
    }
}

#[test]
fn test_currency_transformation_is_repeatable() {
    let response: CurrenciesResponse = CURRENCIES
        .iter()
        .map(|code| {
            (
                code.to_string(),
                CurrencyInfo {
                    name: format!("{code} name"),
                    symbol: Some("¤".to_string()),
                },
            )
        })
        .collect();

    let mut skipped_first = 0;
    let mut skipped_second = 0;
    let first =
        currencies_from_api(&response, InvalidRecordPolicy::Skip, &mut skipped_first).unwrap();
    let second =
        currencies_from_api(&response, InvalidRecordPolicy::Skip, &mut skipped_second).unwrap();

    assert_eq!(first, second);
    assert_eq!(skipped_first, skipped_second);
}

#[test]
fn test_rate_rebasing_is_repeatable() {
    let mut rng = StdRng::seed_from_u64(99);
    let rates: BTreeMap<String, Decimal> = CURRENCIES
        .iter()
        .map(|code| {
            let quote: u32 = rng.gen_range(1..=200_000);
            (
                code.to_string(),
                Decimal::from_str(&format!("{}.{:04}", quote / 10_000, quote % 10_000)).unwrap(),
            )
        })
        .collect();

    let response = RatesResponse {
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        base: "EUR".to_string(),
        rates,
    };
    let base = CurrencyCode::new("NOK").unwrap();

    let mut skipped_first = 0;
    let mut skipped_second = 0;
    let first =
        rebase_rates(&response, &base, InvalidRecordPolicy::Skip, &mut skipped_first).unwrap();
    let second =
        rebase_rates(&response, &base, InvalidRecordPolicy::Skip, &mut skipped_second).unwrap();

    assert_eq!(first, second);
    assert_eq!(skipped_first, skipped_second);
}
