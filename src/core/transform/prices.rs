//! Item price transformation
//!
//! Turns ordered CSV batches into `public.item_prices` rows. A monotone
//! checkpoint on `system_timestamp` skips rows that are not strictly newer
//! than the highest value already processed, so replayed batch content is
//! not re-upserted. The distinct `updated_at` dates of every parsed row
//! (including checkpoint-skipped ones) are collected for the rates fetch.

use crate::adapters::batch::{BatchFile, PriceRecord};
use crate::config::InvalidRecordPolicy;
use crate::domain::{CurrencyCode, ItemPrice, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Result of transforming all batches in one pass
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Rows to load, in batch order
    pub rows: Vec<ItemPrice>,

    /// Distinct `updated_at` dates across all parsed rows, ascending
    pub rate_dates: Vec<NaiveDate>,

    /// Rows skipped because they were not newer than the checkpoint
    pub checkpoint_skipped: usize,

    /// Rows skipped as invalid (only under the skip policy)
    pub invalid_skipped: usize,
}

/// Transform ordered batches into target rows
///
/// Single pass, deterministic. Batches must already be in ascending batch
/// order; the checkpoint depends on it.
///
/// # Errors
///
/// Returns `KursError::Transformation` for an invalid row when the policy
/// is `Abort`.
pub fn prices_from_batches(
    batches: &[BatchFile],
    policy: InvalidRecordPolicy,
) -> Result<BatchOutcome> {
    // DateTime::default() is the Unix epoch, so every real row passes
    let mut checkpoint = DateTime::<Utc>::default();
    let mut rows = Vec::new();
    let mut rate_dates = BTreeSet::new();
    let mut checkpoint_skipped = 0;
    let mut invalid_skipped = 0;

    for batch in batches {
        for (index, record) in batch.rows.iter().enumerate() {
            let row = match parse_record(record) {
                Ok(row) => row,
                Err(reason) => {
                    super::reject(
                        policy,
                        format!("{}, row {}: {reason}", batch.name, index + 2),
                        &mut invalid_skipped,
                    )?;
                    continue;
                }
            };

            rate_dates.insert(row.updated_at.date_naive());

            if row.system_timestamp > checkpoint {
                checkpoint = row.system_timestamp;
                rows.push(row);
            } else {
                checkpoint_skipped += 1;
            }
        }
        tracing::debug!(
            batch = %batch.name,
            checkpoint = %checkpoint,
            "Processed batch"
        );
    }

    Ok(BatchOutcome {
        rows,
        rate_dates: rate_dates.into_iter().collect(),
        checkpoint_skipped,
        invalid_skipped,
    })
}

fn parse_record(record: &PriceRecord) -> std::result::Result<ItemPrice, String> {
    if record.id.trim().is_empty() {
        return Err("id is empty".to_string());
    }

    let currency = CurrencyCode::new(record.currency.as_str())?;

    let price = Decimal::from_str(record.price.trim())
        .map_err(|e| format!("price '{}': {e}", record.price))?;

    let created_at = parse_timestamp(&record.created_at)
        .map_err(|e| format!("created_at: {e}"))?;
    let updated_at = parse_timestamp(&record.updated_at)
        .map_err(|e| format!("updated_at: {e}"))?;
    let system_timestamp = parse_timestamp(&record.system_timestamp)
        .map_err(|e| format!("system_timestamp: {e}"))?;

    Ok(ItemPrice {
        id: record.id.trim().to_string(),
        item: record.item.clone(),
        price,
        currency,
        created_at,
        updated_at,
        system_timestamp,
    })
}

/// Parse a timestamp, normalizing to UTC
///
/// Accepts RFC 3339, the space-separated variant with an offset, and a
/// naive datetime (assumed UTC).
fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(format!("unrecognized timestamp '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn record(id: &str, updated_at: &str, system_timestamp: &str) -> PriceRecord {
        PriceRecord {
            id: id.to_string(),
            item: "widget".to_string(),
            price: "19.99".to_string(),
            currency: "USD".to_string(),
            created_at: "2024-03-01T08:00:00Z".to_string(),
            updated_at: updated_at.to_string(),
            system_timestamp: system_timestamp.to_string(),
        }
    }

    fn batch(name: &str, rows: Vec<PriceRecord>) -> BatchFile {
        BatchFile {
            name: name.to_string(),
            rows,
        }
    }

    #[test_case("2024-03-01T08:30:00Z"; "rfc3339 zulu")]
    #[test_case("2024-03-01T08:30:00+00:00"; "rfc3339 offset")]
    #[test_case("2024-03-01 08:30:00+00:00"; "space separated with offset")]
    #[test_case("2024-03-01 08:30:00"; "naive assumed utc")]
    #[test_case("2024-03-01 08:30:00.123"; "naive with fraction")]
    fn test_parse_timestamp_formats(input: &str) {
        let parsed = parse_timestamp(input).unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_checkpoint_skips_stale_rows() {
        let batches = vec![
            batch(
                "batch1.csv",
                vec![
                    record("a", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z"),
                    record("b", "2024-03-01T11:00:00Z", "2024-03-01T11:00:00Z"),
                ],
            ),
            batch(
                "batch2.csv",
                vec![
                    // replayed content: not newer than the checkpoint
                    record("b", "2024-03-01T11:00:00Z", "2024-03-01T11:00:00Z"),
                    record("c", "2024-03-02T09:00:00Z", "2024-03-02T09:00:00Z"),
                ],
            ),
        ];

        let outcome = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();

        let ids: Vec<&str> = outcome.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(outcome.checkpoint_skipped, 1);
        assert_eq!(outcome.invalid_skipped, 0);
    }

    #[test]
    fn test_rate_dates_include_checkpoint_skipped_rows() {
        let batches = vec![
            batch(
                "batch1.csv",
                vec![record("a", "2024-03-05T10:00:00Z", "2024-03-05T10:00:00Z")],
            ),
            batch(
                "batch2.csv",
                vec![
                    // stale, but its date must still be collected
                    record("a", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z"),
                ],
            ),
        ];

        let outcome = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(
            outcome.rate_dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn test_rate_dates_are_sorted_and_unique() {
        let batches = vec![batch(
            "batch1.csv",
            vec![
                record("a", "2024-03-02T10:00:00Z", "2024-03-01T10:00:00Z"),
                record("b", "2024-03-01T10:00:00Z", "2024-03-01T11:00:00Z"),
                record("c", "2024-03-02T18:00:00Z", "2024-03-01T12:00:00Z"),
            ],
        )];

        let outcome = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();

        assert_eq!(
            outcome.rate_dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn test_invalid_row_is_skipped_and_counted() {
        let mut bad = record("d", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z");
        bad.price = "free".to_string();

        let batches = vec![batch(
            "batch1.csv",
            vec![
                record("a", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z"),
                bad,
            ],
        )];

        let outcome = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.invalid_skipped, 1);
    }

    #[test]
    fn test_invalid_row_aborts_under_strict_policy() {
        let mut bad = record("d", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z");
        bad.currency = "DOLLARS".to_string();

        let batches = vec![batch("batch1.csv", vec![bad])];

        let err = prices_from_batches(&batches, InvalidRecordPolicy::Abort).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("batch1.csv"));
        assert!(message.contains("currency"));
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let bad = record("  ", "2024-03-01T10:00:00Z", "2024-03-01T10:00:00Z");
        let batches = vec![batch("batch1.csv", vec![bad])];
        let outcome = prices_from_batches(&batches, InvalidRecordPolicy::Skip).unwrap();
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.invalid_skipped, 1);
    }
}
