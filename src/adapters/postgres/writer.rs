//! Transactional table writers
//!
//! One transaction per table load: every row set is written inside a
//! single transaction that either commits fully or rolls back on the first
//! failure, so a table is never left partially written. Rows are upserted
//! on the table's key, matching re-runs without reinit.

use crate::adapters::postgres::client::PgClient;
use crate::domain::{ConversionRate, Currency, ItemPrice, KursError, Result};

const UPSERT_CURRENCY: &str = r#"
INSERT INTO currency.currencies (currency_code, name, symbol)
VALUES ($1, $2, $3)
ON CONFLICT (currency_code) DO UPDATE SET
    name = EXCLUDED.name,
    symbol = EXCLUDED.symbol
"#;

const UPSERT_RATE: &str = r#"
INSERT INTO currency.currency_conversion_rate (date, base_currency_code, target_currency_code, rate)
VALUES ($1, $2, $3, $4)
ON CONFLICT (date, base_currency_code, target_currency_code) DO UPDATE SET
    rate = EXCLUDED.rate
"#;

const UPSERT_ITEM_PRICE: &str = r#"
INSERT INTO public.item_prices (id, item, price, currency, created_at, updated_at, system_timestamp)
VALUES ($1, $2, $3, $4, $5, $6, $7)
ON CONFLICT (id) DO UPDATE SET
    item = EXCLUDED.item,
    price = EXCLUDED.price,
    currency = EXCLUDED.currency,
    created_at = EXCLUDED.created_at,
    updated_at = EXCLUDED.updated_at,
    system_timestamp = EXCLUDED.system_timestamp
"#;

/// Writes target rows into their tables
pub struct PgWriter<'a> {
    client: &'a PgClient,
    dry_run: bool,
}

impl<'a> PgWriter<'a> {
    pub fn new(client: &'a PgClient, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Upsert currency rows into `currency.currencies`
    ///
    /// # Errors
    ///
    /// Returns `KursError::Load` on any write or commit failure; the
    /// transaction is rolled back and the table left untouched.
    pub async fn load_currencies(&self, rows: &[Currency]) -> Result<u64> {
        if self.dry_run {
            tracing::info!(
                count = rows.len(),
                "DRY RUN: would upsert rows into currency.currencies"
            );
            return Ok(rows.len() as u64);
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.get().await?;
        let tx = conn.transaction().await.map_err(load_err)?;
        let stmt = tx.prepare(UPSERT_CURRENCY).await.map_err(load_err)?;

        let mut affected = 0;
        for row in rows {
            affected += tx
                .execute(&stmt, &[&row.code.as_str(), &row.name, &row.symbol])
                .await
                .map_err(|e| {
                    KursError::Load(format!("upsert of currency {} failed: {e}", row.code))
                })?;
        }
        tx.commit().await.map_err(load_err)?;

        tracing::info!(rows = affected, "Loaded currency.currencies");
        Ok(affected)
    }

    /// Upsert conversion-rate rows into `currency.currency_conversion_rate`
    ///
    /// # Errors
    ///
    /// Returns `KursError::Load` on any write or commit failure.
    pub async fn load_rates(&self, rows: &[ConversionRate]) -> Result<u64> {
        if self.dry_run {
            tracing::info!(
                count = rows.len(),
                "DRY RUN: would upsert rows into currency.currency_conversion_rate"
            );
            return Ok(rows.len() as u64);
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.get().await?;
        let tx = conn.transaction().await.map_err(load_err)?;
        let stmt = tx.prepare(UPSERT_RATE).await.map_err(load_err)?;

        let mut affected = 0;
        for row in rows {
            affected += tx
                .execute(
                    &stmt,
                    &[
                        &row.date,
                        &row.base.as_str(),
                        &row.target.as_str(),
                        &row.rate,
                    ],
                )
                .await
                .map_err(|e| {
                    KursError::Load(format!(
                        "upsert of rate {}/{} on {} failed: {e}",
                        row.base, row.target, row.date
                    ))
                })?;
        }
        tx.commit().await.map_err(load_err)?;

        tracing::info!(rows = affected, "Loaded currency.currency_conversion_rate");
        Ok(affected)
    }

    /// Upsert item-price rows into `public.item_prices`
    ///
    /// # Errors
    ///
    /// Returns `KursError::Load` on any write or commit failure.
    pub async fn load_item_prices(&self, rows: &[ItemPrice]) -> Result<u64> {
        if self.dry_run {
            tracing::info!(
                count = rows.len(),
                "DRY RUN: would upsert rows into public.item_prices"
            );
            return Ok(rows.len() as u64);
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.get().await?;
        let tx = conn.transaction().await.map_err(load_err)?;
        let stmt = tx.prepare(UPSERT_ITEM_PRICE).await.map_err(load_err)?;

        let mut affected = 0;
        for row in rows {
            affected += tx
                .execute(
                    &stmt,
                    &[
                        &row.id,
                        &row.item,
                        &row.price,
                        &row.currency.as_str(),
                        &row.created_at,
                        &row.updated_at,
                        &row.system_timestamp,
                    ],
                )
                .await
                .map_err(|e| {
                    KursError::Load(format!("upsert of item price {} failed: {e}", row.id))
                })?;
        }
        tx.commit().await.map_err(load_err)?;

        tracing::info!(rows = affected, "Loaded public.item_prices");
        Ok(affected)
    }
}

fn load_err(e: tokio_postgres::Error) -> KursError {
    KursError::Load(e.to_string())
}
