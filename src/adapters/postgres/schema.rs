//! Schema object catalog and lifecycle
//!
//! Every schema object the pipeline owns is listed once, in creation
//! dependency order (schemas, then tables, then views). Teardown walks the
//! same list in reverse. The ordering is data, not statement sequence, so
//! it can be asserted in tests.

use crate::adapters::postgres::client::PgClient;
use crate::domain::{KursError, Result};

/// Kind of a managed schema object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaObjectKind {
    Schema,
    Table,
    View,
}

/// One named database object owned by the pipeline
///
/// `create_sql` must be idempotent (`IF NOT EXISTS` / `OR REPLACE`) and
/// `drop_sql` must tolerate absence (`IF EXISTS`): a re-run without
/// teardown must not fail, and teardown of a fresh database drops nothing.
#[derive(Debug, Clone, Copy)]
pub struct SchemaObject {
    pub kind: SchemaObjectKind,
    /// Qualified name, unique across all kinds
    pub name: &'static str,
    pub create_sql: &'static str,
    pub drop_sql: &'static str,
}

const CREATE_CURRENCY_SCHEMA: &str = "CREATE SCHEMA IF NOT EXISTS currency";

const CREATE_CURRENCIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS currency.currencies (
    currency_code  VARCHAR(3) PRIMARY KEY,
    name           VARCHAR(100) NOT NULL,
    symbol         VARCHAR(10)
)
"#;

const CREATE_CONVERSION_RATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS currency.currency_conversion_rate (
    date                 DATE NOT NULL,
    base_currency_code   VARCHAR(3) NOT NULL,
    target_currency_code VARCHAR(3) NOT NULL,
    rate                 NUMERIC(20,10) NOT NULL,

    PRIMARY KEY (date, base_currency_code, target_currency_code),

    FOREIGN KEY (base_currency_code) REFERENCES currency.currencies(currency_code),
    FOREIGN KEY (target_currency_code) REFERENCES currency.currencies(currency_code)
)
"#;

const CREATE_ITEM_PRICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS public.item_prices (
    id               VARCHAR(100) PRIMARY KEY,
    item             VARCHAR(100),
    price            NUMERIC(5,2),
    currency         VARCHAR(3),
    created_at       TIMESTAMPTZ,
    updated_at       TIMESTAMPTZ,
    system_timestamp TIMESTAMPTZ,

    FOREIGN KEY (currency) REFERENCES currency.currencies(currency_code)
)
"#;

// Picks the most recent quote on or before the price's update date.
const CREATE_ITEM_PRICES_NOK_VIEW: &str = r#"
CREATE OR REPLACE VIEW public.item_prices_nok AS
SELECT p.id,
       p.item,
       p.price / cc.rate AS price,
       'NOK' AS currency,
       p.created_at,
       p.updated_at,
       p.system_timestamp
FROM public.item_prices AS p
LEFT JOIN LATERAL (
    SELECT c.rate
    FROM currency.currency_conversion_rate AS c
    WHERE c.date <= date(p.updated_at)
      AND c.target_currency_code = p.currency
    ORDER BY c.date DESC
    LIMIT 1
) AS cc ON TRUE
"#;

/// All schema objects in creation dependency order.
///
/// The `public` schema is PostgreSQL's default and is not listed; the
/// pipeline never creates or drops it.
pub const CATALOG: &[SchemaObject] = &[
    SchemaObject {
        kind: SchemaObjectKind::Schema,
        name: "currency",
        create_sql: CREATE_CURRENCY_SCHEMA,
        drop_sql: "DROP SCHEMA IF EXISTS currency CASCADE",
    },
    SchemaObject {
        kind: SchemaObjectKind::Table,
        name: "currency.currencies",
        create_sql: CREATE_CURRENCIES_TABLE,
        drop_sql: "DROP TABLE IF EXISTS currency.currencies",
    },
    SchemaObject {
        kind: SchemaObjectKind::Table,
        name: "currency.currency_conversion_rate",
        create_sql: CREATE_CONVERSION_RATE_TABLE,
        drop_sql: "DROP TABLE IF EXISTS currency.currency_conversion_rate",
    },
    SchemaObject {
        kind: SchemaObjectKind::Table,
        name: "public.item_prices",
        create_sql: CREATE_ITEM_PRICES_TABLE,
        drop_sql: "DROP TABLE IF EXISTS public.item_prices",
    },
    SchemaObject {
        kind: SchemaObjectKind::View,
        name: "public.item_prices_nok",
        create_sql: CREATE_ITEM_PRICES_NOK_VIEW,
        drop_sql: "DROP VIEW IF EXISTS public.item_prices_nok",
    },
];

/// Drives teardown and creation of the cataloged objects
pub struct SchemaManager<'a> {
    client: &'a PgClient,
}

impl<'a> SchemaManager<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    /// Drop every cataloged object, views before tables before schemas
    ///
    /// Idempotent: absent objects are not an error, so this works against
    /// a fresh database.
    ///
    /// # Errors
    ///
    /// Returns `KursError::Schema` on the first drop that fails.
    pub async fn teardown(&self) -> Result<()> {
        let conn = self.client.get().await?;

        for object in CATALOG.iter().rev() {
            tracing::info!(
                kind = ?object.kind,
                name = object.name,
                "Dropping schema object"
            );
            conn.batch_execute(object.drop_sql).await.map_err(|e| {
                KursError::Schema(format!("Failed to drop {}: {e}", object.name))
            })?;
        }

        tracing::info!("Schema teardown complete");
        Ok(())
    }

    /// Create every cataloged object, schemas before tables before views
    ///
    /// Idempotent: re-running without an intervening teardown must not
    /// fail merely because objects already exist.
    ///
    /// # Errors
    ///
    /// Returns `KursError::Schema` on the first creation that fails.
    pub async fn ensure(&self) -> Result<()> {
        let conn = self.client.get().await?;

        for object in CATALOG.iter() {
            tracing::debug!(
                kind = ?object.kind,
                name = object.name,
                "Ensuring schema object"
            );
            conn.batch_execute(object.create_sql).await.map_err(|e| {
                KursError::Schema(format!("Failed to create {}: {e}", object.name))
            })?;
        }

        tracing::info!(objects = CATALOG.len(), "Schema objects ensured");
        Ok(())
    }
}
