//! PostgreSQL integration
//!
//! - [`client`] - connection pool construction and the single-attempt probe
//! - [`schema`] - the schema object catalog plus teardown/ensure lifecycle
//! - [`writer`] - transactional per-table upsert loads

pub mod client;
pub mod schema;
pub mod writer;

pub use client::PgClient;
pub use schema::{SchemaManager, SchemaObject, SchemaObjectKind, CATALOG};
pub use writer::PgWriter;
