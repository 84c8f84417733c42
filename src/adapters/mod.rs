//! External system integrations for Kurs.
//!
//! This module provides adapters for the systems the pipeline talks to:
//!
//! - [`postgres`] - the target database: pool, schema lifecycle, writers
//! - [`rates`] - the exchange-rate HTTP API (currencies and historical
//!   quotes)
//! - [`batch`] - the CSV batch file source
//!
//! Adapters isolate external dependencies: nothing outside this module
//! touches `tokio_postgres`, `reqwest`, or `csv` types directly.

pub mod batch;
pub mod postgres;
pub mod rates;
