// Kurs - currency and price batch loader for PostgreSQL
// Copyright (c) 2025 Kurs Contributors
// Licensed under the MIT License

//! # Kurs - currency and price batch loader
//!
//! Kurs is a single-run batch job that loads currency reference data and
//! item prices into PostgreSQL. It fetches supported currencies and
//! historical exchange rates from a vatcomply-style API, reads ordered CSV
//! batch files of item prices, re-bases every quote to a configurable base
//! currency (NOK by default), and upserts the result into a small
//! relational schema with an on-demand NOK price view.
//!
//! ## Overview
//!
//! One invocation performs one pass:
//!
//! - **Connect** to the target database (single attempt, fail-fast)
//! - **Reinitialize** the schema first when the reinit flag is set, or
//!   apply in place when it is not
//! - **Transform** source records deterministically into target rows
//! - **Load** each table inside its own transaction, then exit with a
//!   status code reflecting success or the failure category
//!
//! ## Architecture
//!
//! Kurs follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (pipeline orchestration, transformation)
//! - [`adapters`] - External integrations (PostgreSQL, rates API, CSV
//!   batches)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kurs::config::load_config;
//! use kurs::core::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("kurs.toml")?;
//!     let summary = Pipeline::new(config).run().await?;
//!     println!("Loaded {} item prices", summary.price_rows_loaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::KursError`], and every error
//! category maps to a distinct process exit code:
//!
//! ```rust
//! use kurs::domain::KursError;
//!
//! let err = KursError::Configuration("DB_NAME is empty".to_string());
//! assert_eq!(err.exit_code(), 2);
//! ```
//!
//! ## Logging
//!
//! Kurs uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(rows = 42, "Loaded currency.currencies");
//! warn!(reason = "bad currency code", "Skipping invalid source record");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
