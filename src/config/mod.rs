//! Configuration management for Kurs.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}`), environment overrides, and validation on load. The
//! connection parameters use the plain `DB_*` environment names so the
//! containerized and local workflows share one code path; a missing config
//! file is acceptable when the environment supplies everything.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! host = "localhost"
//! port = 5432
//! user = "kurs"
//! password = "${DB_PASSWORD}"
//! dbname = "kurs_db"
//!
//! [rates]
//! base_url = "https://api.vatcomply.com"
//! base_currency = "NOK"
//!
//! [batches]
//! dir = "batch_data"
//!
//! [load]
//! reinit = false
//! on_invalid = "skip"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kurs::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("kurs.toml")?;
//! println!("Loading into {}", config.database.safe_display());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BatchSourceConfig, DatabaseConfig, InvalidRecordPolicy, KursConfig,
    LoadConfig, LoggingConfig, RatesApiConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
