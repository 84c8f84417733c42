//! Configuration schema types
//!
//! This module defines the configuration structure for Kurs. Every section
//! has defaults so a missing `kurs.toml` is acceptable when the environment
//! supplies the required values; validation runs after overrides are
//! applied and rejects anything a run could not proceed with.

use crate::config::secret::{secret_string, SecretString};
use crate::domain::codes::CurrencyCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Policy for source records that fail validation or type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Skip the record and keep a count for the run summary
    #[default]
    Skip,
    /// Abort the run on the first invalid record
    Abort,
}

/// Main Kurs configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KursConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Target database connection parameters
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Exchange-rate API settings
    #[serde(default)]
    pub rates: RatesApiConfig,

    /// CSV batch source settings
    #[serde(default)]
    pub batches: BatchSourceConfig,

    /// Schema lifecycle and load behavior
    #[serde(default)]
    pub load: LoadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KursConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.database.validate()?;
        self.rates.validate()?;
        self.batches.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Target database connection parameters
///
/// Every field must be present and non-empty before a connection attempt;
/// absence is a configuration error, not a runtime one. The password is
/// held in a [`SecretString`] and never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    #[serde(default = "default_db_host")]
    pub host: String,

    /// Database port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database user
    #[serde(default)]
    pub user: String,

    /// Database password
    #[serde(default = "empty_secret")]
    pub password: SecretString,

    /// Database name
    #[serde(default)]
    pub dbname: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("database.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("database.port cannot be 0".to_string());
        }
        if self.user.is_empty() {
            return Err("database.user cannot be empty (set DB_USER)".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("database.password cannot be empty (set DB_PASSWORD)".to_string());
        }
        if self.dbname.is_empty() {
            return Err("database.dbname cannot be empty (set DB_NAME)".to_string());
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "database.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }
        Ok(())
    }

    /// Connection target without credentials, safe for logs
    pub fn safe_display(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.dbname)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: String::new(),
            password: empty_secret(),
            dbname: String::new(),
            max_connections: default_max_connections(),
            connection_timeout_seconds: default_connection_timeout_seconds(),
        }
    }
}

/// Exchange-rate API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesApiConfig {
    /// Base URL of the rates service
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,

    /// Currency every rate is re-based to
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl RatesApiConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("rates.base_url must start with http:// or https://".to_string());
        }
        CurrencyCode::new(self.base_currency.as_str())
            .map_err(|e| format!("rates.base_currency: {e}"))?;
        if self.timeout_seconds == 0 {
            return Err("rates.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for RatesApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_base_url(),
            base_currency: default_base_currency(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// CSV batch source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSourceConfig {
    /// Directory holding `batch<N>.csv` files
    #[serde(default = "default_batch_dir")]
    pub dir: String,
}

impl BatchSourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.is_empty() {
            return Err("batches.dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for BatchSourceConfig {
    fn default() -> Self {
        Self {
            dir: default_batch_dir(),
        }
    }
}

/// Schema lifecycle and load behavior
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoadConfig {
    /// Drop and recreate all schema objects before loading
    ///
    /// Fixed for the lifetime of one run; read exactly once, at startup.
    #[serde(default)]
    pub reinit: bool,

    /// What to do with source records that fail validation
    #[serde(default)]
    pub on_invalid: InvalidRecordPolicy,

    /// Simulate the load without writing to the database
    #[serde(default)]
    pub dry_run: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn empty_secret() -> SecretString {
    secret_string(String::new())
}

fn default_max_connections() -> usize {
    4
}

fn default_connection_timeout_seconds() -> u64 {
    30
}

fn default_rates_base_url() -> String {
    "https://api.vatcomply.com".to_string()
}

fn default_base_currency() -> String {
    "NOK".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_batch_dir() -> String {
    "batch_data".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
