//! Domain error types
//!
//! This module defines the error hierarchy for Kurs. All errors are
//! domain-specific and don't expose third-party types. Each variant maps to
//! a distinct process exit code so operators can tell configuration,
//! connection, schema, transformation and load failures apart.

use thiserror::Error;

/// Main Kurs error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum KursError {
    /// Configuration-related errors (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database unreachable, credentials rejected, or database missing
    #[error("Connection error: {0}")]
    Connection(String),

    /// Teardown or creation of a schema object failed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Rates API errors
    #[error("Rates API error: {0}")]
    RatesApi(#[from] RatesApiError),

    /// Batch source errors (unreadable directory or CSV file)
    #[error("Batch source error: {0}")]
    Source(String),

    /// A source record cannot be mapped to a target row
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// Write or commit failure; the affected transaction is rolled back
    #[error("Load error: {0}")]
    Load(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl KursError {
    /// Process exit code for this error.
    ///
    /// `0` is reserved for a completed run; every error is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            KursError::Configuration(_) => 2,
            KursError::Connection(_) => 3,
            KursError::Schema(_) => 4,
            KursError::Transformation(_) => 5,
            KursError::Load(_) => 6,
            KursError::RatesApi(_) | KursError::Source(_) => 7,
            KursError::Io(_) | KursError::Other(_) => 1,
        }
    }
}

/// Rates API specific errors
///
/// Errors that occur when talking to the exchange-rate service. These
/// don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum RatesApiError {
    /// Failed to reach the rates API
    #[error("failed to reach rates API: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status
    #[error("rates API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("invalid response from rates API: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for KursError {
    fn from(err: std::io::Error) -> Self {
        KursError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KursError {
    fn from(err: toml::de::Error) -> Self {
        KursError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for KursError {
    fn from(err: csv::Error) -> Self {
        KursError::Source(err.to_string())
    }
}
