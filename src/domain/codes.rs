//! Currency code newtype with validation
//!
//! ISO 4217 alphabetic codes are exactly three ASCII letters. The target
//! tables key on `VARCHAR(3)` columns, so anything else is rejected before
//! it reaches a write.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency code newtype wrapper
///
/// Stored normalized to uppercase so `"usd"` and `"USD"` compare equal.
///
/// # Examples
///
/// ```
/// use kurs::domain::codes::CurrencyCode;
/// use std::str::FromStr;
///
/// let code = CurrencyCode::from_str("nok").unwrap();
/// assert_eq!(code.as_str(), "NOK");
/// assert!(CurrencyCode::from_str("NOKK").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a new CurrencyCode from a string
    ///
    /// # Errors
    ///
    /// Returns `Err` if the code is not exactly three ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!(
                "invalid currency code '{code}': expected exactly 3 ASCII letters"
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
