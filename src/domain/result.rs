//! Result type alias for Kurs

use super::errors::KursError;

/// Result type alias for Kurs operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use kurs::domain::result::Result;
/// use kurs::domain::errors::KursError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KursError::Configuration("missing field".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KursError>;
