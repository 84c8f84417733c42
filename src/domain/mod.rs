//! Domain models and types for Kurs.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Strongly-typed codes** ([`CurrencyCode`]) — the newtype pattern keeps
//!   raw strings out of table keys
//! - **Target rows** ([`Currency`], [`ConversionRate`], [`ItemPrice`]) —
//!   one struct per target table
//! - **Error types** ([`KursError`], [`RatesApiError`]) with exit-code
//!   mapping
//! - **Result type alias** ([`Result`])

pub mod codes;
pub mod errors;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use codes::CurrencyCode;
pub use errors::{KursError, RatesApiError};
pub use records::{ConversionRate, Currency, ItemPrice};
pub use result::Result;
