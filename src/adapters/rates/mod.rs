//! Exchange-rate service integration

pub mod client;
pub mod models;

pub use client::RatesApiClient;
pub use models::{CurrenciesResponse, CurrencyInfo, RatesResponse};
