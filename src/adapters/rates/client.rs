//! Rates API client
//!
//! Thin HTTP client for the exchange-rate service (vatcomply-style API:
//! `/currencies` and `/rates?date=YYYY-MM-DD`). One attempt per request,
//! no retry: the job is re-run externally on failure.

use crate::adapters::rates::models::{CurrenciesResponse, RatesResponse};
use crate::config::RatesApiConfig;
use crate::domain::{KursError, RatesApiError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the exchange-rate service
pub struct RatesApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl RatesApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `KursError::Configuration` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &RatesApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| KursError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch all supported currencies
    pub async fn currencies(&self) -> std::result::Result<CurrenciesResponse, RatesApiError> {
        self.get_json("/currencies", &[]).await
    }

    /// Fetch historical exchange rates for one date (EUR base)
    pub async fn historical_rates(
        &self,
        date: NaiveDate,
    ) -> std::result::Result<RatesResponse, RatesApiError> {
        self.get_json("/rates", &[("date", date.format("%Y-%m-%d").to_string())])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, RatesApiError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(url = %url, "Requesting rates API");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RatesApiError::Timeout(url.clone())
                } else {
                    RatesApiError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RatesApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RatesApiError::InvalidResponse(e.to_string()))
    }
}
