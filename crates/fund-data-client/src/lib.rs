//! HTTP client for the fund data provider.
//!
//! One `GET {base_url}/funds/{id}` per fund. The response body is either
//! `{ "data": <fund> }` or the fund record directly; both are accepted and
//! normalized into [`FundDetails`].

use std::time::Duration;

use async_trait::async_trait;
use fund_core::{AnalysisError, FundDataProvider, FundDetails};
use reqwest::Client;

pub mod normalizer;
pub use normalizer::{normalize, FundResponse, RawFundRecord};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct FundDataClient {
    base_url: String,
    client: Client,
}

impl FundDataClient {
    /// Build a client for the provider at `base_url`.
    ///
    /// Requests carry a bounded timeout (default 30s, override with
    /// FUND_API_TIMEOUT_SECS). No retries: a failed fetch surfaces
    /// immediately to the caller.
    pub fn new(base_url: impl Into<String>) -> Self {
        let timeout_secs: u64 = std::env::var("FUND_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch one fund's record and normalize it into the canonical shape.
    pub async fn get_fund_details(&self, fund_id: &str) -> Result<FundDetails, AnalysisError> {
        let url = format!("{}/funds/{}", self.base_url, fund_id);
        tracing::debug!("Fetching fund details: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body: FundResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        normalizer::normalize(body.into_record())
    }
}

#[async_trait]
impl FundDataProvider for FundDataClient {
    async fn fund_details(&self, fund_id: &str) -> Result<FundDetails, AnalysisError> {
        self.get_fund_details(fund_id).await
    }
}
