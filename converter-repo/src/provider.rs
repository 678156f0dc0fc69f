//! HTTP adapter for the upstream rate provider.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use converter_types::{ProviderError, RateProvider, RateTable};

use crate::config::ProviderConfig;

/// Public endpoint returning a JSON object of currency code to rate.
pub const DEFAULT_RATES_URL: &str = "https://api.skypicker.com/rates";

/// Rate provider backed by a single HTTP GET.
///
/// No retries: a failed request surfaces as a `ProviderError` right away.
pub struct HttpRateProvider {
    url: String,
    http: Client,
}

impl HttpRateProvider {
    /// Creates a provider with a default HTTP client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }

    /// Creates a provider whose requests time out after `config.timeout`.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            url: config.url.clone(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<RateTable, ProviderError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Rate provider refused the request");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let table: RateTable = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidPayload(e.to_string()))?;

        debug!(currencies = table.len(), "Fetched rate table");
        Ok(table)
    }
}
