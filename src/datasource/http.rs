//! HTTP datasource implementation.
//!
//! Implements the PrometheusDatasource trait against a real Prometheus
//! (or API-compatible) server over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;
use url::Url;

use crate::datasource::types::{display_name, InstantQueryResponse, LabelSet, MetadataResponse};
use crate::datasource::PrometheusDatasource;
use crate::error::{FindQueryError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP datasource configuration.
#[derive(Debug, Clone)]
pub struct HttpDatasourceConfig {
    /// Base URL of the Prometheus server (e.g., "http://localhost:9090").
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpDatasourceConfig {
    /// Creates a new config with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Creates a config from environment variables.
    ///
    /// Reads `PROMETHEUS_URL` for the base URL.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PROMETHEUS_URL")
            .map_err(|_| FindQueryError::config("PROMETHEUS_URL environment variable not set"))?;
        Ok(Self::new(base_url))
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP datasource talking to a Prometheus server.
#[derive(Debug, Clone)]
pub struct HttpDatasource {
    base_url: String,
    client: Client,
}

impl HttpDatasource {
    /// Creates a new HTTP datasource with the given configuration.
    pub fn new(config: HttpDatasourceConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| FindQueryError::config(format!("Invalid base URL: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FindQueryError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Issues a GET request and decodes the JSON body as `T`.
    ///
    /// Paths carry their own query strings, so they are appended verbatim
    /// to the base URL rather than joined through Url.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "prometheus request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FindQueryError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FindQueryError::transport(format!(
                "Prometheus API error ({status}): {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FindQueryError::datasource(format!("Failed to decode response: {e}")))
    }
}

#[async_trait]
impl PrometheusDatasource for HttpDatasource {
    async fn metadata_request(&self, path: &str) -> Result<MetadataResponse> {
        let response: MetadataResponse = self.get_json(path).await?;
        if response.status != "success" {
            return Err(FindQueryError::datasource(format!(
                "metadata request returned status {:?}",
                response.status
            )));
        }
        Ok(response)
    }

    async fn instant_query(&self, expr: &str, time: i64) -> Result<InstantQueryResponse> {
        let query_string = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("query", expr)
            .append_pair("time", &time.to_string())
            .finish();

        let response: InstantQueryResponse =
            self.get_json(&format!("/api/v1/query?{query_string}")).await?;
        if response.status != "success" {
            return Err(FindQueryError::datasource(format!(
                "instant query returned status {:?}",
                response.status
            )));
        }
        Ok(response)
    }

    fn prometheus_time(&self, instant: SystemTime, round_up: bool) -> i64 {
        unix_seconds(instant, round_up)
    }

    fn original_metric_name(&self, labels: &LabelSet) -> String {
        display_name(labels)
    }
}

/// Converts an instant to whole unix seconds, rounding up or down.
pub(crate) fn unix_seconds(instant: SystemTime, round_up: bool) -> i64 {
    let since_epoch = instant.duration_since(UNIX_EPOCH).unwrap_or_default();
    let secs = since_epoch.as_secs() as i64;
    if round_up && since_epoch.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
