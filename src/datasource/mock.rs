//! Mock datasources for testing.
//!
//! Provide canned responses (or canned failures) without a running
//! Prometheus server.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::SystemTime;

use crate::datasource::http::unix_seconds;
use crate::datasource::types::{
    display_name, InstantQueryData, InstantQueryResponse, LabelSet, MetadataResponse, SeriesSample,
};
use crate::datasource::PrometheusDatasource;
use crate::error::{FindQueryError, Result};

/// A mock datasource that returns predefined responses keyed by path.
#[derive(Debug, Default)]
pub struct MockDatasource {
    /// Canned metadata payloads (endpoint path -> `data` payload).
    metadata: HashMap<String, serde_json::Value>,
    /// Canned instant query result vector.
    instant_results: Vec<SeriesSample>,
    /// Paths requested so far, for assertions on request construction.
    requested: Mutex<Vec<String>>,
}

impl MockDatasource {
    /// Creates a new mock datasource with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canned metadata payload for the given endpoint path.
    pub fn with_metadata(mut self, path: impl Into<String>, data: serde_json::Value) -> Self {
        self.metadata.insert(path.into(), data);
        self
    }

    /// Sets the canned instant query result vector.
    pub fn with_instant_results(mut self, results: Vec<SeriesSample>) -> Self {
        self.instant_results = results;
        self
    }

    /// Returns the endpoint paths requested so far, in order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requested.lock().expect("mock lock poisoned").clone()
    }

    fn record(&self, path: &str) {
        self.requested
            .lock()
            .expect("mock lock poisoned")
            .push(path.to_string());
    }
}

#[async_trait]
impl PrometheusDatasource for MockDatasource {
    async fn metadata_request(&self, path: &str) -> Result<MetadataResponse> {
        self.record(path);
        match self.metadata.get(path) {
            Some(data) => Ok(MetadataResponse {
                status: "success".to_string(),
                data: data.clone(),
            }),
            None => Err(FindQueryError::datasource(format!(
                "no canned response for path {path:?}"
            ))),
        }
    }

    async fn instant_query(&self, expr: &str, time: i64) -> Result<InstantQueryResponse> {
        self.record(&format!("/api/v1/query?query={expr}&time={time}"));
        Ok(InstantQueryResponse {
            status: "success".to_string(),
            data: InstantQueryData {
                result_type: "vector".to_string(),
                result: self.instant_results.clone(),
            },
        })
    }

    fn prometheus_time(&self, instant: SystemTime, round_up: bool) -> i64 {
        unix_seconds(instant, round_up)
    }

    fn original_metric_name(&self, labels: &LabelSet) -> String {
        display_name(labels)
    }
}

/// A datasource whose every request fails, for error propagation tests.
#[derive(Debug, Clone)]
pub struct FailingDatasource {
    message: String,
}

impl FailingDatasource {
    /// Creates a failing datasource that rejects with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingDatasource {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl PrometheusDatasource for FailingDatasource {
    async fn metadata_request(&self, _path: &str) -> Result<MetadataResponse> {
        Err(FindQueryError::transport(self.message.clone()))
    }

    async fn instant_query(&self, _expr: &str, _time: i64) -> Result<InstantQueryResponse> {
        Err(FindQueryError::transport(self.message.clone()))
    }

    fn prometheus_time(&self, instant: SystemTime, round_up: bool) -> i64 {
        unix_seconds(instant, round_up)
    }

    fn original_metric_name(&self, labels: &LabelSet) -> String {
        display_name(labels)
    }
}
