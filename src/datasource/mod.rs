//! Datasource abstraction for the Prometheus metadata API.
//!
//! Provides a trait-based capability interface so the resolver can run
//! against a real HTTP datasource or an in-memory mock interchangeably.

mod http;
mod mock;
mod types;

pub use http::{HttpDatasource, HttpDatasourceConfig};
pub use mock::{FailingDatasource, MockDatasource};
pub use types::{
    display_name, InstantQueryData, InstantQueryResponse, LabelSet, MetadataResponse,
    SeriesSample, TimeRange, METRIC_NAME_LABEL,
};

use crate::error::Result;
use async_trait::async_trait;
use std::time::SystemTime;

/// The capability interface the resolver consumes.
///
/// Exactly four operations: generic metadata fetch, instant evaluation,
/// time-bound resolution, and canonical display-name reconstruction.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait PrometheusDatasource: Send + Sync {
    /// Fetches a metadata endpoint (label values, metric names, series).
    ///
    /// `path` is the endpoint path including any query string, e.g.
    /// `/api/v1/label/job/values`.
    async fn metadata_request(&self, path: &str) -> Result<MetadataResponse>;

    /// Evaluates `expr` at the instant `time` (unix seconds).
    async fn instant_query(&self, expr: &str, time: i64) -> Result<InstantQueryResponse>;

    /// Resolves an instant to a request-ready unix timestamp in seconds.
    ///
    /// With `round_up` set, rounds up to the next whole second so the
    /// queried window fully covers the displayed range; otherwise rounds
    /// down.
    fn prometheus_time(&self, instant: SystemTime, round_up: bool) -> i64;

    /// Reconstructs the canonical display name for a series label set.
    fn original_metric_name(&self, labels: &LabelSet) -> String;
}
