//! Wire types shared by datasource implementations and the resolver.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Reserved label carrying the metric name in a Prometheus label set.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// An insertion-ordered label set, as returned by the series and query
/// endpoints. serde_json's preserve_order feature keeps the API's label
/// order, which the display formatting depends on.
pub type LabelSet = serde_json::Map<String, serde_json::Value>;

/// The dashboard time range the resolver operates over.
///
/// Externally owned and read-only for the resolver; boundary resolution to
/// request timestamps is delegated to the datasource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub from: SystemTime,
    pub to: SystemTime,
}

impl TimeRange {
    /// Creates a time range from explicit endpoints.
    pub fn new(from: SystemTime, to: SystemTime) -> Self {
        Self { from, to }
    }

    /// Creates a range covering the trailing `window` up to now.
    pub fn last(window: Duration) -> Self {
        let to = SystemTime::now();
        Self {
            from: to.checked_sub(window).unwrap_or(SystemTime::UNIX_EPOCH),
            to,
        }
    }
}

/// The generic Prometheus response envelope for metadata endpoints.
///
/// `data` stays raw JSON: its shape depends on the endpoint (an array of
/// strings for label values, an array of label sets for series).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataResponse {
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Response envelope for the instant query endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstantQueryResponse {
    pub status: String,
    pub data: InstantQueryData,
}

/// The `data` payload of an instant query response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstantQueryData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<SeriesSample>,
}

/// One time series sample from an instant query.
///
/// `value.0` is the sample time in seconds, `value.1` the sample value as
/// text, matching the wire format.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeriesSample {
    pub metric: LabelSet,
    pub value: (f64, String),
}

/// Renders a label set as its canonical display name: the `__name__` label
/// (empty string if absent) followed by `{k="v",...}` over the remaining
/// labels in their original order. Embedded quotes are not escaped.
pub fn display_name(labels: &LabelSet) -> String {
    let name = labels
        .get(METRIC_NAME_LABEL)
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let label_part = labels
        .iter()
        .filter(|(k, _)| k.as_str() != METRIC_NAME_LABEL)
        .map(|(k, v)| format!("{k}=\"{}\"", v.as_str().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(",");

    format!("{name}{{{label_part}}}")
}
