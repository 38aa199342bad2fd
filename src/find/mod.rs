//! Metric find query resolution.
//!
//! The single public entry point is [`MetricFindQuery::process`]: classify
//! the raw query, issue the one request the matched form needs, and reshape
//! the response into a uniform list of selectable entries.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::datasource::{display_name, LabelSet, PrometheusDatasource, TimeRange};
use crate::error::{FindQueryError, Result};
use crate::query::{classify, VariableQuery};

/// One selectable entry in a template variable dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
    /// True when the entry can be drilled into further. Global label
    /// listings are terminal and omit the flag on the wire.
    #[serde(default, skip_serializing_if = "is_false")]
    pub expandable: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl MetricFindValue {
    /// Creates a terminal (non-expandable) entry.
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expandable: false,
        }
    }

    /// Creates an expandable entry.
    pub fn expandable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expandable: true,
        }
    }
}

/// Resolves template variable queries against a Prometheus datasource.
///
/// Each invocation classifies its query, issues exactly one request, and
/// produces a fresh result list; invocations share no state.
pub struct MetricFindQuery<'a> {
    datasource: &'a dyn PrometheusDatasource,
    range: TimeRange,
}

impl<'a> MetricFindQuery<'a> {
    /// Creates a resolver over the given datasource and time range.
    pub fn new(datasource: &'a dyn PrometheusDatasource, range: TimeRange) -> Self {
        Self { datasource, range }
    }

    /// Resolves a raw variable query into its list of selectable entries.
    pub async fn process(&self, raw: &str) -> Result<Vec<MetricFindValue>> {
        match classify(raw) {
            VariableQuery::LabelValues { label, metric } => {
                self.label_values(&label, metric.as_deref()).await
            }
            VariableQuery::MetricNames { pattern } => self.metric_names(&pattern).await,
            VariableQuery::QueryResult { expr } => self.query_result(&expr).await,
            VariableQuery::MetricNameAndLabels { selector } => {
                self.metric_name_and_labels(&selector).await
            }
        }
    }

    /// `label_values(label)` / `label_values(metric, label)`.
    async fn label_values(
        &self,
        label: &str,
        metric: Option<&str>,
    ) -> Result<Vec<MetricFindValue>> {
        let Some(metric) = metric else {
            // All values of the label globally; these entries are terminal.
            let response = self
                .datasource
                .metadata_request(&format!("/api/v1/label/{label}/values"))
                .await?;
            let values = decode_payload::<Vec<String>>(response.data)?;
            return Ok(values.into_iter().map(MetricFindValue::terminal).collect());
        };

        let start = self.datasource.prometheus_time(self.range.from, false);
        let end = self.datasource.prometheus_time(self.range.to, true);
        let response = self
            .datasource
            .metadata_request(&series_path(metric, start, end))
            .await?;
        let series = decode_payload::<Vec<LabelSet>>(response.data)?;

        // Pull the label out of each series, dropping series without it and
        // deduplicating while preserving first-seen order.
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for labels in &series {
            let Some(value) = labels.get(label).and_then(|v| v.as_str()) else {
                continue;
            };
            if !value.is_empty() && seen.insert(value.to_string()) {
                values.push(MetricFindValue::expandable(value));
            }
        }
        Ok(values)
    }

    /// `metrics(pattern)`.
    async fn metric_names(&self, pattern: &str) -> Result<Vec<MetricFindValue>> {
        // Compiled once per invocation; an invalid pattern fails the whole
        // request before anything is fetched.
        let filter = Regex::new(pattern).map_err(|e| FindQueryError::pattern(e.to_string()))?;

        let response = self
            .datasource
            .metadata_request("/api/v1/label/__name__/values")
            .await?;
        let names = decode_payload::<Vec<String>>(response.data)?;

        Ok(names
            .into_iter()
            .filter(|name| filter.is_match(name))
            .map(MetricFindValue::expandable)
            .collect())
    }

    /// `query_result(expr)`.
    async fn query_result(&self, expr: &str) -> Result<Vec<MetricFindValue>> {
        let end = self.datasource.prometheus_time(self.range.to, true);
        let response = self.datasource.instant_query(expr, end).await?;

        Ok(response
            .data
            .result
            .iter()
            .map(|sample| {
                let text = format!(
                    "{} {} {}",
                    display_name(&sample.metric),
                    sample.value.1,
                    format_millis(sample.value.0 * 1000.0)
                );
                MetricFindValue::expandable(text)
            })
            .collect())
    }

    /// Fallback: the whole query as a series selector.
    async fn metric_name_and_labels(&self, selector: &str) -> Result<Vec<MetricFindValue>> {
        let start = self.datasource.prometheus_time(self.range.from, false);
        let end = self.datasource.prometheus_time(self.range.to, true);
        let response = self
            .datasource
            .metadata_request(&series_path(selector, start, end))
            .await?;
        let series = decode_payload::<Vec<LabelSet>>(response.data)?;

        Ok(series
            .iter()
            .map(|labels| {
                MetricFindValue::expandable(self.datasource.original_metric_name(labels))
            })
            .collect())
    }
}

/// Builds the series endpoint path for a selector over `[start, end]`.
fn series_path(selector: &str, start: i64, end: i64) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(selector.as_bytes()).collect();
    format!("/api/v1/series?match[]={encoded}&start={start}&end={end}")
}

/// Decodes a metadata `data` payload into the endpoint's expected shape.
fn decode_payload<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> Result<T> {
    serde_json::from_value(data)
        .map_err(|e| FindQueryError::datasource(format!("unexpected response shape: {e}")))
}

/// Formats a millisecond timestamp, printing integral values without a
/// fractional part (the API emits whole-second sample times in practice).
fn format_millis(millis: f64) -> String {
    if millis.fract() == 0.0 {
        format!("{}", millis as i64)
    } else {
        format!("{millis}")
    }
}
