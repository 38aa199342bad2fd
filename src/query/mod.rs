//! Template variable query classification.
//!
//! Parses the raw variable query string into exactly one of the four
//! supported query forms, so the dispatcher can match exhaustively
//! instead of relying on ordered fallthrough.

mod classifier;

pub use classifier::classify;

use std::fmt;

/// The four recognized template variable query forms.
///
/// Classification is total: every input string maps to exactly one
/// variant, with [`VariableQuery::MetricNameAndLabels`] as the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableQuery {
    /// `label_values(label)` or `label_values(metric, label)`.
    LabelValues {
        label: String,
        /// Series selector constraining the lookup; `None` means all
        /// values of the label globally.
        metric: Option<String>,
    },
    /// `metrics(pattern)` — regular expression over metric names.
    MetricNames { pattern: String },
    /// `query_result(expr)` — expression evaluated at a single instant.
    QueryResult { expr: String },
    /// Fallback: the whole input treated as a series selector.
    MetricNameAndLabels { selector: String },
}

impl VariableQuery {
    /// Returns the query form as a string for display purposes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LabelValues { .. } => "label_values",
            Self::MetricNames { .. } => "metrics",
            Self::QueryResult { .. } => "query_result",
            Self::MetricNameAndLabels { .. } => "series_selector",
        }
    }
}

impl fmt::Display for VariableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelValues {
                label,
                metric: Some(metric),
            } => write!(f, "label_values({metric}, {label})"),
            Self::LabelValues {
                label,
                metric: None,
            } => write!(f, "label_values({label})"),
            Self::MetricNames { pattern } => write!(f, "metrics({pattern})"),
            Self::QueryResult { expr } => write!(f, "query_result({expr})"),
            Self::MetricNameAndLabels { selector } => write!(f, "{selector}"),
        }
    }
}
