//! The variable query grammar.
//!
//! Three anchored patterns tried in a fixed order (label_values, metrics,
//! query_result); anything else falls through to the series selector form.

use regex::Regex;
use std::sync::LazyLock;

use super::VariableQuery;

static LABEL_VALUES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^label_values\((?:(.+),\s*)?([a-zA-Z_][a-zA-Z0-9_]+)\)\s*$")
        .expect("label_values grammar regex is valid")
});

static METRIC_NAMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^metrics\((.+)\)\s*$").expect("metrics grammar regex is valid"));

static QUERY_RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^query_result\((.+)\)\s*$").expect("query_result grammar regex is valid")
});

/// Classifies a raw variable query string into its query form.
///
/// Grammars are checked in order; the first match wins. Inputs matching
/// none of them are returned whole as a series selector.
pub fn classify(raw: &str) -> VariableQuery {
    if let Some(caps) = LABEL_VALUES_RE.captures(raw) {
        return VariableQuery::LabelValues {
            label: caps[2].to_string(),
            metric: caps.get(1).map(|m| m.as_str().to_string()),
        };
    }

    if let Some(caps) = METRIC_NAMES_RE.captures(raw) {
        return VariableQuery::MetricNames {
            pattern: caps[1].to_string(),
        };
    }

    if let Some(caps) = QUERY_RESULT_RE.captures(raw) {
        return VariableQuery::QueryResult {
            expr: caps[1].to_string(),
        };
    }

    VariableQuery::MetricNameAndLabels {
        selector: raw.to_string(),
    }
}
