//! Failure propagation through `process()`.

use promfind::datasource::{FailingDatasource, MockDatasource, TimeRange};
use promfind::error::FindQueryError;
use promfind::find::MetricFindQuery;
use serde_json::json;
use std::time::{Duration, SystemTime};

fn test_range() -> TimeRange {
    let from = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    TimeRange::new(from, from + Duration::from_secs(3600))
}

#[tokio::test]
async fn test_transport_failure_propagates_unchanged() {
    let ds = FailingDatasource::new("connection refused");
    let find = MetricFindQuery::new(&ds, test_range());

    for query in [
        "label_values(job)",
        "label_values(up, job)",
        "metrics(.*)",
        "query_result(up)",
        "up{job=\"api\"}",
    ] {
        let err = find.process(query).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transport error: connection refused",
            "query {query:?} should propagate the transport failure"
        );
    }
}

#[tokio::test]
async fn test_invalid_metrics_pattern_is_a_pattern_error() {
    let ds = FailingDatasource::default();
    let find = MetricFindQuery::new(&ds, test_range());

    // Pattern compilation fails before any request is issued, so the
    // failing datasource is never reached.
    let err = find.process("metrics((unclosed)").await.unwrap_err();
    assert!(matches!(err, FindQueryError::Pattern(_)));
}

#[tokio::test]
async fn test_wrong_payload_shape_is_a_datasource_error() {
    // Label values endpoint answering with series objects instead of strings.
    let ds = MockDatasource::new()
        .with_metadata("/api/v1/label/job/values", json!([{"job": "api"}]));
    let find = MetricFindQuery::new(&ds, test_range());

    let err = find.process("label_values(job)").await.unwrap_err();
    assert!(matches!(err, FindQueryError::Datasource(_)));
}
