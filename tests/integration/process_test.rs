//! End-to-end `process()` scenarios against the mock datasource.

use promfind::datasource::{MockDatasource, SeriesSample, TimeRange};
use promfind::find::{MetricFindQuery, MetricFindValue};
use serde_json::json;
use std::time::{Duration, SystemTime};

/// Fixed range: [1700000000, 1700003600] in unix seconds.
fn test_range() -> TimeRange {
    let from = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    TimeRange::new(from, from + Duration::from_secs(3600))
}

fn sample(metric: serde_json::Value, value: (f64, &str)) -> SeriesSample {
    serde_json::from_value(json!({ "metric": metric, "value": [value.0, value.1] })).unwrap()
}

#[tokio::test]
async fn test_global_label_values() {
    let ds = MockDatasource::new()
        .with_metadata("/api/v1/label/node/values", json!(["host1", "host2"]));
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("label_values(node)").await.unwrap();

    assert_eq!(
        values,
        vec![
            MetricFindValue::terminal("host1"),
            MetricFindValue::terminal("host2"),
        ]
    );
    // Exactly one request, against the global values endpoint.
    assert_eq!(ds.requested_paths(), vec!["/api/v1/label/node/values"]);
}

#[tokio::test]
async fn test_label_values_constrained_by_metric() {
    let ds = MockDatasource::new().with_metadata(
        "/api/v1/series?match[]=node_cpu_seconds_total&start=1700000000&end=1700003600",
        json!([
            {"__name__": "node_cpu_seconds_total", "mode": "idle"},
            {"__name__": "node_cpu_seconds_total", "mode": "user"},
            {"__name__": "node_cpu_seconds_total", "mode": "idle"},
        ]),
    );
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find
        .process("label_values(node_cpu_seconds_total, mode)")
        .await
        .unwrap();

    assert_eq!(
        values,
        vec![
            MetricFindValue::expandable("idle"),
            MetricFindValue::expandable("user"),
        ]
    );
}

#[tokio::test]
async fn test_metrics_filtering() {
    let ds = MockDatasource::new().with_metadata(
        "/api/v1/label/__name__/values",
        json!(["cpu_user", "cpu_idle", "mem_free"]),
    );
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("metrics(^cpu_.*)").await.unwrap();

    assert_eq!(
        values,
        vec![
            MetricFindValue::expandable("cpu_user"),
            MetricFindValue::expandable("cpu_idle"),
        ]
    );
}

#[tokio::test]
async fn test_query_result() {
    let ds = MockDatasource::new().with_instant_results(vec![
        sample(json!({"__name__": "up", "job": "x"}), (1.0, "1700000000")),
        sample(json!({"__name__": "up", "job": "y"}), (1.0, "1700000001")),
    ]);
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("query_result(up)").await.unwrap();

    assert_eq!(
        values,
        vec![
            MetricFindValue::expandable("up{job=\"x\"} 1700000000 1000"),
            MetricFindValue::expandable("up{job=\"y\"} 1700000001 1000"),
        ]
    );
}

#[tokio::test]
async fn test_fallback_selector() {
    let ds = MockDatasource::new().with_metadata(
        "/api/v1/series?match[]=up%7Bjob%3D%22api%22%7D&start=1700000000&end=1700003600",
        json!([
            {"__name__": "up", "job": "api", "instance": "host1:9100"},
            {"__name__": "up", "job": "api", "instance": "host2:9100"},
        ]),
    );
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("up{job=\"api\"}").await.unwrap();

    assert_eq!(
        values,
        vec![
            MetricFindValue::expandable("up{job=\"api\",instance=\"host1:9100\"}"),
            MetricFindValue::expandable("up{job=\"api\",instance=\"host2:9100\"}"),
        ]
    );
}

#[tokio::test]
async fn test_fallback_does_not_deduplicate() {
    let ds = MockDatasource::new().with_metadata(
        "/api/v1/series?match[]=up&start=1700000000&end=1700003600",
        json!([
            {"__name__": "up", "job": "api"},
            {"__name__": "up", "job": "api"},
        ]),
    );
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("up").await.unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], values[1]);
}

#[tokio::test]
async fn test_exactly_one_request_per_invocation() {
    let ds = MockDatasource::new()
        .with_metadata("/api/v1/label/job/values", json!(["api"]))
        .with_metadata("/api/v1/label/__name__/values", json!(["up"]));
    let find = MetricFindQuery::new(&ds, test_range());

    find.process("label_values(job)").await.unwrap();
    assert_eq!(ds.requested_paths().len(), 1);

    find.process("metrics(up)").await.unwrap();
    assert_eq!(ds.requested_paths().len(), 2);
}

#[tokio::test]
async fn test_idempotent_with_idempotent_collaborator() {
    let ds = MockDatasource::new()
        .with_metadata("/api/v1/label/node/values", json!(["host1", "host2"]));
    let find = MetricFindQuery::new(&ds, test_range());

    let first = find.process("label_values(node)").await.unwrap();
    let second = find.process("label_values(node)").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_classification_order_label_values_before_metrics() {
    // The inner text would also parse as a metrics() call; the first
    // grammar in the fixed order wins.
    let ds = MockDatasource::new().with_metadata(
        "/api/v1/series?match[]=metrics%28up%29&start=1700000000&end=1700003600",
        json!([]),
    );
    let find = MetricFindQuery::new(&ds, test_range());

    let values = find.process("label_values(metrics(up), job)").await;
    // Classified as label_values: the request goes to the series endpoint,
    // not the metric names endpoint.
    assert!(values.is_err() || values.unwrap().is_empty());
    let paths = ds.requested_paths();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].starts_with("/api/v1/series?"));
}
