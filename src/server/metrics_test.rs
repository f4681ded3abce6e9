//! Tests for status API metrics

use super::metrics::{create_metrics, StatusMetrics};

#[test]
fn test_metrics_creation() {
    let metrics = StatusMetrics::new().expect("should create metrics");

    // Prometheus only outputs labelled metrics once they have values
    metrics.record_query_success("health", 0.1);
    metrics.record_skipped_records(1);

    let output = metrics.encode().expect("should encode metrics");
    assert!(output.contains("infraforge_queries_total"));
    assert!(output.contains("infraforge_query_duration_seconds"));
    assert!(output.contains("infraforge_registry_records_skipped_total"));
}

#[test]
fn test_record_query_outcomes() {
    let metrics = StatusMetrics::new().expect("should create metrics");

    metrics.record_query_success("services", 0.2);
    metrics.record_query_success("services", 0.4);
    metrics.record_query_error("services", 1.5);
    metrics.record_query_error("registry", 0.1);

    let output = metrics.encode().expect("should encode metrics");

    assert!(output.contains("infraforge_queries_total{query=\"services\",result=\"success\"} 2"));
    assert!(output.contains("infraforge_queries_total{query=\"services\",result=\"error\"} 1"));
    assert!(output.contains("infraforge_queries_total{query=\"registry\",result=\"error\"} 1"));
    assert!(output.contains("infraforge_query_duration_seconds_count{query=\"services\"} 3"));
}

#[test]
fn test_record_skipped_records_accumulates() {
    let metrics = StatusMetrics::new().expect("should create metrics");

    metrics.record_skipped_records(2);
    metrics.record_skipped_records(0);
    metrics.record_skipped_records(3);

    let output = metrics.encode().expect("should encode metrics");

    assert!(output.contains("infraforge_registry_records_skipped_total 5"));
}

#[test]
fn test_create_shared_metrics() {
    let metrics = create_metrics().expect("should create shared metrics");

    let metrics2 = metrics.clone();
    metrics.record_query_success("monitoring", 0.001);

    let output = metrics2.encode().expect("should encode from clone");
    assert!(output.contains("infraforge_queries_total{query=\"monitoring\",result=\"success\"} 1"));
}

#[test]
fn test_static_queries_only_increment_counter() {
    let metrics = StatusMetrics::new().expect("should create metrics");

    metrics.record_static_query("security");
    metrics.record_static_query("security");

    let output = metrics.encode().expect("should encode metrics");

    assert!(output.contains("infraforge_queries_total{query=\"security\",result=\"success\"} 2"));
    assert!(
        !output.contains("infraforge_query_duration_seconds_count{query=\"security\"}"),
        "static routes must not add duration samples"
    );
}
