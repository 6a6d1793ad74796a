use chrono::{TimeZone, Utc};
use health_metrics::{
    error::MetricError, CreateSystemMetricRequest, InMemoryMetricRepository, MetricRepository,
    MetricService, NewSystemMetric, StoreConfig, SystemMetric, WebConfig, DEFAULT_DATABASE_URL,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_WEB_PORT,
};
use std::sync::Arc;
use uuid::Uuid;

fn sample_metric() -> SystemMetric {
    SystemMetric {
        id: Uuid::parse_str("6f1c2f4e-8d7a-4b1e-9a55-1f0e7c7c2a10").unwrap(),
        metric_name: "cpu_usage_test".to_string(),
        metric_type: "gauge".to_string(),
        value: 45.5,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
    }
}

/// Test SystemMetric serialization and deserialization
#[test]
fn test_system_metric_serialization() {
    let metric = sample_metric();

    let json = serde_json::to_string_pretty(&metric).expect("Should serialize to JSON");
    assert!(json.contains("cpu_usage_test"));
    assert!(json.contains("45.5"));
    assert!(json.contains("2024-03-01T12:30:00Z"));

    let deserialized: SystemMetric =
        serde_json::from_str(&json).expect("Should deserialize from JSON");
    assert_eq!(deserialized, metric);
}

/// Test JSON field names exposed to clients
#[test]
fn test_json_field_names() {
    let json_value = serde_json::to_value(sample_metric()).expect("Should serialize");

    assert!(json_value.get("id").is_some());
    assert!(json_value.get("metric_name").is_some());
    assert!(json_value.get("metric_type").is_some());
    assert!(json_value.get("value").is_some());
    assert!(json_value.get("created_at").is_some());
    assert_eq!(json_value.as_object().map(|o| o.len()), Some(5));
}

/// Test request payload parsing
#[test]
fn test_create_request_parsing() {
    let req = CreateSystemMetricRequest::from_json_slice(
        br#"{"metric_name":"cpu_usage_test","metric_type":"gauge","value":45.5}"#,
    )
    .expect("Should parse payload");
    assert_eq!(req.metric_name, "cpu_usage_test");
    assert_eq!(req.metric_type, "gauge");
    assert_eq!(req.value, 45.5);

    assert!(CreateSystemMetricRequest::from_json_slice(b"not json").is_err());
    assert!(CreateSystemMetricRequest::from_json_slice(b"").is_err());
}

/// Test MetricError creation and formatting
#[test]
fn test_metric_error_types() {
    let invalid = MetricError::invalid_request("metric_name must not be empty");
    assert!(format!("{}", invalid).contains("metric_name must not be empty"));

    let config_error = MetricError::config_error("Invalid configuration");
    assert!(format!("{}", config_error).contains("Invalid configuration"));

    let web_error = MetricError::web_server_error("Server startup failed");
    assert!(format!("{}", web_error).contains("Server startup failed"));

    let io_error: MetricError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert!(format!("{}", io_error).contains("disk"));
}

/// Test WebConfig builder pattern
#[test]
fn test_web_config() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_cors(false)
        .with_sample_interval_ms(Some(500));

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert!(!config.enable_cors);
    assert_eq!(config.sample_interval_ms, Some(500));
    assert_eq!(config.bind_address(), "127.0.0.1:9090");

    let default = WebConfig::default();
    assert_eq!(default.port, DEFAULT_WEB_PORT);
    assert!(default.enable_cors);
    assert!(default.sample_interval_ms.is_none());
}

/// Test StoreConfig defaults
#[test]
fn test_store_config_defaults() {
    let config = StoreConfig::default();
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
}

/// Test the service against the in-memory store without an async test harness
#[test]
fn test_service_round_trip_blocking() {
    let repo = Arc::new(InMemoryMetricRepository::new());
    let service = MetricService::new(repo.clone());

    tokio_test::block_on(async {
        let metric = NewSystemMetric::new("cpu_usage_test", "gauge", 45.5).unwrap();
        let stored = service.create(metric).await.expect("Should store metric");
        assert_eq!(stored.metric_name, "cpu_usage_test");

        let found = repo.find_by_name("cpu_usage_test").await.unwrap();
        assert_eq!(found, vec![stored]);
    });
}
