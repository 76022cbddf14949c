//! Unit tests for probe module.

use super::*;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober(timeout: Duration) -> Prober {
    Prober::new(timeout).unwrap()
}

// ============================================================================
// ProbeError
// ============================================================================

#[test]
fn test_error_timeout_display() {
    let err = ProbeError::Timeout(5000);
    assert_eq!(err.to_string(), "request timeout after 5000ms");
}

#[test]
fn test_error_connection_display() {
    let err = ProbeError::ConnectionFailed("refused".to_string());
    assert_eq!(err.to_string(), "connection failed: refused");
}

#[test]
fn test_error_invalid_url_display() {
    let err = ProbeError::InvalidUrl("relative URL without a base".to_string());
    assert_eq!(err.to_string(), "invalid url: relative URL without a base");
}

// ============================================================================
// StatusRecord
// ============================================================================

#[test]
fn test_pending_record_is_unhealthy_and_empty() {
    let record = StatusRecord::pending("http://a");
    assert_eq!(record.url, "http://a");
    assert!(!record.healthy);
    assert!(record.status_text.is_empty());
    assert_eq!(record.response_millis, 0);
}

#[test]
fn test_down_record_has_zero_latency() {
    let record = StatusRecord::down("http://a", "503 Service Unavailable");
    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
}

#[test]
fn test_record_serializes_to_json() {
    let record = StatusRecord::up("http://a", "200 OK", 42);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["url"], "http://a");
    assert_eq!(json["healthy"], true);
    assert_eq!(json["response_millis"], 42);
}

// ============================================================================
// Prober
// ============================================================================

#[tokio::test]
async fn test_probe_healthy_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("So nice to see you."))
        .mount(&server)
        .await;

    let record = prober(Duration::from_secs(1)).probe(&server.uri()).await;

    assert!(record.healthy, "expected healthy: {}", record.status_text);
    assert!(record.status_text.starts_with("200"));
    assert_eq!(record.url, server.uri());
}

#[tokio::test]
async fn test_probe_healthy_records_elapsed_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(30)))
        .mount(&server)
        .await;

    let record = prober(Duration::from_secs(2)).probe(&server.uri()).await;

    assert!(record.healthy);
    assert!(record.response_millis >= 30);
}

#[tokio::test]
async fn test_probe_not_found_is_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_delay(Duration::from_millis(5))
                .set_body_string("I said GO AWAY."),
        )
        .mount(&server)
        .await;

    let record = prober(Duration::from_secs(1)).probe(&server.uri()).await;

    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
    assert!(
        record.status_text.starts_with("404"),
        "unhealthy for the wrong reason: {}",
        record.status_text
    );
}

#[tokio::test]
async fn test_probe_server_error_is_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let record = prober(Duration::from_secs(1)).probe(&server.uri()).await;

    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
    assert_eq!(record.status_text, "500 Internal Server Error");
}

#[tokio::test]
async fn test_probe_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let record = prober(Duration::from_millis(20)).probe(&server.uri()).await;

    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
    assert!(
        record.status_text.starts_with("request timeout"),
        "unexpected status: {}",
        record.status_text
    );
}

#[tokio::test]
async fn test_probe_connection_refused() {
    // Grab a free port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = format!("http://127.0.0.1:{}/", port);
    let record = prober(Duration::from_secs(1)).probe(&url).await;

    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
    assert!(!record.status_text.is_empty());
}

#[tokio::test]
async fn test_probe_invalid_url() {
    let record = prober(Duration::from_secs(1)).probe("not a url").await;

    assert!(!record.healthy);
    assert_eq!(record.response_millis, 0);
    assert!(record.status_text.starts_with("invalid url"));
}

#[test]
fn test_latency_sample_is_never_zero() {
    assert_eq!(latency_sample(Duration::from_micros(200)), 1);
    assert_eq!(latency_sample(Duration::from_millis(42)), 42);
}

#[test]
fn test_prober_keeps_timeout() {
    let prober = Prober::with_client(reqwest::Client::new(), Duration::from_secs(7));
    assert_eq!(prober.timeout(), Duration::from_secs(7));
}
