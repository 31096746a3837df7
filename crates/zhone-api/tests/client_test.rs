#![allow(clippy::unwrap_used)]
// Integration tests for `GatewayClient` using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zhone_api::{Credentials, Error, GatewayClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GatewayClient) {
    let server = MockServer::start().await;
    let client = GatewayClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("{}/", server.uri())).unwrap(),
        Credentials::new("admin", SecretString::from("s3cret".to_owned())),
        Duration::from_secs(5),
    );
    (server, client)
}

// ── Fetch tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_page_sent_with_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/statsifc.html"))
        .and(basic_auth("admin", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client.interface_stats().await.unwrap();
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_wireless_pages_carry_radio_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zhnwlstatus.cmd"))
        .and(query_param("curRadio", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("status-1"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/zhnwlinfo.cmd"))
        .and(query_param("action", "view"))
        .and(query_param("curRadio", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("info-1"))
        .mount(&server)
        .await;

    assert_eq!(client.wireless_status("1").await.unwrap(), "status-1");
    assert_eq!(client.wireless_info("1").await.unwrap(), "info-1");
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zhngponstatus.html"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.gpon_status().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zhnethernetstatus.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.ethernet_status().await.unwrap_err();
    assert!(!err.is_unreachable());
    assert!(matches!(err, Error::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let client = GatewayClient::new(
        &server.uri(),
        Credentials::new("user", SecretString::from("user".to_owned())),
        &transport,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/statsifc.html"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.interface_stats().await.unwrap_err();
    assert!(err.is_unreachable(), "expected timeout, got: {err:?}");
}
