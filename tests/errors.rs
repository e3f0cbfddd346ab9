//! Error decoding tests.
//!
//! Uses wiremock to produce failing responses and checks how they surface.

use reqwest::Method;
use tenable::{ApiKeyAuthTransport, Credentials, TenableClient, TenableError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(mock_server: &MockServer) -> TenableClient {
    TenableClient::new(&mock_server.uri(), Credentials::new("foo", "bar")).unwrap()
}

async fn respond(mock_server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/rest/currentUser"))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_vendor_error_envelope() {
    let mock_server = MockServer::start().await;
    respond(
        &mock_server,
        ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error_code": 1,
            "error_msg": "boom"
        })),
    )
    .await;

    let err = client(&mock_server).current_user().get().await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    let api = err.api_error().expect("Expected an API error");
    assert_eq!(api.message(), "boom");
    assert_eq!(api.error_code, Some(1));
    assert_eq!(
        err.to_string(),
        "Tenable API error: boom (status 500 Internal Server Error) [error code 1]"
    );
}

#[tokio::test]
async fn test_error_messages_body() {
    let mock_server = MockServer::start().await;
    respond(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errorMessages": ["x"],
            "errors": {"name": "is required"}
        })),
    )
    .await;

    let err = client(&mock_server).current_user().get().await.unwrap_err();
    let api = err.api_error().unwrap();

    assert_eq!(api.message(), "x");
    assert_eq!(api.field_errors.get("name").map(String::as_str), Some("is required"));
}

#[tokio::test]
async fn test_plain_text_error_keeps_body() {
    let mock_server = MockServer::start().await;
    respond(
        &mock_server,
        ResponseTemplate::new(502).set_body_raw("upstream unavailable", "text/plain"),
    )
    .await;

    let err = client(&mock_server).current_user().get().await.unwrap_err();
    let api = err.api_error().unwrap();

    assert_eq!(api.status_line, "502 Bad Gateway");
    assert_eq!(api.body.as_deref(), Some("upstream unavailable"));
    assert_eq!(
        api.to_string(),
        "got response status 502 Bad Gateway: upstream unavailable"
    );
}

#[tokio::test]
async fn test_malformed_json_error_is_text() {
    let mock_server = MockServer::start().await;
    respond(
        &mock_server,
        ResponseTemplate::new(503).set_body_raw("{not json", "application/json"),
    )
    .await;

    let err = client(&mock_server).current_user().get().await.unwrap_err();

    assert_eq!(err.api_error().unwrap().body.as_deref(), Some("{not json"));
}

#[tokio::test]
async fn test_success_with_unexpected_shape() {
    let mock_server = MockServer::start().await;
    respond(
        &mock_server,
        ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
    )
    .await;

    let err = client(&mock_server).current_user().get().await.unwrap_err();

    assert!(matches!(err, TenableError::Decode(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_success_without_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/scanResult/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .call::<()>(Method::DELETE, "/rest/scanResult/7", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_without_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .call::<()>(Method::DELETE, "rest/scanResult/7", None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let client = TenableClient::new("http://127.0.0.1:1", Credentials::new("foo", "bar")).unwrap();
    let err = client.current_user().get().await.unwrap_err();

    assert!(matches!(err, TenableError::Http(_)));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_truncated_error_body_is_body_read_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Promise 500 bytes, send a few, then hang up
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 500\r\n\r\n{\"error",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client =
        TenableClient::new(&format!("http://{addr}"), Credentials::new("foo", "bar")).unwrap();
    let err = client.current_user().get().await.unwrap_err();

    assert!(matches!(err, TenableError::BodyRead { status: 500, .. }), "{err:?}");
    assert_eq!(err.status_code(), Some(500));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_client_over_decorated_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/currentUser"))
        .and(wiremock::matchers::header(
            "X-Apikey",
            "accesskey=foo; secretkey=bar;",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {"username": "admin"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credentials = Credentials::new("foo", "bar");
    let transport = ApiKeyAuthTransport::new(reqwest::Client::new(), credentials.clone());
    let client = TenableClient::with_transport(&mock_server.uri(), credentials, transport).unwrap();

    let user = client.current_user().get().await.unwrap();
    assert_eq!(user.username.as_deref(), Some("admin"));
}
