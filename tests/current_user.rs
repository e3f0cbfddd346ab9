//! Current-user service tests.
//!
//! Uses wiremock to mock the Tenable.sc API and test the request/response flow.

use tenable::{Credentials, TenableClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_user_envelope() -> serde_json::Value {
    serde_json::json!({
        "type": "regular",
        "response": {
            "id": "1",
            "username": "admin",
            "firstname": "Admin",
            "lastname": "User",
            "lastLogin": "1454350174",
            "lastLoginIP": "172.20.0.0",
            "role": {"id": "1", "name": "Administrator"}
        },
        "error_code": 0,
        "error_msg": "",
        "warnings": [],
        "timestamp": 1657818772
    })
}

#[tokio::test]
async fn test_current_user_sends_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/currentUser"))
        .and(header("X-Apikey", "accesskey=foo; secretkey=bar;"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_user_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TenableClient::new(&mock_server.uri(), Credentials::new("foo", "bar")).unwrap();
    let user = client.current_user().get().await.unwrap();

    assert_eq!(user.id.unwrap().as_i64().unwrap(), 1);
    assert_eq!(user.username.as_deref(), Some("admin"));
    assert_eq!(user.last_login_ip.as_deref(), Some("172.20.0.0"));
}

#[tokio::test]
async fn test_current_user_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/currentUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_user_envelope()))
        .mount(&mock_server)
        .await;

    let client = TenableClient::new(&mock_server.uri(), Credentials::new("foo", "bar")).unwrap();
    let envelope = client.current_user().get_envelope().await.unwrap();

    assert_eq!(envelope.response_type.as_deref(), Some("regular"));
    assert_eq!(envelope.error_code, 0);
    assert_eq!(envelope.timestamp, Some(1657818772));
    assert_eq!(envelope.response.display_name().as_deref(), Some("Admin User"));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sc/rest/currentUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_user_envelope()))
        .expect(2)
        .mount(&mock_server)
        .await;

    // Trailing slash or not, the prefix is kept
    for base in [
        format!("{}/sc", mock_server.uri()),
        format!("{}/sc/", mock_server.uri()),
    ] {
        let client = TenableClient::new(&base, Credentials::new("foo", "bar")).unwrap();
        assert_eq!(client.base_url().path(), "/sc/");
        client.current_user().get().await.unwrap();
    }
}

#[tokio::test]
async fn test_current_user_with_deadline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/currentUser"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_user_envelope())
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = TenableClient::new(&mock_server.uri(), Credentials::new("foo", "bar"))
        .unwrap()
        .with_deadline(std::time::Duration::from_millis(100));
    let err = client.current_user().get().await.unwrap_err();

    match err {
        tenable::TenableError::Http(e) => assert!(e.is_timeout()),
        other => panic!("Expected timeout, got {other:?}"),
    }
}
