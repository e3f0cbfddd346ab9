//! E2E tests using the mock Tenable.sc server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use tenable::mock_server::{Fixtures, MockServer, MockState};
use tenable::{
    AnalysisFilter, AnalysisRequest, Credentials, OffsetWindow, RepositoryQuery, RepositoryType,
    TenableClient,
};

fn client(server: &MockServer) -> TenableClient {
    TenableClient::new(server.url(), Credentials::new("foo", "bar")).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Current User Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_whoami_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    assert!(client.authentication().is_authenticated());

    let envelope = client
        .current_user()
        .get_envelope()
        .await
        .expect("Failed to get current user");

    assert_eq!(envelope.error_code, 0);
    assert!(envelope.timestamp_utc().is_some());

    let user = envelope.into_response();
    assert_eq!(user.username.as_deref(), Some("secman"));
    assert_eq!(user.id.unwrap().as_i64().unwrap(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_rejected_credentials() {
    let state = MockState::new()
        .with_current_user(Fixtures::security_manager())
        .with_required_credentials(Credentials::new("foo", "bar"));
    let server = MockServer::with_state(state).await;

    let client = TenableClient::new(server.url(), Credentials::new("foo", "wrong")).unwrap();
    let err = client.current_user().get().await.unwrap_err();

    let api = err.api_error().expect("Expected an API error");
    assert_eq!(api.status, 403);
    assert_eq!(api.message(), "Invalid login credentials");

    server.shutdown().await;
}

// =============================================================================
// Repository Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_repository_listing_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    // Step 1: all repositories
    let all = client.repositories().get("", "").await.unwrap();
    assert_eq!(all.len(), 3);

    // Step 2: only remote ones
    let remote = client
        .repositories()
        .list(&RepositoryQuery::default().with_type(RepositoryType::Remote))
        .await
        .unwrap();
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].name.as_deref(), Some("Branch Office"));

    // Step 3: restricted fields come back empty
    let names = client.repositories().get("All", "name").await.unwrap();
    assert!(names.iter().all(|r| r.name.is_some() && r.data_format.is_none()));
    assert!(names.iter().all(|r| r.numeric_id().unwrap().is_some()));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unsupported_repository_type_rejected_by_server() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = client.repositories().get("Cloud", "").await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    let api = err.api_error().expect("Expected an API error");
    assert_eq!(api.error_code, Some(143));
    assert_eq!(api.message(), "Invalid type");

    server.shutdown().await;
}

// =============================================================================
// Analysis Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_analysis_paging_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    let mut request = AnalysisRequest::vulnerabilities("listvuln")
        .with_filter(AnalysisFilter::plugin_ids(["19506"]))
        .with_window(OffsetWindow::first(2));
    let mut hosts = Vec::new();
    let mut pages = 0;

    loop {
        let page = client.analysis().query(&request).await.unwrap();
        pages += 1;
        assert_eq!(page.total_records, Some(3));
        hosts.extend(page.iter().filter_map(|r| r.ip.clone()));

        match page.next_window() {
            Some(window) => request = request.with_window(window),
            None => break,
        }
    }

    assert_eq!(pages, 2);
    assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);

    let served = server.state().read().await.request_count;
    assert_eq!(served, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_analysis_state_modification() {
    let server = MockServer::start_empty().await;
    let client = client(&server);

    let request = AnalysisRequest::default();
    assert!(client.analysis().query(&request).await.unwrap().is_empty());

    // Add data while the server runs
    server.state().write().await.vulnerabilities.push(Fixtures::vulnerability(
        "156032",
        "Apache Log4j Unsupported Version Detection",
        "10.0.0.9",
        4,
    ));

    let page = client.analysis().query(&request).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.results[0].severity_name(), Some("Critical"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_analysis_rejects_unknown_type() {
    let server = MockServer::start().await;
    let client = client(&server);

    let mut request = AnalysisRequest::default();
    request.request_type = "event".to_string();

    let err = client.analysis().query(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert!(err.to_string().contains("Invalid analysis type"));

    server.shutdown().await;
}
