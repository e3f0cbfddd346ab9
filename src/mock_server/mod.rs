//! Mock Tenable.sc API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Tenable.sc
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests and
//! answers with the vendor's response envelopes.
//!
//! # Example
//!
//! ```ignore
//! use tenable::mock_server::MockServer;
//! use tenable::{Credentials, TenableClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = TenableClient::new(server.url(), Credentials::new("foo", "bar")).unwrap();
//!
//!     // Server comes with default fixtures
//!     let user = client.current_user().get().await.unwrap();
//!     assert_eq!(user.username.as_deref(), Some("secman"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
