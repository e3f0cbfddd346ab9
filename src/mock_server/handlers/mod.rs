//! HTTP request handlers for the mock server.

pub mod analysis;
pub mod repositories;
pub mod users;

pub use analysis::*;
pub use repositories::*;
pub use users::*;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::{Envelope, API_KEY_HEADER};

/// State shared by all handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// Vendor error code for rejected API keys.
pub const INVALID_CREDENTIALS_CODE: i64 = 74;

/// Vendor error code for invalid request parameters.
pub const INVALID_PARAMETER_CODE: i64 = 143;

/// Wrap `payload` in a success envelope.
pub fn ok<T: Serialize>(payload: T) -> Response {
    let envelope = Envelope {
        response_type: Some("regular".to_string()),
        response: payload,
        error_code: 0,
        error_msg: String::new(),
        warnings: Vec::new(),
        timestamp: Some(chrono::Utc::now().timestamp()),
    };
    (StatusCode::OK, Json(envelope)).into_response()
}

/// An error envelope, shaped like the ones Tenable.sc returns.
pub fn error_response(status: StatusCode, code: i64, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "type": "regular",
            "response": "",
            "error_code": code,
            "error_msg": message,
            "warnings": [],
            "timestamp": chrono::Utc::now().timestamp(),
        })),
    )
        .into_response()
}

/// Count the request and check its `X-Apikey` header.
pub fn admit(state: &mut MockState, headers: &HeaderMap) -> Result<(), Response> {
    state.request_count += 1;

    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if state.is_authorized(api_key) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::FORBIDDEN,
            INVALID_CREDENTIALS_CODE,
            "Invalid login credentials",
        ))
    }
}
