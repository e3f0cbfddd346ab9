//! Response classification and decoding.
//!
//! Every response body is read to the end, whatever the outcome, so the
//! underlying connection can go back to the pool.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorBody, Result, TenableError};

/// Decode a successful response body into `T`.
///
/// # Errors
///
/// - [`TenableError::Api`] if the status is outside 2xx.
/// - [`TenableError::Decode`] if the body does not match `T`.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(TenableError::Decode)
}

/// Check the status and drain the body without decoding it.
///
/// Any 2xx response succeeds regardless of its body.
pub async fn discard(response: Response) -> Result<()> {
    let response = check(response).await?;
    response.bytes().await?;
    Ok(())
}

/// Pass 2xx responses through; turn everything else into an error.
pub async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if is_success(status) {
        return Ok(response);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match response.bytes().await {
        Ok(body) => Err(TenableError::Api(api_error(
            status,
            content_type.as_deref(),
            &body,
        ))),
        Err(source) => Err(TenableError::BodyRead {
            status: status.as_u16(),
            source,
        }),
    }
}

/// Whether `status` falls in [200, 299].
pub fn is_success(status: StatusCode) -> bool {
    (200..=299).contains(&status.as_u16())
}

/// Build the structured error for a non-2xx response.
///
/// JSON bodies are decoded into messages; anything else, including JSON that
/// fails to parse, is kept as raw text next to the status line.
pub fn api_error(status: StatusCode, content_type: Option<&str>, body: &[u8]) -> ApiError {
    let line = status_line(status);

    if content_type.is_some_and(is_json) {
        if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
            return ApiError::from_body(status.as_u16(), line, parsed);
        }
    }

    ApiError::from_text(
        status.as_u16(),
        line,
        String::from_utf8_lossy(body).into_owned(),
    )
}

fn is_json(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("application/json")
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
