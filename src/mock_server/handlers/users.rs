//! User endpoint handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};

use super::{admit, error_response, ok, SharedState, INVALID_CREDENTIALS_CODE};

/// GET /rest/currentUser
pub async fn get_current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &headers) {
        return rejection;
    }

    match &state.current_user {
        Some(user) => ok(user),
        None => error_response(
            StatusCode::FORBIDDEN,
            INVALID_CREDENTIALS_CODE,
            "No user is logged in",
        ),
    }
}
