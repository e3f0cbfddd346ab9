//! Repository endpoint handlers.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;

use super::{admit, error_response, ok, SharedState, INVALID_PARAMETER_CODE};
use crate::RepositoryType;

/// Query parameters for listing repositories.
#[derive(Debug, Default, Deserialize)]
pub struct ListRepositoriesQuery {
    #[serde(rename = "type")]
    pub repository_type: Option<String>,
    pub fields: Option<String>,
}

/// GET /rest/repository
pub async fn list_repositories(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListRepositoriesQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &headers) {
        return rejection;
    }

    let requested = query.repository_type.as_deref().unwrap_or("");
    let repository_type: RepositoryType = match requested.parse() {
        Ok(RepositoryType::Other(_)) | Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                INVALID_PARAMETER_CODE,
                "Invalid type",
            )
        }
        Ok(t) => t,
    };

    let fields: Vec<&str> = query
        .fields
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    let repositories: Vec<Value> = state
        .list_repositories(&repository_type)
        .into_iter()
        .map(|r| select_fields(serde_json::to_value(r).unwrap_or_default(), &fields))
        .collect();

    ok(repositories)
}

/// Keep only `fields` of a JSON object. `id` is always returned.
fn select_fields(value: Value, fields: &[&str]) -> Value {
    match value {
        Value::Object(mut map) if !fields.is_empty() => {
            map.retain(|key, _| key == "id" || fields.contains(&key.as_str()));
            Value::Object(map)
        }
        other => other,
    }
}
