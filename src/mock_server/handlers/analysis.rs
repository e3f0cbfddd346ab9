//! Analysis endpoint handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use super::{admit, error_response, ok, SharedState, INVALID_PARAMETER_CODE};
use crate::{AnalysisRequest, AnalysisResultSet, VULN_TYPE};

/// POST /rest/analysis
pub async fn query_analysis(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = admit(&mut state, &headers) {
        return rejection;
    }

    if request.request_type != VULN_TYPE {
        return error_response(
            StatusCode::BAD_REQUEST,
            INVALID_PARAMETER_CODE,
            &format!("Invalid analysis type '{}'", request.request_type),
        );
    }

    let plugin_ids: Vec<String> = request
        .query
        .filters
        .iter()
        .filter(|f| f.filter_name == "pluginID")
        .filter_map(|f| f.value.as_str())
        .flat_map(|v| v.split(','))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    let matching = state.list_vulnerabilities(&plugin_ids);
    let total = matching.len();
    let window = request.query.window();
    let start = usize::try_from(window.start).unwrap_or(usize::MAX).min(total);
    let end = usize::try_from(window.end).unwrap_or(usize::MAX).min(total);

    let results: Vec<_> = matching[start..end].iter().map(|v| (*v).clone()).collect();

    ok(AnalysisResultSet {
        total_records: Some(total as i64),
        returned_records: Some(results.len() as i64),
        start_offset: Some(start as i64),
        end_offset: Some(end as i64),
        matching_data_element_count: Some(-1),
        results,
    })
}
