//! Analysis query and result models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::envelope::Envelope;
use super::id::ResourceId;
use super::repository::Repository;
use crate::error::{Result, TenableError};
use crate::pagination::OffsetWindow;

/// Default analysis type.
pub const VULN_TYPE: &str = "vuln";

/// Default analysis tool.
pub const LIST_VULN_TOOL: &str = "listvuln";

/// Default source type.
pub const CUMULATIVE_SOURCE: &str = "cumulative";

/// Envelope returned by `POST /rest/analysis`.
pub type AnalysisResponse = Envelope<AnalysisResultSet>;

// -----------------------------------------------------------------------------
// Results
// -----------------------------------------------------------------------------

/// One row of an analysis result.
///
/// The populated fields depend on the analysis tool; all are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Plugin ID.
    #[serde(rename = "pluginID", default)]
    pub plugin_id: Option<String>,

    /// Severity of the finding.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Vulnerability Priority Rating.
    #[serde(default)]
    pub vpr_score: Option<String>,

    /// VPR context, either a list or a JSON-encoded string of one.
    /// Use [`Analysis::vpr_contexts`] to read it.
    #[serde(default)]
    pub vpr_context: Option<Value>,

    /// Host IP address.
    #[serde(default)]
    pub ip: Option<String>,

    /// Host UUID.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Port.
    #[serde(default)]
    pub port: Option<String>,

    /// Protocol (e.g. `"TCP"`).
    #[serde(default)]
    pub protocol: Option<String>,

    /// Plugin name.
    #[serde(default)]
    pub name: Option<String>,

    /// DNS name of the host.
    #[serde(default)]
    pub dns_name: Option<String>,

    /// MAC address of the host.
    #[serde(default)]
    pub mac_address: Option<String>,

    /// NetBIOS name of the host.
    #[serde(default)]
    pub net_bios_name: Option<String>,

    /// Uniqueness key of the row.
    #[serde(default)]
    pub uniqueness: Option<String>,

    /// Uniqueness key of the host.
    #[serde(default)]
    pub host_uniqueness: Option<String>,

    /// Plugin family.
    #[serde(default)]
    pub family: Option<Family>,

    /// Repository the finding belongs to.
    #[serde(default)]
    pub repository: Option<Repository>,

    /// Plugin summary (e.g. `"14272 (0/6/SMB) Netstat Portscanner"`).
    #[serde(default)]
    pub plugin_info: Option<String>,
}

impl Analysis {
    /// Decode the VPR context.
    ///
    /// # Errors
    ///
    /// Returns [`TenableError::Decode`] if the context is malformed.
    pub fn vpr_contexts(&self) -> Result<Vec<VprContext>> {
        match &self.vpr_context {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(encoded)) if encoded.trim().is_empty() => Ok(Vec::new()),
            Some(Value::String(encoded)) => {
                serde_json::from_str(encoded).map_err(TenableError::Decode)
            }
            Some(value) => Vec::<VprContext>::deserialize(value).map_err(TenableError::Decode),
        }
    }

    /// Severity name, if known.
    pub fn severity_name(&self) -> Option<&str> {
        self.severity.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Severity {
    /// Severity level (`0` info through `4` critical).
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One factor of a VPR score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VprContext {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(rename = "type", default)]
    pub context_type: Option<String>,
}

/// Plugin family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub family_type: Option<String>,
}

/// A page of analysis results.
///
/// Counts and offsets arrive as numbers or strings depending on the server
/// version; both are accepted. Some servers report `-1` for counts they did
/// not compute.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResultSet {
    /// Records matching the query across all pages.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub total_records: Option<i64>,

    /// Records in this page.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub returned_records: Option<i64>,

    /// Offset of the first record.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub start_offset: Option<i64>,

    /// Offset one past the last record.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub end_offset: Option<i64>,

    /// Matching data elements (cumulative queries).
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(alias = "MatchingDataElementCount")]
    pub matching_data_element_count: Option<i64>,

    /// Result rows.
    #[serde(default)]
    pub results: Vec<Analysis>,
}

impl AnalysisResultSet {
    /// Whether records exist past the end of this page.
    pub fn has_more(&self) -> bool {
        match (self.end_offset, self.total_records) {
            (Some(end), Some(total)) => end < total,
            _ => false,
        }
    }

    /// The window of the next page, keeping this page's size.
    pub fn next_window(&self) -> Option<OffsetWindow> {
        if !self.has_more() {
            return None;
        }
        let start = u64::try_from(self.start_offset.unwrap_or(0)).ok()?;
        let end = u64::try_from(self.end_offset?).ok()?;
        Some(OffsetWindow::new(start, end).next())
    }

    /// Returns true if this page has no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns an iterator over the results in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Analysis> {
        self.results.iter()
    }
}

impl IntoIterator for AnalysisResultSet {
    type Item = Analysis;
    type IntoIter = std::vec::IntoIter<Analysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnalysisResultSet {
    type Item = &'a Analysis;
    type IntoIter = std::slice::Iter<'a, Analysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

// -----------------------------------------------------------------------------
// Request body
// -----------------------------------------------------------------------------

/// A filter clause of an analysis query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFilter {
    pub id: String,
    pub filter_name: String,
    pub operator: String,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub is_predefined: bool,
    /// Filter value; a string for most filters, an object or list for some.
    pub value: Value,
}

impl AnalysisFilter {
    /// Predefined vulnerability filter `name <operator> value`.
    pub fn new(name: &str, operator: &str, value: impl Into<Value>) -> Self {
        Self {
            id: name.to_string(),
            filter_name: name.to_string(),
            operator: operator.to_string(),
            filter_type: VULN_TYPE.to_string(),
            is_predefined: true,
            value: value.into(),
        }
    }

    /// Match any of the given plugin IDs.
    pub fn plugin_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        Self::new("pluginID", "=", joined)
    }
}

/// The `query` part of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    pub name: String,
    pub description: String,
    pub context: String,
    pub status: i64,
    pub created_time: i64,
    pub modified_time: i64,
    pub groups: Vec<String>,
    #[serde(rename = "type")]
    pub query_type: String,
    pub tool: String,
    pub source_type: String,
    pub start_offset: u64,
    pub end_offset: u64,
    pub filters: Vec<AnalysisFilter>,
    pub vuln_tool: String,
}

impl Default for AnalysisQuery {
    fn default() -> Self {
        let window = OffsetWindow::default();
        Self {
            name: String::new(),
            description: String::new(),
            context: String::new(),
            status: -1,
            created_time: 0,
            modified_time: 0,
            groups: Vec::new(),
            query_type: VULN_TYPE.to_string(),
            tool: LIST_VULN_TOOL.to_string(),
            source_type: CUMULATIVE_SOURCE.to_string(),
            start_offset: window.start,
            end_offset: window.end,
            filters: Vec::new(),
            vuln_tool: LIST_VULN_TOOL.to_string(),
        }
    }
}

impl AnalysisQuery {
    /// Vulnerability query using `tool` (e.g. `listvuln`, `sumid`, `vulndetails`).
    pub fn vulnerabilities(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            vuln_tool: tool.to_string(),
            ..Default::default()
        }
    }

    /// Add a filter.
    #[must_use]
    pub fn with_filter(mut self, filter: AnalysisFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the record window.
    #[must_use]
    pub fn with_window(mut self, window: OffsetWindow) -> Self {
        self.start_offset = window.start;
        self.end_offset = window.end;
        self
    }

    /// The record window.
    pub fn window(&self) -> OffsetWindow {
        OffsetWindow::new(self.start_offset, self.end_offset)
    }
}

/// A column requested from an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

/// Body of `POST /rest/analysis`.
///
/// # Example
///
/// ```
/// use tenable::{AnalysisFilter, AnalysisRequest, OffsetWindow};
///
/// let request = AnalysisRequest::vulnerabilities("listvuln")
///     .with_filter(AnalysisFilter::plugin_ids(["14272", "11219"]))
///     .with_window(OffsetWindow::new(0, 50));
/// assert_eq!(request.query.end_offset, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub query: AnalysisQuery,
    pub source_type: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(rename = "type")]
    pub request_type: String,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self::new(AnalysisQuery::default())
    }
}

impl AnalysisRequest {
    /// Wrap `query`, copying its type and source type to the request.
    pub fn new(query: AnalysisQuery) -> Self {
        Self {
            source_type: query.source_type.clone(),
            request_type: query.query_type.clone(),
            columns: Vec::new(),
            query,
        }
    }

    /// Vulnerability analysis using `tool`.
    pub fn vulnerabilities(tool: &str) -> Self {
        Self::new(AnalysisQuery::vulnerabilities(tool))
    }

    /// Add a filter to the query.
    #[must_use]
    pub fn with_filter(mut self, filter: AnalysisFilter) -> Self {
        self.query = self.query.with_filter(filter);
        self
    }

    /// Set the record window of the query.
    #[must_use]
    pub fn with_window(mut self, window: OffsetWindow) -> Self {
        self.query = self.query.with_window(window);
        self
    }

    /// Request specific columns.
    #[must_use]
    pub fn with_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = names.into_iter().map(|name| Column { name: name.into() }).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_SET: &str = r#"{
        "totalRecords": "3",
        "returnedRecords": 2,
        "startOffset": "0",
        "endOffset": "2",
        "matchingDataElementCount": "-1",
        "results": [
            {
                "pluginID": "14272",
                "severity": {"id": "0", "name": "Info", "description": "Informative"},
                "vprScore": "",
                "vprContext": "[{\"id\":\"age_of_vuln\",\"name\":\"Vulnerability Age\",\"type\":\"string\",\"value\":\"730 days +\"}]",
                "ip": "10.0.0.5",
                "port": "445",
                "protocol": "TCP",
                "name": "Netstat Portscanner (SSH)",
                "dnsName": "host.example.com",
                "family": {"id": "29", "name": "Port scanners", "type": "active"},
                "repository": {"id": "1", "name": "Main", "dataFormat": "IPv4"},
                "pluginInfo": "14272 (0/6/SMB) Netstat Portscanner"
            },
            {
                "pluginID": "11219",
                "severity": {"id": 2, "name": "Medium"},
                "vprContext": [],
                "ip": "10.0.0.6"
            }
        ]
    }"#;

    #[test]
    fn test_result_set_deserialize() {
        let set: AnalysisResultSet = serde_json::from_str(RESULT_SET).expect("Failed to deserialize");

        assert_eq!(set.total_records, Some(3));
        assert_eq!(set.returned_records, Some(2));
        assert_eq!(set.start_offset, Some(0));
        assert_eq!(set.end_offset, Some(2));
        assert_eq!(set.matching_data_element_count, Some(-1));
        assert_eq!(set.len(), 2);

        let first = &set.results[0];
        assert_eq!(first.plugin_id.as_deref(), Some("14272"));
        assert_eq!(first.severity_name(), Some("Info"));
        assert_eq!(
            first.family.as_ref().and_then(|f| f.family_type.as_deref()),
            Some("active")
        );
        assert_eq!(
            first
                .repository
                .as_ref()
                .and_then(|r| r.numeric_id().ok().flatten()),
            Some(1)
        );
        let second = &set.results[1];
        assert_eq!(
            second.severity.as_ref().unwrap().id.as_ref().unwrap().as_i64().unwrap(),
            2
        );
    }

    #[test]
    fn test_vpr_contexts() {
        let set: AnalysisResultSet = serde_json::from_str(RESULT_SET).unwrap();

        let contexts = set.results[0].vpr_contexts().unwrap();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].name.as_deref(), Some("Vulnerability Age"));
        assert_eq!(contexts[0].context_type.as_deref(), Some("string"));

        assert!(set.results[1].vpr_contexts().unwrap().is_empty());
        assert!(Analysis::default().vpr_contexts().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_vpr_context() {
        let analysis = Analysis {
            vpr_context: Some(Value::String("{not json".to_string())),
            ..Default::default()
        };
        assert!(matches!(analysis.vpr_contexts(), Err(TenableError::Decode(_))));
    }

    #[test]
    fn test_pagination_helpers() {
        let set: AnalysisResultSet = serde_json::from_str(RESULT_SET).unwrap();
        assert!(set.has_more());
        assert_eq!(set.next_window(), Some(OffsetWindow::new(2, 4)));

        let last = AnalysisResultSet {
            total_records: Some(3),
            start_offset: Some(2),
            end_offset: Some(3),
            ..Default::default()
        };
        assert!(!last.has_more());
        assert_eq!(last.next_window(), None);
    }

    #[test]
    fn test_request_round_trip() {
        let request = AnalysisRequest::vulnerabilities("sumid")
            .with_filter(AnalysisFilter::plugin_ids(["14272", " 11219", ""]))
            .with_filter(AnalysisFilter::new(
                "repository",
                "=",
                serde_json::json!([{"id": "1"}]),
            ))
            .with_window(OffsetWindow::new(50, 100))
            .with_columns(["pluginID", "ip"]);

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: AnalysisRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_request_wire_format() {
        let request = AnalysisRequest::default()
            .with_filter(AnalysisFilter::plugin_ids(["14272", "11219", "22964"]));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["type"], "vuln");
        assert_eq!(value["sourceType"], "cumulative");
        assert_eq!(value["columns"], serde_json::json!([]));
        assert_eq!(value["query"]["status"], -1);
        assert_eq!(value["query"]["tool"], "listvuln");
        assert_eq!(value["query"]["vulnTool"], "listvuln");
        assert_eq!(value["query"]["startOffset"], 0);
        assert_eq!(value["query"]["endOffset"], 50);
        assert_eq!(
            value["query"]["filters"][0],
            serde_json::json!({
                "id": "pluginID",
                "filterName": "pluginID",
                "operator": "=",
                "type": "vuln",
                "isPredefined": true,
                "value": "14272,11219,22964"
            })
        );
    }
}
