//! `POST /rest/analysis`.

use crate::client::TenableClient;
use crate::error::Result;
use crate::models::{AnalysisRequest, AnalysisResponse, AnalysisResultSet};

const ANALYSIS_PATH: &str = "/rest/analysis";

/// Analysis queries.
///
/// Results are paged by the query's offset window. Use
/// [`AnalysisResultSet::next_window`] to build the follow-up request.
///
/// # Example
///
/// ```no_run
/// use tenable::{AnalysisFilter, AnalysisRequest};
///
/// # async fn example(client: &tenable::TenableClient) -> tenable::Result<()> {
/// let mut request = AnalysisRequest::vulnerabilities("listvuln")
///     .with_filter(AnalysisFilter::plugin_ids(["14272", "11219"]));
///
/// loop {
///     let page = client.analysis().query(&request).await?;
///     for row in &page {
///         println!("{:?} {:?}", row.ip, row.name);
///     }
///     match page.next_window() {
///         Some(window) => request = request.with_window(window),
///         None => break,
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnalysisService<'a> {
    client: &'a TenableClient,
}

impl<'a> AnalysisService<'a> {
    pub(crate) fn new(client: &'a TenableClient) -> Self {
        Self { client }
    }

    /// Run an analysis query and return one page of results.
    #[tracing::instrument(skip_all, fields(tool = %request.query.tool))]
    pub async fn query(&self, request: &AnalysisRequest) -> Result<AnalysisResultSet> {
        Ok(self.query_envelope(request).await?.into_response())
    }

    /// Run an analysis query and return the full response envelope.
    #[tracing::instrument(skip_all, fields(tool = %request.query.tool))]
    pub async fn query_envelope(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        self.client.post(ANALYSIS_PATH, request).await
    }
}
