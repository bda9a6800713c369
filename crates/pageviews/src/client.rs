use crate::prelude::*;
use pageviews_core::pageviews::{
    per_article_url, rejected, transform_pageviews_response, validate_query, PageviewsResponse,
    ValidatedQuery, ViewCountOutput, ViewCountQuery,
};
use std::time::Duration;

use crate::error::{classify_transport_error, ViewCountError};

const USER_AGENT: &str = concat!("pageviews/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used for every upstream call
///
/// No timeout is set unless one is given; the client defaults apply.
pub fn create_client(timeout: Option<u64>) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers);

    if let Some(seconds) = timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    builder
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Client for the per-article pageviews endpoint
#[derive(Debug, Clone)]
pub struct PageviewsClient {
    http: reqwest::Client,
    api_base: String,
}

impl PageviewsClient {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// Build a client from the global options
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        Ok(Self::new(create_client(global.timeout)?, &global.api_base))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch the monthly view count for an already validated query
    ///
    /// Issues exactly one GET; nothing is retried or cached.
    pub async fn fetch_view_count(
        &self,
        query: &ValidatedQuery,
    ) -> Result<ViewCountOutput, UpstreamError> {
        let url = per_article_url(&self.api_base, query);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejected(status.as_u16(), &body));
        }

        let body: PageviewsResponse = response
            .json()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        transform_pageviews_response(body, query)
    }

    /// Validate raw parameters, then fetch the view count
    pub async fn view_count_data(
        &self,
        query: ViewCountQuery,
    ) -> Result<ViewCountOutput, ViewCountError> {
        let query = validate_query(query)?;

        self.fetch_view_count(&query).await.map_err(|err| {
            log::warn!(
                "Upstream {} error for {:?} ({}): {}",
                err.category(),
                query.article,
                query.range.month(),
                upstream_cause(&err)
            );
            ViewCountError::from(err)
        })
    }
}

fn upstream_cause(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Rejected { status, detail } => {
            f!("HTTP {status} {}", detail.as_deref().unwrap_or("without detail"))
        }
        UpstreamError::Unreachable { cause } | UpstreamError::Dispatch { cause } => cause.clone(),
    }
}
