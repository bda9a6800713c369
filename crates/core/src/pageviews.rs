use serde::{Deserialize, Serialize};

use crate::month::{month_range, parse_month, MonthRange};

/// Default base URL of the Wikimedia pageviews REST API
pub const DEFAULT_API_BASE: &str = "https://wikimedia.org/api/rest_v1/metrics/pageviews";

/// Wiki project queried for every article
pub const PROJECT: &str = "en.wikipedia";

/// Access method filter (desktop, mobile app and mobile web combined)
pub const ACCESS: &str = "all-access";

/// Agent filter (users, spiders and automated agents combined)
pub const AGENT: &str = "all-agents";

/// Time bucket requested from the upstream API
pub const GRANULARITY: &str = "monthly";

pub const INVALID_QUERY_MESSAGE: &str =
    "Article name and a valid month in YYYYMM format are required.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error fetching data from Wikipedia API";
pub const NO_RESPONSE_MESSAGE: &str = "No response received from Wikipedia API";
pub const SETUP_ERROR_MESSAGE: &str = "Error in setting up the request to Wikipedia API";

/// Raw inbound query parameters, before validation
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ViewCountQuery {
    pub article: Option<String>,
    pub month: Option<String>,
}

/// A query that passed validation, with its upstream date range resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub article: String,
    pub range: MonthRange,
}

/// Reasons an inbound query is rejected before reaching upstream
///
/// Every variant renders the same message; the variants only exist so
/// callers can log which check failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Article name and a valid month in YYYYMM format are required.")]
    MissingArticle,

    #[error("Article name and a valid month in YYYYMM format are required.")]
    InvalidMonth,

    #[error("Article name and a valid month in YYYYMM format are required.")]
    Malformed,
}

impl QueryError {
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// The ways a single upstream call can fail
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status
    #[error("{}", detail.as_deref().unwrap_or(UPSTREAM_ERROR_MESSAGE))]
    Rejected { status: u16, detail: Option<String> },

    /// The request went out but no response came back
    #[error("No response received from Wikipedia API")]
    Unreachable { cause: String },

    /// The request could not be built or sent, or the reply was unusable
    #[error("Error in setting up the request to Wikipedia API")]
    Dispatch { cause: String },
}

impl UpstreamError {
    /// HTTP status relayed to the inbound caller
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamError::Rejected { status, .. } => *status,
            UpstreamError::Unreachable { .. } | UpstreamError::Dispatch { .. } => 500,
        }
    }

    /// Short label used in logs
    pub fn category(&self) -> &'static str {
        match self {
            UpstreamError::Rejected { .. } => "rejected",
            UpstreamError::Unreachable { .. } => "unreachable",
            UpstreamError::Dispatch { .. } => "dispatch",
        }
    }
}

/// Any failure of a view-count lookup, from validation through the upstream call
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewCountError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ViewCountError {
    pub fn status_code(&self) -> u16 {
        match self {
            ViewCountError::Query(err) => err.status_code(),
            ViewCountError::Upstream(err) => err.status_code(),
        }
    }
}

/// Pageviews API success body
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PageviewsResponse {
    pub items: Vec<PageviewItem>,
}

/// One per-period entry of a pageviews response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PageviewItem {
    pub views: u64,
    pub project: Option<String>,
    pub article: Option<String>,
    pub granularity: Option<String>,
    pub timestamp: Option<String>,
    pub access: Option<String>,
    pub agent: Option<String>,
}

/// Pageviews API error body
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UpstreamErrorBody {
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UpstreamErrorDetail {
    pub info: Option<String>,
}

/// Successful lookup returned to the caller
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ViewCountOutput {
    pub article: String,
    pub month: String,
    #[serde(rename = "viewCount")]
    pub view_count: u64,
}

/// Error body returned to the caller
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ErrorOutput {
    pub error: String,
}

impl ErrorOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&QueryError> for ErrorOutput {
    fn from(err: &QueryError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&UpstreamError> for ErrorOutput {
    fn from(err: &UpstreamError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&ViewCountError> for ErrorOutput {
    fn from(err: &ViewCountError) -> Self {
        Self::new(err.to_string())
    }
}

/// Validate raw query parameters and resolve the month into a date range
///
/// The article must be present and non-empty. The month must be six ASCII
/// digits naming a real calendar month.
pub fn validate_query(query: ViewCountQuery) -> Result<ValidatedQuery, QueryError> {
    let article = query
        .article
        .filter(|article| !article.is_empty())
        .ok_or(QueryError::MissingArticle)?;

    let month = query
        .month
        .as_deref()
        .and_then(parse_month)
        .ok_or(QueryError::InvalidMonth)?;

    Ok(ValidatedQuery {
        article,
        range: month_range(month),
    })
}

/// Build the per-article monthly pageviews URL for a validated query
///
/// The article title is percent-encoded so it always occupies exactly one
/// path segment.
pub fn per_article_url(api_base: &str, query: &ValidatedQuery) -> String {
    format!(
        "{}/per-article/{PROJECT}/{ACCESS}/{AGENT}/{}/{GRANULARITY}/{}/{}",
        api_base.trim_end_matches('/'),
        urlencoding::encode(&query.article),
        query.range.start,
        query.range.end
    )
}

/// Turn a pageviews response into the caller-facing output
///
/// Only the first item is used. An empty item list is treated as an
/// unusable reply.
pub fn transform_pageviews_response(
    response: PageviewsResponse,
    query: &ValidatedQuery,
) -> Result<ViewCountOutput, UpstreamError> {
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::Dispatch {
            cause: "upstream response contained no items".to_string(),
        })?;

    Ok(ViewCountOutput {
        article: query.article.clone(),
        month: query.range.month().to_string(),
        view_count: item.views,
    })
}

/// Extract `error.info` from an upstream error body, if there is one
///
/// Bodies that are not JSON, lack the field, or carry an empty string all
/// yield `None`.
pub fn parse_upstream_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()?
        .error?
        .info
        .filter(|info| !info.is_empty())
}

/// Build the rejection error for a non-success upstream reply
pub fn rejected(status: u16, body: &str) -> UpstreamError {
    UpstreamError::Rejected {
        status,
        detail: parse_upstream_error_detail(body),
    }
}
