use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pageviews_core::pageviews::{ErrorOutput, ViewCountQuery};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::client::PageviewsClient;
use crate::error::{QueryError, ViewCountError};

/// Shared, read-only state handed to every request
#[derive(Debug, Clone)]
pub struct AppState {
    client: PageviewsClient,
}

impl AppState {
    pub fn new(client: PageviewsClient) -> Self {
        Self { client }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/article-view-count", get(article_view_count))
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn article_view_count(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ViewCountQuery>, QueryRejection>,
) -> Response {
    let result = match query {
        Ok(Query(query)) => state.client.view_count_data(query).await,
        Err(rejection) => {
            log::debug!("Rejected query string: {rejection}");
            Err(ViewCountError::Query(QueryError::Malformed))
        }
    };

    match result {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &ViewCountError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(ErrorOutput::from(err))).into_response()
}
