//! HTTP surface: `/v0/randos` (base) and `/v1/randos` (custom).

use super::error::SearchError;
use super::pipeline::SearchPipeline;
use super::store::RandoStore;
use axum::extract::{RawQuery, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Response header carrying the pipeline duration.
pub const QUERY_DURATION_HEADER: &str = "x-query-duration";

pub const BASE_PATH: &str = "/v0/randos";
pub const CUSTOM_PATH: &str = "/v1/randos";

/// Build the router with one pipeline per endpoint.
pub fn router<S>(base: SearchPipeline<S>, custom: SearchPipeline<S>) -> Router
where
    S: RandoStore + 'static,
{
    Router::new()
        .route(BASE_PATH, get(search::<S>).with_state(Arc::new(base)))
        .route(CUSTOM_PATH, get(search::<S>).with_state(Arc::new(custom)))
        .layer(TraceLayer::new_for_http())
}

async fn search<S: RandoStore + 'static>(
    State(pipeline): State<Arc<SearchPipeline<S>>>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<Response, SearchError> {
    let started = Instant::now();
    let result = pipeline.search(query.as_deref().unwrap_or_default()).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };

    tracing::info!(
        method = %method,
        uri = %uri,
        collection = pipeline.variant().collection_name(),
        status = status.as_u16(),
        duration = ?started.elapsed(),
        "Search request"
    );

    let outcome = result?;
    Ok((
        [(QUERY_DURATION_HEADER, format!("{:?}", outcome.duration))],
        Json(outcome.response),
    )
        .into_response())
}
