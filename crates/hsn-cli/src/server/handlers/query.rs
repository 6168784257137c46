//! Query, stats and health handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

use hsn::{Action, HsnAgent, QueryRequest, QueryResponse, ReferenceStats, SourceMetadata};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Largest `top_k` accepted from clients.
const MAX_TOP_K: usize = 100;

/// Longest description accepted from clients, in characters.
///
/// Suggestion scoring is quadratic in the description length for every
/// table entry.
const MAX_QUERY_CHARS: usize = 500;

/// Query string for the validate endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    /// Comma-separated codes.
    pub codes: String,
}

/// Query string for the suggest endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// Product description.
    pub q: String,
    /// Number of suggestions (default from configuration).
    pub top_k: Option<usize>,
}

/// Response for the stats endpoint.
#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: ReferenceStats,
    pub source: Option<SourceMetadata>,
}

/// Response for the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub codes: usize,
}

/// Handle a query request.
pub async fn post_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    if request.action == Action::Suggest {
        check_query_len(&request.query)?;
    }
    let response = run_agent(&state, move |agent| agent.handle(&request)).await?;
    Ok(Json(response))
}

/// Validate codes given in the query string.
pub async fn get_validate(
    State(state): State<AppState>,
    params: Result<Query<ValidateParams>, QueryRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.agent.handle(&QueryRequest::validate(params.codes))))
}

/// Suggest codes for the description in the query string.
pub async fn get_suggest(
    State(state): State<AppState>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Query(params) = params?;
    let top_k = params
        .top_k
        .unwrap_or(state.agent.suggester().config().top_k);
    if top_k > MAX_TOP_K {
        return Err(ApiError::BadRequest(format!(
            "top_k must be at most {}",
            MAX_TOP_K
        )));
    }
    check_query_len(&params.q)?;
    let response = run_agent(&state, move |agent| agent.suggest(&params.q, top_k)).await?;
    Ok(Json(response))
}

fn check_query_len(query: &str) -> Result<(), ApiError> {
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(ApiError::BadRequest(format!(
            "query must be at most {} characters",
            MAX_QUERY_CHARS
        )));
    }
    Ok(())
}

/// Run an agent call on the blocking pool so a long scan does not stall
/// the async workers.
async fn run_agent<F>(state: &AppState, f: F) -> Result<QueryResponse, ApiError>
where
    F: FnOnce(&HsnAgent) -> QueryResponse + Send + 'static,
{
    let agent = Arc::clone(&state.agent);
    tokio::task::spawn_blocking(move || f(&agent))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Reference table statistics.
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.agent.store();
    Json(StatsResponse {
        stats: store.stats().clone(),
        source: store.source().cloned(),
    })
}

/// Liveness check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        codes: state.agent.store().len(),
    })
}
