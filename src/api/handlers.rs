use std::any::Any;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{QueryKind, RecommendationQuery, RecommendationResponse},
    services::{recommendations, AttributeMatcher, GenreSimilarityRanker},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    /// "movie title" or "director"
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub query: String,
    pub n: Option<usize>,
}

/// Trimmed query value, or `None` when nothing is left to match
fn query_value(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|value| !value.is_empty())
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "movies": state.catalog.len() })),
    )
}

/// Recommends movies related to a title, or lists a director's movies
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<LookupParams>,
) -> AppResult<Json<RecommendationResponse>> {
    let Some(kind) = QueryKind::from_label(&params.kind) else {
        tracing::info!(
            request_id = %request_id,
            kind = %params.kind,
            "Unknown query type"
        );
        return Ok(Json(RecommendationResponse::default()));
    };

    let Some(value) = query_value(&params.query) else {
        tracing::debug!(request_id = %request_id, %kind, "Blank query");
        return Ok(Json(RecommendationResponse::default()));
    };

    let query = RecommendationQuery::new(kind, value, state.limits.resolve(params.n));
    let response = recommendations::recommend(&state.catalog, &AttributeMatcher, &query)?;
    Ok(Json(response))
}

/// Recommends movies with the most similar genre mix to a title
pub async fn recommend_similar(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<RecommendationResponse>> {
    let Some(value) = query_value(&params.query) else {
        tracing::debug!(request_id = %request_id, "Blank query");
        return Ok(Json(RecommendationResponse::default()));
    };
    let query = RecommendationQuery::title(value, state.limits.resolve(params.n));
    let response = recommendations::recommend(&state.catalog, &GenreSimilarityRanker, &query)?;
    Ok(Json(response))
}

/// Converts a panic inside a handler into a generic 500 response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}
