use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::handlers::{catalog_error, settings_error, ApiError};
use super::movies::MovieSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<MovieSummary>,
}

/// GET /api/v1/search
///
/// Title search in the current language. A blank query returns no results.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let settings = state
        .settings()
        .current()
        .await
        .map_err(|e| settings_error(&e))?;

    let items = state
        .search()
        .search(&params.query, settings.language)
        .await
        .map_err(|e| catalog_error(&e))?;

    let policy = state.policy();
    let images = state.images();
    Ok(Json(SearchResponse {
        query: params.query,
        results: items
            .iter()
            .map(|item| MovieSummary::new(item, policy, images))
            .collect(),
    }))
}
