use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use premiere_core::{Language, Region};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegionParams {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegionEntry {
    pub code: &'static str,
    pub name: &'static str,
}

/// GET /api/v1/regions
///
/// Names are localized to `language`, or to the current settings when it is
/// omitted.
pub async fn list_regions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegionParams>,
) -> Result<Json<Vec<RegionEntry>>, ApiError> {
    let language = match params.language.as_deref() {
        Some(code) => code
            .parse::<Language>()
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?,
        None => state
            .settings()
            .current()
            .await
            .map(|s| s.language)
            .unwrap_or_default(),
    };

    Ok(Json(region_entries(language)))
}

fn region_entries(language: Language) -> Vec<RegionEntry> {
    Region::ALL_REGIONS
        .iter()
        .map(|region| RegionEntry {
            code: region.code(),
            name: region.display_name(language),
        })
        .collect()
}
