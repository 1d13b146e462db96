//! Movie detail endpoint and the summary shape shared by list endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use premiere_core::catalog::images::{BackdropSize, ImageUrls, PosterSize};
use premiere_core::{CatalogItem, MovieModal, RecommendationPolicy};

use super::handlers::{catalog_error, settings_error, ApiError};
use crate::state::AppState;

const YOUTUBE_EMBED_URL: &str = "https://www.youtube.com/embed";

/// One movie as shown in calendar cells and search results.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub release_date: Option<NaiveDate>,
    pub poster_url: String,
    pub vote_average: f64,
    pub popularity: f64,
    pub recommended: bool,
}

impl MovieSummary {
    pub fn new(item: &CatalogItem, policy: &RecommendationPolicy, images: &ImageUrls) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            original_title: item.original_title.clone(),
            release_date: item.release_date,
            poster_url: images.poster(item.poster_path.as_deref(), PosterSize::W185),
            vote_average: item.vote_average,
            popularity: item.popularity,
            recommended: policy.is_recommended(item),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieParams {
    /// The date the movie was listed under in the calendar.
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    #[serde(flatten)]
    pub modal: MovieModal,
    pub poster_url: String,
    pub backdrop_url: String,
    pub trailer_url: Option<String>,
    pub recommended: bool,
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(params): Query<MovieParams>,
) -> Result<Json<MovieResponse>, ApiError> {
    let settings = state
        .settings()
        .current()
        .await
        .map_err(|e| settings_error(&e))?;

    let modal = state
        .details()
        .modal(id, settings.snapshot(), params.release_date)
        .await
        .map_err(|e| catalog_error(&e))?;

    let item = &modal.details.item;
    let images = state.images();
    let poster_url = images.poster(item.poster_path.as_deref(), PosterSize::W342);
    let backdrop_url = images.backdrop(item.backdrop_path.as_deref(), BackdropSize::W1280);
    let recommended = state.policy().is_recommended(item);
    let trailer_url = modal
        .trailer
        .as_ref()
        .map(|t| format!("{}/{}?autoplay=1&rel=0", YOUTUBE_EMBED_URL, t.key));

    Ok(Json(MovieResponse {
        modal,
        poster_url,
        backdrop_url,
        trailer_url,
        recommended,
    }))
}
