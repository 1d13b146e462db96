use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use premiere_core::{Language, MergeOutcome, MonthWindow, Region};

use super::handlers::{api_error, catalog_error, settings_error, ApiError};
use super::movies::MovieSummary;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// Merge the month again even if it was loaded before.
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub language: Language,
    pub region: Region,
    /// The month was fetched under settings that changed before it arrived
    /// and was not merged.
    pub stale: bool,
    /// Distinct movies accumulated across every loaded month.
    pub total_movies: usize,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub events: Vec<MovieSummary>,
}

/// GET /api/v1/calendar/{year}/{month}
///
/// Retrieve the month under the current settings, merge it into the board
/// and render the Sunday-started grid. With `?refresh=true` every loaded
/// month is forgotten first, so the retrieved month is merged again.
pub async fn get_month(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let window = MonthWindow::new(year, month)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    if query.refresh {
        state.board().lock().await.forget_loaded_months();
    }

    let requested = state
        .settings()
        .current()
        .await
        .map_err(|e| settings_error(&e))?
        .snapshot();

    let items = state
        .upcoming()
        .month(window, requested.language, requested.region)
        .await
        .map_err(|e| catalog_error(&e))?;

    let mut board = state.board().lock().await;
    let outcome = board.merge(requested, &window, &items);
    debug!(year, month, ?outcome, "Merged month into board");

    let policy = state.policy();
    let images = state.images();
    let index = board.events_by_date(policy);

    let days = window
        .grid_days()
        .into_iter()
        .map(|date| CalendarDay {
            date,
            in_month: window.contains(date),
            events: index
                .get(&date)
                .map(|events| {
                    events
                        .iter()
                        .map(|movie| MovieSummary::new(movie, policy, images))
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();

    let snapshot = board.snapshot();
    Ok(Json(CalendarResponse {
        year,
        month,
        language: snapshot.language,
        region: snapshot.region,
        stale: outcome == MergeOutcome::Stale,
        total_movies: board.len(),
        days,
    }))
}
