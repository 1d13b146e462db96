use std::sync::Arc;

use axum::{extract::State, Json};

use premiere_core::{Settings, SettingsUpdate};

use super::handlers::{settings_error, ApiError};
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<Settings>, ApiError> {
    state
        .settings()
        .current()
        .await
        .map(Json)
        .map_err(|e| settings_error(&e))
}

/// PUT /api/v1/settings
///
/// Absent fields keep their value. Changing language or region starts a
/// fresh calendar board; months still in flight under the old values are
/// dropped when they arrive.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, ApiError> {
    state
        .update_settings(update)
        .await
        .map(Json)
        .map_err(|e| settings_error(&e))
}

/// POST /api/v1/settings/theme/toggle
pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Result<Json<Settings>, ApiError> {
    state
        .settings()
        .toggle_theme()
        .await
        .map(Json)
        .map_err(|e| settings_error(&e))
}
