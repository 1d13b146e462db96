use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::middleware::metrics_middleware;
use super::{calendar, handlers, movies, proxy, regions, search, settings};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Calendar
        .route("/calendar/{year}/{month}", get(calendar::get_month))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/search", get(search::search))
        // Settings
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/settings/theme/toggle", post(settings::toggle_theme))
        .route("/regions", get(regions::list_regions))
        .with_state(Arc::clone(&state));

    Router::new()
        .route("/api/tmdb", get(proxy::proxy))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
