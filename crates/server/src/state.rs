use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::info;

use premiere_core::catalog::images::{ImageUrls, DEFAULT_IMAGE_BASE_URL};
use premiere_core::{
    CatalogApi, Config, MovieBoard, MovieDetailsService, RecommendationPolicy, SanitizedConfig,
    SearchService, Settings, SettingsError, SettingsStore, SettingsUpdate, UpcomingReleases,
};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn CatalogApi>,
    upcoming: UpcomingReleases,
    details: MovieDetailsService,
    search: SearchService,
    settings: SettingsStore,
    board: Mutex<MovieBoard>,
    policy: RecommendationPolicy,
    images: ImageUrls,
}

impl AppState {
    /// Build state with the settings file named in `config`.
    pub fn new(config: Config, catalog: Arc<dyn CatalogApi>) -> Self {
        let settings = SettingsStore::new(config.settings.path.clone());
        Self::with_settings(config, catalog, settings)
    }

    pub fn with_settings(
        config: Config,
        catalog: Arc<dyn CatalogApi>,
        settings: SettingsStore,
    ) -> Self {
        let ttl = Duration::from_secs(config.cache.ttl_secs);

        let upcoming = UpcomingReleases::new(Arc::clone(&catalog), ttl)
            .with_max_pages(config.calendar.max_pages)
            .with_page_failure(config.calendar.page_failure);
        let details = MovieDetailsService::new(Arc::clone(&catalog), ttl);
        let search = SearchService::new(Arc::clone(&catalog), ttl);

        let policy = RecommendationPolicy::new(
            config.recommendation.thresholds,
            config.recommendation.extra_titles.iter().cloned(),
        );
        let images = ImageUrls::new(
            config
                .tmdb
                .image_base_url
                .as_deref()
                .unwrap_or(DEFAULT_IMAGE_BASE_URL),
        );

        Self {
            config,
            catalog,
            upcoming,
            details,
            search,
            settings,
            board: Mutex::new(MovieBoard::default()),
            policy,
            images,
        }
    }

    /// Load persisted settings and start the board under them.
    pub async fn hydrate_settings(&self) -> Result<Settings, SettingsError> {
        let settings = self.settings.hydrate().await?;
        let mut board = self.board.lock().await;
        if board.snapshot() != settings.snapshot() {
            board.reset(settings.snapshot());
        }
        info!(movies = board.len(), "Calendar board ready");
        Ok(settings)
    }

    /// Apply a settings update and realign the board with the result.
    ///
    /// The board lock is held across the write so concurrent updates reset
    /// the board in the same order their settings were persisted.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        let mut board = self.board.lock().await;
        let settings = self.settings.update(update).await?;
        if board.snapshot() != settings.snapshot() {
            info!(
                language = %settings.language,
                region = %settings.region,
                "Catalog settings changed"
            );
            board.reset(settings.snapshot());
        }
        Ok(settings)
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &dyn CatalogApi {
        self.catalog.as_ref()
    }

    pub fn upcoming(&self) -> &UpcomingReleases {
        &self.upcoming
    }

    pub fn details(&self) -> &MovieDetailsService {
        &self.details
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn board(&self) -> &Mutex<MovieBoard> {
        &self.board
    }

    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }

    pub fn images(&self) -> &ImageUrls {
        &self.images
    }
}
