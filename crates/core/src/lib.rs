pub mod cache;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod details;
pub mod locale;
pub mod metrics;
pub mod recommend;
pub mod search;
pub mod settings;
pub mod testing;

pub use cache::{TtlCache, DEFAULT_TTL};
pub use calendar::{
    MergeOutcome, MonthWindow, MovieBoard, PageFailurePolicy, SettingsSnapshot, UpcomingReleases,
};
pub use catalog::{
    CatalogApi, CatalogError, CatalogItem, CatalogRequest, TmdbClient, TmdbConfig,
};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, SanitizedConfig,
};
pub use details::{MovieDetailsService, MovieModal};
pub use locale::{Language, Region, Theme};
pub use recommend::{RecommendationPolicy, RecommendationThresholds};
pub use search::SearchService;
pub use settings::{Settings, SettingsError, SettingsStore, SettingsUpdate};
