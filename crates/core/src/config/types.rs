use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::calendar::{PageFailurePolicy, DEFAULT_MAX_PAGES};
use crate::catalog::TmdbConfig;
use crate::recommend::RecommendationThresholds;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds (default: 300)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Month retrieval configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Maximum discover pages fetched per month (default: 10)
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Behaviour when a page after the first fails
    #[serde(default)]
    pub page_failure: PageFailurePolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_failure: PageFailurePolicy::default(),
        }
    }
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

/// Recommendation thresholds and extra allow-listed titles
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecommendationConfig {
    #[serde(flatten)]
    pub thresholds: RecommendationThresholds,
    /// Titles recommended in addition to the built-in list
    #[serde(default)]
    pub extra_titles: Vec<String>,
}

/// Persisted user settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("movie-calendar-settings.json")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub cache: CacheConfig,
    pub calendar: CalendarConfig,
    pub recommendation: RecommendationConfig,
    pub settings: SettingsConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tmdb: SanitizedTmdbConfig {
                api_key_configured: !config.tmdb.api_key.is_empty(),
                base_url: config.tmdb.base_url.clone(),
                image_base_url: config.tmdb.image_base_url.clone(),
                timeout_secs: config.tmdb.timeout_secs,
            },
            cache: config.cache.clone(),
            calendar: config.calendar.clone(),
            recommendation: config.recommendation.clone(),
            settings: config.settings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.calendar.max_pages, 10);
        assert_eq!(config.calendar.page_failure, PageFailurePolicy::BestEffort);
        assert_eq!(config.recommendation.thresholds.min_vote_average, 7.2);
        assert_eq!(config.recommendation.thresholds.min_vote_count, 100);
        assert_eq!(config.recommendation.thresholds.min_popularity, 300.0);
        assert!(config.tmdb.api_key.is_empty());
        assert_eq!(config.tmdb.timeout_secs, 30);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[tmdb]
api_key = "secret"
base_url = "http://localhost:9999/3"

[cache]
ttl_secs = 60

[calendar]
max_pages = 5
page_failure = "strict"

[recommendation]
min_vote_average = 8.0
extra_titles = ["Paddington 4"]

[settings]
path = "/data/settings.json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.tmdb.api_key, "secret");
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.calendar.max_pages, 5);
        assert_eq!(config.calendar.page_failure, PageFailurePolicy::Strict);
        assert_eq!(config.recommendation.thresholds.min_vote_average, 8.0);
        assert_eq!(config.recommendation.thresholds.min_vote_count, 100);
        assert_eq!(config.recommendation.extra_titles, vec!["Paddington 4"]);
        assert_eq!(
            config.settings.path.to_str().unwrap(),
            "/data/settings.json"
        );
    }

    #[test]
    fn test_unknown_page_failure_policy_fails() {
        let toml = r#"
[calendar]
page_failure = "sometimes"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.tmdb.api_key = "secret-key".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.tmdb.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }

    #[test]
    fn test_sanitized_config_without_key() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.tmdb.api_key_configured);
        assert_eq!(sanitized.server.port, 8080);
    }
}
