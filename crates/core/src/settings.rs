//! Persisted user settings (theme, language, region).
//!
//! The store starts unloaded. [`SettingsStore::hydrate`] reads the settings
//! file once; until then every read returns [`SettingsError::NotYetLoaded`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::calendar::SettingsSnapshot;
use crate::locale::{Language, Region, Theme};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings have not been loaded yet")]
    NotYetLoaded,

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub region: Region,
}

impl Settings {
    /// The parts of the settings that affect catalog queries.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot::new(self.language, self.region)
    }
}

/// A partial update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub region: Option<Region>,
}

impl SettingsUpdate {
    fn apply(&self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(language) = self.language {
            settings.language = language;
        }
        if let Some(region) = self.region {
            settings.region = region;
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    state: RwLock<Option<Settings>>,
}

impl SettingsStore {
    /// Create an unloaded store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn is_hydrated(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Load settings from disk.
    ///
    /// A missing file yields defaults. An unreadable or corrupt file is
    /// logged and replaced by defaults on the next write. Calling this again
    /// after a successful load is a no-op.
    pub async fn hydrate(&self) -> Result<Settings, SettingsError> {
        let mut state = self.state.write().await;
        if let Some(settings) = *state {
            return Ok(settings);
        }

        let settings = match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt settings file");
                Settings::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file, using defaults");
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            theme = ?settings.theme,
            language = %settings.language,
            region = %settings.region,
            "Settings loaded"
        );
        *state = Some(settings);
        Ok(settings)
    }

    pub async fn current(&self) -> Result<Settings, SettingsError> {
        self.state.read().await.ok_or(SettingsError::NotYetLoaded)
    }

    /// Apply `update`, persist it and return the new settings.
    ///
    /// Nothing changes in memory if the write fails.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        let mut state = self.state.write().await;
        let mut settings = state.ok_or(SettingsError::NotYetLoaded)?;
        update.apply(&mut settings);

        self.persist(&settings).await?;
        *state = Some(settings);
        Ok(settings)
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<Settings, SettingsError> {
        self.update(SettingsUpdate {
            theme: Some(theme),
            ..SettingsUpdate::default()
        })
        .await
    }

    pub async fn set_language(&self, language: Language) -> Result<Settings, SettingsError> {
        self.update(SettingsUpdate {
            language: Some(language),
            ..SettingsUpdate::default()
        })
        .await
    }

    pub async fn set_region(&self, region: Region) -> Result<Settings, SettingsError> {
        self.update(SettingsUpdate {
            region: Some(region),
            ..SettingsUpdate::default()
        })
        .await
    }

    pub async fn toggle_theme(&self) -> Result<Settings, SettingsError> {
        let current = self.current().await?;
        let theme = match current.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_theme(theme).await
    }

    // Write to a sibling temp file and rename over the target so readers
    // never observe a partial file.
    async fn persist(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(settings)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("movie-calendar-settings.json"))
    }

    #[tokio::test]
    async fn test_not_loaded_until_hydrated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(
            store.current().await,
            Err(SettingsError::NotYetLoaded)
        ));
        assert!(matches!(
            store.set_theme(Theme::Dark).await,
            Err(SettingsError::NotYetLoaded)
        ));
        assert!(!store.is_hydrated().await);
    }

    #[tokio::test]
    async fn test_missing_file_hydrates_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let settings = store.hydrate().await.unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::Ko);
        assert_eq!(settings.region, Region::All);
        assert_eq!(store.current().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_updates_persist_across_stores() {
        let dir = TempDir::new().unwrap();

        let store = store_in(&dir);
        store.hydrate().await.unwrap();
        store.set_language(Language::En).await.unwrap();
        let saved = store.set_region(Region::Jp).await.unwrap();
        assert_eq!(saved.language, Language::En);

        let reopened = store_in(&dir);
        let loaded = reopened.hydrate().await.unwrap();
        assert_eq!(loaded, saved);
        assert!(!dir.path().join("movie-calendar-settings.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.hydrate().await.unwrap();
        store.set_region(Region::Us).await.unwrap();

        let settings = store.toggle_theme().await.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.region, Region::Us);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), b"{not json").unwrap();

        let settings = store.hydrate().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.hydrate().await.unwrap();
        store.set_region(Region::Kr).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "light");
        assert_eq!(raw["language"], "ko");
        assert_eq!(raw["region"], "KR");
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/dir/settings.json"));
        store.hydrate().await.unwrap();
        store.set_theme(Theme::Dark).await.unwrap();
        assert!(store.path().exists());
    }
}
