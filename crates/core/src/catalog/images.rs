//! Poster and backdrop URL building.

use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Shown in place of a missing poster.
pub const POSTER_PLACEHOLDER: &str = "/no-poster.png";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterSize {
    W185,
    #[default]
    W342,
    W500,
    Original,
}

impl PosterSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PosterSize::W185 => "w185",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
            PosterSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackdropSize {
    W780,
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    pub fn as_str(self) -> &'static str {
        match self {
            BackdropSize::W780 => "w780",
            BackdropSize::W1280 => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

/// Builds absolute image URLs from catalog-relative paths.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Poster URL, or the placeholder when the movie has none.
    pub fn poster(&self, path: Option<&str>, size: PosterSize) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(p) => format!("{}/{}{}", self.base_url, size.as_str(), p),
            None => POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Backdrop URL, or an empty string when the movie has none.
    pub fn backdrop(&self, path: Option<&str>, size: BackdropSize) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(p) => format!("{}/{}{}", self.base_url, size.as_str(), p),
            None => String::new(),
        }
    }
}
