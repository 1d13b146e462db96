//! Types for movie catalog API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Listing Types
// ============================================================================

/// A movie as returned by discover and search listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Catalog movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Title in the original language.
    #[serde(default)]
    pub original_title: String,
    /// Synopsis.
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// Poster path (relative to the image base URL).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop path (relative to the image base URL).
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Primary release date. The catalog sends "" for unknown dates.
    #[serde(default, deserialize_with = "optional_date")]
    pub release_date: Option<NaiveDate>,
    /// Average vote (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes.
    #[serde(default)]
    pub vote_count: u64,
    /// Catalog-defined popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// One page of a discover or search listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscoverPage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<CatalogItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

// ============================================================================
// Detail Types
// ============================================================================

/// Full movie details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

// ============================================================================
// Video Types
// ============================================================================

/// A trailer, teaser, clip or similar video attached to a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieVideo {
    pub id: String,
    /// Site-specific video key (the YouTube video ID for YouTube).
    pub key: String,
    pub name: String,
    /// Hosting platform, e.g. "YouTube".
    pub site: String,
    /// Video type, e.g. "Trailer" or "Teaser".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoList {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub results: Vec<MovieVideo>,
}

// ============================================================================
// Release Date Types
// ============================================================================

/// Release type codes that count as a theatrical release.
pub const THEATRICAL_RELEASE_TYPES: [u8; 2] = [2, 3];

/// Release dates for a movie grouped by territory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseDatesResponse {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub results: Vec<TerritoryReleases>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerritoryReleases {
    /// ISO 3166-1 territory code.
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ReleaseEvent>,
}

/// A single release event.
///
/// Types: 1 premiere, 2 theatrical (limited), 3 theatrical, 4 digital,
/// 5 physical, 6 TV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseEvent {
    #[serde(default)]
    pub certification: String,
    /// ISO 8601 timestamp, e.g. "2024-05-01T00:00:00.000Z".
    pub release_date: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

impl ReleaseEvent {
    pub fn is_theatrical(&self) -> bool {
        THEATRICAL_RELEASE_TYPES.contains(&self.kind)
    }

    /// Calendar date portion of the timestamp.
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.release_date.split('T').next()?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// The territory and date chosen to badge a movie's release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarliestRelease {
    pub country: String,
    pub date: NaiveDate,
}

// ============================================================================
// Deserialization helpers
// ============================================================================

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
