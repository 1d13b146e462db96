//! Movie detail aggregation for the detail modal.
//!
//! Details, videos and (for worldwide browsing) release dates are fetched
//! concurrently and combined. Only the details request is fatal.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::calendar::SettingsSnapshot;
use crate::catalog::{
    fetch_typed, CatalogApi, CatalogError, CatalogRequest, EarliestRelease, MovieDetails,
    MovieVideo, ReleaseDatesResponse, VideoList,
};
use crate::locale::Language;

const YOUTUBE: &str = "YouTube";

/// Everything the detail modal shows for one movie.
#[derive(Debug, Clone, Serialize)]
pub struct MovieModal {
    pub details: MovieDetails,
    pub videos: Vec<MovieVideo>,
    pub trailer: Option<MovieVideo>,
    /// Territory whose theatrical release matches the movie's date, or the
    /// earliest one. Only looked up when browsing all regions.
    pub release_country: Option<String>,
}

/// Pick the video to embed.
///
/// Only YouTube videos qualify. Preference: official trailer, any trailer,
/// teaser, then whatever comes first.
pub fn select_trailer(videos: &[MovieVideo]) -> Option<&MovieVideo> {
    let youtube: Vec<&MovieVideo> = videos.iter().filter(|v| v.site == YOUTUBE).collect();

    youtube
        .iter()
        .find(|v| v.kind == "Trailer" && v.official)
        .or_else(|| youtube.iter().find(|v| v.kind == "Trailer"))
        .or_else(|| youtube.iter().find(|v| v.kind == "Teaser"))
        .or_else(|| youtube.first())
        .copied()
}

/// Find the theatrical release to badge.
///
/// A theatrical release on exactly `target` wins immediately. Otherwise the
/// chronologically earliest theatrical release is returned, first seen on
/// ties.
pub fn find_earliest_release(
    dates: &ReleaseDatesResponse,
    target: NaiveDate,
) -> Option<EarliestRelease> {
    let mut earliest: Option<EarliestRelease> = None;

    for territory in &dates.results {
        for event in territory.release_dates.iter().filter(|e| e.is_theatrical()) {
            let Some(date) = event.date() else {
                continue;
            };

            if date == target {
                return Some(EarliestRelease {
                    country: territory.iso_3166_1.clone(),
                    date,
                });
            }

            if earliest.as_ref().map_or(true, |e| date < e.date) {
                earliest = Some(EarliestRelease {
                    country: territory.iso_3166_1.clone(),
                    date,
                });
            }
        }
    }

    earliest
}

/// Cached access to per-movie catalog data.
pub struct MovieDetailsService {
    catalog: Arc<dyn CatalogApi>,
    details: TtlCache<Arc<MovieDetails>>,
    videos: TtlCache<Arc<Vec<MovieVideo>>>,
    release_dates: TtlCache<Arc<ReleaseDatesResponse>>,
}

impl MovieDetailsService {
    pub fn new(catalog: Arc<dyn CatalogApi>, ttl: Duration) -> Self {
        Self {
            catalog,
            details: TtlCache::new(ttl),
            videos: TtlCache::new(ttl),
            release_dates: TtlCache::new(ttl),
        }
    }

    pub async fn details(
        &self,
        movie_id: u64,
        language: Language,
    ) -> Result<Arc<MovieDetails>, CatalogError> {
        let key = format!("details-{}-{}", movie_id, language.code());
        self.details
            .get_or_fetch(&key, || async {
                let request = CatalogRequest::Details { movie_id, language };
                fetch_typed(self.catalog.as_ref(), &request)
                    .await
                    .map(Arc::new)
            })
            .await
    }

    /// Videos in `language`. A Korean listing with no videos falls back to
    /// the English one, which is requested alongside it.
    pub async fn videos(
        &self,
        movie_id: u64,
        language: Language,
    ) -> Result<Arc<Vec<MovieVideo>>, CatalogError> {
        let key = format!("videos-{}-{}", movie_id, language.code());
        self.videos
            .get_or_fetch(&key, || async {
                let primary = CatalogRequest::Videos { movie_id, language };
                let fallback = (language == Language::Ko).then_some(CatalogRequest::Videos {
                    movie_id,
                    language: Language::En,
                });

                let (primary, fallback) = futures::join!(
                    fetch_typed::<VideoList>(self.catalog.as_ref(), &primary),
                    async {
                        match &fallback {
                            Some(request) => {
                                Some(fetch_typed::<VideoList>(self.catalog.as_ref(), request).await)
                            }
                            None => None,
                        }
                    }
                );

                let videos = match (primary, fallback) {
                    (Ok(list), _) if !list.results.is_empty() => list.results,
                    (_, Some(Ok(english))) => {
                        debug!(movie_id, "Using English videos");
                        english.results
                    }
                    (Ok(list), _) => list.results,
                    (Err(e), _) => return Err(e),
                };

                Ok(Arc::new(videos))
            })
            .await
    }

    pub async fn release_dates(
        &self,
        movie_id: u64,
    ) -> Result<Arc<ReleaseDatesResponse>, CatalogError> {
        let key = format!("release-dates-{}", movie_id);
        self.release_dates
            .get_or_fetch(&key, || async {
                let request = CatalogRequest::ReleaseDates { movie_id };
                fetch_typed(self.catalog.as_ref(), &request)
                    .await
                    .map(Arc::new)
            })
            .await
    }

    /// Build the modal for `movie_id`.
    ///
    /// `release_date` is the date shown on the calendar; the release-country
    /// lookup is skipped without it or when a specific region is selected.
    pub async fn modal(
        &self,
        movie_id: u64,
        settings: SettingsSnapshot,
        release_date: Option<NaiveDate>,
    ) -> Result<MovieModal, CatalogError> {
        let lookup_country = settings.region.is_all() && release_date.is_some();

        let (details, videos, dates) = futures::join!(
            self.details(movie_id, settings.language),
            self.videos(movie_id, settings.language),
            async {
                if lookup_country {
                    Some(self.release_dates(movie_id).await)
                } else {
                    None
                }
            }
        );

        let details = details?;

        let videos = videos.unwrap_or_else(|e| {
            warn!(movie_id, error = %e, "Failed to fetch videos");
            Arc::new(Vec::new())
        });

        let release_country = match (dates, release_date) {
            (Some(Ok(dates)), Some(target)) => {
                find_earliest_release(&dates, target).map(|r| r.country)
            }
            (Some(Err(e)), _) => {
                warn!(movie_id, error = %e, "Failed to fetch release dates");
                None
            }
            _ => None,
        };

        let trailer = select_trailer(&videos).cloned();

        Ok(MovieModal {
            details: details.as_ref().clone(),
            videos: videos.as_ref().clone(),
            trailer,
            release_country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::catalog::{ReleaseEvent, TerritoryReleases};
    use crate::locale::Region;
    use crate::testing::{fixtures, MockCatalog};
    use serde_json::json;

    fn video(key: &str, site: &str, kind: &str, official: bool) -> MovieVideo {
        fixtures::movie_video(key, site, kind, official)
    }

    fn territory(code: &str, events: &[(&str, u8)]) -> TerritoryReleases {
        TerritoryReleases {
            iso_3166_1: code.to_string(),
            release_dates: events
                .iter()
                .map(|(date, kind)| ReleaseEvent {
                    certification: String::new(),
                    release_date: format!("{}T00:00:00.000Z", date),
                    kind: *kind,
                })
                .collect(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailer_prefers_official_trailer() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", true),
            video("trailer", "YouTube", "Trailer", false),
            video("official", "YouTube", "Trailer", true),
        ];
        assert_eq!(select_trailer(&videos).unwrap().key, "official");
    }

    #[test]
    fn test_trailer_falls_back_in_order() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", false),
            video("trailer", "YouTube", "Trailer", false),
        ];
        assert_eq!(select_trailer(&videos).unwrap().key, "trailer");

        let videos = vec![
            video("clip", "YouTube", "Clip", false),
            video("teaser", "YouTube", "Teaser", false),
        ];
        assert_eq!(select_trailer(&videos).unwrap().key, "teaser");

        let videos = vec![video("clip", "YouTube", "Featurette", false)];
        assert_eq!(select_trailer(&videos).unwrap().key, "clip");
    }

    #[test]
    fn test_trailer_ignores_other_sites() {
        let videos = vec![video("vimeo", "Vimeo", "Trailer", true)];
        assert!(select_trailer(&videos).is_none());
        assert!(select_trailer(&[]).is_none());
    }

    #[test]
    fn test_exact_match_beats_earlier_date() {
        let dates = ReleaseDatesResponse {
            id: 1,
            results: vec![
                territory("Y", &[("2024-04-20", 3)]),
                territory("X", &[("2024-05-01", 3)]),
            ],
        };

        let release = find_earliest_release(&dates, date(2024, 5, 1)).unwrap();
        assert_eq!(release.country, "X");
        assert_eq!(release.date, date(2024, 5, 1));
    }

    #[test]
    fn test_earliest_theatrical_without_exact_match() {
        let dates = ReleaseDatesResponse {
            id: 1,
            results: vec![
                territory("US", &[("2024-06-10", 3), ("2024-03-01", 4)]),
                territory("KR", &[("2024-06-05", 2)]),
                territory("FR", &[("2024-06-07", 3)]),
            ],
        };

        let release = find_earliest_release(&dates, date(2024, 7, 1)).unwrap();
        // The digital release on 2024-03-01 does not count.
        assert_eq!(release.country, "KR");
    }

    #[test]
    fn test_no_theatrical_release() {
        let dates = ReleaseDatesResponse {
            id: 1,
            results: vec![territory("US", &[("2024-06-10", 4), ("2024-06-11", 1)])],
        };
        assert!(find_earliest_release(&dates, date(2024, 6, 10)).is_none());
    }

    async fn catalog_with_movie(movie_id: u64) -> Arc<MockCatalog> {
        let catalog = Arc::new(MockCatalog::new());
        for language in [Language::Ko, Language::En] {
            catalog
                .set_response(
                    CatalogRequest::Details { movie_id, language },
                    fixtures::movie_details_json(movie_id, "Dune"),
                )
                .await;
        }
        catalog
    }

    #[tokio::test]
    async fn test_korean_videos_fall_back_to_english() {
        let catalog = catalog_with_movie(7).await;
        catalog
            .set_response(
                CatalogRequest::Videos { movie_id: 7, language: Language::Ko },
                json!({"id": 7, "results": []}),
            )
            .await;
        catalog
            .set_response(
                CatalogRequest::Videos { movie_id: 7, language: Language::En },
                fixtures::video_list_json(7, vec![video("en", "YouTube", "Trailer", true)]),
            )
            .await;

        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);
        let videos = service.videos(7, Language::Ko).await.unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key, "en");
    }

    #[tokio::test]
    async fn test_english_videos_have_no_fallback() {
        let catalog = catalog_with_movie(7).await;
        catalog
            .set_response(
                CatalogRequest::Videos { movie_id: 7, language: Language::En },
                json!({"id": 7, "results": []}),
            )
            .await;

        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);
        let videos = service.videos(7, Language::En).await.unwrap();

        assert!(videos.is_empty());
        assert_eq!(catalog.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_modal_release_dates_failure_is_not_fatal() {
        let catalog = catalog_with_movie(7).await;
        catalog
            .set_response(
                CatalogRequest::Videos { movie_id: 7, language: Language::En },
                fixtures::video_list_json(7, vec![video("t", "YouTube", "Trailer", true)]),
            )
            .await;
        catalog
            .fail_request(CatalogRequest::ReleaseDates { movie_id: 7 }, 500)
            .await;

        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);
        let modal = service
            .modal(
                7,
                SettingsSnapshot::new(Language::En, Region::All),
                Some(date(2024, 5, 1)),
            )
            .await
            .unwrap();

        assert_eq!(modal.details.item.id, 7);
        assert_eq!(modal.trailer.unwrap().key, "t");
        assert!(modal.release_country.is_none());
    }

    #[tokio::test]
    async fn test_modal_finds_release_country() {
        let catalog = catalog_with_movie(7).await;
        catalog
            .set_response(
                CatalogRequest::ReleaseDates { movie_id: 7 },
                serde_json::to_value(ReleaseDatesResponse {
                    id: 7,
                    results: vec![
                        territory("US", &[("2024-04-20", 3)]),
                        territory("KR", &[("2024-05-01", 3)]),
                    ],
                })
                .unwrap(),
            )
            .await;

        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);
        let modal = service
            .modal(
                7,
                SettingsSnapshot::new(Language::En, Region::All),
                Some(date(2024, 5, 1)),
            )
            .await
            .unwrap();

        assert_eq!(modal.release_country.as_deref(), Some("KR"));
        // Missing videos degrade to an empty list.
        assert!(modal.trailer.is_none());
    }

    #[tokio::test]
    async fn test_modal_skips_release_dates_for_specific_region() {
        let catalog = catalog_with_movie(7).await;

        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);
        service
            .modal(
                7,
                SettingsSnapshot::new(Language::En, Region::Kr),
                Some(date(2024, 5, 1)),
            )
            .await
            .unwrap();

        assert!(!catalog
            .requests()
            .await
            .contains(&CatalogRequest::ReleaseDates { movie_id: 7 }));
    }

    #[tokio::test]
    async fn test_modal_fails_when_details_fail() {
        let catalog = Arc::new(MockCatalog::new());
        let service = MovieDetailsService::new(catalog, DEFAULT_TTL);

        let err = service
            .modal(404, SettingsSnapshot::default(), None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_details_are_cached() {
        let catalog = catalog_with_movie(7).await;
        let service = MovieDetailsService::new(catalog.clone(), DEFAULT_TTL);

        service.details(7, Language::Ko).await.unwrap();
        service.details(7, Language::Ko).await.unwrap();

        assert_eq!(catalog.request_count().await, 1);
    }
}
