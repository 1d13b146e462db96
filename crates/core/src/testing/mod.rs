//! Testing utilities and a mock catalog.
//!
//! The mock lets services and the HTTP layer be exercised without reaching
//! the real movie catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use premiere_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = Arc::new(MockCatalog::new());
//! catalog.set_response(request, fixtures::discover_page(1, 1, movies)).await;
//!
//! // Use in AppState...
//! ```

mod mock_catalog;

pub use mock_catalog::MockCatalog;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    use crate::catalog::{CatalogItem, MovieVideo};

    /// Create a catalog item with neutral scores (never recommended unless
    /// the title is allow-listed).
    pub fn catalog_item(id: u64, title: &str, release_date: Option<NaiveDate>) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            original_title: title.to_string(),
            overview: format!("Overview of {}", title),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            backdrop_path: None,
            release_date,
            vote_average: 6.0,
            vote_count: 10,
            popularity: 20.0,
            genre_ids: vec![18],
        }
    }

    /// A discover/search response body.
    pub fn discover_page(page: u32, total_pages: u32, results: Vec<CatalogItem>) -> Value {
        let total_results = results.len() as u32 * total_pages.max(1);
        json!({
            "page": page,
            "results": results,
            "total_pages": total_pages,
            "total_results": total_results,
        })
    }

    /// A movie details response body.
    pub fn movie_details_json(id: u64, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "original_title": title,
            "overview": format!("Overview of {}", title),
            "poster_path": format!("/poster-{}.jpg", id),
            "backdrop_path": format!("/backdrop-{}.jpg", id),
            "release_date": "2024-05-01",
            "vote_average": 7.0,
            "vote_count": 1200,
            "popularity": 150.0,
            "genres": [{"id": 878, "name": "Science Fiction"}],
            "runtime": 155,
            "production_companies": [],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "budget": 0,
            "revenue": 0,
            "tagline": "",
            "status": "Released",
        })
    }

    pub fn movie_video(key: &str, site: &str, kind: &str, official: bool) -> MovieVideo {
        MovieVideo {
            id: format!("video-{}", key),
            key: key.to_string(),
            name: format!("{} {}", kind, key),
            site: site.to_string(),
            kind: kind.to_string(),
            official,
        }
    }

    /// A videos response body.
    pub fn video_list_json(movie_id: u64, videos: Vec<MovieVideo>) -> Value {
        json!({ "id": movie_id, "results": videos })
    }
}
