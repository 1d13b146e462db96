//! Catalog proxy endpoint.
//!
//! `GET /api/tmdb?action=...` forwards one catalog request and returns the
//! upstream body unchanged. `upcoming-all` is the exception: it runs the
//! whole month fan-out server-side and answers `{ "results": [...] }`.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use premiere_core::{CatalogError, CatalogItem, CatalogRequest, Language, MonthWindow, Region};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyParams {
    pub action: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub page: Option<String>,
    pub movie_id: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpcomingAllResponse<'a> {
    results: &'a [CatalogItem],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyAction {
    UpcomingAll,
    Upcoming,
    Details,
    Videos,
    ReleaseDates,
    Search,
}

impl ProxyAction {
    fn as_str(self) -> &'static str {
        match self {
            ProxyAction::UpcomingAll => "upcoming-all",
            ProxyAction::Upcoming => "upcoming",
            ProxyAction::Details => "details",
            ProxyAction::Videos => "videos",
            ProxyAction::ReleaseDates => "release-dates",
            ProxyAction::Search => "search",
        }
    }
}

impl FromStr for ProxyAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming-all" => Ok(ProxyAction::UpcomingAll),
            "upcoming" => Ok(ProxyAction::Upcoming),
            "details" => Ok(ProxyAction::Details),
            "videos" => Ok(ProxyAction::Videos),
            "release-dates" => Ok(ProxyAction::ReleaseDates),
            "search" => Ok(ProxyAction::Search),
            _ => Err(()),
        }
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

impl ProxyParams {
    fn language(&self) -> Result<Language, ApiError> {
        match self.language.as_deref() {
            None | Some("") => Ok(Language::default()),
            Some(code) => code
                .parse::<Language>()
                .map_err(|e| bad_request(e.to_string())),
        }
    }

    fn region(&self) -> Result<Region, ApiError> {
        match self.region.as_deref() {
            None | Some("") => Ok(Region::default()),
            Some(code) => code
                .parse::<Region>()
                .map_err(|e| bad_request(e.to_string())),
        }
    }

    fn page(&self) -> Result<u32, ApiError> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|&p| p >= 1)
                .ok_or_else(|| bad_request(format!("Invalid page: {}", raw))),
        }
    }

    fn movie_id(&self) -> Result<u64, ApiError> {
        let raw = self
            .movie_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| bad_request("Missing movieId"))?;
        raw.parse()
            .map_err(|_| bad_request(format!("Invalid movieId: {}", raw)))
    }

    fn query(&self) -> Result<String, ApiError> {
        self.query
            .clone()
            .ok_or_else(|| bad_request("Missing query"))
    }

    /// The month to discover, from `startDate` or from `year` and `month`.
    ///
    /// `endDate` is accepted for compatibility but must fall in the same
    /// month as `startDate`; the window always ends on the month's last day.
    fn window(&self) -> Result<MonthWindow, ApiError> {
        if let Some(start) = self.start_date.as_deref() {
            let start = parse_date(start)?;
            let window =
                MonthWindow::containing(start).map_err(|e| bad_request(e.to_string()))?;
            if let Some(end) = self.end_date.as_deref() {
                let end = parse_date(end)?;
                if !window.contains(end) {
                    return Err(bad_request("startDate and endDate must share a month"));
                }
            }
            return Ok(window);
        }

        match (self.year.as_deref(), self.month.as_deref()) {
            (Some(year), Some(month)) => {
                let year = year
                    .parse()
                    .map_err(|_| bad_request(format!("Invalid year: {}", year)))?;
                let month = month
                    .parse()
                    .map_err(|_| bad_request(format!("Invalid month: {}", month)))?;
                MonthWindow::new(year, month).map_err(|e| bad_request(e.to_string()))
            }
            _ => Err(bad_request("Missing startDate or year and month")),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid date: {}", raw)))
}

fn upstream_error(action: ProxyAction, e: CatalogError) -> ApiError {
    match e {
        CatalogError::NotConfigured(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "API key not configured")
        }
        e => {
            warn!(action = action.as_str(), error = %e, "Catalog request failed");
            let status = StatusCode::from_u16(e.status()).unwrap_or(StatusCode::BAD_GATEWAY);
            let message = match action {
                ProxyAction::UpcomingAll => "Failed to fetch",
                _ => "Failed to fetch from TMDB",
            };
            api_error(status, message)
        }
    }
}

/// GET /api/tmdb
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyParams>,
) -> Result<Response, ApiError> {
    if !state.catalog().is_configured() {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key not configured",
        ));
    }

    let action: ProxyAction = params
        .action
        .as_deref()
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| bad_request("Invalid action"))?;

    debug!(action = action.as_str(), "Proxying catalog request");

    let request = match action {
        ProxyAction::UpcomingAll => {
            let window = params.window()?;
            let items = state
                .upcoming()
                .month(window, params.language()?, params.region()?)
                .await
                .map_err(|e| upstream_error(action, e))?;
            return Ok(Json(UpcomingAllResponse {
                results: items.as_slice(),
            })
            .into_response());
        }
        // Discovery always spans the whole month of startDate, so a
        // mid-month startDate is widened and a cross-month range is a 400.
        ProxyAction::Upcoming => CatalogRequest::Discover {
            window: params.window()?,
            language: params.language()?,
            region: params.region()?,
            page: params.page()?,
        },
        ProxyAction::Details => CatalogRequest::Details {
            movie_id: params.movie_id()?,
            language: params.language()?,
        },
        ProxyAction::Videos => CatalogRequest::Videos {
            movie_id: params.movie_id()?,
            language: params.language()?,
        },
        ProxyAction::ReleaseDates => CatalogRequest::ReleaseDates {
            movie_id: params.movie_id()?,
        },
        ProxyAction::Search => CatalogRequest::Search {
            query: params.query()?,
            language: params.language()?,
        },
    };

    let body = state
        .catalog()
        .fetch(&request)
        .await
        .map_err(|e| upstream_error(action, e))?;
    Ok(Json(body).into_response())
}
