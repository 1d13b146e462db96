//! The accumulated movie list behind the calendar view.
//!
//! Months are merged in as they load. Each merge carries the settings it was
//! fetched with; a result fetched under different settings than the board's
//! current ones is dropped instead of merged.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::MonthWindow;
use crate::catalog::CatalogItem;
use crate::locale::{Language, Region};
use crate::metrics::STALE_MERGES;
use crate::recommend::RecommendationPolicy;

/// The language and region a request was issued under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub language: Language,
    pub region: Region,
}

impl SettingsSnapshot {
    pub fn new(language: Language, region: Region) -> Self {
        Self { language, region }
    }
}

/// Result of [`MovieBoard::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// New movies were appended.
    Merged { added: usize },
    /// The batch was fetched under other settings and was dropped.
    Stale,
    /// The month had already been merged for these settings.
    AlreadyLoaded,
}

#[derive(Debug, Default)]
pub struct MovieBoard {
    snapshot: SettingsSnapshot,
    movies: Vec<CatalogItem>,
    known_ids: HashSet<u64>,
    loaded_months: HashSet<(i32, u32)>,
}

impl MovieBoard {
    pub fn new(snapshot: SettingsSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Settings the accumulated movies belong to.
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.snapshot
    }

    /// Accumulated movies in first-seen order.
    pub fn movies(&self) -> &[CatalogItem] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn is_loaded(&self, window: &MonthWindow) -> bool {
        self.loaded_months
            .contains(&(window.year(), window.month()))
    }

    /// Number of months merged so far.
    pub fn month_count(&self) -> usize {
        self.loaded_months.len()
    }

    /// Forget everything and start over under `snapshot`.
    pub fn reset(&mut self, snapshot: SettingsSnapshot) {
        info!(
            language = %snapshot.language,
            region = %snapshot.region,
            "Resetting movie board"
        );
        self.snapshot = snapshot;
        self.movies.clear();
        self.known_ids.clear();
        self.loaded_months.clear();
    }

    /// Allow every month to be merged again, keeping the movies already held.
    pub fn forget_loaded_months(&mut self) {
        debug!(months = self.loaded_months.len(), "Forgetting loaded months");
        self.loaded_months.clear();
    }

    /// Merge a month fetched under `requested`.
    ///
    /// Dropped when `requested` differs from the board's snapshot. Otherwise
    /// movies whose id is already present are skipped, keeping the first-seen
    /// copy.
    pub fn merge(
        &mut self,
        requested: SettingsSnapshot,
        window: &MonthWindow,
        items: &[CatalogItem],
    ) -> MergeOutcome {
        if requested != self.snapshot {
            debug!(
                requested_language = %requested.language,
                requested_region = %requested.region,
                "Discarding month fetched under stale settings"
            );
            STALE_MERGES.inc();
            return MergeOutcome::Stale;
        }

        if !self.loaded_months.insert((window.year(), window.month())) {
            return MergeOutcome::AlreadyLoaded;
        }

        let before = self.movies.len();
        for item in items {
            if self.known_ids.insert(item.id) {
                self.movies.push(item.clone());
            }
        }

        MergeOutcome::Merged {
            added: self.movies.len() - before,
        }
    }

    /// Movies grouped by release date, recommended first within each day.
    ///
    /// Movies without a release date are left out.
    pub fn events_by_date(
        &self,
        policy: &RecommendationPolicy,
    ) -> BTreeMap<NaiveDate, Vec<&CatalogItem>> {
        let mut days: BTreeMap<NaiveDate, Vec<&CatalogItem>> = BTreeMap::new();
        for movie in &self.movies {
            if let Some(date) = movie.release_date {
                days.entry(date).or_default().push(movie);
            }
        }
        for events in days.values_mut() {
            policy.sort_by_recommendation(events);
        }
        days
    }
}
