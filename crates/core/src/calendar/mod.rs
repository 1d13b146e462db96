//! Month-based release calendar.

mod board;
mod upcoming;
mod window;

pub use board::{MergeOutcome, MovieBoard, SettingsSnapshot};
pub use upcoming::{month_cache_key, PageFailurePolicy, UpcomingReleases, DEFAULT_MAX_PAGES};
pub use window::{InvalidMonth, MonthWindow};
