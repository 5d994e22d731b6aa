//! The coarse dataset refetch boundary.
//!
//! Screens fetch their full dataset once per mount and again when the
//! user widens or narrows the coarse date window ("last month", "last 90
//! days"). There is no real backend here: a [`Source`] closure stands in
//! for the network call and [`command`] resolves it after an artificial
//! delay, delivering either a [`CompleteMsg`] or a [`FailedMsg`].
//!
//! Every request carries a generation id. The table controller bumps its
//! generation when issuing a request and ignores messages from older
//! ones, so a response that arrives after the user has navigated on (or
//! re-fetched) is dropped instead of clobbering newer state.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datatable_widgets::fetch::DateWindow;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let window = DateWindow::last_month(today);
//! assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
//! assert!(!window.contains(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use chrono::{Days, NaiveDate};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

static LAST_REQUEST: AtomicI64 = AtomicI64::new(0);

/// Allocates a request generation id. Each refetch gets a fresh one; the
/// id in a completion message identifies which request it answers.
pub fn next_request_id() -> i64 {
    LAST_REQUEST.fetch_add(1, Ordering::SeqCst) + 1
}

/// Artificial latency of the simulated call.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

/// Why a fetch failed. All variants are recoverable by re-fetching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The simulated backend could not be reached.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// The source produced something it could not turn into records.
    #[error("data source returned an unusable payload")]
    BadPayload,
}

/// Where the controller stands with respect to its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The dataset is usable.
    Ready,
    /// A refetch is in flight; the dataset must not be paged or sorted.
    Loading,
    /// The last refetch failed; the previous dataset is still shown.
    Failed(FetchError),
}

impl LoadState {
    /// Whether a refetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// The inclusive date window a refetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, swapping inverted bounds rather than erroring.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// The thirty days up to and including `today`.
    pub fn last_month(today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_days(Days::new(30)).unwrap_or(today),
            end: today,
        }
    }

    /// The ninety days up to and including `today`.
    pub fn last_90_days(today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_days(Days::new(90)).unwrap_or(today),
            end: today,
        }
    }

    /// Whether `date` falls inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The data-source closure a screen plugs into the controller.
pub type Source<R> = Arc<dyn Fn(DateWindow) -> Result<Vec<R>, FetchError> + Send + Sync>;

/// Message delivered when a fetch request resolves successfully.
#[derive(Debug)]
pub struct CompleteMsg<R> {
    /// Generation id of the request this answers.
    pub id: i64,
    /// The freshly fetched dataset.
    pub records: Vec<R>,
}

/// Message delivered when a fetch request fails.
#[derive(Debug, Clone)]
pub struct FailedMsg {
    /// Generation id of the request this answers.
    pub id: i64,
    /// What went wrong.
    pub error: FetchError,
}

/// Builds the command that resolves `source` over `window` after `delay`,
/// producing a [`CompleteMsg`] or [`FailedMsg`] tagged with `id`.
pub fn command<R>(id: i64, delay: Duration, window: DateWindow, source: Source<R>) -> Cmd
where
    R: Send + Sync + 'static,
{
    debug!(id, ?window, "refetch issued");
    bubbletea_tick(delay, move |_| match source(window) {
        Ok(records) => {
            debug!(id, count = records.len(), "refetch resolved");
            Box::new(CompleteMsg { id, records }) as Msg
        }
        Err(error) => {
            debug!(id, %error, "refetch failed");
            Box::new(FailedMsg { id, error }) as Msg
        }
    })
}
