//! Async client for live "next to go" race feeds.
//!
//! `nexttogo` keeps a short, time-ordered list of the races about to start
//! across three disciplines (horses, dogs, trots), refreshed from a remote
//! racing API exactly when the displayed data would otherwise go stale —
//! never on a fixed polling interval.
//!
//! # Features
//!
//! - **Deadline-driven refresh**: one timer, armed at the soonest race's
//!   staleness boundary, re-armed on every derivation
//! - **Pure derivation**: flatten/filter/sort is a pure function of the raw
//!   response, a reference time and the category selection
//! - **Countdowns**: drift-free formatting with tiered urgency
//! - **Injectable time and data sources** for deterministic tests
//!
//! # Quick start
//!
//! ```rust,no_run
//! use nexttogo::{FeedConfig, NextToGo, RaceRow};
//! use futures::StreamExt;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> nexttogo::Result<()> {
//!     let feed = NextToGo::start(FeedConfig::default())?;
//!
//!     let mut frames = Box::pin(feed.redraws(Duration::from_secs(1)));
//!     while let Some(state) = frames.next().await {
//!         let now = chrono::Utc::now();
//!         for race in &state.races {
//!             let row = RaceRow::new(race, now);
//!             println!("{} {:?} {}", row.label, row.icon, row.countdown.text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod clock;
mod countdown;
mod display;
mod error;
mod feed;
mod normalize;
mod provider;
pub mod providers;
mod scheduler;
pub mod stream;
#[cfg(test)]
mod test_utils;
pub mod types;

// Core exports
pub use clock::{Clock, SystemClock};
pub use countdown::{Countdown, Urgency, time_to_go};
pub use display::RaceRow;
pub use error::{FeedError, Result};
pub use feed::{FeedConfig, RaceFeed, RaceFeedState};
pub use normalize::{STALE_AFTER_SECONDS, next_to_go};
pub use provider::RaceProvider;
pub use providers::RacingApiClient;
pub use scheduler::RefetchScheduler;
pub use types::{CategorySelection, NextRacesResponse, RaceCategory, RaceSummary};

use std::sync::Arc;

/// Unified entry point for starting race feeds.
///
/// # Examples
///
/// ## Against the live API
/// ```rust,no_run
/// use nexttogo::{FeedConfig, NextToGo};
///
/// # #[tokio::main]
/// # async fn main() -> nexttogo::Result<()> {
/// let feed = NextToGo::start(FeedConfig::default())?;
/// # Ok(())
/// # }
/// ```
///
/// ## Against a custom provider and clock
/// ```rust,ignore
/// let feed = NextToGo::start_with(my_provider, my_clock, FeedConfig::default());
/// ```
pub struct NextToGo;

impl NextToGo {
    /// Start a feed against the live racing API with the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed from the
    /// configuration.
    pub fn start(config: FeedConfig) -> Result<RaceFeed> {
        let provider = RacingApiClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(RaceFeed::start(provider, Arc::new(SystemClock), config))
    }

    /// Start a feed over an arbitrary provider and clock.
    ///
    /// This is the seam integration tests use: a canned provider plus a
    /// simulated clock give full control over both data and time.
    pub fn start_with<P>(provider: P, clock: Arc<dyn Clock>, config: FeedConfig) -> RaceFeed
    where
        P: RaceProvider,
    {
        RaceFeed::start(provider, clock, config)
    }
}
