//! The race feed: orchestrates fetching, derivation and refetch scheduling.
//!
//! A [`RaceFeed`] is a handle onto a driver task that owns the provider, the
//! most recent raw response, the category selection and the refetch timer.
//! Derived state is published through a watch channel, so observers always
//! see a complete list — never a half-updated one — and the newest state
//! wins if they fall behind.
//!
//! Data flows one way: response → derive → publish + re-arm timer → timer
//! eventually triggers the next fetch. Selection changes re-derive from the
//! already-held response without touching the network.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::normalize::{self, STALE_AFTER_SECONDS};
use crate::provider::RaceProvider;
use crate::scheduler::RefetchScheduler;
use crate::stream::RedrawExt;
use crate::types::{CategorySelection, NextRacesResponse, RaceSummary};

/// Configuration for a race feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the racing API, with a trailing slash.
    pub base_url: String,
    /// How many races to request per fetch. Should exceed `display_count`
    /// because already-started races are filtered out after the fetch.
    pub fetch_count: u32,
    /// Maximum number of races the derived list holds.
    pub display_count: usize,
    /// Categories selected when the feed starts.
    pub initial_selection: CategorySelection,
    /// Per-request timeout for the HTTP provider.
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: crate::providers::http::DEFAULT_BASE_URL.to_string(),
            fetch_count: 10,
            display_count: 5,
            initial_selection: CategorySelection::all(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// The derived state a feed currently presents.
///
/// Replaced atomically on every new response or selection change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceFeedState {
    /// Next races, soonest first, already filtered and truncated.
    pub races: Vec<RaceSummary>,
    /// True from the start of a fetch until it resolves. While a refetch is
    /// in flight the previous race list stays visible.
    pub is_loading: bool,
}

/// Commands the handle sends to the driver task.
enum FeedCommand {
    Toggle(crate::types::RaceCategory),
    Select(CategorySelection),
    Refresh,
}

/// Handle to a running race feed.
///
/// Dropping the handle cancels the driver task and any pending refetch
/// timer; a timer can never fire a fetch after disposal.
pub struct RaceFeed {
    state: watch::Receiver<RaceFeedState>,
    commands: mpsc::Sender<FeedCommand>,
    cancel: CancellationToken,
}

impl RaceFeed {
    /// Start a feed over the given provider and clock.
    pub fn start<P>(provider: P, clock: Arc<dyn Clock>, config: FeedConfig) -> Self
    where
        P: RaceProvider,
    {
        let (state_tx, state_rx) = watch::channel(RaceFeedState {
            races: Vec::new(),
            is_loading: true,
        });
        let (command_tx, command_rx) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        let driver = FeedDriver {
            provider,
            clock,
            selection: config.initial_selection,
            config,
            response: None,
            state_tx,
            commands: command_rx,
            refresh_rx,
            scheduler: RefetchScheduler::new(refresh_tx),
            cancel: cancel.clone(),
        };

        tokio::spawn(driver.run());

        Self { state: state_rx, commands: command_tx, cancel }
    }

    /// Snapshot of the current derived state.
    pub fn state(&self) -> RaceFeedState {
        self.state.borrow().clone()
    }

    /// Current derived race list, soonest first.
    pub fn races(&self) -> Vec<RaceSummary> {
        self.state.borrow().races.clone()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// A fresh watch receiver onto the feed state, for callers that want
    /// `changed()`/`wait_for()` semantics.
    pub fn watch(&self) -> watch::Receiver<RaceFeedState> {
        self.state.clone()
    }

    /// Stream of state updates. Yields the current state immediately, then
    /// every subsequent replacement.
    pub fn updates(&self) -> impl Stream<Item = RaceFeedState> + 'static {
        WatchStream::new(self.state.clone())
    }

    /// Render stream: state updates plus a re-emission of the latest state
    /// every `period`, for countdown redraws. Purely observational.
    pub fn redraws(&self, period: Duration) -> impl Stream<Item = RaceFeedState> + 'static {
        self.updates().redraw(period)
    }

    /// Flip one category in the selection. Re-derives from the held response
    /// only; no network round-trip. Emptying the selection is allowed and
    /// yields an empty feed.
    pub async fn toggle_category(&self, category: crate::types::RaceCategory) {
        let _ = self.commands.send(FeedCommand::Toggle(category)).await;
    }

    /// Replace the whole selection.
    pub async fn set_selection(&self, selection: CategorySelection) {
        let _ = self.commands.send(FeedCommand::Select(selection)).await;
    }

    /// Force a network refresh now, independent of the refetch timer.
    pub async fn refresh_now(&self) {
        let _ = self.commands.send(FeedCommand::Refresh).await;
    }
}

impl Drop for RaceFeed {
    fn drop(&mut self) {
        debug!("dropping race feed");
        self.cancel.cancel();
    }
}

/// Driver task state. Owns everything mutable about one feed.
struct FeedDriver<P> {
    provider: P,
    clock: Arc<dyn Clock>,
    config: FeedConfig,
    selection: CategorySelection,
    /// Most recent successfully fetched response. Kept across fetch failures
    /// so the feed degrades to stale-but-present rather than empty.
    response: Option<NextRacesResponse>,
    state_tx: watch::Sender<RaceFeedState>,
    commands: mpsc::Receiver<FeedCommand>,
    refresh_rx: mpsc::Receiver<()>,
    scheduler: RefetchScheduler,
    cancel: CancellationToken,
}

impl<P: RaceProvider> FeedDriver<P> {
    async fn run(mut self) {
        info!("race feed driver started");
        self.refresh().await;

        loop {
            tokio::select! {
                // Cancellation wins over queued commands or a fired timer:
                // nothing may run after the handle is dropped.
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("feed driver cancelled");
                    break;
                }
                command = self.commands.recv() => match command {
                    Some(FeedCommand::Toggle(category)) => {
                        self.selection.toggle(category);
                        debug!(selected = self.selection.len(), "category toggled");
                        self.publish();
                    }
                    Some(FeedCommand::Select(selection)) => {
                        self.selection = selection;
                        self.publish();
                    }
                    Some(FeedCommand::Refresh) => self.refresh().await,
                    None => {
                        debug!("feed handle dropped, shutting down");
                        break;
                    }
                },
                Some(()) = self.refresh_rx.recv() => {
                    debug!("refetch deadline reached");
                    self.refresh().await;
                }
            }
        }

        self.scheduler.disarm();
        info!("race feed driver ended");
    }

    /// Fetch a new response, then re-derive and re-arm.
    ///
    /// On failure the previous response is kept: the list stays visible
    /// (stale but present) and the scheduler still arms against it, so a
    /// failed fetch never stalls future refresh attempts.
    async fn refresh(&mut self) {
        self.state_tx.send_modify(|state| state.is_loading = true);

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return,
            result = self.provider.next_races(self.config.fetch_count, &self.selection) => result,
        };

        match result {
            Ok(response) => {
                debug!(summaries = response.race_summaries.len(), "feed response received");
                self.response = Some(response);
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "fetch failed, keeping previous data");
            }
        }

        self.publish();
    }

    /// Derive the visible list from the held response and publish it, then
    /// re-arm the refetch timer against the soonest race's staleness
    /// boundary. The same reference time drives both, so filtering and
    /// scheduling can never disagree about which race is stale.
    fn publish(&mut self) {
        let now = self.clock.now();
        let races = match &self.response {
            Some(response) => {
                normalize::next_to_go(response, now, &self.selection, self.config.display_count)
            }
            None => Vec::new(),
        };

        match races.first() {
            Some(first) => {
                let deadline =
                    first.advertised_start + chrono::Duration::seconds(STALE_AFTER_SECONDS);
                self.scheduler.arm(deadline, now);
            }
            None => self.scheduler.disarm(),
        }

        let _ = self.state_tx.send(RaceFeedState { races, is_loading: false });
    }
}
