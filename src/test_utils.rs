//! Shared test fixtures: canned providers, a simulated clock and payload
//! builders. Only compiled for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::{FeedError, Result};
use crate::provider::RaceProvider;
use crate::types::{
    CategoryRaces, CategorySelection, NextRacesResponse, RaceCategory, RaceSummary,
};

/// Build a minimal race summary for tests.
pub fn race(id: &str, category: RaceCategory, start: DateTime<Utc>) -> RaceSummary {
    RaceSummary {
        race_id: id.to_string(),
        race_name: format!("{id} stakes"),
        race_number: 1,
        meeting_id: format!("meeting-{id}"),
        meeting_name: format!("Meeting {id}"),
        category_id: category.id().to_string(),
        advertised_start: start,
        venue_id: String::new(),
        venue_name: String::new(),
        venue_state: "NSW".to_string(),
        venue_country: "AUS".to_string(),
        race_form: None,
    }
}

/// Assemble the nested wire structure from a flat list of races.
pub fn response_of(races: Vec<RaceSummary>) -> NextRacesResponse {
    let mut response = NextRacesResponse::default();
    for race in races {
        response
            .category_race_map
            .entry(race.category_id.clone())
            .or_insert_with(CategoryRaces::default)
            .race_ids
            .push(race.race_id.clone());
        response.race_summaries.insert(race.race_id.clone(), race);
    }
    response
}

/// Clock that starts at a fixed epoch and follows tokio's (pausable) time.
pub struct SimulatedClock {
    epoch: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl SimulatedClock {
    /// Must be created inside a tokio runtime.
    pub fn new(epoch: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self { epoch, started: tokio::time::Instant::now() })
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.started.elapsed();
        self.epoch + chrono::Duration::from_std(elapsed).unwrap_or_default()
    }
}

/// Provider that always returns the same response and counts fetches.
pub struct StaticProvider {
    response: NextRacesResponse,
    fetches: Arc<AtomicUsize>,
}

impl StaticProvider {
    pub fn new(response: NextRacesResponse) -> Self {
        Self { response, fetches: Arc::new(AtomicUsize::new(0)) }
    }

    /// Shared fetch counter, valid after the provider moves into a feed.
    pub fn fetch_count(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait::async_trait]
impl RaceProvider for StaticProvider {
    async fn next_races(
        &self,
        _count: u32,
        _selection: &CategorySelection,
    ) -> Result<NextRacesResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Provider with a scripted success/failure sequence. Once the script runs
/// out every further fetch succeeds.
pub struct FlakyProvider {
    response: NextRacesResponse,
    outcomes: Mutex<Vec<bool>>,
    fetches: Arc<AtomicUsize>,
}

impl FlakyProvider {
    pub fn new(response: NextRacesResponse, outcomes: Vec<bool>) -> Self {
        // Stored reversed so pop() walks the script front to back.
        let mut script = outcomes;
        script.reverse();
        Self { response, outcomes: Mutex::new(script), fetches: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn fetch_count(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait::async_trait]
impl RaceProvider for FlakyProvider {
    async fn next_races(
        &self,
        _count: u32,
        _selection: &CategorySelection,
    ) -> Result<NextRacesResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let succeed = self.outcomes.lock().await.pop().unwrap_or(true);
        if succeed {
            Ok(self.response.clone())
        } else {
            Err(FeedError::status(503, "http://unused/"))
        }
    }
}
