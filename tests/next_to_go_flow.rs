//! End-to-end feed flow over the public API: a canned provider and a
//! simulated clock drive the full fetch → derive → countdown → refetch loop
//! under tokio's paused time.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use nexttogo::types::{CategoryRaces, CategorySelection};
use nexttogo::{
    Clock, FeedConfig, NextRacesResponse, NextToGo, RaceCategory, RaceRow, RaceSummary, Urgency,
};

/// Clock pinned to a fixed epoch that follows tokio's pausable time.
struct SimulatedClock {
    epoch: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl SimulatedClock {
    fn new(epoch: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self { epoch, started: tokio::time::Instant::now() })
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        self.epoch + ChronoDuration::from_std(self.started.elapsed()).unwrap_or_default()
    }
}

/// Provider that replays a canned response and counts fetches.
struct CannedProvider {
    response: NextRacesResponse,
    fetches: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl nexttogo::RaceProvider for CannedProvider {
    async fn next_races(
        &self,
        _count: u32,
        _selection: &CategorySelection,
    ) -> nexttogo::Result<NextRacesResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

fn summary(id: &str, category: RaceCategory, start: DateTime<Utc>) -> RaceSummary {
    RaceSummary {
        race_id: id.to_string(),
        race_name: format!("{id} handicap"),
        race_number: 2,
        meeting_id: String::new(),
        meeting_name: format!("Meeting {id}"),
        category_id: category.id().to_string(),
        advertised_start: start,
        venue_id: String::new(),
        venue_name: String::new(),
        venue_state: "QLD".to_string(),
        venue_country: "AUS".to_string(),
        race_form: None,
    }
}

fn canned_response(races: Vec<RaceSummary>) -> NextRacesResponse {
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

#[tokio::test(start_paused = true)]
async fn feed_derives_counts_down_and_refetches_on_staleness() {
    let _ = tracing_subscriber::fmt::try_init();

    // Reference time is 30s after the earliest race's advertised start.
    let now: DateTime<Utc> = "2023-03-01T23:07:30Z".parse().unwrap();
    let earliest = now - ChronoDuration::seconds(30);

    let response = canned_response(vec![
        summary("earliest", RaceCategory::Horses, earliest),
        summary("in5m", RaceCategory::Dogs, now + ChronoDuration::seconds(300)),
        summary("in8m", RaceCategory::Trots, now + ChronoDuration::seconds(480)),
        summary("in12m", RaceCategory::Horses, now + ChronoDuration::seconds(720)),
        summary("in20m", RaceCategory::Dogs, now + ChronoDuration::seconds(1200)),
    ]);

    let fetches = Arc::new(AtomicUsize::new(0));
    let provider = CannedProvider { response, fetches: fetches.clone() };
    let clock = SimulatedClock::new(now);

    let feed = NextToGo::start_with(
        provider,
        clock.clone(),
        FeedConfig { base_url: "http://unused/".into(), ..FeedConfig::default() },
    );

    let mut watch = feed.watch();
    watch.wait_for(|state| !state.is_loading).await.expect("initial fetch");

    // All five races are visible, soonest first.
    let races = feed.races();
    assert_eq!(races.len(), 5);
    assert_eq!(races[0].race_id, "earliest");
    assert_eq!(races[1].race_id, "in5m");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // The already-started race counts down negative and is imminent.
    let first = RaceRow::new(&races[0], clock.now());
    assert_eq!(first.countdown.text, "-30s");
    assert_eq!(first.countdown.urgency, Urgency::Imminent);
    assert_eq!(first.icon, Some('🏇'));

    let second = RaceRow::new(&races[1], clock.now());
    assert_eq!(second.countdown.text, "5m");
    assert_eq!(second.countdown.urgency, Urgency::Normal);

    // Three seconds later the countdown moves without any new fetch.
    tokio::time::advance(Duration::from_secs(3)).await;
    let first = RaceRow::new(&feed.races()[0], clock.now());
    assert_eq!(first.countdown.text, "-33s");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // At 60s past its start the earliest race goes stale: the armed timer
    // fires, a second fetch happens, and the race drops off the list.
    tokio::time::advance(Duration::from_secs(28)).await;
    watch
        .wait_for(|state| !state.is_loading && state.races.len() == 4)
        .await
        .expect("stale race dropped after refetch");
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(feed.races()[0].race_id, "in5m");
}

#[tokio::test(start_paused = true)]
async fn toggling_categories_filters_without_refetching() {
    let now: DateTime<Utc> = "2023-03-01T23:07:30Z".parse().unwrap();

    let response = canned_response(vec![
        summary("h1", RaceCategory::Horses, now + ChronoDuration::seconds(120)),
        summary("d1", RaceCategory::Dogs, now + ChronoDuration::seconds(240)),
        summary("t1", RaceCategory::Trots, now + ChronoDuration::seconds(360)),
    ]);

    let fetches = Arc::new(AtomicUsize::new(0));
    let provider = CannedProvider { response, fetches: fetches.clone() };

    let feed = NextToGo::start_with(
        provider,
        SimulatedClock::new(now),
        FeedConfig { base_url: "http://unused/".into(), ..FeedConfig::default() },
    );

    let mut watch = feed.watch();
    watch.wait_for(|state| !state.is_loading).await.expect("initial fetch");
    assert_eq!(feed.races().len(), 3);

    feed.toggle_category(RaceCategory::Horses).await;
    feed.toggle_category(RaceCategory::Trots).await;
    watch.wait_for(|state| state.races.len() == 1).await.expect("filtered to dogs");
    assert_eq!(feed.races()[0].race_id, "d1");

    // Selection changes re-derive from the held response; one fetch total.
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // Toggling everything off is valid and yields an empty feed.
    feed.toggle_category(RaceCategory::Dogs).await;
    watch.wait_for(|state| state.races.is_empty()).await.expect("emptied selection");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}
