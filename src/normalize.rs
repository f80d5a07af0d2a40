//! Derives the visible race list from a raw response.
//!
//! This is the one place the nested category→race-id→summary payload is
//! flattened, filtered and ordered. It is a pure function of its inputs —
//! response, reference time, selection, limit — so the feed driver can
//! re-derive on any input change without implicit dependency tracking.

use chrono::{DateTime, Utc};

use crate::types::{CategorySelection, NextRacesResponse, RaceSummary};

/// How long a race stays visible past its advertised start, in seconds.
///
/// A race older than this is dropped from the feed; when the soonest visible
/// race crosses this boundary the scheduler triggers a refetch.
pub const STALE_AFTER_SECONDS: i64 = 60;

/// Flatten, filter, sort and truncate a response into the next-to-go list.
///
/// - Every race id referenced by any category in the payload is considered;
///   the payload is not assumed to be pre-filtered by category.
/// - Ids with no matching summary are dropped silently (partial payloads are
///   not an error).
/// - A race is retained only while its selected category is in `selection`
///   and its advertised start is strictly newer than
///   [`STALE_AFTER_SECONDS`] before `now`.
/// - The sort is stable and ascending by advertised start, so races sharing
///   a timestamp keep the payload's (deterministic) flatten order.
///
/// An empty selection or an empty payload yields an empty list by design.
pub fn next_to_go(
    response: &NextRacesResponse,
    now: DateTime<Utc>,
    selection: &CategorySelection,
    limit: usize,
) -> Vec<RaceSummary> {
    let mut races: Vec<RaceSummary> = response
        .category_race_map
        .values()
        .flat_map(|category| category.race_ids.iter())
        .filter_map(|race_id| response.race_summaries.get(race_id))
        .filter(|race| selection.contains_id(&race.category_id))
        .filter(|race| {
            (race.advertised_start - now).num_milliseconds() as f64 / 1000.0
                > -(STALE_AFTER_SECONDS as f64)
        })
        .cloned()
        .collect();

    races.sort_by_key(|race| race.advertised_start);
    races.truncate(limit);
    races
}
