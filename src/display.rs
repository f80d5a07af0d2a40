//! Read-only view model for one feed row.
//!
//! The presentation layer renders each race as "meeting name, race number,
//! category icon, countdown". [`RaceRow`] packages exactly that; it is pure
//! and meant to be rebuilt on every redraw tick with a fresh reference time.

use chrono::{DateTime, Utc};

use crate::countdown::{Countdown, time_to_go};
use crate::types::{RaceCategory, RaceSummary};

/// Display-ready fields for one race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceRow {
    pub race_id: String,
    /// e.g. `"Sandown R4"`.
    pub label: String,
    /// Category icon, or `None` for an unknown category id.
    pub icon: Option<char>,
    pub countdown: Countdown,
}

impl RaceRow {
    /// Build the row for `race` as of `now`.
    pub fn new(race: &RaceSummary, now: DateTime<Utc>) -> Self {
        Self {
            race_id: race.race_id.clone(),
            label: format!("{} R{}", race.meeting_name, race.race_number),
            icon: RaceCategory::from_id(&race.category_id).map(RaceCategory::icon),
            countdown: time_to_go(race.advertised_start, now),
        }
    }
}
