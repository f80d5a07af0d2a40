//! Wire types for the "next races by category group" endpoint.
//!
//! The payload is two maps: category id → list of race ids, and race id →
//! summary. Both maps default to empty when absent so a partial payload
//! degrades to an empty feed instead of a decode error. `BTreeMap` keeps
//! iteration deterministic, which in turn keeps the derived ordering of
//! equal-timestamp races stable across re-derivations of the same response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled race as reported by the upstream API.
///
/// Immutable once received; the feed replaces its whole set of summaries on
/// every response rather than patching individual races.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    pub race_id: String,
    #[serde(default)]
    pub race_name: String,
    pub race_number: u32,
    #[serde(default)]
    pub meeting_id: String,
    pub meeting_name: String,
    pub category_id: String,
    pub advertised_start: DateTime<Utc>,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub venue_state: String,
    #[serde(default)]
    pub venue_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_form: Option<RaceForm>,
}

/// Optional form details attached to a race summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceForm {
    #[serde(default)]
    pub distance: u32,
    #[serde(default, rename = "distanceType", skip_serializing_if = "Option::is_none")]
    pub distance_type: Option<NamedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_condition: Option<NamedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<NamedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_comment: Option<String>,
}

/// A name/short-name pair as the API encodes enumerated form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

/// The race ids the API groups under one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRaces {
    #[serde(default)]
    pub race_ids: Vec<String>,
}

/// Raw response body of the next-races endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextRacesResponse {
    #[serde(default)]
    pub category_race_map: BTreeMap<String, CategoryRaces>,
    #[serde(default)]
    pub race_summaries: BTreeMap<String, RaceSummary>,
}
