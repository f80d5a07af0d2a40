//! Core types: categories, selections and the wire model.

mod category;
mod race;

pub use category::{CategorySelection, RaceCategory};
pub use race::{CategoryRaces, NamedValue, NextRacesResponse, RaceForm, RaceSummary};
