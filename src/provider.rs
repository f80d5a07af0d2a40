//! Provider trait for race data sources.

use crate::Result;
use crate::types::{CategorySelection, NextRacesResponse};

/// Trait for sources of next-to-go race data.
///
/// Providers abstract over where the raw response comes from (the live
/// racing API, a fixture, a test double). The feed driver only ever asks one
/// question: "give me the next `count` races for these categories".
///
/// `count` should over-fetch relative to the number of races displayed,
/// because the feed drops races that started more than a minute ago and a
/// fetch of exactly the display count would under-fill the visible list.
#[async_trait::async_trait]
pub trait RaceProvider: Send + Sync + 'static {
    /// Fetch the next races for the selected categories.
    async fn next_races(
        &self,
        count: u32,
        selection: &CategorySelection,
    ) -> Result<NextRacesResponse>;
}
