//! HTTP provider backed by the live racing API.

use std::time::Duration;

use tracing::debug;

use crate::error::{FeedError, Result};
use crate::provider::RaceProvider;
use crate::types::{CategorySelection, NextRacesResponse};

/// Default public base URL of the racing API.
pub const DEFAULT_BASE_URL: &str = "https://api.neds.com.au/rest/v1/";

const NEXT_RACES_PATH: &str = "racing/next-races-category-group";

/// Client for the "next races by category group" endpoint.
pub struct RacingApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl RacingApiClient {
    /// Build a client against `base_url` (must end with a trailing slash)
    /// with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: base_url.into() })
    }

    fn next_races_url(&self) -> String {
        format!("{}{}", self.base_url, NEXT_RACES_PATH)
    }
}

/// Encode the selected category ids as the JSON array string the API expects
/// in its `categories` query parameter.
fn encode_categories(selection: &CategorySelection) -> String {
    serde_json::Value::from(selection.ids()).to_string()
}

#[async_trait::async_trait]
impl RaceProvider for RacingApiClient {
    async fn next_races(
        &self,
        count: u32,
        selection: &CategorySelection,
    ) -> Result<NextRacesResponse> {
        let url = self.next_races_url();
        debug!(%url, count, categories = selection.len(), "fetching next races");

        let response = self
            .http
            .get(&url)
            .query(&[("count", count.to_string()), ("categories", encode_categories(selection))])
            .send()
            .await
            .map_err(|e| FeedError::request(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::status(status.as_u16(), &url));
        }

        response.json::<NextRacesResponse>().await.map_err(|e| FeedError::decode(&url, e))
    }
}
