//! Concrete race data providers.

pub mod http;

pub use http::RacingApiClient;
