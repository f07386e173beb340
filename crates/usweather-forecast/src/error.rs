//! Failure taxonomy for a single search-to-forecast resolution.

use thiserror::Error;

/// Banner text shown when a lookup fails and failures are surfaced.
pub const LOCATION_NOT_FOUND: &str = "Forecast for Location not Found";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Query too short ({len} < {min} characters)")]
    InvalidInput { len: usize, min: usize },

    #[error("Geocoding failed: {0}")]
    GeocodeFailure(String),

    #[error("Gridpoint lookup failed: {0}")]
    GridpointLookupFailure(String),

    #[error("Gridpoint has no forecast endpoint")]
    NoForecastEndpoint,

    #[error("Forecast fetch failed: {0}")]
    ForecastFetchFailure(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

impl ResolveError {
    /// Message suitable for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Keep typing to search for a location.",
            _ => LOCATION_NOT_FOUND,
        }
    }

    /// Whether the lookup never left the process.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e.to_string())
        }
    }
}
