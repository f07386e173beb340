use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Geocoded coordinates for a search query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// City and state nearest to a gridpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RelativeLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

impl RelativeLocation {
    /// "City, ST"
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

/// What the points endpoint tells us about a coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct GridpointInfo {
    pub forecast_endpoint_url: String,
    pub relative_location: RelativeLocation,
}

/// One named forecast period ("Tonight", "Wednesday", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub is_daytime: Option<bool>,
    pub temperature: f64,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// The `properties` section of a forecast document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPayload {
    #[serde(default)]
    pub update_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

impl ForecastPayload {
    /// The current period, if the service sent any.
    pub fn today(&self) -> Option<&ForecastPeriod> {
        self.periods.first()
    }
}

/// A forecast paired with the place it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedForecast {
    pub forecast: ForecastPayload,
    pub location: RelativeLocation,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Success(ResolvedForecast),
    /// Nothing to do (query too short); whatever was displayed stays.
    Empty,
    Failure(ResolveError),
}

impl Resolution {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// The single result slot retained between pipeline runs.
///
/// Always replaced wholesale; never merged with a previous value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedResult {
    Forecast(ResolvedForecast),
    Error(String),
}
