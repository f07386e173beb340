//! api.weather.gov client: gridpoint lookup and forecast fetch.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::ResolveError;
use crate::http::{self, ClientSettings};
use crate::types::{Coordinates, ForecastPayload, GridpointInfo, RelativeLocation};

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: Option<String>,
    relative_location: Option<RelativeLocationFeature>,
}

#[derive(Debug, Deserialize)]
struct RelativeLocationFeature {
    properties: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastPayload>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    pub(crate) fn with_client(client: Client, settings: &ClientSettings) -> Self {
        Self {
            client,
            base_url: http::trim_base(&settings.weather_base_url).to_string(),
        }
    }

    /// Look up the gridpoint for `coords` and extract its forecast URL and nearest place.
    #[instrument(skip(self), level = "debug")]
    pub async fn gridpoint(&self, coords: Coordinates) -> Result<GridpointInfo, ResolveError> {
        let url = format!(
            "{}/points/{},{}",
            self.base_url,
            format_coordinate(coords.latitude),
            format_coordinate(coords.longitude)
        );

        let body: Option<PointsResponse> = http::fetch_json(&self.client, &url, &[]).await?;
        let properties = body.and_then(|b| b.properties).ok_or_else(|| {
            ResolveError::GridpointLookupFailure(format!("no properties for {}", url))
        })?;

        let forecast_endpoint_url = properties
            .forecast
            .filter(|f| !f.is_empty())
            .ok_or(ResolveError::NoForecastEndpoint)?;

        let relative_location = properties
            .relative_location
            .and_then(|r| r.properties)
            .ok_or_else(|| {
                ResolveError::GridpointLookupFailure("missing relativeLocation".to_string())
            })?;

        Ok(GridpointInfo {
            forecast_endpoint_url,
            relative_location,
        })
    }

    /// Fetch the forecast document the gridpoint pointed us at.
    #[instrument(skip(self), level = "debug")]
    pub async fn forecast(&self, forecast_url: &str) -> Result<ForecastPayload, ResolveError> {
        let body: Option<ForecastResponse> =
            http::fetch_json(&self.client, forecast_url, &[]).await?;

        let payload = body.and_then(|b| b.properties).ok_or_else(|| {
            ResolveError::ForecastFetchFailure(format!("no properties at {}", forecast_url))
        })?;

        tracing::debug!("Forecast has {} periods", payload.periods.len());
        Ok(payload)
    }
}

/// The points endpoint redirects anything finer than four decimal places.
fn format_coordinate(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
