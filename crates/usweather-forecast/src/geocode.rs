//! Forward geocoding: free-text location to coordinates.
//! Uses geocode.xyz, which answers with `latt`/`longt` as strings or numbers.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ResolveError;
use crate::http::{self, ClientSettings};
use crate::types::Coordinates;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    latt: Option<Value>,
    longt: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    region: Option<String>,
}

impl Geocoder {
    pub(crate) fn with_client(
        client: Client,
        settings: &ClientSettings,
        region: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: http::trim_base(&settings.geocode_base_url).to_string(),
            region,
        }
    }

    /// Resolve `search_text` to coordinates.
    ///
    /// Fails with `GeocodeFailure` unless both coordinates come back as finite numbers.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, search_text: &str) -> Result<Coordinates, ResolveError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(search_text));

        let mut query = Vec::with_capacity(2);
        if let Some(region) = &self.region {
            query.push(("region", region.as_str()));
        }
        query.push(("json", "1"));

        let body: GeocodeResponse = http::fetch_json(&self.client, &url, &query)
            .await?
            .ok_or_else(|| ResolveError::GeocodeFailure("unreadable response".to_string()))?;

        let latitude = body.latt.as_ref().and_then(parse_coordinate);
        let longitude = body.longt.as_ref().and_then(parse_coordinate);

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!("Geocoded {:?} to {}, {}", search_text, latitude, longitude);
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(ResolveError::GeocodeFailure(format!(
                "no coordinates for {:?}",
                search_text
            ))),
        }
    }
}

/// Accept `"38.97"` or `38.97`; anything else is not a coordinate.
fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
