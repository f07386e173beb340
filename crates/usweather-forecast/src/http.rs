//! Shared HTTP plumbing for the geocoder and the weather service client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ResolveError;

pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.xyz";
pub const DEFAULT_WEATHER_URL: &str = "https://api.weather.gov";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("usweather/", env!("CARGO_PKG_VERSION"));

/// Where to send requests and how.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub geocode_base_url: String,
    pub weather_base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            geocode_base_url: DEFAULT_GEOCODE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientSettings {
    /// Point both services at one base URL (mock servers, proxies).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            geocode_base_url: base_url.to_string(),
            weather_base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

pub(crate) fn build_client(settings: &ClientSettings) -> Result<Client, ResolveError> {
    let client = Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// GET `url` and decode its body as JSON.
///
/// Transport failures are errors; a body that isn't the expected JSON comes
/// back as `Ok(None)` so each pipeline step can report it in its own terms.
/// The status code is not checked: error bodies simply lack the fields the
/// caller is looking for.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Option<T>, ResolveError> {
    let response = client.get(url).query(query).send().await?;
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::debug!("Undecodable response from {} ({}): {}", url, status, e);
            Ok(None)
        }
    }
}

pub(crate) fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
