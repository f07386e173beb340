//! Search text to forecast: geocode, gridpoint lookup, forecast fetch.

use std::future::Future;

use crate::error::ResolveError;
use crate::geocode::Geocoder;
use crate::http::{self, ClientSettings};
use crate::provider::WeatherProvider;
use crate::types::{Resolution, ResolvedForecast};
use crate::variant::VariantProfile;

/// Anything that can turn a query into a [`Resolution`].
///
/// The search session is generic over this so it can be driven without a network.
pub trait Lookup: Send + Sync + 'static {
    /// Whether `query` is worth looking up at all. A rejected query must not
    /// disturb a lookup already running.
    fn accepts(&self, _query: &str) -> bool {
        true
    }

    fn lookup(&self, query: String) -> impl Future<Output = Resolution> + Send;
}

#[derive(Debug, Clone)]
pub struct Resolver {
    geocoder: Geocoder,
    provider: WeatherProvider,
    min_query_len: usize,
}

impl Resolver {
    pub fn new(settings: &ClientSettings, profile: &VariantProfile) -> Result<Self, ResolveError> {
        let client = http::build_client(settings)?;
        Ok(Self {
            geocoder: Geocoder::with_client(client.clone(), settings, profile.region.clone()),
            provider: WeatherProvider::with_client(client, settings),
            min_query_len: profile.min_query_len,
        })
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Run the whole chain for `search_text`.
    ///
    /// A query shorter than the minimum is `Empty`; every other failure,
    /// network errors included, is a `Failure`. Nothing is cached: repeating a
    /// query fetches everything again.
    pub async fn resolve(&self, search_text: &str) -> Resolution {
        match self.try_resolve(search_text).await {
            Ok(resolved) => Resolution::Success(resolved),
            Err(ResolveError::InvalidInput { len, min }) => {
                tracing::trace!("Ignoring query of {} chars (min {})", len, min);
                Resolution::Empty
            }
            Err(e) => {
                tracing::warn!("Lookup for {:?} failed: {}", search_text, e);
                Resolution::Failure(e)
            }
        }
    }

    pub async fn try_resolve(&self, search_text: &str) -> Result<ResolvedForecast, ResolveError> {
        let len = search_text.chars().count();
        if len < self.min_query_len {
            return Err(ResolveError::InvalidInput {
                len,
                min: self.min_query_len,
            });
        }

        let coords = self.geocoder.geocode(search_text).await?;
        let gridpoint = self.provider.gridpoint(coords).await?;
        let forecast = self
            .provider
            .forecast(&gridpoint.forecast_endpoint_url)
            .await?;

        tracing::info!(
            "Resolved {:?} to {} ({} periods)",
            search_text,
            gridpoint.relative_location.label(),
            forecast.periods.len()
        );

        Ok(ResolvedForecast {
            forecast,
            location: gridpoint.relative_location,
        })
    }
}

impl Lookup for Resolver {
    fn accepts(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_len()
    }

    fn lookup(&self, query: String) -> impl Future<Output = Resolution> + Send {
        async move { self.resolve(&query).await }
    }
}
