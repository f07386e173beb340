//! Effective settings derived from the validated configuration.

use std::time::Duration;

use usweather_core::{Config, SearchVariant};
use usweather_forecast::{ClientSettings, Variant, VariantProfile};

#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub profile: VariantProfile,
    pub debounce: Duration,
    pub default_query: String,
}

impl Settings {
    pub fn resolve(config: &Config) -> Self {
        let profile = forecast_variant(config.search.variant)
            .profile()
            .with_min_query_len(config.search.min_query_len)
            .with_region(config.search.region.clone());

        Self {
            client: ClientSettings {
                geocode_base_url: config.service.geocode_base_url.clone(),
                weather_base_url: config.service.weather_base_url.clone(),
                user_agent: config.service.user_agent.clone(),
                timeout: Duration::from_secs(config.service.timeout_secs),
            },
            profile,
            debounce: Duration::from_millis(config.search.debounce_ms),
            default_query: config.search.default_query.clone(),
        }
    }
}

fn forecast_variant(variant: SearchVariant) -> Variant {
    match variant {
        SearchVariant::A => Variant::A,
        SearchVariant::B => Variant::B,
        SearchVariant::C => Variant::C,
    }
}
