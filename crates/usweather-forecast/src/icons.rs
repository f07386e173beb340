//! Local icon assets and the keyword heuristic that picks one.

use serde::Serialize;

/// Icons bundled with the page, chosen from forecast text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconAsset {
    Freezing,
    SunnyRain,
    Cloudy,
    Rain,
    Hot,
    Sunny,
}

impl IconAsset {
    /// First match wins, in this order: Freezing, Sunny+Rain, Cloudy, Rain, Hot.
    /// Matching is case-sensitive, the way the service capitalizes its phrases.
    pub fn from_short_forecast(short_forecast: &str) -> Self {
        let has = |needle: &str| short_forecast.contains(needle);

        if has("Freezing") {
            Self::Freezing
        } else if has("Sunny") && has("Rain") {
            Self::SunnyRain
        } else if has("Cloudy") {
            Self::Cloudy
        } else if has("Rain") {
            Self::Rain
        } else if has("Hot") {
            Self::Hot
        } else {
            Self::Sunny
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Freezing => "/Freezing.svg",
            Self::SunnyRain | Self::Cloudy => "/Blah.svg",
            Self::Rain => "/Typhoon.svg",
            Self::Hot => "/Hell.svg",
            Self::Sunny => "/Sun.svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sunny_with_rain_beats_plain_rain() {
        assert_eq!(
            IconAsset::from_short_forecast("Sunny with Rain"),
            IconAsset::SunnyRain
        );
        assert_eq!(IconAsset::from_short_forecast("Rain Likely"), IconAsset::Rain);
    }

    #[test]
    fn test_freezing_beats_everything() {
        assert_eq!(
            IconAsset::from_short_forecast("Freezing Rain then Mostly Sunny"),
            IconAsset::Freezing
        );
    }

    #[test]
    fn test_cloudy_beats_rain() {
        assert_eq!(
            IconAsset::from_short_forecast("Mostly Cloudy then Chance Rain"),
            IconAsset::Cloudy
        );
    }

    #[test]
    fn test_hot_and_fallback() {
        assert_eq!(IconAsset::from_short_forecast("Hot"), IconAsset::Hot);
        assert_eq!(IconAsset::from_short_forecast("Clear"), IconAsset::Sunny);
        assert_eq!(IconAsset::from_short_forecast(""), IconAsset::Sunny);
        assert_eq!(IconAsset::Sunny.path(), "/Sun.svg");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(IconAsset::from_short_forecast("freezing fog"), IconAsset::Sunny);
    }
}
