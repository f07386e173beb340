//! The three page variants and the rules each one follows.

use serde::{Deserialize, Serialize};

use crate::presentation::PresentationOptions;

/// Which periods make up the extended forecast list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedRule {
    /// Everything after the first period
    AllButFirst,
    /// Daytime periods (name without "ight"), last six
    DaytimeLastSix,
    /// Even-numbered periods, last six
    EvenNumberedLastSix,
}

/// Where per-period icons come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconPolicy {
    /// The `icon` URL from the payload
    Remote,
    /// A local asset picked from `shortForecast`
    Keyword,
}

/// What a failed lookup does to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Replace the result with an error banner
    ShowBanner,
    /// Keep showing the previous result
    Swallow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantProfile {
    pub min_query_len: usize,
    pub region: Option<String>,
    pub extended: ExtendedRule,
    pub icons: IconPolicy,
    pub failure: FailurePolicy,
}

impl Variant {
    pub fn profile(self) -> VariantProfile {
        match self {
            Variant::A => VariantProfile {
                min_query_len: 2,
                region: Some("'US'".to_string()),
                extended: ExtendedRule::AllButFirst,
                icons: IconPolicy::Remote,
                failure: FailurePolicy::ShowBanner,
            },
            Variant::B => VariantProfile {
                min_query_len: 3,
                region: None,
                extended: ExtendedRule::DaytimeLastSix,
                icons: IconPolicy::Keyword,
                failure: FailurePolicy::Swallow,
            },
            Variant::C => VariantProfile {
                min_query_len: 3,
                region: None,
                extended: ExtendedRule::EvenNumberedLastSix,
                icons: IconPolicy::Keyword,
                failure: FailurePolicy::Swallow,
            },
        }
    }
}

impl VariantProfile {
    pub fn presentation(&self) -> PresentationOptions {
        PresentationOptions {
            extended: self.extended,
            icons: self.icons,
        }
    }

    pub fn with_min_query_len(mut self, min_query_len: Option<usize>) -> Self {
        if let Some(len) = min_query_len {
            self.min_query_len = len;
        }
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        if region.is_some() {
            self.region = region;
        }
        self
    }
}
