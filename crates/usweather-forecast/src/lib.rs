//! US weather lookup.
//!
//! Free-text location in, api.weather.gov forecast out: geocode the query,
//! find its gridpoint, fetch the forecast, and derive what to display.
//! [`SearchSession`] adds the search-box behaviour on top: debounced input
//! and a single result slot that only the latest lookup may fill.

pub mod dates;
pub mod debounce;
pub mod error;
pub mod geocode;
pub mod http;
pub mod icons;
pub mod pipeline;
pub mod presentation;
pub mod provider;
pub mod session;
pub mod types;
pub mod variant;

pub use debounce::{Debouncer, DEFAULT_QUIET_INTERVAL};
pub use error::{ResolveError, LOCATION_NOT_FOUND};
pub use geocode::Geocoder;
pub use http::ClientSettings;
pub use icons::IconAsset;
pub use pipeline::{Lookup, Resolver};
pub use presentation::{PeriodView, PresentationModel, PresentationOptions};
pub use provider::WeatherProvider;
pub use session::{SearchSession, SessionSnapshot, ViewPhase};
pub use types::*;
pub use variant::{ExtendedRule, FailurePolicy, IconPolicy, Variant, VariantProfile};
