//! Display model derived from the current result slot.

use serde::Serialize;

use crate::dates;
use crate::icons::IconAsset;
use crate::types::{ForecastPeriod, ResolvedResult};
use crate::variant::{ExtendedRule, IconPolicy};

const EXTENDED_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationOptions {
    pub extended: ExtendedRule,
    pub icons: IconPolicy,
}

/// One period as it is shown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodView {
    pub number: u32,
    pub name: String,
    pub day_label: Option<String>,
    pub temperature_label: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PresentationModel {
    pub location_label: String,
    pub update_time_label: Option<String>,
    pub today: Option<PeriodView>,
    pub extended: Vec<PeriodView>,
    pub error_message: Option<String>,
}

impl PresentationModel {
    /// True when there is nothing but a placeholder to show.
    pub fn is_empty(&self) -> bool {
        self.today.is_none() && self.error_message.is_none()
    }
}

pub fn build(result: Option<&ResolvedResult>, options: PresentationOptions) -> PresentationModel {
    match result {
        None => PresentationModel::default(),
        Some(ResolvedResult::Error(message)) => PresentationModel {
            error_message: Some(message.clone()),
            ..PresentationModel::default()
        },
        Some(ResolvedResult::Forecast(resolved)) => {
            let forecast = &resolved.forecast;
            PresentationModel {
                location_label: resolved.location.label(),
                update_time_label: forecast.update_time.as_ref().map(dates::update_time_label),
                today: forecast.today().map(|p| period_view(p, options.icons)),
                extended: extended_periods(&forecast.periods, options.extended)
                    .into_iter()
                    .map(|p| period_view(p, options.icons))
                    .collect(),
                error_message: None,
            }
        }
    }
}

/// Select the extended forecast list according to `rule`.
pub fn extended_periods(periods: &[ForecastPeriod], rule: ExtendedRule) -> Vec<&ForecastPeriod> {
    match rule {
        ExtendedRule::AllButFirst => periods.iter().skip(1).collect(),
        ExtendedRule::DaytimeLastSix => {
            last_n(periods.iter().filter(|p| !p.name.contains("ight")).collect())
        }
        ExtendedRule::EvenNumberedLastSix => {
            last_n(periods.iter().filter(|p| p.number % 2 == 0).collect())
        }
    }
}

fn last_n(mut periods: Vec<&ForecastPeriod>) -> Vec<&ForecastPeriod> {
    let excess = periods.len().saturating_sub(EXTENDED_LIMIT);
    periods.drain(..excess);
    periods
}

fn period_view(period: &ForecastPeriod, icons: IconPolicy) -> PeriodView {
    let icon = match icons {
        IconPolicy::Remote => period.icon.clone(),
        IconPolicy::Keyword => {
            Some(IconAsset::from_short_forecast(&period.short_forecast).path().to_string())
        }
    };

    PeriodView {
        number: period.number,
        name: period.name.clone(),
        day_label: period.start_time.as_ref().map(dates::day_label),
        temperature_label: format!(
            "{}°{}",
            period.temperature,
            period.temperature_unit.as_deref().unwrap_or("")
        ),
        short_forecast: period.short_forecast.clone(),
        detailed_forecast: period.detailed_forecast.clone(),
        icon,
    }
}
