//! Plain-text and JSON output of the display model.

use std::fmt::Write;

use usweather_forecast::{PeriodView, PresentationModel, SessionSnapshot, ViewPhase};

pub fn render_model(model: &PresentationModel, json: bool) -> String {
    if json {
        return match serde_json::to_string_pretty(model) {
            Ok(text) => format!("{}\n", text),
            Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
        };
    }

    let mut out = String::new();

    if let Some(message) = &model.error_message {
        let _ = writeln!(out, "! {}", message);
        return out;
    }

    let Some(today) = &model.today else {
        out.push_str("No forecast to show.\n");
        return out;
    };

    let _ = writeln!(out, "{}", model.location_label);
    let _ = write!(out, "{}  {}", today.temperature_label, today.short_forecast);
    if let Some(updated) = &model.update_time_label {
        let _ = write!(out, "  ({})", updated);
    }
    out.push('\n');
    if let Some(icon) = &today.icon {
        let _ = writeln!(out, "icon: {}", icon);
    }
    if !today.detailed_forecast.is_empty() {
        let _ = writeln!(out, "{}", today.detailed_forecast);
    }

    if !model.extended.is_empty() {
        out.push_str("\nExtended Forecast\n");
        for period in &model.extended {
            let _ = writeln!(out, "  {}", period_line(period));
        }
    }

    out
}

fn period_line(period: &PeriodView) -> String {
    let mut line = period.name.clone();
    if let Some(day) = &period.day_label {
        let _ = write!(line, " ({})", day);
    }
    let _ = write!(line, "  {}  {}", period.temperature_label, period.short_forecast);
    if let Some(icon) = &period.icon {
        let _ = write!(line, "  [{}]", icon);
    }
    line
}

/// What the view shows for a given phase, if it differs from the model.
pub fn phase_banner(snapshot: &SessionSnapshot) -> Option<&'static str> {
    match snapshot.phase {
        ViewPhase::Loading => Some("Loading..."),
        _ => None,
    }
}
