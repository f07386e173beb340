//! Date and time labels.
//!
//! Timestamps are shown in the offset the service sent them with (the
//! forecast office's local time), never the host's locale or timezone.

use chrono::{DateTime, Datelike, FixedOffset};

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=19).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// "updated 2:05 PM"
pub fn update_time_label(update_time: &DateTime<FixedOffset>) -> String {
    format!("updated {}", update_time.format("%-I:%M %p"))
}

/// "Tuesday 5th"
pub fn day_label(start_time: &DateTime<FixedOffset>) -> String {
    let day = start_time.day();
    format!("{} {}{}", start_time.format("%A"), day, ordinal_suffix(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal_suffix(n), expected, "suffix for {}", n);
        }
    }

    #[test]
    fn test_update_time_uses_payload_offset() {
        assert_eq!(
            update_time_label(&ts("2024-03-05T14:05:00-06:00")),
            "updated 2:05 PM"
        );
        assert_eq!(
            update_time_label(&ts("2024-03-05T00:30:00+00:00")),
            "updated 12:30 AM"
        );
    }

    #[test]
    fn test_day_label() {
        // 2024-03-05 was a Tuesday
        assert_eq!(day_label(&ts("2024-03-05T06:00:00-06:00")), "Tuesday 5th");
        assert_eq!(day_label(&ts("2024-03-22T18:00:00-05:00")), "Friday 22nd");
    }

    #[test]
    fn test_day_label_does_not_shift_to_utc() {
        // 23:00 local is already the next day in UTC
        assert_eq!(day_label(&ts("2024-03-01T23:00:00-06:00")), "Friday 1st");
    }
}
