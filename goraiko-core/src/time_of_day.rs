//! Clock-time parsing, formatting, and duration arithmetic.
//!
//! Times travel through the rest of the crate as `"HH:MM"` strings; day-2
//! schedule math runs on signed minutes-of-day and converts back at the
//! boundary through [`wrap_minutes_of_day`]. None of these functions fail:
//! malformed input degrades to zeroed components or an empty duration.

use serde::{Deserialize, Serialize};

use crate::constants::MINUTES_PER_DAY;
use crate::numbers;

/// A parsed wall-clock time. Components are not range-checked; out-of-range
/// values are tolerated and propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClockTime {
    pub hours: i32,
    pub minutes: i32,
}

impl ClockTime {
    /// Express this time as fractional hours.
    #[must_use]
    pub fn decimal_hours(self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 60.0
    }
}

/// Parse an `"HH:MM"` string. Missing or non-numeric components default
/// to 0.
#[must_use]
pub fn parse_time(time: &str) -> ClockTime {
    let mut parts = time.split(':');
    let hours = parts
        .next()
        .and_then(|p| p.trim().parse::<i32>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|p| p.trim().parse::<i32>().ok())
        .unwrap_or(0);
    ClockTime { hours, minutes }
}

/// Normalize signed minutes into `[0, MINUTES_PER_DAY)`. Day-count carry is
/// discarded; callers needing day boundaries track them separately.
#[must_use]
pub(crate) fn wrap_minutes_of_day(minutes: i64) -> i64 {
    minutes.rem_euclid(MINUTES_PER_DAY)
}

/// Format fractional hours as a zero-padded `"HH:MM"` time of day.
///
/// The value is rounded to the nearest minute and wrapped into a single
/// day, so negative inputs resolve to the previous evening and inputs past
/// 24:00 to the following morning. Non-finite input degrades to `"00:00"`.
#[must_use]
pub fn format_time(decimal_hours: f64) -> String {
    let total = wrap_minutes_of_day(numbers::round_f64_to_i64(decimal_hours * 60.0));
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Add a (possibly negative) number of hours to an `"HH:MM"` time.
#[must_use]
pub fn add_hours(time: &str, delta: f64) -> String {
    format_time(parse_time(time).decimal_hours() + delta)
}

fn strict_minutes(time: &str) -> Option<i64> {
    let mut parts = time.split(':');
    let hours: i64 = parts.next()?.trim().parse().ok()?;
    let minutes: i64 = parts.next()?.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Render the elapsed time between two clock times as `"N時間M分"`,
/// omitting zero components. A negative span is interpreted as rolling
/// over to the next day. Returns the empty string for a zero duration or
/// for input that fails to parse.
#[must_use]
pub fn duration_text(from: &str, to: &str) -> String {
    let (Some(start), Some(end)) = (strict_minutes(from), strict_minutes(to)) else {
        return String::new();
    };
    let mut minutes = end - start;
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours > 0, mins > 0) {
        (true, true) => format!("{hours}時間{mins}分"),
        (true, false) => format!("{hours}時間"),
        (false, true) => format!("{mins}分"),
        (false, false) => String::new(),
    }
}
