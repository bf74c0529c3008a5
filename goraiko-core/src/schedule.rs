//! Goraiko schedule synthesis: the two-day sunrise-summit itinerary.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    CLIMBING_RATE_M_PER_HOUR, CLIMBING_START_TIME, CLIMB_START_DECIMAL_HOURS,
    DESCENT_START_DECIMAL_HOURS, DESCENT_START_TIME, DESCENT_TIME_RATIO, HUT_LEG_MIN_HOURS,
    MAX_BEDTIME_HOUR, MAX_DINNER_HOUR, MIN_BEDTIME_HOUR, MIN_DINNER_HOUR, PHOTO_BREAK_TIME,
    REST_STOP_THRESHOLD_HOURS, START_TIME, SUMMIT_ELEVATION_M, SUMMIT_LEG_MAX_HOURS,
    SUMMIT_LEG_MIN_HOURS, SUNRISE_HOUR, SUNRISE_TIME,
};
use crate::numbers;
use crate::routes::{Hut, RouteCatalog};
use crate::time_of_day::{format_time, parse_time, wrap_minutes_of_day};

/// One generated itinerary step, before it is given an id and order in the
/// plan timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub activity: String,
}

/// A full generated itinerary. At most 12 steps.
pub type ScheduleItems = SmallVec<[ScheduleItem; 12]>;

fn item(time: impl Into<String>, activity: impl Into<String>) -> ScheduleItem {
    ScheduleItem {
        time: time.into(),
        activity: activity.into(),
    }
}

fn hour_label(minutes_of_day: i64) -> String {
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}

/// Climbing hours from a hut to the summit, clamped to 1..=6.
#[must_use]
pub fn hours_to_summit(hut_elevation_m: i32) -> f64 {
    let hours = f64::from(SUMMIT_ELEVATION_M - hut_elevation_m) / CLIMBING_RATE_M_PER_HOUR;
    hours.clamp(SUMMIT_LEG_MIN_HOURS, SUMMIT_LEG_MAX_HOURS)
}

/// Climbing hours from the route trailhead to a hut, at least half an
/// hour. Unknown routes use the fallback trailhead elevation.
#[must_use]
pub fn hours_to_hut(catalog: &RouteCatalog, route: &str, hut_elevation_m: i32) -> f64 {
    let trailhead = catalog.trailhead_elevation_safe(route);
    let hours = f64::from(hut_elevation_m - trailhead) / CLIMBING_RATE_M_PER_HOUR;
    hours.max(HUT_LEG_MIN_HOURS)
}

/// Synthesize the standard two-day goraiko itinerary for a route and hut.
///
/// Day 1 climbs from the trailhead to the hut with dinner and bedtime
/// inside their fixed windows; day 2 backtracks from the 05:00 summit
/// sunrise to a hut departure and wake-up, then descends. Items are in
/// display order; that order, not the clock times, is canonical, since a
/// small-hours wake-up follows the previous evening's bedtime.
#[must_use]
pub fn goraiko_schedule(catalog: &RouteCatalog, route: &str, hut: &Hut) -> ScheduleItems {
    let to_summit = hours_to_summit(hut.elevation_m);
    let to_hut = hours_to_hut(catalog, route, hut.elevation_m);

    let mut items = ScheduleItems::new();

    // Day 1: trailhead to hut.
    items.push(item(START_TIME, "⛰️ 五合目集合"));
    items.push(item(CLIMBING_START_TIME, "📋 装備確認・登山開始"));

    if to_hut >= REST_STOP_THRESHOLD_HOURS {
        items.push(item(
            format_time(CLIMB_START_DECIMAL_HOURS + to_hut / 2.0),
            "🍙 休憩・水分補給",
        ));
    }

    let hut_arrival = format_time(CLIMB_START_DECIMAL_HOURS + to_hut);
    let hut_arrival_hour = parse_time(&hut_arrival).hours;
    items.push(item(hut_arrival, format!("🏠 {}到着", hut.name)));

    let dinner_hour = (hut_arrival_hour + 1).clamp(MIN_DINNER_HOUR, MAX_DINNER_HOUR);
    items.push(item(format!("{dinner_hour:02}:00"), "🍱 夕食"));

    let bedtime_hour = (dinner_hour + 2).clamp(MIN_BEDTIME_HOUR, MAX_BEDTIME_HOUR);
    items.push(item(format!("{bedtime_hour:02}:00"), "🌙 就寝"));

    // Day 2: backtrack from the sunrise target on signed minutes of day.
    // A negative departure means leaving the previous evening; wake-up and
    // departure are floored to 01:00 on same-day departures.
    let departure_min = i64::from(SUNRISE_HOUR - numbers::ceil_f64_to_i32(to_summit)) * 60;
    let wake_min = if departure_min < 0 {
        wrap_minutes_of_day(departure_min - 60)
    } else {
        (departure_min - 60).max(60)
    };
    let departure_display_min = wrap_minutes_of_day(departure_min).max(60);

    items.push(item(hour_label(wake_min), "⏰ 起床・準備"));
    items.push(item(
        hour_label(departure_display_min),
        "🔦 山小屋出発（ヘッドライト装着）",
    ));
    items.push(item(
        SUNRISE_TIME,
        format!("🌅 山頂でご来光（標高{SUMMIT_ELEVATION_M}m）"),
    ));
    items.push(item(PHOTO_BREAK_TIME, "📸 記念撮影・休憩"));
    items.push(item(DESCENT_START_TIME, "⬇️ 下山開始"));
    items.push(item(
        format_time(DESCENT_START_DECIMAL_HOURS + to_hut * DESCENT_TIME_RATIO),
        "⛰️ 五合目到着・解散",
    ));

    items
}
