//! Centralized tuning constants for Goraiko planning and scoring logic.
//!
//! These values define the deterministic math for the itinerary generator
//! and the readiness scorers. Keeping them together ensures that behavior
//! can only be adjusted via code changes reviewed in version control.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_TEAM_RENAMED: &str = "log.team.renamed";
pub(crate) const LOG_MEMBER_ADDED: &str = "log.member.added";
pub(crate) const LOG_MEMBER_REMOVED: &str = "log.member.removed";
pub(crate) const LOG_HEALTH_RECORDED: &str = "log.health.recorded";
pub(crate) const LOG_HIKING_RECORDED: &str = "log.hiking.recorded";
pub(crate) const LOG_HIKING_REMOVED: &str = "log.hiking.removed";
pub(crate) const LOG_HIKING_CLEARED: &str = "log.hiking.cleared";
pub(crate) const LOG_MOUNTAIN_ADDED: &str = "log.mountain.added";
pub(crate) const LOG_MOUNTAIN_REMOVED: &str = "log.mountain.removed";
pub(crate) const LOG_MOUNTAIN_CLEARED: &str = "log.mountain.cleared";
pub(crate) const LOG_GEAR_CLEARED: &str = "log.gear.cleared";
pub(crate) const LOG_PLAN_GENERATED: &str = "log.plan.generated";
pub(crate) const LOG_PLAN_ENTRY_ADDED: &str = "log.plan.entry-added";
pub(crate) const LOG_PLAN_ENTRY_REMOVED: &str = "log.plan.entry-removed";
pub(crate) const LOG_PLAN_TIMELINE_CLEARED: &str = "log.plan.timeline-cleared";
pub(crate) const LOG_PLAN_CLEARED: &str = "log.plan.cleared";

// Climb timing -------------------------------------------------------------
pub(crate) const CLIMBING_RATE_M_PER_HOUR: f64 = 300.0;
pub(crate) const SUMMIT_ELEVATION_M: i32 = 3776;
pub(crate) const SUNRISE_TIME: &str = "05:00";
pub(crate) const SUNRISE_HOUR: i32 = 5;
pub(crate) const DESCENT_TIME_RATIO: f64 = 0.7;
pub(crate) const START_TIME: &str = "10:00";
pub(crate) const CLIMBING_START_TIME: &str = "10:30";
pub(crate) const CLIMB_START_DECIMAL_HOURS: f64 = 10.5;
pub(crate) const PHOTO_BREAK_TIME: &str = "06:00";
pub(crate) const DESCENT_START_TIME: &str = "07:00";
pub(crate) const DESCENT_START_DECIMAL_HOURS: f64 = 7.0;
pub(crate) const MIN_DINNER_HOUR: i32 = 17;
pub(crate) const MAX_DINNER_HOUR: i32 = 19;
pub(crate) const MIN_BEDTIME_HOUR: i32 = 19;
pub(crate) const MAX_BEDTIME_HOUR: i32 = 21;
pub(crate) const SUMMIT_LEG_MIN_HOURS: f64 = 1.0;
pub(crate) const SUMMIT_LEG_MAX_HOURS: f64 = 6.0;
pub(crate) const HUT_LEG_MIN_HOURS: f64 = 0.5;
pub(crate) const REST_STOP_THRESHOLD_HOURS: f64 = 3.0;
pub(crate) const FALLBACK_TRAILHEAD_ELEVATION_M: i32 = 2305;

// Safety scoring -----------------------------------------------------------
pub(crate) const HEALTH_RECORD_WINDOW_DAYS: i64 = 3;
pub(crate) const RECENT_HEALTH_CHECK_HOURS: i64 = 48;
pub(crate) const RISK_WINDOW_DAYS: i64 = 2;
pub(crate) const MIN_SLEEP_HOURS: f64 = 5.0;
pub(crate) const CRITICAL_CONDITION_THRESHOLD: i32 = 2;
pub(crate) const HIGH_FATIGUE_THRESHOLD: i32 = 4;
pub(crate) const MODERATE_CONDITION_THRESHOLD: f64 = 3.0;
pub(crate) const MODERATE_FATIGUE_THRESHOLD: f64 = 3.0;
pub(crate) const MODERATE_SLEEP_HOURS: f64 = 6.0;
pub(crate) const DEFAULT_CONDITION_AVERAGE: f64 = 3.0;
pub(crate) const DEFAULT_FATIGUE_AVERAGE: f64 = 2.0;
pub(crate) const DEFAULT_SLEEP_AVERAGE_HOURS: f64 = 7.0;
pub(crate) const NO_RECORDS_SAFETY_BASELINE: i32 = 70;
pub(crate) const RED_FLAG_SAFETY_CAP: i32 = 60;
pub(crate) const CONDITION_SCORE_WEIGHT: f64 = 0.5;
pub(crate) const FATIGUE_SCORE_WEIGHT: f64 = 0.3;
pub(crate) const SLEEP_SCORE_WEIGHT: f64 = 0.2;

// Gear scoring -------------------------------------------------------------
pub(crate) const ESSENTIAL_GEAR_WEIGHT: f64 = 0.7;
pub(crate) const RECOMMENDED_GEAR_WEIGHT: f64 = 0.2;
pub(crate) const SEASONAL_GEAR_WEIGHT: f64 = 0.1;
pub(crate) const CRITICAL_GEAR_IDS: &[&str] = &["boots", "rain_jacket", "rain_pants", "headlamp"];
pub(crate) const CRITICAL_GEAR_CAP: i32 = 40;

// Experience scoring -------------------------------------------------------
pub(crate) const INTERMEDIATE_BASE_SCORE: i32 = 30;
pub(crate) const ADVANCED_BASE_SCORE: i32 = 50;
pub(crate) const POINTS_PER_TRIP: i32 = 10;
pub(crate) const TRIP_POINTS_CAP: i32 = 30;
pub(crate) const HIGH_ALTITUDE_GAIN_M: i32 = 1000;
pub(crate) const POINTS_PER_HIGH_ALTITUDE_TRIP: i32 = 5;
pub(crate) const HIGH_ALTITUDE_POINTS_CAP: i32 = 20;
pub(crate) const ADVANCED_LEVEL_THRESHOLD: i32 = 70;
pub(crate) const INTERMEDIATE_LEVEL_THRESHOLD: i32 = 40;

// Readiness weighting ------------------------------------------------------
pub(crate) const SAFETY_WEIGHT: f64 = 0.40;
pub(crate) const GEAR_WEIGHT: f64 = 0.35;
pub(crate) const EXPERIENCE_WEIGHT: f64 = 0.25;
pub(crate) const SAFETY_LOW_THRESHOLD: i32 = 50;
pub(crate) const SAFETY_LOW_CAP: i32 = 70;
pub(crate) const CRITICAL_GEAR_MISSING_CAP: i32 = 60;
pub(crate) const NO_RECENT_HEALTH_CAP: i32 = 80;

// Validation limits --------------------------------------------------------
pub(crate) const MAX_MEMBER_NAME_CHARS: usize = 50;
pub(crate) const MIN_MEMBER_AGE: i32 = 0;
pub(crate) const MAX_MEMBER_AGE: i32 = 150;
pub(crate) const MAX_MOUNTAIN_NAME_CHARS: usize = 100;
pub(crate) const MAX_MOUNTAIN_ELEVATION_M: i32 = 9000;
pub(crate) const MAX_MOUNTAIN_DISTANCE_KM: f64 = 1000.0;
pub(crate) const MIN_HEALTH_LEVEL: i32 = 1;
pub(crate) const MAX_HEALTH_LEVEL: i32 = 5;

// Time arithmetic ----------------------------------------------------------
pub(crate) const MINUTES_PER_DAY: i64 = 1440;
pub(crate) const MS_PER_HOUR: i64 = 3_600_000;
pub(crate) const MS_PER_DAY: i64 = 86_400_000;

// Team defaults ------------------------------------------------------------
pub(crate) const DEFAULT_TEAM_NAME: &str = "富士山登頂チーム";
