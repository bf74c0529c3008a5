//! Health-condition records, the safety score, and risk classification.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONDITION_SCORE_WEIGHT, CRITICAL_CONDITION_THRESHOLD, DEFAULT_CONDITION_AVERAGE,
    DEFAULT_FATIGUE_AVERAGE, DEFAULT_SLEEP_AVERAGE_HOURS, FATIGUE_SCORE_WEIGHT,
    HEALTH_RECORD_WINDOW_DAYS, HIGH_FATIGUE_THRESHOLD, MIN_SLEEP_HOURS,
    MODERATE_CONDITION_THRESHOLD, MODERATE_FATIGUE_THRESHOLD, MODERATE_SLEEP_HOURS, MS_PER_DAY,
    MS_PER_HOUR, NO_RECORDS_SAFETY_BASELINE, RED_FLAG_SAFETY_CAP, RISK_WINDOW_DAYS,
    SLEEP_SCORE_WEIGHT,
};
use crate::members::MemberId;
use crate::numbers;

/// One self-reported health check. Append-only; removed only when the
/// member is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    /// Weak reference; resolved at read time and skipped when dangling.
    pub member_id: MemberId,
    /// Overall condition, 1 (worst) to 5 (best).
    pub condition: i32,
    /// Hours slept the previous night, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Fatigue, 1 (fresh) to 5 (exhausted).
    pub fatigue_level: i32,
    pub recorded_at: i64,
}

impl HealthRecord {
    fn reported_sleep(&self) -> Option<f64> {
        self.sleep_hours.filter(|s| s.is_finite())
    }

    /// Whether this single record is severe enough to cap the safety score
    /// on its own.
    #[must_use]
    pub fn is_red_flag(&self) -> bool {
        self.condition <= CRITICAL_CONDITION_THRESHOLD
            || self.fatigue_level >= HIGH_FATIGUE_THRESHOLD
            || self.reported_sleep().is_some_and(|s| s < MIN_SLEEP_HOURS)
    }
}

/// Validated input for recording a health check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHealthInput {
    pub member_id: MemberId,
    pub condition: i32,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    pub fatigue_level: i32,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / f64::from(count))
}

struct WindowAverages {
    condition: f64,
    fatigue: f64,
    sleep: f64,
}

fn window_averages(records: &[&HealthRecord]) -> WindowAverages {
    WindowAverages {
        condition: mean(records.iter().map(|r| f64::from(r.condition)))
            .unwrap_or(DEFAULT_CONDITION_AVERAGE),
        fatigue: mean(records.iter().map(|r| f64::from(r.fatigue_level)))
            .unwrap_or(DEFAULT_FATIGUE_AVERAGE),
        sleep: mean(records.iter().filter_map(|r| r.reported_sleep()))
            .unwrap_or(DEFAULT_SLEEP_AVERAGE_HOURS),
    }
}

/// Safety score for one member, 0..=100.
///
/// Only records within the 3-day window count. An empty window yields the
/// conservative baseline of 70. Averages of condition, fatigue (inverted),
/// and sleep are normalized and combined 0.5/0.3/0.2; any red-flag record
/// in the window caps the result at 60.
pub fn safety_score<'a, I>(records: I, now_ms: i64) -> i32
where
    I: IntoIterator<Item = &'a HealthRecord>,
{
    let window_start = now_ms - HEALTH_RECORD_WINDOW_DAYS * MS_PER_DAY;
    let windowed: Vec<&HealthRecord> = records
        .into_iter()
        .filter(|r| r.recorded_at >= window_start)
        .collect();
    if windowed.is_empty() {
        return NO_RECORDS_SAFETY_BASELINE;
    }

    let avg = window_averages(&windowed);
    let condition_score = numbers::clamp_unit((avg.condition - 1.0) / 4.0) * 100.0;
    let fatigue_score = numbers::clamp_unit((5.0 - avg.fatigue) / 4.0) * 100.0;
    let sleep_score = numbers::clamp_unit(avg.sleep / DEFAULT_SLEEP_AVERAGE_HOURS) * 100.0;

    let mut safety = numbers::round_f64_to_i32(
        condition_score * CONDITION_SCORE_WEIGHT
            + fatigue_score * FATIGUE_SCORE_WEIGHT
            + sleep_score * SLEEP_SCORE_WEIGHT,
    );
    if windowed.iter().any(|r| r.is_red_flag()) {
        safety = safety.min(RED_FLAG_SAFETY_CAP);
    }
    safety
}

/// Whether any record falls within `window_hours` of now.
pub fn has_recent_health<'a, I>(records: I, now_ms: i64, window_hours: i64) -> bool
where
    I: IntoIterator<Item = &'a HealthRecord>,
{
    let cutoff = now_ms - window_hours * MS_PER_HOUR;
    records.into_iter().any(|r| r.recorded_at >= cutoff)
}

/// Coarse per-member risk classification over the last two days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    /// No records in the window; not enough data to classify.
    #[default]
    NoData,
}

impl RiskLevel {
    /// Get i18n key for the risk label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Low => "risk.level.low",
            Self::Moderate => "risk.level.moderate",
            Self::High => "risk.level.high",
            Self::NoData => "risk.level.no-data",
        }
    }
}

/// Classify a member's short-term risk from their recent averages.
pub fn risk_level<'a, I>(records: I, now_ms: i64) -> RiskLevel
where
    I: IntoIterator<Item = &'a HealthRecord>,
{
    let window_start = now_ms - RISK_WINDOW_DAYS * MS_PER_DAY;
    let windowed: Vec<&HealthRecord> = records
        .into_iter()
        .filter(|r| r.recorded_at >= window_start)
        .collect();
    if windowed.is_empty() {
        return RiskLevel::NoData;
    }

    let avg = window_averages(&windowed);
    if avg.condition <= f64::from(CRITICAL_CONDITION_THRESHOLD)
        || avg.fatigue >= f64::from(HIGH_FATIGUE_THRESHOLD)
        || avg.sleep < MIN_SLEEP_HOURS
    {
        RiskLevel::High
    } else if avg.condition <= MODERATE_CONDITION_THRESHOLD
        || avg.fatigue >= MODERATE_FATIGUE_THRESHOLD
        || avg.sleep < MODERATE_SLEEP_HOURS
    {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;
    const HOUR: i64 = MS_PER_HOUR;

    fn record(age_hours: i64, condition: i32, fatigue: i32, sleep: Option<f64>) -> HealthRecord {
        HealthRecord {
            id: age_hours,
            member_id: 1,
            condition,
            sleep_hours: sleep,
            fatigue_level: fatigue,
            recorded_at: NOW - age_hours * HOUR,
        }
    }

    #[test]
    fn empty_window_returns_baseline() {
        let no_records: [HealthRecord; 0] = [];
        assert_eq!(safety_score(no_records.iter(), NOW), 70);
        // A record outside the 3-day window does not count.
        let stale = [record(80, 5, 1, Some(8.0))];
        assert_eq!(safety_score(stale.iter(), NOW), 70);
    }

    #[test]
    fn healthy_window_scores_high() {
        let records = [record(2, 5, 1, Some(8.0)), record(26, 5, 1, Some(7.5))];
        let score = safety_score(records.iter(), NOW);
        assert_eq!(score, 100);
    }

    #[test]
    fn red_flag_caps_at_sixty() {
        let records = [record(2, 1, 5, Some(3.0))];
        assert!(safety_score(records.iter(), NOW) <= 60);

        // A single short night among otherwise good records still caps.
        let records = [record(2, 5, 1, Some(4.0)), record(4, 5, 1, Some(8.0))];
        assert!(safety_score(records.iter(), NOW) <= 60);
    }

    #[test]
    fn missing_sleep_defaults_to_seven_hours() {
        let records = [record(2, 3, 3, None)];
        // condition (3-1)/4 -> 50, fatigue (5-3)/4 -> 50, sleep 7/7 -> 100.
        assert_eq!(safety_score(records.iter(), NOW), 60);
    }

    #[test]
    fn non_finite_sleep_is_ignored_not_flagged() {
        let mut rec = record(2, 5, 1, Some(f64::NAN));
        assert!(!rec.is_red_flag());
        rec.sleep_hours = Some(4.0);
        assert!(rec.is_red_flag());
    }

    #[test]
    fn recency_check_uses_hour_window() {
        let records = [record(47, 3, 2, None)];
        assert!(has_recent_health(records.iter(), NOW, 48));
        assert!(!has_recent_health(records.iter(), NOW, 46));
    }

    #[test]
    fn risk_levels_classify_averages() {
        let no_records: [HealthRecord; 0] = [];
        assert_eq!(risk_level(no_records.iter(), NOW), RiskLevel::NoData);

        let high = [record(2, 2, 2, Some(7.0))];
        assert_eq!(risk_level(high.iter(), NOW), RiskLevel::High);

        let moderate = [record(2, 3, 3, Some(7.0))];
        assert_eq!(risk_level(moderate.iter(), NOW), RiskLevel::Moderate);

        let low = [record(2, 5, 1, Some(8.0))];
        assert_eq!(risk_level(low.iter(), NOW), RiskLevel::Low);

        // Records older than two days are out of the risk window even
        // though the safety window still sees them.
        let stale = [record(60, 1, 5, Some(3.0))];
        assert_eq!(risk_level(stale.iter(), NOW), RiskLevel::NoData);
    }
}
