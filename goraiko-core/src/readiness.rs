//! Composite readiness: the weighted overall score and its safety caps.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CRITICAL_GEAR_MISSING_CAP, EXPERIENCE_WEIGHT, GEAR_WEIGHT, NO_RECENT_HEALTH_CAP, SAFETY_LOW_CAP,
    SAFETY_LOW_THRESHOLD, SAFETY_WEIGHT,
};
use crate::health::RiskLevel;
use crate::hiking::ExperienceScore;
use crate::members::MemberId;
use crate::numbers;

/// Overall readiness for one member, 0..=100.
///
/// Weighted combination of the three component scores (safety 40%, gear
/// 35%, experience 25%), then three independent caps. Every triggered cap
/// applies; the result is the minimum of the raw score and all of them.
#[must_use]
pub fn overall_readiness(
    safety: i32,
    gear: i32,
    experience: i32,
    critical_gear_missing: bool,
    has_recent_health: bool,
) -> i32 {
    let mut overall = numbers::round_f64_to_i32(
        f64::from(safety) * SAFETY_WEIGHT
            + f64::from(gear) * GEAR_WEIGHT
            + f64::from(experience) * EXPERIENCE_WEIGHT,
    );

    if safety < SAFETY_LOW_THRESHOLD {
        overall = overall.min(SAFETY_LOW_CAP);
    }
    if critical_gear_missing {
        overall = overall.min(CRITICAL_GEAR_MISSING_CAP);
    }
    if !has_recent_health {
        overall = overall.min(NO_RECENT_HEALTH_CAP);
    }
    overall
}

/// The full per-member readiness bundle assembled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub member_id: MemberId,
    pub name: String,
    pub safety_score: i32,
    pub gear_score: i32,
    pub experience: ExperienceScore,
    pub overall: i32,
    /// Health records inside the 3-day safety window.
    pub recent_record_count: usize,
    pub risk: RiskLevel,
    pub critical_gear_missing: bool,
    /// Whether a health record exists inside the 48-hour window.
    pub has_recent_health: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_score_is_the_weighted_sum() {
        assert_eq!(overall_readiness(100, 100, 100, false, true), 100);
        // 80*.4 + 60*.35 + 40*.25 = 63.
        assert_eq!(overall_readiness(80, 60, 40, false, true), 63);
    }

    #[test]
    fn low_safety_caps_at_seventy() {
        // Raw 30*.4 + 100*.35 + 100*.25 = 72, capped by safety < 50.
        assert_eq!(overall_readiness(30, 100, 100, false, true), 70);
    }

    #[test]
    fn missing_critical_gear_caps_at_sixty() {
        assert_eq!(overall_readiness(100, 100, 100, true, true), 60);
    }

    #[test]
    fn stale_health_caps_at_eighty() {
        assert_eq!(overall_readiness(100, 100, 100, false, false), 80);
    }

    #[test]
    fn triggered_caps_compose_to_the_minimum() {
        // Safety cap (70) and critical-gear cap (60) both trigger; the
        // lower one wins.
        assert_eq!(overall_readiness(30, 100, 100, true, true), 60);
        assert_eq!(overall_readiness(30, 100, 100, true, false), 60);
        // A raw score already below every cap is untouched.
        assert_eq!(overall_readiness(40, 20, 10, false, true), 26);
    }
}
