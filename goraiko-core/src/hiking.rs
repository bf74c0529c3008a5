//! Hiking history, the user-maintained mountain list, and the experience
//! score derived from both.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    ADVANCED_LEVEL_THRESHOLD, HIGH_ALTITUDE_GAIN_M, HIGH_ALTITUDE_POINTS_CAP,
    INTERMEDIATE_LEVEL_THRESHOLD, POINTS_PER_HIGH_ALTITUDE_TRIP, POINTS_PER_TRIP, TRIP_POINTS_CAP,
};
use crate::members::{ExperienceLevel, MemberId};

/// Subjective difficulty of a logged hike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Novice,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Get i18n key for the difficulty label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Novice => "difficulty.novice",
            Self::Intermediate => "difficulty.intermediate",
            Self::Advanced => "difficulty.advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novice" => Ok(Self::Novice),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

/// Weather encountered on a logged hike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrailWeather {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl TrailWeather {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }

    /// Get i18n key for the weather label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Sunny => "trail-weather.sunny",
            Self::Cloudy => "trail-weather.cloudy",
            Self::Rainy => "trail-weather.rainy",
            Self::Snowy => "trail-weather.snowy",
        }
    }
}

impl fmt::Display for TrailWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged past hike. Append-only, independently deletable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikingRecord {
    pub id: i64,
    /// Weak reference; resolved at read time and skipped when dangling.
    pub member_id: MemberId,
    pub mountain_name: String,
    pub elevation_gain_m: i32,
    pub distance_km: f64,
    pub difficulty: Difficulty,
    /// Calendar date of the hike, `YYYY-MM-DD`.
    pub date: String,
    pub weather: TrailWeather,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_at: i64,
}

/// Validated input for logging a hike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordHikingInput {
    pub member_id: MemberId,
    pub mountain_name: String,
    #[serde(default)]
    pub elevation_gain_m: i32,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Defaults to the clock's current date when empty.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub weather: TrailWeather,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A reference mountain used to pre-fill hike logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub id: i64,
    pub name: String,
    pub elevation_m: i32,
    pub distance_km: f64,
    pub added_at: i64,
}

/// Validated input for registering a mountain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AddMountainInput {
    pub name: String,
    #[serde(default)]
    pub elevation_m: i32,
    #[serde(default)]
    pub distance_km: f64,
}

/// Experience score plus the level label derived from it. The derived
/// level is independent of the member's self-declared level and the two
/// may disagree; both are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceScore {
    pub score: i32,
    pub level: ExperienceLevel,
}

/// Experience score for one member, 0..=100.
///
/// Base points come from the self-declared level, plus capped points per
/// logged trip and per trip with more than 1000 m of elevation gain.
pub fn experience_score<'a, I>(declared: ExperienceLevel, records: I) -> ExperienceScore
where
    I: IntoIterator<Item = &'a HikingRecord>,
{
    let mut trips = 0i32;
    let mut high_altitude = 0i32;
    for record in records {
        trips = trips.saturating_add(1);
        if record.elevation_gain_m > HIGH_ALTITUDE_GAIN_M {
            high_altitude = high_altitude.saturating_add(1);
        }
    }

    let score = declared.base_score()
        + trips.saturating_mul(POINTS_PER_TRIP).min(TRIP_POINTS_CAP)
        + high_altitude
            .saturating_mul(POINTS_PER_HIGH_ALTITUDE_TRIP)
            .min(HIGH_ALTITUDE_POINTS_CAP);

    let level = if score >= ADVANCED_LEVEL_THRESHOLD {
        ExperienceLevel::Advanced
    } else if score >= INTERMEDIATE_LEVEL_THRESHOLD {
        ExperienceLevel::Intermediate
    } else {
        ExperienceLevel::Beginner
    };
    ExperienceScore { score, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hike(elevation_gain_m: i32) -> HikingRecord {
        HikingRecord {
            id: 1,
            member_id: 1,
            mountain_name: "高尾山".to_string(),
            elevation_gain_m,
            distance_km: 8.0,
            difficulty: Difficulty::Novice,
            date: "2025-10-12".to_string(),
            weather: TrailWeather::Sunny,
            notes: None,
            recorded_at: 0,
        }
    }

    #[test]
    fn beginner_without_history_scores_zero() {
        let no_records: [HikingRecord; 0] = [];
        let result = experience_score(ExperienceLevel::Beginner, no_records.iter());
        assert_eq!(result.score, 0);
        assert_eq!(result.level, ExperienceLevel::Beginner);
    }

    #[test]
    fn trip_points_cap_at_thirty() {
        let records: Vec<HikingRecord> = (0..8).map(|_| hike(500)).collect();
        let result = experience_score(ExperienceLevel::Beginner, records.iter());
        assert_eq!(result.score, 30);
    }

    #[test]
    fn high_altitude_points_cap_at_twenty() {
        let records: Vec<HikingRecord> = (0..6).map(|_| hike(1500)).collect();
        // 6 trips -> 30 capped, 6 high-altitude -> 20 capped.
        let result = experience_score(ExperienceLevel::Beginner, records.iter());
        assert_eq!(result.score, 50);
        assert_eq!(result.level, ExperienceLevel::Intermediate);
    }

    #[test]
    fn gain_must_exceed_threshold_to_count_as_high_altitude() {
        let records = [hike(1000)];
        let result = experience_score(ExperienceLevel::Beginner, records.iter());
        assert_eq!(result.score, 10);
    }

    #[test]
    fn derived_level_may_disagree_with_declared() {
        let records: Vec<HikingRecord> = (0..4).map(|_| hike(1200)).collect();
        // Advanced base 50 + 30 trip points + 20 altitude points = 100.
        let seasoned = experience_score(ExperienceLevel::Advanced, records.iter());
        assert_eq!(seasoned.score, 100);
        assert_eq!(seasoned.level, ExperienceLevel::Advanced);

        // A self-declared Advanced member with no logged hikes derives a
        // lower level than they claim.
        let no_records: [HikingRecord; 0] = [];
        let unproven = experience_score(ExperienceLevel::Advanced, no_records.iter());
        assert_eq!(unproven.score, 50);
        assert_eq!(unproven.level, ExperienceLevel::Intermediate);
    }
}
