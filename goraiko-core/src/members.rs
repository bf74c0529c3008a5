//! Team roster types.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ADVANCED_BASE_SCORE, INTERMEDIATE_BASE_SCORE};

/// Identifier of a roster member, allocated from the creation timestamp.
pub type MemberId = i64;

/// Self-declared climbing experience of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Get i18n key for the level label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Beginner => "experience.level.beginner",
            Self::Intermediate => "experience.level.intermediate",
            Self::Advanced => "experience.level.advanced",
        }
    }

    /// Base contribution of the self-declared level to the experience
    /// score.
    #[must_use]
    pub const fn base_score(self) -> i32 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => INTERMEDIATE_BASE_SCORE,
            Self::Advanced => ADVANCED_BASE_SCORE,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

/// One member of the team roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub experience_level: ExperienceLevel,
    pub joined_at: i64,
}

/// Validated input for adding a member to the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AddMemberInput {
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_level_round_trips_through_str() {
        for level in [
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ] {
            assert_eq!(level.as_str().parse::<ExperienceLevel>(), Ok(level));
        }
        assert!("expert".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn base_scores_match_levels() {
        assert_eq!(ExperienceLevel::Beginner.base_score(), 0);
        assert_eq!(ExperienceLevel::Intermediate.base_score(), 30);
        assert_eq!(ExperienceLevel::Advanced.base_score(), 50);
    }
}
