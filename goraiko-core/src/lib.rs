//! Goraiko Planning Engine
//!
//! Platform-agnostic core logic for the Goraiko summit-trip planner. This
//! crate computes the timed two-day sunrise itinerary and per-member
//! readiness scores without UI or platform-specific dependencies; hosts
//! supply persistence and the wall clock through the traits below.

pub mod constants;
pub mod export;
pub mod gear;
pub mod health;
pub mod hiking;
pub mod members;
pub mod numbers;
pub mod plan;
pub mod readiness;
pub mod routes;
pub mod schedule;
pub mod state;
pub mod time_of_day;

// Re-export commonly used types
pub use export::{gear_export_text, plan_export_text};
pub use gear::{
    CategoryProgress, GearCatalog, GearCategory, GearCategoryId, GearChecklist, GearItem,
    KitSummary, category_progress, gear_score, has_critical_gear_missing, kit_summary,
};
pub use health::{
    HealthRecord, RecordHealthInput, RiskLevel, has_recent_health, risk_level, safety_score,
};
pub use hiking::{
    AddMountainInput, Difficulty, ExperienceScore, HikingRecord, Mountain, RecordHikingInput,
    TrailWeather, experience_score,
};
pub use members::{AddMemberInput, ExperienceLevel, Member, MemberId};
pub use plan::{Plan, PlanEntry, timeline_durations};
pub use readiness::{ReadinessSummary, overall_readiness};
pub use routes::{Hut, RouteCatalog, RouteEntry};
pub use schedule::{ScheduleItem, ScheduleItems, goraiko_schedule, hours_to_hut, hours_to_summit};
pub use state::{TeamError, TeamSnapshot, TeamState};
pub use time_of_day::{ClockTime, add_hours, duration_text, format_time, parse_time};

/// Trait for abstracting wall-clock access
/// Platform-specific implementations should provide this
pub trait Clock {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;

    /// Current calendar date as `YYYY-MM-DD`, used to default record
    /// dates. Keeping calendar formatting here keeps calendar math out of
    /// the core.
    fn today(&self) -> String;
}

/// A clock pinned to a fixed instant, for tests and host previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    now_ms: i64,
    today: String,
}

impl FixedClock {
    #[must_use]
    pub fn new(now_ms: i64, today: impl Into<String>) -> Self {
        Self {
            now_ms,
            today: today.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn today(&self) -> String {
        self.today.clone()
    }
}

/// Trait for abstracting snapshot persistence
/// Platform-specific implementations should provide this
pub trait TeamStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the snapshot stored under a team id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_team(&self, team_id: &str) -> Result<Option<TeamSnapshot>, Self::Error>;

    /// Save a snapshot under a team id. The optional write token is the
    /// shared secret the backing store may require; its verification (and
    /// the auth/transport failure taxonomy) lives in the implementation's
    /// error type.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved or the token is
    /// rejected.
    fn save_team(
        &self,
        team_id: &str,
        snapshot: &TeamSnapshot,
        write_token: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Delete the snapshot stored under a team id.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted.
    fn delete_team(&self, team_id: &str) -> Result<(), Self::Error>;
}

/// Binds a storage backend and a clock into the engine hosts talk to.
pub struct TeamEngine<S, C>
where
    S: TeamStorage,
    C: Clock,
{
    storage: S,
    clock: C,
}

impl<S, C> TeamEngine<S, C>
where
    S: TeamStorage,
    C: Clock,
{
    /// Create a new engine with the provided storage and clock.
    pub const fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    /// Borrow the injected clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Load and rehydrate a team's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    pub fn load_team(&self, team_id: &str) -> Result<Option<TeamState>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let snapshot = self.storage.load_team(team_id).map_err(Into::into)?;
        Ok(snapshot.map(TeamState::from_snapshot))
    }

    /// Snapshot a team's state and save it.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the save fails or the write token is
    /// rejected.
    pub fn save_team(
        &self,
        team_id: &str,
        state: &TeamState,
        write_token: Option<&str>,
    ) -> Result<(), S::Error> {
        let snapshot = state.snapshot(&self.clock);
        self.storage.save_team(team_id, &snapshot, write_token)
    }

    /// Delete a team's stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the delete fails.
    pub fn delete_team(&self, team_id: &str) -> Result<(), S::Error> {
        self.storage.delete_team(team_id)
    }
}
