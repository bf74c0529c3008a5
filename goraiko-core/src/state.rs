//! Team application state and the controller methods that mutate it.
//!
//! All mutation funnels through [`TeamState`] methods so that validation
//! and the cascade-delete invariant live in one place. Records reference
//! members by id only (weak references); a dangling id is skipped at read
//! time, never a crash. Mutations append `log.*` keys for the host to
//! drain and localize.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_TEAM_NAME, HEALTH_RECORD_WINDOW_DAYS, LOG_GEAR_CLEARED, LOG_HEALTH_RECORDED,
    LOG_HIKING_CLEARED, LOG_HIKING_RECORDED, LOG_HIKING_REMOVED, LOG_MEMBER_ADDED,
    LOG_MEMBER_REMOVED, LOG_MOUNTAIN_ADDED, LOG_MOUNTAIN_CLEARED, LOG_MOUNTAIN_REMOVED,
    LOG_PLAN_CLEARED, LOG_PLAN_ENTRY_ADDED, LOG_PLAN_ENTRY_REMOVED, LOG_PLAN_GENERATED,
    LOG_PLAN_TIMELINE_CLEARED, LOG_TEAM_RENAMED, MAX_HEALTH_LEVEL, MAX_MEMBER_AGE,
    MAX_MEMBER_NAME_CHARS, MAX_MOUNTAIN_DISTANCE_KM, MAX_MOUNTAIN_ELEVATION_M,
    MAX_MOUNTAIN_NAME_CHARS, MIN_HEALTH_LEVEL, MIN_MEMBER_AGE, MS_PER_DAY,
    RECENT_HEALTH_CHECK_HOURS,
};
use crate::gear::{GearCatalog, GearChecklist, gear_score, has_critical_gear_missing};
use crate::health::{HealthRecord, RecordHealthInput, has_recent_health, risk_level, safety_score};
use crate::hiking::{AddMountainInput, HikingRecord, Mountain, RecordHikingInput, experience_score};
use crate::members::{AddMemberInput, Member, MemberId};
use crate::plan::{Plan, PlanEntry};
use crate::readiness::{ReadinessSummary, overall_readiness};
use crate::Clock;
use crate::routes::RouteCatalog;
use crate::schedule::goraiko_schedule;

/// Errors raised when a controller operation is rejected. Validation and
/// not-found failures leave the state untouched.
#[derive(Debug, Error, PartialEq)]
pub enum TeamError {
    #[error("team name must not be empty")]
    TeamNameRequired,
    #[error("member name must not be empty")]
    NameRequired,
    #[error("member name exceeds {max} characters")]
    NameTooLong { max: usize },
    #[error("a member named {name} already exists")]
    DuplicateName { name: String },
    #[error("age {age} is outside the accepted range")]
    AgeOutOfRange { age: i32 },
    #[error("{field} must be between 1 and 5 (got {value})")]
    LevelOutOfRange { field: &'static str, value: i32 },
    #[error("mountain name must not be empty")]
    MountainNameRequired,
    #[error("mountain name exceeds {max} characters")]
    MountainNameTooLong { max: usize },
    #[error("elevation {elevation_m} m is outside the accepted range")]
    ElevationOutOfRange { elevation_m: i32 },
    #[error("distance {distance_km} km is outside the accepted range")]
    DistanceOutOfRange { distance_km: f64 },
    #[error("a mountain named {name} is already registered")]
    DuplicateMountain { name: String },
    #[error("plan entries need both a time and an activity")]
    EntryFieldsRequired,
    #[error("member {id} not found")]
    MemberNotFound { id: MemberId },
    #[error("mountain {id} not found")]
    MountainNotFound { id: i64 },
    #[error("hiking record {id} not found")]
    RecordNotFound { id: i64 },
    #[error("plan entry {id} not found")]
    EntryNotFound { id: i64 },
    #[error("hut {hut} not found on route {route}")]
    HutNotFound { route: String, hut: String },
    #[error("a route and hut must be selected first")]
    SelectionRequired,
}

/// The serialized form of the team state exchanged with the storage
/// collaborator. Collections travel as plain lists; maps are rebuilt on
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TeamSnapshot {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub health_records: Vec<HealthRecord>,
    #[serde(default)]
    pub gear_checklist: BTreeMap<MemberId, GearChecklist>,
    #[serde(default)]
    pub hiking_records: Vec<HikingRecord>,
    #[serde(default)]
    pub mountains: Vec<Mountain>,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub last_saved: i64,
}

/// The whole team's application state. Collections are keyed by their
/// monotonic ids, which preserves creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub team_name: String,
    pub members: BTreeMap<MemberId, Member>,
    pub health_records: BTreeMap<i64, HealthRecord>,
    pub gear_checklist: BTreeMap<MemberId, GearChecklist>,
    pub hiking_records: BTreeMap<i64, HikingRecord>,
    pub mountains: BTreeMap<i64, Mountain>,
    pub plan: Plan,
    /// Pending log keys for the host to drain and localize.
    #[serde(skip)]
    pub logs: Vec<String>,
    #[serde(skip)]
    last_id: i64,
}

impl Default for TeamState {
    fn default() -> Self {
        Self {
            team_name: DEFAULT_TEAM_NAME.to_string(),
            members: BTreeMap::new(),
            health_records: BTreeMap::new(),
            gear_checklist: BTreeMap::new(),
            hiking_records: BTreeMap::new(),
            mountains: BTreeMap::new(),
            plan: Plan::default(),
            logs: Vec::new(),
            last_id: 0,
        }
    }
}

impl TeamState {
    /// Allocate the next id: the clock's timestamp, bumped past any id
    /// already handed out so ids stay strictly monotonic.
    fn next_id(&mut self, clock: &impl Clock) -> i64 {
        self.last_id = clock.now_ms().max(self.last_id + 1);
        self.last_id
    }

    fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }

    /// Hand the pending log keys to the host.
    pub fn drain_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    fn ensure_member(&self, id: MemberId) -> Result<(), TeamError> {
        if self.members.contains_key(&id) {
            Ok(())
        } else {
            Err(TeamError::MemberNotFound { id })
        }
    }

    // ---- roster -----------------------------------------------------------

    /// Rename the team. The name is trimmed and must not be empty.
    pub fn rename_team(&mut self, name: &str) -> Result<(), TeamError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TeamError::TeamNameRequired);
        }
        self.team_name = trimmed.to_string();
        self.push_log(LOG_TEAM_RENAMED);
        Ok(())
    }

    /// Add a member to the roster and give them an empty gear checklist.
    pub fn add_member(
        &mut self,
        input: AddMemberInput,
        clock: &impl Clock,
    ) -> Result<MemberId, TeamError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(TeamError::NameRequired);
        }
        if name.chars().count() > MAX_MEMBER_NAME_CHARS {
            return Err(TeamError::NameTooLong {
                max: MAX_MEMBER_NAME_CHARS,
            });
        }
        if self.members.values().any(|m| m.name == name) {
            return Err(TeamError::DuplicateName { name });
        }
        if let Some(age) = input.age {
            if !(MIN_MEMBER_AGE..=MAX_MEMBER_AGE).contains(&age) {
                return Err(TeamError::AgeOutOfRange { age });
            }
        }

        let id = self.next_id(clock);
        self.members.insert(
            id,
            Member {
                id,
                name,
                age: input.age,
                experience_level: input.experience_level,
                joined_at: clock.now_ms(),
            },
        );
        self.gear_checklist.entry(id).or_default();
        self.push_log(LOG_MEMBER_ADDED);
        Ok(id)
    }

    /// Remove a member and cascade-delete their health records, hiking
    /// records, and gear checklist. Other members' data is untouched.
    pub fn delete_member(&mut self, id: MemberId) -> Result<(), TeamError> {
        if self.members.remove(&id).is_none() {
            return Err(TeamError::MemberNotFound { id });
        }
        self.health_records.retain(|_, r| r.member_id != id);
        self.hiking_records.retain(|_, r| r.member_id != id);
        self.gear_checklist.remove(&id);
        self.push_log(LOG_MEMBER_REMOVED);
        Ok(())
    }

    /// Look up a member.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    // ---- health -----------------------------------------------------------

    /// Append a health check for a member. Non-finite sleep input is
    /// stored as absent.
    pub fn record_health(
        &mut self,
        input: RecordHealthInput,
        clock: &impl Clock,
    ) -> Result<i64, TeamError> {
        self.ensure_member(input.member_id)?;
        for (field, value) in [
            ("condition", input.condition),
            ("fatigue level", input.fatigue_level),
        ] {
            if !(MIN_HEALTH_LEVEL..=MAX_HEALTH_LEVEL).contains(&value) {
                return Err(TeamError::LevelOutOfRange { field, value });
            }
        }

        let id = self.next_id(clock);
        self.health_records.insert(
            id,
            HealthRecord {
                id,
                member_id: input.member_id,
                condition: input.condition,
                sleep_hours: input.sleep_hours.filter(|s| s.is_finite()),
                fatigue_level: input.fatigue_level,
                recorded_at: clock.now_ms(),
            },
        );
        self.push_log(LOG_HEALTH_RECORDED);
        Ok(id)
    }

    /// A member's health records, oldest first.
    pub fn member_health(&self, id: MemberId) -> impl Iterator<Item = &HealthRecord> {
        self.health_records.values().filter(move |r| r.member_id == id)
    }

    // ---- hiking history ---------------------------------------------------

    /// Log a past hike for a member. An empty date defaults to the clock's
    /// current date.
    pub fn record_hiking(
        &mut self,
        input: RecordHikingInput,
        clock: &impl Clock,
    ) -> Result<i64, TeamError> {
        self.ensure_member(input.member_id)?;
        let mountain_name = input.mountain_name.trim().to_string();
        if mountain_name.is_empty() {
            return Err(TeamError::MountainNameRequired);
        }
        if input.elevation_gain_m < 0 {
            return Err(TeamError::ElevationOutOfRange {
                elevation_m: input.elevation_gain_m,
            });
        }
        if input.distance_km < 0.0 || !input.distance_km.is_finite() {
            return Err(TeamError::DistanceOutOfRange {
                distance_km: input.distance_km,
            });
        }

        let id = self.next_id(clock);
        self.hiking_records.insert(
            id,
            HikingRecord {
                id,
                member_id: input.member_id,
                mountain_name,
                elevation_gain_m: input.elevation_gain_m,
                distance_km: input.distance_km,
                difficulty: input.difficulty,
                date: input
                    .date
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| clock.today()),
                weather: input.weather,
                notes: input.notes.filter(|n| !n.trim().is_empty()),
                recorded_at: clock.now_ms(),
            },
        );
        self.push_log(LOG_HIKING_RECORDED);
        Ok(id)
    }

    /// Delete one hiking record.
    pub fn delete_hiking_record(&mut self, id: i64) -> Result<(), TeamError> {
        if self.hiking_records.remove(&id).is_none() {
            return Err(TeamError::RecordNotFound { id });
        }
        self.push_log(LOG_HIKING_REMOVED);
        Ok(())
    }

    /// Delete every hiking record. Returns how many were removed.
    pub fn clear_hiking_records(&mut self) -> usize {
        let removed = self.hiking_records.len();
        self.hiking_records.clear();
        if removed > 0 {
            self.push_log(LOG_HIKING_CLEARED);
        }
        removed
    }

    /// A member's hiking records, oldest first.
    pub fn member_hiking(&self, id: MemberId) -> impl Iterator<Item = &HikingRecord> {
        self.hiking_records.values().filter(move |r| r.member_id == id)
    }

    // ---- mountain list ----------------------------------------------------

    /// Register a reference mountain for pre-filling hike logs.
    pub fn add_mountain(
        &mut self,
        input: AddMountainInput,
        clock: &impl Clock,
    ) -> Result<i64, TeamError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(TeamError::MountainNameRequired);
        }
        if name.chars().count() > MAX_MOUNTAIN_NAME_CHARS {
            return Err(TeamError::MountainNameTooLong {
                max: MAX_MOUNTAIN_NAME_CHARS,
            });
        }
        if !(0..=MAX_MOUNTAIN_ELEVATION_M).contains(&input.elevation_m) {
            return Err(TeamError::ElevationOutOfRange {
                elevation_m: input.elevation_m,
            });
        }
        if !(0.0..=MAX_MOUNTAIN_DISTANCE_KM).contains(&input.distance_km) {
            return Err(TeamError::DistanceOutOfRange {
                distance_km: input.distance_km,
            });
        }
        if self.mountains.values().any(|m| m.name == name) {
            return Err(TeamError::DuplicateMountain { name });
        }

        let id = self.next_id(clock);
        self.mountains.insert(
            id,
            Mountain {
                id,
                name,
                elevation_m: input.elevation_m,
                distance_km: input.distance_km,
                added_at: clock.now_ms(),
            },
        );
        self.push_log(LOG_MOUNTAIN_ADDED);
        Ok(id)
    }

    /// Delete one registered mountain.
    pub fn delete_mountain(&mut self, id: i64) -> Result<(), TeamError> {
        if self.mountains.remove(&id).is_none() {
            return Err(TeamError::MountainNotFound { id });
        }
        self.push_log(LOG_MOUNTAIN_REMOVED);
        Ok(())
    }

    /// Delete every registered mountain. Returns how many were removed.
    pub fn clear_mountains(&mut self) -> usize {
        let removed = self.mountains.len();
        self.mountains.clear();
        if removed > 0 {
            self.push_log(LOG_MOUNTAIN_CLEARED);
        }
        removed
    }

    /// Resolve a mountain for pre-filling the hike form.
    #[must_use]
    pub fn mountain_prefill(&self, id: i64) -> Option<&Mountain> {
        self.mountains.get(&id)
    }

    // ---- gear -------------------------------------------------------------

    /// Set one checklist item for a member.
    pub fn set_gear_item(
        &mut self,
        member_id: MemberId,
        item_id: &str,
        checked: bool,
    ) -> Result<(), TeamError> {
        self.ensure_member(member_id)?;
        self.gear_checklist
            .entry(member_id)
            .or_default()
            .insert(item_id.to_string(), checked);
        Ok(())
    }

    /// Uncheck every item for a member.
    pub fn clear_gear(&mut self, member_id: MemberId) -> Result<(), TeamError> {
        self.ensure_member(member_id)?;
        self.gear_checklist.insert(member_id, GearChecklist::new());
        self.push_log(LOG_GEAR_CLEARED);
        Ok(())
    }

    /// A member's checklist, if they have one.
    #[must_use]
    pub fn member_checklist(&self, member_id: MemberId) -> Option<&GearChecklist> {
        self.gear_checklist.get(&member_id)
    }

    // ---- plan -------------------------------------------------------------

    /// Set the planned date. Empty input clears it.
    pub fn set_plan_date(&mut self, date: Option<String>) {
        self.plan.date = date.filter(|d| !d.trim().is_empty());
    }

    /// Set the selected route. Empty input clears it.
    pub fn set_plan_route(&mut self, route: Option<String>) {
        self.plan.route = route.filter(|r| !r.trim().is_empty());
    }

    /// Set the selected hut. Empty input clears it.
    pub fn set_plan_hut(&mut self, hut: Option<String>) {
        self.plan.hut = hut.filter(|h| !h.trim().is_empty());
    }

    /// Append a manual timeline entry after the current last position.
    pub fn add_plan_entry(
        &mut self,
        time: &str,
        activity: &str,
        clock: &impl Clock,
    ) -> Result<i64, TeamError> {
        let time = time.trim();
        let activity = activity.trim();
        if time.is_empty() || activity.is_empty() {
            return Err(TeamError::EntryFieldsRequired);
        }
        let order = self.plan.next_order();
        let id = self.next_id(clock);
        self.plan.entries.push(PlanEntry {
            id,
            time: time.to_string(),
            activity: activity.to_string(),
            order: Some(order),
        });
        self.push_log(LOG_PLAN_ENTRY_ADDED);
        Ok(id)
    }

    /// Delete one timeline entry.
    pub fn delete_plan_entry(&mut self, id: i64) -> Result<(), TeamError> {
        let before = self.plan.entries.len();
        self.plan.entries.retain(|e| e.id != id);
        if self.plan.entries.len() == before {
            return Err(TeamError::EntryNotFound { id });
        }
        self.push_log(LOG_PLAN_ENTRY_REMOVED);
        Ok(())
    }

    /// Delete every timeline entry but keep the selections. Returns how
    /// many entries were removed.
    pub fn clear_timeline(&mut self) -> usize {
        let removed = self.plan.entries.len();
        self.plan.entries.clear();
        if removed > 0 {
            self.push_log(LOG_PLAN_TIMELINE_CLEARED);
        }
        removed
    }

    /// Reset the whole plan: date, selections, and timeline.
    pub fn clear_plan(&mut self) {
        self.plan = Plan::default();
        self.push_log(LOG_PLAN_CLEARED);
    }

    /// Replace the timeline with the generated goraiko itinerary for the
    /// selected route and hut.
    ///
    /// Destructive: existing entries are discarded on success. The caller
    /// is expected to confirm with the user first. Aborts without touching
    /// the plan when no route/hut is selected or the hut is not on the
    /// route.
    pub fn generate_schedule(
        &mut self,
        catalog: &RouteCatalog,
        clock: &impl Clock,
    ) -> Result<usize, TeamError> {
        let route = self
            .plan
            .route
            .clone()
            .filter(|r| !r.is_empty())
            .ok_or(TeamError::SelectionRequired)?;
        let hut_name = self
            .plan
            .hut
            .clone()
            .filter(|h| !h.is_empty())
            .ok_or(TeamError::SelectionRequired)?;
        let hut = catalog
            .find_hut(&route, &hut_name)
            .ok_or_else(|| TeamError::HutNotFound {
                route: route.clone(),
                hut: hut_name.clone(),
            })?
            .clone();

        let items = goraiko_schedule(catalog, &route, &hut);
        self.plan.entries.clear();
        for (position, item) in items.into_iter().enumerate() {
            let id = self.next_id(clock);
            self.plan.entries.push(PlanEntry {
                id,
                time: item.time,
                activity: item.activity,
                order: Some(u32::try_from(position).unwrap_or(u32::MAX)),
            });
        }
        self.push_log(LOG_PLAN_GENERATED);
        Ok(self.plan.entries.len())
    }

    // ---- readiness --------------------------------------------------------

    /// Assemble the full readiness bundle for one member.
    pub fn readiness_summary(
        &self,
        member_id: MemberId,
        gear_catalog: &GearCatalog,
        clock: &impl Clock,
    ) -> Result<ReadinessSummary, TeamError> {
        let member = self
            .members
            .get(&member_id)
            .ok_or(TeamError::MemberNotFound { id: member_id })?;
        let now_ms = clock.now_ms();

        let empty = GearChecklist::new();
        let checklist = self.gear_checklist.get(&member_id).unwrap_or(&empty);
        let safety = safety_score(self.member_health(member_id), now_ms);
        let gear = gear_score(checklist, gear_catalog);
        let experience = experience_score(member.experience_level, self.member_hiking(member_id));
        let critical_gear_missing = has_critical_gear_missing(checklist);
        let recent = has_recent_health(
            self.member_health(member_id),
            now_ms,
            RECENT_HEALTH_CHECK_HOURS,
        );
        let window_start = now_ms - HEALTH_RECORD_WINDOW_DAYS * MS_PER_DAY;
        let recent_record_count = self
            .member_health(member_id)
            .filter(|r| r.recorded_at >= window_start)
            .count();

        Ok(ReadinessSummary {
            member_id,
            name: member.name.clone(),
            safety_score: safety,
            gear_score: gear,
            experience,
            overall: overall_readiness(
                safety,
                gear,
                experience.score,
                critical_gear_missing,
                recent,
            ),
            recent_record_count,
            risk: risk_level(self.member_health(member_id), now_ms),
            critical_gear_missing,
            has_recent_health: recent,
        })
    }

    /// Readiness bundles for every member, in roster order.
    pub fn team_readiness(
        &self,
        gear_catalog: &GearCatalog,
        clock: &impl Clock,
    ) -> Vec<ReadinessSummary> {
        self.members
            .keys()
            .filter_map(|&id| self.readiness_summary(id, gear_catalog, clock).ok())
            .collect()
    }

    // ---- snapshots --------------------------------------------------------

    /// Produce the wire snapshot handed to the storage collaborator.
    #[must_use]
    pub fn snapshot(&self, clock: &impl Clock) -> TeamSnapshot {
        TeamSnapshot {
            team_name: self.team_name.clone(),
            members: self.members.values().cloned().collect(),
            health_records: self.health_records.values().cloned().collect(),
            gear_checklist: self.gear_checklist.clone(),
            hiking_records: self.hiking_records.values().cloned().collect(),
            mountains: self.mountains.values().cloned().collect(),
            plan: self.plan.clone(),
            last_saved: clock.now_ms(),
        }
    }

    /// Rebuild state from a loaded snapshot.
    ///
    /// Rehydration guarantees every member a checklist entry, drops
    /// records whose member no longer exists (weak references are skipped,
    /// not errors), and primes the id allocator past every loaded id.
    #[must_use]
    pub fn from_snapshot(snapshot: TeamSnapshot) -> Self {
        let mut state = Self::default();
        if !snapshot.team_name.trim().is_empty() {
            state.team_name = snapshot.team_name;
        }
        for member in snapshot.members {
            state.gear_checklist.entry(member.id).or_default();
            state.members.insert(member.id, member);
        }
        for (member_id, checklist) in snapshot.gear_checklist {
            if state.members.contains_key(&member_id) {
                state.gear_checklist.insert(member_id, checklist);
            }
        }
        for record in snapshot.health_records {
            if state.members.contains_key(&record.member_id) {
                state.health_records.insert(record.id, record);
            }
        }
        for record in snapshot.hiking_records {
            if state.members.contains_key(&record.member_id) {
                state.hiking_records.insert(record.id, record);
            }
        }
        for mountain in snapshot.mountains {
            state.mountains.insert(mountain.id, mountain);
        }
        state.plan = snapshot.plan;

        state.last_id = state
            .members
            .keys()
            .chain(state.health_records.keys())
            .chain(state.hiking_records.keys())
            .chain(state.mountains.keys())
            .copied()
            .chain(state.plan.entries.iter().map(|e| e.id))
            .max()
            .unwrap_or(0);
        state
    }
}
