use goraiko_core::{
    AddMemberInput, AddMountainInput, ExperienceLevel, FixedClock, RecordHealthInput,
    RecordHikingInput, TeamError, TeamSnapshot, TeamState,
};

const NOW: i64 = 1_754_500_000_000;

fn clock() -> FixedClock {
    FixedClock::new(NOW, "2026-08-07")
}

fn add(state: &mut TeamState, name: &str, level: ExperienceLevel) -> i64 {
    state
        .add_member(
            AddMemberInput {
                name: name.to_string(),
                age: Some(31),
                experience_level: level,
            },
            &clock(),
        )
        .expect("member added")
}

fn populate(state: &mut TeamState, member_id: i64) {
    let clock = clock();
    state
        .record_health(
            RecordHealthInput {
                member_id,
                condition: 4,
                sleep_hours: Some(7.5),
                fatigue_level: 2,
            },
            &clock,
        )
        .expect("health recorded");
    state
        .record_hiking(
            RecordHikingInput {
                member_id,
                mountain_name: "北岳".to_string(),
                elevation_gain_m: 1700,
                distance_km: 14.5,
                ..RecordHikingInput::default()
            },
            &clock,
        )
        .expect("hike recorded");
    state
        .set_gear_item(member_id, "boots", true)
        .expect("gear set");
}

#[test]
fn deleting_a_member_removes_exactly_their_data() {
    let mut state = TeamState::default();
    let alice = add(&mut state, "山田太郎", ExperienceLevel::Advanced);
    let bob = add(&mut state, "佐藤花子", ExperienceLevel::Beginner);
    populate(&mut state, alice);
    populate(&mut state, bob);

    state.delete_member(alice).expect("delete succeeds");

    assert!(state.member(alice).is_none());
    assert_eq!(state.member_health(alice).count(), 0);
    assert_eq!(state.member_hiking(alice).count(), 0);
    assert!(state.member_checklist(alice).is_none());

    // The other member's data is untouched.
    let remaining = state.member(bob).expect("bob remains");
    assert_eq!(remaining.name, "佐藤花子");
    assert_eq!(state.member_health(bob).count(), 1);
    assert_eq!(state.member_hiking(bob).count(), 1);
    assert_eq!(
        state.member_checklist(bob).and_then(|c| c.get("boots")),
        Some(&true)
    );
}

#[test]
fn hiking_records_delete_independently_of_members() {
    let mut state = TeamState::default();
    let member = add(&mut state, "山田太郎", ExperienceLevel::Beginner);
    populate(&mut state, member);
    let record_id = state
        .member_hiking(member)
        .next()
        .expect("hike exists")
        .id;

    state.delete_hiking_record(record_id).expect("delete");
    assert_eq!(state.member_hiking(member).count(), 0);
    assert!(state.member(member).is_some());
    assert_eq!(
        state.delete_hiking_record(record_id),
        Err(TeamError::RecordNotFound { id: record_id })
    );
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut state = TeamState::default();
    state.rename_team("週末登山部").expect("rename");
    let member = add(&mut state, "山田太郎", ExperienceLevel::Intermediate);
    populate(&mut state, member);
    state
        .add_mountain(
            AddMountainInput {
                name: "八ヶ岳".to_string(),
                elevation_m: 2899,
                distance_km: 15.0,
            },
            &clock(),
        )
        .expect("mountain added");
    state.set_plan_route(Some("吉田ルート".to_string()));
    state.set_plan_hut(Some("八合目太子館".to_string()));
    state
        .add_plan_entry("10:00", "五合目集合", &clock())
        .expect("entry added");

    let snapshot = state.snapshot(&clock());
    let saved = serde_json::to_string(&snapshot).expect("serialize");
    let restored: TeamSnapshot = serde_json::from_str(&saved).expect("deserialize");

    let original_value = serde_json::to_value(&snapshot).expect("to value");
    let restored_value = serde_json::to_value(&restored).expect("to value");
    assert_eq!(original_value, restored_value, "round-trip mismatch");

    // Rehydrating the restored snapshot reproduces the same state.
    let rebuilt = TeamState::from_snapshot(restored);
    assert_eq!(rebuilt.snapshot(&clock()), state.snapshot(&clock()));
}

#[test]
fn rehydration_tolerates_orphaned_records() {
    let mut state = TeamState::default();
    let member = add(&mut state, "山田太郎", ExperienceLevel::Beginner);
    populate(&mut state, member);

    let mut snapshot = state.snapshot(&clock());
    // Simulate a snapshot written by a buggy or older host: records whose
    // member was deleted out of band.
    snapshot.members.clear();
    snapshot.gear_checklist.clear();

    let rebuilt = TeamState::from_snapshot(snapshot);
    assert!(rebuilt.members.is_empty());
    assert!(rebuilt.health_records.is_empty());
    assert!(rebuilt.hiking_records.is_empty());
}

#[test]
fn ids_stay_monotonic_after_rehydration() {
    let mut state = TeamState::default();
    let first = add(&mut state, "山田太郎", ExperienceLevel::Beginner);

    let mut rebuilt = TeamState::from_snapshot(state.snapshot(&clock()));
    // A clock that lags the loaded ids must not mint a duplicate.
    let stale_clock = FixedClock::new(NOW - 1_000_000, "2026-08-07");
    let second = rebuilt
        .add_member(
            AddMemberInput {
                name: "佐藤花子".to_string(),
                ..AddMemberInput::default()
            },
            &stale_clock,
        )
        .expect("member added");
    assert!(second > first);
}
