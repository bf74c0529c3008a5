//! The summit plan: selections plus an ordered activity timeline.
use serde::{Deserialize, Serialize};

use crate::time_of_day::duration_text;

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: i64,
    /// Clock time as `"HH:MM"`.
    pub time: String,
    pub activity: String,
    /// Canonical display position. Generated entries always carry one;
    /// entries from older snapshots may not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// The team's summit plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    /// Entries in canonical display order.
    ///
    /// When every entry carries an `order` the sort uses it; otherwise the
    /// sort falls back to lexicographic time comparison, which is
    /// chronological only within a single day. Wraparound entries (an
    /// 01:00 wake-up after a 19:00 bedtime) rely on `order` to display
    /// correctly.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<&PlanEntry> {
        let mut sorted: Vec<&PlanEntry> = self.entries.iter().collect();
        if sorted.iter().all(|e| e.order.is_some()) {
            sorted.sort_by_key(|e| e.order);
        } else {
            sorted.sort_by(|a, b| a.time.cmp(&b.time));
        }
        sorted
    }

    /// The position a newly appended entry should take.
    #[must_use]
    pub fn next_order(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.order.unwrap_or(0))
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Whether both a route and a hut have been selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.route.as_deref().is_some_and(|r| !r.is_empty())
            && self.hut.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Display duration between each consecutive pair of sorted entries, the
/// way the timeline renders `+2時間30分` connectors. The first entry gets
/// an empty string, as does any pair whose times fail to parse.
#[must_use]
pub fn timeline_durations(sorted: &[&PlanEntry]) -> Vec<String> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == 0 {
                String::new()
            } else {
                duration_text(&sorted[i - 1].time, &entry.time)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, time: &str, order: Option<u32>) -> PlanEntry {
        PlanEntry {
            id,
            time: time.to_string(),
            activity: format!("activity-{id}"),
            order,
        }
    }

    #[test]
    fn fully_ordered_entries_sort_by_order() {
        let plan = Plan {
            entries: vec![
                entry(1, "19:00", Some(0)),
                entry(2, "01:00", Some(1)),
                entry(3, "05:00", Some(2)),
            ],
            ..Plan::default()
        };
        let ids: Vec<i64> = plan.sorted_entries().iter().map(|e| e.id).collect();
        // The 01:00 wake-up stays after the 19:00 bedtime.
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn any_orderless_entry_falls_back_to_time_sort() {
        let plan = Plan {
            entries: vec![
                entry(1, "19:00", Some(0)),
                entry(2, "01:00", None),
                entry(3, "05:00", Some(2)),
            ],
            ..Plan::default()
        };
        let ids: Vec<i64> = plan.sorted_entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn next_order_extends_the_maximum() {
        let mut plan = Plan::default();
        assert_eq!(plan.next_order(), 0);
        plan.entries.push(entry(1, "10:00", Some(4)));
        plan.entries.push(entry(2, "11:00", None));
        assert_eq!(plan.next_order(), 5);
    }

    #[test]
    fn selection_requires_both_route_and_hut() {
        let mut plan = Plan::default();
        assert!(!plan.has_selection());
        plan.route = Some("吉田ルート".to_string());
        assert!(!plan.has_selection());
        plan.hut = Some("本八合目トモエ館".to_string());
        assert!(plan.has_selection());
    }

    #[test]
    fn durations_connect_consecutive_entries() {
        let plan = Plan {
            entries: vec![
                entry(1, "10:00", Some(0)),
                entry(2, "12:30", Some(1)),
                entry(3, "12:30", Some(2)),
            ],
            ..Plan::default()
        };
        let sorted = plan.sorted_entries();
        let durations = timeline_durations(&sorted);
        assert_eq!(durations, ["", "2時間30分", ""]);
    }
}
