//! Plain-text exports of the summit plan and the gear checklists.
//!
//! The core only builds the strings; handing them to the user as files is
//! the host's job.
use std::fmt::Write as _;

use crate::gear::GearCatalog;
use crate::plan::timeline_durations;
use crate::state::TeamState;

const UNSET_LABEL: &str = "未設定";

/// Render the summit plan as shareable text. Entries appear in canonical
/// timeline order with their durations from the previous step.
#[must_use]
pub fn plan_export_text(state: &TeamState, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - 富士山登頂計画", state.team_name);
    let _ = writeln!(out, "作成日時: {generated_at}");
    out.push('\n');
    let _ = writeln!(
        out,
        "予定日: {}",
        state.plan.date.as_deref().unwrap_or(UNSET_LABEL)
    );
    let _ = writeln!(
        out,
        "山小屋: {}",
        state.plan.hut.as_deref().unwrap_or(UNSET_LABEL)
    );
    out.push('\n');
    let _ = writeln!(out, "スケジュール:");

    let sorted = state.plan.sorted_entries();
    if sorted.is_empty() {
        let _ = writeln!(out, "（未登録）");
    } else {
        let durations = timeline_durations(&sorted);
        for (entry, duration) in sorted.iter().zip(&durations) {
            if duration.is_empty() {
                let _ = writeln!(out, "{} - {}", entry.time, entry.activity);
            } else {
                let _ = writeln!(out, "{} - {} (+{})", entry.time, entry.activity, duration);
            }
        }
    }
    out
}

/// Render every member's gear checklist as shareable text, category by
/// category with item weights.
#[must_use]
pub fn gear_export_text(state: &TeamState, catalog: &GearCatalog, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - 装備チェックリスト", state.team_name);
    let _ = writeln!(out, "作成日時: {generated_at}");
    out.push('\n');

    for member in state.members.values() {
        let _ = writeln!(out, "■ {}", member.name);
        for category in &catalog.categories {
            out.push('\n');
            let _ = writeln!(out, "【{}】", category.name);
            for item in &category.items {
                let checked = state
                    .member_checklist(member.id)
                    .is_some_and(|c| c.get(&item.id).copied().unwrap_or(false));
                let mark = if checked { "✓" } else { "□" };
                let _ = writeln!(out, "{} {} ({}kg)", mark, item.name, item.weight_kg);
            }
        }
        out.push('\n');
        let _ = writeln!(out, "---");
    }
    out
}
