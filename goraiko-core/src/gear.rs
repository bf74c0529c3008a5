//! Equipment catalog, per-member checklists, and the gear readiness score.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CRITICAL_GEAR_CAP, CRITICAL_GEAR_IDS, ESSENTIAL_GEAR_WEIGHT, RECOMMENDED_GEAR_WEIGHT,
    SEASONAL_GEAR_WEIGHT,
};
use crate::numbers;

const DEFAULT_GEAR_DATA: &str = include_str!("../assets/data/gear.json");

/// Per-member checklist: gear item id to checked state. An absent key means
/// unchecked.
pub type GearChecklist = BTreeMap<String, bool>;

/// The three fixed equipment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GearCategoryId {
    #[default]
    Essential,
    Recommended,
    Seasonal,
}

impl GearCategoryId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Recommended => "recommended",
            Self::Seasonal => "seasonal",
        }
    }

    /// Weight of this category in the gear score.
    #[must_use]
    pub const fn score_weight(self) -> f64 {
        match self {
            Self::Essential => ESSENTIAL_GEAR_WEIGHT,
            Self::Recommended => RECOMMENDED_GEAR_WEIGHT,
            Self::Seasonal => SEASONAL_GEAR_WEIGHT,
        }
    }
}

impl std::fmt::Display for GearCategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single item in the equipment catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GearItem {
    pub id: String,
    pub name: String,
    pub weight_kg: f64,
}

/// One equipment category and its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GearCategory {
    pub id: GearCategoryId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<GearItem>,
}

/// The static equipment catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GearCatalog {
    #[serde(default)]
    pub categories: Vec<GearCategory>,
}

impl GearCatalog {
    /// Load the catalog embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_GEAR_DATA).unwrap_or_default()
    }

    /// Default catalog used by the scorers.
    #[must_use]
    pub fn default_catalog() -> Self {
        Self::load_from_static()
    }

    /// Look up a category.
    #[must_use]
    pub fn category(&self, id: GearCategoryId) -> Option<&GearCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Total number of items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Every item across all categories, in catalog order.
    pub fn items(&self) -> impl Iterator<Item = &GearItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

fn is_checked(checklist: &GearChecklist, item_id: &str) -> bool {
    checklist.get(item_id).copied().unwrap_or(false)
}

/// Whether any critical item (boots, rain wear, headlamp) is unchecked.
#[must_use]
pub fn has_critical_gear_missing(checklist: &GearChecklist) -> bool {
    CRITICAL_GEAR_IDS.iter().any(|id| !is_checked(checklist, id))
}

/// Gear readiness score, 0..=100.
///
/// Each category contributes its completion ratio scaled by the category
/// weight; a missing critical item caps the result at 40 regardless of the
/// weighted sum.
#[must_use]
pub fn gear_score(checklist: &GearChecklist, catalog: &GearCatalog) -> i32 {
    let mut weighted = 0.0;
    for category in &catalog.categories {
        if category.items.is_empty() {
            continue;
        }
        let checked = category
            .items
            .iter()
            .filter(|item| is_checked(checklist, &item.id))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = checked as f64 / category.items.len() as f64;
        weighted += ratio * category.id.score_weight() * 100.0;
    }

    let mut score = numbers::round_f64_to_i32(weighted);
    if has_critical_gear_missing(checklist) {
        score = score.min(CRITICAL_GEAR_CAP);
    }
    score
}

/// Completion of a single category for one member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub checked: usize,
    pub total: usize,
    /// Rounded completion percentage.
    pub percent: i32,
    pub checked_weight_kg: f64,
}

/// Completion of the whole kit for one member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KitSummary {
    pub checked: usize,
    pub total: usize,
    /// Unrounded completion percentage; the host formats it.
    pub percent: f64,
    pub total_weight_kg: f64,
}

/// Progress within one category: checked count, rounded percentage, and
/// carried weight.
#[must_use]
pub fn category_progress(checklist: &GearChecklist, category: &GearCategory) -> CategoryProgress {
    let checked_items: Vec<&GearItem> = category
        .items
        .iter()
        .filter(|item| is_checked(checklist, &item.id))
        .collect();
    let total = category.items.len();
    #[allow(clippy::cast_precision_loss)]
    let percent = if total == 0 {
        0
    } else {
        numbers::round_f64_to_i32(checked_items.len() as f64 / total as f64 * 100.0)
    };
    CategoryProgress {
        checked: checked_items.len(),
        total,
        percent,
        checked_weight_kg: checked_items.iter().map(|item| item.weight_kg).sum(),
    }
}

/// Whole-kit progress across every category.
#[must_use]
pub fn kit_summary(checklist: &GearChecklist, catalog: &GearCatalog) -> KitSummary {
    let total = catalog.item_count();
    let mut checked = 0;
    let mut weight = 0.0;
    for item in catalog.items() {
        if is_checked(checklist, &item.id) {
            checked += 1;
            weight += item.weight_kg;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = if total == 0 {
        0.0
    } else {
        checked as f64 / total as f64 * 100.0
    };
    KitSummary {
        checked,
        total,
        percent,
        total_weight_kg: weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_checklist(catalog: &GearCatalog) -> GearChecklist {
        catalog.items().map(|item| (item.id.clone(), true)).collect()
    }

    #[test]
    fn catalog_has_expected_shape() {
        let catalog = GearCatalog::default_catalog();
        assert_eq!(catalog.categories.len(), 3);
        assert_eq!(
            catalog.category(GearCategoryId::Essential).unwrap().items.len(),
            9
        );
        assert_eq!(
            catalog
                .category(GearCategoryId::Recommended)
                .unwrap()
                .items
                .len(),
            4
        );
        assert_eq!(
            catalog.category(GearCategoryId::Seasonal).unwrap().items.len(),
            2
        );
    }

    #[test]
    fn complete_kit_scores_one_hundred() {
        let catalog = GearCatalog::default_catalog();
        let checklist = full_checklist(&catalog);
        assert_eq!(gear_score(&checklist, &catalog), 100);
        assert!(!has_critical_gear_missing(&checklist));
    }

    #[test]
    fn missing_headlamp_caps_score_at_forty() {
        let catalog = GearCatalog::default_catalog();
        let mut checklist = full_checklist(&catalog);
        checklist.insert("headlamp".to_string(), false);
        assert!(has_critical_gear_missing(&checklist));
        assert!(gear_score(&checklist, &catalog) <= 40);
    }

    #[test]
    fn empty_checklist_scores_zero() {
        let catalog = GearCatalog::default_catalog();
        let checklist = GearChecklist::new();
        assert_eq!(gear_score(&checklist, &catalog), 0);
    }

    #[test]
    fn essentials_only_reflects_category_weighting() {
        let catalog = GearCatalog::default_catalog();
        let mut checklist = GearChecklist::new();
        for item in &catalog.category(GearCategoryId::Essential).unwrap().items {
            checklist.insert(item.id.clone(), true);
        }
        // All essentials and nothing else: the essential weight alone.
        assert_eq!(gear_score(&checklist, &catalog), 70);
    }

    #[test]
    fn summaries_count_weight_and_completion() {
        let catalog = GearCatalog::default_catalog();
        let mut checklist = GearChecklist::new();
        checklist.insert("boots".to_string(), true);
        checklist.insert("water".to_string(), true);

        let essential = catalog.category(GearCategoryId::Essential).unwrap();
        let progress = category_progress(&checklist, essential);
        assert_eq!(progress.checked, 2);
        assert_eq!(progress.total, 9);
        assert_eq!(progress.percent, 22);
        assert!((progress.checked_weight_kg - 3.2).abs() < 1e-9);

        let summary = kit_summary(&checklist, &catalog);
        assert_eq!(summary.checked, 2);
        assert_eq!(summary.total, 15);
        assert!((summary.total_weight_kg - 3.2).abs() < 1e-9);
    }
}
