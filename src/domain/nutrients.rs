use std::collections::HashSet;

use crate::domain::model::{RankedNutrient, RawNutrient};

/// Nutrients surfaced first in indexed documents, in this order
pub const INDEX_PRIORITY_NUTRIENTS: &[&str] = &[
    "Energy",
    "Protein",
    "Total lipid (fat)",
    "Carbohydrate, by difference",
    "Fiber, total dietary",
    "Calcium",
    "Iron",
    "Vitamin C",
    "Vitamin A",
    "Sodium",
    "Sugars, total including NLEA",
];

/// Canonical USDA name to chat label, in display order.
///
/// Kept separate from [`INDEX_PRIORITY_NUTRIENTS`]: the two tables decide different things
/// (search relevance vs. what a user sees) and their names intentionally differ.
pub const DISPLAY_NAME_MAP: &[(&str, &str)] = &[
    ("Energy", "Calories"),
    ("Protein", "Protein"),
    ("Total lipid (fat)", "Fat"),
    ("Carbohydrate, by difference", "Carbs"),
    ("Fiber, total dietary", "Fiber"),
    ("Calcium, Ca", "Calcium"),
    ("Iron, Fe", "Iron"),
    ("Vitamin C, total ascorbic acid", "Vitamin C"),
    ("Sodium, Na", "Sodium"),
    ("Sugars, total including NLEA", "Sugars"),
];

pub const DOCUMENT_NUTRIENT_CAP: usize = 15;
pub const DISPLAY_NUTRIENT_CAP: usize = 8;

/// Unique nutrients of one record, in encounter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedNutrients {
    entries: Vec<RankedNutrient>,
}

impl NormalizedNutrients {
    pub fn get(&self, name: &str) -> Option<&RankedNutrient> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedNutrient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten raw nutrients into a name-keyed set.
///
/// Unnamed entries and null or zero amounts are dropped. When a name repeats, the first
/// occurrence wins and later ones are ignored.
pub fn normalize_nutrients(raw: &[RawNutrient]) -> NormalizedNutrients {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for nutrient in raw {
        let Some(name) = nutrient.name() else {
            continue;
        };
        let Some(amount) = nutrient.amount() else {
            continue;
        };
        if amount.as_f64() == Some(0.0) {
            continue;
        }
        if !seen.insert(name) {
            continue;
        }

        entries.push(RankedNutrient {
            name: name.to_string(),
            amount: amount.clone(),
            unit: nutrient.unit().trim().to_string(),
        });
    }

    NormalizedNutrients { entries }
}

/// Order nutrients by `priority`, then append the rest in encounter order.
///
/// Priority matches are always emitted; `cap` only limits how far the non-priority tail fills.
pub fn rank_nutrients(
    nutrients: &NormalizedNutrients,
    priority: &[&str],
    cap: usize,
) -> Vec<RankedNutrient> {
    let mut ranked: Vec<RankedNutrient> = priority
        .iter()
        .filter_map(|name| nutrients.get(name))
        .cloned()
        .collect();

    let remaining = cap.saturating_sub(ranked.len());
    ranked.extend(
        nutrients
            .iter()
            .filter(|entry| !priority.contains(&entry.name.as_str()))
            .take(remaining)
            .cloned(),
    );

    ranked
}

pub fn join_nutrients(nutrients: &[RankedNutrient]) -> String {
    nutrients
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
