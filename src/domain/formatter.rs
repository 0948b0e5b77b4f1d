use serde_json::{Map, Value};

use crate::domain::document::{format_requirement_value, unit_from_key};
use crate::domain::model::{DietaryRequirements, FoodRecord, RankedNutrient};
use crate::domain::nutrients::{
    join_nutrients, normalize_nutrients, rank_nutrients, DISPLAY_NAME_MAP, DISPLAY_NUTRIENT_CAP,
};

/// Renders chat-facing summaries of foods and dietary requirements
pub struct ResponseFormatter {
    nutrient_cap: usize,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new(DISPLAY_NUTRIENT_CAP)
    }
}

impl ResponseFormatter {
    pub fn new(nutrient_cap: usize) -> Self {
        Self { nutrient_cap }
    }

    /// Nutrients for display: mapped names first with their short labels, then the rest,
    /// the whole list capped.
    pub fn key_nutrients(&self, record: &FoodRecord) -> Vec<RankedNutrient> {
        let nutrients = normalize_nutrients(record.nutrients());
        let canonical: Vec<&str> = DISPLAY_NAME_MAP.iter().map(|(name, _)| *name).collect();

        rank_nutrients(&nutrients, &canonical, self.nutrient_cap)
            .into_iter()
            .map(|mut nutrient| {
                if let Some((_, label)) = DISPLAY_NAME_MAP
                    .iter()
                    .find(|(name, _)| *name == nutrient.name)
                {
                    nutrient.name = label.to_string();
                }
                nutrient
            })
            .take(self.nutrient_cap)
            .collect()
    }

    /// One numbered search result
    pub fn food_entry(&self, rank: usize, record: &FoodRecord) -> String {
        let description = non_empty(record.description()).unwrap_or("Unknown");
        let category = non_empty(record.category_description()).unwrap_or("Unknown category");

        format!(
            "{}. {}\n   Category: {}\n   Key Nutrients: {}",
            rank,
            description,
            category,
            join_nutrients(&self.key_nutrients(record))
        )
    }

    /// Full report for an exact age group and gender match
    pub fn requirements_report(&self, age: i64, requirements: &DietaryRequirements) -> String {
        let mut lines = vec![format!(
            "Dietary Requirements for {}, Age {} (Age Group: {})\n",
            requirements.gender.capitalized(),
            age,
            requirements.age_group
        )];

        for (title, values) in [
            ("MINERALS:", &requirements.minerals),
            ("VITAMINS:", &requirements.vitamins),
            ("NUTRITION (Macronutrients):", &requirements.nutrition),
        ] {
            if values.is_empty() {
                continue;
            }
            lines.push(format!("\n{}", title));
            lines.extend(values.iter().map(|(key, value)| {
                format!(
                    "  - {}: {}",
                    title_case_key(key),
                    format_requirement_value(value, unit_from_key(key))
                )
            }));
        }

        lines.join("\n")
    }

    /// One numbered semantic-search result for the dietary lookup
    pub fn requirements_entry(
        &self,
        rank: usize,
        gender: &str,
        age_group: &str,
        requirements: Option<&DietaryRequirements>,
    ) -> String {
        let mut lines = vec![format!(
            "{}. {}, Age Group: {}",
            rank,
            capitalize(gender),
            age_group
        )];

        if let Some(requirements) = requirements {
            if !requirements.minerals.is_empty() {
                lines.push(format!("   Key Minerals: {}", leading_keys(&requirements.minerals)));
            }
            if !requirements.vitamins.is_empty() {
                lines.push(format!("   Key Vitamins: {}", leading_keys(&requirements.vitamins)));
            }
        }

        lines.join("\n")
    }
}

/// Header line shared by both lookup tools
pub fn results_header(count: usize, query: &str) -> String {
    format!("Found {} result(s) for '{}':", count, query)
}

fn leading_keys(values: &Map<String, Value>) -> String {
    values
        .keys()
        .take(3)
        .map(|key| title_case_key(key))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `vitamin_b12_ug` -> `Vitamin B12 Ug`
pub fn title_case_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
