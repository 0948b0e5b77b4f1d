use serde_json::{Map, Value};

use crate::domain::model::{DocumentMetadata, FoodRecord, Gender, IndexedDocument};
use crate::domain::nutrients::{
    join_nutrients, normalize_nutrients, rank_nutrients, DOCUMENT_NUTRIENT_CAP,
    INDEX_PRIORITY_NUTRIENTS,
};

pub const DIETARY_DATASET_TYPE: &str = "unified_dietary_requirements";

/// Builds the text that gets embedded for each food.
///
/// The output must stay byte-stable: stored vectors are computed from it.
pub struct DocumentBuilder {
    nutrient_cap: usize,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(DOCUMENT_NUTRIENT_CAP)
    }
}

impl DocumentBuilder {
    pub fn new(nutrient_cap: usize) -> Self {
        Self { nutrient_cap }
    }

    pub fn food_text(&self, record: &FoodRecord) -> String {
        let nutrients = normalize_nutrients(record.nutrients());
        let ranked = rank_nutrients(&nutrients, INDEX_PRIORITY_NUTRIENTS, self.nutrient_cap);

        let text = format!(
            "Food: {}\nCategory: {}\nFood Class: {}\nFDC ID: {}\nNutrients: {}",
            record.description().trim(),
            record.category_description().trim(),
            record.food_class().trim(),
            record.id().trim(),
            join_nutrients(&ranked).trim(),
        );
        text.trim().to_string()
    }

    /// Index entry for a food. The full record stays out of the metadata and is loaded by id.
    pub fn food_document(&self, record: &FoodRecord) -> IndexedDocument {
        let id = record.id();

        let mut metadata = DocumentMetadata::new();
        metadata.insert("fdc_id".to_string(), id.clone());
        metadata.insert("description".to_string(), record.description().to_string());
        metadata.insert("food_class".to_string(), record.food_class().to_string());
        metadata.insert(
            "category".to_string(),
            record.category_description().to_string(),
        );

        IndexedDocument {
            id,
            text: self.food_text(record),
            metadata,
        }
    }

    /// Index entry combining minerals, vitamins and macronutrients for one age group and gender
    pub fn dietary_document(
        &self,
        age_group: &str,
        gender: Gender,
        minerals: &Map<String, Value>,
        vitamins: &Map<String, Value>,
        nutrition: &Map<String, Value>,
    ) -> IndexedDocument {
        let text = format!(
            "Age group: {}\nGender: {}\n\nMinerals: {}\n\nVitamins: {}\n\nNutrition (Macronutrients): {}",
            age_group,
            gender,
            requirement_section(minerals),
            requirement_section(vitamins),
            requirement_section(nutrition),
        );

        let mut metadata = DocumentMetadata::new();
        metadata.insert("age_group".to_string(), age_group.to_string());
        metadata.insert("gender".to_string(), gender.to_string());
        metadata.insert("dataset_type".to_string(), DIETARY_DATASET_TYPE.to_string());

        IndexedDocument {
            id: dietary_document_id(age_group, gender),
            text: text.trim().to_string(),
            metadata,
        }
    }
}

pub fn dietary_document_id(age_group: &str, gender: Gender) -> String {
    format!("dietary_{}_{}", age_group, gender)
}

fn requirement_section(values: &Map<String, Value>) -> String {
    values
        .iter()
        .map(|(key, value)| {
            format!(
                "{}: {}",
                key.replace('_', " "),
                format_requirement_value(value, unit_from_key(key))
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unit suffix of a requirement key, e.g. `iron_mg` -> `mg`
pub fn unit_from_key(key: &str) -> &str {
    key.rsplit_once('_').map(|(_, unit)| unit).unwrap_or("")
}

/// Render a requirement value: ranges and notes verbatim, nested maps as `k: v` pairs
pub fn format_requirement_value(value: &Value, unit: &str) -> String {
    match value {
        Value::Null => "not specified".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(entries) => entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, scalar_text(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => format!("{} {}", scalar_text(other), unit).trim().to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hummus() -> FoodRecord {
        FoodRecord::from_value(json!({
            "fdcId": 321358,
            "description": "Hummus, commercial",
            "foodClass": "FinalFood",
            "foodCategory": {"description": "Legumes and Legume Products"},
            "foodNutrients": [
                {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 166},
                {"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 7.9},
                {"nutrient": {"name": "Cryptoxanthin beta", "unitName": "µg"}, "amount": 3.0}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_hummus_document() {
        let text = DocumentBuilder::default().food_text(&hummus());

        assert_eq!(
            text,
            "Food: Hummus, commercial\n\
             Category: Legumes and Legume Products\n\
             Food Class: FinalFood\n\
             FDC ID: 321358\n\
             Nutrients: Energy: 166 kcal, Protein: 7.9 g, Cryptoxanthin beta: 3.0 µg"
        );
    }

    #[test]
    fn test_document_is_byte_stable() {
        let builder = DocumentBuilder::default();
        let record = hummus();

        assert_eq!(builder.food_text(&record), builder.food_text(&record));
        assert_eq!(builder.food_document(&record), builder.food_document(&record));
    }

    #[test]
    fn test_priority_nutrients_reordered() {
        let record = FoodRecord::from_value(json!({
            "description": "Spinach, raw",
            "foodNutrients": [
                {"nutrient": {"name": "Iron", "unitName": "mg"}, "amount": 2.7},
                {"nutrient": {"name": "Folate, total", "unitName": "µg"}, "amount": 194},
                {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 23}
            ]
        }))
        .unwrap();

        let text = DocumentBuilder::default().food_text(&record);
        assert!(text.ends_with("Nutrients: Energy: 23 kcal, Iron: 2.7 mg, Folate, total: 194 µg"));
    }

    #[test]
    fn test_non_record_category_is_empty() {
        let record = FoodRecord::from_value(json!({
            "description": "  Apple  ",
            "foodCategory": ["Fruits"],
        }))
        .unwrap();

        let text = DocumentBuilder::default().food_text(&record);
        assert!(text.starts_with("Food: Apple\nCategory: \nFood Class: \nFDC ID: \n"));
        assert!(text.ends_with("Nutrients:"));
    }

    #[test]
    fn test_food_metadata_excludes_full_record() {
        let document = DocumentBuilder::default().food_document(&hummus());

        assert_eq!(document.id, "321358");
        assert_eq!(document.metadata["category"], "Legumes and Legume Products");
        assert_eq!(document.metadata["food_class"], "FinalFood");
        assert_eq!(document.metadata.len(), 4);
    }

    #[test]
    fn test_dietary_document() {
        let minerals = json!({"iron_mg": 14.8, "calcium_mg": 700})
            .as_object()
            .cloned()
            .unwrap();
        let vitamins = json!({"vitamin_d_ug": 10, "vitamin_a": null})
            .as_object()
            .cloned()
            .unwrap();
        let nutrition = json!({"fat_g": "no more than 78"})
            .as_object()
            .cloned()
            .unwrap();

        let document = DocumentBuilder::default().dietary_document(
            "19-64",
            Gender::Female,
            &minerals,
            &vitamins,
            &nutrition,
        );

        assert_eq!(document.id, "dietary_19-64_female");
        assert_eq!(
            document.text,
            "Age group: 19-64\nGender: female\n\n\
             Minerals: iron mg: 14.8 mg, calcium mg: 700 mg\n\n\
             Vitamins: vitamin d ug: 10 ug, vitamin a: not specified\n\n\
             Nutrition (Macronutrients): fat g: no more than 78"
        );
        assert_eq!(document.metadata["dataset_type"], DIETARY_DATASET_TYPE);
    }

    #[test]
    fn test_format_requirement_value() {
        assert_eq!(format_requirement_value(&json!(null), "mg"), "not specified");
        assert_eq!(format_requirement_value(&json!("3.0-5.0"), "mg"), "3.0-5.0");
        assert_eq!(format_requirement_value(&json!(8.7), "mg"), "8.7 mg");
        assert_eq!(format_requirement_value(&json!(15), ""), "15");
        assert_eq!(
            format_requirement_value(&json!({"menstruating": 14.8, "other": "8.7"}), "mg"),
            "menstruating: 14.8, other: 8.7"
        );
    }

    #[test]
    fn test_unit_from_key() {
        assert_eq!(unit_from_key("vitamin_b12_ug"), "ug");
        assert_eq!(unit_from_key("energy"), "");
    }
}
