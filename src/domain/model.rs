use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::error::{AdvisorError, AdvisorResult};

/// FoodData Central identifier; exports carry it as a number, some tools as a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FdcId {
    Number(u64),
    Text(String),
}

impl fmt::Display for FdcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FdcId::Number(n) => write!(f, "{}", n),
            FdcId::Text(s) => f.write_str(s),
        }
    }
}

/// Nested nutrient descriptor as found in `foodNutrients[].nutrient`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutrientInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(rename = "unitName", default, deserialize_with = "lenient_text")]
    pub unit_name: Option<String>,
}

/// A single nutrient measurement on a food
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNutrient {
    #[serde(default, deserialize_with = "lenient")]
    pub nutrient: Option<NutrientInfo>,

    /// Kept as raw JSON so a non-numeric amount degrades to "absent" instead of failing the record
    #[serde(default)]
    pub amount: Option<Value>,
}

impl RawNutrient {
    pub fn new(name: impl Into<String>, amount: Option<Number>, unit: impl Into<String>) -> Self {
        Self {
            nutrient: Some(NutrientInfo {
                name: Some(name.into()),
                unit_name: Some(unit.into()),
            }),
            amount: amount.map(Value::Number),
        }
    }

    /// Nutrient name, `None` when missing or empty
    pub fn name(&self) -> Option<&str> {
        self.nutrient
            .as_ref()
            .and_then(|n| n.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn unit(&self) -> &str {
        self.nutrient
            .as_ref()
            .and_then(|n| n.unit_name.as_deref())
            .unwrap_or("")
    }

    pub fn amount(&self) -> Option<&Number> {
        match &self.amount {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }
}

/// A food entry from the USDA FoodData Central export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "fdcId", default, deserialize_with = "lenient_fdc_id")]
    pub fdc_id: Option<FdcId>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    #[serde(rename = "foodClass", default, deserialize_with = "lenient_text")]
    pub food_class: Option<String>,

    /// Usually `{"description": ...}`, but any shape is tolerated
    #[serde(rename = "foodCategory", default)]
    pub food_category: Option<Value>,

    /// Entries that are not nutrient-shaped are dropped, the rest of the list is kept
    #[serde(rename = "foodNutrients", default, deserialize_with = "lenient_nutrients")]
    pub food_nutrients: Option<Vec<RawNutrient>>,
}

impl FoodRecord {
    /// Parse a record from raw JSON. A `null` or non-object value is a contract violation.
    pub fn from_value(value: Value) -> AdvisorResult<Self> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Null => Err(AdvisorError::InvalidRecord(
                "expected a food record, got null".to_string(),
            )),
            other => Err(AdvisorError::InvalidRecord(format!(
                "expected a food record object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The FDC id rendered as a string, empty when absent
    pub fn id(&self) -> String {
        self.fdc_id.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn food_class(&self) -> &str {
        self.food_class.as_deref().unwrap_or("")
    }

    /// Category description, empty unless the category is record-shaped with a string description
    pub fn category_description(&self) -> &str {
        match &self.food_category {
            Some(Value::Object(category)) => category
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or(""),
            _ => "",
        }
    }

    pub fn nutrients(&self) -> &[RawNutrient] {
        self.food_nutrients.as_deref().unwrap_or(&[])
    }
}

// Wrongly typed fields degrade instead of failing the whole record.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Strings as-is, numbers and booleans rendered as text, anything else absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_fdc_id<'de, D>(deserializer: D) -> Result<Option<FdcId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(match n.as_u64() {
            Some(id) => FdcId::Number(id),
            None => FdcId::Text(n.to_string()),
        }),
        Value::String(s) => Some(FdcId::Text(s)),
        _ => None,
    })
}

fn lenient_nutrients<'de, D>(deserializer: D) -> Result<Option<Vec<RawNutrient>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Top-level shape of the Foundation Foods export.
/// Entries stay raw so one bad entry can be skipped without losing the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodDataset {
    #[serde(rename = "FoundationFoods", default)]
    pub foundation_foods: Vec<Value>,
}

/// A nutrient after normalization and ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNutrient {
    pub name: String,
    pub amount: Number,
    pub unit: String,
}

impl fmt::Display for RankedNutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}: {}", self.name, self.amount)
        } else {
            write!(f, "{}: {} {}", self.name, self.amount, self.unit)
        }
    }
}

/// Flat string metadata stored next to an indexed document
pub type DocumentMetadata = BTreeMap<String, String>;

/// The unit handed to the vector index: stable text plus lightweight metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// A single nearest-neighbour result from the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,

    /// Smaller is closer
    pub distance: f32,
}

impl SearchHit {
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requirements for one age group and gender, merged from the three datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryRequirements {
    pub age_group: String,
    pub gender: Gender,
    pub minerals: Map<String, Value>,
    pub vitamins: Map<String, Value>,
    pub nutrition: Map<String, Value>,
}

impl DietaryRequirements {
    pub fn is_empty(&self) -> bool {
        self.minerals.is_empty() && self.vitamins.is_empty() && self.nutrition.is_empty()
    }
}

/// The three UK requirement tables, each shaped `{age_group: {gender: {key: value}}}`
#[derive(Debug, Clone, Default)]
pub struct DietaryDatasets {
    pub minerals: Map<String, Value>,
    pub vitamins: Map<String, Value>,
    pub nutrition: Map<String, Value>,
}

impl DietaryDatasets {
    /// Union of age groups across all three tables, sorted
    pub fn age_groups(&self) -> BTreeSet<String> {
        self.minerals
            .keys()
            .chain(self.vitamins.keys())
            .chain(self.nutrition.keys())
            .cloned()
            .collect()
    }

    /// Merge the three tables for one key; `None` when none of them has data
    pub fn requirements_for(&self, age_group: &str, gender: Gender) -> Option<DietaryRequirements> {
        let requirements = DietaryRequirements {
            age_group: age_group.to_string(),
            gender,
            minerals: lookup_table(&self.minerals, age_group, gender),
            vitamins: lookup_table(&self.vitamins, age_group, gender),
            nutrition: lookup_table(&self.nutrition, age_group, gender),
        };

        if requirements.is_empty() {
            None
        } else {
            Some(requirements)
        }
    }
}

fn lookup_table(table: &Map<String, Value>, age_group: &str, gender: Gender) -> Map<String, Value> {
    table
        .get(age_group)
        .and_then(|by_gender| by_gender.get(gender.as_str()))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Structured view of one food: the indexed text plus the display nutrients
#[derive(Debug, Clone, Serialize)]
pub struct FoodSummary {
    pub fdc_id: String,
    pub description: String,
    pub category: String,
    pub document: String,
    pub key_nutrients: Vec<RankedNutrient>,
}

/// Arguments of the dietary requirements tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietaryQuery {
    pub query: String,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub max_results: Option<i64>,
}

/// Outcome of one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    /// Documents added in this run
    pub indexed: usize,

    /// Set when existing data was kept and nothing was added
    pub skipped: bool,

    /// Documents in the index after the run
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub foods: usize,
    pub dietary: usize,
}

/// Bounds applied to a tool's `max_results` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub default: usize,
    pub max: usize,
}

impl ResultLimits {
    pub const NUTRITION: ResultLimits = ResultLimits { default: 5, max: 20 };
    pub const DIETARY: ResultLimits = ResultLimits { default: 5, max: 10 };

    /// Missing requests take the default; everything else is clamped into `1..=max`
    pub fn clamp(&self, requested: Option<i64>) -> usize {
        let max = self.max.max(1);
        match requested {
            None => self.default.clamp(1, max),
            Some(n) if n < 1 => 1,
            Some(n) => usize::try_from(n).map_or(max, |n| n.min(max)),
        }
    }
}
