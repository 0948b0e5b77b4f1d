use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::{AdvisorError, AdvisorResult, FoodDataset, FoodRecord};
use crate::ports::out_ports::FoodRecordPort;

/// Read the `FoundationFoods` array from a USDA FoodData Central JSON export
pub async fn load_food_records(path: &Path) -> AdvisorResult<Vec<FoodRecord>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let dataset: FoodDataset = serde_json::from_str(&raw).map_err(|e| {
        AdvisorError::SerializationError(format!("{}: {}", path.display(), e))
    })?;

    let total = dataset.foundation_foods.len();
    let records: Vec<FoodRecord> = dataset
        .foundation_foods
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match FoodRecord::from_value(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping food entry {} in {}: {}", position, path.display(), err);
                None
            }
        })
        .collect();

    info!(
        "Loaded {} of {} food record(s) from {}",
        records.len(),
        total,
        path.display()
    );
    Ok(records)
}

/// Full food records keyed by FDC id, read from the export on first lookup
pub struct JsonFoodStore {
    path: Option<PathBuf>,
    records: OnceCell<HashMap<String, FoodRecord>>,
}

impl JsonFoodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            records: OnceCell::new(),
        }
    }

    /// Store backed by records already in memory
    pub fn from_records(records: Vec<FoodRecord>) -> Self {
        Self {
            path: None,
            records: OnceCell::from(key_by_id(records)),
        }
    }

    async fn records(&self) -> AdvisorResult<&HashMap<String, FoodRecord>> {
        self.records
            .get_or_try_init(|| async {
                match &self.path {
                    Some(path) => Ok(key_by_id(load_food_records(path).await?)),
                    None => Ok(HashMap::new()),
                }
            })
            .await
    }
}

fn key_by_id(records: Vec<FoodRecord>) -> HashMap<String, FoodRecord> {
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if !id.is_empty() {
            by_id.entry(id).or_insert(record);
        }
    }
    by_id
}

#[async_trait]
impl FoodRecordPort for JsonFoodStore {
    async fn get_by_id(&self, fdc_id: &str) -> AdvisorResult<Option<FoodRecord>> {
        let record = self.records().await?.get(fdc_id).cloned();
        if record.is_none() {
            debug!("No full record for food {}", fdc_id);
        }
        Ok(record)
    }
}
