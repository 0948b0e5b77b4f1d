use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::{AdvisorError, AdvisorResult, DietaryDatasets, DietaryRequirements, Gender};
use crate::ports::out_ports::RequirementsStorePort;

/// Locations of the three UK dietary reference tables
#[derive(Debug, Clone)]
pub struct DietaryDataPaths {
    pub minerals: PathBuf,
    pub vitamins: PathBuf,
    pub nutrition: PathBuf,
}

impl DietaryDataPaths {
    pub fn all_exist(&self) -> bool {
        [&self.minerals, &self.vitamins, &self.nutrition]
            .iter()
            .all(|path| path.exists())
    }
}

async fn load_table(path: &Path) -> AdvisorResult<Map<String, Value>> {
    let raw = tokio::fs::read_to_string(path).await?;
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(table) => Ok(table),
        _ => Err(AdvisorError::ValidationError(format!(
            "{} must contain a JSON object keyed by age group",
            path.display()
        ))),
    }
}

/// Read all three tables concurrently
pub async fn load_dietary_datasets(paths: &DietaryDataPaths) -> AdvisorResult<DietaryDatasets> {
    let (minerals, vitamins, nutrition) = futures::try_join!(
        load_table(&paths.minerals),
        load_table(&paths.vitamins),
        load_table(&paths.nutrition),
    )?;

    let datasets = DietaryDatasets {
        minerals,
        vitamins,
        nutrition,
    };
    info!("Loaded dietary tables for {} age group(s)", datasets.age_groups().len());
    Ok(datasets)
}

/// Merged requirement tables, read on first lookup
pub struct JsonRequirementsStore {
    paths: Option<DietaryDataPaths>,
    datasets: OnceCell<DietaryDatasets>,
}

impl JsonRequirementsStore {
    pub fn new(paths: DietaryDataPaths) -> Self {
        Self {
            paths: Some(paths),
            datasets: OnceCell::new(),
        }
    }

    pub fn from_datasets(datasets: DietaryDatasets) -> Self {
        Self {
            paths: None,
            datasets: OnceCell::from(datasets),
        }
    }

    async fn datasets(&self) -> AdvisorResult<&DietaryDatasets> {
        self.datasets
            .get_or_try_init(|| async {
                match &self.paths {
                    Some(paths) => load_dietary_datasets(paths).await,
                    None => Ok(DietaryDatasets::default()),
                }
            })
            .await
    }
}

#[async_trait]
impl RequirementsStorePort for JsonRequirementsStore {
    async fn get_requirements(
        &self,
        age_group: &str,
        gender: Gender,
    ) -> AdvisorResult<Option<DietaryRequirements>> {
        Ok(self.datasets().await?.requirements_for(age_group, gender))
    }
}
