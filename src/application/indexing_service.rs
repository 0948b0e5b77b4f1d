use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    AdvisorResult, DietaryDatasets, DocumentBuilder, FoodRecord, Gender, IndexReport, IndexStats,
    IndexedDocument,
};
use crate::ports::in_ports::IndexingPort;
use crate::ports::out_ports::VectorIndexPort;

/// Application service that turns source records into indexed documents
pub struct IndexingService {
    food_index: Arc<dyn VectorIndexPort + Send + Sync>,
    dietary_index: Arc<dyn VectorIndexPort + Send + Sync>,
    document_builder: DocumentBuilder,
}

impl IndexingService {
    pub fn new(
        food_index: Arc<dyn VectorIndexPort + Send + Sync>,
        dietary_index: Arc<dyn VectorIndexPort + Send + Sync>,
        document_nutrient_cap: usize,
    ) -> Self {
        Self {
            food_index,
            dietary_index,
            document_builder: DocumentBuilder::new(document_nutrient_cap),
        }
    }

    /// Keep or clear existing data; returns a report when the run should stop here
    async fn prepare(
        index: &(dyn VectorIndexPort + Send + Sync),
        name: &str,
        reindex: bool,
    ) -> AdvisorResult<Option<IndexReport>> {
        let existing = index.count().await?;
        if existing == 0 {
            return Ok(None);
        }

        if !reindex {
            info!(
                "{} index already has {} document(s), skipping",
                name, existing
            );
            return Ok(Some(IndexReport {
                indexed: 0,
                skipped: true,
                total: existing,
            }));
        }

        info!("Clearing {} existing {} document(s)", existing, name);
        index.clear().await?;
        Ok(None)
    }

    async fn add(
        index: &(dyn VectorIndexPort + Send + Sync),
        name: &str,
        documents: Vec<IndexedDocument>,
    ) -> AdvisorResult<IndexReport> {
        let indexed = index.add_documents(documents).await?;
        let total = index.count().await?;
        info!("Indexed {} {} document(s), {} total", indexed, name, total);

        Ok(IndexReport {
            indexed,
            skipped: false,
            total,
        })
    }
}

#[async_trait]
impl IndexingPort for IndexingService {
    async fn index_foods(&self, records: &[FoodRecord], reindex: bool) -> AdvisorResult<IndexReport> {
        if let Some(report) = Self::prepare(self.food_index.as_ref(), "food", reindex).await? {
            return Ok(report);
        }

        info!("Building documents for {} food item(s)", records.len());
        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let document = self.document_builder.food_document(record);
            if document.id.is_empty() {
                warn!("Skipping food without an FDC id: {}", record.description());
                continue;
            }
            if !seen.insert(document.id.clone()) {
                warn!("Skipping duplicate FDC id {}", document.id);
                continue;
            }
            documents.push(document);
        }

        Self::add(self.food_index.as_ref(), "food", documents).await
    }

    async fn index_dietary(
        &self,
        datasets: &DietaryDatasets,
        reindex: bool,
    ) -> AdvisorResult<IndexReport> {
        if let Some(report) = Self::prepare(self.dietary_index.as_ref(), "dietary", reindex).await? {
            return Ok(report);
        }

        let age_groups = datasets.age_groups();
        info!(
            "Building dietary documents for {} age group(s) x {} genders",
            age_groups.len(),
            Gender::ALL.len()
        );

        let documents: Vec<IndexedDocument> = age_groups
            .iter()
            .flat_map(|age_group| {
                Gender::ALL
                    .into_iter()
                    .filter_map(move |gender| datasets.requirements_for(age_group, gender))
            })
            .map(|requirements| {
                self.document_builder.dietary_document(
                    &requirements.age_group,
                    requirements.gender,
                    &requirements.minerals,
                    &requirements.vitamins,
                    &requirements.nutrition,
                )
            })
            .collect();

        Self::add(self.dietary_index.as_ref(), "dietary", documents).await
    }

    async fn stats(&self) -> AdvisorResult<IndexStats> {
        Ok(IndexStats {
            foods: self.food_index.count().await?,
            dietary: self.dietary_index.count().await?,
        })
    }
}
