use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::formatter::results_header;
use crate::domain::{
    AdvisorResult, DocumentBuilder, FdcId, FoodRecord, FoodSummary, ResponseFormatter,
    ResultLimits, SearchHit,
};
use crate::ports::in_ports::NutritionLookupPort;
use crate::ports::out_ports::{FoodRecordPort, VectorIndexPort};

/// Application service behind the `nutrition_lookup` tool
pub struct NutritionLookupService {
    food_index: Arc<dyn VectorIndexPort + Send + Sync>,
    food_store: Arc<dyn FoodRecordPort + Send + Sync>,
    document_builder: DocumentBuilder,
    formatter: ResponseFormatter,
    limits: ResultLimits,
}

impl NutritionLookupService {
    pub fn new(
        food_index: Arc<dyn VectorIndexPort + Send + Sync>,
        food_store: Arc<dyn FoodRecordPort + Send + Sync>,
        limits: ResultLimits,
        document_nutrient_cap: usize,
        display_nutrient_cap: usize,
    ) -> Self {
        Self {
            food_index,
            food_store,
            document_builder: DocumentBuilder::new(document_nutrient_cap),
            formatter: ResponseFormatter::new(display_nutrient_cap),
            limits,
        }
    }

    /// Full record for a hit, or a shell built from the hit's metadata when the store has none
    async fn resolve_record(&self, hit: &SearchHit) -> FoodRecord {
        match self.food_store.get_by_id(&hit.id).await {
            Ok(Some(record)) => return record,
            Ok(None) => debug!("No full record for FDC id {}", hit.id),
            Err(err) => warn!("Failed to load full record for FDC id {}: {}", hit.id, err),
        }

        FoodRecord {
            fdc_id: Some(FdcId::Text(hit.id.clone())),
            description: hit.metadata_value("description").map(str::to_string),
            food_class: hit.metadata_value("food_class").map(str::to_string),
            food_category: hit
                .metadata_value("category")
                .map(|category| json!({ "description": category })),
            food_nutrients: None,
        }
    }
}

#[async_trait]
impl NutritionLookupPort for NutritionLookupService {
    async fn lookup(&self, food_query: String, max_results: Option<i64>) -> AdvisorResult<String> {
        let limit = self.limits.clamp(max_results);
        let hits = self.food_index.query(&food_query, limit).await?;
        info!("Nutrition lookup '{}' returned {} hit(s)", food_query, hits.len());

        if hits.is_empty() {
            return Ok(format!(
                "No nutritional information found for '{}'. Try a different search term.",
                food_query
            ));
        }

        let mut parts = vec![results_header(hits.len(), &food_query)];
        for (position, hit) in hits.iter().enumerate() {
            let record = self.resolve_record(hit).await;
            parts.push(self.formatter.food_entry(position + 1, &record));
        }

        Ok(parts.join("\n\n"))
    }

    async fn food_summary(&self, fdc_id: String) -> AdvisorResult<Option<FoodSummary>> {
        let Some(record) = self.food_store.get_by_id(&fdc_id).await? else {
            return Ok(None);
        };

        Ok(Some(FoodSummary {
            fdc_id: record.id(),
            description: record.description().to_string(),
            category: record.category_description().to_string(),
            document: self.document_builder.food_text(&record),
            key_nutrients: self.formatter.key_nutrients(&record),
        }))
    }
}
