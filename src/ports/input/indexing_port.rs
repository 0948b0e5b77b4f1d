use crate::domain::{AdvisorResult, DietaryDatasets, FoodRecord, IndexReport, IndexStats};
use async_trait::async_trait;

/// Input port for loading source data into the vector indexes
#[async_trait]
pub trait IndexingPort {
    /// Build and index food documents. Existing data is kept unless `reindex` is set.
    async fn index_foods(&self, records: &[FoodRecord], reindex: bool) -> AdvisorResult<IndexReport>;

    /// Build and index one document per age group and gender
    async fn index_dietary(
        &self,
        datasets: &DietaryDatasets,
        reindex: bool,
    ) -> AdvisorResult<IndexReport>;

    /// Document counts for both indexes
    async fn stats(&self) -> AdvisorResult<IndexStats>;
}
