use crate::domain::{AdvisorResult, FoodSummary};
use async_trait::async_trait;

/// Input port for the food nutrition lookup tool
#[async_trait]
pub trait NutritionLookupPort {
    /// Semantic search over indexed foods, rendered for chat.
    /// `max_results` is clamped into the configured bounds.
    async fn lookup(&self, food_query: String, max_results: Option<i64>) -> AdvisorResult<String>;

    /// Summary of a single food by FDC id, `None` when the id is unknown
    async fn food_summary(&self, fdc_id: String) -> AdvisorResult<Option<FoodSummary>>;
}
