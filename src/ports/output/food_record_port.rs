use crate::domain::{AdvisorResult, FoodRecord};
use async_trait::async_trait;

/// Output port for loading full food records on demand
#[async_trait]
pub trait FoodRecordPort {
    /// Unknown ids resolve to `None`, not an error
    async fn get_by_id(&self, fdc_id: &str) -> AdvisorResult<Option<FoodRecord>>;
}
