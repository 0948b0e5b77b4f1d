use crate::domain::{AdvisorResult, DietaryQuery, DietaryRequirements, Gender};
use async_trait::async_trait;

/// Input port for the dietary requirements lookup tool
#[async_trait]
pub trait DietaryRequirementsPort {
    /// Exact match when age and gender are known, semantic search otherwise
    async fn lookup(&self, query: DietaryQuery) -> AdvisorResult<String>;

    /// Requirements for the band containing `age`
    async fn requirements_for_age(
        &self,
        age: i64,
        gender: Gender,
    ) -> AdvisorResult<Option<DietaryRequirements>>;
}
