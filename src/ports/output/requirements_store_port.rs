use crate::domain::{AdvisorResult, DietaryRequirements, Gender};
use async_trait::async_trait;

/// Output port for the merged dietary requirement tables
#[async_trait]
pub trait RequirementsStorePort {
    async fn get_requirements(
        &self,
        age_group: &str,
        gender: Gender,
    ) -> AdvisorResult<Option<DietaryRequirements>>;
}
