use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::formatter::results_header;
use crate::domain::query::{extract_age, extract_gender};
use crate::domain::{
    AdvisorResult, AgeBand, DietaryQuery, DietaryRequirements, Gender, ResponseFormatter,
    ResultLimits, SearchHit,
};
use crate::ports::in_ports::DietaryRequirementsPort;
use crate::ports::out_ports::{RequirementsStorePort, VectorIndexPort};

/// Application service behind the `dietary_requirements` tool
pub struct DietaryRequirementsService {
    dietary_index: Arc<dyn VectorIndexPort + Send + Sync>,
    requirements_store: Arc<dyn RequirementsStorePort + Send + Sync>,
    formatter: ResponseFormatter,
    limits: ResultLimits,
}

impl DietaryRequirementsService {
    pub fn new(
        dietary_index: Arc<dyn VectorIndexPort + Send + Sync>,
        requirements_store: Arc<dyn RequirementsStorePort + Send + Sync>,
        limits: ResultLimits,
    ) -> Self {
        Self {
            dietary_index,
            requirements_store,
            formatter: ResponseFormatter::default(),
            limits,
        }
    }

    async fn format_hit(&self, rank: usize, hit: &SearchHit) -> String {
        let age_group = hit.metadata_value("age_group").unwrap_or("Unknown");
        let gender = hit.metadata_value("gender").unwrap_or("Unknown");

        let requirements = match Gender::parse(gender) {
            Some(parsed) => self
                .requirements_store
                .get_requirements(age_group, parsed)
                .await
                .unwrap_or_else(|err| {
                    warn!("Failed to load requirements for {} {}: {}", age_group, gender, err);
                    None
                }),
            None => None,
        };

        self.formatter
            .requirements_entry(rank, gender, age_group, requirements.as_ref())
    }
}

#[async_trait]
impl DietaryRequirementsPort for DietaryRequirementsService {
    async fn lookup(&self, query: DietaryQuery) -> AdvisorResult<String> {
        let limit = self.limits.clamp(query.max_results);

        let age = match query.age {
            Some(age) => {
                AgeBand::for_age(age)?;
                Some(age)
            }
            None => extract_age(&query.query),
        };
        let gender = query.gender.or_else(|| extract_gender(&query.query));

        if let (Some(age), Some(gender)) = (age, gender) {
            if let Some(requirements) = self.requirements_for_age(age, gender).await? {
                info!(
                    "Exact dietary match for {}, age {} ({})",
                    gender, age, requirements.age_group
                );
                return Ok(self.formatter.requirements_report(age, &requirements));
            }
        }

        let hits = self.dietary_index.query(&query.query, limit).await?;
        info!("Dietary lookup '{}' returned {} hit(s)", query.query, hits.len());

        if hits.is_empty() {
            return Ok(format!(
                "No dietary requirements found for '{}'. Try specifying age and gender \
                 (e.g., 'requirements for 30-year-old male').",
                query.query
            ));
        }

        let mut parts = vec![results_header(hits.len(), &query.query)];
        for (position, hit) in hits.iter().enumerate() {
            parts.push(self.format_hit(position + 1, hit).await);
        }

        Ok(parts.join("\n\n"))
    }

    async fn requirements_for_age(
        &self,
        age: i64,
        gender: Gender,
    ) -> AdvisorResult<Option<DietaryRequirements>> {
        let band = AgeBand::for_age(age)?;
        self.requirements_store
            .get_requirements(band.label(), gender)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdvisorError, DocumentMetadata, IndexedDocument};
    use mockall::mock;
    use mockall::predicate::*;
    use serde_json::{json, Map};

    mock! {
        DietaryIndex {}
        #[async_trait]
        impl VectorIndexPort for DietaryIndex {
            async fn add_documents(&self, documents: Vec<IndexedDocument>) -> AdvisorResult<usize>;
            async fn query(&self, query: &str, limit: usize) -> AdvisorResult<Vec<SearchHit>>;
            async fn count(&self) -> AdvisorResult<usize>;
            async fn clear(&self) -> AdvisorResult<()>;
        }
    }

    mock! {
        RequirementsStore {}
        #[async_trait]
        impl RequirementsStorePort for RequirementsStore {
            async fn get_requirements(&self, age_group: &str, gender: Gender) -> AdvisorResult<Option<DietaryRequirements>>;
        }
    }

    fn adult_male() -> DietaryRequirements {
        DietaryRequirements {
            age_group: "19-64".to_string(),
            gender: Gender::Male,
            minerals: json!({"iron_mg": 8.7}).as_object().cloned().unwrap(),
            vitamins: json!({"vitamin_c_mg": 40}).as_object().cloned().unwrap(),
            nutrition: Map::new(),
        }
    }

    fn create_hit(age_group: &str, gender: &str) -> SearchHit {
        let mut metadata = DocumentMetadata::new();
        metadata.insert("age_group".to_string(), age_group.to_string());
        metadata.insert("gender".to_string(), gender.to_string());

        SearchHit {
            id: format!("dietary_{}_{}", age_group, gender),
            text: String::new(),
            metadata,
            distance: 0.1,
        }
    }

    #[tokio::test]
    async fn test_exact_match_from_query_text() {
        let index = MockDietaryIndex::new();
        let mut store = MockRequirementsStore::new();
        store
            .expect_get_requirements()
            .with(eq("19-64"), eq(Gender::Male))
            .times(1)
            .returning(|_, _| Ok(Some(adult_male())));

        let service =
            DietaryRequirementsService::new(Arc::new(index), Arc::new(store), ResultLimits::DIETARY);
        let response = service
            .lookup(DietaryQuery {
                query: "requirements for 30-year-old male".to_string(),
                ..DietaryQuery::default()
            })
            .await
            .unwrap();

        assert!(response.starts_with("Dietary Requirements for Male, Age 30 (Age Group: 19-64)"));
        assert!(response.contains("  - Iron Mg: 8.7 mg"));
        assert!(response.contains("  - Vitamin C Mg: 40 mg"));
    }

    #[tokio::test]
    async fn test_explicit_arguments_override_query_text() {
        let index = MockDietaryIndex::new();
        let mut store = MockRequirementsStore::new();
        store
            .expect_get_requirements()
            .with(eq("65-74"), eq(Gender::Female))
            .times(1)
            .returning(|_, _| {
                Ok(Some(DietaryRequirements {
                    age_group: "65-74".to_string(),
                    gender: Gender::Female,
                    ..adult_male()
                }))
            });

        let service =
            DietaryRequirementsService::new(Arc::new(index), Arc::new(store), ResultLimits::DIETARY);
        let response = service
            .lookup(DietaryQuery {
                query: "iron for a 30-year-old male".to_string(),
                age: Some(70),
                gender: Some(Gender::Female),
                max_results: None,
            })
            .await
            .unwrap();

        assert!(response.starts_with("Dietary Requirements for Female, Age 70 (Age Group: 65-74)"));
    }

    #[tokio::test]
    async fn test_non_positive_age_is_rejected() {
        let service = DietaryRequirementsService::new(
            Arc::new(MockDietaryIndex::new()),
            Arc::new(MockRequirementsStore::new()),
            ResultLimits::DIETARY,
        );

        let result = service
            .lookup(DietaryQuery {
                query: "calcium".to_string(),
                age: Some(0),
                gender: Some(Gender::Male),
                max_results: None,
            })
            .await;

        assert!(matches!(result, Err(AdvisorError::OutOfRangeAge(0))));
    }

    #[tokio::test]
    async fn test_semantic_fallback() {
        let mut index = MockDietaryIndex::new();
        let mut store = MockRequirementsStore::new();

        index
            .expect_query()
            .with(eq("vitamin d for teenagers"), eq(10))
            .times(1)
            .returning(|_, _| Ok(vec![create_hit("15-18", "female"), create_hit("", "")]));
        store
            .expect_get_requirements()
            .with(eq("15-18"), eq(Gender::Female))
            .times(1)
            .returning(|_, _| {
                Ok(Some(DietaryRequirements {
                    age_group: "15-18".to_string(),
                    gender: Gender::Female,
                    ..adult_male()
                }))
            });

        let service =
            DietaryRequirementsService::new(Arc::new(index), Arc::new(store), ResultLimits::DIETARY);
        let response = service
            .lookup(DietaryQuery {
                query: "vitamin d for teenagers".to_string(),
                max_results: Some(50),
                ..DietaryQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(
            response,
            "Found 2 result(s) for 'vitamin d for teenagers':\n\n\
             1. Female, Age Group: 15-18\n   Key Minerals: Iron Mg\n   Key Vitamins: Vitamin C Mg\n\n\
             2. Unknown, Age Group: Unknown"
        );
    }

    #[tokio::test]
    async fn test_missing_exact_match_falls_back_to_search() {
        let mut index = MockDietaryIndex::new();
        let mut store = MockRequirementsStore::new();

        store
            .expect_get_requirements()
            .with(eq("1"), eq(Gender::Male))
            .times(1)
            .returning(|_, _| Ok(None));
        index.expect_query().times(1).returning(|_, _| Ok(Vec::new()));

        let service =
            DietaryRequirementsService::new(Arc::new(index), Arc::new(store), ResultLimits::DIETARY);
        let response = service
            .lookup(DietaryQuery {
                query: "needs of a 1-year-old boy".to_string(),
                ..DietaryQuery::default()
            })
            .await
            .unwrap();

        assert!(response.starts_with("No dietary requirements found for 'needs of a 1-year-old boy'."));
    }
}
