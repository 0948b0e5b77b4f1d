pub mod dietary_requirements_service;
pub mod indexing_service;
pub mod nutrition_lookup_service;

pub use dietary_requirements_service::DietaryRequirementsService;
pub use indexing_service::IndexingService;
pub use nutrition_lookup_service::NutritionLookupService;
