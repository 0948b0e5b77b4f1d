pub mod dietary_requirements_port;
pub mod indexing_port;
pub mod nutrition_lookup_port;

pub use dietary_requirements_port::DietaryRequirementsPort;
pub use indexing_port::IndexingPort;
pub use nutrition_lookup_port::NutritionLookupPort;
