pub mod json_food_store;
pub mod json_requirements_store;
pub mod memory_vector_index;
pub mod simple_embedding_service;

pub use json_food_store::{load_food_records, JsonFoodStore};
pub use json_requirements_store::{load_dietary_datasets, DietaryDataPaths, JsonRequirementsStore};
pub use memory_vector_index::InMemoryVectorIndex;
pub use simple_embedding_service::SimpleEmbeddingService;
