pub mod embedding_port;
pub mod food_record_port;
pub mod requirements_store_port;
pub mod vector_index_port;

pub use embedding_port::EmbeddingPort;
pub use food_record_port::FoodRecordPort;
pub use requirements_store_port::RequirementsStorePort;
pub use vector_index_port::VectorIndexPort;
