use crate::domain::{AdvisorResult, IndexedDocument, SearchHit};
use async_trait::async_trait;

/// Output port for the nearest-neighbour document index
#[async_trait]
pub trait VectorIndexPort {
    /// Add documents; ids must be unique within the index
    async fn add_documents(&self, documents: Vec<IndexedDocument>) -> AdvisorResult<usize>;

    /// Closest documents to `query`, nearest first
    async fn query(&self, query: &str, limit: usize) -> AdvisorResult<Vec<SearchHit>>;

    async fn count(&self) -> AdvisorResult<usize>;

    /// Drop every document
    async fn clear(&self) -> AdvisorResult<()>;
}
