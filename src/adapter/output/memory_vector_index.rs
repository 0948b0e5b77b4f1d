use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::adapter::output::simple_embedding_service::cosine_similarity;
use crate::domain::{AdvisorError, AdvisorResult, IndexedDocument, SearchHit};
use crate::ports::out_ports::{EmbeddingPort, VectorIndexPort};

struct IndexEntry {
    document: IndexedDocument,
    embedding: Vec<f32>,
}

/// In-memory implementation of the vector index.
/// Brute-force cosine search; used for testing and as a simple reference implementation.
pub struct InMemoryVectorIndex {
    embedding_service: Arc<dyn EmbeddingPort + Send + Sync>,
    entries: RwLock<Vec<IndexEntry>>,
}

impl InMemoryVectorIndex {
    pub fn new(embedding_service: Arc<dyn EmbeddingPort + Send + Sync>) -> Self {
        Self {
            embedding_service,
            entries: RwLock::new(Vec::new()),
        }
    }
}

/// Ids must be new to the index and unique within the batch
fn check_unique(entries: &[IndexEntry], documents: &[IndexedDocument]) -> AdvisorResult<()> {
    let mut ids: HashSet<&str> = entries.iter().map(|e| e.document.id.as_str()).collect();
    for document in documents {
        if !ids.insert(document.id.as_str()) {
            return Err(AdvisorError::DocumentAlreadyExists(document.id.clone()));
        }
    }
    Ok(())
}

fn lock_error<T>(_: T) -> AdvisorError {
    AdvisorError::StorageError("vector index lock poisoned".to_string())
}

#[async_trait]
impl VectorIndexPort for InMemoryVectorIndex {
    async fn add_documents(&self, documents: Vec<IndexedDocument>) -> AdvisorResult<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        // Fail before embedding; checked again below since the lock is released across the await
        check_unique(&self.entries.read().map_err(lock_error)?, &documents)?;

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedding_service.embed(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(AdvisorError::EmbeddingError(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let added = documents.len();
        let mut entries = self.entries.write().map_err(lock_error)?;
        check_unique(&entries, &documents)?;
        entries.extend(
            documents
                .into_iter()
                .zip(embeddings)
                .map(|(document, embedding)| IndexEntry {
                    document,
                    embedding,
                }),
        );

        Ok(added)
    }

    async fn query(&self, query: &str, limit: usize) -> AdvisorResult<Vec<SearchHit>> {
        let query_embedding = self
            .embedding_service
            .embed(&[query.to_string()])
            .await?
            .pop()
            .ok_or_else(|| AdvisorError::EmbeddingError("no embedding for query".to_string()))?;

        let entries = self.entries.read().map_err(lock_error)?;
        let mut hits: Vec<SearchHit> = entries
            .iter()
            .map(|entry| SearchHit {
                id: entry.document.id.clone(),
                text: entry.document.text.clone(),
                metadata: entry.document.metadata.clone(),
                distance: 1.0 - cosine_similarity(&query_embedding, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order between equal distances
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);

        Ok(hits)
    }

    async fn count(&self) -> AdvisorResult<usize> {
        Ok(self.entries.read().map_err(lock_error)?.len())
    }

    async fn clear(&self) -> AdvisorResult<()> {
        self.entries.write().map_err(lock_error)?.clear();
        Ok(())
    }
}
