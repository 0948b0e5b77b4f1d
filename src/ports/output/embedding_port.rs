use crate::domain::AdvisorResult;
use async_trait::async_trait;

/// Output port for turning text into embedding vectors
#[async_trait]
pub trait EmbeddingPort {
    /// Embed a batch of texts; the output has one vector per input, in order
    async fn embed(&self, texts: &[String]) -> AdvisorResult<Vec<Vec<f32>>>;
}
