use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::{AdvisorError, AdvisorResult};
use crate::ports::out_ports::EmbeddingPort;

/// A simple embedding implementation based on hashed word counts.
/// Stands in for a sentence-transformer model; good enough for keyword-level similarity.
pub struct SimpleEmbeddingService {
    embedding_dimension: usize,
}

impl SimpleEmbeddingService {
    pub fn new(embedding_dimension: usize) -> Self {
        Self {
            embedding_dimension,
        }
    }

    /// Create an embedding for text by counting word frequencies into hashed buckets
    fn compute_embedding(&self, text: &str) -> Vec<f32> {
        let mut word_counts: HashMap<String, usize> = HashMap::new();

        // Tokenize on anything that is not alphanumeric so "Legume," and "legume" agree
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            let word = word.to_lowercase();
            if !word.is_empty() {
                *word_counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut embedding = vec![0.0; self.embedding_dimension];

        for (word, count) in word_counts {
            let dimension = word
                .bytes()
                .fold(17_usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                % self.embedding_dimension;
            embedding[dimension] += count as f32;
        }

        // Normalize the embedding
        let magnitude: f32 = embedding.iter().map(|&x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingPort for SimpleEmbeddingService {
    async fn embed(&self, texts: &[String]) -> AdvisorResult<Vec<Vec<f32>>> {
        if self.embedding_dimension == 0 {
            return Err(AdvisorError::EmbeddingError(
                "embedding dimension must be positive".to_string(),
            ));
        }

        Ok(texts
            .iter()
            .map(|text| self.compute_embedding(text))
            .collect())
    }
}

/// Cosine similarity between two embeddings, 0 when either is empty
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a > 0.0 && magnitude_b > 0.0 {
        dot_product / (magnitude_a * magnitude_b)
    } else {
        0.0
    }
}
