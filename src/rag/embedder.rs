//! Embedder capability and the bundled feature-hashing implementation.

use sha2::{Digest, Sha256};

use super::types::Embedding;
use crate::core::errors::ConfigError;

/// Turns text into a fixed-length vector.
///
/// Implementations must return vectors of length `dimensions()` and keep
/// that length constant for the lifetime of the instance. Callers wanting a
/// timeout wrap the embedder; nothing in this crate imposes one.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> anyhow::Result<Embedding>;

    fn dimensions(&self) -> usize;
}

/// Deterministic bag-of-words embedder.
///
/// Each lowercase alphanumeric token is hashed with SHA-256 into one bucket
/// and a sign; bucket counts are L2-normalised. Texts that share tokens get
/// positively correlated vectors, which is all the retriever needs.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Result<Self, ConfigError> {
        if dimensions == 0 {
            return Err(ConfigError::Invalid(
                "embedding dimensions must be positive".to_string(),
            ));
        }
        Ok(Self { dimensions })
    }

    fn bucket(&self, token: &str) -> (usize, f64) {
        let digest = Sha256::digest(token.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let hash = u64::from_le_bytes(head);

        let index = (hash % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> anyhow::Result<Embedding> {
        let mut vector = vec![0.0; self.dimensions];

        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let (index, sign) = self.bucket(token);
            vector[index] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_math::cosine_similarity;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(HashingEmbedder::new(0).is_err());
    }

    #[test]
    fn output_length_matches_dimensions() {
        let embedder = HashingEmbedder::new(32).unwrap();
        assert_eq!(embedder.embed("hello world").unwrap().len(), 32);
        assert_eq!(embedder.embed("").unwrap().len(), 32);
        assert_eq!(embedder.dimensions(), 32);
    }

    #[test]
    fn is_deterministic_and_case_insensitive() {
        let embedder = HashingEmbedder::new(64).unwrap();
        let a = embedder.embed("Invoice Process").unwrap();
        let b = embedder.embed("invoice, process!").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shared_tokens_increase_similarity() {
        let embedder = HashingEmbedder::new(256).unwrap();
        let query = embedder.embed("invoice process").unwrap();
        let related = embedder.embed("the invoice process for vendors").unwrap();
        let identical = embedder.embed("invoice process").unwrap();

        let related_score = cosine_similarity(&query, &related);
        assert!(related_score > 0.3, "score was {related_score}");
        assert!((cosine_similarity(&query, &identical) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let embedder = HashingEmbedder::new(8).unwrap();
        let vector = embedder.embed("  ...  ").unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }
}
