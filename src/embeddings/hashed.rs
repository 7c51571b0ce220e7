// Hashed bag-of-words embeddings — the no-model fallback.
//
// Each lowercased, non-stop-word token is hashed with blake3 into one of
// `dims` buckets, with the sign taken from another hash bit so collisions
// tend to cancel instead of piling up. Vectors are L2-normalised, so cosine
// similarity reduces to weighted vocabulary overlap. Fully deterministic and
// needs no files on disk.

use std::collections::HashSet;

use async_trait::async_trait;
use stop_words::{get, LANGUAGE};

use super::traits::EmbeddingProvider;
use crate::error::EmbeddingError;

/// Default vector width.
pub const HASHED_DIM: usize = 256;

pub struct HashedEmbedder {
    dims: usize,
    stop_words: HashSet<String>,
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(HASHED_DIM)
    }
}

impl HashedEmbedder {
    pub fn new(dims: usize) -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self {
            dims: dims.max(1),
            stop_words: stop_words.into_iter().collect(),
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Embed one text. Empty or all-stop-word text gives the zero vector.
    pub fn embed(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0_f64; self.dims];

        let lower = text.to_lowercase();
        let tokens = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .filter(|t| t.chars().count() > 1)
            .filter(|t| !self.stop_words.contains(*t));

        for token in tokens {
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let mut index_bytes = [0u8; 8];
            index_bytes.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(index_bytes) % self.dims as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashedEmbedder {
    fn name(&self) -> &str {
        "hashed-bow"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn test_deterministic_and_normalised() {
        let e = HashedEmbedder::default();
        let a = e.embed("Python developer with NLP experience");
        let b = e.embed("Python developer with NLP experience");
        assert_eq!(a, b);
        assert_eq!(a.len(), HASHED_DIM);
        assert!((norm(&a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stop_words_only_is_zero() {
        let e = HashedEmbedder::default();
        let v = e.embed("and the of to");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_case_insensitive() {
        let e = HashedEmbedder::new(64);
        assert_eq!(e.embed("Rust Kubernetes"), e.embed("rust kubernetes"));
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let e = HashedEmbedder::default();
        let texts = vec!["python".to_string(), "".to_string()];
        let out = e.embed_batch(&texts).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], e.embed("python"));
        assert!(out[1].iter().all(|&x| x == 0.0));
    }
}
