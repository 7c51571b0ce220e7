// Semantic similarity between the job description and a resume.
//
// Both texts are embedded in one provider call and compared by cosine
// similarity. Negative similarity means "unrelated", not "anti-relevant", so
// it is floored at 0. Provider failures are never fatal here: the score falls
// back to 0 and the failure is handed back to the caller as a warning.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::embeddings::EmbeddingProvider;
use crate::error::EmbeddingError;

/// Cosine similarity mapped into [0, 1] via `max(0, cos)`.
///
/// Empty, mismatched or zero-magnitude vectors give 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON || !denom.is_finite() {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Outcome of one semantic comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticScore {
    pub score: f64,
    /// Set when the provider failed and `score` is the 0.0 fallback.
    pub failure: Option<EmbeddingError>,
}

/// Scores topical closeness using a shared embedding provider.
#[derive(Clone)]
pub struct SemanticSimilarityScorer {
    provider: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for SemanticSimilarityScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticSimilarityScorer")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl SemanticSimilarityScorer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Similarity of `candidate_text` to `job_description`, in [0, 1].
    ///
    /// An empty job description carries no topic, so it scores 0 without
    /// calling the provider.
    pub async fn score(&self, job_description: &str, candidate_text: &str) -> SemanticScore {
        if job_description.trim().is_empty() || candidate_text.trim().is_empty() {
            return SemanticScore {
                score: 0.0,
                failure: None,
            };
        }

        let texts = [job_description.to_string(), candidate_text.to_string()];
        let result = self
            .provider
            .embed_batch(&texts)
            .await
            .and_then(|vectors| match vectors.as_slice() {
                [job, candidate] => Ok(cosine_similarity(job, candidate)),
                other => Err(EmbeddingError::CountMismatch {
                    expected: 2,
                    got: other.len(),
                }),
            });

        match result {
            Ok(score) => SemanticScore {
                score,
                failure: None,
            },
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Semantic scoring failed, using 0");
                SemanticScore {
                    score: 0.0,
                    failure: Some(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{HashedEmbedder, UnavailableEmbedder};

    #[test]
    fn test_cosine_identical() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_negative_floors_at_zero() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = vec![1.0, 3.0, -2.0, 0.5];
        let b = vec![2.0, -1.0, 4.0, 0.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_related_text_scores_higher() {
        let scorer = SemanticSimilarityScorer::new(Arc::new(HashedEmbedder::default()));
        let job = "Python engineer building NLP pipelines";
        let close = scorer.score(job, "Built NLP pipelines in Python").await;
        let far = scorer.score(job, "Pastry chef specialising in croissants").await;
        assert!(close.failure.is_none());
        assert!(close.score > far.score);
        assert!((0.0..=1.0).contains(&close.score));
    }

    #[tokio::test]
    async fn test_unavailable_provider_degrades_to_zero() {
        let scorer = SemanticSimilarityScorer::new(Arc::new(UnavailableEmbedder {
            reason: "model missing".into(),
        }));
        let result = scorer.score("python", "python").await;
        assert_eq!(result.score, 0.0);
        assert!(matches!(result.failure, Some(EmbeddingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_empty_description_skips_provider() {
        let scorer = SemanticSimilarityScorer::new(Arc::new(UnavailableEmbedder {
            reason: "never called".into(),
        }));
        let result = scorer.score("   ", "python").await;
        assert_eq!(result.score, 0.0);
        assert!(result.failure.is_none());
    }
}
