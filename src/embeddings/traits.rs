// Embedding provider trait — the swap-ready abstraction.
//
// Semantic scoring only needs "text in, fixed-length vector out". The
// default provider runs a local ONNX sentence transformer; a hashed
// bag-of-words provider covers machines without the model, and tests plug
// in their own fakes. Providers are constructed once and shared read-only
// across all scoring tasks.

use async_trait::async_trait;

use crate::error::EmbeddingError;

/// Turns texts into embedding vectors. Implementations must be safe to call
/// concurrently from many tasks.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short label for logs and reports.
    fn name(&self) -> &str;

    /// Embed each text, returning vectors in the same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError>;
}

/// Provider used when the configured model could not be loaded.
///
/// Every call fails, so each candidate's semantic score degrades to 0 with a
/// warning instead of the whole run aborting.
pub struct UnavailableEmbedder {
    pub reason: String,
}

#[async_trait]
impl EmbeddingProvider for UnavailableEmbedder {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        Err(EmbeddingError::Unavailable(self.reason.clone()))
    }
}
