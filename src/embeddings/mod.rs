// Embedding providers — trait-based abstraction for swappable backends.
//
// The EmbeddingProvider trait defines the interface. OnnxEmbedder runs a local
// sentence transformer; HashedEmbedder is a dependency-free fallback used when
// the model isn't downloaded.

pub mod download;
pub mod hashed;
pub mod onnx;
pub mod traits;

use std::sync::Arc;

use tracing::{info, warn};

pub use hashed::HashedEmbedder;
pub use onnx::OnnxEmbedder;
pub use traits::{EmbeddingProvider, UnavailableEmbedder};

use crate::config::{Config, EmbedderKind};

/// Build the process-wide provider for this run. Never fails: an ONNX model
/// that cannot be loaded becomes an `UnavailableEmbedder`, which degrades
/// semantic scores instead of stopping the run.
pub fn build_provider(config: &Config) -> Arc<dyn EmbeddingProvider> {
    let model_dir = download::embedding_model_dir(&config.model_dir);

    let use_onnx = match config.embedder {
        EmbedderKind::Hashed => false,
        EmbedderKind::Onnx => true,
        EmbedderKind::Auto => {
            let present = download::embedding_files_present(&config.model_dir);
            if !present {
                info!("Embedding model not downloaded; using hashed bag-of-words embeddings");
            }
            present
        }
    };

    if !use_onnx {
        return Arc::new(HashedEmbedder::default());
    }

    match OnnxEmbedder::load(&model_dir) {
        Ok(embedder) => {
            info!(dir = %model_dir.display(), "Loaded ONNX embedding model");
            Arc::new(embedder)
        }
        Err(e) => {
            warn!(error = %e, "Embedding model unavailable; semantic scores will be 0");
            Arc::new(UnavailableEmbedder {
                reason: format!("{e:#}"),
            })
        }
    }
}
