use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::embeddings::download;
use crate::pipeline::batch::DEFAULT_CONCURRENCY;

/// Which embedding backend semantic scoring uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    /// ONNX model when downloaded, hashed bag-of-words otherwise (default)
    Auto,
    /// Local ONNX sentence transformer; semantic scores degrade to 0 if it can't load
    Onnx,
    /// Hashed bag-of-words, no model files needed
    Hashed,
}

impl EmbedderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "onnx" => Ok(Self::Onnx),
            "hashed" => Ok(Self::Hashed),
            other => anyhow::bail!(
                "Unknown RESUME_RANKER_EMBEDDER value {other:?} (expected auto, onnx or hashed)"
            ),
        }
    }
}

/// Default number of sentences in an extractive summary.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Process configuration loaded from environment variables.
///
/// A `.env` file is loaded at startup via dotenvy, so every setting can live
/// there instead of the shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing downloaded model files
    pub model_dir: PathBuf,
    pub embedder: EmbedderKind,
    /// Resumes processed concurrently (>= 1)
    pub concurrency: usize,
    /// Sentences per extractive summary (>= 1)
    pub summary_sentences: usize,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let model_dir = lookup("RESUME_RANKER_MODEL_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(download::default_model_dir);

        let embedder = match lookup("RESUME_RANKER_EMBEDDER") {
            Some(value) => EmbedderKind::parse(&value)?,
            None => EmbedderKind::Auto,
        };

        let concurrency = parse_positive(
            lookup("RESUME_RANKER_CONCURRENCY"),
            "RESUME_RANKER_CONCURRENCY",
            DEFAULT_CONCURRENCY,
        )?;
        let summary_sentences = parse_positive(
            lookup("RESUME_RANKER_SUMMARY_SENTENCES"),
            "RESUME_RANKER_SUMMARY_SENTENCES",
            DEFAULT_SUMMARY_SENTENCES,
        )?;

        Ok(Self {
            model_dir,
            embedder,
            concurrency,
            summary_sentences,
        })
    }

    /// Validate that the chosen embedding backend has what it needs.
    /// Only an explicit ONNX choice requires the model files.
    pub fn require_embedder(&self) -> Result<()> {
        if self.embedder == EmbedderKind::Onnx
            && !download::embedding_files_present(&self.model_dir)
        {
            anyhow::bail!(
                "Embedding model files not found in {}\n\
                 Run `resume-ranker download-model` to download them.\n\
                 Or set RESUME_RANKER_EMBEDDER=hashed to rank without the model.",
                download::embedding_model_dir(&self.model_dir).display()
            );
        }
        Ok(())
    }
}

/// Parse an optional integer setting, clamping to at least 1.
fn parse_positive(value: Option<String>, key: &str, default: usize) -> Result<usize> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => {
            let n: usize = raw
                .parse()
                .with_context(|| format!("{key} must be a positive integer, got {raw:?}"))?;
            Ok(n.max(1))
        }
    }
}
