// One-time fetch of the all-MiniLM-L6-v2 ONNX export and tokenizer.
//
// Files already on disk are left alone, and each download lands under a
// `.part` name until complete.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

const HF_REPO: &str = "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main";

/// One file the ONNX embedder needs.
struct ModelFile {
    /// Path inside the HuggingFace repo
    remote: &'static str,
    /// File name inside the local model directory
    local: &'static str,
    /// Large enough to deserve a progress bar
    large: bool,
}

const MODEL_FILES: &[ModelFile] = &[
    ModelFile {
        remote: "tokenizer.json",
        local: "tokenizer.json",
        large: false,
    },
    ModelFile {
        remote: "onnx/model.onnx",
        local: "model.onnx",
        large: true,
    },
];

/// `<data dir>/resume-ranker/models`, or `./resume-ranker/models` when the
/// platform has no data dir.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resume-ranker")
        .join("models")
}

pub fn embedding_model_dir(base: &Path) -> PathBuf {
    base.join("all-MiniLM-L6-v2")
}

/// Local paths of model files not yet downloaded.
fn missing_files(base: &Path) -> Vec<(&'static ModelFile, PathBuf)> {
    let dir = embedding_model_dir(base);
    MODEL_FILES
        .iter()
        .map(|file| (file, dir.join(file.local)))
        .filter(|(_, path)| !path.exists())
        .collect()
}

pub fn embedding_files_present(base: &Path) -> bool {
    missing_files(base).is_empty()
}

/// Fetch whichever model files are missing under `base`.
pub async fn download_model(base: &Path) -> Result<()> {
    let dir = embedding_model_dir(base);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let missing = missing_files(base);
    println!("\nSentence embedding model (all-MiniLM-L6-v2):");
    if missing.is_empty() {
        println!("  already downloaded to {}", dir.display());
        return Ok(());
    }

    for (file, dest) in missing {
        println!("  {}", file.local);
        download_file(&format!("{HF_REPO}/{}", file.remote), &dest, file.large).await?;
    }
    info!(dir = %dir.display(), "Embedding model ready");
    Ok(())
}

/// Download a single file, optionally with a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = show_progress.then(|| match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        }
    });

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    let partial = dest.with_extension("part");
    std::fs::write(&partial, &bytes)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    debug!(url, dest = %dest.display(), bytes = bytes.len(), "Downloaded");
    Ok(())
}
