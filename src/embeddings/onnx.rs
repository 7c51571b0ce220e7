// Sentence embeddings from a local all-MiniLM-L6-v2 ONNX model.
//
// Each call tokenizes the job description and one resume together, truncated
// to MAX_TOKENS, and mean-pools the last hidden state under the attention
// mask into one 384-dimensional vector per text. The session is shared by all
// scoring tasks; `Session::run` takes `&mut self`, so concurrent resumes queue
// on its mutex inside the blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::EmbeddingProvider;
use crate::error::EmbeddingError;

/// Embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Tokens beyond this are truncated; the model's position table stops at 512.
const MAX_TOKENS: usize = 256;

/// Sentence embedder backed by a local ONNX session.
pub struct OnnxEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxEmbedder {
    /// Load `model.onnx` and `tokenizer.json` from `model_dir`.
    ///
    /// Run `resume-ranker download-model` first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                anyhow::bail!(
                    "{} is missing; run `resume-ranker download-model` first",
                    path.display()
                );
            }
        }

        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(&model_path))
            .with_context(|| format!("Cannot open ONNX model {}", model_path.display()))?;
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", tokenizer_path.display()))?;
        tokenizer.with_padding(None);

        debug!(dir = %model_dir.display(), "Embedding model loaded");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    fn name(&self) -> &str {
        "onnx:all-MiniLM-L6-v2"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        let task = tokio::task::spawn_blocking(move || embed_sync(&session, &tokenizer, &texts));
        let vectors = task
            .await
            .map_err(|e| EmbeddingError::Unavailable(format!("embedding task failed: {e}")))?
            .map_err(|e| EmbeddingError::Unavailable(format!("{e:#}")))?;
        Ok(vectors)
    }
}

/// Model inputs for one batch, row-major `[rows, seq_len]`, right-padded.
struct EncodedBatch {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    token_type_ids: Vec<i64>,
    rows: usize,
    seq_len: usize,
}

impl EncodedBatch {
    fn encode(tokenizer: &Tokenizer, texts: &[String]) -> Result<Self> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {e}"))?;

        let rows = encodings.len();
        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len().min(MAX_TOKENS))
            .max()
            .unwrap_or(0);

        let mut batch = Self {
            input_ids: Vec::with_capacity(rows * seq_len),
            attention_mask: Vec::with_capacity(rows * seq_len),
            token_type_ids: vec![0; rows * seq_len],
            rows,
            seq_len,
        };
        for enc in &encodings {
            push_row(&mut batch.input_ids, enc.get_ids(), seq_len);
            push_row(&mut batch.attention_mask, enc.get_attention_mask(), seq_len);
        }
        Ok(batch)
    }

    fn shape(&self) -> [i64; 2] {
        [self.rows as i64, self.seq_len as i64]
    }
}

/// Append `values` truncated or zero-padded to exactly `width` entries.
fn push_row(buf: &mut Vec<i64>, values: &[u32], width: usize) {
    let kept = values.len().min(width);
    buf.extend(values[..kept].iter().map(|&v| i64::from(v)));
    buf.extend(std::iter::repeat_n(0, width - kept));
}

/// Blocking half of `embed_batch`: encode, one session run, pool.
fn embed_sync(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    texts: &[String],
) -> Result<Vec<Vec<f64>>> {
    let batch = EncodedBatch::encode(tokenizer, texts)?;
    if batch.seq_len == 0 {
        return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch.rows]);
    }

    let shape = batch.shape();
    let inputs = ort::inputs! {
        "input_ids" => Tensor::from_array((shape, batch.input_ids))?,
        "attention_mask" => Tensor::from_array((shape, batch.attention_mask.clone()))?,
        "token_type_ids" => Tensor::from_array((shape, batch.token_type_ids))?
    };

    // Output 0 is last_hidden_state, [rows, seq_len, EMBEDDING_DIM]
    let hidden_states = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Embedding session lock poisoned: {e}"))?;
        let outputs = session
            .run(inputs)
            .context("Embedding inference failed")?;
        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Embedding output is not an f32 tensor")?;
        data.to_vec()
    };

    let expected = batch.rows * batch.seq_len * EMBEDDING_DIM;
    if hidden_states.len() != expected {
        anyhow::bail!(
            "Embedding output has {} values, expected {expected}",
            hidden_states.len()
        );
    }

    debug!(rows = batch.rows, seq_len = batch.seq_len, "Embedded batch");
    Ok(mean_pool(
        &hidden_states,
        &batch.attention_mask,
        batch.rows,
        batch.seq_len,
    ))
}

/// Average token embeddings weighted by the attention mask.
fn mean_pool(
    hidden_states: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    max_len: usize,
) -> Vec<Vec<f64>> {
    let mut embeddings = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut sum = vec![0.0_f64; EMBEDDING_DIM];
        let mut mask_sum = 0.0_f64;

        for j in 0..max_len {
            let mask_val = attention_mask[i * max_len + j] as f64;
            if mask_val > 0.0 {
                mask_sum += mask_val;
                let offset = (i * max_len + j) * EMBEDDING_DIM;
                for (k, acc) in sum.iter_mut().enumerate() {
                    *acc += hidden_states[offset + k] as f64 * mask_val;
                }
            }
        }

        if mask_sum > 0.0 {
            for val in &mut sum {
                *val /= mask_sum;
            }
        }

        embeddings.push(sum);
    }

    embeddings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_mentions_download() {
        let dir = std::env::temp_dir().join("resume-ranker-onnx-missing");
        let err = OnnxEmbedder::load(&dir).err().unwrap();
        assert!(err.to_string().contains("download-model"));
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut buf = Vec::new();
        push_row(&mut buf, &[5, 6], 4);
        push_row(&mut buf, &[1, 2, 3, 4, 5], 4);
        assert_eq!(buf, vec![5, 6, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_mean_pool_ignores_padding() {
        // One text, two token slots, second is padding
        let mut hidden = vec![1.0_f32; EMBEDDING_DIM];
        hidden.extend(vec![100.0_f32; EMBEDDING_DIM]);
        let pooled = mean_pool(&hidden, &[1, 0], 1, 2);
        assert_eq!(pooled.len(), 1);
        assert!(pooled[0].iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_mean_pool_averages_tokens() {
        let mut hidden = vec![2.0_f32; EMBEDDING_DIM];
        hidden.extend(vec![4.0_f32; EMBEDDING_DIM]);
        let pooled = mean_pool(&hidden, &[1, 1], 1, 2);
        assert!(pooled[0].iter().all(|&v| (v - 3.0).abs() < 1e-12));
    }
}
