// Resume ingestion: the (filename, raw_text) boundary of the pipeline.
//
// Only plain-text formats are read. PDF/DOCX decoding belongs to an external
// converter; such files are skipped with a warning so the rest of the batch
// still runs.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Extensions read as plain text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

/// One already-decoded resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    /// Unique key within a ranking run
    pub filename: String,
    pub raw_text: String,
}

impl ResumeDocument {
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_text: raw_text.into(),
        }
    }
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TEXT_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
}

/// Read one text resume. Invalid UTF-8 is replaced rather than rejected.
pub fn load_resume(path: &Path) -> Result<ResumeDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {}", path.display()))?;

    Ok(ResumeDocument {
        filename,
        raw_text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Read every text resume in `dir` (non-recursive), sorted by filename.
pub fn load_resumes(dir: &Path) -> Result<Vec<ResumeDocument>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read resume directory {}", dir.display()))?;

    let mut docs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !is_text_file(&path) {
            warn!(
                file = %path.display(),
                "Skipping non-text resume; convert it to .txt first"
            );
            continue;
        }
        docs.push(load_resume(&path)?);
    }

    docs.sort_by(|a, b| a.filename.cmp(&b.filename));
    debug!(count = docs.len(), dir = %dir.display(), "Loaded resumes");
    Ok(docs)
}
