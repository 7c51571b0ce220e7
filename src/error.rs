// Error and warning kinds for the ranking core.
//
// Fatal conditions (bad or missing requirements) are `RankError` and stop a
// run before any candidate is touched. Per-candidate problems never become
// errors at the batch level: they are recorded as `PipelineWarning` values
// next to the (degraded) result.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal, run-level errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankError {
    /// No job requirements were supplied at all.
    #[error("no job requirements supplied")]
    NoRequirements,
    /// Requirements are present but invalid (weights, missing fields, duplicate inputs).
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl RankError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Failures reported by an embedding provider.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
    #[error("embedding provider returned {got} vectors for {expected} texts")]
    CountMismatch { expected: usize, got: usize },
}

/// Profile fields whose absence is reported as an extraction warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    ExperienceYears,
    Education,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::ExperienceYears => "experience_years",
            ProfileField::Education => "education",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal, per-candidate conditions surfaced alongside the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// A field could not be derived from the resume text.
    Extraction { filename: String, field: ProfileField },
    /// Semantic similarity fell back to 0 because the provider failed.
    EmbeddingUnavailable { filename: String, reason: String },
}

impl PipelineWarning {
    pub fn filename(&self) -> &str {
        match self {
            PipelineWarning::Extraction { filename, .. } => filename,
            PipelineWarning::EmbeddingUnavailable { filename, .. } => filename,
        }
    }

    /// Embedding failures make a run partial; missing fields do not.
    pub fn is_partial(&self) -> bool {
        matches!(self, PipelineWarning::EmbeddingUnavailable { .. })
    }
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::Extraction { filename, field } => {
                write!(f, "{filename}: could not extract {field}")
            }
            PipelineWarning::EmbeddingUnavailable { filename, reason } => {
                write!(f, "{filename}: semantic score unavailable ({reason})")
            }
        }
    }
}
