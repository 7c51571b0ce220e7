// Job requirements — the weighted criteria every candidate is ranked against.
//
// The JSON boundary shape is:
//
//   { "required_skills": ["python", "nlp"],
//     "weights": { "skill": 0.5, "experience": 0.3, "semantic": 0.2 },
//     "min_experience_years": 2,
//     "description": "..." }
//
// `job_description` and `required_experience` are accepted as aliases for
// `description` and `min_experience_years`. Validation happens once, here,
// before any candidate is processed.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RankError;
use crate::profile::skills::normalize_skill_set;

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Weights for the three scoring components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub semantic: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.5,
            experience: 0.3,
            semantic: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.semantic
    }

    /// Each weight in [0, 1] and the sum within `WEIGHT_TOLERANCE` of 1.0.
    pub fn validate(&self) -> Result<(), RankError> {
        for (label, w) in [
            ("skill", self.skill),
            ("experience", self.experience),
            ("semantic", self.semantic),
        ] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(RankError::configuration(format!(
                    "{label} weight must be between 0 and 1, got {w}"
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(RankError::configuration(format!(
                "weights must sum to 1.0 (±{WEIGHT_TOLERANCE}), got {sum:.3}"
            )));
        }
        Ok(())
    }
}

/// Validated job requirements. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequirements {
    /// Normalized, de-duplicated skill terms
    pub required_skills: BTreeSet<String>,
    pub weights: ScoringWeights,
    pub min_experience_years: f64,
    pub description: String,
}

/// Requirements as they arrive from JSON, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub weights: Option<ScoringWeights>,
    #[serde(default, alias = "required_experience")]
    pub min_experience_years: Option<f64>,
    #[serde(default, alias = "job_description")]
    pub description: Option<String>,
}

impl JobRequirements {
    pub fn new<S: AsRef<str>>(
        required_skills: &[S],
        weights: ScoringWeights,
        min_experience_years: f64,
        description: &str,
    ) -> Result<Self, RankError> {
        Self::from_raw(Some(RawJobRequirements {
            required_skills: required_skills
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            weights: Some(weights),
            min_experience_years: Some(min_experience_years),
            description: Some(description.to_string()),
        }))
    }

    /// Validate raw requirements. `None` means nothing was supplied at all.
    pub fn from_raw(raw: Option<RawJobRequirements>) -> Result<Self, RankError> {
        let raw = raw.ok_or(RankError::NoRequirements)?;

        let weights = raw
            .weights
            .ok_or_else(|| RankError::configuration("missing required field `weights`"))?;
        weights.validate()?;

        let min_experience_years = raw.min_experience_years.unwrap_or(0.0);
        if !min_experience_years.is_finite() || min_experience_years < 0.0 {
            return Err(RankError::configuration(format!(
                "min_experience_years must be a non-negative number, got {min_experience_years}"
            )));
        }

        Ok(Self {
            required_skills: normalize_skill_set(&raw.required_skills),
            weights,
            min_experience_years,
            description: raw.description.unwrap_or_default(),
        })
    }

    /// Parse and validate a JSON document. A `null` document counts as no requirements.
    pub fn from_json(json: &str) -> Result<Self, RankError> {
        let raw: Option<RawJobRequirements> = serde_json::from_str(json)
            .map_err(|e| RankError::configuration(format!("malformed requirements JSON: {e}")))?;
        Self::from_raw(raw)
    }

    /// Read requirements from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid requirements in {}", path.display()))
    }
}
