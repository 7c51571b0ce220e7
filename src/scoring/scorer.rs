// Weighted aggregation of the three component scores.
//
//   total = w_skill * skill + w_experience * experience + w_semantic * semantic
//
// Weights are validated once in `configure`, so a Scorer that exists is
// always safe to use. Each component is in [0, 1] and the weights sum to
// ~1.0, so the total is in [0, 1]; it is clamped anyway to absorb the ±0.01
// tolerance.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::experience::experience_score;
use super::semantic::SemanticSimilarityScorer;
use super::skills::{matched_skills, skill_score};
use crate::error::{PipelineWarning, RankError};
use crate::profile::CandidateProfile;
use crate::requirements::{JobRequirements, ScoringWeights};

/// Per-criterion scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub skill_score: f64,
    pub experience_score: f64,
    pub semantic_score: f64,
}

/// A profile plus its component and aggregate scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub profile: CandidateProfile,
    pub component_scores: ComponentScores,
    pub total_score: f64,
    /// Required skills the candidate has
    pub matched_skills: BTreeSet<String>,
}

impl ScoredCandidate {
    pub fn filename(&self) -> &str {
        &self.profile.filename
    }
}

/// A scored candidate and any non-fatal problems hit while scoring it.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub candidate: ScoredCandidate,
    pub warnings: Vec<PipelineWarning>,
}

/// Validated weights plus the semantic scorer they apply to.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
    semantic: SemanticSimilarityScorer,
}

impl Scorer {
    /// Fails with a configuration error if the weights are out of range or
    /// don't sum to 1.0 within tolerance.
    pub fn configure(
        weights: ScoringWeights,
        semantic: SemanticSimilarityScorer,
    ) -> Result<Self, RankError> {
        weights.validate()?;
        Ok(Self { weights, semantic })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted total of already-computed components, clamped to [0, 1].
    pub fn combine(&self, components: &ComponentScores) -> f64 {
        let total = self.weights.skill * components.skill_score
            + self.weights.experience * components.experience_score
            + self.weights.semantic * components.semantic_score;
        if total.is_finite() {
            total.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Score one profile against the requirements. Never fails; a semantic
    /// provider failure becomes a 0 semantic score plus a warning.
    pub async fn score(
        &self,
        profile: CandidateProfile,
        requirements: &JobRequirements,
    ) -> ScoreOutcome {
        let skill = skill_score(&requirements.required_skills, &profile.skills);
        let experience =
            experience_score(requirements.min_experience_years, profile.experience_years);
        let semantic = self
            .semantic
            .score(&requirements.description, &profile.raw_text)
            .await;

        let mut warnings = Vec::new();
        if let Some(failure) = semantic.failure {
            warnings.push(PipelineWarning::EmbeddingUnavailable {
                filename: profile.filename.clone(),
                reason: failure.to_string(),
            });
        }

        let component_scores = ComponentScores {
            skill_score: skill,
            experience_score: experience,
            semantic_score: semantic.score,
        };
        let total_score = self.combine(&component_scores);
        let matched = matched_skills(&requirements.required_skills, &profile.skills);

        debug!(
            filename = %profile.filename,
            skill, experience, semantic = semantic.score, total = total_score,
            "Scored candidate"
        );

        ScoreOutcome {
            candidate: ScoredCandidate {
                profile,
                component_scores,
                total_score,
                matched_skills: matched,
            },
            warnings,
        }
    }
}
