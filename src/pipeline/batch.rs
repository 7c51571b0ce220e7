// Batch ranking pipeline.
//
// Every resume goes through FeatureExtractor -> Scorer independently, so the
// batch runs as a concurrent map (`buffer_unordered`) followed by one global
// sort. Extraction is CPU-bound and runs on the blocking pool, so it overlaps
// with other resumes' provider calls. Completion order never leaks into the
// result: the Ranker's sort key fully determines it.
//
// Fatal problems (no requirements, bad weights, duplicate filenames) are
// reported before any resume is touched. Everything after that degrades per
// candidate and is reported as a warning.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::embeddings::EmbeddingProvider;
use crate::error::{PipelineWarning, RankError};
use crate::ingest::ResumeDocument;
use crate::profile::{CandidateProfile, FeatureExtractor};
use crate::requirements::JobRequirements;
use crate::scoring::ranker;
use crate::scoring::scorer::{ScoreOutcome, ScoredCandidate, Scorer};
use crate::scoring::semantic::SemanticSimilarityScorer;

/// Default number of resumes processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            show_progress: false,
        }
    }
}

/// The complete ranking plus every non-fatal problem encountered.
#[derive(Debug, Clone, Serialize)]
pub struct RankingOutcome {
    /// All candidates, best first
    pub candidates: Vec<ScoredCandidate>,
    /// Sorted by filename
    pub warnings: Vec<PipelineWarning>,
}

impl RankingOutcome {
    /// True when some semantic scores fell back to 0.
    pub fn is_partial(&self) -> bool {
        self.warnings.iter().any(PipelineWarning::is_partial)
    }
}

/// Reject runs where two resumes share a filename.
pub fn check_unique_filenames(resumes: &[ResumeDocument]) -> Result<(), RankError> {
    let mut seen = HashSet::new();
    for doc in resumes {
        if !seen.insert(doc.filename.as_str()) {
            return Err(RankError::configuration(format!(
                "duplicate filename in batch: {}",
                doc.filename
            )));
        }
    }
    Ok(())
}

/// Extract one resume on the blocking pool. A panicking heuristic yields an
/// empty profile, which is then reported like any other missing field.
async fn extract_profile(
    extractor: Arc<FeatureExtractor>,
    doc: ResumeDocument,
) -> CandidateProfile {
    let filename = doc.filename.clone();
    tokio::task::spawn_blocking(move || extractor.extract(&doc.filename, &doc.raw_text))
        .await
        .unwrap_or_else(|e| {
            error!(filename = %filename, error = %e, "Feature extraction task failed");
            CandidateProfile::empty(&filename, "")
        })
}

/// Extract, score and rank a batch with an already-configured Scorer.
pub async fn run(
    extractor: Arc<FeatureExtractor>,
    scorer: &Scorer,
    requirements: &JobRequirements,
    resumes: Vec<ResumeDocument>,
    options: &BatchOptions,
) -> Result<RankingOutcome, RankError> {
    check_unique_filenames(&resumes)?;

    let total = resumes.len();
    let concurrency = options.concurrency.max(1);
    info!(resumes = total, concurrency, "Ranking resumes");

    let pb = options.show_progress.then(|| {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
                .expect("valid template"),
        );
        pb
    });

    let outcomes: Vec<(ScoreOutcome, Vec<PipelineWarning>)> =
        stream::iter(resumes.into_iter().map(|doc| {
            let pb = pb.clone();
            let extractor = Arc::clone(&extractor);
            async move {
                let profile = extract_profile(extractor, doc).await;
                let extraction_warnings = profile.extraction_warnings();
                let outcome = scorer.score(profile, requirements).await;
                if let Some(pb) = pb {
                    pb.inc(1);
                }
                (outcome, extraction_warnings)
            }
        }))
        .buffer_unordered(concurrency)
        .collect()
        .await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut candidates = Vec::with_capacity(total);
    let mut warnings = Vec::new();
    for (outcome, extraction_warnings) in outcomes {
        warnings.extend(extraction_warnings);
        warnings.extend(outcome.warnings);
        candidates.push(outcome.candidate);
    }
    // Stable: keeps extraction warnings ahead of scoring warnings per file
    warnings.sort_by(|a, b| a.filename().cmp(b.filename()));

    let candidates = ranker::rank(candidates);

    let outcome = RankingOutcome {
        candidates,
        warnings,
    };
    if outcome.is_partial() {
        warn!("Semantic scoring was unavailable for some candidates; ranking is partial");
    }
    info!(
        ranked = outcome.candidates.len(),
        warnings = outcome.warnings.len(),
        "Ranking complete"
    );
    Ok(outcome)
}

/// One-call entry point: validate requirements, configure the scorer, then
/// rank. Fails before touching any resume if the requirements are missing or
/// invalid.
pub async fn rank_resumes(
    requirements: Option<&JobRequirements>,
    resumes: Vec<ResumeDocument>,
    extractor: Arc<FeatureExtractor>,
    provider: Arc<dyn EmbeddingProvider>,
    options: &BatchOptions,
) -> Result<RankingOutcome, RankError> {
    let requirements = requirements.ok_or(RankError::NoRequirements)?;
    let scorer = Scorer::configure(
        requirements.weights,
        SemanticSimilarityScorer::new(provider),
    )?;
    run(extractor, &scorer, requirements, resumes, options).await
}
