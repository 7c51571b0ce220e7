// Scoring — per-criterion matchers, weighted aggregation and ranking.

pub mod experience;
pub mod ranker;
pub mod scorer;
pub mod semantic;
pub mod skills;

pub use scorer::{ComponentScores, ScoreOutcome, ScoredCandidate, Scorer};
pub use semantic::SemanticSimilarityScorer;
