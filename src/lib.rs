// Resume ranker: feature extraction and weighted candidate ranking.
//
// This is the library root. Each module corresponds to a stage of the
// pipeline: ingest -> profile -> scoring -> output.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod requirements;
pub mod scoring;

pub use error::{EmbeddingError, PipelineWarning, RankError};
pub use ingest::ResumeDocument;
pub use pipeline::{rank_resumes, BatchOptions, RankingOutcome};
pub use profile::{CandidateProfile, FeatureExtractor};
pub use requirements::{JobRequirements, ScoringWeights};
pub use scoring::{ScoredCandidate, Scorer};
