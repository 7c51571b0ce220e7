// Pipeline orchestration — extraction, scoring and ranking over a batch.

pub mod batch;

pub use batch::{rank_resumes, BatchOptions, RankingOutcome};
