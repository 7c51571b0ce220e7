// Deterministic ordering of scored candidates.
//
// Sort key: total score descending, then filename ascending. The result never
// depends on the order candidates were scored in, and the full list is always
// returned; picking a top-N is left to the presentation layer.

use std::cmp::Ordering;

use super::scorer::ScoredCandidate;

/// Order candidates best-first. Consumes and returns the complete list.
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by(compare);
    candidates
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| a.filename().cmp(b.filename()))
}
