// Output formatting — terminal display and CSV/JSON export.
//
// Presentation only ever reads the ranking. Truncating to a top-N happens
// here, never in the core.

pub mod export;
pub mod terminal;

use crate::scoring::ScoredCandidate;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// The first `n` ranked candidates (all of them when `n` is `None`).
pub fn top_n(ranked: &[ScoredCandidate], n: Option<usize>) -> &[ScoredCandidate] {
    match n {
        Some(n) => &ranked[..n.min(ranked.len())],
        None => ranked,
    }
}
