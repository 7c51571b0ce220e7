// Education entries via degree and institution keyword patterns.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

use super::is_section_heading;
use super::traits::FieldExtractor;

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|bachelors|master|masters|doctorate|ph\.?\s?d|b\.?\s?sc|m\.?\s?sc|b\.?\s?tech|m\.?\s?tech|b\.a|m\.a|b\.e|m\.e|mba|bba|associate degree|diploma|university|college|institute|school of)\b",
    )
    .expect("valid regex")
});

/// Collects lines mentioning a degree or an institution.
///
/// Entries keep their order of appearance. Duplicates are detected on a
/// lowercased, whitespace-collapsed key and only the first is kept.
#[derive(Debug, Clone, Default)]
pub struct EducationExtractor;

impl FieldExtractor for EducationExtractor {
    type Output = Vec<String>;

    fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for line in text.lines() {
            let entry = line
                .trim()
                .trim_start_matches(['-', '*', '•'])
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if entry.is_empty() || is_section_heading(&entry) || !DEGREE_RE.is_match(&entry) {
                continue;
            }
            if seen.insert(entry.to_lowercase()) {
                entries.push(entry);
            }
        }

        entries
    }
}
