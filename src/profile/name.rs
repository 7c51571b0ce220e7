// Candidate name heuristic.
//
// Resumes almost always open with the candidate's name. We take the first
// short, non-empty line that is not a section heading or a contact line.

use super::is_section_heading;
use super::traits::FieldExtractor;

#[derive(Debug, Clone)]
pub struct NameExtractor {
    /// Lines longer than this many words are not considered names
    pub max_words: usize,
    /// Only the leading portion of the text is searched
    pub max_lines: usize,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self {
            max_words: 6,
            max_lines: 10,
        }
    }
}

impl FieldExtractor for NameExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.max_lines)
            .map(strip_name_label)
            .find(|line| self.looks_like_name(line))
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

impl NameExtractor {
    fn looks_like_name(&self, line: &str) -> bool {
        let words = line.split_whitespace().count();
        words > 0
            && words <= self.max_words
            && !is_section_heading(line)
            && !line.contains('@')
            && !line.contains("://")
            && !line.chars().any(|c| c.is_ascii_digit())
            && line.chars().any(|c| c.is_alphabetic())
    }
}

fn strip_name_label(line: &str) -> &str {
    match line.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("name:") => line[5..].trim(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_is_name() {
        let text = "\n\n  Jane Q. Doe  \nSenior Engineer\njane@example.com";
        assert_eq!(
            NameExtractor::default().extract(text).as_deref(),
            Some("Jane Q. Doe")
        );
    }

    #[test]
    fn test_skips_headings_and_contact_lines() {
        let text = "RESUME\njane@example.com | +1 555 123 4567\nJohn Smith\nEXPERIENCE";
        assert_eq!(
            NameExtractor::default().extract(text).as_deref(),
            Some("John Smith")
        );
    }

    #[test]
    fn test_name_label_prefix() {
        let text = "Name: Priya Raman\nEmail: priya@example.com";
        assert_eq!(
            NameExtractor::default().extract(text).as_deref(),
            Some("Priya Raman")
        );
    }

    #[test]
    fn test_no_name_found() {
        let text = "Built distributed systems across many teams for a decade in total\n2019";
        assert_eq!(NameExtractor::default().extract(text), None);
    }
}
