// Skill vocabulary, synonym table, and text scanning.
//
// Skills are always compared in canonical form: trimmed, lowercased,
// whitespace-collapsed and mapped through the synonym table. The same
// `normalize_skill` is used when reading job requirements and when matching,
// so "JS", " js " and "javascript" are the same skill everywhere.
//
// Two sources feed the extracted set. Entries listed under a SKILLS heading
// are taken as written, so skills outside the vocabulary still count. The
// whole text is then scanned for vocabulary terms and synonyms.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex_lite::Regex;

use super::is_section_heading;
use super::traits::FieldExtractor;

/// Canonical skill terms recognised in resume text.
const VOCABULARY: &[&str] = &[
    "python", "java", "c++", "c#", "javascript", "typescript", "sql", "mysql", "postgresql",
    "mongodb", "aws", "azure", "gcp", "docker", "kubernetes", "git", "linux", "html", "css",
    "react", "angular", "nodejs", "django", "flask", "spring", "selenium", "jira", "jenkins",
    "cicd", "pandas", "numpy", "scikit-learn", "tensorflow", "keras", "pytorch", "matplotlib",
    "spark", "hadoop", "tableau", "powerbi", "excel", "oracle", "bash", "shell", "json", "xml",
    "php", "dotnet", "postman", "pytest", "junit", "hibernate", "express", "bootstrap", "vue",
    "redis", "elasticsearch", "graphql", "firebase", "android", "ios", "swift", "go", "ruby",
    "rails", "scala", "rust", "kotlin", "devops", "etl", "nlp", "statistics", "scrum", "agile",
    "machine learning", "deep learning", "computer vision", "data analysis", "rest api",
];

/// Variant spelling -> canonical term.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ecmascript", "javascript"),
    ("ts", "typescript"),
    ("node", "nodejs"),
    ("node.js", "nodejs"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("vuejs", "vue"),
    ("angularjs", "angular"),
    ("express.js", "express"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("psql", "postgresql"),
    ("mongo", "mongodb"),
    ("k8s", "kubernetes"),
    (".net", "dotnet"),
    ("asp.net", "dotnet"),
    ("ci/cd", "cicd"),
    ("ci-cd", "cicd"),
    ("sklearn", "scikit-learn"),
    ("scikit learn", "scikit-learn"),
    ("power bi", "powerbi"),
    ("ms excel", "excel"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("ruby on rails", "rails"),
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("ml", "machine learning"),
    ("natural language processing", "nlp"),
    ("restful api", "rest api"),
    ("restful apis", "rest api"),
    ("rest apis", "rest api"),
];

/// Headings whose section lists skills one or more per line.
const SKILL_HEADINGS: &[&str] = &["SKILLS", "TECHNICAL SKILLS", "CORE SKILLS", "KEY SKILLS"];

/// Longer list entries are prose, not skill names.
const MAX_ENTRY_WORDS: usize = 4;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9+#./\-]+").expect("valid regex"));

/// Canonical form of a skill string.
///
/// Trims, lowercases, collapses internal whitespace and applies the synonym
/// table. Unknown skills pass through in their cleaned form.
pub fn normalize_skill(raw: &str) -> String {
    let cleaned = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == cleaned)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(cleaned)
}

/// Normalize skills into a set, dropping empty entries.
pub fn normalize_skill_set<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// The set of canonical skills the extractor looks for.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self {
            terms: VOCABULARY.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl SkillVocabulary {
    /// Extend the vocabulary with extra terms (normalized on insert).
    pub fn with_terms<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms.extend(normalize_skill_set(extra));
        self
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.terms.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Entries listed under a skills heading, up to the next blank line or
/// section heading. Lines are split on `;` `,` `|` and bullets.
fn listed_skills(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if in_section && !trimmed.is_empty() && !is_section_heading(trimmed) {
            entries.extend(
                trimmed
                    .split([';', ',', '|', '\u{2022}', '\u{00b7}'])
                    .filter_map(list_entry),
            );
            continue;
        }
        let heading = trimmed.trim_end_matches(':').trim().to_uppercase();
        in_section = SKILL_HEADINGS.contains(&heading.as_str());
    }
    entries
}

/// One list entry in canonical form. A "Languages: Python" sub-label is
/// dropped.
fn list_entry(raw: &str) -> Option<String> {
    let raw = raw.rsplit(':').next().unwrap_or(raw);
    let raw = raw
        .trim()
        .trim_start_matches(['-', '*'])
        .trim_end_matches('.')
        .trim();
    if raw.is_empty() || raw.split_whitespace().count() > MAX_ENTRY_WORDS {
        return None;
    }
    Some(normalize_skill(raw))
}

/// Reads the skills section, then scans the text for vocabulary terms and
/// their synonyms.
#[derive(Debug, Clone, Default)]
pub struct SkillExtractor {
    pub vocabulary: SkillVocabulary,
}

impl SkillExtractor {
    fn accept(&self, candidate: &str, found: &mut BTreeSet<String>) {
        let skill = normalize_skill(candidate);
        if self.vocabulary.contains(&skill) {
            found.insert(skill);
        }
    }
}

impl FieldExtractor for SkillExtractor {
    type Output = BTreeSet<String>;

    fn extract(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        let mut found: BTreeSet<String> = listed_skills(text).into_iter().collect();

        // Single tokens: "Python,", "node.js", "c++", "python/django"
        for token in TOKEN_RE.find_iter(&lower) {
            let token = token.as_str().trim_end_matches(['.', '-', '/']);
            if token.is_empty() {
                continue;
            }
            self.accept(token, &mut found);
            if token.contains('/') && !self.vocabulary.contains(&normalize_skill(token)) {
                for part in token.split('/') {
                    self.accept(part, &mut found);
                }
            }
        }

        // Multi-word terms and synonyms, matched on a space-separated word stream
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || "+#.".contains(c)))
            .map(|w| w.trim_end_matches('.'))
            .filter(|w| !w.is_empty())
            .collect();
        let stream = format!(" {} ", words.join(" "));

        let phrases = VOCABULARY
            .iter()
            .copied()
            .chain(SYNONYMS.iter().map(|(variant, _)| *variant))
            .filter(|p| p.contains(' '));
        for phrase in phrases {
            if stream.contains(&format!(" {phrase} ")) {
                self.accept(phrase, &mut found);
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_applies_synonyms() {
        assert_eq!(normalize_skill("  JS "), "javascript");
        assert_eq!(normalize_skill("Node.js"), "nodejs");
        assert_eq!(normalize_skill("Natural   Language Processing"), "nlp");
        assert_eq!(normalize_skill("Haskell"), "haskell");
    }

    #[test]
    fn test_extract_tokens_and_punctuation() {
        let text = "Skills: Python, SQL; Docker | Node.js and C++.";
        let skills = SkillExtractor::default().extract(text);
        for s in ["python", "sql", "docker", "nodejs", "c++"] {
            assert!(skills.contains(s), "missing {s} in {skills:?}");
        }
    }

    #[test]
    fn test_extract_multi_word_terms() {
        let text = "Worked on machine learning and natural language processing pipelines on AWS.";
        let skills = SkillExtractor::default().extract(text);
        assert!(skills.contains("machine learning"));
        assert!(skills.contains("nlp"));
        assert!(skills.contains("aws"));
    }

    #[test]
    fn test_extract_slash_separated() {
        let skills = SkillExtractor::default().extract("Python/Django developer, CI/CD owner");
        assert!(skills.contains("python"));
        assert!(skills.contains("django"));
        assert!(skills.contains("cicd"));
    }

    #[test]
    fn test_extract_ignores_unknown_words() {
        let skills = SkillExtractor::default().extract("Enthusiastic communicator and team player");
        assert!(skills.is_empty(), "unexpected skills: {skills:?}");
    }

    #[test]
    fn test_skills_section_entries_kept_outside_vocabulary() {
        let text =
            "Jane\nSKILLS\nHaskell, Erlang | Python\n\u{2022} Elixir; JS\n\nHobbies: chess";
        let skills = SkillExtractor::default().extract(text);
        for s in ["haskell", "erlang", "python", "elixir", "javascript"] {
            assert!(skills.contains(s), "missing {s} in {skills:?}");
        }
        assert!(!skills.contains("chess"));
    }

    #[test]
    fn test_skills_section_ends_at_next_heading() {
        let text =
            "Technical Skills:\nLanguages: OCaml, Zig\nEXPERIENCE\nCobol maintenance, Fortran";
        let skills = SkillExtractor::default().extract(text);
        assert!(skills.contains("ocaml"));
        assert!(skills.contains("zig"));
        assert!(!skills.contains("fortran"));
        assert!(!skills.contains("cobol maintenance"));
    }

    #[test]
    fn test_skills_section_skips_prose_lines() {
        let text = "SKILLS\nI am comfortable picking up any new language quickly\n";
        let skills = SkillExtractor::default().extract(text);
        assert!(skills.is_empty(), "unexpected skills: {skills:?}");
    }

    #[test]
    fn test_vocabulary_extension() {
        let extractor = SkillExtractor {
            vocabulary: SkillVocabulary::default().with_terms(["Haskell"]),
        };
        let skills = extractor.extract("Functional programming in Haskell");
        assert!(skills.contains("haskell"));
    }
}
