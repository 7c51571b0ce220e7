// CSV and JSON export of a ranking.
//
// CSV columns are fixed:
//
//   rank,filename,name,email,phone,experience_years,education,score,matched_skills,summary
//
// List fields are joined with "; " inside one cell. Any field containing a
// comma, quote or line break is quoted with inner quotes doubled (RFC 4180).
// JSON carries the same fields plus component scores and the full skill set.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::scoring::{ComponentScores, ScoredCandidate};

pub const CSV_HEADER: &str =
    "rank,filename,name,email,phone,experience_years,education,score,matched_skills,summary";

const LIST_SEPARATOR: &str = "; ";

/// Quote a CSV field if it needs it.
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_years(years: Option<f64>) -> String {
    years.map(|y| format!("{y:.1}")).unwrap_or_default()
}

/// Render ranked candidates as CSV. Ranks are 1-based positions in `ranked`.
pub fn to_csv(ranked: &[ScoredCandidate]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push_str("\r\n");

    for (i, c) in ranked.iter().enumerate() {
        let p = &c.profile;
        let matched: Vec<&str> = c.matched_skills.iter().map(String::as_str).collect();
        let fields = [
            (i + 1).to_string(),
            p.filename.clone(),
            p.name.clone().unwrap_or_default(),
            p.email.clone().unwrap_or_default(),
            p.phone.clone().unwrap_or_default(),
            format_years(p.experience_years),
            p.education.join(LIST_SEPARATOR),
            format!("{:.4}", c.total_score),
            matched.join(LIST_SEPARATOR),
            p.summary.clone().unwrap_or_default(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonFeatures<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    experience_years: Option<f64>,
    education: &'a [String],
    skills: Vec<&'a str>,
    summary: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    rank: usize,
    filename: &'a str,
    score: f64,
    component_scores: &'a ComponentScores,
    matched_skills: Vec<&'a str>,
    features: JsonFeatures<'a>,
}

/// Render ranked candidates as a pretty-printed JSON array.
pub fn to_json(ranked: &[ScoredCandidate]) -> Result<String> {
    let records: Vec<JsonRecord<'_>> = ranked
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let p = &c.profile;
            JsonRecord {
                rank: i + 1,
                filename: &p.filename,
                score: c.total_score,
                component_scores: &c.component_scores,
                matched_skills: c.matched_skills.iter().map(String::as_str).collect(),
                features: JsonFeatures {
                    name: p.name.as_deref().unwrap_or_default(),
                    email: p.email.as_deref().unwrap_or_default(),
                    phone: p.phone.as_deref().unwrap_or_default(),
                    experience_years: p.experience_years,
                    education: &p.education,
                    skills: p.skills.iter().map(String::as_str).collect(),
                    summary: p.summary.as_deref().unwrap_or_default(),
                },
            }
        })
        .collect();

    serde_json::to_string_pretty(&records).context("Failed to serialize ranking to JSON")
}

/// Export format for `write_report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn render(self, ranked: &[ScoredCandidate]) -> Result<String> {
        match self {
            ExportFormat::Csv => Ok(to_csv(ranked)),
            ExportFormat::Json => to_json(ranked),
        }
    }
}

/// Render and write a report to `path`.
pub fn write_report(path: &Path, format: ExportFormat, ranked: &[ScoredCandidate]) -> Result<()> {
    let body = format.render(ranked)?;
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CandidateProfile;

    fn sample() -> ScoredCandidate {
        let mut profile = CandidateProfile::empty("jane.txt", "raw");
        profile.name = Some("Jane Doe".into());
        profile.email = Some("jane@example.com".into());
        profile.experience_years = Some(3.0);
        profile.education = vec!["B.Sc. Physics, MIT".into(), "M.Sc. \"Applied\" Maths".into()];
        profile.skills = ["python", "sql", "java"].iter().map(|s| s.to_string()).collect();
        profile.summary = Some("Builds things.\nShips them.".into());
        ScoredCandidate {
            profile,
            component_scores: ComponentScores {
                skill_score: 1.0,
                experience_score: 1.0,
                semantic_score: 0.5,
            },
            total_score: 0.9,
            matched_skills: ["python", "sql"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_row_layout() {
        let csv = to_csv(&[sample()]);
        let mut lines = csv.split("\r\n");
        assert_eq!(lines.next(), Some(CSV_HEADER));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,jane.txt,Jane Doe,jane@example.com,,3.0,"));
        assert!(row.contains("\"B.Sc. Physics, MIT; M.Sc. \"\"Applied\"\" Maths\""));
        assert!(row.contains(",0.9000,python; sql,"));
        assert!(row.ends_with("\"Builds things.\nShips them.\""));
    }

    #[test]
    fn test_csv_empty_ranking_is_header_only() {
        assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\r\n"));
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["rank"], 1);
        assert_eq!(first["filename"], "jane.txt");
        assert_eq!(first["features"]["name"], "Jane Doe");
        assert_eq!(first["features"]["phone"], "");
        assert_eq!(first["features"]["skills"].as_array().unwrap().len(), 3);
        assert_eq!(first["matched_skills"][1], "sql");
        assert_eq!(first["component_scores"]["semantic_score"], 0.5);
    }
}
