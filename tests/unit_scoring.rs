// Unit tests for scoring and output functions.
//
// Tests isolated pure functions: weight validation boundaries, the skill and
// experience matchers, cosine flooring, ranking order, and the CSV/JSON
// export shape.

use std::sync::Arc;

use resume_ranker::embeddings::HashedEmbedder;
use resume_ranker::output::export::{csv_escape, to_csv, CSV_HEADER};
use resume_ranker::output::{top_n, truncate_chars};
use resume_ranker::profile::CandidateProfile;
use resume_ranker::requirements::{JobRequirements, ScoringWeights};
use resume_ranker::scoring::experience::experience_score;
use resume_ranker::scoring::ranker::rank;
use resume_ranker::scoring::semantic::cosine_similarity;
use resume_ranker::scoring::skills::skill_score;
use resume_ranker::scoring::{ComponentScores, ScoredCandidate, Scorer, SemanticSimilarityScorer};
use resume_ranker::RankError;

fn weights(skill: f64, experience: f64, semantic: f64) -> ScoringWeights {
    ScoringWeights {
        skill,
        experience,
        semantic,
    }
}

fn semantic() -> SemanticSimilarityScorer {
    SemanticSimilarityScorer::new(Arc::new(HashedEmbedder::default()))
}

fn scored(filename: &str, total: f64) -> ScoredCandidate {
    ScoredCandidate {
        profile: CandidateProfile::empty(filename, ""),
        component_scores: ComponentScores {
            skill_score: total,
            experience_score: total,
            semantic_score: total,
        },
        total_score: total,
        matched_skills: Default::default(),
    }
}

// ============================================================
// Scorer::configure — weight tolerance
// ============================================================

#[test]
fn configure_accepts_exact_sum() {
    assert!(Scorer::configure(weights(0.5, 0.3, 0.2), semantic()).is_ok());
}

#[test]
fn configure_rejects_sum_outside_tolerance() {
    let err = Scorer::configure(weights(0.5, 0.3, 0.3), semantic()).err();
    assert!(matches!(err, Some(RankError::Configuration(_))));
}

#[test]
fn configure_accepts_within_tolerance() {
    assert!(Scorer::configure(weights(0.5, 0.3, 0.209), semantic()).is_ok());
    assert!(Scorer::configure(weights(0.5, 0.3, 0.191), semantic()).is_ok());
}

#[test]
fn configure_rejects_just_outside_tolerance() {
    assert!(Scorer::configure(weights(0.5, 0.3, 0.212), semantic()).is_err());
    assert!(Scorer::configure(weights(0.5, 0.3, 0.188), semantic()).is_err());
}

#[test]
fn configure_rejects_nan() {
    assert!(Scorer::configure(weights(f64::NAN, 0.5, 0.5), semantic()).is_err());
}

#[test]
fn total_stays_in_unit_interval() {
    let scorer = Scorer::configure(weights(0.2, 0.3, 0.5), semantic()).unwrap();
    for s in [0.0, 0.25, 0.5, 1.0] {
        for e in [0.0, 0.5, 1.0] {
            for m in [0.0, 0.3, 1.0] {
                let total = scorer.combine(&ComponentScores {
                    skill_score: s,
                    experience_score: e,
                    semantic_score: m,
                });
                assert!((0.0..=1.0).contains(&total), "{s} {e} {m} -> {total}");
            }
        }
    }
}

// ============================================================
// Matchers
// ============================================================

#[test]
fn skill_match_is_case_insensitive() {
    let score = skill_score(["python", "sql"], ["Python", "Java"]);
    assert!((score - 0.5).abs() < 1e-12);
}

#[test]
fn skill_match_empty_required_is_one() {
    let none: Vec<String> = Vec::new();
    assert_eq!(skill_score(&none, ["anything"]), 1.0);
}

#[test]
fn experience_partial_and_clamped() {
    assert!((experience_score(5.0, Some(3.0)) - 0.6).abs() < 1e-12);
    assert_eq!(experience_score(5.0, Some(10.0)), 1.0);
    assert_eq!(experience_score(5.0, None), 0.0);
}

#[test]
fn cosine_negative_is_floored() {
    assert_eq!(cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]), 0.0);
}

// ============================================================
// Ranker
// ============================================================

#[test]
fn ranker_tie_breaks_on_filename() {
    let ranked = rank(vec![scored("b.txt", 0.75), scored("a.txt", 0.75)]);
    let names: Vec<&str> = ranked.iter().map(|c| c.filename()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[test]
fn top_n_does_not_touch_ranking() {
    let ranked = rank(vec![scored("a", 0.1), scored("b", 0.9), scored("c", 0.5)]);
    let top = top_n(&ranked, Some(1));
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].filename(), "b");
    assert_eq!(ranked.len(), 3);
}

// ============================================================
// Requirements boundary
// ============================================================

#[test]
fn requirements_missing_weights_is_configuration_error() {
    let err = JobRequirements::from_json(r#"{"required_skills": ["python"]}"#).unwrap_err();
    assert!(matches!(err, RankError::Configuration(_)));
}

#[test]
fn requirements_bad_weights_rejected_at_load() {
    let json = r#"{"weights": {"skill": 0.9, "experience": 0.9, "semantic": 0.9}}"#;
    assert!(JobRequirements::from_json(json).is_err());
}

// ============================================================
// Export
// ============================================================

#[test]
fn csv_header_is_exact() {
    assert_eq!(
        CSV_HEADER,
        "rank,filename,name,email,phone,experience_years,education,score,matched_skills,summary"
    );
    assert!(to_csv(&[]).starts_with(CSV_HEADER));
}

#[test]
fn csv_quotes_only_when_needed() {
    assert_eq!(csv_escape("Jane Doe"), "Jane Doe");
    assert_eq!(csv_escape("Doe, Jane"), "\"Doe, Jane\"");
    assert_eq!(csv_escape("\"J\""), "\"\"\"J\"\"\"");
}

#[test]
fn csv_ranks_are_positions() {
    let ranked = rank(vec![scored("x.txt", 0.2), scored("y.txt", 0.8)]);
    let csv = to_csv(&ranked);
    let rows: Vec<&str> = csv.split("\r\n").filter(|r| !r.is_empty()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("1,y.txt,"));
    assert!(rows[2].starts_with("2,x.txt,"));
    assert!(rows[1].contains(",0.8000,"));
}

#[test]
fn truncate_chars_respects_utf8() {
    assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語...");
}
