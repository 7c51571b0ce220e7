// Colored terminal output for rankings, profiles and run warnings.
//
// main.rs display paths delegate here. Nothing in this module changes the
// ranking; it only renders a slice of it.

use colored::Colorize;

use crate::error::PipelineWarning;
use crate::profile::CandidateProfile;
use crate::requirements::JobRequirements;
use crate::scoring::ScoredCandidate;

/// Display a ranked candidate table.
pub fn display_ranking(ranked: &[ScoredCandidate], total_candidates: usize) {
    if ranked.is_empty() {
        println!("No resumes ranked. Put .txt resumes in the resumes directory.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Ranking (top {} of {} candidates) ===",
            ranked.len(),
            total_candidates
        )
        .bold()
    );
    println!();

    println!(
        "  {:>4}  {:<28} {:<24} {:>6}  {:>5}  {:>5}  {:>5}  {}",
        "Rank".dimmed(),
        "File".dimmed(),
        "Name".dimmed(),
        "Score".dimmed(),
        "Skill".dimmed(),
        "Exp".dimmed(),
        "Sem".dimmed(),
        "Matched".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for (i, c) in ranked.iter().enumerate() {
        let scores = &c.component_scores;
        let name = c.profile.name.as_deref().unwrap_or("-");
        let matched: Vec<&str> = c.matched_skills.iter().map(String::as_str).collect();

        println!(
            "  {:>4}. {:<28} {:<24} {}  {:>5.2}  {:>5.2}  {:>5.2}  {}",
            i + 1,
            super::truncate_chars(&c.profile.filename, 25),
            super::truncate_chars(name, 21),
            colorize_score(c.total_score),
            scores.skill_score,
            scores.experience_score,
            scores.semantic_score,
            matched.join(", ").cyan(),
        );
    }
    println!();
}

/// Display every extracted field of one profile.
pub fn display_profile(profile: &CandidateProfile) {
    println!(
        "\n{}",
        format!("=== Profile for {} ===", profile.filename).bold()
    );

    let missing = || "(not found)".dimmed().to_string();
    println!(
        "  Name:       {}",
        profile.name.clone().unwrap_or_else(missing)
    );
    println!(
        "  Email:      {}",
        profile.email.clone().unwrap_or_else(missing)
    );
    println!(
        "  Phone:      {}",
        profile.phone.clone().unwrap_or_else(missing)
    );
    println!(
        "  Experience: {}",
        profile
            .experience_years
            .map(|y| format!("{y:.1} years"))
            .unwrap_or_else(missing)
    );

    if profile.skills.is_empty() {
        println!("  Skills:     {}", missing());
    } else {
        let skills: Vec<&str> = profile.skills.iter().map(String::as_str).collect();
        println!("  Skills:     {}", skills.join(", ").cyan());
    }

    if profile.education.is_empty() {
        println!("  Education:  {}", missing());
    } else {
        println!("  Education:");
        for entry in &profile.education {
            println!("    - {entry}");
        }
    }

    if let Some(summary) = &profile.summary {
        println!("\n  Summary:");
        println!("    {}", super::truncate_chars(summary, 400).dimmed());
    }
}

/// Display validated requirements.
pub fn display_requirements(requirements: &JobRequirements) {
    println!("{}", "Requirements are valid.".green().bold());
    let skills: Vec<&str> = requirements
        .required_skills
        .iter()
        .map(String::as_str)
        .collect();
    println!(
        "  Required skills: {}",
        if skills.is_empty() {
            "(none)".to_string()
        } else {
            skills.join(", ")
        }
    );
    println!(
        "  Minimum experience: {:.1} years",
        requirements.min_experience_years
    );
    let w = &requirements.weights;
    println!(
        "  Weights: skill {:.2}  experience {:.2}  semantic {:.2}",
        w.skill, w.experience, w.semantic
    );
    if !requirements.description.is_empty() {
        println!(
            "  Description: {}",
            super::truncate_chars(&requirements.description, 120).dimmed()
        );
    }
}

/// Summarize run warnings. Embedding failures are called out as a partial run.
pub fn display_warnings(warnings: &[PipelineWarning], partial: bool) {
    if warnings.is_empty() {
        return;
    }

    if partial {
        println!(
            "  {} semantic scoring was unavailable for some candidates; results are partial",
            "!".yellow().bold()
        );
    }

    let extraction = warnings
        .iter()
        .filter(|w| matches!(w, PipelineWarning::Extraction { .. }))
        .count();
    if extraction > 0 {
        println!(
            "  {} {} fields could not be extracted (run with RUST_LOG=resume_ranker=debug for details)",
            "~".yellow(),
            extraction
        );
    }

    for w in warnings.iter().filter(|w| w.is_partial()) {
        println!("    {}", w.to_string().dimmed());
    }
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:>6.3}");
    if score >= 0.75 {
        text.green().bold()
    } else if score >= 0.5 {
        text.green()
    } else if score >= 0.25 {
        text.yellow()
    } else {
        text.dimmed()
    }
}
