// Feature extraction — raw resume text to a structured CandidateProfile.
//
// Every field heuristic lives in its own submodule behind the
// `FieldExtractor` trait. `FeatureExtractor` composes them and never fails:
// anything it cannot derive is left empty/unknown on the profile.

pub mod contact;
pub mod education;
pub mod experience;
pub mod name;
pub mod skills;
pub mod summary;
pub mod traits;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineWarning, ProfileField};
use contact::{EmailExtractor, PhoneExtractor};
use education::EducationExtractor;
use experience::ExperienceExtractor;
use name::NameExtractor;
use skills::SkillExtractor;
use summary::SummaryExtractor;
use traits::FieldExtractor;

/// Headings that open a resume section. Compared case-insensitively with a
/// trailing colon ignored.
const SECTION_HEADINGS: &[&str] = &[
    "RESUME",
    "CURRICULUM VITAE",
    "CV",
    "SUMMARY",
    "PROFESSIONAL SUMMARY",
    "PROFILE",
    "OBJECTIVE",
    "ABOUT ME",
    "CONTACT",
    "SKILLS",
    "TECHNICAL SKILLS",
    "CORE SKILLS",
    "KEY SKILLS",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "EMPLOYMENT",
    "EMPLOYMENT HISTORY",
    "WORK HISTORY",
    "CAREER HISTORY",
    "EDUCATION",
    "PROJECTS",
    "CERTIFICATIONS",
    "AWARDS",
    "PUBLICATIONS",
    "LANGUAGES",
    "INTERESTS",
    "REFERENCES",
];

/// Whether a line is a bare section heading such as "EXPERIENCE" or "Skills:".
pub fn is_section_heading(line: &str) -> bool {
    let heading = line.trim().trim_end_matches(':').trim().to_uppercase();
    SECTION_HEADINGS.contains(&heading.as_str())
}

/// Structured fields derived from one resume. Immutable once extracted.
///
/// Optional fields use `None` for "could not be derived"; `experience_years`
/// of `None` means unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub filename: String,
    #[serde(skip_serializing, default)]
    pub raw_text: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Canonical skills: the SKILLS section entries plus vocabulary terms
    /// found anywhere in the text
    pub skills: BTreeSet<String>,
    /// Education entries in order of appearance
    pub education: Vec<String>,
    pub experience_years: Option<f64>,
    pub summary: Option<String>,
}

impl CandidateProfile {
    /// A profile with nothing extracted, for callers that need a placeholder.
    pub fn empty(filename: &str, raw_text: &str) -> Self {
        Self {
            filename: filename.to_string(),
            raw_text: raw_text.to_string(),
            name: None,
            email: None,
            phone: None,
            skills: BTreeSet::new(),
            education: Vec::new(),
            experience_years: None,
            summary: None,
        }
    }

    /// Fields that could not be derived from the text.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(ProfileField::Name);
        }
        if self.email.is_none() {
            missing.push(ProfileField::Email);
        }
        if self.phone.is_none() {
            missing.push(ProfileField::Phone);
        }
        if self.experience_years.is_none() {
            missing.push(ProfileField::ExperienceYears);
        }
        if self.education.is_empty() {
            missing.push(ProfileField::Education);
        }
        missing
    }

    /// One extraction warning per missing field.
    pub fn extraction_warnings(&self) -> Vec<PipelineWarning> {
        self.missing_fields()
            .into_iter()
            .map(|field| PipelineWarning::Extraction {
                filename: self.filename.clone(),
                field,
            })
            .collect()
    }
}

type Boxed<T> = Box<dyn FieldExtractor<Output = T>>;

/// Composes the per-field heuristics into a full profile.
///
/// Each heuristic can be swapped with the `with_*` builders.
pub struct FeatureExtractor {
    name: Boxed<Option<String>>,
    email: Boxed<Option<String>>,
    phone: Boxed<Option<String>>,
    skills: Boxed<BTreeSet<String>>,
    education: Boxed<Vec<String>>,
    experience: Boxed<Option<f64>>,
    summary: Boxed<Option<String>>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            name: Box::new(NameExtractor::default()),
            email: Box::new(EmailExtractor),
            phone: Box::new(PhoneExtractor),
            skills: Box::new(SkillExtractor::default()),
            education: Box::new(EducationExtractor),
            experience: Box::new(ExperienceExtractor::default()),
            summary: Box::new(SummaryExtractor::default()),
        }
    }
}

impl FeatureExtractor {
    pub fn with_name(mut self, e: impl FieldExtractor<Output = Option<String>> + 'static) -> Self {
        self.name = Box::new(e);
        self
    }

    pub fn with_email(mut self, e: impl FieldExtractor<Output = Option<String>> + 'static) -> Self {
        self.email = Box::new(e);
        self
    }

    pub fn with_phone(mut self, e: impl FieldExtractor<Output = Option<String>> + 'static) -> Self {
        self.phone = Box::new(e);
        self
    }

    pub fn with_skills(
        mut self,
        e: impl FieldExtractor<Output = BTreeSet<String>> + 'static,
    ) -> Self {
        self.skills = Box::new(e);
        self
    }

    pub fn with_education(mut self, e: impl FieldExtractor<Output = Vec<String>> + 'static) -> Self {
        self.education = Box::new(e);
        self
    }

    pub fn with_experience(mut self, e: impl FieldExtractor<Output = Option<f64>> + 'static) -> Self {
        self.experience = Box::new(e);
        self
    }

    pub fn with_summary(mut self, e: impl FieldExtractor<Output = Option<String>> + 'static) -> Self {
        self.summary = Box::new(e);
        self
    }

    /// Derive a profile from raw text. Never fails.
    pub fn extract(&self, filename: &str, raw_text: &str) -> CandidateProfile {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let profile = CandidateProfile {
            filename: filename.to_string(),
            raw_text: raw_text.to_string(),
            name: non_blank(self.name.extract(raw_text)),
            email: non_blank(self.email.extract(raw_text)),
            phone: non_blank(self.phone.extract(raw_text)),
            skills: self.skills.extract(raw_text),
            education: self.education.extract(raw_text),
            experience_years: self
                .experience
                .extract(raw_text)
                .filter(|y| y.is_finite() && *y >= 0.0),
            summary: non_blank(self.summary.extract(raw_text)),
        };

        debug!(
            filename,
            skills = profile.skills.len(),
            education = profile.education.len(),
            experience = ?profile.experience_years,
            "Extracted candidate profile"
        );

        profile
    }
}
