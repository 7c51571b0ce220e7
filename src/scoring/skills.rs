// Skill overlap between the job's required skills and a candidate's skills.
//
//   score = |required ∩ candidate| / |required|
//
// Both sides go through `normalize_skill` first, so comparison is
// case-insensitive, whitespace-insensitive and synonym-aware. A job with no
// required skills does not penalise anyone.

use std::collections::BTreeSet;

use crate::profile::skills::normalize_skill_set;

/// Fraction of required skills the candidate has, in [0, 1].
pub fn skill_score<R, C>(required: R, candidate: C) -> f64
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let required = normalize_skill_set(required);
    if required.is_empty() {
        return 1.0;
    }
    let candidate = normalize_skill_set(candidate);
    let matched = required.intersection(&candidate).count();

    (matched as f64 / required.len() as f64).clamp(0.0, 1.0)
}

/// The required skills the candidate has, in canonical form.
pub fn matched_skills<R, C>(required: R, candidate: C) -> BTreeSet<String>
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let required = normalize_skill_set(required);
    let candidate = normalize_skill_set(candidate);
    required.intersection(&candidate).cloned().collect()
}
