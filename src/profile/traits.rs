// Field extractor trait — one narrow interface per resume heuristic.
//
// Name, contact, skills, education, experience and summary extraction are
// all best-effort and format dependent. Each lives behind this trait so a
// single heuristic can be replaced or tested without touching the others.

/// Derives one profile field from raw resume text.
///
/// Implementations never fail: a field that cannot be derived is reported
/// through an empty `Output` (`None`, an empty set, an empty list).
pub trait FieldExtractor: Send + Sync {
    type Output;

    fn extract(&self, text: &str) -> Self::Output;
}
