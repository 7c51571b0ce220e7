// Years-of-experience adequacy.
//
//   score = min(1, candidate_years / min_years_required)
//
// Jobs without a minimum score everyone 1.0. Unknown experience counts as
// zero years rather than an error.

/// Experience score in [0, 1]; monotonic non-decreasing in `candidate_years`.
pub fn experience_score(min_years_required: f64, candidate_years: Option<f64>) -> f64 {
    if min_years_required.is_nan() || min_years_required <= 0.0 {
        return 1.0;
    }
    let years = candidate_years
        .filter(|y| y.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    (years / min_years_required).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_experience() {
        assert!((experience_score(5.0, Some(3.0)) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_surplus_is_clamped() {
        assert_eq!(experience_score(5.0, Some(10.0)), 1.0);
    }

    #[test]
    fn test_no_minimum() {
        assert_eq!(experience_score(0.0, None), 1.0);
        assert_eq!(experience_score(-2.0, Some(1.0)), 1.0);
    }

    #[test]
    fn test_unknown_is_zero() {
        assert_eq!(experience_score(2.0, None), 0.0);
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0.0;
        for tenths in 0..120 {
            let s = experience_score(4.0, Some(tenths as f64 / 10.0));
            assert!(s >= last);
            last = s;
        }
    }
}
