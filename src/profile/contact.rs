// Email and phone extraction via pattern matching over the full text.
//
// First valid match wins. Phone candidates are filtered so that date ranges
// such as "2015 - 2019" and short numbers are not mistaken for phone numbers.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::traits::FieldExtractor;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s\-.]?)?(?:\(?\d{2,4}\)?[\s\-.]?){1,3}\d{3,4}")
        .expect("valid regex")
});

static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:19|20)\d{2}\s*[\-.]?\s*(?:19|20)\d{2}$").expect("valid regex")
});

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Option<String> {
        EMAIL_RE
            .find(text)
            .map(|m| m.as_str().trim_end_matches('.').to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Option<String> {
        PHONE_RE
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .find(|candidate| is_plausible_phone(candidate))
            .map(|candidate| candidate.split_whitespace().collect::<String>())
    }
}

fn is_plausible_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) && !YEAR_RANGE_RE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_first_match() {
        let text = "Contact: jane.doe@example.com or jdoe@work.org.";
        assert_eq!(
            EmailExtractor.extract(text).as_deref(),
            Some("jane.doe@example.com")
        );
    }

    #[test]
    fn test_email_absent() {
        assert_eq!(EmailExtractor.extract("no contact details here"), None);
    }

    #[test]
    fn test_phone_with_country_code() {
        let phone = PhoneExtractor.extract("Phone: +1 415 555 0132\nEmail: a@b.io");
        assert_eq!(phone.as_deref(), Some("+14155550132"));
    }

    #[test]
    fn test_phone_skips_year_ranges() {
        let text = "Acme Corp 2015-2019\nTel: (020) 7946 0958";
        let phone = PhoneExtractor.extract(text);
        assert_eq!(phone.as_deref(), Some("(020)79460958"));
    }

    #[test]
    fn test_phone_absent() {
        assert_eq!(PhoneExtractor.extract("Graduated 2019"), None);
    }
}
