// Years-of-experience heuristic.
//
// Policy, in order of preference:
//   1. Explicit experience phrases ("5+ years of experience", "7 yrs
//      professional experience"): the largest N. A bare "N years" (an age,
//      a degree length) does not count, and the phrase must stay on one line.
//   2. Date ranges in the work-history section ("2015 - 2019",
//      "Jan 2018 – Present", "03/2017 - 06/2020"). Overlapping or touching
//      ranges are merged first, then the merged spans are summed, so two
//      concurrent jobs are not double counted and gaps are not counted.
//   3. Otherwise unknown (`None`).
//
// Open-ended ranges ("present", "current", "now") end at the reference date,
// which is today unless fixed for reproducible runs.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex_lite::{Captures, Regex};

use super::is_section_heading;
use super::traits::FieldExtractor;

static EXPLICIT_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}(?:\.\d+)?)[ \t]*\+?[ \t]*(?:years?|yrs?)'?(?:[ \t]+of)?(?:[ \t]+[a-z0-9+#.-]+){0,3}[ \t]+experience",
    )
    .expect("valid regex")
});

const MONTH: &str = r"(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+";

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(?:{MONTH})?(?:(\d{{1,2}})/)?((?:19|20)\d{{2}})\s*(?:-|–|—|to|until)\s*(?:(?:(?:{MONTH})?(?:(\d{{1,2}})/)?((?:19|20)\d{{2}}))|(present|current|now|today))\b"
    );
    Regex::new(&pattern).expect("valid regex")
});

const WORK_HEADINGS: &[&str] = &[
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "EMPLOYMENT",
    "EMPLOYMENT HISTORY",
    "WORK HISTORY",
    "CAREER HISTORY",
];

#[derive(Debug, Clone, Default)]
pub struct ExperienceExtractor {
    /// Date used for open-ended ranges; `None` means today
    pub reference_date: Option<NaiveDate>,
}

impl ExperienceExtractor {
    pub fn with_reference_date(date: NaiveDate) -> Self {
        Self {
            reference_date: Some(date),
        }
    }

    fn reference_month(&self) -> i32 {
        let date = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        month_index(date.year(), date.month())
    }
}

impl FieldExtractor for ExperienceExtractor {
    type Output = Option<f64>;

    fn extract(&self, text: &str) -> Option<f64> {
        if let Some(years) = explicit_years(text) {
            return Some(years);
        }

        let section = work_history_section(text).unwrap_or(text);
        let ranges = date_ranges(section, self.reference_month());
        if ranges.is_empty() {
            return None;
        }

        let months = merged_months(ranges);
        Some((months as f64 / 12.0 * 10.0).round() / 10.0)
    }
}

/// The largest N in an explicit "N years of experience" phrase.
fn explicit_years(text: &str) -> Option<f64> {
    EXPLICIT_YEARS_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1)?.as_str().parse::<f64>().ok())
        .filter(|years| years.is_finite())
        .fold(None, |best: Option<f64>, y| Some(best.map_or(y, |b| b.max(y))))
}

/// The lines between a work-history heading and the next section heading.
fn work_history_section(text: &str) -> Option<&str> {
    let mut offset = 0;
    let mut start = None;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        let heading = trimmed.trim_end_matches(':').to_uppercase();
        match start {
            None if WORK_HEADINGS.contains(&heading.as_str()) => start = Some(offset + line.len()),
            Some(s) if is_section_heading(trimmed) => return Some(&text[s..offset]),
            _ => {}
        }
        offset += line.len();
    }

    start.map(|s| &text[s..])
}

/// Detected ranges as half-open `[start, end)` month indexes.
fn date_ranges(text: &str, reference_month: i32) -> Vec<(i32, i32)> {
    DATE_RANGE_RE
        .captures_iter(text)
        .filter_map(|c| parse_range(&c, reference_month))
        .collect()
}

fn parse_range(c: &Captures<'_>, reference_month: i32) -> Option<(i32, i32)> {
    let start_year: i32 = c.get(3)?.as_str().parse().ok()?;
    let start_month = month_of(c.get(1).map(|m| m.as_str()), c.get(2).map(|m| m.as_str()));
    let start = month_index(start_year, start_month);

    let end = if c.get(7).is_some() {
        reference_month
    } else {
        let end_year: i32 = c.get(6)?.as_str().parse().ok()?;
        let end_month = month_of(c.get(4).map(|m| m.as_str()), c.get(5).map(|m| m.as_str()));
        month_index(end_year, end_month)
    };

    (end > start).then_some((start, end))
}

/// Month number from a month name or numeric prefix; January when absent.
fn month_of(name: Option<&str>, numeric: Option<&str>) -> u32 {
    if let Some(n) = numeric.and_then(|n| n.parse::<u32>().ok()) {
        if (1..=12).contains(&n) {
            return n;
        }
    }
    let Some(name) = name else {
        return 1;
    };
    let months = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let name = name.to_lowercase();
    months
        .iter()
        .position(|m| name.starts_with(m))
        .map(|i| i as u32 + 1)
        .unwrap_or(1)
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

/// Total months covered by the union of the ranges.
fn merged_months(mut ranges: Vec<(i32, i32)>) -> i32 {
    ranges.sort_unstable();

    let mut total = 0;
    let mut current: Option<(i32, i32)> = None;
    for (start, end) in ranges {
        current = match current {
            Some((cs, ce)) if start <= ce => Some((cs, ce.max(end))),
            Some((cs, ce)) => {
                total += ce - cs;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((cs, ce)) = current {
        total += ce - cs;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ExperienceExtractor {
        ExperienceExtractor::with_reference_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
    }

    #[test]
    fn test_explicit_phrase_preferred() {
        let text = "Engineer with 5+ years of experience.\nAcme 2001 - 2020";
        assert_eq!(extractor().extract(text), Some(5.0));
    }

    #[test]
    fn test_explicit_phrase_takes_maximum() {
        let text = "3 years of Python experience, 8 years of professional experience";
        assert_eq!(extractor().extract(text), Some(8.0));
    }

    #[test]
    fn test_age_is_not_experience() {
        let text = "Jane Doe\nAge: 29 years\nEXPERIENCE\nAcme Corp, 2020 - 2022\n";
        assert_eq!(extractor().extract(text), Some(2.0));
    }

    #[test]
    fn test_degree_length_is_not_experience() {
        let text = "EXPERIENCE\nAcme Corp, 2020 - 2022\n\
                    EDUCATION\nBachelor of Science, 4 years, State University";
        assert_eq!(extractor().extract(text), Some(2.0));
    }

    #[test]
    fn test_explicit_phrase_variants() {
        assert_eq!(extractor().extract("10 yrs industry experience"), Some(10.0));
        assert_eq!(extractor().extract("Over 4.5 years' experience in QA"), Some(4.5));
        assert_eq!(extractor().extract("7 years of hands-on backend experience"), Some(7.0));
    }

    #[test]
    fn test_year_only_range() {
        assert_eq!(extractor().extract("EXPERIENCE\nAcme Corp, 2015 - 2019"), Some(4.0));
    }

    #[test]
    fn test_overlapping_ranges_are_merged() {
        let text = "EXPERIENCE\nAcme 2010 - 2014\nSide gig 2012 - 2016\nGlobex 2018 - 2020\n";
        // union: 2010-2016 (6y) + 2018-2020 (2y)
        assert_eq!(extractor().extract(text), Some(8.0));
    }

    #[test]
    fn test_month_ranges_and_present() {
        let text = "WORK EXPERIENCE\nJan 2020 – Present: Staff Engineer\n03/2017 - 06/2019 Engineer";
        // Jan 2020..Jul 2024 = 54 months, Mar 2017..Jun 2019 = 27 months
        assert_eq!(extractor().extract(text), Some(6.8));
    }

    #[test]
    fn test_education_dates_outside_work_section_ignored() {
        let text = "EXPERIENCE\nAcme 2019 - 2021\nEDUCATION\nState University 2010 - 2014";
        assert_eq!(extractor().extract(text), Some(2.0));
    }

    #[test]
    fn test_unknown_when_no_signal() {
        assert_eq!(extractor().extract("Python developer. Loves tea."), None);
    }

    #[test]
    fn test_reversed_range_ignored() {
        assert_eq!(extractor().extract("EXPERIENCE\nAcme 2020 - 2018"), None);
    }
}
