use crate::keywords::{DateKeyword, Keywords};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Accepted input date formats when the config does not name any.
pub const DEFAULT_INPUT_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];

/// A single day or an inclusive range of days.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DateFilter {
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn contains(&self, day: NaiveDate) -> bool {
        match *self {
            DateFilter::Single(d) => d == day,
            DateFilter::Range(start, end) => start <= day && day <= end,
        }
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            DateFilter::Single(d) => (d, d),
            DateFilter::Range(start, end) => (start, end),
        }
    }
}

/// Options for [`parse_date_token`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// The date to use as "today" for relative keywords.
    pub reference_date: Option<NaiveDate>,
    /// `chrono` format strings tried in order for explicit dates.
    pub formats: Option<&'a [&'a str]>,
    pub keywords: Option<&'a Keywords>,
}

/// Resolves a start (and optional end) token into a [`DateFilter`].
///
/// - A keyword that names a range (`this week`, `last month`...) always wins.
/// - Two single days become a range, earliest first.
/// - One single day stays single.
///
/// Returns `None` when the start token is not understood.
pub fn parse_date_token(
    start: &str,
    end: Option<&str>,
    options: Option<ParseOptions>,
) -> Option<DateFilter> {
    let options = options.unwrap_or_default();
    let reference = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let formats = options.formats.unwrap_or(DEFAULT_INPUT_FORMATS);
    let default_keywords = Keywords::default();
    let keywords = options.keywords.unwrap_or(&default_keywords);

    let a = resolve_date_token(start, reference, formats, keywords)?;
    let b = end.and_then(|token| resolve_date_token(token, reference, formats, keywords));

    match (a, b) {
        (DateFilter::Range(s, e), _) => Some(DateFilter::Range(s, e)),
        (DateFilter::Single(_), Some(DateFilter::Range(s, e))) => Some(DateFilter::Range(s, e)),
        (DateFilter::Single(x), Some(DateFilter::Single(y))) => {
            Some(DateFilter::Range(x.min(y), x.max(y)))
        }
        (DateFilter::Single(x), None) => Some(DateFilter::Single(x)),
    }
}

fn resolve_date_token(
    token: &str,
    reference: NaiveDate,
    formats: &[&str],
    keywords: &Keywords,
) -> Option<DateFilter> {
    let Some(keyword) = keywords.resolve(token) else {
        return formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(token.trim(), fmt).ok())
            .map(DateFilter::Single);
    };

    let filter = match keyword {
        DateKeyword::Today => DateFilter::Single(reference),
        DateKeyword::Yesterday => DateFilter::Single(reference - Duration::days(1)),
        DateKeyword::Tomorrow => DateFilter::Single(reference + Duration::days(1)),
        DateKeyword::ThisWeek => DateFilter::Range(start_of_week(reference), end_of_week(reference)),
        DateKeyword::LastWeek => {
            let last = start_of_week(reference) - Duration::days(1);
            DateFilter::Range(start_of_week(last), last)
        }
        DateKeyword::ThisMonth => {
            DateFilter::Range(start_of_month(reference)?, end_of_month(reference)?)
        }
        DateKeyword::LastMonth => {
            let last = start_of_month(reference)? - Duration::days(1);
            DateFilter::Range(start_of_month(last)?, last)
        }
        DateKeyword::ThisYear => year_range(reference.year())?,
        DateKeyword::LastYear => year_range(reference.year() - 1)?,
        weekday => {
            let target = match weekday {
                DateKeyword::Monday => chrono::Weekday::Mon,
                DateKeyword::Tuesday => chrono::Weekday::Tue,
                DateKeyword::Wednesday => chrono::Weekday::Wed,
                DateKeyword::Thursday => chrono::Weekday::Thu,
                DateKeyword::Friday => chrono::Weekday::Fri,
                DateKeyword::Saturday => chrono::Weekday::Sat,
                _ => chrono::Weekday::Sun,
            };
            // Most recent such day, today included.
            let days_ago = (reference.weekday().num_days_from_monday() + 7
                - target.num_days_from_monday())
                % 7;
            DateFilter::Single(reference - Duration::days(days_ago as i64))
        }
    };
    Some(filter)
}

fn year_range(year: i32) -> Option<DateFilter> {
    Some(DateFilter::Range(
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Sunday on or before `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_sunday() as i64)
}

/// Saturday on or after `day`.
pub fn end_of_week(day: NaiveDate) -> NaiveDate {
    start_of_week(day) + Duration::days(6)
}

pub fn start_of_month(day: NaiveDate) -> Option<NaiveDate> {
    day.with_day(1)
}

pub fn end_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    Some(NaiveDate::from_ymd_opt(y, m, 1)? - Duration::days(1))
}

/// All dates from `start` to `end`, both inclusive. Empty if `start > end`.
///
/// ```
/// # use chrono::NaiveDate;
/// # use mjr_core::dates::get_dates_in_range;
/// let start = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
/// assert_eq!(get_dates_in_range(start, end).len(), 3);
/// ```
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn opts(anchor: NaiveDate) -> Option<ParseOptions<'static>> {
        Some(ParseOptions {
            reference_date: Some(anchor),
            ..Default::default()
        })
    }

    #[test]
    fn relative_days() {
        let anchor = d(2025, 8, 20); // Wednesday
        assert_eq!(
            parse_date_token("today", None, opts(anchor)),
            Some(DateFilter::Single(anchor))
        );
        assert_eq!(
            parse_date_token("Yesterday", None, opts(anchor)),
            Some(DateFilter::Single(d(2025, 8, 19)))
        );
        assert_eq!(
            parse_date_token("monday", None, opts(anchor)),
            Some(DateFilter::Single(d(2025, 8, 18)))
        );
        assert_eq!(
            parse_date_token("wednesday", None, opts(anchor)),
            Some(DateFilter::Single(anchor))
        );
    }

    #[test]
    fn weeks_run_sunday_to_saturday() {
        let anchor = d(2025, 8, 20);
        assert_eq!(
            parse_date_token("this week", None, opts(anchor)),
            Some(DateFilter::Range(d(2025, 8, 17), d(2025, 8, 23)))
        );
        assert_eq!(
            parse_date_token("last week", None, opts(anchor)),
            Some(DateFilter::Range(d(2025, 8, 10), d(2025, 8, 16)))
        );
    }

    #[test]
    fn month_and_year_ranges() {
        let anchor = d(2025, 12, 10);
        assert_eq!(
            parse_date_token("this month", None, opts(anchor)),
            Some(DateFilter::Range(d(2025, 12, 1), d(2025, 12, 31)))
        );
        assert_eq!(
            parse_date_token("last month", None, opts(anchor)),
            Some(DateFilter::Range(d(2025, 11, 1), d(2025, 11, 30)))
        );
        assert_eq!(
            parse_date_token("last year", None, opts(anchor)),
            Some(DateFilter::Range(d(2024, 1, 1), d(2024, 12, 31)))
        );
    }

    #[test]
    fn explicit_formats_and_two_singles_make_a_range() {
        let anchor = d(2025, 8, 20);
        assert_eq!(
            parse_date_token("15/08/2025", None, opts(anchor)),
            Some(DateFilter::Single(d(2025, 8, 15)))
        );
        assert_eq!(
            parse_date_token("2025-08-18", Some("01/08/2025"), opts(anchor)),
            Some(DateFilter::Range(d(2025, 8, 1), d(2025, 8, 18)))
        );
        assert_eq!(
            parse_date_token("yesterday", Some("last week"), opts(anchor)),
            Some(DateFilter::Range(d(2025, 8, 10), d(2025, 8, 16)))
        );
    }

    #[test]
    fn custom_formats_and_synonyms() {
        let formats: &[&str] = &["%d-%m-%Y"];
        let mut pairs = HashMap::new();
        pairs.insert("ayer".to_string(), "yesterday".to_string());
        let keywords = Keywords::with_synonyms(&pairs);
        let options = Some(ParseOptions {
            reference_date: Some(d(2025, 8, 20)),
            formats: Some(formats),
            keywords: Some(&keywords),
        });
        assert_eq!(
            parse_date_token("01-08-2025", None, options),
            Some(DateFilter::Single(d(2025, 8, 1)))
        );
        assert_eq!(
            parse_date_token("ayer", None, options),
            Some(DateFilter::Single(d(2025, 8, 19)))
        );
        assert_eq!(parse_date_token("15/08/2025", None, options), None);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(parse_date_token("not-a-date", None, None), None);
    }

    #[test]
    fn range_helpers() {
        let days = get_dates_in_range(d(2025, 8, 30), d(2025, 9, 2));
        assert_eq!(days, vec![d(2025, 8, 30), d(2025, 8, 31), d(2025, 9, 1), d(2025, 9, 2)]);
        assert!(get_dates_in_range(d(2025, 9, 2), d(2025, 9, 1)).is_empty());
        assert!(DateFilter::Range(d(2025, 8, 1), d(2025, 8, 3)).contains(d(2025, 8, 3)));
        assert!(!DateFilter::Single(d(2025, 8, 1)).contains(d(2025, 8, 2)));
        assert_eq!(end_of_month(d(2024, 2, 10)), Some(d(2024, 2, 29)));
    }
}
