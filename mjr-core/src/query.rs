//! Filtering entries by date, mood, note text and time window.

use crate::dates::{DateFilter, end_of_month, end_of_week, start_of_month, start_of_week};
use crate::entry::MoodEntry;
use crate::mood::Mood;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Selection applied before aggregation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, EnumIter, AsRefStr, Display, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Sunday through Saturday around the reference date.
    #[default]
    Week,
    /// The calendar month of the reference date.
    Month,
    All,
}

impl TimeWindow {
    /// Inclusive day bounds, `None` for [`TimeWindow::All`].
    pub fn bounds(self, reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            TimeWindow::Week => Some((start_of_week(reference), end_of_week(reference))),
            TimeWindow::Month => Some((start_of_month(reference)?, end_of_month(reference)?)),
            TimeWindow::All => None,
        }
    }

    pub fn contains(self, reference: NaiveDate, day: NaiveDate) -> bool {
        match self.bounds(reference) {
            Some((start, end)) => start <= day && day <= end,
            None => true,
        }
    }

    /// How many days back the trend series reaches.
    pub fn trend_span_days(self) -> i64 {
        match self {
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::All => 90,
        }
    }
}

/// Criteria for selecting entries. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct EntryQuery<'a> {
    pub dates: Option<DateFilter>,
    pub mood: Option<Mood>,
    /// Case-insensitive substring of the note.
    pub search: Option<&'a str>,
    pub window: Option<TimeWindow>,
    /// "Today" for the window; defaults to the local date.
    pub reference_date: Option<NaiveDate>,
}

impl EntryQuery<'_> {
    pub fn matches(&self, entry: &MoodEntry) -> bool {
        let day = entry.day();
        if let Some(dates) = self.dates {
            if !dates.contains(day) {
                return false;
            }
        }
        if let Some(window) = self.window {
            let reference = self
                .reference_date
                .unwrap_or_else(|| Local::now().date_naive());
            if !window.contains(reference, day) {
                return false;
            }
        }
        if let Some(mood) = self.mood {
            if entry.mood != mood {
                return false;
            }
        }
        match self.search.map(str::trim) {
            Some(term) if !term.is_empty() => entry
                .note
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }

    /// Matching entries, in the order given.
    pub fn apply<'e>(&self, entries: &'e [MoodEntry]) -> Vec<&'e MoodEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::entry;
    use std::str::FromStr;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<MoodEntry> {
        vec![
            entry("2025-08-10T09:00:00Z", Mood::Happy, "Beach day with friends", Some(28.0)),
            entry("2025-08-17T09:00:00Z", Mood::Sad, "rainy and slow", None),
            entry("2025-08-20T09:00:00Z", Mood::Happy, "Finished the BOOK", None),
            entry("2025-08-23T21:00:00Z", Mood::Tired, "late night", None),
            entry("2025-07-31T09:00:00Z", Mood::Angry, "traffic", None),
        ]
    }

    fn notes(found: Vec<&MoodEntry>) -> Vec<&str> {
        found.into_iter().map(|e| e.note.as_str()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let entries = sample();
        assert_eq!(EntryQuery::default().apply(&entries).len(), 5);
    }

    #[test]
    fn week_window_is_sunday_to_saturday() {
        let entries = sample();
        let q = EntryQuery {
            window: Some(TimeWindow::Week),
            reference_date: Some(d(2025, 8, 20)),
            ..Default::default()
        };
        assert_eq!(
            notes(q.apply(&entries)),
            vec!["rainy and slow", "Finished the BOOK", "late night"]
        );
    }

    #[test]
    fn month_window_excludes_other_months() {
        let entries = sample();
        let q = EntryQuery {
            window: Some(TimeWindow::Month),
            reference_date: Some(d(2025, 8, 20)),
            ..Default::default()
        };
        assert_eq!(q.apply(&entries).len(), 4);
    }

    #[test]
    fn mood_and_search_combine() {
        let entries = sample();
        let q = EntryQuery {
            mood: Some(Mood::Happy),
            search: Some("book"),
            ..Default::default()
        };
        assert_eq!(notes(q.apply(&entries)), vec!["Finished the BOOK"]);

        let blank = EntryQuery {
            search: Some("   "),
            ..Default::default()
        };
        assert_eq!(blank.apply(&entries).len(), 5);
    }

    #[test]
    fn single_day_filter() {
        let entries = sample();
        let q = EntryQuery {
            dates: Some(DateFilter::Single(d(2025, 8, 10))),
            ..Default::default()
        };
        assert_eq!(notes(q.apply(&entries)), vec!["Beach day with friends"]);
    }

    #[test]
    fn window_parses_from_text() {
        assert_eq!(TimeWindow::from_str("Month").unwrap(), TimeWindow::Month);
        assert_eq!(TimeWindow::All.to_string(), "all");
        assert_eq!(TimeWindow::All.bounds(d(2025, 8, 20)), None);
        assert_eq!(TimeWindow::Month.trend_span_days(), 30);
    }
}
