//! Month grids: the moods recorded on each day of one calendar month.

use crate::dates::get_dates_in_range;
use crate::mood::Mood;
use crate::query::TimeWindow;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// In storage order; empty when nothing was recorded that day.
    pub moods: Vec<Mood>,
}

impl CalendarDay {
    pub fn has_entries(&self) -> bool {
        !self.moods.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCalendar {
    /// Every day of the month, first to last.
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// The month containing `reference`, with `moods_on` asked once per day.
    pub fn build(reference: NaiveDate, moods_on: impl Fn(NaiveDate) -> Vec<Mood>) -> Option<Self> {
        let (first, last) = TimeWindow::Month.bounds(reference)?;
        let days = get_dates_in_range(first, last)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                moods: moods_on(date),
            })
            .collect();
        Some(Self { days })
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    /// Rows of seven cells, Sunday first. Cells outside the month are `None`.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let lead = self
            .first_day()
            .map_or(0, |d| d.weekday().num_days_from_sunday() as usize);
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; lead];
        cells.extend(self.days.iter().map(Some));
        cells.resize(cells.len().div_ceil(7) * 7, None);
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }

    pub fn days_with_entries(&self) -> usize {
        self.days.iter().filter(|d| d.has_entries()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn august() -> MonthCalendar {
        MonthCalendar::build(d(2025, 8, 20), |day| match day.day() {
            1 => vec![Mood::Happy],
            15 => vec![Mood::Sad, Mood::Tired],
            _ => Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn covers_the_whole_month() {
        let calendar = august();
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.first_day(), Some(d(2025, 8, 1)));
        assert_eq!(calendar.days[14].moods, vec![Mood::Sad, Mood::Tired]);
        assert_eq!(calendar.days_with_entries(), 2);
    }

    #[test]
    fn weeks_start_on_sunday() {
        let calendar = august();
        let weeks = calendar.weeks();
        // Aug 1 2025 is a Friday, Aug 31 a Sunday.
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert!(weeks[0][..5].iter().all(Option::is_none));
        assert_eq!(weeks[0][5].map(|c| c.date), Some(d(2025, 8, 1)));
        assert_eq!(weeks[5][0].map(|c| c.date), Some(d(2025, 8, 31)));
        assert!(weeks[5][1..].iter().all(Option::is_none));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_blanks() {
        // June 2025 starts on a Sunday and has 30 days.
        let calendar = MonthCalendar::build(d(2025, 6, 3), |_| Vec::new()).unwrap();
        let weeks = calendar.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0].map(|c| c.date), Some(d(2025, 6, 1)));
        assert_eq!(calendar.days_with_entries(), 0);
    }

    #[test]
    fn leap_february() {
        let calendar = MonthCalendar::build(d(2024, 2, 10), |_| Vec::new()).unwrap();
        assert_eq!(calendar.days.len(), 29);
    }
}
