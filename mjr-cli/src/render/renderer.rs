use super::theme::Theme;
use mjr_core::{
    MonthCalendar, MoodEntry, Statistics, TimeWindow,
    calendar::CalendarDay,
    mood::MAX_SCORE,
    stats::{MoodDistribution, TrendPoint},
    weather::WeatherReport,
};
use regex::Regex;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

const BAR_WIDTH: usize = 20;
const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Theme::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%a, %d %b %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
            if !md.ends_with('\n') {
                println!();
            }
        }
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    /// Problems that do not stop the command go to stderr.
    pub fn print_warning(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(Theme::WARNING));
        } else {
            eprintln!("warning: {message}");
        }
    }

    pub fn print_entry_line(&self, entry: &MoodEntry) {
        let mut date = entry.date.format("%Y-%m-%d").to_string();
        let mut time = entry.date.format("%H:%M").to_string();
        let mut mood = format!("{} {}", entry.mood.emoji(), entry.mood);
        let note = first_line(&entry.note);
        let weather = match &entry.weather {
            Some(w) => format!(" ({} {}, {}°)", w.condition.icon(), w.condition, w.temp),
            None => String::new(),
        };
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            time = time.with(Color::Blue).to_string();
            mood = mood.with(Theme::mood(entry.mood)).to_string();
        }
        println!("{} {} {} - {}{}", date, time, mood, note, weather);
    }

    /// Entries in the configured style. Occurrences of `search` are highlighted.
    pub fn print_entries(&self, entries: &[&MoodEntry], search: Option<&str>) {
        for (i, entry) in entries.iter().enumerate() {
            if self.opts.short_mode {
                self.print_entry_line(entry);
                continue;
            }
            let date = entry.date.format(&self.opts.date_format).to_string();
            let time = entry.date.format("%H:%M").to_string();
            let heading = format!("## {} {} · {} {}", entry.mood.emoji(), entry.mood, date, time);

            let mut md = format!("{heading}\n");
            let note = entry.note.trim_end();
            if !note.is_empty() {
                let note = match search {
                    Some(term) => highlight_term(note, term),
                    None => note.to_string(),
                };
                md.push_str(&format!("{note}\n"));
            }
            if let Some(w) = &entry.weather {
                md.push_str(&format!("*{} {}, {}°C*\n", w.condition.icon(), w.condition, w.temp));
            }
            self.print_md(&md);

            if i + 1 < entries.len() {
                println!();
            }
            self.print_md("---");
        }
    }

    pub fn print_statistics(&self, stats: &Statistics) {
        let title = match stats.window {
            TimeWindow::Week => "this week",
            TimeWindow::Month => "this month",
            TimeWindow::All => "all time",
        };
        let mut md = format!("# Mood statistics, {title}\n");
        md.push_str(&format!("{} entries.\n\n", stats.entry_count));
        md.push_str(&distribution_table(&stats.distribution));

        if !stats.weather.is_empty() {
            md.push_str("\n## Mood by weather\n");
            md.push_str("|:-|-:|:-|\n|**Weather**|**Entries**|**Moods**|\n|-|-|-|\n");
            for bucket in &stats.weather {
                let moods = bucket
                    .moods
                    .iter()
                    .filter(|(_, n)| **n > 0)
                    .map(|(mood, n)| format!("{} {n}", mood.emoji()))
                    .collect::<Vec<_>>()
                    .join(" ");
                md.push_str(&format!(
                    "|{} {}|{}|{}|\n",
                    bucket.condition.icon(),
                    bucket.condition,
                    bucket.count,
                    moods
                ));
            }
            md.push_str("|-|\n");
        }

        if !stats.temperature.is_empty() {
            md.push_str("\n## Average temperature\n");
            md.push_str("|:-|-:|-:|\n|**Mood**|**°C**|**Samples**|\n|-|-|-|\n");
            for t in &stats.temperature {
                md.push_str(&format!(
                    "|{} {}|{:.1}|{}|\n",
                    t.mood.emoji(),
                    t.mood,
                    t.average,
                    t.samples
                ));
            }
            md.push_str("|-|\n");
        }

        md.push_str("\n## Trend\n");
        if stats.trend.is_empty() {
            md.push_str("No entries in this period.\n");
        } else {
            md.push_str(&trend_lines(&stats.trend));
        }
        self.print_md(&md);
    }

    /// A Sunday-first month grid with the mood emoji of each day.
    pub fn print_calendar(&self, calendar: &MonthCalendar) {
        let Some(first) = calendar.first_day() else {
            return;
        };
        self.print_md(&format!("# {}\n", first.format("%B %Y")));
        for line in calendar_lines(calendar, self.opts.use_color) {
            println!("{line}");
        }
        println!();
        match calendar.days_with_entries() {
            0 => self.print_info("No entries this month."),
            1 => self.print_info("1 day with entries."),
            n => self.print_info(&format!("{n} days with entries.")),
        }
    }

    pub fn print_weather(&self, report: &WeatherReport) {
        let place = report
            .location
            .as_deref()
            .map(|l| format!(" in {l}"))
            .unwrap_or_default();
        self.print_info(&format!(
            "{} {:.0}°, {}{}",
            report.condition.icon(),
            report.temp,
            report.description,
            place
        ));
    }
}

fn distribution_table(distribution: &MoodDistribution) -> String {
    let mut md = String::from("|:-|-:|-:|:-|\n|**Mood**|**Entries**|**Share**||\n|-|-|-|-|\n");
    for row in &distribution.counts {
        md.push_str(&format!(
            "|{} {}|{}|{:.1}%|{}|\n",
            row.mood.emoji(),
            row.mood,
            row.count,
            row.percentage,
            bar(row.percentage / 100.0)
        ));
    }
    md.push_str("|-|\n");
    md
}

fn trend_lines(trend: &[TrendPoint]) -> String {
    let max_score = f64::from(MAX_SCORE);
    trend
        .iter()
        .map(|p| {
            format!(
                "* {} {:.1} `{}`\n",
                p.date.format("%a %d %b"),
                p.score,
                bar(p.score / max_score)
            )
        })
        .collect()
}

/// Each cell is the day number plus the emoji of its latest mood, or blanks.
fn calendar_lines(calendar: &MonthCalendar, use_color: bool) -> Vec<String> {
    let header = WEEKDAYS
        .iter()
        .map(|d| format!("{d:<5}"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![header.trim_end().to_string()];
    for week in calendar.weeks() {
        let row = week
            .iter()
            .map(|cell| match cell {
                Some(day) => calendar_cell(day, use_color),
                None => " ".repeat(5),
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(row.trim_end().to_string());
    }
    lines
}

fn calendar_cell(day: &CalendarDay, use_color: bool) -> String {
    let number = day.date.format("%e").to_string();
    match day.moods.last() {
        Some(mood) if use_color => {
            format!("{} {}", number.with(Theme::mood(*mood)), mood.emoji())
        }
        Some(mood) => format!("{number} {}", mood.emoji()),
        None => format!("{number}   "),
    }
}

/// A horizontal bar for a share between 0 and 1.
fn bar(share: f64) -> String {
    let filled = (share.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

/// Wraps case-insensitive matches of `term` in backticks so the skin
/// paints them as inline code.
fn highlight_term(text: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return text.to_string();
    }
    match Regex::new(&format!("(?i){}", regex::escape(term))) {
        Ok(re) => re.replace_all(text, "`$0`").to_string(),
        Err(_) => text.to_string(),
    }
}

fn first_line(note: &str) -> &str {
    note.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use mjr_core::Mood;

    #[test]
    fn highlight_is_case_insensitive_and_literal() {
        assert_eq!(
            highlight_term("Coffee and more coffee", "COFFEE"),
            "`Coffee` and more `coffee`"
        );
        assert_eq!(highlight_term("cost: 3.50 (ish)", "3.50 ("), "cost: `3.50 (`ish)");
        assert_eq!(highlight_term("untouched", "  "), "untouched");
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(0.5).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(3.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn calendar_grid_is_sunday_first() {
        let august = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let calendar = MonthCalendar::build(august, |day| match day.day() {
            1 => vec![Mood::Sad, Mood::Happy],
            _ => Vec::new(),
        })
        .unwrap();
        let lines = calendar_lines(&calendar, false);

        assert_eq!(lines[0], "Su    Mo    Tu    We    Th    Fr    Sa");
        assert_eq!(lines.len(), 7);
        // Aug 1 2025 is a Friday; the latest mood of the day is shown.
        assert!(lines[1].starts_with(&" ".repeat(30)));
        assert!(lines[1].contains(&format!(" 1 {}", Mood::Happy.emoji())));
        assert!(!lines[1].contains(Mood::Sad.emoji()));
        assert!(lines[1].ends_with(" 2"));
        assert_eq!(lines[6], "31");
    }

    #[test]
    fn short_lines_use_the_first_note_line() {
        assert_eq!(first_line("  title  \nrest"), "title");
        assert_eq!(first_line(""), "");
    }
}
