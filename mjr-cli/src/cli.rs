use clap::{ArgGroup, Parser};
use mjr_core::{Mood, TimeWindow};
use std::path::PathBuf;

use crate::render::{ColorMode, Style};

/// mjr: a mood journal for the terminal
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("read_mode").args(["on", "from", "to", "window", "filter_mood", "search"]).multiple(true)),
    group(ArgGroup::new("write_mode").args(["mood", "text", "no_weather"]).multiple(true)),
    group(ArgGroup::new("solo").args(["path", "stats", "calendar", "export", "delete", "weather"]).conflicts_with_all(["read_mode", "write_mode"])),
)]
pub struct Cli {
    /// Prints the file entries are stored in
    #[arg(long, short)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Output style: "long" or "short". Short style prints one line per entry.
    #[arg(long, short, value_enum, env = "MJR_STYLE", default_value_t = Style::Long)]
    pub style: Style,
    /// Print machine-readable JSON instead of formatted text (entries and statistics).
    #[arg(long)]
    pub json: bool,

    /// Mood of the new entry: happy, sad, angry, tired or excited.
    #[arg(long, short)]
    pub mood: Option<Mood>,
    /// Do not look up the current weather for the new entry.
    #[arg(long)]
    pub no_weather: bool,
    /// Note for the new entry (e.g., `mjr --mood happy Long walk by the sea`).
    /// Opens your $EDITOR when empty.
    #[arg()]
    pub text: Vec<String>,

    /// View entries on a specific date (e.g., `mjr --on yesterday`, `mjr --on 14/08/2025`)
    #[arg(long)]
    pub on: Option<String>,
    /// View entries from this date until today, or until `--to`
    #[arg(long, conflicts_with = "on")]
    pub from: Option<String>,
    /// End of the `--from` range (e.g., `yesterday`, `2025-08-15`)
    #[arg(long, conflicts_with = "on", requires = "from")]
    pub to: Option<String>,
    /// Only entries inside this week, month, or all time
    #[arg(long, value_name = "WINDOW")]
    pub window: Option<TimeWindow>,
    /// Only entries with this mood
    #[arg(long, value_name = "MOOD")]
    pub filter_mood: Option<String>,
    /// Only entries whose note contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Show statistics for the week (default), month or all time
    #[arg(long, value_name = "WINDOW", num_args = 0..=1, default_missing_value = "week")]
    pub stats: Option<TimeWindow>,
    /// Show a month calendar with each day's mood. Defaults to the current month;
    /// any date inside another month selects it (e.g., `mjr --calendar "last month"`).
    #[arg(long, value_name = "DATE", num_args = 0..=1)]
    pub calendar: Option<Option<String>>,
    /// Export every entry as CSV. Defaults to `mood-journal-YYYY-MM-DD.csv` in the current directory.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
    /// Delete every entry on a date (e.g., `mjr --delete today`)
    #[arg(long, value_name = "DATE")]
    pub delete: Option<String>,
    /// Show the current weather for the configured location
    #[arg(long)]
    pub weather: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_arguments() {
        let cli = Cli::try_parse_from(["mjr", "--mood", "HAPPY", "long", "walk"]).unwrap();
        assert_eq!(cli.mood, Some(Mood::Happy));
        assert_eq!(cli.text, vec!["long", "walk"]);
        assert!(!cli.no_weather);
    }

    #[test]
    fn stats_window_defaults_to_week() {
        let cli = Cli::try_parse_from(["mjr", "--stats"]).unwrap();
        assert_eq!(cli.stats, Some(TimeWindow::Week));
        let cli = Cli::try_parse_from(["mjr", "--stats", "month"]).unwrap();
        assert_eq!(cli.stats, Some(TimeWindow::Month));
    }

    #[test]
    fn export_path_is_optional() {
        let cli = Cli::try_parse_from(["mjr", "--export"]).unwrap();
        assert_eq!(cli.export, Some(None));
        let cli = Cli::try_parse_from(["mjr", "--export", "out.csv"]).unwrap();
        assert_eq!(cli.export, Some(Some(PathBuf::from("out.csv"))));
    }

    #[test]
    fn calendar_month_is_optional() {
        let cli = Cli::try_parse_from(["mjr", "--calendar"]).unwrap();
        assert_eq!(cli.calendar, Some(None));
        let cli = Cli::try_parse_from(["mjr", "--calendar", "last month"]).unwrap();
        assert_eq!(cli.calendar, Some(Some("last month".to_string())));
        assert!(Cli::try_parse_from(["mjr", "--calendar", "--mood", "sad"]).is_err());
    }

    #[test]
    fn solo_flags_do_not_mix_with_modes() {
        assert!(Cli::try_parse_from(["mjr", "--stats", "--on", "today"]).is_err());
        assert!(Cli::try_parse_from(["mjr", "--delete", "today", "--mood", "sad"]).is_err());
        assert!(Cli::try_parse_from(["mjr", "--to", "today"]).is_err());
        assert!(Cli::try_parse_from(["mjr", "--mood", "grumpy"]).is_err());
    }
}
