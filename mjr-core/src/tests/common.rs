use crate::Config;
use crate::config::{DEFAULT_DATE_FORMAT, DEFAULT_STORAGE_KEY, WeatherConfig};
use crate::entry::{MoodEntry, WeatherCondition, WeatherSnapshot};
use crate::keywords::Keywords;
use crate::mood::Mood;
use crate::store::SameDayPolicy;
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(tmp_dir: PathBuf, reference_date: Option<NaiveDate>) -> Config {
    Config {
        data_dir: tmp_dir,
        storage_key: DEFAULT_STORAGE_KEY.to_string(),
        editor: None,
        same_day: SameDayPolicy::Replace,
        date_format: DEFAULT_DATE_FORMAT.to_string(),
        input_date_formats: vec!["%d/%m/%Y".to_string(), "%Y-%m-%d".to_string()],
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
        keywords: Keywords::default(),
        weather: WeatherConfig::default(),
    }
}

pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 timestamp")
}

/// An entry with clear-sky weather at `temp`, or no weather at all.
pub fn entry(date: &str, mood: Mood, note: &str, temp: Option<f64>) -> MoodEntry {
    let entry = MoodEntry::new(at(date), mood, note);
    match temp {
        Some(temp) => entry.with_weather(WeatherSnapshot {
            temp,
            condition: WeatherCondition::Clear,
        }),
        None => entry,
    }
}

pub fn entry_with_weather(
    date: &str,
    mood: Mood,
    temp: f64,
    condition: WeatherCondition,
) -> MoodEntry {
    MoodEntry::new(at(date), mood, "").with_weather(WeatherSnapshot { temp, condition })
}
