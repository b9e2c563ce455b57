use crate::mood::Mood;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::EnumString;

/// Soft cap on note length, counted in characters.
pub const NOTE_MAX_CHARS: usize = 500;

/// One journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: DateTime<FixedOffset>,
    pub mood: Mood,
    pub note: String,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
}

/// Conditions captured when the entry was saved. Never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temp: f64,
    pub condition: WeatherCondition,
}

/// Main weather group as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    #[strum(default)]
    Other(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EntryError {
    #[error("note is {len} characters long, the limit is {max}")]
    NoteTooLong { len: usize, max: usize },
}

impl MoodEntry {
    pub fn new(date: DateTime<FixedOffset>, mood: Mood, note: impl Into<String>) -> Self {
        Self {
            date,
            mood,
            note: note.into(),
            weather: None,
        }
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Calendar day of the entry, in the offset it was recorded with.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn validate(&self) -> Result<(), EntryError> {
        let len = self.note.chars().count();
        if len > NOTE_MAX_CHARS {
            return Err(EntryError::NoteTooLong {
                len,
                max: NOTE_MAX_CHARS,
            });
        }
        Ok(())
    }
}

impl WeatherCondition {
    pub fn as_str(&self) -> &str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Other(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀️",
            WeatherCondition::Clouds => "☁️",
            WeatherCondition::Rain => "🌧️",
            WeatherCondition::Drizzle => "🌦️",
            WeatherCondition::Thunderstorm => "⛈️",
            WeatherCondition::Snow => "❄️",
            WeatherCondition::Mist | WeatherCondition::Fog => "🌫️",
            WeatherCondition::Other(_) => "🌍",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for WeatherCondition {
    fn from(label: String) -> Self {
        WeatherCondition::from_str(&label).unwrap_or(WeatherCondition::Other(label))
    }
}

impl From<WeatherCondition> for String {
    fn from(condition: WeatherCondition) -> Self {
        condition.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::at;

    #[test]
    fn known_conditions_parse_and_unknown_are_kept() {
        assert_eq!(WeatherCondition::from("rain".to_string()), WeatherCondition::Rain);
        assert_eq!(
            WeatherCondition::from("Haze".to_string()),
            WeatherCondition::Other("Haze".to_string())
        );
        assert_eq!(WeatherCondition::Other("Haze".into()).to_string(), "Haze");
    }

    #[test]
    fn condition_serializes_as_label() {
        let snapshot = WeatherSnapshot {
            temp: 21.0,
            condition: WeatherCondition::Clouds,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["condition"], "Clouds");
        assert_eq!(json["temp"], 21.0);
    }

    #[test]
    fn validate_rejects_notes_over_the_cap() {
        let ok = MoodEntry::new(at("2025-08-15T10:00:00Z"), Mood::Happy, "a".repeat(500));
        assert!(ok.validate().is_ok());

        let long = MoodEntry::new(at("2025-08-15T10:00:00Z"), Mood::Happy, "é".repeat(501));
        assert_eq!(
            long.validate(),
            Err(EntryError::NoteTooLong { len: 501, max: 500 })
        );
    }

    #[test]
    fn day_uses_recorded_offset() {
        let entry = MoodEntry::new(at("2025-08-15T23:30:00-05:00"), Mood::Sad, "");
        assert_eq!(entry.day(), NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
    }
}
