use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::PathBuf, time::Duration};

use crate::dates::DEFAULT_INPUT_FORMATS;
use crate::keywords::Keywords;
use crate::store::SameDayPolicy;
use crate::weather::{ConfiguredLocation, Coordinates, RetryPolicy};

pub const DEFAULT_STORAGE_KEY: &str = "mood-storage";
pub const DEFAULT_DATE_FORMAT: &str = "%A, %d %b %Y";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
/// Overrides `[weather] api_key` when set.
pub const API_KEY_ENV: &str = "MJR_WEATHER_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the entry blob (`{storage_key}.json`).
    pub data_dir: PathBuf,
    pub storage_key: String,
    /// Preferred editor binary. The CLI falls back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// What happens to earlier entries when a second one is saved for the same day.
    pub same_day: SameDayPolicy,
    /// `chrono` format used when printing dates.
    pub date_format: String,
    pub input_date_formats: Vec<String>,
    /// The date relative keywords are resolved against. Today, unless a test pins it.
    pub reference_date: NaiveDate,
    pub keywords: Keywords,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// `metric`, `imperial` or `standard`.
    pub units: String,
    pub coords: Option<Coordinates>,
    /// When false the location lookup is treated as denied.
    pub share_location: bool,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_URL.to_string(),
            units: "metric".to_string(),
            coords: None,
            share_location: true,
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl WeatherConfig {
    pub fn location(&self) -> ConfiguredLocation {
        ConfiguredLocation {
            coords: self.coords,
            share_location: self.share_location,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    editor: Option<String>,
    same_day: Option<SameDayPolicy>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    /// Optional table:
    /// [synonyms]
    /// ytd = "yesterday"
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
    weather: Option<FileWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct FileWeather {
    api_key: Option<String>,
    base_url: Option<String>,
    units: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    share_location: Option<bool>,
    max_attempts: Option<u32>,
    initial_backoff_ms: Option<u64>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the first config file found (XDG path, then native), applies
    /// defaults and the API key environment override.
    ///
    /// A broken config file is reported and otherwise ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            tracing::warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        let mut config = Self::from_file_config(file_config);
        config.apply_env_api_key(env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    fn from_file_config(fc: FileConfig) -> Self {
        let input_date_formats = fc
            .input_date_formats
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(|| DEFAULT_INPUT_FORMATS.iter().map(|f| f.to_string()).collect());

        let keywords = fc
            .synonyms
            .as_ref()
            .map(Keywords::with_synonyms)
            .unwrap_or_default();

        Self {
            data_dir: fc.data_dir.unwrap_or_else(Self::default_data_dir),
            storage_key: fc
                .storage_key
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            editor: fc.editor,
            same_day: fc.same_day.unwrap_or_default(),
            date_format: fc
                .date_format
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            input_date_formats,
            reference_date: Local::now().date_naive(),
            keywords,
            weather: Self::weather_config(fc.weather.unwrap_or_default()),
        }
    }

    fn weather_config(fw: FileWeather) -> WeatherConfig {
        let defaults = WeatherConfig::default();
        let coords = match (fw.latitude, fw.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            (None, None) => None,
            _ => {
                tracing::warn!("weather location needs both latitude and longitude");
                None
            }
        };
        WeatherConfig {
            api_key: fw.api_key,
            base_url: fw.base_url.unwrap_or(defaults.base_url),
            units: fw.units.unwrap_or(defaults.units),
            coords,
            share_location: fw.share_location.unwrap_or(defaults.share_location),
            retry: RetryPolicy {
                max_attempts: fw.max_attempts.unwrap_or(defaults.retry.max_attempts),
                initial_delay: fw
                    .initial_backoff_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.retry.initial_delay),
            },
            timeout: fw
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    fn apply_env_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key);
        }
    }

    /// Input formats as borrowed strs, the shape the date parser takes.
    pub fn input_formats(&self) -> Vec<&str> {
        self.input_date_formats.iter().map(String::as_str).collect()
    }

    /// Path of the blob file for the configured key.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }

    /// Default data root: `{data_dir}/mjr`
    /// - macOS:   `~/Library/Application Support/mjr`
    /// - Linux:   `$XDG_DATA_HOME/mjr` or `~/.local/share/mjr`
    /// - Windows: `%APPDATA%\mjr`
    fn default_data_dir() -> PathBuf {
        match BaseDirs::new() {
            Some(base) => base.data_dir().join("mjr"),
            None => PathBuf::from("./mjr"),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("mjr").join("config.toml"));
            v.push(b.config_dir().join("mjr").join("config.toml"));
        }
        v
    }

    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::DateKeyword;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("mjr").join("config.toml");
            let expected_native = b.config_dir().join("mjr").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.same_day, SameDayPolicy::Replace);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.input_date_formats, vec!["%d/%m/%Y", "%Y-%m-%d"]);
        assert!(config.data_dir.ends_with("mjr"));
        assert_eq!(config.weather.retry, RetryPolicy::default());
        assert_eq!(config.weather.units, "metric");
        assert!(config.weather.coords.is_none());
    }

    #[test]
    fn parse_file_reads_every_section() {
        let toml = r#"
            data_dir = "/tmp/moods"
            storage_key = "journal"
            editor = "hx"
            same_day = "accumulate"
            input_date_formats = ["%Y/%m/%d"]

            [synonyms]
            ayer = "yesterday"

            [weather]
            api_key = "abc"
            units = "imperial"
            latitude = 38.72
            longitude = -9.14
            max_attempts = 2
            initial_backoff_ms = 250
            timeout_secs = 3
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());

        assert_eq!(config.data_dir, Path::new("/tmp/moods"));
        assert_eq!(config.storage_path(), Path::new("/tmp/moods/journal.json"));
        assert_eq!(config.editor.as_deref(), Some("hx"));
        assert_eq!(config.same_day, SameDayPolicy::Accumulate);
        assert_eq!(config.input_formats(), vec!["%Y/%m/%d"]);
        assert!(config.keywords.matches(DateKeyword::Yesterday, "ayer"));

        let weather = &config.weather;
        assert_eq!(weather.api_key.as_deref(), Some("abc"));
        assert_eq!(weather.units, "imperial");
        assert_eq!(
            weather.coords,
            Some(Coordinates {
                latitude: 38.72,
                longitude: -9.14
            })
        );
        assert_eq!(weather.retry.max_attempts, 2);
        assert_eq!(weather.retry.initial_delay, Duration::from_millis(250));
        assert_eq!(weather.timeout, Duration::from_secs(3));
    }

    #[test]
    fn half_a_location_is_ignored() {
        let toml = r#"
            [weather]
            latitude = 38.72
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(config.weather.coords.is_none());
    }

    #[test]
    fn unknown_same_day_policy_is_a_parse_error() {
        assert!(Config::parse_file(r#"same_day = "merge""#).is_err());
    }

    #[test]
    fn canonical_synonyms_are_rejected() {
        let toml = r#"
            [synonyms]
            today = "yesterday"
            ytd = "yesterday"
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(!config.keywords.matches(DateKeyword::Yesterday, "today"));
        assert!(config.keywords.matches(DateKeyword::Yesterday, "ytd"));
    }

    #[test]
    fn env_api_key_overrides_file() {
        let toml = r#"
            [weather]
            api_key = "from-file"
        "#;
        let mut config = Config::from_file_config(Config::parse_file(toml).unwrap());
        config.apply_env_api_key(Some("   ".into()));
        assert_eq!(config.weather.api_key.as_deref(), Some("from-file"));
        config.apply_env_api_key(Some("from-env".into()));
        assert_eq!(config.weather.api_key.as_deref(), Some("from-env"));
    }
}
