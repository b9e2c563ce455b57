//! The `MoodJournal` facade: configuration plus an entry store, and the
//! operations the CLI calls.

use crate::calendar::MonthCalendar;
use crate::config::Config;
use crate::dates::{DateFilter, ParseOptions, parse_date_token};
use crate::entry::{MoodEntry, WeatherSnapshot};
use crate::export::write_csv;
use crate::mood::Mood;
use crate::query::{EntryQuery, TimeWindow};
use crate::stats::Statistics;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::{AddOutcome, EntryStore, LoadReport};
use crate::weather::{ConfiguredLocation, OpenWeatherClient, WeatherError, WeatherService};
use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, Local};
use std::path::Path;
use std::str::FromStr;

/// The central struct for all journal operations.
pub struct MoodJournal<S: KeyValueStore = FileStore> {
    pub config: Config,
    store: EntryStore<S>,
    load_report: LoadReport,
}

/// A non-fatal problem with a query's input.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    InvalidDate { input: String, error: String },
    InvalidMood { input: String },
}

#[derive(Debug)]
pub struct QueryResult<'a> {
    pub entries: Vec<&'a MoodEntry>,
    pub errors: Vec<QueryError>,
}

/// Filters for [`MoodJournal::read_entries`], given as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct ReadEntriesOptions<'a> {
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub mood: Option<&'a str>,
    pub search: Option<&'a str>,
    pub window: Option<TimeWindow>,
}

/// What the user asked to record.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub mood: Mood,
    pub note: String,
    pub weather: Option<WeatherSnapshot>,
    /// Defaults to now.
    pub date: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub entry: MoodEntry,
    pub outcome: AddOutcome,
}

impl MoodJournal<FileStore> {
    /// Loads configuration from the standard paths and opens the entry file.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Opens the entry file under `config.data_dir`, creating the directory if needed.
    pub fn with_config(config: Config) -> Result<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        Ok(Self::with_storage(config, storage))
    }
}

impl<S: KeyValueStore> MoodJournal<S> {
    pub fn with_storage(config: Config, storage: S) -> Self {
        let (store, load_report) =
            EntryStore::open(storage, config.storage_key.clone(), config.same_day);
        if !load_report.is_clean() {
            tracing::warn!(
                quarantined = load_report.quarantined.len(),
                failed = load_report.failure.is_some(),
                "stored entries did not load cleanly"
            );
        }
        Self {
            config,
            store,
            load_report,
        }
    }

    /// What happened when the stored entries were loaded.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn entries(&self) -> &[MoodEntry] {
        self.store.list()
    }

    /// Where the entries live, for messages.
    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Validates and saves a new entry, honouring the configured same-day policy.
    pub fn record(&mut self, new: NewEntry) -> Result<Recorded> {
        let date = new.date.unwrap_or_else(|| Local::now().fixed_offset());
        let mut entry = MoodEntry::new(date, new.mood, new.note);
        if let Some(weather) = new.weather {
            entry = entry.with_weather(weather);
        }
        entry.validate()?;
        let outcome = self.store.add_entry(entry.clone())?;
        tracing::debug!(mood = %entry.mood, ?outcome, "entry recorded");
        Ok(Recorded { entry, outcome })
    }

    /// Resolves a date token (and optional end token) with the configured
    /// formats, synonyms and reference date.
    pub fn parse_dates(&self, start: &str, end: Option<&str>) -> Option<DateFilter> {
        let formats = self.config.input_formats();
        let opts = ParseOptions {
            reference_date: Some(self.config.reference_date),
            formats: Some(&formats),
            keywords: Some(&self.config.keywords),
        };
        parse_date_token(start, end, Some(opts))
    }

    /// Entries matching every given filter, in storage order.
    ///
    /// Input that cannot be understood is reported in [`QueryResult::errors`]
    /// and yields no entries rather than silently widening the selection.
    pub fn read_entries(&self, options: &ReadEntriesOptions) -> QueryResult<'_> {
        let mut errors = Vec::new();

        let dates = match options.start_date {
            Some(start) => match self.parse_dates(start, options.end_date) {
                Some(filter) => Some(filter),
                None => {
                    errors.push(QueryError::InvalidDate {
                        input: start.to_string(),
                        error: "could not understand date".to_string(),
                    });
                    None
                }
            },
            None => None,
        };
        if let Some(end) = options.end_date {
            if self.parse_dates(end, None).is_none() {
                errors.push(QueryError::InvalidDate {
                    input: end.to_string(),
                    error: "could not understand date".to_string(),
                });
            }
        }

        let mood = match options.mood {
            Some(input) => match Mood::from_str(input.trim()) {
                Ok(mood) => Some(mood),
                Err(_) => {
                    errors.push(QueryError::InvalidMood {
                        input: input.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return QueryResult {
                entries: Vec::new(),
                errors,
            };
        }

        let query = EntryQuery {
            dates,
            mood,
            search: options.search,
            window: options.window,
            reference_date: Some(self.config.reference_date),
        };
        QueryResult {
            entries: query.apply(self.store.list()),
            errors,
        }
    }

    pub fn statistics(&self, window: TimeWindow) -> Statistics {
        Statistics::compute(self.store.list(), window, self.config.reference_date)
    }

    /// Writes every entry as CSV to `path`. `false` when there was nothing to write.
    pub fn export_csv(&self, path: &Path) -> Result<bool> {
        let written = write_csv(self.store.list(), path)?;
        if written {
            tracing::debug!(path = %path.display(), entries = self.store.list().len(), "exported");
        }
        Ok(written)
    }

    /// Moods per day for the month a date token falls in (the start of a
    /// range), or for the reference date's month.
    pub fn calendar(&self, date_token: Option<&str>) -> Result<MonthCalendar> {
        let reference = match date_token {
            Some(token) => {
                let (start, _) = self
                    .parse_dates(token, None)
                    .ok_or_else(|| anyhow!("could not understand date `{token}`"))?
                    .bounds();
                start
            }
            None => self.config.reference_date,
        };
        MonthCalendar::build(reference, |day| {
            self.store.entries_on(day).iter().map(|e| e.mood).collect()
        })
        .ok_or_else(|| anyhow!("no calendar month around {reference}"))
    }

    /// Deletes all entries on the day (or days) a date token names.
    pub fn delete(&mut self, date_token: &str) -> Result<usize> {
        let filter = self
            .parse_dates(date_token, None)
            .ok_or_else(|| anyhow!("could not understand date `{date_token}`"))?;
        self.store.remove_in(filter)
    }

    /// Deletes the entries whose timestamp equals `key` exactly.
    pub fn remove_entry(&mut self, key: &DateTime<FixedOffset>) -> Result<usize> {
        self.store.remove_entry(key)
    }

    /// A weather lookup wired from the `[weather]` configuration.
    pub fn weather_service(
        &self,
    ) -> Result<WeatherService<OpenWeatherClient, ConfiguredLocation>, WeatherError> {
        let weather = &self.config.weather;
        let client = OpenWeatherClient::new(weather)?;
        Ok(WeatherService::new(client, weather.location(), weather.retry))
    }
}
