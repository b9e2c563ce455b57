pub mod calendar;
pub mod codec;
pub mod config;
pub mod dates;
pub mod entry;
pub mod export;
pub mod journal;
pub mod keywords;
pub mod mood;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;
pub mod weather;

#[cfg(test)]
mod tests;

pub use calendar::MonthCalendar;
pub use config::Config;
pub use entry::{MoodEntry, WeatherCondition, WeatherSnapshot};
pub use journal::{MoodJournal, NewEntry, QueryError, QueryResult, ReadEntriesOptions};
pub use mood::Mood;
pub use query::TimeWindow;
pub use stats::Statistics;
