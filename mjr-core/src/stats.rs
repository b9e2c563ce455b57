//! Derived statistics. Everything here is a pure function of the entry list.

use crate::entry::{MoodEntry, WeatherCondition};
use crate::mood::Mood;
use crate::query::{EntryQuery, TimeWindow};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
    /// Share of the total, rounded to one decimal. Zero when there are no entries.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodDistribution {
    pub total: usize,
    /// One row per mood, zero counts included, in [`Mood`] order.
    pub counts: Vec<MoodCount>,
}

impl MoodDistribution {
    pub fn count_of(&self, mood: Mood) -> usize {
        self.counts
            .iter()
            .find(|c| c.mood == mood)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherBucket {
    pub condition: WeatherCondition,
    pub count: usize,
    pub moods: BTreeMap<Mood, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTemperature {
    pub mood: Mood,
    /// Rounded to one decimal.
    pub average: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: f64,
    pub entries: usize,
}

/// Everything the statistics view shows, for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub window: TimeWindow,
    pub reference_date: NaiveDate,
    pub entry_count: usize,
    pub distribution: MoodDistribution,
    pub weather: Vec<WeatherBucket>,
    pub temperature: Vec<MoodTemperature>,
    pub trend: Vec<TrendPoint>,
}

impl Statistics {
    /// Distribution, weather and temperature use the entries inside `window`.
    /// The trend covers the last [`TimeWindow::trend_span_days`] days up to
    /// `reference`.
    pub fn compute(entries: &[MoodEntry], window: TimeWindow, reference: NaiveDate) -> Self {
        let query = EntryQuery {
            window: Some(window),
            reference_date: Some(reference),
            ..Default::default()
        };
        let selected = query.apply(entries);
        Self {
            window,
            reference_date: reference,
            entry_count: selected.len(),
            distribution: mood_distribution(&selected),
            weather: weather_correlation(&selected),
            temperature: average_temperature_by_mood(&selected),
            trend: mood_trend(entries, window, reference),
        }
    }
}

pub fn mood_distribution(entries: &[&MoodEntry]) -> MoodDistribution {
    let total = entries.len();
    let counts = Mood::iter()
        .map(|mood| {
            let count = entries.iter().filter(|e| e.mood == mood).count();
            let percentage = if total == 0 {
                0.0
            } else {
                round1(count as f64 * 100.0 / total as f64)
            };
            MoodCount {
                mood,
                count,
                percentage,
            }
        })
        .collect();
    MoodDistribution { total, counts }
}

/// Cross-tabulates weather condition against mood. Entries without weather
/// are skipped. Busiest condition first, ties by label.
pub fn weather_correlation(entries: &[&MoodEntry]) -> Vec<WeatherBucket> {
    let mut buckets: HashMap<WeatherCondition, WeatherBucket> = HashMap::new();
    for entry in entries {
        let Some(weather) = &entry.weather else {
            continue;
        };
        let bucket = buckets
            .entry(weather.condition.clone())
            .or_insert_with(|| WeatherBucket {
                condition: weather.condition.clone(),
                count: 0,
                moods: Mood::iter().map(|m| (m, 0)).collect(),
            });
        bucket.count += 1;
        *bucket.moods.entry(entry.mood).or_default() += 1;
    }
    let mut buckets: Vec<WeatherBucket> = buckets.into_values().collect();
    buckets.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.condition.as_str().cmp(b.condition.as_str()))
    });
    buckets
}

/// Average recorded temperature per mood, in [`Mood`] order. Moods with no
/// weather-bearing entries are left out.
pub fn average_temperature_by_mood(entries: &[&MoodEntry]) -> Vec<MoodTemperature> {
    Mood::iter()
        .filter_map(|mood| {
            let temps: Vec<f64> = entries
                .iter()
                .filter(|e| e.mood == mood)
                .filter_map(|e| e.weather.as_ref().map(|w| w.temp))
                .collect();
            if temps.is_empty() {
                return None;
            }
            let average = temps.iter().sum::<f64>() / temps.len() as f64;
            Some(MoodTemperature {
                mood,
                average: round1(average),
                samples: temps.len(),
            })
        })
        .collect()
}

/// Daily average mood score from `reference - span` through `reference`.
/// Days without entries are dropped rather than interpolated.
pub fn mood_trend(entries: &[MoodEntry], window: TimeWindow, reference: NaiveDate) -> Vec<TrendPoint> {
    let start = reference - Duration::days(window.trend_span_days());
    let mut by_day: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();
    for entry in entries {
        let day = entry.day();
        if day < start || day > reference {
            continue;
        }
        let slot = by_day.entry(day).or_default();
        slot.0 += u32::from(entry.mood.score());
        slot.1 += 1;
    }
    by_day
        .into_iter()
        .map(|(date, (sum, n))| TrendPoint {
            date,
            score: sum as f64 / n as f64,
            entries: n,
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
