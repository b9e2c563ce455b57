//! Encoding of the persisted entry blob.
//!
//! Written as `{"version":1,"state":{"entries":[...]},"quarantine":[...]}`.
//! Read leniently: a flat array, a `{state:{entries}}` wrapper or a bare
//! `{entries}` object are all accepted, and every record is migrated onto the
//! canonical [`MoodEntry`] shape. Records that cannot be migrated are
//! quarantined instead of being dropped.

use crate::entry::{MoodEntry, WeatherCondition, WeatherSnapshot};
use crate::mood::{LEGACY_MOOD_LABELS, Mood};
use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

pub const BLOB_VERSION: u32 = 1;

#[derive(Serialize)]
struct PersistedBlob<'a> {
    version: u32,
    state: PersistedState<'a>,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    quarantine: &'a [Value],
}

#[derive(Serialize)]
struct PersistedState<'a> {
    entries: &'a [MoodEntry],
}

/// Why a stored record could not be turned into a [`MoodEntry`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("unknown mood `{0}`")]
    UnknownMood(String),
    #[error("mood index {0} is outside the legacy table of {len}", len = LEGACY_MOOD_LABELS.len())]
    MoodIndexOutOfRange(u64),
    #[error("invalid weather: {0}")]
    InvalidWeather(String),
    #[error("invalid note: {0}")]
    InvalidNote(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarantinedRecord {
    /// Position of the record in the stored list.
    pub index: usize,
    pub raw: Value,
    pub reason: RecordError,
}

#[derive(Debug, Default)]
pub struct DecodedBlob {
    pub entries: Vec<MoodEntry>,
    /// Records rejected during this decode.
    pub quarantined: Vec<QuarantinedRecord>,
    /// Raw records quarantined by an earlier write, carried forward verbatim.
    pub carried_quarantine: Vec<Value>,
    /// Number of records that needed migration (legacy mood index, bare date...).
    pub migrated: usize,
}

pub fn encode_entries(entries: &[MoodEntry], quarantine: &[Value]) -> Result<String> {
    let blob = PersistedBlob {
        version: BLOB_VERSION,
        state: PersistedState { entries },
        quarantine,
    };
    Ok(serde_json::to_string(&blob)?)
}

/// Decodes a stored blob.
///
/// Fails only when the blob as a whole is unreadable (invalid JSON or an
/// unrecognised layout). Individual bad records end up in
/// [`DecodedBlob::quarantined`].
pub fn decode_entries(raw: &str) -> Result<DecodedBlob> {
    let value: Value = serde_json::from_str(raw)?;
    let (records, carried) = split_layout(value)?;

    let mut decoded = DecodedBlob {
        carried_quarantine: carried,
        ..Default::default()
    };
    for (index, record) in records.into_iter().enumerate() {
        match decode_record(&record) {
            Ok((entry, migrated)) => {
                if migrated {
                    decoded.migrated += 1;
                }
                decoded.entries.push(entry);
            }
            Err(reason) => decoded.quarantined.push(QuarantinedRecord {
                index,
                raw: record,
                reason,
            }),
        }
    }
    Ok(decoded)
}

fn split_layout(value: Value) -> Result<(Vec<Value>, Vec<Value>)> {
    match value {
        Value::Array(records) => Ok((records, Vec::new())),
        Value::Object(mut map) => {
            let carried = match map.remove("quarantine") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let entries = match map.remove("state") {
                Some(Value::Object(mut state)) => state.remove("entries"),
                Some(_) => None,
                None => map.remove("entries"),
            };
            match entries {
                Some(Value::Array(records)) => Ok((records, carried)),
                Some(Value::Null) | None if map.is_empty() && carried.is_empty() => {
                    Ok((Vec::new(), carried))
                }
                _ => Err(anyhow!("unrecognised layout, expected a list of entries")),
            }
        }
        _ => Err(anyhow!("unrecognised layout, expected a list of entries")),
    }
}

/// Returns the entry and whether it needed migrating.
fn decode_record(record: &Value) -> Result<(MoodEntry, bool), RecordError> {
    let obj = record.as_object().ok_or(RecordError::NotAnObject)?;
    let mut migrated = false;

    let date_raw = obj
        .get("date")
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingField("date"))?;
    let date = match DateTime::parse_from_rfc3339(date_raw) {
        Ok(date) => date,
        Err(_) => {
            migrated = true;
            parse_bare_date(date_raw).ok_or_else(|| RecordError::InvalidDate(date_raw.into()))?
        }
    };

    let mood = match obj.get("mood") {
        Some(Value::String(label)) => {
            Mood::from_str(label).map_err(|_| RecordError::UnknownMood(label.clone()))?
        }
        Some(Value::Number(n)) => {
            migrated = true;
            let index = n
                .as_u64()
                .ok_or_else(|| RecordError::UnknownMood(n.to_string()))?;
            Mood::from_legacy_index(index).ok_or(RecordError::MoodIndexOutOfRange(index))?
        }
        Some(other) => return Err(RecordError::UnknownMood(other.to_string())),
        None => return Err(RecordError::MissingField("mood")),
    };

    let note = match obj.get("note") {
        Some(Value::String(note)) => note.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => return Err(RecordError::InvalidNote(other.to_string())),
    };

    let weather = match obj.get("weather") {
        Some(Value::Null) | None => None,
        Some(value) => Some(decode_weather(value)?),
    };

    Ok((
        MoodEntry {
            date,
            mood,
            note,
            weather,
        },
        migrated,
    ))
}

fn decode_weather(value: &Value) -> Result<WeatherSnapshot, RecordError> {
    let temp = value
        .get("temp")
        .and_then(Value::as_f64)
        .ok_or_else(|| RecordError::InvalidWeather("`temp` must be a number".into()))?;
    let condition = value
        .get("condition")
        .and_then(Value::as_str)
        .ok_or_else(|| RecordError::InvalidWeather("`condition` must be a string".into()))?;
    Ok(WeatherSnapshot {
        temp,
        condition: WeatherCondition::from(condition.to_string()),
    })
}

/// `YYYY-MM-DD`, read as midnight UTC.
fn parse_bare_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let utc = FixedOffset::east_opt(0)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_local_timezone(utc).single()?)
}
