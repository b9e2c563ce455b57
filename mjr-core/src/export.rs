//! CSV export.

use crate::entry::MoodEntry;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["Date", "Mood", "Note", "Weather Condition", "Temperature (°C)"];

const MISSING: &str = "N/A";

pub fn default_export_file_name(today: NaiveDate) -> String {
    format!("mood-journal-{}.csv", today.format("%Y-%m-%d"))
}

/// Renders entries as CSV, every cell quoted. `None` when there is nothing
/// to export.
pub fn entries_to_csv<'a>(entries: impl IntoIterator<Item = &'a MoodEntry>) -> Option<String> {
    let mut rows = vec![csv_row(CSV_HEADER.iter().map(|h| h.to_string()))];
    for entry in entries {
        let (condition, temp) = match &entry.weather {
            Some(w) => (w.condition.to_string(), w.temp.to_string()),
            None => (MISSING.to_string(), MISSING.to_string()),
        };
        rows.push(csv_row([
            entry.day().format("%Y-%m-%d").to_string(),
            entry.mood.to_string(),
            entry.note.clone(),
            condition,
            temp,
        ]));
    }
    if rows.len() == 1 {
        return None;
    }
    let mut csv = rows.join("\n");
    csv.push('\n');
    Some(csv)
}

/// Writes the CSV to `path`. Nothing is written, and `false` returned, when
/// there are no entries.
pub fn write_csv<'a>(
    entries: impl IntoIterator<Item = &'a MoodEntry>,
    path: &Path,
) -> Result<bool> {
    let Some(csv) = entries_to_csv(entries) else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating parent directory {}", parent.display()))?;
    }
    fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}

fn csv_row(cells: impl IntoIterator<Item = String>) -> String {
    cells
        .into_iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
