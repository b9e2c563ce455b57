//! The entry store: an explicit container over a [`KeyValueStore`].

use crate::codec::{QuarantinedRecord, decode_entries, encode_entries};
use crate::dates::DateFilter;
use crate::entry::MoodEntry;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use strum_macros::{AsRefStr, EnumString};

/// What happens when an entry is added on a day that already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SameDayPolicy {
    /// Earlier entries on the same calendar day are removed.
    #[default]
    Replace,
    /// Entries pile up freely.
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    /// Number of same-day entries the new one replaced.
    Replaced(usize),
}

/// Summary of what happened when the persisted blob was loaded.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub migrated: usize,
    pub quarantined: Vec<QuarantinedRecord>,
    /// Set when the blob could not be read at all; the store then starts empty.
    pub failure: Option<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failure.is_none() && self.quarantined.is_empty()
    }
}

pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    key: String,
    policy: SameDayPolicy,
    entries: Vec<MoodEntry>,
    quarantine: Vec<Value>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Loads the store from `storage`.
    ///
    /// Never fails: an unreadable blob is reported in the [`LoadReport`], copied to
    /// `{key}.bak` so the next write cannot destroy it, and the store starts empty.
    pub fn open(storage: S, key: impl Into<String>, policy: SameDayPolicy) -> (Self, LoadReport) {
        let mut store = Self {
            storage,
            key: key.into(),
            policy,
            entries: Vec::new(),
            quarantine: Vec::new(),
        };
        let report = store.reload();
        (store, report)
    }

    /// Re-reads the blob, replacing the in-memory state wholesale.
    pub fn reload(&mut self) -> LoadReport {
        self.entries.clear();
        self.quarantine.clear();

        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadReport::default(),
            Err(error) => {
                tracing::error!(key = %self.key, error = %error, "failed to read entries");
                self.back_up();
                return LoadReport {
                    failure: Some(format!("{error:#}")),
                    ..Default::default()
                };
            }
        };

        let decoded = match decode_entries(&raw) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::error!(key = %self.key, error = %error, "failed to parse entries");
                self.back_up();
                return LoadReport {
                    failure: Some(format!(
                        "could not parse {}: {error}",
                        self.storage.describe(&self.key)
                    )),
                    ..Default::default()
                };
            }
        };

        for record in &decoded.quarantined {
            tracing::warn!(
                key = %self.key,
                index = record.index,
                reason = %record.reason,
                "quarantined stored record"
            );
        }
        self.entries = decoded.entries;
        self.quarantine = decoded.carried_quarantine;
        self.quarantine
            .extend(decoded.quarantined.iter().map(|q| q.raw.clone()));

        tracing::debug!(
            key = %self.key,
            loaded = self.entries.len(),
            migrated = decoded.migrated,
            "entries loaded"
        );
        LoadReport {
            loaded: self.entries.len(),
            migrated: decoded.migrated,
            quarantined: decoded.quarantined,
            failure: None,
        }
    }

    /// Copies the stored blob as-is to `{key}.bak`.
    fn back_up(&self) {
        let backup_key = format!("{}.bak", self.key);
        match self.storage.copy(&self.key, &backup_key) {
            Ok(false) => {}
            Ok(true) => tracing::warn!(
                backup = %self.storage.describe(&backup_key),
                "kept a copy of the unreadable entries"
            ),
            Err(error) => tracing::error!(error = %error, "could not back up unreadable entries"),
        }
    }

    /// All entries, in storage order.
    pub fn list(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn entries_on(&self, day: NaiveDate) -> Vec<&MoodEntry> {
        self.entries.iter().filter(|e| e.day() == day).collect()
    }

    pub fn policy(&self) -> SameDayPolicy {
        self.policy
    }

    /// Raw records that could not be migrated, kept so nothing is lost on rewrite.
    pub fn quarantined(&self) -> &[Value] {
        &self.quarantine
    }

    pub fn location(&self) -> String {
        self.storage.describe(&self.key)
    }

    /// Adds an entry according to the store's [`SameDayPolicy`].
    ///
    /// No validation happens here; callers check the entry first.
    pub fn add_entry(&mut self, entry: MoodEntry) -> Result<AddOutcome> {
        let mut next = self.entries.clone();
        let outcome = match self.policy {
            SameDayPolicy::Accumulate => AddOutcome::Inserted,
            SameDayPolicy::Replace => {
                let day = entry.day();
                let before = next.len();
                next.retain(|e| e.day() != day);
                match before - next.len() {
                    0 => AddOutcome::Inserted,
                    n => AddOutcome::Replaced(n),
                }
            }
        };
        next.push(entry);
        self.commit(next)?;
        Ok(outcome)
    }

    /// Removes every entry whose date equals `date` exactly. Returns how many went.
    pub fn remove_entry(&mut self, date: &DateTime<FixedOffset>) -> Result<usize> {
        self.remove_where(|e| e.date == *date)
    }

    /// Removes every entry on a day covered by `filter`, in one write.
    /// Returns how many went.
    pub fn remove_in(&mut self, filter: DateFilter) -> Result<usize> {
        self.remove_where(|e| filter.contains(e.day()))
    }

    fn remove_where(&mut self, pred: impl Fn(&MoodEntry) -> bool) -> Result<usize> {
        let next: Vec<MoodEntry> = self.entries.iter().filter(|e| !pred(e)).cloned().collect();
        let removed = self.entries.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// Writes the full blob, then swaps the in-memory list.
    fn commit(&mut self, next: Vec<MoodEntry>) -> Result<()> {
        let blob = encode_entries(&next, &self.quarantine)?;
        self.storage
            .write(&self.key, &blob)
            .with_context(|| format!("saving entries to {}", self.storage.describe(&self.key)))?;
        tracing::debug!(key = %self.key, entries = next.len(), "entries saved");
        self.entries = next;
        Ok(())
    }
}
