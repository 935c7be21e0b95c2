//! Step history: an ordered list of snapshots with a cursor.
//!
//! The log covers a single top-level operation. It is reset to one entry when
//! the operation starts, grows by one entry per fix-up step, and drops
//! everything after the cursor when a new entry is appended while the cursor
//! is not on the last entry.

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StepperError;
use crate::snapshot::Snapshot;
use crate::step::StepKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry<K> {
    pub snapshot: Snapshot<K>,
    pub kind: StepKind,
    pub description: String,
}

impl<K> HistoryEntry<K> {
    /// Whether this entry shows a fix-up case being applied.
    pub fn is_fixup_step(&self) -> bool {
        self.kind.is_fixup_case()
    }
}

#[derive(Clone, Debug)]
pub struct HistoryLog<K> {
    entries: Vec<HistoryEntry<K>>,
    cursor: Option<usize>,
}

impl<K> Default for HistoryLog<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HistoryLog<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry<K>] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry<K>> {
        self.entries.get(index)
    }

    /// Index of the entry currently shown.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&HistoryEntry<K>> {
        self.entries.get(self.cursor?)
    }

    pub fn at_tail(&self) -> bool {
        self.cursor.map_or(true, |c| c + 1 == self.entries.len())
    }

    /// Drops every entry and starts over with a single one.
    pub fn reset(&mut self, snapshot: Snapshot<K>, kind: StepKind, description: String) {
        self.entries.clear();
        self.cursor = None;
        self.append(snapshot, kind, description);
    }

    /// Appends an entry after the cursor, discarding anything beyond it.
    pub fn append(&mut self, snapshot: Snapshot<K>, kind: StepKind, description: String) {
        if let Some(c) = self.cursor {
            if c + 1 != self.entries.len() {
                trace!("history: discarding {} entries after {c}", self.entries.len() - c - 1);
                self.entries.truncate(c + 1);
            }
        }
        trace!("history: #{} {:?}", self.entries.len(), kind);
        self.entries.push(HistoryEntry {
            snapshot,
            kind,
            description,
        });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Moves the cursor to `index` and returns the entry there.
    pub fn seek(&mut self, index: isize) -> Result<&HistoryEntry<K>, StepperError> {
        let len = self.entries.len();
        let Some(i) = usize::try_from(index).ok().filter(|&i| i < len) else {
            warn!("history: rejected navigation to {index} (len {len})");
            return Err(StepperError::InvalidNavigation { index, len });
        };
        self.cursor = Some(i);
        Ok(&self.entries[i])
    }

    /// Descriptions in order, as a step list for display.
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.description.as_str()).collect()
    }
}

impl<K: Serialize> HistoryLog<K> {
    /// `{ "cursor": n, "entries": [...] }` for an external viewer.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        Ok(serde_json::json!({
            "cursor": self.cursor,
            "entries": serde_json::to_value(&self.entries)?,
        }))
    }
}
