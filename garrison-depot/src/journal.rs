//! Bounded, append-only operations journal.
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::constants::JOURNAL_CAP;

/// Category tag carried by every journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Deploy,
    Mission,
    Info,
    Alert,
    Destroy,
}

impl LogKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Mission => "mission",
            Self::Info => "info",
            Self::Alert => "alert",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deploy" => Ok(Self::Deploy),
            "mission" => Ok(Self::Mission),
            "info" => Ok(Self::Info),
            "alert" => Ok(Self::Alert),
            "destroy" => Ok(Self::Destroy),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    /// Formatted local time of the recorded action.
    pub time: String,
    pub kind: LogKind,
    pub message: String,
    #[serde(default)]
    pub details: String,
}

/// Newest-first journal capped at [`JOURNAL_CAP`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Journal {
    #[serde(default)]
    entries: VecDeque<LogEntry>,
    #[serde(default)]
    next_id: u64,
}

impl Journal {
    /// Append an entry, evicting the oldest beyond the capacity bound.
    /// Returns the new entry's id.
    pub fn record(&mut self, kind: LogKind, message: String, details: String, time: &str) -> u64 {
        self.next_id += 1;
        self.entries.push_front(LogEntry {
            id: self.next_id,
            time: time.to_string(),
            kind,
            message,
            details,
        });
        self.entries.truncate(JOURNAL_CAP);
        self.next_id
    }

    /// Delete a single entry. Order of the remaining entries is unchanged.
    pub fn remove(&mut self, id: u64) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        self.entries.remove(index);
        true
    }

    #[must_use]
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-apply the capacity bound, e.g. after loading a persisted journal.
    pub(crate) fn enforce_cap(&mut self) {
        self.entries.truncate(JOURNAL_CAP);
    }
}
