//! One-way projection of the depot command picture onto the external
//! squad directory, plus the service-archive ledger hooks.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{COMMAND_SQUAD_NAME, DEFAULT_SQUAD_FREQUENCY, UNASSIGNED_OFFICER};

/// Deployment marker carried by a squad-directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Reserve,
    Deployed,
}

impl DeploymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserve => "reserve",
            Self::Deployed => "deployed",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserve" => Ok(Self::Reserve),
            "deployed" => Ok(Self::Deployed),
            _ => Err(()),
        }
    }
}

/// Record in the clan-wide squad directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadRecord {
    pub name: String,
    /// Squad leader shown on the command board.
    pub sl: String,
    pub effectives: u32,
    pub frequency: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub status: DeploymentStatus,
}

/// Ledger entry mirroring one supervision stretch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub squad: String,
    /// Officer who held supervision for the archived stretch.
    pub officer: String,
    pub time_start: String,
    /// None while the tenure is still running.
    #[serde(default)]
    pub time_end: Option<String>,
}

/// External squad directory.
/// Platform-specific implementations should provide this.
pub trait SquadDirectory {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a squad record by its exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn find_by_name(&self, name: &str) -> Result<Option<SquadRecord>, Self::Error>;

    /// Insert or replace the record carrying `record.name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be written.
    fn upsert(&mut self, record: SquadRecord) -> Result<(), Self::Error>;
}

/// External archive of supervision stretches.
/// Platform-specific implementations should provide this.
pub trait ArchiveLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append a new open entry (no end time yet).
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    fn append_open(&mut self, entry: ArchiveEntry) -> Result<(), Self::Error>;

    /// Stamp the most recent open entry for `squad` with `time_end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    fn close_latest_open_for(&mut self, squad: &str, time_end: &str) -> Result<(), Self::Error>;
}

/// Project the current officer and roster size onto the "Logistique" record.
///
/// Pure upsert: existing records keep their frequency, objective and any
/// other external fields; a record is created only when there is something
/// to show (an officer on duty or a non-empty roster). There is no deletion
/// path.
///
/// # Errors
///
/// Propagates directory read/write failures.
pub fn sync_command_squad<D: SquadDirectory>(
    directory: &mut D,
    officer: Option<&str>,
    roster_len: usize,
) -> Result<(), D::Error> {
    let effectives =
        u32::try_from(roster_len).unwrap_or(u32::MAX).saturating_add(u32::from(officer.is_some()));

    if let Some(mut record) = directory.find_by_name(COMMAND_SQUAD_NAME)? {
        record.sl = officer.unwrap_or(UNASSIGNED_OFFICER).to_string();
        record.effectives = effectives;
        if officer.is_some() {
            record.status = DeploymentStatus::Deployed;
        }
        return directory.upsert(record);
    }

    if officer.is_none() && roster_len == 0 {
        return Ok(());
    }
    directory.upsert(SquadRecord {
        name: COMMAND_SQUAD_NAME.to_string(),
        sl: officer.unwrap_or(UNASSIGNED_OFFICER).to_string(),
        effectives,
        frequency: DEFAULT_SQUAD_FREQUENCY.to_string(),
        objective: String::new(),
        status: DeploymentStatus::Deployed,
    })
}

/// Open an archive entry for a tenure that just started.
///
/// # Errors
///
/// Propagates ledger write failures.
pub fn open_archive_entry<A: ArchiveLedger>(
    archive: &mut A,
    officer: &str,
    now: &str,
) -> Result<(), A::Error> {
    archive.append_open(ArchiveEntry {
        squad: COMMAND_SQUAD_NAME.to_string(),
        officer: officer.to_string(),
        time_start: now.to_string(),
        time_end: None,
    })
}

/// Close the archive entry of the tenure that just ended.
///
/// # Errors
///
/// Propagates ledger write failures.
pub fn close_archive_entry<A: ArchiveLedger>(archive: &mut A, now: &str) -> Result<(), A::Error> {
    archive.close_latest_open_for(COMMAND_SQUAD_NAME, now)
}
