//! Service tenure of the supervising officer and the authorization it grants.
use serde::{Deserialize, Serialize};

use crate::roster::Rank;

/// Identity of the current caller, supplied by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub uid: String,
    pub name: String,
}

impl Session {
    #[must_use]
    pub fn new(uid: &str, name: &str) -> Self {
        Self {
            uid: uid.to_string(),
            name: name.to_string(),
        }
    }
}

/// At most one tenure is active at a time. While active, only the session
/// holding `owner_uid` may perform supervision-gated mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceTenure {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub officer: Option<String>,
    #[serde(default)]
    pub officer_rank: Option<Rank>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    /// Session authorized to end or modify the tenure.
    #[serde(default)]
    pub owner_uid: Option<String>,
}

impl ServiceTenure {
    /// Whether a session may perform supervision-gated mutations.
    /// With no active tenure, anyone may act as supervisor.
    #[must_use]
    pub fn authorizes(&self, session: &Session) -> bool {
        !self.active || self.owner_uid.as_deref() == Some(session.uid.as_str())
    }

    /// Name of the officer currently on duty, if any.
    #[must_use]
    pub fn officer_name(&self) -> Option<&str> {
        if self.active { self.officer.as_deref() } else { None }
    }

    /// Open a tenure for the session. Refused while one is already active.
    pub(crate) fn begin(&mut self, session: &Session, rank: Rank, now: &str) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.officer = Some(session.name.clone());
        self.officer_rank = Some(rank);
        self.started_at = Some(now.to_string());
        self.ended_at = None;
        self.owner_uid = Some(session.uid.clone());
        true
    }

    /// Close the active tenure, clearing officer identity and ownership.
    pub(crate) fn end(&mut self, now: &str) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.officer = None;
        self.officer_rank = None;
        self.owner_uid = None;
        self.ended_at = Some(now.to_string());
        true
    }

    /// Reassign ownership to the session without touching any other field.
    /// A manual override, not a negotiated handoff.
    pub(crate) fn force_recover(&mut self, session: &Session) -> bool {
        if !self.active {
            return false;
        }
        self.owner_uid = Some(session.uid.clone());
        true
    }
}
