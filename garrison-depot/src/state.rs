//! Owned aggregate for the whole depot.
use serde::{Deserialize, Serialize};

use crate::chat::ChatTranscript;
use crate::fleet::FleetRegistry;
use crate::journal::Journal;
use crate::roster::Roster;
use crate::supply::SupplyLedger;
use crate::tenure::{ServiceTenure, Session};

/// Single mutable aggregate behind every depot command. Each field is
/// persisted as an independently durable record under its own key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DepotState {
    #[serde(default)]
    pub fleet: FleetRegistry,
    #[serde(default)]
    pub journal: Journal,
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub supply: SupplyLedger,
    #[serde(default)]
    pub tenure: ServiceTenure,
    #[serde(default)]
    pub chat: ChatTranscript,
}

impl DepotState {
    /// Whether the session may perform supervision-gated mutations.
    #[must_use]
    pub fn is_supervisor(&self, session: &Session) -> bool {
        self.tenure.authorizes(session)
    }

    /// Headcount projected onto the squad directory: the officer on duty
    /// (if any) plus the roster members.
    #[must_use]
    pub fn effectives(&self) -> u32 {
        let roster = u32::try_from(self.roster.len()).unwrap_or(u32::MAX);
        roster.saturating_add(u32::from(self.tenure.officer_name().is_some()))
    }

    /// Re-establish in-memory invariants after loading persisted records.
    pub fn rehydrate(&mut self) {
        self.journal.enforce_cap();
    }
}
