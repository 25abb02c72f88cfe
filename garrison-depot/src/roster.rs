//! Logistics personnel roster and the clan rank vocabulary.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed rank vocabulary used across the clan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Rank {
    #[default]
    Recrue,
    Soldat,
    Caporal,
    CaporalChef,
    Sergent,
    SergentChef,
    Adjudant,
    Lieutenant,
    Capitaine,
}

impl Rank {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recrue => "Recrue",
            Self::Soldat => "Soldat",
            Self::Caporal => "Caporal",
            Self::CaporalChef => "Caporal-Chef",
            Self::Sergent => "Sergent",
            Self::SergentChef => "Sergent-Chef",
            Self::Adjudant => "Adjudant",
            Self::Lieutenant => "Lieutenant",
            Self::Capitaine => "Capitaine",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Recrue" => Ok(Self::Recrue),
            "Soldat" => Ok(Self::Soldat),
            "Caporal" => Ok(Self::Caporal),
            "Caporal-Chef" => Ok(Self::CaporalChef),
            "Sergent" => Ok(Self::Sergent),
            "Sergent-Chef" => Ok(Self::SergentChef),
            "Adjudant" => Ok(Self::Adjudant),
            "Lieutenant" => Ok(Self::Lieutenant),
            "Capitaine" => Ok(Self::Capitaine),
            _ => Err(()),
        }
    }
}

/// One member of the logistics roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trooper {
    pub id: u64,
    pub name: String,
    pub rank: Rank,
}

/// Logistics-specific personnel roster. Membership drives the effectives
/// count projected onto the squad directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(default)]
    members: Vec<Trooper>,
    #[serde(default)]
    next_id: u64,
}

impl Roster {
    /// Enlist a member and return their roster id.
    pub fn add(&mut self, name: &str, rank: Rank) -> u64 {
        self.next_id += 1;
        self.members.push(Trooper {
            id: self.next_id,
            name: name.trim().to_string(),
            rank,
        });
        self.next_id
    }

    pub fn remove(&mut self, id: u64) -> Option<Trooper> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Trooper> {
        self.members.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn members(&self) -> &[Trooper] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Read-only lookup into the clan-wide personnel directory.
/// Platform-specific implementations should provide this.
pub trait RosterDirectory {
    fn rank_of(&self, name: &str) -> Option<Rank>;
}

/// Pre-fill the grade for a recruit from the clan-wide directory.
/// Unknown names enlist at the lowest rank.
#[must_use]
pub fn prefill_rank<D: RosterDirectory>(directory: &D, name: &str) -> Rank {
    directory.rank_of(name).unwrap_or_default()
}
