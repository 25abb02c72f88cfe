//! Named stock locations and their aggregate total.
use serde::{Deserialize, Serialize};

/// One named stock point, e.g. a forward ammo dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyLocation {
    pub id: u64,
    pub name: String,
    pub amount: u32,
}

/// Flat list of stock locations. Independent of the vehicle fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SupplyLedger {
    #[serde(default)]
    locations: Vec<SupplyLocation>,
    #[serde(default)]
    next_id: u64,
}

impl SupplyLedger {
    /// Create a stock location and return its id.
    pub fn add(&mut self, name: &str, amount: u32) -> u64 {
        self.next_id += 1;
        self.locations.push(SupplyLocation {
            id: self.next_id,
            name: name.trim().to_string(),
            amount,
        });
        self.next_id
    }

    pub fn remove(&mut self, id: u64) -> Option<SupplyLocation> {
        let index = self.locations.iter().position(|l| l.id == id)?;
        Some(self.locations.remove(index))
    }

    pub fn set_amount(&mut self, id: u64, amount: u32) -> bool {
        match self.locations.iter_mut().find(|l| l.id == id) {
            Some(location) => {
                location.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn rename(&mut self, id: u64, name: &str) -> bool {
        match self.locations.iter_mut().find(|l| l.id == id) {
            Some(location) => {
                location.name = name.trim().to_string();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&SupplyLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn locations(&self) -> &[SupplyLocation] {
        &self.locations
    }

    /// Sum of all stock amounts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.locations.iter().map(|l| u64::from(l.amount)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_the_sum_of_amounts() {
        let mut ledger = SupplyLedger::default();
        let depot = ledger.add("Dépôt central", 1200);
        ledger.add("Point avancé", 300);
        assert_eq!(ledger.total(), 1500);

        ledger.set_amount(depot, 900);
        assert_eq!(ledger.total(), 1200);
    }

    #[test]
    fn remove_drops_the_location() {
        let mut ledger = SupplyLedger::default();
        let id = ledger.add("FOB Nord", 50);
        let removed = ledger.remove(id).expect("location exists");
        assert_eq!(removed.name, "FOB Nord");
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0);
        assert!(ledger.remove(id).is_none());
    }

    #[test]
    fn edits_on_unknown_ids_are_refused() {
        let mut ledger = SupplyLedger::default();
        assert!(!ledger.set_amount(99, 10));
        assert!(!ledger.rename(99, "fantôme"));
    }

    #[test]
    fn names_are_trimmed() {
        let mut ledger = SupplyLedger::default();
        let id = ledger.add("  Atelier  ", 10);
        assert_eq!(ledger.get(id).unwrap().name, "Atelier");
        ledger.rename(id, " Atelier Est ");
        assert_eq!(ledger.get(id).unwrap().name, "Atelier Est");
    }
}
