//! Live vehicle instances and the registry that owns them.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{SeatList, SeatRole, VehicleGroup, VehicleTemplate};
use crate::constants::{CALLSIGN_FALLBACK_PREFIX, CALLSIGN_PREFIX_LEN, GAUGE_MAX};

/// Operational lifecycle state of a deployed vehicle.
///
/// Garage returns and destructions remove the instance outright, so they
/// never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Operational,
    OnMission,
    Maintenance,
}

impl VehicleStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::OnMission => "on_mission",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(Self::Operational),
            "on_mission" => Ok(Self::OnMission),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(()),
        }
    }
}

/// Registry-lifetime-unique vehicle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V-{:04}", self.0)
    }
}

/// A deployed vehicle, derived from a catalog template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInstance {
    pub id: VehicleId,
    pub display_type: String,
    pub group: VehicleGroup,
    /// Seat layout copied from the template at deploy time.
    pub seat_roles: SeatList,
    pub callsign: String,
    pub status: VehicleStatus,
    /// Display timestamp of the last status change.
    #[serde(default)]
    pub status_since: String,
    /// Occupied seats only; an absent key means the seat is free.
    #[serde(default)]
    pub crew: HashMap<SeatRole, String>,
    pub fuel: u8,
    pub integrity: u8,
    #[serde(default)]
    pub mission_details: String,
    #[serde(default)]
    pub return_report: String,
}

impl VehicleInstance {
    pub(crate) fn from_template(
        id: VehicleId,
        template: &VehicleTemplate,
        callsign: String,
        now: &str,
    ) -> Self {
        Self {
            id,
            display_type: template.display_type.clone(),
            group: template.group,
            seat_roles: template.seat_roles.clone(),
            callsign,
            status: VehicleStatus::Operational,
            status_since: now.to_string(),
            crew: HashMap::new(),
            fuel: GAUGE_MAX,
            integrity: GAUGE_MAX,
            mission_details: String::new(),
            return_report: String::new(),
        }
    }

    /// Move the vehicle to a new lifecycle state, restamping `status_since`.
    pub fn set_status(&mut self, status: VehicleStatus, now: &str) {
        self.status = status;
        self.status_since = now.to_string();
    }

    /// Store fuel and integrity readings, clamped to the gauge range.
    pub fn set_gauges(&mut self, fuel: i32, integrity: i32) {
        self.fuel = clamp_gauge(fuel);
        self.integrity = clamp_gauge(integrity);
    }

    #[must_use]
    pub fn has_seat(&self, seat: &SeatRole) -> bool {
        self.seat_roles.iter().any(|role| role == seat)
    }

    #[must_use]
    pub fn occupant(&self, seat: &str) -> Option<&str> {
        self.crew.get(seat).map(String::as_str)
    }
}

/// Clamp a raw gauge reading into `[0, GAUGE_MAX]`.
#[must_use]
pub(crate) fn clamp_gauge(value: i32) -> u8 {
    u8::try_from(value.clamp(0, i32::from(GAUGE_MAX))).unwrap_or(GAUGE_MAX)
}

/// The set of currently active vehicle instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FleetRegistry {
    #[serde(default)]
    pub vehicles: Vec<VehicleInstance>,
    #[serde(default)]
    next_uid: u64,
    /// Vehicles lost to destruction over the registry's lifetime.
    #[serde(default)]
    pub destroyed_total: u32,
}

impl FleetRegistry {
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&VehicleInstance> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut VehicleInstance> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    /// Remove a vehicle from the registry, returning it. No tombstone kept.
    pub fn remove(&mut self, id: VehicleId) -> Option<VehicleInstance> {
        let index = self.vehicles.iter().position(|v| v.id == id)?;
        Some(self.vehicles.remove(index))
    }

    pub(crate) fn allocate_id(&mut self) -> VehicleId {
        self.next_uid += 1;
        VehicleId(self.next_uid)
    }

    /// Generate the next free callsign for a vehicle type.
    ///
    /// Callsigns are unique among live vehicles only; a sequence number
    /// freed by a garage return or destruction can be reissued.
    #[must_use]
    pub(crate) fn next_callsign(&self, display_type: &str) -> String {
        let prefix = callsign_prefix(display_type);
        let mut seq = 1u32;
        loop {
            let candidate = format!("{prefix}-{seq:03}");
            if !self.vehicles.iter().any(|v| v.callsign == candidate) {
                return candidate;
            }
            seq += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleInstance> {
        self.vehicles.iter()
    }
}

fn callsign_prefix(display_type: &str) -> String {
    let prefix: String = display_type
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(CALLSIGN_PREFIX_LEN)
        .flat_map(char::to_uppercase)
        .collect();
    if prefix.is_empty() {
        CALLSIGN_FALLBACK_PREFIX.to_string()
    } else {
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn deploy_raw(registry: &mut FleetRegistry, template_id: &str) -> VehicleId {
        let template = catalog::builtin().find(template_id).unwrap();
        let id = registry.allocate_id();
        let callsign = registry.next_callsign(&template.display_type);
        registry
            .vehicles
            .push(VehicleInstance::from_template(id, template, callsign, "01/01 12:00"));
        id
    }

    #[test]
    fn callsigns_use_type_prefix_and_sequence() {
        let mut registry = FleetRegistry::default();
        let first = deploy_raw(&mut registry, "camion");
        let second = deploy_raw(&mut registry, "camion");
        let armor = deploy_raw(&mut registry, "vab");

        assert_eq!(registry.get(first).unwrap().callsign, "CAMI-001");
        assert_eq!(registry.get(second).unwrap().callsign, "CAMI-002");
        assert_eq!(registry.get(armor).unwrap().callsign, "VAB-001");
    }

    #[test]
    fn freed_sequence_numbers_are_reissued() {
        let mut registry = FleetRegistry::default();
        let first = deploy_raw(&mut registry, "camion");
        let _second = deploy_raw(&mut registry, "camion");
        registry.remove(first).unwrap();

        let third = deploy_raw(&mut registry, "camion");
        assert_eq!(registry.get(third).unwrap().callsign, "CAMI-001");
        assert_ne!(third, first, "uids are never reused");
    }

    #[test]
    fn uids_stay_unique_across_removals() {
        let mut registry = FleetRegistry::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            let id = deploy_raw(&mut registry, "pickup");
            assert!(!seen.contains(&id));
            seen.push(id);
            registry.remove(id).unwrap();
        }
    }

    #[test]
    fn gauges_clamp_to_bounds() {
        let mut registry = FleetRegistry::default();
        let id = deploy_raw(&mut registry, "vbl");
        let vehicle = registry.get_mut(id).unwrap();

        vehicle.set_gauges(250, -40);
        assert_eq!(vehicle.fuel, 100);
        assert_eq!(vehicle.integrity, 0);
    }

    #[test]
    fn prefix_falls_back_when_type_name_is_unusable() {
        assert_eq!(callsign_prefix("Camion"), "CAMI");
        assert_eq!(callsign_prefix("NH90"), "NH90");
        assert_eq!(callsign_prefix("VAB"), "VAB");
        assert_eq!(callsign_prefix("***"), "VEH");
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            VehicleStatus::Operational,
            VehicleStatus::OnMission,
            VehicleStatus::Maintenance,
        ] {
            assert_eq!(status.as_str().parse::<VehicleStatus>(), Ok(status));
        }
        assert!("garage".parse::<VehicleStatus>().is_err());
        assert!("destroyed".parse::<VehicleStatus>().is_err());
    }
}
