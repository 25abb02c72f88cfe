//! Lifecycle transition commands for the vehicle fleet.
//!
//! Every command applies one synchronous mutation against the aggregate or
//! rejects without touching it. Confirmation dialogs happen before a command
//! is issued; there is no pending-transition state to cancel.
use thiserror::Error;

use crate::catalog::VehicleTemplate;
use crate::constants::{FUEL_MAINTENANCE_FLOOR, GAUGE_MAX};
use crate::crew::commander;
use crate::fleet::{VehicleId, VehicleInstance, VehicleStatus, clamp_gauge};
use crate::journal::LogKind;
use crate::state::DepotState;

/// Why a depot command was refused. State is left untouched on rejection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("aucun véhicule actif ne porte l'identifiant {0}")]
    UnknownVehicle(VehicleId),
    #[error("modèle inconnu au catalogue: {0}")]
    UnknownTemplate(String),
    #[error("{callsign} ne peut pas recevoir cet ordre dans l'état {status}")]
    WrongStatus {
        callsign: String,
        status: VehicleStatus,
    },
    #[error("un ordre de mission ne peut pas être vide")]
    MissingMissionDetails,
    #[error("une destruction doit être signalée par un déclarant identifié")]
    MissingReporter,
    #[error("{callsign} n'a pas de poste {seat}")]
    UnknownSeat { callsign: String, seat: String },
    #[error("seul l'officier superviseur en service peut effectuer cette action")]
    NotSupervisor,
    #[error("aucun membre du roster ne porte l'identifiant {0}")]
    UnknownTrooper(u64),
    #[error("aucun point de stock ne porte l'identifiant {0}")]
    UnknownLocation(u64),
    #[error("aucune entrée de journal ne porte l'identifiant {0}")]
    UnknownLogEntry(u64),
    #[error("une supervision est déjà en cours")]
    TenureAlreadyHeld,
    #[error("aucune supervision n'est en cours")]
    NoActiveTenure,
}

/// Debrief gathered before a vehicle is brought back from mission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MissionReturn {
    pub report: String,
    pub fuel: i32,
    pub integrity: i32,
    pub needs_maintenance: bool,
}

impl MissionReturn {
    /// True when the debrief forces the vehicle into maintenance: flagged by
    /// the crew, damaged, or running on fumes.
    #[must_use]
    pub fn requires_maintenance(&self) -> bool {
        self.needs_maintenance
            || clamp_gauge(self.integrity) < GAUGE_MAX
            || clamp_gauge(self.fuel) < FUEL_MAINTENANCE_FLOOR
    }
}

/// Deploy a new instance of `template`. The vehicle starts Operational with
/// full gauges, an empty seat map and a freshly generated callsign.
pub fn deploy(state: &mut DepotState, template: &VehicleTemplate, now: &str) -> VehicleId {
    let id = state.fleet.allocate_id();
    let callsign = state.fleet.next_callsign(&template.display_type);
    let vehicle = VehicleInstance::from_template(id, template, callsign.clone(), now);
    state.fleet.vehicles.push(vehicle);
    state.journal.record(
        LogKind::Deploy,
        format!("{callsign} déployé"),
        format!("{}, groupe {}", template.display_type, template.group),
        now,
    );
    id
}

/// Send an Operational vehicle on mission.
///
/// # Errors
///
/// Rejects unknown vehicles, vehicles not Operational, and empty orders.
pub fn start_mission(
    state: &mut DepotState,
    id: VehicleId,
    details: &str,
    now: &str,
) -> Result<(), DispatchError> {
    let details = details.trim();
    if details.is_empty() {
        return Err(DispatchError::MissingMissionDetails);
    }
    let vehicle = state
        .fleet
        .get_mut(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    if vehicle.status != VehicleStatus::Operational {
        return Err(DispatchError::WrongStatus {
            callsign: vehicle.callsign.clone(),
            status: vehicle.status,
        });
    }

    vehicle.mission_details = details.to_string();
    vehicle.set_status(VehicleStatus::OnMission, now);
    let lead = commander(vehicle).to_string();
    let message = format!("{} en mission", vehicle.callsign);
    state.journal.record(
        LogKind::Mission,
        message,
        format!("Chef de bord: {lead}. Mission: {details}"),
        now,
    );
    Ok(())
}

/// Bring a vehicle back from mission with its debrief readings.
///
/// Gauges are clamped to `[0, 100]` before being stored; the UI widgets are
/// range-bounded but the engine does not trust them. Returns the resulting
/// status: Maintenance when the debrief escalates, Operational otherwise.
///
/// # Errors
///
/// Rejects unknown vehicles and vehicles not on mission.
pub fn return_mission(
    state: &mut DepotState,
    id: VehicleId,
    debrief: &MissionReturn,
    now: &str,
) -> Result<VehicleStatus, DispatchError> {
    let vehicle = state
        .fleet
        .get_mut(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    if vehicle.status != VehicleStatus::OnMission {
        return Err(DispatchError::WrongStatus {
            callsign: vehicle.callsign.clone(),
            status: vehicle.status,
        });
    }

    vehicle.set_gauges(debrief.fuel, debrief.integrity);
    vehicle.return_report = debrief.report.trim().to_string();
    let escalated = debrief.requires_maintenance();
    let next = if escalated {
        VehicleStatus::Maintenance
    } else {
        VehicleStatus::Operational
    };
    vehicle.set_status(next, now);

    let callsign = vehicle.callsign.clone();
    let readings = format!("Carburant {}%, intégrité {}%", vehicle.fuel, vehicle.integrity);
    state.journal.record(
        LogKind::Info,
        format!("{callsign} rentré de mission"),
        readings.clone(),
        now,
    );
    if escalated {
        state.journal.record(
            LogKind::Alert,
            format!("{callsign} placé en maintenance"),
            readings,
            now,
        );
    }
    Ok(next)
}

/// Refuel and repair a vehicle held in maintenance.
///
/// # Errors
///
/// Rejects unknown vehicles and vehicles not in maintenance.
pub fn repair_and_resupply(
    state: &mut DepotState,
    id: VehicleId,
    now: &str,
) -> Result<(), DispatchError> {
    let vehicle = state
        .fleet
        .get_mut(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    if vehicle.status != VehicleStatus::Maintenance {
        return Err(DispatchError::WrongStatus {
            callsign: vehicle.callsign.clone(),
            status: vehicle.status,
        });
    }

    vehicle.fuel = GAUGE_MAX;
    vehicle.integrity = GAUGE_MAX;
    vehicle.set_status(VehicleStatus::Operational, now);
    let message = format!("{} réarmé et ravitaillé", vehicle.callsign);
    state.journal.record(LogKind::Info, message, String::new(), now);
    Ok(())
}

/// Return an Operational vehicle to the garage, removing it from the
/// registry. No tombstone is kept.
///
/// # Errors
///
/// Rejects unknown vehicles and vehicles not Operational.
pub fn garage_return(
    state: &mut DepotState,
    id: VehicleId,
    now: &str,
) -> Result<VehicleInstance, DispatchError> {
    let vehicle = state.fleet.get(id).ok_or(DispatchError::UnknownVehicle(id))?;
    if vehicle.status != VehicleStatus::Operational {
        return Err(DispatchError::WrongStatus {
            callsign: vehicle.callsign.clone(),
            status: vehicle.status,
        });
    }

    let vehicle = state
        .fleet
        .remove(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    let message = format!("{} rendu au garage", vehicle.callsign);
    state.journal.record(LogKind::Info, message, String::new(), now);
    Ok(vehicle)
}

/// Report a vehicle destroyed, from any status, and remove it.
///
/// # Errors
///
/// Rejects unknown vehicles and reports without an identified reporter.
pub fn destroy(
    state: &mut DepotState,
    id: VehicleId,
    reporter: &str,
    reason: &str,
    now: &str,
) -> Result<VehicleInstance, DispatchError> {
    let reporter = reporter.trim();
    if reporter.is_empty() {
        return Err(DispatchError::MissingReporter);
    }
    let vehicle = state
        .fleet
        .remove(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    state.fleet.destroyed_total += 1;

    let reason = reason.trim();
    let details = if reason.is_empty() {
        format!("Signalé par {reporter}")
    } else {
        format!("Signalé par {reporter}. Raison: {reason}")
    };
    state.journal.record(
        LogKind::Destroy,
        format!("{} détruit", vehicle.callsign),
        details,
        now,
    );
    Ok(vehicle)
}
