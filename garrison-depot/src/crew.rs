//! Seat assignment and commander derivation.
use crate::catalog::SeatRole;
use crate::constants::{COMMANDER_PRIORITY, NO_COMMANDER, PILOT_SEAT};
use crate::dispatch::DispatchError;
use crate::fleet::{VehicleId, VehicleInstance};
use crate::journal::LogKind;
use crate::state::DepotState;

/// Assign or clear a seat on a live vehicle.
///
/// An empty or whitespace occupant clears the seat. The same person may
/// occupy seats on several vehicles at once; the depot does not enforce
/// cross-vehicle exclusivity.
///
/// # Errors
///
/// Rejects unknown vehicles and seats the vehicle does not have.
pub fn assign_seat(
    state: &mut DepotState,
    id: VehicleId,
    seat: &SeatRole,
    occupant: &str,
    now: &str,
) -> Result<(), DispatchError> {
    let vehicle = state
        .fleet
        .get_mut(id)
        .ok_or(DispatchError::UnknownVehicle(id))?;
    if !vehicle.has_seat(seat) {
        return Err(DispatchError::UnknownSeat {
            callsign: vehicle.callsign.clone(),
            seat: seat.as_str().to_string(),
        });
    }

    let occupant = occupant.trim();
    if occupant.is_empty() {
        vehicle.crew.remove(seat);
        return Ok(());
    }

    vehicle
        .crew
        .insert(seat.clone(), occupant.to_string());
    let message = format!(
        "{occupant} affecté au poste {} ({})",
        seat.as_str(),
        vehicle.callsign
    );
    state.journal.record(LogKind::Info, message, String::new(), now);
    Ok(())
}

/// Derive the vehicle commander from the occupied seats.
///
/// Air-group vehicles answer to their pilot seat alone. Everything else
/// walks a fixed seat priority; seats the vehicle does not have are skipped
/// implicitly since `crew` only ever holds seats from the layout.
#[must_use]
pub fn commander(vehicle: &VehicleInstance) -> &str {
    if vehicle.group.is_air() {
        return vehicle.occupant(PILOT_SEAT).unwrap_or(NO_COMMANDER);
    }
    for seat in COMMANDER_PRIORITY {
        if let Some(occupant) = vehicle.occupant(seat) {
            if !occupant.is_empty() {
                return occupant;
            }
        }
    }
    NO_COMMANDER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::dispatch;

    fn deploy(state: &mut DepotState, template_id: &str) -> VehicleId {
        let template = catalog::builtin().find(template_id).unwrap().clone();
        dispatch::deploy(state, &template, "18:00")
    }

    #[test]
    fn assignment_respects_the_seat_layout() {
        let mut state = DepotState::default();
        let id = deploy(&mut state, "camion");

        assign_seat(&mut state, id, &SeatRole::new("Conducteur"), "Jean", "18:01").unwrap();
        assert_eq!(state.fleet.get(id).unwrap().occupant("Conducteur"), Some("Jean"));

        let err = assign_seat(&mut state, id, &SeatRole::new("Tireur"), "Marc", "18:02");
        assert_eq!(
            err,
            Err(DispatchError::UnknownSeat {
                callsign: "CAMI-001".to_string(),
                seat: "Tireur".to_string(),
            })
        );
    }

    #[test]
    fn empty_occupant_clears_the_seat_without_logging() {
        let mut state = DepotState::default();
        let id = deploy(&mut state, "camion");
        let seat = SeatRole::new("Conducteur");

        assign_seat(&mut state, id, &seat, "Jean", "18:01").unwrap();
        let logged = state.journal.len();
        assign_seat(&mut state, id, &seat, "   ", "18:02").unwrap();

        assert_eq!(state.fleet.get(id).unwrap().occupant("Conducteur"), None);
        assert_eq!(state.journal.len(), logged);
    }

    #[test]
    fn assignment_appends_an_info_entry() {
        let mut state = DepotState::default();
        let id = deploy(&mut state, "camion");

        assign_seat(&mut state, id, &SeatRole::new("Passager 1"), "Marc", "18:01").unwrap();
        let entry = state.journal.latest().unwrap();
        assert_eq!(entry.kind, LogKind::Info);
        assert!(entry.message.contains("Marc"));
        assert!(entry.message.contains("Passager 1"));
    }

    #[test]
    fn ground_commander_follows_seat_priority() {
        let mut state = DepotState::default();
        let id = deploy(&mut state, "vab");

        assert_eq!(commander(state.fleet.get(id).unwrap()), "N/A");

        assign_seat(&mut state, id, &SeatRole::new("Conducteur"), "Jean", "18:01").unwrap();
        assert_eq!(commander(state.fleet.get(id).unwrap()), "Jean");

        assign_seat(&mut state, id, &SeatRole::new("Tireur"), "Marc", "18:02").unwrap();
        assert_eq!(commander(state.fleet.get(id).unwrap()), "Marc");

        assign_seat(&mut state, id, &SeatRole::new("Chef de Bord"), "Luc", "18:03").unwrap();
        assert_eq!(commander(state.fleet.get(id).unwrap()), "Luc");
    }

    #[test]
    fn air_commander_is_the_pilot_or_nobody() {
        let mut state = DepotState::default();
        let id = deploy(&mut state, "tigre");

        assign_seat(&mut state, id, &SeatRole::new("Tireur"), "Marc", "18:01").unwrap();
        assert_eq!(commander(state.fleet.get(id).unwrap()), "N/A");

        assign_seat(&mut state, id, &SeatRole::new("Pilote"), "Alice", "18:02").unwrap();
        assert_eq!(commander(state.fleet.get(id).unwrap()), "Alice");
    }

    #[test]
    fn double_booking_across_vehicles_is_allowed() {
        let mut state = DepotState::default();
        let truck = deploy(&mut state, "camion");
        let scout = deploy(&mut state, "vbl");

        assign_seat(&mut state, truck, &SeatRole::new("Conducteur"), "Jean", "18:01").unwrap();
        assign_seat(&mut state, scout, &SeatRole::new("Conducteur"), "Jean", "18:02").unwrap();

        assert_eq!(state.fleet.get(truck).unwrap().occupant("Conducteur"), Some("Jean"));
        assert_eq!(state.fleet.get(scout).unwrap().occupant("Conducteur"), Some("Jean"));
    }
}
