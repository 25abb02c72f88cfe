//! Shape and round-trip guarantees for every persisted record.
use garrison_depot::{
    DepotState, DeploymentStatus, LogKind, MissionReturn, Rank, SeatRole, SquadRecord,
    VehicleGroup, VehicleStatus, assign_seat, catalog, deploy, destroy, return_mission,
    start_mission,
};
use serde_json::{Value, json};

fn sample_state() -> DepotState {
    let mut state = DepotState::default();
    let template = catalog::builtin().find("vab").unwrap().clone();
    let id = deploy(&mut state, &template, "01/03 18:00");
    assign_seat(&mut state, id, &SeatRole::new("Chef de Bord"), "Luc", "01/03 18:01").unwrap();
    start_mission(&mut state, id, "Escorte", "01/03 18:02").unwrap();

    let wreck = deploy(&mut state, &catalog::builtin().find("pickup").unwrap().clone(), "01/03 18:03");
    destroy(&mut state, wreck, "CPL Dupont", "Embuscade", "01/03 18:04").unwrap();

    state.roster.add("Jean", Rank::CaporalChef);
    state.supply.add("Dépôt central", 420);
    state.chat.post("Jean", "Présent", "01/03 18:05");
    state
}

#[test]
fn depot_state_round_trips_without_loss() {
    let state = sample_state();
    let raw = serde_json::to_string(&state).unwrap();
    let restored: DepotState = serde_json::from_str(&raw).unwrap();
    assert_eq!(state, restored);
}

#[test]
fn restored_registries_keep_allocating_fresh_ids() {
    let state = sample_state();
    let raw = serde_json::to_string(&state).unwrap();
    let mut restored: DepotState = serde_json::from_str(&raw).unwrap();

    let known: Vec<_> = restored.fleet.iter().map(|v| v.id).collect();
    let template = catalog::builtin().find("vab").unwrap().clone();
    let fresh = deploy(&mut restored, &template, "01/03 19:00");
    assert!(!known.contains(&fresh));
}

#[test]
fn status_and_group_serialize_as_closed_tags() {
    assert_eq!(json!(VehicleStatus::Operational), json!("operational"));
    assert_eq!(json!(VehicleStatus::OnMission), json!("on_mission"));
    assert_eq!(json!(VehicleStatus::Maintenance), json!("maintenance"));
    // removal transitions have no resting tag
    assert!(serde_json::from_value::<VehicleStatus>(json!("garage")).is_err());
    assert!(serde_json::from_value::<VehicleStatus>(json!("destroyed")).is_err());

    assert_eq!(json!(VehicleGroup::Blinde), json!("blinde"));
    assert_eq!(json!(Rank::CaporalChef), json!("caporal-chef"));
    assert_eq!(json!(LogKind::Destroy), json!("destroy"));
    assert_eq!(json!(DeploymentStatus::Deployed), json!("deployed"));
}

#[test]
fn vehicle_record_shape_matches_the_store_layout() {
    let state = sample_state();
    let raw = serde_json::to_value(&state.fleet).unwrap();

    let vehicles = raw.get("vehicles").and_then(Value::as_array).unwrap();
    assert_eq!(vehicles.len(), 1, "destroyed vehicle leaves no tombstone");

    let vab = &vehicles[0];
    assert_eq!(vab.get("status"), Some(&json!("on_mission")));
    assert_eq!(vab.get("mission_details"), Some(&json!("Escorte")));
    assert_eq!(
        vab.get("crew").and_then(|c| c.get("Chef de Bord")),
        Some(&json!("Luc"))
    );
    assert_eq!(raw.get("destroyed_total"), Some(&json!(1)));
}

#[test]
fn squad_record_tolerates_missing_optional_fields() {
    let raw = json!({
        "name": "Logistique",
        "sl": "Non Assigné",
        "effectives": 0,
        "frequency": "50.0"
    });
    let record: SquadRecord = serde_json::from_value(raw).unwrap();
    assert_eq!(record.objective, "");
    assert_eq!(record.status, DeploymentStatus::Reserve);
}

#[test]
fn mission_return_escalation_matrix() {
    let cases = [
        (100, 100, false, false),
        (19, 100, false, true),
        (20, 100, false, false),
        (100, 99, false, true),
        (100, 100, true, true),
    ];
    for (fuel, integrity, flagged, expect_maintenance) in cases {
        let debrief = MissionReturn {
            report: String::new(),
            fuel,
            integrity,
            needs_maintenance: flagged,
        };
        let mut state = DepotState::default();
        let template = catalog::builtin().find("camion").unwrap().clone();
        let id = deploy(&mut state, &template, "18:00");
        start_mission(&mut state, id, "Test de charge", "18:01").unwrap();
        let status = return_mission(&mut state, id, &debrief, "18:02").unwrap();
        assert_eq!(
            status == VehicleStatus::Maintenance,
            expect_maintenance,
            "fuel={fuel} integrity={integrity} flagged={flagged}"
        );
    }
}
