//! Centralized domain markers and tuning thresholds for the depot engine.
//!
//! Keeping them together ensures the command picture (squad names, seat
//! priorities, gauge bounds) can only be adjusted via code changes reviewed
//! in version control.

// Command-squad projection -------------------------------------------------
/// Squad-directory record the depot keeps synchronized.
pub const COMMAND_SQUAD_NAME: &str = "Logistique";
/// Leader marker written while no officer holds supervision.
pub const UNASSIGNED_OFFICER: &str = "Non Assigné";
/// Radio frequency assigned when the squad record is first created.
pub const DEFAULT_SQUAD_FREQUENCY: &str = "50.0";

// Crew seats ---------------------------------------------------------------
/// Label reported when no crewed seat qualifies as commander.
pub const NO_COMMANDER: &str = "N/A";
/// Seat that outranks every other on air-group vehicles.
pub const PILOT_SEAT: &str = "Pilote";
/// Seat priority walked to derive the commander on ground vehicles.
pub const COMMANDER_PRIORITY: [&str; 7] = [
    "Commandant",
    "Chef de Bord",
    "Passager 1",
    "Passager",
    "Tireur",
    "Médecin",
    "Conducteur",
];

// Fleet tuning -------------------------------------------------------------
/// Upper bound for fuel and integrity gauges.
pub const GAUGE_MAX: u8 = 100;
/// Fuel level below which a returning vehicle is pulled into maintenance.
pub(crate) const FUEL_MAINTENANCE_FLOOR: u8 = 20;
/// Callsign prefixes keep at most this many characters of the type name.
pub(crate) const CALLSIGN_PREFIX_LEN: usize = 4;
/// Fallback prefix when a type name has no usable characters.
pub(crate) const CALLSIGN_FALLBACK_PREFIX: &str = "VEH";

// Journal ------------------------------------------------------------------
/// The operations journal retains at most this many entries.
pub const JOURNAL_CAP: usize = 100;
