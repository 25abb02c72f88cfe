//! Static registry of deployable vehicle templates.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const DEFAULT_CATALOG_DATA: &str = include_str!("../data/catalog.json");

/// Ordered seat layout, stored inline for the common crew sizes.
pub type SeatList = SmallVec<[SeatRole; 6]>;

/// Named crew position on a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatRole(pub String);

impl SeatRole {
    /// Construct a seat role from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SeatRole {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatRole {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Closed set of vehicle categories used by the clan motor pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleGroup {
    Transport,
    Blinde,
    Air,
    Soutien,
}

impl VehicleGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Blinde => "blinde",
            Self::Air => "air",
            Self::Soutien => "soutien",
        }
    }

    /// Air-group vehicles derive their commander from the pilot seat.
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}

impl fmt::Display for VehicleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transport" => Ok(Self::Transport),
            "blinde" => Ok(Self::Blinde),
            "air" => Ok(Self::Air),
            "soutien" => Ok(Self::Soutien),
            _ => Err(()),
        }
    }
}

/// Immutable deployment template for one vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleTemplate {
    pub id: String,
    pub display_type: String,
    pub group: VehicleGroup,
    /// Deployment cost in requisition points.
    pub cost: u32,
    /// Ordered seat layout copied onto every instance at deploy time.
    #[serde(default)]
    pub seat_roles: SeatList,
}

/// Complete template registry, read-only at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleCatalog {
    #[serde(default)]
    pub templates: Vec<VehicleTemplate>,
}

impl VehicleCatalog {
    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid catalog document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load the catalog bundled with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CATALOG_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, template_id: &str) -> Option<&VehicleTemplate> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Shared instance of the bundled catalog.
#[must_use]
pub fn builtin() -> &'static VehicleCatalog {
    static CATALOG: OnceLock<VehicleCatalog> = OnceLock::new();
    CATALOG.get_or_init(VehicleCatalog::load_from_static)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses_and_resolves_templates() {
        let catalog = builtin();
        assert!(!catalog.is_empty());

        let camion = catalog.find("camion").expect("camion template");
        assert_eq!(camion.display_type, "Camion");
        assert_eq!(camion.group, VehicleGroup::Transport);
        assert_eq!(camion.cost, 200);
        assert_eq!(
            camion.seat_roles.as_slice(),
            &[
                SeatRole::new("Conducteur"),
                SeatRole::new("Passager 1"),
                SeatRole::new("Passager 2"),
            ]
        );

        assert!(catalog.find("charrette").is_none());
    }

    #[test]
    fn group_round_trips_through_str() {
        for group in [
            VehicleGroup::Transport,
            VehicleGroup::Blinde,
            VehicleGroup::Air,
            VehicleGroup::Soutien,
        ] {
            assert_eq!(group.as_str().parse::<VehicleGroup>(), Ok(group));
        }
        assert!("cavalerie".parse::<VehicleGroup>().is_err());
        assert!(VehicleGroup::Air.is_air());
        assert!(!VehicleGroup::Soutien.is_air());
    }

    #[test]
    fn seat_role_trims_whitespace() {
        assert_eq!(SeatRole::new("  Tireur ").as_str(), "Tireur");
    }

    #[test]
    fn malformed_catalog_json_is_rejected() {
        assert!(VehicleCatalog::from_json("{not json").is_err());
        let empty = VehicleCatalog::from_json("{}").expect("empty catalog");
        assert!(empty.is_empty());
    }
}
