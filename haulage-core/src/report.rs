//! Plain-data summaries of a fleet and of an allocation pass.
//!
//! Nothing here formats for display; callers render these values as JSON,
//! CSV or tables.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    AllocationOutcome, CargoUnit, FleetRegistry, ManifestEntry, TransportUnit, VehicleId,
    VehicleKind,
};

/// Aggregate figures for a registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FleetStatistics {
    /// Company name of the registry.
    pub company_name: String,
    /// Number of registered vehicles.
    pub vehicle_count: usize,
    /// Number of registered clients.
    pub client_count: usize,
    /// Number of VIP clients.
    pub vip_clients: usize,
    /// Sum of vehicle capacities.
    pub total_capacity: f64,
    /// Sum of current vehicle loads.
    pub total_load: f64,
    /// `total_load / total_capacity`, or zero for an empty fleet.
    pub load_fraction: f64,
    /// Manifest entries across all vehicles.
    pub clients_loaded: usize,
    /// Clients not on any vehicle.
    pub clients_unloaded: usize,
}

impl FleetStatistics {
    /// Summarise `registry` as it stands.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is expressed in fractional tonnes"
    )]
    pub fn from_registry(registry: &FleetRegistry) -> Self {
        let vehicles = registry.vehicles();
        let total_capacity = vehicles.iter().fold(0.0, |sum, v| sum + v.capacity());
        let total_load = vehicles.iter().fold(0.0, |sum, v| sum + v.current_load());
        let load_fraction = if total_capacity > 0.0 {
            total_load / total_capacity
        } else {
            0.0
        };
        Self {
            company_name: registry.name().to_owned(),
            vehicle_count: vehicles.len(),
            client_count: registry.clients().len(),
            vip_clients: registry.clients().iter().filter(|c| c.is_vip()).count(),
            total_capacity,
            total_load,
            load_fraction,
            clients_loaded: vehicles.iter().map(|v| v.assigned().len()).sum(),
            clients_unloaded: registry.unloaded_clients().count(),
        }
    }
}

impl FleetRegistry {
    /// Aggregate figures for the current state.
    #[must_use]
    pub fn statistics(&self) -> FleetStatistics {
        FleetStatistics::from_registry(self)
    }
}

/// Load summary for one vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VehicleLoadReport {
    /// Vehicle identifier.
    pub id: VehicleId,
    /// Kind label (`Plain`, `Train` or `Airplane`).
    pub kind: &'static str,
    /// Maximum load.
    pub capacity: f64,
    /// Load after the pass.
    pub current_load: f64,
    /// `current_load / capacity`.
    pub load_fraction: f64,
    /// Client names in loading order.
    pub clients: Vec<String>,
}

impl From<&TransportUnit> for VehicleLoadReport {
    fn from(vehicle: &TransportUnit) -> Self {
        Self {
            id: vehicle.id().clone(),
            kind: vehicle.kind().label(),
            capacity: vehicle.capacity(),
            current_load: vehicle.current_load(),
            load_fraction: vehicle.load_fraction(),
            clients: vehicle
                .assigned()
                .iter()
                .map(|entry| entry.name.clone())
                .collect(),
        }
    }
}

/// Everything a caller needs to present the result of an allocation pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AllocationReport {
    /// Fleet figures after the pass.
    pub statistics: FleetStatistics,
    /// Opened vehicles in opening order.
    pub opened_vehicles: Vec<VehicleId>,
    /// Per-vehicle breakdown for every opened vehicle, in opening order.
    pub distribution: Vec<VehicleLoadReport>,
    /// Clients left unloaded.
    pub unallocated: Vec<String>,
}

impl AllocationReport {
    /// Combine the post-pass registry with the pass outcome.
    ///
    /// Opened ids missing from the registry are skipped.
    #[must_use]
    pub fn new(registry: &FleetRegistry, outcome: &AllocationOutcome) -> Self {
        let distribution = outcome
            .opened
            .iter()
            .filter_map(|id| registry.vehicle(id.as_str()))
            .map(VehicleLoadReport::from)
            .collect();
        Self {
            statistics: registry.statistics(),
            opened_vehicles: outcome.opened.clone(),
            distribution,
            unallocated: outcome.unallocated.clone(),
        }
    }
}

/// One client as it stands in the registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ClientListing {
    /// Client name.
    pub name: String,
    /// Cargo weight in tonnes.
    pub weight: f64,
    /// VIP flag.
    pub vip: bool,
    /// Whether the cargo sits in a vehicle.
    pub loaded: bool,
    /// Vehicle carrying the cargo.
    pub vehicle: Option<VehicleId>,
}

/// One vehicle with its full manifest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VehicleListing {
    /// Vehicle identifier.
    pub id: VehicleId,
    /// Kind tag and its attributes.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: VehicleKind,
    /// Maximum load.
    pub capacity: f64,
    /// Current load.
    pub current_load: f64,
    /// Capacity still free.
    pub available_capacity: f64,
    /// Loaded cargo in loading order.
    pub manifest: Vec<ManifestEntry>,
}

impl From<&TransportUnit> for VehicleListing {
    fn from(vehicle: &TransportUnit) -> Self {
        Self {
            id: vehicle.id().clone(),
            kind: vehicle.kind().clone(),
            capacity: vehicle.capacity(),
            current_load: vehicle.current_load(),
            available_capacity: vehicle.available_capacity(),
            manifest: vehicle.assigned().to_vec(),
        }
    }
}

/// Every client and vehicle of a registry, in registration order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FleetListing {
    /// Company name.
    pub company_name: String,
    /// Registered clients.
    pub clients: Vec<ClientListing>,
    /// Registered vehicles.
    pub vehicles: Vec<VehicleListing>,
}

impl FleetRegistry {
    /// Itemised view of clients and vehicles.
    #[must_use]
    pub fn listing(&self) -> FleetListing {
        let client = |cargo: &CargoUnit| ClientListing {
            name: cargo.name().to_owned(),
            weight: cargo.weight(),
            vip: cargo.is_vip(),
            loaded: cargo.is_loaded(),
            vehicle: self.owner_of(cargo.name()).cloned(),
        };
        FleetListing {
            company_name: self.name().to_owned(),
            clients: self.clients().iter().map(client).collect(),
            vehicles: self.vehicles().iter().map(VehicleListing::from).collect(),
        }
    }
}
