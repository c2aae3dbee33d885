//! Persisted form of a registry.
//!
//! A snapshot stores each vehicle's manifest as an ordered list of client
//! names. Restoring replays those names through the ledger, so the `loaded`
//! flags and `current_load` figures written to disk are informational only
//! and never trusted.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CargoUnit, FleetRegistry, LoadError, RegistryError, TransportUnit, ValidationError, VehicleId,
    VehicleKind,
};

const LOAD_TOLERANCE: f64 = 1e-9;

/// One client as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Client name.
    pub name: String,
    /// Cargo weight.
    pub weight: f64,
    /// VIP flag.
    #[serde(default)]
    pub vip: bool,
    /// Loaded flag at capture time; ignored on restore.
    #[serde(default)]
    pub loaded: bool,
}

/// One vehicle as written to disk.
///
/// The kind tag and its attribute are flattened into the record:
/// `{"id": "TRN-…", "kind": "Train", "car_count": 5, …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Vehicle identifier.
    pub id: String,
    /// Kind tag with kind-specific attributes.
    #[serde(flatten)]
    pub kind: VehicleKind,
    /// Maximum load.
    pub capacity: f64,
    /// Load at capture time; ignored on restore.
    #[serde(default)]
    pub current_load: f64,
    /// Client names in loading order.
    #[serde(default)]
    pub assigned: Vec<String>,
}

/// A registry in its persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Registry name.
    pub company_name: String,
    /// Clients in registration order.
    pub clients: Vec<ClientRecord>,
    /// Vehicles in registration order.
    pub vehicles: Vec<VehicleRecord>,
}

/// Errors raised while rebuilding a registry from a snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// A record failed validation.
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    /// Records conflict with each other.
    #[error("inconsistent records: {0}")]
    Registry(#[from] RegistryError),
    /// A manifest names a client that is not in the snapshot.
    #[error("vehicle {vehicle} lists unknown client '{name}'")]
    UnknownClient {
        /// Vehicle whose manifest holds the name.
        vehicle: String,
        /// Name that could not be resolved.
        name: String,
    },
    /// Two manifests name the same client.
    #[error("client '{name}' is assigned to both {first} and {second}")]
    DoubleAssignment {
        /// Client listed twice.
        name: String,
        /// Vehicle that claimed the client first.
        first: String,
        /// Vehicle that claimed it again.
        second: String,
    },
    /// A manifest weighs more than its vehicle can carry.
    #[error("vehicle {vehicle} is overloaded")]
    Overloaded {
        /// Overloaded vehicle.
        vehicle: String,
        /// Ledger rejection for the first cargo that did not fit.
        #[source]
        source: LoadError,
    },
}

impl FleetSnapshot {
    /// Capture the current state of `registry`.
    #[must_use]
    pub fn capture(registry: &FleetRegistry) -> Self {
        let clients = registry
            .clients()
            .iter()
            .map(|client| ClientRecord {
                name: client.name().to_owned(),
                weight: client.weight(),
                vip: client.is_vip(),
                loaded: client.is_loaded(),
            })
            .collect();
        let vehicles = registry
            .vehicles()
            .iter()
            .map(|vehicle| VehicleRecord {
                id: vehicle.id().as_str().to_owned(),
                kind: vehicle.kind().clone(),
                capacity: vehicle.capacity(),
                current_load: vehicle.current_load(),
                assigned: vehicle
                    .assigned()
                    .iter()
                    .map(|entry| entry.name.clone())
                    .collect(),
            })
            .collect();
        Self {
            company_name: registry.name().to_owned(),
            clients,
            vehicles,
        }
    }

    /// Rebuild a registry, replaying every manifest through the ledger.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when a record is invalid, keys collide, a
    /// manifest names an unknown or already-assigned client, or a manifest
    /// overloads its vehicle.
    pub fn restore(&self) -> Result<FleetRegistry, SnapshotError> {
        let mut registry = FleetRegistry::new(self.company_name.as_str())?;
        for record in &self.clients {
            registry.add_client(CargoUnit::new(
                record.name.as_str(),
                record.weight,
                record.vip,
            )?)?;
        }
        for record in &self.vehicles {
            let id = VehicleId::new(record.id.as_str())?;
            registry.add_vehicle(TransportUnit::new(id, record.capacity, record.kind.clone())?)?;
        }
        let ids: Vec<VehicleId> = registry
            .vehicles()
            .iter()
            .map(|vehicle| vehicle.id().clone())
            .collect();
        for (record, id) in self.vehicles.iter().zip(&ids) {
            replay_manifest(&mut registry, id, &record.assigned)?;
        }
        self.warn_on_drift(&registry);
        Ok(registry)
    }

    /// Serialise as pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "stored loads are compared within a tolerance"
    )]
    fn warn_on_drift(&self, registry: &FleetRegistry) {
        for record in &self.clients {
            let Some(client) = registry.client(record.name.trim()) else {
                continue;
            };
            if client.is_loaded() != record.loaded {
                warn!(
                    "client '{}' was stored with loaded={} but no manifest agrees; using {}",
                    client.name(),
                    record.loaded,
                    client.is_loaded()
                );
            }
        }
        for (record, vehicle) in self.vehicles.iter().zip(registry.vehicles()) {
            if (record.current_load - vehicle.current_load()).abs() > LOAD_TOLERANCE {
                warn!(
                    "vehicle {} was stored with load {} but its manifest weighs {}",
                    vehicle.id(),
                    record.current_load,
                    vehicle.current_load()
                );
            }
        }
    }
}

fn replay_manifest(
    registry: &mut FleetRegistry,
    vehicle: &VehicleId,
    names: &[String],
) -> Result<(), SnapshotError> {
    for name in names {
        if registry.client(name).is_none() {
            return Err(SnapshotError::UnknownClient {
                vehicle: vehicle.to_string(),
                name: name.clone(),
            });
        }
        if let Some(first) = registry.owner_of(name) {
            return Err(SnapshotError::DoubleAssignment {
                name: name.clone(),
                first: first.to_string(),
                second: vehicle.to_string(),
            });
        }
        match registry.load(vehicle.as_str(), name) {
            Ok(()) => {}
            Err(RegistryError::Load(source @ LoadError::CapacityExceeded { .. })) => {
                return Err(SnapshotError::Overloaded {
                    vehicle: vehicle.to_string(),
                    source,
                });
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}

impl From<&FleetRegistry> for FleetSnapshot {
    fn from(registry: &FleetRegistry) -> Self {
        Self::capture(registry)
    }
}

impl TryFrom<FleetSnapshot> for FleetRegistry {
    type Error = SnapshotError;

    fn try_from(snapshot: FleetSnapshot) -> Result<Self, Self::Error> {
        snapshot.restore()
    }
}
