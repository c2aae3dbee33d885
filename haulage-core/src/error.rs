//! Error taxonomy shared by the ledger and the registry.

use thiserror::Error;

use crate::VehicleId;

/// Errors returned by constructors when input fails validation.
///
/// The rejected value is never created, so callers can retry with corrected
/// input without any cleanup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A client name was empty or whitespace only.
    #[error("client name must be a non-empty string")]
    EmptyClientName,
    /// A registry name was empty or whitespace only.
    #[error("registry name must be a non-empty string")]
    EmptyRegistryName,
    /// A vehicle identifier was empty or whitespace only.
    #[error("vehicle id must be a non-empty string")]
    EmptyVehicleId,
    /// Cargo weight was zero, negative or not finite.
    #[error("cargo weight must be a positive number, got {weight}")]
    NonPositiveWeight {
        /// Rejected weight.
        weight: f64,
    },
    /// Vehicle capacity was zero, negative or not finite.
    #[error("vehicle capacity must be a positive number, got {capacity}")]
    NonPositiveCapacity {
        /// Rejected capacity.
        capacity: f64,
    },
    /// A train was declared without cars.
    #[error("a train must have at least one car")]
    ZeroCarCount,
    /// An airplane altitude ceiling was zero, negative or not finite.
    #[error("maximum altitude must be a positive number, got {max_altitude}")]
    NonPositiveAltitude {
        /// Rejected altitude.
        max_altitude: f64,
    },
}

/// Errors returned by [`TransportUnit::load`](crate::TransportUnit::load).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The cargo already sits in a vehicle.
    #[error("cargo of client '{name}' is already loaded")]
    AlreadyLoaded {
        /// Name of the client owning the cargo.
        name: String,
    },
    /// The cargo does not fit into the remaining capacity.
    #[error("capacity exceeded: {required} t required, {remaining:.2} t available")]
    CapacityExceeded {
        /// Weight of the rejected cargo.
        required: f64,
        /// Capacity left on the vehicle at the time of the attempt.
        remaining: f64,
    },
}

/// Errors returned by [`FleetRegistry`](crate::FleetRegistry) operations.
///
/// The registry is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A client with the same name is already registered.
    #[error("client '{name}' already exists")]
    DuplicateClient {
        /// Conflicting client name.
        name: String,
    },
    /// A vehicle with the same id is already registered.
    #[error("vehicle {id} already exists")]
    DuplicateVehicle {
        /// Conflicting vehicle id.
        id: VehicleId,
    },
    /// A vehicle arrived with cargo that the registry does not own.
    #[error("vehicle {id} must be empty when registered")]
    VehicleNotEmpty {
        /// Id of the rejected vehicle.
        id: VehicleId,
    },
    /// No client with the given name is registered.
    #[error("client '{name}' not found")]
    ClientNotFound {
        /// Name that was looked up.
        name: String,
    },
    /// No vehicle with the given id is registered.
    #[error("vehicle {id} not found")]
    VehicleNotFound {
        /// Id that was looked up.
        id: String,
    },
    /// A ledger operation rejected the cargo.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// A value built on the caller's behalf failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
