//! Core domain types for the haulage allocation engine.
//!
//! The crate models clients' cargo ([`CargoUnit`]), capacity-bounded
//! vehicles ([`TransportUnit`]) and the [`FleetRegistry`] that owns both and
//! keeps them consistent. Allocation strategies plug in through the
//! [`Allocator`] trait. Constructors return `Result` so invalid input never
//! produces a value.
//!
//! Ledger invariants, upheld after every completed operation:
//! - a vehicle's load equals the sum of its manifest and never exceeds its
//!   capacity;
//! - a client sits in at most one manifest, and is flagged loaded exactly
//!   when it does;
//! - client names and vehicle ids are unique within a registry.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocator;
mod cargo;
mod error;
mod ids;
mod registry;
mod report;
mod vehicle;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod snapshot;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use allocator::{AllocationDiagnostics, AllocationOutcome, Allocator};
pub use cargo::CargoUnit;
pub use error::{LoadError, RegistryError, ValidationError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use registry::FleetRegistry;
pub use report::{
    AllocationReport, ClientListing, FleetListing, FleetStatistics, VehicleListing,
    VehicleLoadReport,
};
pub use vehicle::{ManifestEntry, TransportUnit, VehicleId, VehicleKind};

#[cfg(feature = "serde")]
pub use snapshot::{ClientRecord, FleetSnapshot, SnapshotError, VehicleRecord};
