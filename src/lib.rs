//! Facade crate for the haulage cargo allocation engine.
//!
//! This crate re-exports the fleet ledger types and exposes the first-fit
//! allocator behind a feature flag.

#![forbid(unsafe_code)]

pub use haulage_core::{
    AllocationDiagnostics, AllocationOutcome, AllocationReport, Allocator, CargoUnit,
    ClientListing, FleetListing, FleetRegistry, FleetStatistics, IdGenerator, LoadError,
    ManifestEntry, RandomIds, RegistryError, SequentialIds, TransportUnit, ValidationError,
    VehicleId, VehicleKind, VehicleListing, VehicleLoadReport,
};

#[cfg(feature = "serde")]
pub use haulage_core::{ClientRecord, FleetSnapshot, SnapshotError, VehicleRecord};

#[cfg(feature = "test-support")]
pub use haulage_core::test_support;

#[cfg(feature = "allocator-first-fit")]
pub use haulage_allocator::{FirstFitAllocator, priority_order};
