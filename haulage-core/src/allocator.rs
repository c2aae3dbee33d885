use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{FleetRegistry, VehicleId};

/// Timing and effort figures for one allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AllocationDiagnostics {
    /// Wall-clock time spent in the pass.
    pub elapsed: Duration,
    /// Number of load attempts made, successful or not.
    pub load_attempts: u64,
}

/// Result of an allocation pass.
///
/// Unplaced clients are reported here as data; an allocation pass never
/// fails.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AllocationOutcome {
    /// Vehicles that received cargo, in the order they were first used.
    pub opened: Vec<VehicleId>,
    /// Clients left unloaded, in registration order.
    pub unallocated: Vec<String>,
    /// Figures describing the pass.
    pub diagnostics: AllocationDiagnostics,
}

/// Assign registered clients to registered vehicles.
///
/// Implementations recompute the whole assignment inside the exclusive
/// borrow of the registry, so no caller can observe a half-reset fleet.
/// Allocators must be `Send + Sync` so hosts can share one across threads.
pub trait Allocator: Send + Sync {
    /// Reassign every client, mutating `registry` in place.
    fn allocate(&self, registry: &mut FleetRegistry) -> AllocationOutcome;
}
