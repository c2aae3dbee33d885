//! `FirstFitAllocator` implementation.

use std::time::Instant;

use haulage_core::{
    AllocationDiagnostics, AllocationOutcome, Allocator, CargoUnit, FleetRegistry, VehicleId,
};
use log::{info, trace, warn};

/// Greedy allocator preferring vehicles that already carry cargo.
///
/// The allocator holds no state between passes; one instance can serve any
/// number of registries.
///
/// # Examples
///
/// ```
/// use haulage_allocator::FirstFitAllocator;
/// use haulage_core::{Allocator, CargoUnit, FleetRegistry, SequentialIds, VehicleKind};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut fleet = FleetRegistry::new("Northwind Haulage")?;
/// fleet.add_client(CargoUnit::vip("Maria", 6.0)?)?;
/// fleet.add_client(CargoUnit::regular("Ivan", 5.0)?)?;
/// fleet.commission_vehicle(&mut SequentialIds::default(), 10.0, VehicleKind::Plain)?;
///
/// let outcome = FirstFitAllocator::new().allocate(&mut fleet);
/// assert_eq!(outcome.opened.len(), 1);
/// assert_eq!(outcome.unallocated, ["Ivan"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitAllocator;

impl FirstFitAllocator {
    /// Construct the allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Clients in the order a pass attempts them.
///
/// VIP clients come first, then regular clients; each group runs heaviest
/// first. The sort is stable, so equal weights keep registration order.
#[must_use]
pub fn priority_order(clients: &[CargoUnit]) -> Vec<&CargoUnit> {
    let (mut ordered, mut regular): (Vec<&CargoUnit>, Vec<&CargoUnit>) =
        clients.iter().partition(|client| client.is_vip());
    ordered.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
    regular.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
    ordered.extend(regular);
    ordered
}

impl Allocator for FirstFitAllocator {
    fn allocate(&self, registry: &mut FleetRegistry) -> AllocationOutcome {
        let started_at = Instant::now();
        registry.reset_assignments();

        let queue: Vec<String> = priority_order(registry.clients())
            .into_iter()
            .map(|client| client.name().to_owned())
            .collect();
        let fleet: Vec<VehicleId> = registry
            .vehicles()
            .iter()
            .map(|vehicle| vehicle.id().clone())
            .collect();
        let mut opened: Vec<VehicleId> = Vec::new();
        let mut attempts = 0_u64;

        for name in &queue {
            if opened
                .iter()
                .any(|id| try_load(registry, id, name, &mut attempts))
            {
                continue;
            }
            let fresh = fleet
                .iter()
                .filter(|id| !opened.contains(id))
                .find(|id| try_load(registry, id, name, &mut attempts))
                .cloned();
            match fresh {
                Some(id) => {
                    trace!("opened {id} for {name}");
                    opened.push(id);
                }
                None => warn!("no vehicle can take the cargo of client '{name}'"),
            }
        }

        let unallocated: Vec<String> = registry
            .unloaded_clients()
            .map(|client| client.name().to_owned())
            .collect();
        let diagnostics = AllocationDiagnostics {
            elapsed: started_at.elapsed(),
            load_attempts: attempts,
        };
        info!(
            "allocated {} of {} client(s) across {} vehicle(s) in {:?}",
            queue.len().saturating_sub(unallocated.len()),
            queue.len(),
            opened.len(),
            diagnostics.elapsed
        );
        AllocationOutcome {
            opened,
            unallocated,
            diagnostics,
        }
    }
}

// Ledger rejections mean "try the next vehicle"; they never leave the pass.
fn try_load(
    registry: &mut FleetRegistry,
    vehicle: &VehicleId,
    client: &str,
    attempts: &mut u64,
) -> bool {
    *attempts += 1;
    match registry.load(vehicle.as_str(), client) {
        Ok(()) => true,
        Err(err) => {
            trace!("{vehicle} rejected '{client}': {err}");
            false
        }
    }
}
