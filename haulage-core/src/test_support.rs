//! Fleet builders and ledger checks shared by unit, behaviour and property
//! tests.

use crate::{CargoUnit, FleetRegistry, RegistryError, SequentialIds, VehicleKind};

/// Build a registry of plain vehicles with sequential ids
/// (`VHC-00000001`, `VHC-00000002`, ...).
///
/// `clients` are `(name, weight, vip)` triples registered in order.
///
/// # Errors
/// Propagates validation and conflict errors from the registry.
pub fn fleet_from(
    name: &str,
    clients: &[(&str, f64, bool)],
    capacities: &[f64],
) -> Result<FleetRegistry, RegistryError> {
    let mut fleet = FleetRegistry::new(name)?;
    for &(client, weight, vip) in clients {
        fleet.add_client(CargoUnit::new(client, weight, vip)?)?;
    }
    let mut ids = SequentialIds::default();
    for &capacity in capacities {
        fleet.commission_vehicle(&mut ids, capacity, VehicleKind::Plain)?;
    }
    Ok(fleet)
}

/// Describe every broken ledger invariant; empty when the registry is
/// consistent.
///
/// Checked: loads match manifest sums and stay within capacity, no client
/// sits in two manifests, and `loaded` flags agree with the manifests.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "ledger sums are compared within a tolerance"
)]
pub fn ledger_violations(registry: &FleetRegistry) -> Vec<String> {
    let mut problems = Vec::new();
    for vehicle in registry.vehicles() {
        let sum = vehicle
            .assigned()
            .iter()
            .fold(0.0, |total, entry| total + entry.weight);
        if (sum - vehicle.current_load()).abs() > 1e-9 {
            problems.push(format!(
                "{} reports load {} but carries {sum}",
                vehicle.id(),
                vehicle.current_load()
            ));
        }
        if vehicle.current_load() > vehicle.capacity() {
            problems.push(format!("{} is over capacity", vehicle.id()));
        }
    }
    for client in registry.clients() {
        let owners = registry
            .vehicles()
            .iter()
            .filter(|vehicle| vehicle.contains(client.name()))
            .count();
        if owners > 1 {
            problems.push(format!("{} sits in {owners} vehicles", client.name()));
        }
        if client.is_loaded() != (owners == 1) {
            problems.push(format!(
                "{} has loaded={} with {owners} owner(s)",
                client.name(),
                client.is_loaded()
            ));
        }
    }
    problems
}
