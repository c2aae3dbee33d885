//! Sample fleet used by `init --demo`.

use haulage_core::{CargoUnit, FleetRegistry, IdGenerator, RegistryError, VehicleKind};

const DEMO_CLIENTS: [(&str, f64, bool); 5] = [
    ("Ivan Petrov", 3.5, false),
    ("Maria Sidorova", 2.1, true),
    ("Alexey Ivanov", 4.2, false),
    ("Olga Smirnova", 1.8, true),
    ("Dmitry Kuznetsov", 2.7, false),
];

/// Five clients and one vehicle of each kind.
pub(crate) fn demo_fleet(
    name: &str,
    ids: &mut dyn IdGenerator,
) -> Result<FleetRegistry, RegistryError> {
    let mut fleet = FleetRegistry::new(name)?;
    for (client, weight, vip) in DEMO_CLIENTS {
        fleet.add_client(CargoUnit::new(client, weight, vip)?)?;
    }
    fleet.commission_vehicle(ids, 5.0, VehicleKind::Plain)?;
    fleet.commission_vehicle(ids, 10.0, VehicleKind::train(5)?)?;
    fleet.commission_vehicle(ids, 8.0, VehicleKind::airplane(10_000.0)?)?;
    Ok(fleet)
}
