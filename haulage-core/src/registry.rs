//! The owning collection of clients and vehicles.
//!
//! The registry keeps both collections in registration order, rejects
//! duplicate keys and cascades removals through the cargo ledger so that a
//! client is loaded exactly when some vehicle's manifest names it.

use log::debug;

use crate::{
    CargoUnit, IdGenerator, RegistryError, TransportUnit, ValidationError, VehicleId, VehicleKind,
};

/// A named fleet: clients keyed by name and vehicles keyed by id.
///
/// # Examples
///
/// ```
/// use haulage_core::{CargoUnit, FleetRegistry, SequentialIds, VehicleKind};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut fleet = FleetRegistry::new("Northwind Haulage")?;
/// fleet.add_client(CargoUnit::regular("Ivan", 3.0)?)?;
/// let truck = fleet.commission_vehicle(&mut SequentialIds::default(), 5.0, VehicleKind::Plain)?;
///
/// fleet.load(truck.as_str(), "Ivan")?;
/// fleet.remove_client("Ivan")?;
/// assert_eq!(fleet.vehicle(truck.as_str()).map(|v| v.current_load()), Some(0.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FleetRegistry {
    name: String,
    clients: Vec<CargoUnit>,
    vehicles: Vec<TransportUnit>,
}

impl FleetRegistry {
    /// Validates and constructs an empty registry.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyRegistryName`] for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRegistryName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            clients: Vec::new(),
            vehicles: Vec::new(),
        })
    }

    /// Company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clients in registration order.
    #[must_use]
    pub fn clients(&self) -> &[CargoUnit] {
        &self.clients
    }

    /// Vehicles in registration order.
    #[must_use]
    pub fn vehicles(&self) -> &[TransportUnit] {
        &self.vehicles
    }

    /// Look up a client by name.
    ///
    /// Names are matched the way [`CargoUnit::new`] stores them, with
    /// surrounding whitespace trimmed.
    #[must_use]
    pub fn client(&self, name: &str) -> Option<&CargoUnit> {
        let name = name.trim();
        self.clients.iter().find(|client| client.name() == name)
    }

    /// Look up a vehicle by id.
    #[must_use]
    pub fn vehicle(&self, id: &str) -> Option<&TransportUnit> {
        self.vehicles.iter().find(|vehicle| vehicle.id().as_str() == id)
    }

    /// Id of the vehicle carrying the named client, if any.
    #[must_use]
    pub fn owner_of(&self, name: &str) -> Option<&VehicleId> {
        let name = name.trim();
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.contains(name))
            .map(TransportUnit::id)
    }

    /// Register a vehicle.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateVehicle`] if the id is taken and
    /// [`RegistryError::VehicleNotEmpty`] if the vehicle carries cargo the
    /// registry does not own.
    pub fn add_vehicle(&mut self, vehicle: TransportUnit) -> Result<(), RegistryError> {
        if self.vehicle(vehicle.id().as_str()).is_some() {
            return Err(RegistryError::DuplicateVehicle {
                id: vehicle.id().clone(),
            });
        }
        if !vehicle.is_empty() {
            return Err(RegistryError::VehicleNotEmpty {
                id: vehicle.id().clone(),
            });
        }
        debug!(
            "registered {} vehicle {} with capacity {}",
            vehicle.kind().label(),
            vehicle.id(),
            vehicle.capacity()
        );
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Build a vehicle with an id drawn from `ids` and register it.
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] for invalid attributes and
    /// [`RegistryError::DuplicateVehicle`] if the generator repeats an id
    /// already in the registry.
    pub fn commission_vehicle<G>(
        &mut self,
        ids: &mut G,
        capacity: f64,
        kind: VehicleKind,
    ) -> Result<VehicleId, RegistryError>
    where
        G: IdGenerator + ?Sized,
    {
        let vehicle = TransportUnit::with_generated_id(ids, capacity, kind)?;
        let id = vehicle.id().clone();
        self.add_vehicle(vehicle)?;
        Ok(id)
    }

    /// Remove a vehicle, returning its cargo to the unloaded state first.
    ///
    /// The returned vehicle is empty; its former clients stay registered.
    ///
    /// # Errors
    /// Returns [`RegistryError::VehicleNotFound`] for an unknown id.
    pub fn remove_vehicle(&mut self, id: &str) -> Result<TransportUnit, RegistryError> {
        let index = self
            .vehicles
            .iter()
            .position(|vehicle| vehicle.id().as_str() == id)
            .ok_or_else(|| RegistryError::VehicleNotFound { id: id.to_owned() })?;
        let mut vehicle = self.vehicles.remove(index);
        let released = vehicle.unload(None, &mut self.clients);
        debug!(
            "removed vehicle {id}, released {} cargo unit(s)",
            released.len()
        );
        Ok(vehicle)
    }

    /// Register a client.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateClient`] if the name is taken and
    /// [`LoadError::AlreadyLoaded`](crate::LoadError::AlreadyLoaded) if the
    /// cargo already sits in a vehicle outside this registry.
    pub fn add_client(&mut self, client: CargoUnit) -> Result<(), RegistryError> {
        if self.client(client.name()).is_some() {
            return Err(RegistryError::DuplicateClient {
                name: client.name().to_owned(),
            });
        }
        if client.is_loaded() {
            return Err(crate::LoadError::AlreadyLoaded {
                name: client.name().to_owned(),
            }
            .into());
        }
        debug!(
            "registered client {} ({} t, vip: {})",
            client.name(),
            client.weight(),
            client.is_vip()
        );
        self.clients.push(client);
        Ok(())
    }

    /// Remove a client, unloading it from its vehicle first.
    ///
    /// # Errors
    /// Returns [`RegistryError::ClientNotFound`] for an unknown name.
    pub fn remove_client(&mut self, name: &str) -> Result<CargoUnit, RegistryError> {
        let name = name.trim();
        let index = self
            .clients
            .iter()
            .position(|client| client.name() == name)
            .ok_or_else(|| RegistryError::ClientNotFound {
                name: name.to_owned(),
            })?;
        if let Some(vehicle) = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.contains(name))
        {
            vehicle.unload(Some(name), &mut self.clients);
            debug!("unloaded client {name} from {} before removal", vehicle.id());
        }
        Ok(self.clients.remove(index))
    }

    /// Load a registered client onto a registered vehicle.
    ///
    /// # Errors
    /// Returns [`RegistryError::VehicleNotFound`] or
    /// [`RegistryError::ClientNotFound`] for unknown keys and
    /// [`RegistryError::Load`] when the ledger rejects the cargo.
    pub fn load(&mut self, vehicle_id: &str, client_name: &str) -> Result<(), RegistryError> {
        let client_name = client_name.trim();
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.id().as_str() == vehicle_id)
            .ok_or_else(|| RegistryError::VehicleNotFound {
                id: vehicle_id.to_owned(),
            })?;
        let client = self
            .clients
            .iter_mut()
            .find(|client| client.name() == client_name)
            .ok_or_else(|| RegistryError::ClientNotFound {
                name: client_name.to_owned(),
            })?;
        vehicle.load(client)?;
        Ok(())
    }

    /// Unload one client (`Some(name)`) or everything (`None`) from a
    /// vehicle, returning the affected clients in their new state.
    ///
    /// # Errors
    /// Returns [`RegistryError::VehicleNotFound`] for an unknown id.
    pub fn unload(
        &mut self,
        vehicle_id: &str,
        client_name: Option<&str>,
    ) -> Result<Vec<CargoUnit>, RegistryError> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.id().as_str() == vehicle_id)
            .ok_or_else(|| RegistryError::VehicleNotFound {
                id: vehicle_id.to_owned(),
            })?;
        let removed = vehicle.unload(client_name.map(str::trim), &mut self.clients);
        Ok(removed
            .iter()
            .filter_map(|entry| self.client(&entry.name).cloned())
            .collect())
    }

    /// Empty every vehicle; all clients end up unloaded.
    pub fn reset_assignments(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.unload(None, &mut self.clients);
        }
    }

    /// Clients whose cargo is not on any vehicle.
    pub fn unloaded_clients(&self) -> impl Iterator<Item = &CargoUnit> + '_ {
        self.clients.iter().filter(|client| !client.is_loaded())
    }

    /// Vehicles with some capacity left.
    pub fn available_vehicles(&self) -> impl Iterator<Item = &TransportUnit> + '_ {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.available_capacity() > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadError, SequentialIds};
    use rstest::{fixture, rstest};

    #[fixture]
    fn fleet() -> FleetRegistry {
        let mut fleet = FleetRegistry::new("Test Fleet").expect("registry");
        for (name, weight, vip) in [("a", 3.0, false), ("b", 2.0, true)] {
            fleet
                .add_client(CargoUnit::new(name, weight, vip).expect("client"))
                .expect("unique client");
        }
        let mut ids = SequentialIds::default();
        fleet
            .commission_vehicle(&mut ids, 5.0, VehicleKind::Plain)
            .expect("vehicle");
        fleet
            .commission_vehicle(&mut ids, 5.0, VehicleKind::Train { car_count: 2 })
            .expect("vehicle");
        fleet
    }

    const TRUCK: &str = "VHC-00000001";
    const TRAIN: &str = "TRN-00000002";

    #[rstest]
    fn blank_registry_name_is_rejected() {
        assert_eq!(
            FleetRegistry::new("  "),
            Err(ValidationError::EmptyRegistryName)
        );
    }

    #[rstest]
    fn duplicate_client_names_conflict(mut fleet: FleetRegistry) {
        let err = fleet
            .add_client(CargoUnit::regular("a", 1.0).expect("client"))
            .expect_err("duplicate");
        assert_eq!(err, RegistryError::DuplicateClient { name: "a".into() });
        assert_eq!(fleet.clients().len(), 2);
    }

    #[rstest]
    fn duplicate_vehicle_ids_conflict(mut fleet: FleetRegistry) {
        let twin = TransportUnit::new(
            VehicleId::new(TRUCK).expect("id"),
            1.0,
            VehicleKind::Plain,
        )
        .expect("vehicle");
        let err = fleet.add_vehicle(twin).expect_err("duplicate");
        assert!(matches!(err, RegistryError::DuplicateVehicle { .. }));
        assert_eq!(fleet.vehicles().len(), 2);
    }

    #[rstest]
    fn repeating_generator_is_reported_as_conflict(mut fleet: FleetRegistry) {
        let mut stale = SequentialIds::starting_at(1);
        let err = fleet
            .commission_vehicle(&mut stale, 1.0, VehicleKind::Plain)
            .expect_err("id reused");
        assert!(matches!(err, RegistryError::DuplicateVehicle { .. }));
    }

    #[rstest]
    fn invalid_commission_surfaces_validation(mut fleet: FleetRegistry) {
        let err = fleet
            .commission_vehicle(&mut SequentialIds::default(), 0.0, VehicleKind::Plain)
            .expect_err("bad capacity");
        assert!(matches!(err, RegistryError::Validation(_)));
    }

    #[rstest]
    fn loaded_vehicles_cannot_be_registered(mut fleet: FleetRegistry) {
        let mut outsider = TransportUnit::new(
            VehicleId::new("VHC-X").expect("id"),
            9.0,
            VehicleKind::Plain,
        )
        .expect("vehicle");
        let mut stray = CargoUnit::regular("stray", 1.0).expect("client");
        outsider.load(&mut stray).expect("fits");
        let err = fleet.add_vehicle(outsider).expect_err("non-empty");
        assert!(matches!(err, RegistryError::VehicleNotEmpty { .. }));
    }

    #[rstest]
    fn removing_loaded_client_frees_its_weight(mut fleet: FleetRegistry) {
        fleet.load(TRUCK, "a").expect("fits");
        fleet.load(TRUCK, "b").expect("fits");
        let before = fleet.vehicle(TRUCK).expect("truck").available_capacity();

        let removed = fleet.remove_client("a").expect("registered");

        assert!(!removed.is_loaded());
        let truck = fleet.vehicle(TRUCK).expect("truck");
        assert_eq!(truck.available_capacity() - before, 3.0);
        assert!(!truck.contains("a"));
        assert!(fleet.client("b").expect("b").is_loaded());
    }

    #[rstest]
    fn removing_vehicle_releases_but_keeps_clients(mut fleet: FleetRegistry) {
        fleet.load(TRAIN, "b").expect("fits");
        let vehicle = fleet.remove_vehicle(TRAIN).expect("registered");
        assert!(vehicle.is_empty());
        let client = fleet.client("b").expect("client kept");
        assert!(!client.is_loaded());
        assert_eq!(fleet.owner_of("b"), None);
    }

    #[rstest]
    fn unknown_keys_are_not_found(mut fleet: FleetRegistry) {
        assert!(matches!(
            fleet.remove_client("ghost"),
            Err(RegistryError::ClientNotFound { .. })
        ));
        assert!(matches!(
            fleet.remove_vehicle("ghost"),
            Err(RegistryError::VehicleNotFound { .. })
        ));
        assert!(matches!(
            fleet.load(TRUCK, "ghost"),
            Err(RegistryError::ClientNotFound { .. })
        ));
    }

    #[rstest]
    fn loading_twice_surfaces_ledger_error(mut fleet: FleetRegistry) {
        fleet.load(TRUCK, "a").expect("fits");
        let err = fleet.load(TRAIN, "a").expect_err("already loaded");
        assert!(matches!(
            err,
            RegistryError::Load(LoadError::AlreadyLoaded { .. })
        ));
        assert_eq!(fleet.owner_of("a").map(VehicleId::as_str), Some(TRUCK));
    }

    #[rstest]
    fn queries_reflect_current_state(mut fleet: FleetRegistry) {
        fleet.load(TRAIN, "a").expect("fits");
        let unloaded: Vec<&str> = fleet.unloaded_clients().map(CargoUnit::name).collect();
        assert_eq!(unloaded, ["b"]);
        fleet.load(TRAIN, "b").expect("exact fit");
        let available: Vec<&str> = fleet
            .available_vehicles()
            .map(|vehicle| vehicle.id().as_str())
            .collect();
        assert_eq!(available, [TRUCK]);
    }

    #[rstest]
    fn registry_unload_returns_updated_clients(mut fleet: FleetRegistry) {
        fleet.load(TRUCK, "a").expect("fits");
        fleet.load(TRUCK, "b").expect("fits");
        let released = fleet.unload(TRUCK, None).expect("truck");
        let names: Vec<&str> = released.iter().map(CargoUnit::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(released.iter().all(|client| !client.is_loaded()));
    }

    #[rstest]
    fn client_lookups_ignore_surrounding_whitespace(mut fleet: FleetRegistry) {
        fleet.load(TRUCK, " a ").expect("fits");
        assert!(fleet.client("a ").expect("a").is_loaded());
        assert_eq!(fleet.owner_of("\ta").map(VehicleId::as_str), Some(TRUCK));

        let released = fleet.unload(TRUCK, Some(" a")).expect("truck");
        assert_eq!(released.len(), 1);

        let removed = fleet.remove_client("  b  ").expect("registered");
        assert_eq!(removed.name(), "b");
    }

    #[rstest]
    fn reset_empties_every_vehicle(mut fleet: FleetRegistry) {
        fleet.load(TRUCK, "a").expect("fits");
        fleet.load(TRAIN, "b").expect("fits");
        fleet.reset_assignments();
        assert!(fleet.vehicles().iter().all(TransportUnit::is_empty));
        assert_eq!(fleet.unloaded_clients().count(), 2);
    }
}
