//! Capacity-bounded vehicles and their cargo ledger.
//!
//! Every vehicle kind shares the same ledger: the kind tag only carries the
//! extra attributes shown to users and persisted in snapshots. Vehicles keep
//! cargo by name and resolve names against the caller's authoritative cargo
//! collection, so a client is never copied into a vehicle.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CargoUnit, IdGenerator, LoadError, ValidationError};

/// Unique, immutable vehicle identifier such as `TRN-7K2Q9XQA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct VehicleId(String);

impl VehicleId {
    /// Validates and wraps an identifier.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyVehicleId`] for a blank identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyVehicleId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_parts(prefix: &str, suffix: &str) -> Self {
        Self(format!("{prefix}-{suffix}"))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind tag with the attributes specific to each vehicle type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind")
)]
pub enum VehicleKind {
    /// Generic road vehicle without extra attributes.
    Plain,
    /// Train made of a number of cars.
    Train {
        /// Number of cars, at least one.
        car_count: u32,
    },
    /// Airplane with an altitude ceiling in metres.
    Airplane {
        /// Maximum flight altitude, strictly positive.
        max_altitude: f64,
    },
}

impl VehicleKind {
    /// Validated train kind.
    ///
    /// # Errors
    /// Returns [`ValidationError::ZeroCarCount`] when `car_count` is zero.
    pub const fn train(car_count: u32) -> Result<Self, ValidationError> {
        if car_count == 0 {
            return Err(ValidationError::ZeroCarCount);
        }
        Ok(Self::Train { car_count })
    }

    /// Validated airplane kind.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveAltitude`] unless
    /// `max_altitude` is finite and strictly positive.
    pub fn airplane(max_altitude: f64) -> Result<Self, ValidationError> {
        if !(max_altitude.is_finite() && max_altitude > 0.0) {
            return Err(ValidationError::NonPositiveAltitude { max_altitude });
        }
        Ok(Self::Airplane { max_altitude })
    }

    /// Prefix used when generating identifiers for this kind.
    #[must_use]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Self::Plain => "VHC",
            Self::Train { .. } => "TRN",
            Self::Airplane { .. } => "AIR",
        }
    }

    /// Human-readable kind name, matching the persisted tag.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Train { .. } => "Train",
            Self::Airplane { .. } => "Airplane",
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Plain => Ok(()),
            Self::Train { car_count } => Self::train(car_count).map(drop),
            Self::Airplane { max_altitude } => Self::airplane(max_altitude).map(drop),
        }
    }
}

/// A cargo reference held by a vehicle, in loading order.
///
/// The weight is copied at loading time; cargo weights never change after
/// construction, so the copy cannot diverge from the client record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ManifestEntry {
    /// Name of the loaded client.
    pub name: String,
    /// Weight of the loaded cargo in tonnes.
    pub weight: f64,
}

/// A capacity-bounded carrier tracking its current load.
///
/// Invariant: `current_load` equals the in-order sum of manifest weights and
/// never exceeds `capacity`.
///
/// # Examples
///
/// ```
/// use haulage_core::{CargoUnit, TransportUnit, VehicleId, VehicleKind};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut truck = TransportUnit::new(VehicleId::new("VHC-1")?, 5.0, VehicleKind::Plain)?;
/// let mut cargo = CargoUnit::regular("Ivan", 3.0)?;
/// truck.load(&mut cargo)?;
/// assert_eq!(truck.available_capacity(), 2.0);
/// assert!(cargo.is_loaded());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransportUnit {
    id: VehicleId,
    capacity: f64,
    current_load: f64,
    manifest: Vec<ManifestEntry>,
    kind: VehicleKind,
}

impl TransportUnit {
    /// Validates and constructs an empty vehicle.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveCapacity`] unless `capacity` is
    /// finite and strictly positive, or the kind's own validation error.
    pub fn new(id: VehicleId, capacity: f64, kind: VehicleKind) -> Result<Self, ValidationError> {
        Self::validate(capacity, &kind)?;
        Ok(Self {
            id,
            capacity,
            current_load: 0.0,
            manifest: Vec::new(),
            kind,
        })
    }

    /// Constructs an empty vehicle whose id comes from `ids`.
    ///
    /// Input is validated before an id is drawn, so a rejected vehicle does
    /// not consume one.
    ///
    /// # Errors
    /// See [`TransportUnit::new`].
    pub fn with_generated_id<G>(
        ids: &mut G,
        capacity: f64,
        kind: VehicleKind,
    ) -> Result<Self, ValidationError>
    where
        G: IdGenerator + ?Sized,
    {
        Self::validate(capacity, &kind)?;
        let id = ids.next_id(&kind);
        Self::new(id, capacity, kind)
    }

    fn validate(capacity: f64, kind: &VehicleKind) -> Result<(), ValidationError> {
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(ValidationError::NonPositiveCapacity { capacity });
        }
        kind.validate()
    }

    /// Vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Kind tag and kind-specific attributes.
    #[must_use]
    pub const fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    /// Maximum load in tonnes.
    #[must_use]
    pub const fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Sum of the weights currently on board.
    #[must_use]
    pub const fn current_load(&self) -> f64 {
        self.current_load
    }

    /// Loaded cargo in loading order.
    #[must_use]
    pub fn assigned(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    /// Whether no cargo is on board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    /// Whether the named client's cargo is on board.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.manifest.iter().any(|entry| entry.name == name)
    }

    /// Capacity still free.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is expressed in fractional tonnes"
    )]
    pub fn available_capacity(&self) -> f64 {
        self.capacity - self.current_load
    }

    /// Fraction of capacity in use, in `0.0..=1.0`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is expressed in fractional tonnes"
    )]
    pub fn load_fraction(&self) -> f64 {
        if self.capacity > 0.0 {
            self.current_load / self.capacity
        } else {
            0.0
        }
    }

    /// Put `cargo` on board and mark it loaded.
    ///
    /// # Errors
    /// Returns [`LoadError::AlreadyLoaded`] if the cargo sits in a vehicle
    /// already and [`LoadError::CapacityExceeded`] if it does not fit. The
    /// vehicle and the cargo are unchanged on error.
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is expressed in fractional tonnes"
    )]
    pub fn load(&mut self, cargo: &mut CargoUnit) -> Result<(), LoadError> {
        if cargo.is_loaded() {
            return Err(LoadError::AlreadyLoaded {
                name: cargo.name().to_owned(),
            });
        }
        let required = cargo.weight();
        if self.current_load + required > self.capacity {
            return Err(LoadError::CapacityExceeded {
                required,
                remaining: self.available_capacity(),
            });
        }
        self.manifest.push(ManifestEntry {
            name: cargo.name().to_owned(),
            weight: required,
        });
        self.recompute_load();
        cargo.set_loaded(true);
        Ok(())
    }

    /// Take cargo off board.
    ///
    /// With `Some(name)` only the first entry with that name is removed;
    /// with `None` every entry is removed in loading order. Removed entries
    /// are resolved against `cargo` to clear their loaded flag. An unknown
    /// name yields an empty result.
    pub fn unload(&mut self, name: Option<&str>, cargo: &mut [CargoUnit]) -> Vec<ManifestEntry> {
        let removed = match name {
            Some(target) => self
                .manifest
                .iter()
                .position(|entry| entry.name == target)
                .map(|index| self.manifest.remove(index))
                .into_iter()
                .collect(),
            None => std::mem::take(&mut self.manifest),
        };
        for entry in &removed {
            if let Some(unit) = cargo.iter_mut().find(|unit| unit.name() == entry.name) {
                unit.set_loaded(false);
            }
        }
        self.recompute_load();
        removed
    }

    // Left fold from +0.0 so an emptied vehicle reports exactly zero and a
    // fresh push adds the same bits as the capacity check above.
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is expressed in fractional tonnes"
    )]
    fn recompute_load(&mut self) {
        self.current_load = self
            .manifest
            .iter()
            .fold(0.0, |total, entry| total + entry.weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn truck() -> TransportUnit {
        TransportUnit::new(
            VehicleId::new("VHC-1").expect("id"),
            5.0,
            VehicleKind::Plain,
        )
        .expect("valid vehicle")
    }

    fn cargo(name: &str, weight: f64) -> CargoUnit {
        CargoUnit::regular(name, weight).expect("valid cargo")
    }

    #[rstest]
    fn load_within_capacity_updates_both_sides(mut truck: TransportUnit) {
        let mut first = cargo("a", 3.0);
        truck.load(&mut first).expect("fits");
        assert!(first.is_loaded());
        assert_eq!(truck.current_load(), 3.0);
        assert_eq!(truck.available_capacity(), 2.0);
        assert_eq!(truck.assigned().len(), 1);
    }

    #[rstest]
    fn overflow_reports_required_and_remaining(mut truck: TransportUnit) {
        let mut first = cargo("a", 3.0);
        let mut second = cargo("b", 3.0);
        truck.load(&mut first).expect("fits");
        let err = truck.load(&mut second).expect_err("overflow");
        assert_eq!(
            err,
            LoadError::CapacityExceeded {
                required: 3.0,
                remaining: 2.0
            }
        );
        assert!(!second.is_loaded());
        assert_eq!(truck.current_load(), 3.0);
    }

    #[rstest]
    fn exact_fit_is_accepted(mut truck: TransportUnit) {
        let mut full = cargo("a", 5.0);
        truck.load(&mut full).expect("exact fit");
        assert_eq!(truck.available_capacity(), 0.0);
        assert_eq!(truck.load_fraction(), 1.0);
    }

    #[rstest]
    fn loaded_cargo_is_rejected(mut truck: TransportUnit) {
        let mut other = truck.clone();
        let mut shared = cargo("a", 1.0);
        other.load(&mut shared).expect("fits");
        let err = truck.load(&mut shared).expect_err("already loaded");
        assert!(matches!(err, LoadError::AlreadyLoaded { name } if name == "a"));
        assert!(truck.is_empty());
    }

    #[rstest]
    fn unload_by_name_removes_first_match(mut truck: TransportUnit) {
        let mut units = vec![cargo("a", 1.0), cargo("b", 2.0)];
        for unit in &mut units {
            truck.load(unit).expect("fits");
        }
        let removed = truck.unload(Some("a"), &mut units);
        assert_eq!(removed.len(), 1);
        assert_eq!(truck.current_load(), 2.0);
        assert!(!units.first().expect("a").is_loaded());
        assert!(units.get(1).expect("b").is_loaded());
    }

    #[rstest]
    fn unload_unknown_name_is_empty(mut truck: TransportUnit) {
        let mut units = vec![cargo("a", 1.0)];
        truck.load(units.first_mut().expect("a")).expect("fits");
        assert!(truck.unload(Some("ghost"), &mut units).is_empty());
        assert_eq!(truck.current_load(), 1.0);
    }

    #[rstest]
    fn unload_all_returns_loading_order_and_resets(mut truck: TransportUnit) {
        let mut units = vec![cargo("a", 0.1), cargo("b", 0.2), cargo("c", 0.3)];
        for unit in &mut units {
            truck.load(unit).expect("fits");
        }
        let removed: Vec<String> = truck
            .unload(None, &mut units)
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(removed, ["a", "b", "c"]);
        assert_eq!(truck.current_load(), 0.0);
        assert!(units.iter().all(|unit| !unit.is_loaded()));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn rejects_bad_capacity(#[case] capacity: f64) {
        let id = VehicleId::new("VHC-1").expect("id");
        let result = TransportUnit::new(id, capacity, VehicleKind::Plain);
        assert!(matches!(
            result,
            Err(ValidationError::NonPositiveCapacity { .. })
        ));
    }

    #[rstest]
    fn rejects_hand_built_invalid_kinds() {
        let id = VehicleId::new("TRN-1").expect("id");
        let result = TransportUnit::new(id, 10.0, VehicleKind::Train { car_count: 0 });
        assert_eq!(result, Err(ValidationError::ZeroCarCount));
    }

    #[rstest]
    #[case(VehicleKind::Plain, "VHC")]
    #[case(VehicleKind::Train { car_count: 5 }, "TRN")]
    #[case(VehicleKind::Airplane { max_altitude: 10_000.0 }, "AIR")]
    fn kinds_map_to_id_prefixes(#[case] kind: VehicleKind, #[case] prefix: &str) {
        assert_eq!(kind.id_prefix(), prefix);
    }

    #[rstest]
    fn blank_vehicle_ids_are_rejected() {
        assert_eq!(VehicleId::new(" "), Err(ValidationError::EmptyVehicleId));
    }
}
