//! Client cargo requests.

use crate::ValidationError;

/// A client's weighted load request awaiting transport.
///
/// The `loaded` flag is owned by the ledger: only
/// [`TransportUnit::load`](crate::TransportUnit::load) and
/// [`TransportUnit::unload`](crate::TransportUnit::unload) change it.
///
/// # Examples
///
/// ```
/// use haulage_core::CargoUnit;
///
/// # fn main() -> Result<(), haulage_core::ValidationError> {
/// let cargo = CargoUnit::new("  Ivan Petrov ", 3.5, false)?;
/// assert_eq!(cargo.name(), "Ivan Petrov");
/// assert!(!cargo.is_loaded());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CargoUnit {
    name: String,
    weight: f64,
    vip: bool,
    loaded: bool,
}

impl CargoUnit {
    /// Validates and constructs an unloaded [`CargoUnit`].
    ///
    /// Surrounding whitespace is trimmed from `name`.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyClientName`] for a blank name and
    /// [`ValidationError::NonPositiveWeight`] unless `weight` is finite and
    /// strictly positive.
    pub fn new(name: impl Into<String>, weight: f64, vip: bool) -> Result<Self, ValidationError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyClientName);
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight { weight });
        }
        Ok(Self {
            name: trimmed.to_owned(),
            weight,
            vip,
            loaded: false,
        })
    }

    /// Construct a regular (non-VIP) client.
    ///
    /// # Errors
    /// See [`CargoUnit::new`].
    pub fn regular(name: impl Into<String>, weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, weight, false)
    }

    /// Construct a VIP client.
    ///
    /// # Errors
    /// See [`CargoUnit::new`].
    pub fn vip(name: impl Into<String>, weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, weight, true)
    }

    /// Registry key of the client.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weight of the cargo in tonnes.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether the client is served ahead of regular clients.
    #[must_use]
    pub const fn is_vip(&self) -> bool {
        self.vip
    }

    /// Whether the cargo currently sits in a vehicle.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) const fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_cargo_starts_unloaded() {
        let cargo = CargoUnit::vip("Maria", 2.1).expect("valid cargo");
        assert!(cargo.is_vip());
        assert!(!cargo.is_loaded());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_names(#[case] name: &str) {
        let err = CargoUnit::regular(name, 1.0).expect_err("blank name");
        assert_eq!(err, ValidationError::EmptyClientName);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.5)]
    #[case(f64::INFINITY)]
    fn rejects_non_positive_weights(#[case] weight: f64) {
        let err = CargoUnit::regular("Ivan", weight).expect_err("bad weight");
        assert!(matches!(err, ValidationError::NonPositiveWeight { .. }));
    }

    #[rstest]
    fn rejects_nan_weight() {
        let result = CargoUnit::regular("Ivan", f64::NAN);
        assert!(matches!(
            result,
            Err(ValidationError::NonPositiveWeight { .. })
        ));
    }
}
