//! Pluggable vehicle identifier sources.
//!
//! Identifiers take the form `PREFIX-SUFFIX`, where the prefix follows the
//! vehicle kind (see [`VehicleKind::id_prefix`]).

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::{VehicleId, VehicleKind};

const RANDOM_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const RANDOM_SUFFIX_LEN: usize = 8;

/// Produces fresh vehicle identifiers.
///
/// Generators are not required to remember identifiers handed out by other
/// generators; the registry rejects duplicates on insertion.
pub trait IdGenerator {
    /// Produce the next identifier for a vehicle of the given kind.
    fn next_id(&mut self, kind: &VehicleKind) -> VehicleId;
}

impl<G> IdGenerator for &mut G
where
    G: IdGenerator + ?Sized,
{
    fn next_id(&mut self, kind: &VehicleKind) -> VehicleId {
        (**self).next_id(kind)
    }
}

/// Deterministic counter shared across kinds: `VHC-00000001`,
/// `TRN-00000002`, and so on.
///
/// # Examples
/// ```
/// use haulage_core::{IdGenerator, SequentialIds, VehicleKind};
///
/// let mut ids = SequentialIds::default();
/// assert_eq!(ids.next_id(&VehicleKind::Plain).as_str(), "VHC-00000001");
/// assert_eq!(
///     ids.next_id(&VehicleKind::Train { car_count: 3 }).as_str(),
///     "TRN-00000002"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting from `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: &VehicleKind) -> VehicleId {
        let id = VehicleId::from_parts(kind.id_prefix(), &format!("{:08}", self.next));
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Random eight-character suffixes drawn from `A-Z0-9`.
///
/// Seeded instances are reproducible, which keeps command-line scripts and
/// tests stable.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: ChaCha8Rng,
}

impl RandomIds {
    /// Reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, kind: &VehicleKind) -> VehicleId {
        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .filter_map(|_| RANDOM_ALPHABET.choose(&mut self.rng).copied())
            .map(char::from)
            .collect();
        VehicleId::from_parts(kind.id_prefix(), &suffix)
    }
}
