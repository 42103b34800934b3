//! Pedersen commitment basis
//!
//! Five independent generators, one per committed attribute of a coin. The
//! last one (`Randomness`) doubles as the blinding generator `H`, so a
//! commitment at index `i` is
//!
//! ```text
//! Com_i(v, r) = v * G_i + r * H
//! ```

use crate::group::hash_to_point;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::MultiscalarMul,
};
use lazy_static::lazy_static;
use tracing::debug;

/// Attribute a commitment generator is reserved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PedersenIndex {
    PrivateKey = 0,
    Value = 1,
    SerialNumberDerivator = 2,
    ShardId = 3,
    Randomness = 4,
}

/// Number of generators in the basis
pub const PEDERSEN_BASIS_SIZE: usize = 5;

lazy_static! {
    static ref GLOBAL_BASIS: PedersenBasis = PedersenBasis::new();
}

/// Immutable commitment basis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedersenBasis {
    generators: [RistrettoPoint; PEDERSEN_BASIS_SIZE],
    encoded: Vec<u8>,
}

impl PedersenBasis {
    /// Derive the basis: the first generator is the Ristretto base point and
    /// each next one is the hash of the previous encoding.
    pub fn new() -> Self {
        let mut generators = [RISTRETTO_BASEPOINT_POINT; PEDERSEN_BASIS_SIZE];
        for i in 1..PEDERSEN_BASIS_SIZE {
            generators[i] = hash_to_point(generators[i - 1].compress().as_bytes());
        }

        let encoded = generators
            .iter()
            .flat_map(|g| g.compress().to_bytes())
            .collect();

        debug!(size = PEDERSEN_BASIS_SIZE, "derived pedersen basis");
        Self { generators, encoded }
    }

    /// Process-wide basis, computed on first use
    pub fn global() -> &'static PedersenBasis {
        &GLOBAL_BASIS
    }

    pub fn generator(&self, index: PedersenIndex) -> &RistrettoPoint {
        &self.generators[index as usize]
    }

    /// Blinding generator `H`
    pub fn h(&self) -> &RistrettoPoint {
        self.generator(PedersenIndex::Randomness)
    }

    /// Concatenated compressed generators, in index order
    pub fn to_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// `value * G_index + blinding * H`
    pub fn commit_at(&self, value: &Scalar, blinding: &Scalar, index: PedersenIndex) -> RistrettoPoint {
        RistrettoPoint::multiscalar_mul([*value, *blinding], [*self.generator(index), *self.h()])
    }

    /// Commitment to a 64-bit amount at the value generator
    pub fn commit_value(&self, value: u64, blinding: &Scalar) -> RistrettoPoint {
        self.commit_at(&Scalar::from(value), blinding, PedersenIndex::Value)
    }
}

impl Default for PedersenBasis {
    fn default() -> Self {
        Self::new()
    }
}
