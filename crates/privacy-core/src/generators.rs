//! Generator vectors for the aggregated range proof and inner-product argument

use crate::{
    group::hash_to_point,
    utils::inner_product,
    PrivacyError, PrivacyResult, ProofParams,
};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::MultiscalarMul,
};
use lazy_static::lazy_static;
use tracing::debug;

lazy_static! {
    static ref GLOBAL_GENS: BulletproofGens = BulletproofGens::new(ProofParams::default().generator_capacity());
}

/// Generator set for range proofs
#[derive(Debug, Clone)]
pub struct BulletproofGens {
    /// Vector generators for the left side
    pub g_vec: Vec<RistrettoPoint>,
    /// Vector generators for the right side
    pub h_vec: Vec<RistrettoPoint>,
    /// Generator for the inner product
    pub u: RistrettoPoint,
    /// Transcript seed binding the whole set
    cs: CompressedRistretto,
}

impl BulletproofGens {
    /// Create a generator set with `capacity` generators on each side
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "deriving bulletproof generators");
        let mut g_vec = Vec::with_capacity(capacity);
        let mut h_vec = Vec::with_capacity(capacity);

        for i in 0..capacity {
            let index = (i as u64).to_le_bytes();
            g_vec.push(hash_to_point(&[b"bulletproofs_g_".as_slice(), index.as_slice()].concat()));
            h_vec.push(hash_to_point(&[b"bulletproofs_h_".as_slice(), index.as_slice()].concat()));
        }
        let u = hash_to_point(b"bulletproofs_u_generator");

        let mut seed = Vec::with_capacity(32 * (2 * capacity + 1));
        for point in g_vec.iter().chain(h_vec.iter()).chain(std::iter::once(&u)) {
            seed.extend_from_slice(point.compress().as_bytes());
        }
        let cs = hash_to_point(&seed).compress();

        Self { g_vec, h_vec, u, cs }
    }

    /// Generators sized by the default [`ProofParams`], computed on first use
    pub fn global() -> &'static BulletproofGens {
        &GLOBAL_GENS
    }

    /// Get the vector length
    pub fn capacity(&self) -> usize {
        self.g_vec.len()
    }

    /// Seed of the range proof transcript
    pub fn cs(&self) -> &CompressedRistretto {
        &self.cs
    }

    /// Prefix slices of length `n`
    pub fn slice(&self, n: usize) -> PrivacyResult<(&[RistrettoPoint], &[RistrettoPoint])> {
        if n > self.capacity() {
            return Err(PrivacyError::InsufficientGenerators {
                needed: n,
                available: self.capacity(),
            });
        }
        Ok((&self.g_vec[..n], &self.h_vec[..n]))
    }

    /// Compute `<a, g> + <b, h>` over the first `a.len()` generators
    pub fn vector_commit(&self, a: &[Scalar], b: &[Scalar]) -> PrivacyResult<RistrettoPoint> {
        let (g, h) = self.slice(a.len())?;
        encode_vectors(a, b, g, h)
    }

    /// Compute `<a, g> + <b, h> + <a, b> * u`
    pub fn inner_product_commit(&self, a: &[Scalar], b: &[Scalar]) -> PrivacyResult<RistrettoPoint> {
        let commitment = self.vector_commit(a, b)?;
        Ok(commitment + self.u * inner_product(a, b)?)
    }
}

/// Length-checked multi-scalar commitment `Σ a_i * G_i + Σ b_i * H_i`
pub fn encode_vectors(
    a: &[Scalar],
    b: &[Scalar],
    g: &[RistrettoPoint],
    h: &[RistrettoPoint],
) -> PrivacyResult<RistrettoPoint> {
    for len in [b.len(), g.len(), h.len()] {
        if len != a.len() {
            return Err(PrivacyError::VectorLengthMismatch {
                expected: a.len(),
                actual: len,
            });
        }
    }

    Ok(RistrettoPoint::multiscalar_mul(
        a.iter().chain(b.iter()),
        g.iter().chain(h.iter()),
    ))
}
