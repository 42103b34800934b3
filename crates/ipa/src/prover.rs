//! Inner Product Argument prover implementation

use crate::InnerProductProof;
use curve25519_dalek::{
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::MultiscalarMul,
};
use privacy_core::{
    challenge_from_cache,
    utils::{inner_product, is_power_of_two},
    PrivacyError, PrivacyResult,
};
use tracing::trace;

/// Witness for an inner product argument: `p = <a, G> + <b, H> + <a, b> * u`
#[derive(Debug, Clone)]
pub struct InnerProductWitness {
    pub a: Vec<Scalar>,
    pub b: Vec<Scalar>,
    pub p: RistrettoPoint,
}

impl InnerProductWitness {
    pub fn new(a: Vec<Scalar>, b: Vec<Scalar>, p: RistrettoPoint) -> Self {
        Self { a, b, p }
    }

    /// Create an inner product proof
    ///
    /// `hash_cache` seeds the round challenges; the range proof passes the
    /// encoding of its challenge `x`. Vectors are folded in place, so the only
    /// allocations are the working copies made up front.
    pub fn prove(
        &self,
        g: &[RistrettoPoint],
        h: &[RistrettoPoint],
        u: &RistrettoPoint,
        hash_cache: &[u8; 32],
    ) -> PrivacyResult<InnerProductProof> {
        let n = self.a.len();
        for len in [self.b.len(), g.len(), h.len()] {
            if len != n {
                return Err(PrivacyError::VectorLengthMismatch { expected: n, actual: len });
            }
        }
        if !is_power_of_two(n) {
            return Err(PrivacyError::InvalidParameters(format!(
                "vector length {n} is not a power of two"
            )));
        }

        let mut a = self.a.clone();
        let mut b = self.b.clone();
        let mut g = g.to_vec();
        let mut h = h.to_vec();

        let rounds = n.trailing_zeros() as usize;
        let mut l_vec = Vec::with_capacity(rounds);
        let mut r_vec = Vec::with_capacity(rounds);
        let mut cache = *hash_cache;

        let mut len = n;
        while len > 1 {
            let half = len / 2;
            let (a_lo, a_hi) = a[..len].split_at(half);
            let (b_lo, b_hi) = b[..len].split_at(half);
            let (g_lo, g_hi) = g[..len].split_at(half);
            let (h_lo, h_hi) = h[..len].split_at(half);

            let c_l = inner_product(a_lo, b_hi)?;
            let c_r = inner_product(a_hi, b_lo)?;

            // L = <a_lo, G_hi> + <b_hi, H_lo> + cL * u
            let l = RistrettoPoint::multiscalar_mul(
                a_lo.iter().chain(b_hi.iter()).chain(std::iter::once(&c_l)),
                g_hi.iter().chain(h_lo.iter()).chain(std::iter::once(u)),
            )
            .compress();

            // R = <a_hi, G_lo> + <b_lo, H_hi> + cR * u
            let r = RistrettoPoint::multiscalar_mul(
                a_hi.iter().chain(b_lo.iter()).chain(std::iter::once(&c_r)),
                g_lo.iter().chain(h_hi.iter()).chain(std::iter::once(u)),
            )
            .compress();

            let x = challenge_from_cache(&cache, &[l, r]);
            let x_inv = x.invert();
            cache = x.to_bytes();
            trace!(round = l_vec.len(), len, "inner product fold");

            l_vec.push(l);
            r_vec.push(r);

            for i in 0..half {
                a[i] = a[i] * x + a[i + half] * x_inv;
                b[i] = b[i] * x_inv + b[i + half] * x;
                g[i] = RistrettoPoint::multiscalar_mul([x_inv, x], [g[i], g[i + half]]);
                h[i] = RistrettoPoint::multiscalar_mul([x, x_inv], [h[i], h[i + half]]);
            }
            len = half;
        }

        Ok(InnerProductProof {
            l_vec,
            r_vec,
            a: a[0],
            b: b[0],
            p: self.p.compress(),
        })
    }
}
