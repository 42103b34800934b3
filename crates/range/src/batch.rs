//! Batch verification of aggregated range proofs
//!
//! Every equation of every proof is scaled by an independent random weight
//! and summed, so `k` proofs cost one multi-scalar multiplication instead of
//! `3k`. A forged proof survives only if its weighted error cancels, which
//! happens with negligible probability.

use crate::{AggregatedRangeProof, Equation, RangeEquations};
use curve25519_dalek::scalar::Scalar;
use privacy_core::{BulletproofGens, PedersenBasis, PrivacyError, PrivacyResult, Proof, Protocol};
use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Verify many proofs at once against the process-wide bases
///
/// On failure the error carries the index of the first proof that does not
/// verify on its own.
pub fn verify_batch<R: RngCore + CryptoRng>(proofs: &[AggregatedRangeProof], rng: &mut R) -> PrivacyResult<()> {
    verify_batch_with(proofs, PedersenBasis::global(), BulletproofGens::global(), rng)
}

pub fn verify_batch_with<R: RngCore + CryptoRng>(
    proofs: &[AggregatedRangeProof],
    basis: &PedersenBasis,
    gens: &BulletproofGens,
    rng: &mut R,
) -> PrivacyResult<()> {
    debug!(count = proofs.len(), "batch verifying aggregated range proofs");

    // Per-proof equations are independent, so build them in parallel
    let built: Vec<PrivacyResult<RangeEquations>> = proofs
        .par_iter()
        .map(|proof| {
            if !proof.validate_sanity() {
                return Err(PrivacyError::SanityCheckFailed(Protocol::AggregatedRange));
            }
            proof.equations(gens)
        })
        .collect();

    let mut combined = Equation::default();
    let mut malformed = None;
    for (index, equations) in built.into_iter().enumerate() {
        match equations {
            Ok(RangeEquations { equations }) => {
                for (_, equation) in equations.iter() {
                    let weight = random_nonzero_scalar(rng);
                    combined.accumulate(&weight, equation);
                }
            }
            Err(err) => {
                warn!(index, %err, "malformed proof in batch");
                malformed.get_or_insert(index);
            }
        }
    }

    if malformed.is_none() && combined.holds(basis, gens)? {
        return Ok(());
    }

    // Malformed proofs count as failing, but an earlier proof may fail first
    let index = proofs
        .iter()
        .position(|proof| !proof.validate_sanity() || proof.verify_with(basis, gens).is_err());
    warn!(?index, "batch verification failed");
    Err(PrivacyError::BatchVerificationFailed { index: index.or(malformed) })
}

fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let scalar = Scalar::random(rng);
        if scalar != Scalar::ZERO {
            return scalar;
        }
    }
}
