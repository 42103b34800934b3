//! Parallel verification of independent payment proofs

use crate::{PaymentProof, VerifyContext};
use privacy_core::{PrivacyError, PrivacyResult, ProofParams};
use rayon::prelude::*;
use tracing::debug;

/// Verify every proof against its context on the global rayon pool
///
/// Results are returned in input order.
pub fn verify_all(batch: &[(PaymentProof, VerifyContext<'_>)]) -> Vec<PrivacyResult<()>> {
    debug!(count = batch.len(), "verifying payment proofs in parallel");
    batch.par_iter().map(|(proof, ctx)| proof.verify(ctx)).collect()
}

/// Like [`verify_all`], on a dedicated pool of `params.worker_threads` threads
///
/// Zero worker threads falls back to the global pool.
pub fn verify_all_with(
    batch: &[(PaymentProof, VerifyContext<'_>)],
    params: &ProofParams,
) -> PrivacyResult<Vec<PrivacyResult<()>>> {
    if params.worker_threads == 0 {
        return Ok(verify_all(batch));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.worker_threads)
        .build()
        .map_err(|e| PrivacyError::Config(e.to_string()))?;
    Ok(pool.install(|| verify_all(batch)))
}
