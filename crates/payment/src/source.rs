//! Lookup of ledger commitments by index, used to rebuild ring statements

use curve25519_dalek::ristretto::RistrettoPoint;
use privacy_core::{PrivacyError, PrivacyResult};
use std::collections::HashMap;

/// Ledger view the verifier resolves ring indices against
pub trait CommitmentSource: Sync {
    fn commitment_at(&self, index: u64) -> PrivacyResult<RistrettoPoint>;
}

impl CommitmentSource for [RistrettoPoint] {
    fn commitment_at(&self, index: u64) -> PrivacyResult<RistrettoPoint> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.get(i))
            .copied()
            .ok_or(PrivacyError::CommitmentNotFound(index))
    }
}

impl CommitmentSource for Vec<RistrettoPoint> {
    fn commitment_at(&self, index: u64) -> PrivacyResult<RistrettoPoint> {
        self.as_slice().commitment_at(index)
    }
}

impl CommitmentSource for HashMap<u64, RistrettoPoint> {
    fn commitment_at(&self, index: u64) -> PrivacyResult<RistrettoPoint> {
        self.get(&index).copied().ok_or(PrivacyError::CommitmentNotFound(index))
    }
}
