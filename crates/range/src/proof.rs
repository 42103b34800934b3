//! Aggregated range proof structure and encoding

use crate::MAX_VALUES;
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use ipa::InnerProductProof;
use privacy_core::{
    codec::{write_points, write_scalars},
    point_valid,
    utils::{log2, next_power_of_two},
    ByteReader, PrivacyResult, Proof, ELEMENT_SIZE, MAX_EXP,
};

/// Proof that every value behind `cms_value` lies in `[0, 2^64)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRangeProof {
    /// Commitments to each (unpadded) value at the value generator
    pub cms_value: Vec<CompressedRistretto>,
    pub a: CompressedRistretto,
    pub s: CompressedRistretto,
    pub t1: CompressedRistretto,
    pub t2: CompressedRistretto,
    pub tau_x: Scalar,
    pub t_hat: Scalar,
    pub mu: Scalar,
    pub inner_product_proof: InnerProductProof,
}

impl AggregatedRangeProof {
    /// Number of committed values
    pub fn num_values(&self) -> usize {
        self.cms_value.len()
    }

    /// Inner product vector length for this proof
    pub fn vector_length(&self) -> usize {
        MAX_EXP * next_power_of_two(self.num_values())
    }
}

/// Encoded size of an aggregated range proof over `n_output` values
pub fn estimate_multi_range_proof_size(n_output: usize) -> usize {
    let rounds = log2(MAX_EXP * next_power_of_two(n_output));
    (n_output + 2 * rounds + 5) * ELEMENT_SIZE + 5 * ELEMENT_SIZE + 2
}

impl Proof for AggregatedRangeProof {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(estimate_multi_range_proof_size(self.num_values()));
        // Witnesses and the sanity check both cap the count at MAX_VALUES
        out.push(self.cms_value.len().min(MAX_VALUES) as u8);
        write_points(&mut out, &self.cms_value);
        write_points(&mut out, &[self.a, self.s, self.t1, self.t2]);
        write_scalars(&mut out, &[self.tau_x, self.t_hat, self.mu]);
        out.extend_from_slice(&self.inner_product_proof.to_bytes());
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        let count = reader.read_u8()? as usize;
        let cms_value = reader.read_points(count)?;
        let a = reader.read_point()?;
        let s = reader.read_point()?;
        let t1 = reader.read_point()?;
        let t2 = reader.read_point()?;
        let tau_x = reader.read_scalar()?;
        let t_hat = reader.read_scalar()?;
        let mu = reader.read_scalar()?;
        let inner_product_proof = InnerProductProof::read_from(reader)?;

        Ok(Self {
            cms_value,
            a,
            s,
            t1,
            t2,
            tau_x,
            t_hat,
            mu,
            inner_product_proof,
        })
    }

    fn validate_sanity(&self) -> bool {
        !self.cms_value.is_empty()
            && self.cms_value.len() <= MAX_VALUES
            && self.cms_value.iter().all(point_valid)
            && [self.a, self.s, self.t1, self.t2].iter().all(point_valid)
            && self.inner_product_proof.validate_sanity()
    }
}
