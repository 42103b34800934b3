//! Payment proof structure and encoding

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use one_of_many::OneOutOfManyProof;
use privacy_core::{
    codec::{write_optional_point, write_points, write_scalars},
    point_valid, ByteReader, PrivacyError, PrivacyResult, Proof, MAX_RING_EXP,
};
use range::AggregatedRangeProof;
use serial_number::{SerialNumberNoPrivacyProof, SerialNumberPrivacyProof};

/// Longest sequence a count byte can announce
pub const MAX_SEQUENCE: usize = u8::MAX as usize;

/// Number of count-prefixed point lists in the encoding
const POINT_LISTS: usize = 7;

/// All sub-proofs and public commitments of one transaction
///
/// With privacy, values stay behind commitments and every input carries a
/// ring membership proof and a serial number proof. Without privacy, values
/// travel in clear and only no-privacy serial number proofs are present.
///
/// Proofs come from [`crate::PaymentWitness::prove`] or from decoding, so
/// every sequence fits its count byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProof {
    pub(crate) has_privacy: bool,
    pub(crate) one_of_many_proofs: Vec<OneOutOfManyProof>,
    pub(crate) serial_number_proofs: Vec<SerialNumberPrivacyProof>,
    pub(crate) serial_number_no_privacy_proofs: Vec<SerialNumberNoPrivacyProof>,
    pub(crate) range_proof: Option<AggregatedRangeProof>,

    pub(crate) com_sk: Option<CompressedRistretto>,
    pub(crate) com_shard: Option<CompressedRistretto>,
    pub(crate) com_input_value: Vec<CompressedRistretto>,
    pub(crate) com_input_snd: Vec<CompressedRistretto>,
    pub(crate) com_output_value: Vec<CompressedRistretto>,
    pub(crate) com_output_snd: Vec<CompressedRistretto>,
    pub(crate) com_output_shard: Vec<CompressedRistretto>,
    pub(crate) output_commitments: Vec<CompressedRistretto>,
    pub(crate) output_public_keys: Vec<CompressedRistretto>,

    /// Ledger indices of every ring, in input order
    pub(crate) commitment_indices: Vec<u64>,
    pub(crate) input_values: Vec<u64>,
    pub(crate) output_values: Vec<u64>,
    /// Opening of each output coin, present only without privacy
    pub(crate) output_snds: Vec<Scalar>,
    pub(crate) output_randomness: Vec<Scalar>,
}

impl PaymentProof {
    pub fn has_privacy(&self) -> bool {
        self.has_privacy
    }

    pub fn num_inputs(&self) -> usize {
        if self.has_privacy {
            self.serial_number_proofs.len()
        } else {
            self.serial_number_no_privacy_proofs.len()
        }
    }

    pub fn num_outputs(&self) -> usize {
        self.output_commitments.len()
    }

    pub fn range_proof(&self) -> Option<&AggregatedRangeProof> {
        self.range_proof.as_ref()
    }

    /// Commitments of the coins this payment creates
    pub fn output_commitments(&self) -> &[CompressedRistretto] {
        &self.output_commitments
    }

    pub fn output_public_keys(&self) -> &[CompressedRistretto] {
        &self.output_public_keys
    }

    pub fn commitment_indices(&self) -> &[u64] {
        &self.commitment_indices
    }

    fn point_lists(&self) -> [&Vec<CompressedRistretto>; POINT_LISTS] {
        [
            &self.com_input_value,
            &self.com_input_snd,
            &self.com_output_value,
            &self.com_output_snd,
            &self.com_output_shard,
            &self.output_commitments,
            &self.output_public_keys,
        ]
    }

    /// Check that the parts present match the privacy mode and agree in length
    pub fn check_structure(&self) -> PrivacyResult<()> {
        let malformed = |what: &str| Err(PrivacyError::InvalidParameters(format!("payment proof {what}")));
        let n_in = self.num_inputs();
        let n_out = self.num_outputs();

        if n_in == 0 {
            return malformed("has no inputs");
        }
        if n_in > MAX_SEQUENCE || n_out > MAX_SEQUENCE {
            return malformed("has more than 255 inputs or outputs");
        }
        if self.output_public_keys.len() != n_out {
            return Err(PrivacyError::VectorLengthMismatch {
                expected: n_out,
                actual: self.output_public_keys.len(),
            });
        }

        if self.has_privacy {
            if !self.serial_number_no_privacy_proofs.is_empty() || !self.input_values.is_empty() {
                return malformed("with privacy carries clear inputs");
            }
            if !self.output_values.is_empty() || !self.output_snds.is_empty() || !self.output_randomness.is_empty() {
                return malformed("with privacy carries clear outputs");
            }
            if self.com_sk.is_none() || self.com_shard.is_none() {
                return malformed("is missing the key or shard commitment");
            }
            for len in [self.one_of_many_proofs.len(), self.com_input_value.len(), self.com_input_snd.len()] {
                if len != n_in {
                    return Err(PrivacyError::VectorLengthMismatch { expected: n_in, actual: len });
                }
            }
            for len in [self.com_output_value.len(), self.com_output_snd.len(), self.com_output_shard.len()] {
                if len != n_out {
                    return Err(PrivacyError::VectorLengthMismatch { expected: n_out, actual: len });
                }
            }
            if let Some(proof) = self
                .one_of_many_proofs
                .iter()
                .find(|p| p.ring_exp() == 0 || p.ring_exp() > MAX_RING_EXP)
            {
                return malformed(format!("ring exponent {} outside 1..={MAX_RING_EXP}", proof.ring_exp()).as_str());
            }
            let ring_total = ring_total(&self.one_of_many_proofs);
            if self.commitment_indices.len() != ring_total {
                return Err(PrivacyError::VectorLengthMismatch {
                    expected: ring_total,
                    actual: self.commitment_indices.len(),
                });
            }
            if self.range_proof.is_some() != (n_out > 0) {
                return malformed("range proof does not match the outputs");
            }
        } else {
            if !self.one_of_many_proofs.is_empty() || !self.serial_number_proofs.is_empty() {
                return malformed("without privacy carries private input proofs");
            }
            if self.range_proof.is_some() || self.com_sk.is_some() || self.com_shard.is_some() {
                return malformed("without privacy carries commitments");
            }
            if self.point_lists()[..5].iter().any(|list| !list.is_empty()) || !self.commitment_indices.is_empty() {
                return malformed("without privacy carries commitments");
            }
            if self.input_values.len() != n_in {
                return Err(PrivacyError::VectorLengthMismatch {
                    expected: n_in,
                    actual: self.input_values.len(),
                });
            }
            for len in [self.output_values.len(), self.output_snds.len(), self.output_randomness.len()] {
                if len != n_out {
                    return Err(PrivacyError::VectorLengthMismatch { expected: n_out, actual: len });
                }
            }
        }
        Ok(())
    }
}

/// Total ring members over proofs whose exponents are already bounded
fn ring_total(proofs: &[OneOutOfManyProof]) -> usize {
    proofs.iter().map(|p| 1usize << p.ring_exp()).sum()
}

/// Count byte of a sequence; callers keep sequences within [`MAX_SEQUENCE`]
fn write_len(out: &mut Vec<u8>, len: usize) {
    out.push(len.min(MAX_SEQUENCE) as u8);
}

fn write_proofs<P: Proof>(out: &mut Vec<u8>, proofs: &[P]) {
    write_len(out, proofs.len());
    for proof in proofs {
        out.extend_from_slice(&proof.to_bytes());
    }
}

fn read_proofs<P: Proof>(reader: &mut ByteReader<'_>) -> PrivacyResult<Vec<P>> {
    let count = reader.read_u8()? as usize;
    (0..count).map(|_| P::read_from(reader)).collect()
}

fn write_values(out: &mut Vec<u8>, values: &[u64]) {
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

impl Proof for PaymentProof {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.has_privacy as u8];
        write_proofs(&mut out, &self.one_of_many_proofs);
        write_proofs(&mut out, &self.serial_number_proofs);
        write_proofs(&mut out, &self.serial_number_no_privacy_proofs);
        match &self.range_proof {
            Some(proof) => {
                out.push(1);
                out.extend_from_slice(&proof.to_bytes());
            }
            None => out.push(0),
        }
        write_optional_point(&mut out, self.com_sk.as_ref());
        write_optional_point(&mut out, self.com_shard.as_ref());
        for points in self.point_lists() {
            write_len(&mut out, points.len());
            write_points(&mut out, points);
        }
        // The ring sizes of the ring proofs give the index count
        write_values(&mut out, &self.commitment_indices);
        for values in [&self.input_values, &self.output_values] {
            write_len(&mut out, values.len());
            write_values(&mut out, values);
        }
        for scalars in [&self.output_snds, &self.output_randomness] {
            write_len(&mut out, scalars.len());
            write_scalars(&mut out, scalars);
        }
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        let has_privacy = match reader.read_u8()? {
            0 => false,
            1 => true,
            flag => return Err(PrivacyError::InvalidParameters(format!("invalid privacy flag {flag}"))),
        };
        // Decoding bounds every ring exponent
        let one_of_many_proofs: Vec<OneOutOfManyProof> = read_proofs(reader)?;
        let serial_number_proofs = read_proofs(reader)?;
        let serial_number_no_privacy_proofs = read_proofs(reader)?;
        let range_proof = match reader.read_u8()? {
            0 => None,
            1 => Some(AggregatedRangeProof::read_from(reader)?),
            flag => return Err(PrivacyError::InvalidParameters(format!("invalid presence flag {flag}"))),
        };
        let com_sk = reader.read_optional_point()?;
        let com_shard = reader.read_optional_point()?;

        let mut point_lists = Vec::with_capacity(POINT_LISTS);
        for _ in 0..POINT_LISTS {
            let count = reader.read_u8()? as usize;
            point_lists.push(reader.read_points(count)?);
        }
        let [com_input_value, com_input_snd, com_output_value, com_output_snd, com_output_shard, output_commitments, output_public_keys]: [Vec<CompressedRistretto>; POINT_LISTS] =
            point_lists
                .try_into()
                .map_err(|_| PrivacyError::InvalidParameters("payment point lists".to_string()))?;

        let commitment_indices = (0..ring_total(&one_of_many_proofs))
            .map(|_| reader.read_u64())
            .collect::<PrivacyResult<_>>()?;
        let mut read_values = || -> PrivacyResult<Vec<u64>> {
            let count = reader.read_u8()? as usize;
            (0..count).map(|_| reader.read_u64()).collect()
        };
        let input_values = read_values()?;
        let output_values = read_values()?;
        let mut read_scalars = || -> PrivacyResult<Vec<Scalar>> {
            let count = reader.read_u8()? as usize;
            reader.read_scalars(count)
        };
        let output_snds = read_scalars()?;
        let output_randomness = read_scalars()?;

        Ok(Self {
            has_privacy,
            one_of_many_proofs,
            serial_number_proofs,
            serial_number_no_privacy_proofs,
            range_proof,
            com_sk,
            com_shard,
            com_input_value,
            com_input_snd,
            com_output_value,
            com_output_snd,
            com_output_shard,
            output_commitments,
            output_public_keys,
            commitment_indices,
            input_values,
            output_values,
            output_snds,
            output_randomness,
        })
    }

    fn validate_sanity(&self) -> bool {
        self.check_structure().is_ok()
            && self.one_of_many_proofs.iter().all(Proof::validate_sanity)
            && self.serial_number_proofs.iter().all(Proof::validate_sanity)
            && self.serial_number_no_privacy_proofs.iter().all(Proof::validate_sanity)
            && self.range_proof.as_ref().map_or(true, Proof::validate_sanity)
            && self.com_sk.iter().chain(self.com_shard.iter()).all(point_valid)
            && self.point_lists().iter().all(|list| list.iter().all(point_valid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ledger;

    #[test]
    fn test_oversized_ring_exponent_fails_sanity() {
        let mut proof = ledger(true, &[8], &[8], 0).prove().unwrap();
        let cl = proof.one_of_many_proofs[0].cl[0];
        proof.one_of_many_proofs[0].cl = vec![cl; 64];

        assert!(matches!(proof.check_structure(), Err(PrivacyError::InvalidParameters(_))));
        assert!(!proof.validate_sanity());
    }

    #[test]
    fn test_too_many_outputs_is_malformed() {
        let mut proof = ledger(false, &[8], &[8], 0).prove().unwrap();
        let n = MAX_SEQUENCE + 1;
        proof.output_commitments = vec![proof.output_commitments[0]; n];
        proof.output_public_keys = vec![proof.output_public_keys[0]; n];
        proof.output_values = vec![0; n];
        proof.output_snds = vec![Scalar::ZERO; n];
        proof.output_randomness = vec![Scalar::ZERO; n];

        assert!(proof.check_structure().is_err());
        assert!(!proof.validate_sanity());
    }

    #[test]
    fn test_public_proof_round_trip_keeps_output_openings() {
        let proof = ledger(false, &[30, 12], &[40], 2).prove().unwrap();
        assert_eq!(proof.output_snds.len(), 1);
        assert_eq!(proof.output_randomness.len(), 1);
        assert_eq!(PaymentProof::from_bytes(&proof.to_bytes()).unwrap(), proof);
    }
}
