//! Payment proof verification

use crate::{coin::coin_commitment, witness::check_balance, CommitmentSource, PaymentProof};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::IsIdentity,
};
use one_of_many::OneOutOfManyStatement;
use privacy_core::{
    decompress, decompress_all, shard_id, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult, Proof,
    Protocol, MAX_RING_EXP, MAX_SHARD_NUMBER,
};
use tracing::{debug, warn};

/// Public facts a verifier checks a payment against
#[derive(Clone, Copy)]
pub struct VerifyContext<'a> {
    pub fee: u64,
    pub ring_size_exp: usize,
    pub source: &'a dyn CommitmentSource,
}

impl std::fmt::Debug for VerifyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyContext")
            .field("fee", &self.fee)
            .field("ring_size_exp", &self.ring_size_exp)
            .finish_non_exhaustive()
    }
}

/// Statement numbers reported for payment level failures
const LINK_SERIAL_NUMBER: u8 = 1;
const LINK_RANGE: u8 = 2;
const BALANCE: u8 = 3;
const OUTPUT_COMMITMENT: u8 = 4;

fn payment_failure(statement: u8) -> PrivacyError {
    warn!(statement, "verify payment proof failed");
    PrivacyError::VerificationFailed {
        protocol: Protocol::Payment,
        statement,
    }
}

impl PaymentProof {
    pub fn verify(&self, ctx: &VerifyContext<'_>) -> PrivacyResult<()> {
        debug!(
            has_privacy = self.has_privacy,
            inputs = self.num_inputs(),
            outputs = self.num_outputs(),
            fee = ctx.fee,
            "verifying payment proof"
        );
        self.check_structure()?;
        if !self.validate_sanity() {
            return Err(PrivacyError::SanityCheckFailed(Protocol::Payment));
        }

        if self.has_privacy {
            self.verify_private(ctx)
        } else {
            self.verify_public(ctx)
        }
    }

    fn verify_private(&self, ctx: &VerifyContext<'_>) -> PrivacyResult<()> {
        let basis = PedersenBasis::global();
        let missing = || PrivacyError::SanityCheckFailed(Protocol::Payment);
        let com_sk_compressed = self.com_sk.ok_or_else(missing)?;
        let com_sk = decompress(&com_sk_compressed)?;
        let com_shard = decompress(&self.com_shard.ok_or_else(missing)?)?;
        let com_input_value = decompress_all(&self.com_input_value)?;
        let com_input_snd = decompress_all(&self.com_input_snd)?;

        if ctx.ring_size_exp == 0 || ctx.ring_size_exp > MAX_RING_EXP {
            return Err(PrivacyError::InvalidParameters(format!(
                "ring size exponent {} outside 1..={MAX_RING_EXP}",
                ctx.ring_size_exp
            )));
        }
        let ring_size = 1usize << ctx.ring_size_exp;
        let mut ring_indices = self.commitment_indices.chunks(ring_size);
        for (i, proof) in self.one_of_many_proofs.iter().enumerate() {
            if proof.ring_exp() != ctx.ring_size_exp {
                return Err(PrivacyError::InvalidParameters(format!(
                    "input {i} uses ring exponent {}, expected {}",
                    proof.ring_exp(),
                    ctx.ring_size_exp
                )));
            }
            let indices = ring_indices.next().ok_or_else(missing)?;
            let cm_sum = com_sk + com_input_value[i] + com_input_snd[i] + com_shard;
            let ring = indices
                .iter()
                .map(|index| -> PrivacyResult<RistrettoPoint> { Ok(ctx.source.commitment_at(*index)? - cm_sum) })
                .collect::<PrivacyResult<Vec<_>>>()?;
            proof.clone().with_statement(OneOutOfManyStatement::new(ring)).verify()?;
        }

        for (proof, com_input) in self.serial_number_proofs.iter().zip(&self.com_input_snd) {
            if proof.com_sk != com_sk_compressed || proof.com_input != *com_input {
                return Err(payment_failure(LINK_SERIAL_NUMBER));
            }
            proof.verify(None)?;
        }

        if let Some(range_proof) = &self.range_proof {
            if range_proof.cms_value != self.com_output_value {
                return Err(payment_failure(LINK_RANGE));
            }
            range_proof.verify()?;
        }

        // Each output coin opens to its receiver key plus the partial commitments
        let com_output_value = decompress_all(&self.com_output_value)?;
        let com_output_snd = decompress_all(&self.com_output_snd)?;
        let com_output_shard = decompress_all(&self.com_output_shard)?;
        let public_keys = decompress_all(&self.output_public_keys)?;
        for (j, commitment) in self.output_commitments.iter().enumerate() {
            let expected = public_keys[j] + com_output_value[j] + com_output_snd[j] + com_output_shard[j];
            if expected.compress() != *commitment {
                return Err(payment_failure(OUTPUT_COMMITMENT));
            }
        }

        // Σ comInputValue - Σ comOutputValue == fee * G_value
        let inputs: RistrettoPoint = com_input_value.iter().sum();
        let outputs: RistrettoPoint = com_output_value.iter().sum();
        let fee = Scalar::from(ctx.fee) * basis.generator(PedersenIndex::Value);
        if !(inputs - outputs - fee).is_identity() {
            return Err(payment_failure(BALANCE));
        }
        Ok(())
    }

    fn verify_public(&self, ctx: &VerifyContext<'_>) -> PrivacyResult<()> {
        let mut key: Option<CompressedRistretto> = None;
        for proof in &self.serial_number_no_privacy_proofs {
            // Every input is spent by the same key
            if *key.get_or_insert(proof.v_key) != proof.v_key {
                return Err(payment_failure(LINK_SERIAL_NUMBER));
            }
            proof.verify(None)?;
        }

        let basis = PedersenBasis::global();
        let public_keys = decompress_all(&self.output_public_keys)?;
        for (j, public_key) in public_keys.iter().enumerate() {
            let expected = coin_commitment(
                basis,
                public_key,
                self.output_values[j],
                &self.output_snds[j],
                shard_id(public_key, MAX_SHARD_NUMBER),
                &self.output_randomness[j],
            );
            if expected.compress() != self.output_commitments[j] {
                return Err(payment_failure(OUTPUT_COMMITMENT));
            }
        }

        check_balance(&self.input_values, &self.output_values, ctx.fee).map_err(|err| {
            warn!(%err, "payment balance check failed");
            payment_failure(BALANCE)
        })
    }
}
