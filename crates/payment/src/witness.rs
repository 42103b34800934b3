//! Payment witness: every secret needed to prove one transaction

use crate::{coin::fixed_shard_blinding, InputCoin, OutputCoin, PaymentProof};
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use one_of_many::{OneOutOfManyStatement, OneOutOfManyWitness};
use privacy_core::{derive, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult, ProofParams};
use range::AggregatedRangeWitness;
use rand_core::{CryptoRng, RngCore};
use serial_number::{SerialNumberNoPrivacyWitness, SerialNumberPrivacyStatement, SerialNumberPrivacyWitness};
use tracing::{debug, info};

/// Everything the wallet supplies to build a payment
#[derive(Debug, Clone)]
pub struct PaymentWitnessParams {
    pub has_privacy: bool,
    pub private_key: Scalar,
    pub input_coins: Vec<InputCoin>,
    pub output_coins: Vec<OutputCoin>,
    pub fee: u64,
    /// Ledger indices of every ring, `ring_size` per input in input order
    pub commitment_indices: Vec<u64>,
    /// Position of each input's own coin inside its ring
    pub my_commitment_indices: Vec<usize>,
    /// Ring commitments, aligned with `commitment_indices`
    pub commitments: Vec<RistrettoPoint>,
}

/// Secrets and public commitments of one payment, ready to prove
#[derive(Debug, Clone)]
pub struct PaymentWitness {
    has_privacy: bool,
    one_of_many_witnesses: Vec<OneOutOfManyWitness>,
    serial_number_witnesses: Vec<SerialNumberPrivacyWitness>,
    serial_number_no_privacy_witnesses: Vec<SerialNumberNoPrivacyWitness>,
    range_witness: Option<AggregatedRangeWitness>,

    com_sk: Option<RistrettoPoint>,
    com_shard: Option<RistrettoPoint>,
    com_input_value: Vec<RistrettoPoint>,
    com_input_snd: Vec<RistrettoPoint>,
    com_output_value: Vec<RistrettoPoint>,
    com_output_snd: Vec<RistrettoPoint>,
    com_output_shard: Vec<RistrettoPoint>,
    output_commitments: Vec<RistrettoPoint>,
    output_public_keys: Vec<RistrettoPoint>,
    output_randomness: Vec<Scalar>,
    /// Output derivators, published only without privacy
    output_snds: Vec<Scalar>,

    commitment_indices: Vec<u64>,
    input_values: Vec<u64>,
    output_values: Vec<u64>,
}

/// Sum of values, failing on overflow
fn checked_sum(values: impl IntoIterator<Item = u64>) -> PrivacyResult<u64> {
    values
        .into_iter()
        .try_fold(0u64, |acc, v| acc.checked_add(v))
        .ok_or(PrivacyError::ValueOverflow)
}

/// Require `Σ inputs == Σ outputs + fee`
pub fn check_balance(input_values: &[u64], output_values: &[u64], fee: u64) -> PrivacyResult<()> {
    let inputs = checked_sum(input_values.iter().copied())?;
    let outputs = checked_sum(output_values.iter().copied())?;
    let spent = outputs.checked_add(fee).ok_or(PrivacyError::ValueOverflow)?;
    if inputs != spent {
        return Err(PrivacyError::Unbalanced { inputs, outputs, fee });
    }
    Ok(())
}

impl PaymentWitness {
    /// Check the payment and draw every blinding
    ///
    /// The balance is checked before any group operation.
    pub fn new<R: RngCore + CryptoRng>(
        params: PaymentWitnessParams,
        config: &ProofParams,
        rng: &mut R,
    ) -> PrivacyResult<Self> {
        let input_values: Vec<u64> = params.input_coins.iter().map(|coin| coin.value).collect();
        let output_values: Vec<u64> = params.output_coins.iter().map(|coin| coin.value).collect();
        check_balance(&input_values, &output_values, params.fee)?;

        config.validate()?;
        if params.input_coins.is_empty() || params.input_coins.len() > config.max_inputs {
            return Err(PrivacyError::InvalidParameters(format!(
                "payment needs 1..={} inputs, got {}",
                config.max_inputs,
                params.input_coins.len()
            )));
        }
        if params.output_coins.len() > config.max_outputs {
            return Err(PrivacyError::InvalidParameters(format!(
                "payment allows at most {} outputs, got {}",
                config.max_outputs,
                params.output_coins.len()
            )));
        }

        let basis = PedersenBasis::global();
        let public_key = params.private_key * basis.generator(PedersenIndex::PrivateKey);
        if params.input_coins.iter().any(|coin| coin.public_key != public_key) {
            return Err(PrivacyError::InvalidParameters(
                "input coin not owned by the private key".to_string(),
            ));
        }

        debug!(
            has_privacy = params.has_privacy,
            inputs = params.input_coins.len(),
            outputs = params.output_coins.len(),
            "building payment witness"
        );
        if params.has_privacy {
            Self::with_privacy(params, config, basis, input_values, output_values, rng)
        } else {
            Self::without_privacy(params, basis, input_values, output_values, rng)
        }
    }

    fn with_privacy<R: RngCore + CryptoRng>(
        params: PaymentWitnessParams,
        config: &ProofParams,
        basis: &PedersenBasis,
        input_values: Vec<u64>,
        output_values: Vec<u64>,
        rng: &mut R,
    ) -> PrivacyResult<Self> {
        let n_in = params.input_coins.len();
        let ring_size = config.ring_size();
        if let Some(zero) = output_values.iter().position(|v| *v == 0) {
            return Err(PrivacyError::ZeroOutputValue(zero));
        }
        for (expected, actual) in [
            (n_in * ring_size, params.commitment_indices.len()),
            (n_in * ring_size, params.commitments.len()),
            (n_in, params.my_commitment_indices.len()),
        ] {
            if expected != actual {
                return Err(PrivacyError::VectorLengthMismatch { expected, actual });
            }
        }

        let sk = params.private_key;
        let r_sk = Scalar::random(rng);
        let com_sk = basis.commit_at(&sk, &r_sk, PedersenIndex::PrivateKey);

        // All inputs share the sender's shard
        let shard = params.input_coins[0].shard_id();
        let shard_blinding = fixed_shard_blinding();
        let com_shard = basis.commit_at(&Scalar::from(shard as u64), &shard_blinding, PedersenIndex::ShardId);

        let has_outputs = !params.output_coins.is_empty();
        let mut one_of_many_witnesses = Vec::with_capacity(n_in);
        let mut serial_number_witnesses = Vec::with_capacity(n_in);
        let mut com_input_value = Vec::with_capacity(n_in);
        let mut com_input_snd = Vec::with_capacity(n_in);
        let mut input_value_blindings = Vec::with_capacity(n_in);

        for (i, coin) in params.input_coins.iter().enumerate() {
            let r_value = if has_outputs { Scalar::random(rng) } else { Scalar::ZERO };
            let r_snd = Scalar::random(rng);
            let cm_value = basis.commit_value(coin.value, &r_value);
            let cm_snd = basis.commit_at(&coin.snd, &r_snd, PedersenIndex::SerialNumberDerivator);

            // Subtracting the partial commitments leaves a commitment to zero at the real coin
            let cm_sum = com_sk + cm_value + cm_snd + com_shard;
            let r_sum = r_sk + r_value + r_snd + shard_blinding;
            let ring = params.commitments[i * ring_size..(i + 1) * ring_size]
                .iter()
                .map(|commitment| commitment - cm_sum)
                .collect();
            let position = params.my_commitment_indices[i];
            one_of_many_witnesses.push(OneOutOfManyWitness::new(
                OneOutOfManyStatement::new(ring),
                coin.randomness - r_sum,
                position,
            )?);

            let statement = SerialNumberPrivacyStatement {
                sn: derive(basis.generator(PedersenIndex::PrivateKey), &sk, &coin.snd),
                com_sk,
                com_input: cm_snd,
            };
            serial_number_witnesses.push(SerialNumberPrivacyWitness::new(statement, sk, r_sk, coin.snd, r_snd));

            com_input_value.push(cm_value);
            com_input_snd.push(cm_snd);
            input_value_blindings.push(r_value);
        }

        let n_out = params.output_coins.len();
        let mut output_value_blindings = Vec::with_capacity(n_out);
        let mut com_output_value = Vec::with_capacity(n_out);
        let mut com_output_snd = Vec::with_capacity(n_out);
        let mut com_output_shard = Vec::with_capacity(n_out);
        let mut output_commitments = Vec::with_capacity(n_out);
        let mut output_randomness = Vec::with_capacity(n_out);

        // The last value blinding telescopes so Σ comInputValue - Σ comOutputValue = fee * G_value
        let mut remaining: Scalar = input_value_blindings.iter().sum();
        for (j, coin) in params.output_coins.iter().enumerate() {
            let r_value = if j + 1 == n_out { remaining } else { Scalar::random(rng) };
            remaining -= r_value;
            let r_snd = Scalar::random(rng);
            let r_shard = Scalar::random(rng);

            let cm_value = basis.commit_value(coin.value, &r_value);
            let cm_snd = basis.commit_at(&coin.snd, &r_snd, PedersenIndex::SerialNumberDerivator);
            let cm_shard = basis.commit_at(&Scalar::from(coin.shard_id() as u64), &r_shard, PedersenIndex::ShardId);

            output_commitments.push(coin.public_key + cm_value + cm_snd + cm_shard);
            output_randomness.push(r_value + r_snd + r_shard);
            output_value_blindings.push(r_value);
            com_output_value.push(cm_value);
            com_output_snd.push(cm_snd);
            com_output_shard.push(cm_shard);
        }

        let range_witness = if has_outputs {
            Some(AggregatedRangeWitness::new(output_values, output_value_blindings)?)
        } else {
            None
        };

        Ok(Self {
            has_privacy: true,
            one_of_many_witnesses,
            serial_number_witnesses,
            serial_number_no_privacy_witnesses: Vec::new(),
            range_witness,
            com_sk: Some(com_sk),
            com_shard: Some(com_shard),
            com_input_value,
            com_input_snd,
            com_output_value,
            com_output_snd,
            com_output_shard,
            output_commitments,
            output_public_keys: params.output_coins.iter().map(|coin| coin.public_key).collect(),
            output_randomness,
            output_snds: Vec::new(),
            commitment_indices: params.commitment_indices,
            input_values: Vec::new(),
            output_values: Vec::new(),
        })
    }

    fn without_privacy<R: RngCore + CryptoRng>(
        params: PaymentWitnessParams,
        basis: &PedersenBasis,
        input_values: Vec<u64>,
        output_values: Vec<u64>,
        rng: &mut R,
    ) -> PrivacyResult<Self> {
        let serial_number_no_privacy_witnesses = params
            .input_coins
            .iter()
            .map(|coin| SerialNumberNoPrivacyWitness::from_secrets(basis, params.private_key, coin.snd))
            .collect();

        let mut output_commitments = Vec::with_capacity(params.output_coins.len());
        let mut output_randomness = Vec::with_capacity(params.output_coins.len());
        for coin in &params.output_coins {
            let randomness = Scalar::random(rng);
            output_commitments.push(crate::coin::coin_commitment(
                basis,
                &coin.public_key,
                coin.value,
                &coin.snd,
                coin.shard_id(),
                &randomness,
            ));
            output_randomness.push(randomness);
        }

        Ok(Self {
            has_privacy: false,
            one_of_many_witnesses: Vec::new(),
            serial_number_witnesses: Vec::new(),
            serial_number_no_privacy_witnesses,
            range_witness: None,
            com_sk: None,
            com_shard: None,
            com_input_value: Vec::new(),
            com_input_snd: Vec::new(),
            com_output_value: Vec::new(),
            com_output_snd: Vec::new(),
            com_output_shard: Vec::new(),
            output_commitments,
            output_public_keys: params.output_coins.iter().map(|coin| coin.public_key).collect(),
            output_randomness,
            output_snds: params.output_coins.iter().map(|coin| coin.snd).collect(),
            commitment_indices: Vec::new(),
            input_values,
            output_values,
        })
    }

    pub fn has_privacy(&self) -> bool {
        self.has_privacy
    }

    /// Commitments of the coins this payment creates
    pub fn output_commitments(&self) -> &[RistrettoPoint] {
        &self.output_commitments
    }

    /// Blinding of each output coin commitment, handed to its receiver
    ///
    /// Without privacy it is also published in the proof.
    pub fn output_randomness(&self) -> &[Scalar] {
        &self.output_randomness
    }

    pub fn prove<R: RngCore + CryptoRng>(&self, rng: &mut R) -> PrivacyResult<PaymentProof> {
        info!(
            has_privacy = self.has_privacy,
            inputs = self.one_of_many_witnesses.len() + self.serial_number_no_privacy_witnesses.len(),
            outputs = self.output_commitments.len(),
            "proving payment"
        );

        let one_of_many_proofs = self
            .one_of_many_witnesses
            .iter()
            .map(|witness| witness.prove(&mut *rng))
            .collect::<PrivacyResult<Vec<_>>>()?;
        let serial_number_proofs = self
            .serial_number_witnesses
            .iter()
            .map(|witness| witness.prove(None, &mut *rng))
            .collect::<PrivacyResult<Vec<_>>>()?;
        let serial_number_no_privacy_proofs = self
            .serial_number_no_privacy_witnesses
            .iter()
            .map(|witness| witness.prove(None, &mut *rng))
            .collect::<PrivacyResult<Vec<_>>>()?;
        let range_proof = self
            .range_witness
            .as_ref()
            .map(|witness| witness.prove(&mut *rng))
            .transpose()?;

        let compress = |points: &[RistrettoPoint]| points.iter().map(|p| p.compress()).collect::<Vec<_>>();
        Ok(PaymentProof {
            has_privacy: self.has_privacy,
            one_of_many_proofs,
            serial_number_proofs,
            serial_number_no_privacy_proofs,
            range_proof,
            com_sk: self.com_sk.map(|p| p.compress()),
            com_shard: self.com_shard.map(|p| p.compress()),
            com_input_value: compress(&self.com_input_value),
            com_input_snd: compress(&self.com_input_snd),
            com_output_value: compress(&self.com_output_value),
            com_output_snd: compress(&self.com_output_snd),
            com_output_shard: compress(&self.com_output_shard),
            output_commitments: compress(&self.output_commitments),
            output_public_keys: compress(&self.output_public_keys),
            commitment_indices: self.commitment_indices.clone(),
            input_values: self.input_values.clone(),
            output_values: self.output_values.clone(),
            output_snds: self.output_snds.clone(),
            output_randomness: if self.has_privacy {
                Vec::new()
            } else {
                self.output_randomness.clone()
            },
        })
    }
}
