//! Payments over a small in-memory ledger

use crate::{InputCoin, OutputCoin, PaymentProof, PaymentWitness, PaymentWitnessParams};
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use privacy_core::{PedersenBasis, PedersenIndex, PrivacyResult, ProofParams};
use rand::thread_rng;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Ledger {
    pub commitments: HashMap<u64, RistrettoPoint>,
    pub params: PaymentWitnessParams,
}

/// A sender owning one coin per input value, each hidden in a ring of decoys
pub fn ledger(has_privacy: bool, input_values: &[u64], output_values: &[u64], fee: u64) -> Ledger {
    let mut rng = thread_rng();
    let basis = PedersenBasis::global();
    let config = ProofParams::default();
    let ring_size = config.ring_size();

    let private_key = Scalar::random(&mut rng);
    let public_key = private_key * basis.generator(PedersenIndex::PrivateKey);

    let input_coins: Vec<InputCoin> = input_values
        .iter()
        .map(|value| InputCoin {
            public_key,
            value: *value,
            snd: Scalar::random(&mut rng),
            randomness: Scalar::random(&mut rng),
        })
        .collect();
    let output_coins = output_values
        .iter()
        .map(|value| OutputCoin {
            public_key: RistrettoPoint::random(&mut rng),
            value: *value,
            snd: Scalar::random(&mut rng),
        })
        .collect();

    let mut commitments = HashMap::new();
    let mut commitment_indices = Vec::new();
    let mut ring_commitments = Vec::new();
    let mut my_commitment_indices = Vec::new();
    for (i, coin) in input_coins.iter().enumerate() {
        let position = (3 * i + 5) % ring_size;
        for k in 0..ring_size {
            let index = (1000 * i + 7 * k) as u64;
            let commitment = if k == position {
                coin.commitment(basis)
            } else {
                RistrettoPoint::random(&mut rng)
            };
            commitments.insert(index, commitment);
            commitment_indices.push(index);
            ring_commitments.push(commitment);
        }
        my_commitment_indices.push(position);
    }

    Ledger {
        commitments,
        params: PaymentWitnessParams {
            has_privacy,
            private_key,
            input_coins,
            output_coins,
            fee,
            commitment_indices,
            my_commitment_indices,
            commitments: ring_commitments,
        },
    }
}

impl Ledger {
    pub fn prove(&self) -> PrivacyResult<PaymentProof> {
        let mut rng = thread_rng();
        PaymentWitness::new(self.params.clone(), &ProofParams::default(), &mut rng)?.prove(&mut rng)
    }
}
