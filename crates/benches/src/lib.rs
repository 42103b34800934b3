//! Benchmarks for the confidential payment proofs
//!
//! This crate contains performance benchmarks for:
//! - Aggregated range proof generation, verification and batch verification
//! - Inner product argument (IPA) operations
//! - One-out-of-many proofs over growing rings
//! - Serial number proofs
//! - Complete payment proofs
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p benches
//! ```
//!
//! Or run specific benchmarks:
//! ```bash
//! cargo bench -p benches --bench range_proof
//! cargo bench -p benches --bench one_of_many
//! ```

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use one_of_many::OneOutOfManyStatement;
use payment::{InputCoin, OutputCoin, PaymentWitnessParams};
use privacy_core::{PedersenBasis, PedersenIndex};
use rand::thread_rng;
use std::collections::HashMap;

/// Random blinding scalars, one per value
pub fn random_blindings(count: usize) -> Vec<Scalar> {
    let mut rng = thread_rng();
    (0..count).map(|_| Scalar::random(&mut rng)).collect()
}

/// Ring of `2^ring_exp` commitments with a commitment to zero at `index`, and its blinding
pub fn ring_with_zero(ring_exp: usize, index: usize) -> (OneOutOfManyStatement, Scalar) {
    let mut rng = thread_rng();
    let basis = PedersenBasis::global();
    let rand = Scalar::random(&mut rng);
    let commitments = (0..1usize << ring_exp)
        .map(|i| {
            let value = if i == index { Scalar::ZERO } else { Scalar::random(&mut rng) };
            let blinding = if i == index { rand } else { Scalar::random(&mut rng) };
            basis.commit_at(&value, &blinding, PedersenIndex::PrivateKey)
        })
        .collect();
    (OneOutOfManyStatement::new(commitments), rand)
}

/// A private payment of `n_input` coins of 100 into `n_output` equal outputs, with its ledger
pub fn payment_params(
    n_input: usize,
    n_output: usize,
    ring_size: usize,
) -> (PaymentWitnessParams, HashMap<u64, RistrettoPoint>) {
    let mut rng = thread_rng();
    let basis = PedersenBasis::global();
    let private_key = Scalar::random(&mut rng);
    let public_key = private_key * basis.generator(PedersenIndex::PrivateKey);

    let total = 100 * n_input as u64;
    let share = total / n_output as u64;
    let fee = total - share * n_output as u64;

    let input_coins: Vec<InputCoin> = (0..n_input)
        .map(|_| InputCoin {
            public_key,
            value: 100,
            snd: Scalar::random(&mut rng),
            randomness: Scalar::random(&mut rng),
        })
        .collect();
    let output_coins = (0..n_output)
        .map(|_| OutputCoin {
            public_key: RistrettoPoint::random(&mut rng),
            value: share,
            snd: Scalar::random(&mut rng),
        })
        .collect();

    let mut ledger = HashMap::new();
    let mut commitment_indices = Vec::new();
    let mut commitments = Vec::new();
    for (i, coin) in input_coins.iter().enumerate() {
        for k in 0..ring_size {
            let index = (i * ring_size + k) as u64;
            let commitment = if k == 0 { coin.commitment(basis) } else { RistrettoPoint::random(&mut rng) };
            ledger.insert(index, commitment);
            commitment_indices.push(index);
            commitments.push(commitment);
        }
    }

    let params = PaymentWitnessParams {
        has_privacy: true,
        private_key,
        input_coins,
        output_coins,
        fee,
        commitment_indices,
        my_commitment_indices: vec![0; n_input],
        commitments,
    };
    (params, ledger)
}
