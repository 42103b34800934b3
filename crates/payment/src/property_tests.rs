//! Property-based tests for payment proofs

use crate::{estimate_proof_size, fixtures::ledger, PaymentProof, VerifyContext};
use privacy_core::{Proof, ProofParams};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    /// Balanced private payments verify, round trip and match the size estimate
    #[test]
    fn test_completeness(
        inputs in prop::collection::vec(1u64..1_000_000, 1..3),
        fee_percent in 0u64..50,
        split_percent in 1u64..100,
    ) {
        let total: u64 = inputs.iter().sum();
        let fee = total * fee_percent / 100;
        let rest = total - fee;
        let first = rest * split_percent / 100;
        let outputs: Vec<u64> = [first, rest - first].into_iter().filter(|v| *v > 0).collect();

        let ledger = ledger(true, &inputs, &outputs, fee);
        let proof = ledger.prove()?;
        let ctx = VerifyContext { fee, ring_size_exp: 3, source: &ledger.commitments };
        prop_assert!(proof.verify(&ctx).is_ok());

        let bytes = proof.to_bytes();
        prop_assert_eq!(
            bytes.len(),
            estimate_proof_size(inputs.len(), outputs.len(), true, &ProofParams::default())
        );
        prop_assert_eq!(PaymentProof::from_bytes(&bytes)?, proof);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// A flipped byte anywhere in a payment proof never verifies
    #[test]
    fn test_tamper_sensitivity(
        has_privacy in any::<bool>(),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let ledger = ledger(has_privacy, &[70, 30], &[60, 30], 10);
        let mut bytes = ledger.prove()?.to_bytes();
        let i = position.index(bytes.len());
        bytes[i] ^= flip;

        let ctx = VerifyContext { fee: 10, ring_size_exp: 3, source: &ledger.commitments };
        let rejected = match PaymentProof::from_bytes(&bytes) {
            Err(_) => true,
            Ok(tampered) => tampered.verify(&ctx).is_err(),
        };
        prop_assert!(rejected);
    }
}
