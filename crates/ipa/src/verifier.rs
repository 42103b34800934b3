//! Inner Product Argument verifier implementation

use crate::InnerProductProof;
use curve25519_dalek::{
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::{IsIdentity, VartimeMultiscalarMul},
};
use privacy_core::{
    challenge_from_cache, decompress, decompress_all,
    utils::{is_power_of_two, log2},
    PrivacyError, PrivacyResult, Protocol,
};
use tracing::warn;

/// Scalars the verification equation is linear in
#[derive(Debug, Clone)]
pub struct VerificationScalars {
    /// Squared round challenges `v_i^2`
    pub challenges_sq: Vec<Scalar>,
    /// Inverted squared round challenges `v_i^-2`
    pub challenges_inv_sq: Vec<Scalar>,
    /// Generator coefficients `s`; `s^-1` is `s` reversed
    pub s: Vec<Scalar>,
}

impl InnerProductProof {
    /// Recompute the round challenges and the coefficient vector `s` for vectors of length `n`
    pub fn verification_scalars(&self, n: usize, hash_cache: &[u8; 32]) -> PrivacyResult<VerificationScalars> {
        self.validate_structure()?;
        if !is_power_of_two(n) {
            return Err(PrivacyError::InvalidParameters(format!(
                "vector length {n} is not a power of two"
            )));
        }
        let rounds = log2(n);
        if self.num_rounds() != rounds {
            return Err(PrivacyError::InvalidParameters(format!(
                "expected {rounds} rounds for vector length {n}, got {}",
                self.num_rounds()
            )));
        }

        let mut cache = *hash_cache;
        let mut challenges = Vec::with_capacity(rounds);
        for (l, r) in self.l_vec.iter().zip(self.r_vec.iter()) {
            let x = challenge_from_cache(&cache, &[*l, *r]);
            cache = x.to_bytes();
            challenges.push(x);
        }

        let mut challenges_inv = challenges.clone();
        let all_inv = Scalar::batch_invert(&mut challenges_inv);

        // s_0 = Π v_i^-1, and setting bit k of the index trades v^-1 for v
        // in the round that split on that bit
        let challenges_sq: Vec<Scalar> = challenges.iter().map(|x| x * x).collect();
        let mut s = Vec::with_capacity(n);
        s.push(all_inv);
        for i in 1..n {
            let lg_i = (usize::BITS - 1 - i.leading_zeros()) as usize;
            let k = 1 << lg_i;
            s.push(s[i - k] * challenges_sq[rounds - 1 - lg_i]);
        }

        Ok(VerificationScalars {
            challenges_inv_sq: challenges_inv.iter().map(|x| x * x).collect(),
            challenges_sq,
            s,
        })
    }

    /// Verify the argument against its own point `p`
    pub fn verify(
        &self,
        g: &[RistrettoPoint],
        h: &[RistrettoPoint],
        u: &RistrettoPoint,
        hash_cache: &[u8; 32],
    ) -> PrivacyResult<()> {
        let n = g.len();
        if h.len() != n {
            return Err(PrivacyError::VectorLengthMismatch { expected: n, actual: h.len() });
        }
        let scalars = self.verification_scalars(n, hash_cache)?;

        let p = decompress(&self.p)?;
        let l_vec = decompress_all(&self.l_vec)?;
        let r_vec = decompress_all(&self.r_vec)?;

        let g_scalars = scalars.s.iter().map(|s| self.a * s);
        let h_scalars = scalars.s.iter().rev().map(|s_inv| self.b * s_inv);
        let check = RistrettoPoint::vartime_multiscalar_mul(
            g_scalars
                .chain(h_scalars)
                .chain(std::iter::once(self.a * self.b))
                .chain(scalars.challenges_sq.iter().map(|x| -x))
                .chain(scalars.challenges_inv_sq.iter().map(|x| -x))
                .chain(std::iter::once(-Scalar::ONE)),
            g.iter()
                .chain(h.iter())
                .chain(std::iter::once(u))
                .chain(l_vec.iter())
                .chain(r_vec.iter())
                .chain(std::iter::once(&p)),
        );

        if check.is_identity() {
            Ok(())
        } else {
            warn!("verify inner product proof failed");
            Err(PrivacyError::VerificationFailed {
                protocol: Protocol::InnerProduct,
                statement: 1,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InnerProductWitness;
    use privacy_core::{BulletproofGens, Proof};
    use rand::thread_rng;

    fn prove_random(n: usize) -> (BulletproofGens, InnerProductProof) {
        let mut rng = thread_rng();
        let gens = BulletproofGens::new(n);
        let a: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let b: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let p = gens.inner_product_commit(&a, &b).unwrap();

        let proof = InnerProductWitness::new(a, b, p)
            .prove(&gens.g_vec, &gens.h_vec, &gens.u, &[7u8; 32])
            .unwrap();
        (gens, proof)
    }

    fn test_ipa_round_trip(vector_length: usize) {
        let (gens, proof) = prove_random(vector_length);
        assert!(proof.verify(&gens.g_vec, &gens.h_vec, &gens.u, &[7u8; 32]).is_ok());

        let decoded = InnerProductProof::from_bytes(&proof.to_bytes()).unwrap();
        assert!(decoded.validate_sanity());
        assert!(decoded.verify(&gens.g_vec, &gens.h_vec, &gens.u, &[7u8; 32]).is_ok());
    }

    #[test]
    fn test_ipa_verification_length_1() {
        test_ipa_round_trip(1);
    }

    #[test]
    fn test_ipa_verification_length_2() {
        test_ipa_round_trip(2);
    }

    #[test]
    fn test_ipa_verification_length_8() {
        test_ipa_round_trip(8);
    }

    #[test]
    fn test_ipa_verification_larger_vectors() {
        test_ipa_round_trip(64);
    }

    #[test]
    fn test_s_matches_bitwise_definition() {
        let (_, proof) = prove_random(8);
        let scalars = proof.verification_scalars(8, &[7u8; 32]).unwrap();

        let mut cache = [7u8; 32];
        let mut challenges = Vec::new();
        for (l, r) in proof.l_vec.iter().zip(proof.r_vec.iter()) {
            let x = challenge_from_cache(&cache, &[*l, *r]);
            cache = x.to_bytes();
            challenges.push(x);
        }
        for (i, s_i) in scalars.s.iter().enumerate() {
            let mut expected = Scalar::ONE;
            for (round, x) in challenges.iter().enumerate() {
                let bit = (i >> (challenges.len() - 1 - round)) & 1;
                expected *= if bit == 1 { *x } else { x.invert() };
            }
            assert_eq!(*s_i, expected);
        }
    }

    #[test]
    fn test_invalid_proof_wrong_rounds() {
        let (gens, proof) = prove_random(4);
        assert!(matches!(
            proof.verify(&gens.g_vec[..2], &gens.h_vec[..2], &gens.u, &[7u8; 32]),
            Err(PrivacyError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_wrong_hash_cache_rejected() {
        let (gens, proof) = prove_random(4);
        assert_eq!(
            proof.verify(&gens.g_vec, &gens.h_vec, &gens.u, &[8u8; 32]),
            Err(PrivacyError::VerificationFailed { protocol: Protocol::InnerProduct, statement: 1 })
        );
    }

    #[test]
    fn test_forge_proof_detection() {
        let (gens, mut proof) = prove_random(4);
        proof.a += Scalar::ONE;
        assert!(proof.verify(&gens.g_vec, &gens.h_vec, &gens.u, &[7u8; 32]).is_err());
    }
}
