//! One-out-of-many verifier implementation

use crate::{proof::ring_exponent, prover::fold_challenge, OneOutOfManyProof};
use curve25519_dalek::{
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::{IsIdentity, VartimeMultiscalarMul},
};
use privacy_core::{decompress_all, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult, Protocol};
use tracing::{debug, warn};

impl OneOutOfManyProof {
    /// Verify against the process-wide basis
    ///
    /// The ring must have been attached with [`OneOutOfManyProof::set_statement`].
    pub fn verify(&self) -> PrivacyResult<()> {
        self.verify_with(PedersenBasis::global())
    }

    pub fn verify_with(&self, basis: &PedersenBasis) -> PrivacyResult<()> {
        let statement = self.statement.as_ref().ok_or_else(|| {
            PrivacyError::InvalidParameters("one-out-of-many proof has no statement attached".to_string())
        })?;
        let ring = &statement.commitments;
        let n = ring_exponent(ring.len())?;
        if self.ring_exp() != n {
            return Err(PrivacyError::InvalidParameters(format!(
                "proof built for ring exponent {}, statement has {n}",
                self.ring_exp()
            )));
        }
        let lengths = [self.ca.len(), self.cb.len(), self.cd.len(), self.f.len(), self.za.len(), self.zb.len()];
        if let Some(&actual) = lengths.iter().find(|len| **len != n) {
            return Err(PrivacyError::VectorLengthMismatch { expected: n, actual });
        }
        debug!(ring_size = ring.len(), "verifying one-out-of-many proof");

        let fail = |statement: u8| {
            warn!(statement, "verify one-out-of-many proof failed");
            PrivacyError::VerificationFailed {
                protocol: Protocol::OneOutOfMany,
                statement,
            }
        };

        let cl = decompress_all(&self.cl)?;
        let ca = decompress_all(&self.ca)?;
        let cb = decompress_all(&self.cb)?;
        let cd = decompress_all(&self.cd)?;

        let x = fold_challenge(basis, &self.cl, &self.ca, &self.cb, &self.cd);
        let g = basis.generator(PedersenIndex::PrivateKey);
        let h = basis.h();

        for j in 0..n {
            // x * cl_j + ca_j == Com(f_j, za_j)
            let statement_1 = RistrettoPoint::vartime_multiscalar_mul(
                [x, Scalar::ONE, -self.f[j], -self.za[j]],
                [&cl[j], &ca[j], g, h],
            );
            if !statement_1.is_identity() {
                return Err(fail(1));
            }

            // (x - f_j) * cl_j + cb_j == Com(0, zb_j)
            let statement_2 = RistrettoPoint::vartime_multiscalar_mul(
                [x - self.f[j], Scalar::ONE, -self.zb[j]],
                [&cl[j], &cb[j], h],
            );
            if !statement_2.is_identity() {
                return Err(fail(2));
            }
        }

        // Σ_i p_i(x) * C_i - Σ_k x^k * cd_k == Com(0, zd)
        let f_zero: Vec<Scalar> = self.f.iter().map(|f| x - f).collect();
        let ring_scalars = (0..ring.len()).map(|i| {
            (0..n).fold(Scalar::ONE, |acc, j| {
                if (i >> j) & 1 == 1 {
                    acc * self.f[j]
                } else {
                    acc * f_zero[j]
                }
            })
        });
        let mut x_power = Scalar::ONE;
        let cd_scalars = (0..n).map(|_| {
            let current = -x_power;
            x_power *= x;
            current
        });
        let statement_3 = RistrettoPoint::vartime_multiscalar_mul(
            ring_scalars.chain(cd_scalars).chain([-self.zd]),
            ring.iter().chain(cd.iter()).chain([h]),
        );
        if !statement_3.is_identity() {
            return Err(fail(3));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
    use privacy_core::{PedersenBasis, PedersenIndex, PrivacyError, Proof, Protocol};
    use rand::thread_rng;

    /// Ring of `size` random commitments with a zero commitment at `index`
    fn ring_with_zero(size: usize, index: usize) -> (OneOutOfManyStatement, Scalar) {
        let mut rng = thread_rng();
        let basis = PedersenBasis::global();
        let rand = Scalar::random(&mut rng);
        let commitments = (0..size)
            .map(|i| {
                let value = if i == index { Scalar::ZERO } else { Scalar::random(&mut rng) };
                let blinding = if i == index { rand } else { Scalar::random(&mut rng) };
                basis.commit_at(&value, &blinding, PedersenIndex::PrivateKey)
            })
            .collect();
        (OneOutOfManyStatement::new(commitments), rand)
    }

    fn prove(size: usize, index: usize) -> OneOutOfManyProof {
        let (statement, rand) = ring_with_zero(size, index);
        OneOutOfManyWitness::new(statement, rand, index)
            .unwrap()
            .prove(&mut thread_rng())
            .unwrap()
    }

    #[test]
    fn test_ring_of_eight() {
        let proof = prove(8, 5);
        assert!(proof.verify().is_ok());

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), ONE_OF_MANY_PROOF_SIZE);

        let decoded = OneOutOfManyProof::from_bytes(&bytes).unwrap();
        assert!(decoded.statement.is_none());
        let statement = proof.statement.clone().unwrap();
        let decoded = decoded.with_statement(statement);
        assert_eq!(decoded, proof);
        assert!(decoded.verify().is_ok());
    }

    #[test]
    fn test_every_index_of_small_ring() {
        for index in 0..4 {
            assert!(prove(4, index).verify().is_ok());
        }
    }

    #[test]
    fn test_ring_of_two() {
        let proof = prove(2, 1);
        assert!(proof.verify().is_ok());
        assert_eq!(proof.to_bytes().len(), proof_size(1));
    }

    #[test]
    fn test_missing_statement() {
        let mut proof = prove(4, 0);
        proof.statement = None;
        assert!(matches!(proof.verify(), Err(PrivacyError::InvalidParameters(_))));
    }

    #[test]
    fn test_wrong_ring_fails() {
        let proof = prove(8, 2);
        let (other, _) = ring_with_zero(8, 2);
        let proof = proof.with_statement(other);
        assert!(proof.verify().is_err());
    }

    #[test]
    fn test_ring_size_mismatch() {
        let proof = prove(8, 2);
        let (smaller, _) = ring_with_zero(4, 2);
        assert!(matches!(
            proof.with_statement(smaller).verify(),
            Err(PrivacyError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_no_zero_commitment_fails() {
        // The witness blinding does not open the ring member at the index
        let (statement, _) = ring_with_zero(8, 3);
        let proof = OneOutOfManyWitness::new(statement, Scalar::from(7u64), 3)
            .unwrap()
            .prove(&mut thread_rng())
            .unwrap();
        assert_eq!(
            proof.verify(),
            Err(PrivacyError::VerificationFailed {
                protocol: Protocol::OneOutOfMany,
                statement: 3
            })
        );
    }

    #[test]
    fn test_tampered_responses() {
        let proof = prove(8, 6);

        let mut tampered = proof.clone();
        tampered.za[1] += Scalar::ONE;
        assert_eq!(tampered.verify().unwrap_err().statement(), Some(1));

        let mut tampered = proof.clone();
        tampered.zb[0] += Scalar::ONE;
        assert_eq!(tampered.verify().unwrap_err().statement(), Some(2));

        let mut tampered = proof;
        tampered.zd += Scalar::ONE;
        assert_eq!(tampered.verify().unwrap_err().statement(), Some(3));
    }

    #[test]
    fn test_sanity_gate() {
        let mut proof = prove(4, 1);
        assert!(proof.validate_sanity());

        proof.cb[0] = CompressedRistretto([0xff; 32]);
        assert!(!proof.validate_sanity());
        assert!(matches!(proof.verify(), Err(PrivacyError::InvalidPoint)));

        let mut proof = prove(4, 1);
        proof.f.pop();
        assert!(!proof.validate_sanity());
    }
}
