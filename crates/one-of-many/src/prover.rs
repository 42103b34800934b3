//! One-out-of-many prover implementation

use crate::{proof::ring_exponent, OneOutOfManyProof, OneOutOfManyStatement, Polynomial};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::MultiscalarMul,
};
use privacy_core::{generate_challenge, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

/// Knowledge of the blinding of the ring member at `index`, which commits to zero
#[derive(Debug, Clone)]
pub struct OneOutOfManyWitness {
    statement: OneOutOfManyStatement,
    rand: Scalar,
    index: usize,
}

impl OneOutOfManyWitness {
    pub fn new(statement: OneOutOfManyStatement, rand: Scalar, index: usize) -> PrivacyResult<Self> {
        ring_exponent(statement.len())?;
        if index >= statement.len() {
            return Err(PrivacyError::InvalidParameters(format!(
                "index {index} outside ring of {}",
                statement.len()
            )));
        }
        Ok(Self { statement, rand, index })
    }

    /// Prove against the process-wide basis
    pub fn prove<R: RngCore + CryptoRng>(&self, rng: &mut R) -> PrivacyResult<OneOutOfManyProof> {
        self.prove_with(PedersenBasis::global(), rng)
    }

    pub fn prove_with<R: RngCore + CryptoRng>(
        &self,
        basis: &PedersenBasis,
        rng: &mut R,
    ) -> PrivacyResult<OneOutOfManyProof> {
        let ring = &self.statement.commitments;
        let n = ring_exponent(ring.len())?;
        debug!(ring_size = ring.len(), "proving one-out-of-many");

        let commit = |v: &Scalar, r: &Scalar| basis.commit_at(v, r, PedersenIndex::PrivateKey);

        let bits: Vec<Scalar> = (0..n)
            .map(|j| Scalar::from(((self.index >> j) & 1) as u64))
            .collect();
        let mut random_vector = || (0..n).map(|_| Scalar::random(&mut *rng)).collect::<Vec<_>>();
        let r = random_vector();
        let a = random_vector();
        let s = random_vector();
        let t = random_vector();
        let u = random_vector();

        let mut cl = Vec::with_capacity(n);
        let mut ca = Vec::with_capacity(n);
        let mut cb = Vec::with_capacity(n);
        for j in 0..n {
            cl.push(commit(&bits[j], &r[j]).compress());
            ca.push(commit(&a[j], &s[j]).compress());
            cb.push(commit(&(bits[j] * a[j]), &t[j]).compress());
        }

        // p_i(X) = Π_j f_{j, i_j}(X), f_{j,1} = l_j X + a_j, f_{j,0} = X - f_{j,1}
        let coefficients: Vec<Polynomial> = (0..ring.len())
            .map(|i| {
                (0..n).fold(Polynomial::one(), |acc, j| {
                    let factor = if (i >> j) & 1 == 1 {
                        Polynomial::linear(bits[j], a[j])
                    } else {
                        Polynomial::linear(Scalar::ONE - bits[j], -a[j])
                    };
                    &acc * &factor
                })
            })
            .collect();

        // cd_k = Σ_i p_{i,k} C_i + Com(0, u_k)
        let cd: Vec<CompressedRistretto> = (0..n)
            .map(|k| {
                let sum = RistrettoPoint::multiscalar_mul(coefficients.iter().map(|p| p.coefficient(k)), ring.iter());
                (sum + commit(&Scalar::ZERO, &u[k])).compress()
            })
            .collect();

        let x = fold_challenge(basis, &cl, &ca, &cb, &cd);

        let f: Vec<Scalar> = (0..n).map(|j| bits[j] * x + a[j]).collect();
        let za = (0..n).map(|j| r[j] * x + s[j]).collect();
        let zb = (0..n).map(|j| r[j] * (x - f[j]) + t[j]).collect();

        // zd = rand * x^n - Σ u_k x^k
        let mut x_power = Scalar::ONE;
        let mut zd = Scalar::ZERO;
        for u_k in &u {
            zd -= u_k * x_power;
            x_power *= x;
        }
        zd += self.rand * x_power;

        Ok(OneOutOfManyProof {
            statement: Some(self.statement.clone()),
            cl,
            ca,
            cb,
            cd,
            f,
            za,
            zb,
            zd,
        })
    }
}

/// Challenge obtained by folding every `(cl, ca, cb, cd)` tuple in order, starting from zero
pub(crate) fn fold_challenge(
    basis: &PedersenBasis,
    cl: &[CompressedRistretto],
    ca: &[CompressedRistretto],
    cb: &[CompressedRistretto],
    cd: &[CompressedRistretto],
) -> Scalar {
    let mut x = Scalar::ZERO;
    for j in 0..cl.len() {
        x = generate_challenge(
            basis,
            &[
                x.as_bytes().as_slice(),
                cl[j].as_bytes().as_slice(),
                ca[j].as_bytes().as_slice(),
                cb[j].as_bytes().as_slice(),
                cd[j].as_bytes().as_slice(),
            ],
        );
    }
    x
}
