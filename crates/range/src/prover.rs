//! Aggregated range proof prover implementation

use crate::AggregatedRangeProof;
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use ipa::InnerProductWitness;
use privacy_core::{
    challenge_from_cache, encode_vectors, hash_to_scalar,
    utils::{
        bit_decomposition, hadamard_product, inner_product, next_power_of_two, power_vector,
        vector_add, vector_add_scalar, vector_mul_scalar,
    },
    BulletproofGens, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult, MAX_EXP,
};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

/// Largest value count a range proof can encode behind its count byte
pub const MAX_VALUES: usize = u8::MAX as usize;

/// Values to range-prove together with their blinding scalars
#[derive(Debug, Clone)]
pub struct AggregatedRangeWitness {
    values: Vec<u64>,
    rands: Vec<Scalar>,
}

impl AggregatedRangeWitness {
    pub fn new(values: Vec<u64>, rands: Vec<Scalar>) -> PrivacyResult<Self> {
        if values.is_empty() {
            return Err(PrivacyError::InvalidParameters(
                "range witness needs at least one value".to_string(),
            ));
        }
        if values.len() > MAX_VALUES {
            return Err(PrivacyError::InvalidParameters(format!(
                "range witness of {} values exceeds {MAX_VALUES}",
                values.len()
            )));
        }
        if values.len() != rands.len() {
            return Err(PrivacyError::VectorLengthMismatch {
                expected: values.len(),
                actual: rands.len(),
            });
        }
        Ok(Self { values, rands })
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Prove against the process-wide bases
    pub fn prove<R: RngCore + CryptoRng>(&self, rng: &mut R) -> PrivacyResult<AggregatedRangeProof> {
        self.prove_with(PedersenBasis::global(), BulletproofGens::global(), rng)
    }

    pub fn prove_with<R: RngCore + CryptoRng>(
        &self,
        basis: &PedersenBasis,
        gens: &BulletproofGens,
        rng: &mut R,
    ) -> PrivacyResult<AggregatedRangeProof> {
        let num_values = self.values.len();
        let num_values_pad = next_power_of_two(num_values);
        let n = MAX_EXP * num_values_pad;
        let (g, h) = gens.slice(n)?;
        debug!(num_values, n, "proving aggregated range proof");

        let mut values = self.values.clone();
        let mut rands = self.rands.clone();
        values.resize(num_values_pad, 0);
        rands.resize(num_values_pad, Scalar::ZERO);

        let cms_value = values[..num_values]
            .iter()
            .zip(rands.iter())
            .map(|(v, r)| basis.commit_value(*v, r).compress())
            .collect();

        let a_l: Vec<Scalar> = values
            .iter()
            .flat_map(|v| bit_decomposition(*v, MAX_EXP))
            .collect();
        let a_r = vector_add_scalar(&a_l, &-Scalar::ONE);
        let s_l: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();
        let s_r: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();

        // A = <aL, g> + <aR, h> + alpha * H, S = <sL, g> + <sR, h> + rho * H
        let alpha = Scalar::random(rng);
        let rho = Scalar::random(rng);
        let a = (encode_vectors(&a_l, &a_r, g, h)? + basis.h() * alpha).compress();
        let s = (encode_vectors(&s_l, &s_r, g, h)? + basis.h() * rho).compress();

        let y = challenge_from_cache(gens.cs().as_bytes(), &[a, s]);
        let z = challenge_from_cache(y.as_bytes(), &[a, s]);

        let y_vector = power_vector(&y, n);
        let two_vector = power_vector(&Scalar::from(2u64), MAX_EXP);
        let vector_sum = z_two_vector(&z, &two_vector, num_values_pad);

        // l(X) = (aL - z) + sL * X; r(X) = y^n ∘ (aR + z + sR * X) + z^(2+j) * 2^n
        let l0 = vector_add_scalar(&a_l, &-z);
        let l1 = &s_l;
        let r0 = vector_add(&hadamard_product(&y_vector, &vector_add_scalar(&a_r, &z))?, &vector_sum)?;
        let r1 = hadamard_product(&y_vector, &s_r)?;

        // t1 = <l1, r0> + <l0, r1>, t2 = <l1, r1>
        let t1 = inner_product(l1, &r0)? + inner_product(&l0, &r1)?;
        let t2 = inner_product(l1, &r1)?;

        let tau1 = Scalar::random(rng);
        let tau2 = Scalar::random(rng);
        let t1_commitment = basis.commit_at(&t1, &tau1, PedersenIndex::Value).compress();
        let t2_commitment = basis.commit_at(&t2, &tau2, PedersenIndex::Value).compress();

        let x = challenge_from_cache(z.as_bytes(), &[t1_commitment, t2_commitment]);

        let l_vector = vector_add(&l0, &vector_mul_scalar(l1, &x))?;
        let r_vector = vector_add(&r0, &vector_mul_scalar(&r1, &x))?;
        let t_hat = inner_product(&l_vector, &r_vector)?;

        // tauX = tau2 * x^2 + tau1 * x + Σ z^(2+j) * rand_j
        let mut tau_x = tau2 * x * x + tau1 * x;
        let mut z_power = z;
        for rand in &rands {
            z_power *= z;
            tau_x += z_power * rand;
        }
        let mu = alpha + rho * x;

        // h'_i = h_i * y^-i
        let y_inv_vector = power_vector(&y.invert(), n);
        let h_prime: Vec<RistrettoPoint> = h.iter().zip(y_inv_vector.iter()).map(|(h_i, y_i)| h_i * y_i).collect();

        let u_prime = gens.u * hash_to_scalar(x.as_bytes());
        let p = encode_vectors(&l_vector, &r_vector, g, &h_prime)? + u_prime * t_hat;

        let inner_product_proof =
            InnerProductWitness::new(l_vector, r_vector, p).prove(g, &h_prime, &u_prime, x.as_bytes())?;

        Ok(AggregatedRangeProof {
            cms_value,
            a,
            s,
            t1: t1_commitment,
            t2: t2_commitment,
            tau_x,
            t_hat,
            mu,
            inner_product_proof,
        })
    }
}

/// `z^(2+j) * 2^i` laid out for value `j`, bit `i`
pub(crate) fn z_two_vector(z: &Scalar, two_vector: &[Scalar], num_values_pad: usize) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(two_vector.len() * num_values_pad);
    let mut z_power = *z;
    for _ in 0..num_values_pad {
        z_power *= z;
        out.extend(two_vector.iter().map(|two_i| two_i * z_power));
    }
    out
}
