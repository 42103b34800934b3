//! Aggregated range proof verifier implementation
//!
//! Each verification statement is expressed as a [`Equation`]: a linear
//! combination of the shared generators and proof points that must sum to the
//! identity. Single verification evaluates each equation on its own; batch
//! verification folds many of them into one multi-scalar multiplication.

use crate::{prover::z_two_vector, AggregatedRangeProof};
use curve25519_dalek::{
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::{IsIdentity, VartimeMultiscalarMul},
};
use privacy_core::{
    challenge_from_cache, decompress, decompress_all, hash_to_scalar,
    utils::{log2, next_power_of_two, power_vector},
    BulletproofGens, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult, Protocol, MAX_EXP,
};
use tracing::{debug, warn};

/// `Σ g_i * gens.g_i + Σ h_i * gens.h_i + g_value * G_value + blinding * H + u * gens.u + Σ s_k * P_k`
#[derive(Debug, Clone, Default)]
pub struct Equation {
    pub g: Vec<Scalar>,
    pub h: Vec<Scalar>,
    pub g_value: Scalar,
    pub blinding: Scalar,
    pub u: Scalar,
    pub scalars: Vec<Scalar>,
    pub points: Vec<RistrettoPoint>,
}

impl Equation {
    fn push(&mut self, scalar: Scalar, point: RistrettoPoint) {
        self.scalars.push(scalar);
        self.points.push(point);
    }

    /// Add `weight * other` into this equation
    pub fn accumulate(&mut self, weight: &Scalar, other: &Equation) {
        if self.g.len() < other.g.len() {
            self.g.resize(other.g.len(), Scalar::ZERO);
        }
        if self.h.len() < other.h.len() {
            self.h.resize(other.h.len(), Scalar::ZERO);
        }
        for (acc, s) in self.g.iter_mut().zip(other.g.iter()) {
            *acc += weight * s;
        }
        for (acc, s) in self.h.iter_mut().zip(other.h.iter()) {
            *acc += weight * s;
        }
        self.g_value += weight * other.g_value;
        self.blinding += weight * other.blinding;
        self.u += weight * other.u;
        self.scalars.extend(other.scalars.iter().map(|s| weight * s));
        self.points.extend_from_slice(&other.points);
    }

    /// Whether the combination sums to the identity
    pub fn holds(&self, basis: &PedersenBasis, gens: &BulletproofGens) -> PrivacyResult<bool> {
        let (g, _) = gens.slice(self.g.len())?;
        let (_, h) = gens.slice(self.h.len())?;

        let sum = RistrettoPoint::vartime_multiscalar_mul(
            self.g
                .iter()
                .chain(self.h.iter())
                .chain([&self.g_value, &self.blinding, &self.u])
                .chain(self.scalars.iter()),
            g.iter()
                .chain(h.iter())
                .chain([basis.generator(PedersenIndex::Value), basis.h(), &gens.u])
                .chain(self.points.iter()),
        );
        Ok(sum.is_identity())
    }
}

/// Verification equations of one proof, tagged with their statement number
#[derive(Debug, Clone)]
pub struct RangeEquations {
    pub equations: [(u8, Equation); 3],
}

impl AggregatedRangeProof {
    /// Verify against the process-wide bases
    pub fn verify(&self) -> PrivacyResult<()> {
        self.verify_with(PedersenBasis::global(), BulletproofGens::global())
    }

    pub fn verify_with(&self, basis: &PedersenBasis, gens: &BulletproofGens) -> PrivacyResult<()> {
        debug!(num_values = self.num_values(), "verifying aggregated range proof");
        let RangeEquations { equations } = self.equations(gens)?;

        for (statement, equation) in equations.iter() {
            if !equation.holds(basis, gens)? {
                warn!(statement, "verify aggregated range proof failed");
                return Err(PrivacyError::VerificationFailed {
                    protocol: Protocol::AggregatedRange,
                    statement: *statement,
                });
            }
        }
        Ok(())
    }

    /// Build the three verification equations
    ///
    /// Statement 1 binds `tHat` to the value commitments. Statement 2 is
    /// split in two: the argument point `p` must match `A`, `S` and the
    /// challenges, and the inner product argument must hold for `p`.
    pub fn equations(&self, gens: &BulletproofGens) -> PrivacyResult<RangeEquations> {
        let num_values = self.num_values();
        if num_values == 0 {
            return Err(PrivacyError::InvalidParameters("range proof without commitments".to_string()));
        }
        let num_values_pad = next_power_of_two(num_values);
        let n = MAX_EXP * num_values_pad;
        gens.slice(n)?;
        if self.inner_product_proof.num_rounds() != log2(n) {
            return Err(PrivacyError::InvalidParameters(format!(
                "inner product proof has {} rounds, expected {}",
                self.inner_product_proof.num_rounds(),
                log2(n)
            )));
        }

        let cms_value = decompress_all(&self.cms_value)?;
        let a = decompress(&self.a)?;
        let s = decompress(&self.s)?;
        let t1 = decompress(&self.t1)?;
        let t2 = decompress(&self.t2)?;
        let p = decompress(&self.inner_product_proof.p)?;
        let l_vec = decompress_all(&self.inner_product_proof.l_vec)?;
        let r_vec = decompress_all(&self.inner_product_proof.r_vec)?;

        let y = challenge_from_cache(gens.cs().as_bytes(), &[self.a, self.s]);
        let z = challenge_from_cache(y.as_bytes(), &[self.a, self.s]);
        let x = challenge_from_cache(z.as_bytes(), &[self.t1, self.t2]);
        let z_square = z * z;
        let x_square = x * x;

        let y_vector = power_vector(&y, n);
        let y_inv_vector = power_vector(&y.invert(), n);
        let two_vector = power_vector(&Scalar::from(2u64), MAX_EXP);

        // δ(y, z) = (z - z^2) * Σ y^i - Σ_j z^(j+3) * (2^64 - 1)
        let sum_y: Scalar = y_vector.iter().sum();
        let sum_two = Scalar::from(u64::MAX);
        let mut delta = (z - z_square) * sum_y;
        let mut z_power = z_square;
        for _ in 0..num_values_pad {
            z_power *= z;
            delta -= z_power * sum_two;
        }

        // Statement 1: Com(tHat, tauX) - Σ z^(j+2) V_j - δ G - x T1 - x^2 T2 == 0
        // Padded values commit to the identity and drop out.
        let mut statement1 = Equation {
            g_value: self.t_hat - delta,
            blinding: self.tau_x,
            ..Equation::default()
        };
        let mut z_power = z;
        for v in cms_value {
            z_power *= z;
            statement1.push(-z_power, v);
        }
        statement1.push(-x, t1);
        statement1.push(-x_square, t2);

        let u_weight = hash_to_scalar(x.as_bytes());

        // A + x S - z Σ g_i + Σ (z + z^(2+j) 2^i y^-i) h_i + tHat u' - p - mu H == 0
        let vector_sum = z_two_vector(&z, &two_vector, num_values_pad);
        let mut reconstruction = Equation {
            g: vec![-z; n],
            h: vector_sum
                .iter()
                .zip(y_inv_vector.iter())
                .map(|(sum, y_inv)| z + sum * y_inv)
                .collect(),
            blinding: -self.mu,
            u: self.t_hat * u_weight,
            ..Equation::default()
        };
        reconstruction.push(Scalar::ONE, a);
        reconstruction.push(x, s);
        reconstruction.push(-Scalar::ONE, p);

        // p + Σ v^2 L + Σ v^-2 R - ab u' - Σ a s_i g_i - Σ b s_i^-1 y^-i h_i == 0
        let ipa = &self.inner_product_proof;
        let scalars = ipa.verification_scalars(n, x.as_bytes())?;
        let mut argument = Equation {
            g: scalars.s.iter().map(|s_i| -(ipa.a * s_i)).collect(),
            h: scalars
                .s
                .iter()
                .rev()
                .zip(y_inv_vector.iter())
                .map(|(s_inv, y_inv)| -(ipa.b * s_inv * y_inv))
                .collect(),
            u: -(ipa.a * ipa.b * u_weight),
            ..Equation::default()
        };
        argument.push(Scalar::ONE, p);
        for (x_sq, l) in scalars.challenges_sq.iter().zip(l_vec) {
            argument.push(*x_sq, l);
        }
        for (x_inv_sq, r) in scalars.challenges_inv_sq.iter().zip(r_vec) {
            argument.push(*x_inv_sq, r);
        }

        Ok(RangeEquations {
            equations: [(1, statement1), (2, reconstruction), (2, argument)],
        })
    }
}
