//! Serial number proof with hidden private key and derivator

use crate::challenge;
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{IsIdentity, VartimeMultiscalarMul},
};
use privacy_core::{
    codec::{write_points, write_scalars},
    decompress, derive, point_valid, ByteReader, PedersenBasis, PedersenIndex, PrivacyError, PrivacyResult,
    Proof, Protocol, ELEMENT_SIZE,
};
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, warn};

/// Encoded size: six points and four scalars
pub const SN_PRIVACY_PROOF_SIZE: usize = 10 * ELEMENT_SIZE;

/// `sn = derive(G_sk, sk, input)` with `comSK = Com_sk(sk, rSK)` and `comInput = Com_snd(input, rInput)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumberPrivacyStatement {
    pub sn: RistrettoPoint,
    pub com_sk: RistrettoPoint,
    pub com_input: RistrettoPoint,
}

#[derive(Debug, Clone)]
pub struct SerialNumberPrivacyWitness {
    statement: SerialNumberPrivacyStatement,
    sk: Scalar,
    r_sk: Scalar,
    input: Scalar,
    r_input: Scalar,
}

impl SerialNumberPrivacyWitness {
    pub fn new(
        statement: SerialNumberPrivacyStatement,
        sk: Scalar,
        r_sk: Scalar,
        input: Scalar,
        r_input: Scalar,
    ) -> Self {
        Self {
            statement,
            sk,
            r_sk,
            input,
            r_input,
        }
    }

    /// Build the statement from the secrets and wrap both
    pub fn from_secrets(basis: &PedersenBasis, sk: Scalar, r_sk: Scalar, input: Scalar, r_input: Scalar) -> Self {
        let statement = SerialNumberPrivacyStatement {
            sn: derive(basis.generator(PedersenIndex::PrivateKey), &sk, &input),
            com_sk: basis.commit_at(&sk, &r_sk, PedersenIndex::PrivateKey),
            com_input: basis.commit_at(&input, &r_input, PedersenIndex::SerialNumberDerivator),
        };
        Self::new(statement, sk, r_sk, input, r_input)
    }

    pub fn statement(&self) -> &SerialNumberPrivacyStatement {
        &self.statement
    }

    /// Prove against the process-wide basis, optionally binding the challenge to `mess`
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        mess: Option<&[u8; 32]>,
        rng: &mut R,
    ) -> PrivacyResult<SerialNumberPrivacyProof> {
        self.prove_with(PedersenBasis::global(), mess, rng)
    }

    pub fn prove_with<R: RngCore + CryptoRng>(
        &self,
        basis: &PedersenBasis,
        mess: Option<&[u8; 32]>,
        rng: &mut R,
    ) -> PrivacyResult<SerialNumberPrivacyProof> {
        debug!(bound = mess.is_some(), "proving serial number privacy");
        let e_sk = Scalar::random(rng);
        let e_input = Scalar::random(rng);
        let d_sk = Scalar::random(rng);
        let d_input = Scalar::random(rng);

        let t_sk = basis.commit_at(&e_sk, &d_sk, PedersenIndex::PrivateKey).compress();
        let t_input = basis
            .commit_at(&e_input, &d_input, PedersenIndex::SerialNumberDerivator)
            .compress();
        let t_sn = (self.statement.sn * (e_sk + e_input)).compress();

        let x = challenge(
            basis,
            mess,
            &[t_sk.as_bytes().as_slice(), t_input.as_bytes().as_slice(), t_sn.as_bytes().as_slice()],
        );

        Ok(SerialNumberPrivacyProof {
            sn: self.statement.sn.compress(),
            com_sk: self.statement.com_sk.compress(),
            com_input: self.statement.com_input.compress(),
            t_sk,
            t_input,
            t_sn,
            z_sk: self.sk * x + e_sk,
            z_rsk: self.r_sk * x + d_sk,
            z_input: self.input * x + e_input,
            z_rinput: self.r_input * x + d_input,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumberPrivacyProof {
    pub sn: CompressedRistretto,
    pub com_sk: CompressedRistretto,
    pub com_input: CompressedRistretto,
    pub t_sk: CompressedRistretto,
    pub t_input: CompressedRistretto,
    pub t_sn: CompressedRistretto,
    pub z_sk: Scalar,
    pub z_rsk: Scalar,
    pub z_input: Scalar,
    pub z_rinput: Scalar,
}

impl SerialNumberPrivacyProof {
    fn points(&self) -> [CompressedRistretto; 6] {
        [self.sn, self.com_sk, self.com_input, self.t_sk, self.t_input, self.t_sn]
    }

    /// Verify against the process-wide basis with the same `mess` the prover used
    pub fn verify(&self, mess: Option<&[u8; 32]>) -> PrivacyResult<()> {
        self.verify_with(PedersenBasis::global(), mess)
    }

    pub fn verify_with(&self, basis: &PedersenBasis, mess: Option<&[u8; 32]>) -> PrivacyResult<()> {
        debug!(bound = mess.is_some(), "verifying serial number privacy");
        let fail = |statement: u8| {
            warn!(statement, "verify serial number privacy proof failed");
            PrivacyError::VerificationFailed {
                protocol: Protocol::SerialNumberPrivacy,
                statement,
            }
        };

        let sn = decompress(&self.sn)?;
        let com_sk = decompress(&self.com_sk)?;
        let com_input = decompress(&self.com_input)?;
        let t_sk = decompress(&self.t_sk)?;
        let t_input = decompress(&self.t_input)?;
        let t_sn = decompress(&self.t_sn)?;

        let x = challenge(
            basis,
            mess,
            &[
                self.t_sk.as_bytes().as_slice(),
                self.t_input.as_bytes().as_slice(),
                self.t_sn.as_bytes().as_slice(),
            ],
        );
        let g_sk = basis.generator(PedersenIndex::PrivateKey);
        let g_snd = basis.generator(PedersenIndex::SerialNumberDerivator);
        let h = basis.h();

        // Com_snd(zInput, zRInput) == x * comInput + tInput
        let statement_1 = RistrettoPoint::vartime_multiscalar_mul(
            [self.z_input, self.z_rinput, -x, -Scalar::ONE],
            [g_snd, h, &com_input, &t_input],
        );
        if !statement_1.is_identity() {
            return Err(fail(1));
        }

        // Com_sk(zSK, zRSK) == x * comSK + tSK
        let statement_2 = RistrettoPoint::vartime_multiscalar_mul(
            [self.z_sk, self.z_rsk, -x, -Scalar::ONE],
            [g_sk, h, &com_sk, &t_sk],
        );
        if !statement_2.is_identity() {
            return Err(fail(2));
        }

        // (zSK + zInput) * sn == x * G_sk + tSN
        let statement_3 = RistrettoPoint::vartime_multiscalar_mul(
            [self.z_sk + self.z_input, -x, -Scalar::ONE],
            [&sn, g_sk, &t_sn],
        );
        if sn.is_identity() || !statement_3.is_identity() {
            return Err(fail(3));
        }

        Ok(())
    }
}

impl Proof for SerialNumberPrivacyProof {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SN_PRIVACY_PROOF_SIZE);
        write_points(&mut out, &self.points());
        write_scalars(&mut out, &[self.z_sk, self.z_rsk, self.z_input, self.z_rinput]);
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        Ok(Self {
            sn: reader.read_point()?,
            com_sk: reader.read_point()?,
            com_input: reader.read_point()?,
            t_sk: reader.read_point()?,
            t_input: reader.read_point()?,
            t_sn: reader.read_point()?,
            z_sk: reader.read_scalar()?,
            z_rsk: reader.read_scalar()?,
            z_input: reader.read_scalar()?,
            z_rinput: reader.read_scalar()?,
        })
    }

    fn validate_sanity(&self) -> bool {
        self.points().iter().all(point_valid)
    }
}
