//! Serial number proof with a public key and public derivator

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

/// Encoded size: four points and two scalars
pub const SN_NO_PRIVACY_PROOF_SIZE: usize = 6 * ELEMENT_SIZE;

/// `sn = derive(G_sk, sk, input)` for the key behind `v_key = sk * G_sk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumberNoPrivacyStatement {
    pub sn: RistrettoPoint,
    pub v_key: RistrettoPoint,
    pub input: Scalar,
}

#[derive(Debug, Clone)]
pub struct SerialNumberNoPrivacyWitness {
    statement: SerialNumberNoPrivacyStatement,
    sk: Scalar,
}

impl SerialNumberNoPrivacyWitness {
    pub fn new(statement: SerialNumberNoPrivacyStatement, sk: Scalar) -> Self {
        Self { statement, sk }
    }

    pub fn from_secrets(basis: &PedersenBasis, sk: Scalar, input: Scalar) -> Self {
        let g_sk = basis.generator(PedersenIndex::PrivateKey);
        let statement = SerialNumberNoPrivacyStatement {
            sn: derive(g_sk, &sk, &input),
            v_key: sk * g_sk,
            input,
        };
        Self::new(statement, sk)
    }

    pub fn statement(&self) -> &SerialNumberNoPrivacyStatement {
        &self.statement
    }

    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        mess: Option<&[u8; 32]>,
        rng: &mut R,
    ) -> PrivacyResult<SerialNumberNoPrivacyProof> {
        self.prove_with(PedersenBasis::global(), mess, rng)
    }

    pub fn prove_with<R: RngCore + CryptoRng>(
        &self,
        basis: &PedersenBasis,
        mess: Option<&[u8; 32]>,
        rng: &mut R,
    ) -> PrivacyResult<SerialNumberNoPrivacyProof> {
        debug!(bound = mess.is_some(), "proving serial number no privacy");
        let e_sk = Scalar::random(rng);

        let sn = self.statement.sn.compress();
        let v_key = self.statement.v_key.compress();
        let t_sk = (e_sk * basis.generator(PedersenIndex::PrivateKey)).compress();
        let t_sn = (self.statement.sn * e_sk).compress();

        let x = challenge(
            basis,
            mess,
            &[
                sn.as_bytes().as_slice(),
                v_key.as_bytes().as_slice(),
                t_sk.as_bytes().as_slice(),
                t_sn.as_bytes().as_slice(),
            ],
        );

        Ok(SerialNumberNoPrivacyProof {
            sn,
            v_key,
            input: self.statement.input,
            t_sk,
            t_sn,
            z_sk: self.sk * x + e_sk,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumberNoPrivacyProof {
    pub sn: CompressedRistretto,
    pub v_key: CompressedRistretto,
    pub input: Scalar,
    pub t_sk: CompressedRistretto,
    pub t_sn: CompressedRistretto,
    pub z_sk: Scalar,
}

impl SerialNumberNoPrivacyProof {
    pub fn verify(&self, mess: Option<&[u8; 32]>) -> PrivacyResult<()> {
        self.verify_with(PedersenBasis::global(), mess)
    }

    pub fn verify_with(&self, basis: &PedersenBasis, mess: Option<&[u8; 32]>) -> PrivacyResult<()> {
        debug!(bound = mess.is_some(), "verifying serial number no privacy");
        let fail = |statement: u8| {
            warn!(statement, "verify serial number no privacy proof failed");
            PrivacyError::VerificationFailed {
                protocol: Protocol::SerialNumberNoPrivacy,
                statement,
            }
        };

        let sn = decompress(&self.sn)?;
        let v_key = decompress(&self.v_key)?;
        let t_sk = decompress(&self.t_sk)?;
        let t_sn = decompress(&self.t_sn)?;

        let x = challenge(
            basis,
            mess,
            &[
                self.sn.as_bytes().as_slice(),
                self.v_key.as_bytes().as_slice(),
                self.t_sk.as_bytes().as_slice(),
                self.t_sn.as_bytes().as_slice(),
            ],
        );
        let g_sk = basis.generator(PedersenIndex::PrivateKey);

        // zSK * G_sk == x * vKey + tSK
        let statement_1 =
            RistrettoPoint::vartime_multiscalar_mul([self.z_sk, -x, -Scalar::ONE], [g_sk, &v_key, &t_sk]);
        if !statement_1.is_identity() {
            return Err(fail(1));
        }

        // (zSK + x * input) * sn == x * G_sk + tSN
        let statement_2 = RistrettoPoint::vartime_multiscalar_mul(
            [self.z_sk + x * self.input, -x, -Scalar::ONE],
            [&sn, g_sk, &t_sn],
        );
        if sn.is_identity() || !statement_2.is_identity() {
            return Err(fail(2));
        }

        Ok(())
    }
}

impl Proof for SerialNumberNoPrivacyProof {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SN_NO_PRIVACY_PROOF_SIZE);
        write_points(&mut out, &[self.sn, self.v_key]);
        write_scalars(&mut out, &[self.input]);
        write_points(&mut out, &[self.t_sk, self.t_sn]);
        write_scalars(&mut out, &[self.z_sk]);
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        Ok(Self {
            sn: reader.read_point()?,
            v_key: reader.read_point()?,
            input: reader.read_scalar()?,
            t_sk: reader.read_point()?,
            t_sn: reader.read_point()?,
            z_sk: reader.read_scalar()?,
        })
    }

    fn validate_sanity(&self) -> bool {
        [self.sn, self.v_key, self.t_sk, self.t_sn].iter().all(point_valid)
    }
}
