//! One-out-of-many proof structure and encoding

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use privacy_core::{
    codec::{write_points, write_scalars},
    point_valid, ByteReader, PrivacyError, PrivacyResult, Proof, ELEMENT_SIZE, MAX_RING_EXP,
};

/// Encoded size of a proof over a ring of `2^n` commitments
pub const fn proof_size(n: usize) -> usize {
    1 + (7 * n + 1) * ELEMENT_SIZE
}

/// Encoded size for the default ring of 8 commitments
pub const ONE_OF_MANY_PROOF_SIZE: usize = proof_size(3);

/// The ring: `N = 2^n` public commitments, one of which opens to zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOutOfManyStatement {
    pub commitments: Vec<RistrettoPoint>,
}

impl OneOutOfManyStatement {
    pub fn new(commitments: Vec<RistrettoPoint>) -> Self {
        Self { commitments }
    }

    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }
}

/// Ring exponent `n` for a ring of `len` commitments
pub(crate) fn ring_exponent(len: usize) -> PrivacyResult<usize> {
    if len < 2 || !len.is_power_of_two() || len.trailing_zeros() as usize > MAX_RING_EXP {
        return Err(PrivacyError::InvalidParameters(format!(
            "ring size {len} must be a power of two between 2 and 2^{MAX_RING_EXP}"
        )));
    }
    Ok(len.trailing_zeros() as usize)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOutOfManyProof {
    /// Attached by the verifier; never encoded
    pub statement: Option<OneOutOfManyStatement>,
    pub cl: Vec<CompressedRistretto>,
    pub ca: Vec<CompressedRistretto>,
    pub cb: Vec<CompressedRistretto>,
    pub cd: Vec<CompressedRistretto>,
    pub f: Vec<Scalar>,
    pub za: Vec<Scalar>,
    pub zb: Vec<Scalar>,
    pub zd: Scalar,
}

impl OneOutOfManyProof {
    /// Ring exponent `n` this proof was built for
    pub fn ring_exp(&self) -> usize {
        self.cl.len()
    }

    pub fn set_statement(&mut self, statement: OneOutOfManyStatement) {
        self.statement = Some(statement);
    }

    pub fn with_statement(mut self, statement: OneOutOfManyStatement) -> Self {
        self.set_statement(statement);
        self
    }
}

impl Proof for OneOutOfManyProof {
    fn to_bytes(&self) -> Vec<u8> {
        let n = self.ring_exp();
        let mut out = Vec::with_capacity(proof_size(n));
        // n is at most MAX_RING_EXP
        out.push(n as u8);
        for points in [&self.cl, &self.ca, &self.cb, &self.cd] {
            write_points(&mut out, points);
        }
        for scalars in [&self.f, &self.za, &self.zb] {
            write_scalars(&mut out, scalars);
        }
        write_scalars(&mut out, &[self.zd]);
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        let n = reader.read_u8()? as usize;
        if n == 0 || n > MAX_RING_EXP {
            return Err(PrivacyError::InvalidParameters(format!(
                "ring exponent {n} outside 1..={MAX_RING_EXP}"
            )));
        }

        Ok(Self {
            statement: None,
            cl: reader.read_points(n)?,
            ca: reader.read_points(n)?,
            cb: reader.read_points(n)?,
            cd: reader.read_points(n)?,
            f: reader.read_scalars(n)?,
            za: reader.read_scalars(n)?,
            zb: reader.read_scalars(n)?,
            zd: reader.read_scalar()?,
        })
    }

    fn validate_sanity(&self) -> bool {
        let n = self.ring_exp();
        if n == 0 || n > MAX_RING_EXP {
            return false;
        }
        let lengths_match = [self.ca.len(), self.cb.len(), self.cd.len(), self.f.len(), self.za.len(), self.zb.len()]
            .iter()
            .all(|len| *len == n);

        lengths_match
            && self
                .cl
                .iter()
                .chain(&self.ca)
                .chain(&self.cb)
                .chain(&self.cd)
                .all(point_valid)
    }
}
