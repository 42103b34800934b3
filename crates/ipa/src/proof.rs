//! Inner Product Argument proof structure

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use privacy_core::{
    codec::{write_points, write_scalars},
    point_valid, ByteReader, PrivacyError, PrivacyResult, Proof, ELEMENT_SIZE,
};

/// An inner product argument proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductProof {
    /// L values from each folding round (log_2(n) elements)
    pub l_vec: Vec<CompressedRistretto>,
    /// R values from each folding round (log_2(n) elements)
    pub r_vec: Vec<CompressedRistretto>,
    /// Final folded scalar a
    pub a: Scalar,
    /// Final folded scalar b
    pub b: Scalar,
    /// The point the argument was produced for
    pub p: CompressedRistretto,
}

impl InnerProductProof {
    /// Get the number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vec.len()
    }

    /// Encoded size of a proof over vectors of length `2^rounds`
    pub fn serialized_size(rounds: usize) -> usize {
        1 + 2 * rounds * ELEMENT_SIZE + 3 * ELEMENT_SIZE
    }

    /// Validate proof structure
    pub fn validate_structure(&self) -> PrivacyResult<()> {
        if self.l_vec.len() != self.r_vec.len() {
            return Err(PrivacyError::VectorLengthMismatch {
                expected: self.l_vec.len(),
                actual: self.r_vec.len(),
            });
        }
        Ok(())
    }
}

impl Proof for InnerProductProof {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::serialized_size(self.num_rounds()));
        // Round counts are bounded by log2 of the generator capacity
        out.push(self.l_vec.len() as u8);
        write_points(&mut out, &self.l_vec);
        write_points(&mut out, &self.r_vec);
        write_scalars(&mut out, &[self.a, self.b]);
        write_points(&mut out, &[self.p]);
        out
    }

    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self> {
        let rounds = reader.read_u8()? as usize;
        let l_vec = reader.read_points(rounds)?;
        let r_vec = reader.read_points(rounds)?;
        let a = reader.read_scalar()?;
        let b = reader.read_scalar()?;
        let p = reader.read_point()?;

        Ok(Self { l_vec, r_vec, a, b, p })
    }

    fn validate_sanity(&self) -> bool {
        self.validate_structure().is_ok()
            && self.l_vec.iter().chain(self.r_vec.iter()).all(point_valid)
            && point_valid(&self.p)
    }
}
