//! Capabilities shared by every proof type

use crate::{ByteReader, PrivacyResult};

/// Serialization and sanity checking common to all proofs
///
/// Decoding only checks lengths and scalar canonicity. Point validity is
/// deferred to [`Proof::validate_sanity`], which callers must run before
/// verifying a proof received from outside.
pub trait Proof: Sized {
    /// Encode the proof
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode the proof from the reader's current position
    fn read_from(reader: &mut ByteReader<'_>) -> PrivacyResult<Self>;

    /// Whether every point and scalar of the proof is a valid group or field element
    fn validate_sanity(&self) -> bool;

    /// Decode a proof occupying the whole buffer
    fn from_bytes(bytes: &[u8]) -> PrivacyResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let proof = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(proof)
    }
}
