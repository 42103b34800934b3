//! Point and scalar helpers over the Ristretto group

use crate::{PrivacyError, PrivacyResult};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use sha2::Sha512;

/// Size in bytes of an encoded point or scalar
pub const ELEMENT_SIZE: usize = 32;

/// Decompress a point, mapping invalid encodings to [`PrivacyError::InvalidPoint`]
pub fn decompress(compressed: &CompressedRistretto) -> PrivacyResult<RistrettoPoint> {
    compressed.decompress().ok_or(PrivacyError::InvalidPoint)
}

/// Decompress every point of a slice
pub fn decompress_all(compressed: &[CompressedRistretto]) -> PrivacyResult<Vec<RistrettoPoint>> {
    compressed.iter().map(decompress).collect()
}

/// Whether the encoding names a valid group element
pub fn point_valid(compressed: &CompressedRistretto) -> bool {
    compressed.decompress().is_some()
}

/// Decode a canonical scalar encoding
pub fn decode_scalar(bytes: [u8; 32]) -> PrivacyResult<Scalar> {
    Option::from(Scalar::from_canonical_bytes(bytes)).ok_or(PrivacyError::NonCanonicalScalar)
}

/// Hash arbitrary bytes to a group element
pub fn hash_to_point(data: &[u8]) -> RistrettoPoint {
    RistrettoPoint::hash_from_bytes::<Sha512>(data)
}

/// Hash arbitrary bytes to a scalar by wide reduction of SHA-512
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::hash_from_bytes::<Sha512>(data)
}

/// Serial number derivation: `(sk + input)^-1 * base`
///
/// `sk + input == 0` maps to the identity, which verification then rejects.
pub fn derive(base: &RistrettoPoint, sk: &Scalar, input: &Scalar) -> RistrettoPoint {
    (sk + input).invert() * base
}

/// Shard a public key belongs to, taken from the last byte of its encoding
pub fn shard_id(public_key: &RistrettoPoint, shard_count: u8) -> u8 {
    let bytes = public_key.compress().to_bytes();
    bytes[ELEMENT_SIZE - 1] % shard_count.max(1)
}
