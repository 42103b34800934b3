//! Transcript management for the Fiat-Shamir heuristic
//!
//! Two challenge conventions are in use:
//!
//! - [`generate_challenge`] binds the whole Pedersen basis followed by the
//!   supplied values. The sigma protocols (one-out-of-many, serial number) use it.
//! - [`challenge_from_cache`] chains a 32-byte cache (the previous challenge,
//!   or the generator seed `cs`) with a list of points. The range proof and
//!   the inner-product argument use it.
//!
//! Both start from a fresh transcript, so a challenge is a pure function of
//! its inputs.

use crate::PedersenBasis;
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use merlin::Transcript;

/// Extension trait for Transcript
pub trait TranscriptProtocol {
    /// Append a compressed point to the transcript
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto);

    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Challenge scalar from transcript
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.append_message(label, point.as_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }
}

/// Create a new transcript with domain separation
pub fn privacy_transcript(domain_label: &'static [u8]) -> Transcript {
    let mut transcript = Transcript::new(b"ConfidentialPayments");
    transcript.append_message(b"domain", domain_label);
    transcript
}

/// Basis-bound challenge over an ordered list of encoded values
pub fn generate_challenge(basis: &PedersenBasis, values: &[&[u8]]) -> Scalar {
    let mut transcript = privacy_transcript(b"generate_challenge");
    transcript.append_message(b"basis", basis.to_bytes());
    transcript.append_u64(b"n", values.len() as u64);
    for value in values {
        transcript.append_message(b"value", value);
    }
    transcript.challenge_scalar(b"challenge")
}

/// Basis-bound challenge over points
pub fn challenge_from_points(basis: &PedersenBasis, points: &[RistrettoPoint]) -> Scalar {
    let encoded: Vec<[u8; 32]> = points.iter().map(|p| p.compress().to_bytes()).collect();
    let values: Vec<&[u8]> = encoded.iter().map(|e| e.as_slice()).collect();
    generate_challenge(basis, &values)
}

/// Cache-chained challenge used by the range proof and the inner-product argument
pub fn challenge_from_cache(cache: &[u8; 32], points: &[CompressedRistretto]) -> Scalar {
    let mut transcript = privacy_transcript(b"bulletproofs_challenge");
    transcript.append_message(b"cache", cache);
    transcript.append_u64(b"n", points.len() as u64);
    for point in points {
        transcript.append_point(b"point", point);
    }
    transcript.challenge_scalar(b"challenge")
}
