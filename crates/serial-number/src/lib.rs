//! # Serial Number Proofs
//!
//! A coin's serial number is `sn = (sk + snd)^-1 * G_sk`, derived from the
//! owner's private key `sk` and the coin's serial number derivator `snd`.
//! Publishing it lets the network detect double spends without learning
//! which coin was spent.
//!
//! Two sigma protocols prove that a serial number was derived correctly:
//!
//! - [`SerialNumberPrivacyProof`]: `sk` and `snd` stay hidden behind Pedersen
//!   commitments `comSK` and `comInput`. Three announcements, four responses.
//! - [`SerialNumberNoPrivacyProof`]: the public key `sk * G_sk` and `snd` are
//!   public. Two announcements, one response.
//!
//! The challenge is derived from the announcements unless the caller binds
//! the proof to an external 32-byte message `mess`, in which case the
//! message reduced mod ℓ is the challenge. Prover and verifier must agree on
//! the message.

use curve25519_dalek::scalar::Scalar;
use privacy_core::{generate_challenge, PedersenBasis};

pub mod no_privacy;
pub mod privacy;


pub use no_privacy::*;
pub use privacy::*;

/// The Fiat–Shamir challenge, or the external message when one is supplied
pub(crate) fn challenge(basis: &PedersenBasis, mess: Option<&[u8; 32]>, values: &[&[u8]]) -> Scalar {
    match mess {
        Some(mess) => Scalar::from_bytes_mod_order(*mess),
        None => generate_challenge(basis, values),
    }
}
