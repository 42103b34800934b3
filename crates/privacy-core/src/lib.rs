//! # Privacy Core
//!
//! Foundations shared by the confidential payment proofs:
//!
//! - Pedersen commitment basis with one generator per coin attribute
//! - Generator vectors for the aggregated range proof
//! - Vector algebra over scalars
//! - Fiat-Shamir challenge generation
//! - Fixed-stride byte codec and the [`Proof`] trait
//! - Parameters and the common error type
//!
//! ## Commitments
//!
//! A Pedersen commitment to `v` with blinding `r` at attribute index `i` is
//! ```text
//! Com_i(v, r) = v * G_i + r * H
//! ```
//! It is hiding and additively homomorphic, which the payment proof relies on
//! to check balance without revealing amounts.

pub mod basis;
pub mod codec;
pub mod config;
pub mod errors;
pub mod generators;
pub mod group;
pub mod proof;
pub mod transcript;
pub mod utils;


pub use basis::*;
pub use codec::ByteReader;
pub use config::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use proof::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, IsIdentity, MultiscalarMul, VartimeMultiscalarMul},
};

/// Re-export merlin transcript
pub use merlin::Transcript;
