//! # Payment Proofs
//!
//! Composes the ring membership, serial number and range proofs into the
//! proof attached to a confidential transaction.
//!
//! For every spent coin the sender commits to its private key, value,
//! serial number derivator and shard id. Subtracting the sum of those
//! commitments from every member of the coin's ring leaves a commitment to
//! zero exactly at the real coin, which a one-out-of-many proof shows
//! without revealing the position. A serial number proof ties the published
//! serial number to the same key and derivator commitments.
//!
//! All output values are range-proven together by one aggregated range
//! proof. Output value blindings telescope against the input blindings so
//! that
//!
//! ```text
//! Σ comInputValue - Σ comOutputValue == fee * G_value
//! ```
//!
//! holds and the verifier checks balance without learning any amount.

pub mod coin;
pub mod parallel;
pub mod proof;
pub mod size;
pub mod source;
pub mod verifier;
pub mod witness;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub mod property_tests;

pub use coin::*;
pub use parallel::*;
pub use proof::*;
pub use size::*;
pub use source::*;
pub use verifier::*;
pub use witness::*;
