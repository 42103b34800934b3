//! # Inner Product Argument (IPA)
//!
//! Proves knowledge of vectors `a` and `b` such that
//!
//! ```text
//! P = <a, G> + <b, H> + <a, b> * u
//! ```
//!
//! with a proof of `2 * log2(n)` points and two scalars.
//!
//! ## Folding
//!
//! Each round halves the vectors:
//!
//! - Cross terms `cL = <a_lo, b_hi>`, `cR = <a_hi, b_lo>`
//! - `L = <a_lo, G_hi> + <b_hi, H_lo> + cL * u`
//! - `R = <a_hi, G_lo> + <b_lo, H_hi> + cR * u`
//! - Challenge `v = H(cache, L, R)`, after which the cache becomes `v`
//! - `a' = a_lo * v + a_hi * v^-1`, `b' = b_lo * v^-1 + b_hi * v`
//! - `G' = G_lo * v^-1 + G_hi * v`, `H' = H_lo * v + H_hi * v^-1`
//!
//! The verifier never folds generators. It recomputes every challenge and
//! checks a single multi-scalar equation
//!
//! ```text
//! P + Σ v_i^2 * L_i + Σ v_i^-2 * R_i == a*b * u + <a*s, G> + <b*s^-1, H>
//! ```
//!
//! where `s_j` multiplies `v_i` or `v_i^-1` depending on bit `j` of the round index.

pub mod proof;
pub mod prover;
pub mod verifier;


pub use proof::*;
pub use prover::*;
pub use verifier::*;
