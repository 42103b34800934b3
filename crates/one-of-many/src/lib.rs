//! # One-out-of-Many Proofs
//!
//! Proves that one of `N = 2^n` public commitments opens to zero, without
//! revealing which one. The spender's index `l` is written in binary and each
//! bit `l_j` is committed together with a random mask `a_j`:
//!
//! ```text
//! cl_j = Com(l_j, r_j)    ca_j = Com(a_j, s_j)    cb_j = Com(l_j * a_j, t_j)
//! ```
//!
//! For every ring member `i` the product `p_i(X) = Π_j f_{j, i_j}(X)` with
//! `f_{j,1}(X) = l_j X + a_j` and `f_{j,0}(X) = X - f_{j,1}(X)` has degree `n`
//! exactly when `i == l`. The lower coefficients are hidden behind `cd_k`,
//! so after the challenge `x` only the real commitment survives in
//! `Σ_i p_i(x) * C_i - Σ_k x^k * cd_k`.
//!
//! The statement (the ring) is not part of the encoding; verifiers attach it
//! from their own view of the ledger.

pub mod polynomial;
pub mod proof;
pub mod prover;
pub mod verifier;


pub use polynomial::*;
pub use proof::*;
pub use prover::*;
