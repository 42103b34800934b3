//! # Aggregated Range Proofs
//!
//! Proves that each of up to `max_outputs` committed values lies in
//! `[0, 2^64)` with a single proof whose size grows logarithmically in the
//! number of values.
//!
//! ## Mathematical Background
//!
//! For `m` values padded to `m'` (a power of two) and `n = 64 * m'`:
//!
//! 1. **Bit Decomposition**: `aL` holds the bits of every value, `aR = aL - 1`
//! 2. **Vector Commitments**: `A = <aL, g> + <aR, h> + alpha * H`, `S` likewise for blinding vectors
//! 3. **Polynomial**: `t(X) = <l(X), r(X)>` with
//!    - `l(X) = aL - z + sL * X`
//!    - `r(X) = y^n ∘ (aR + z + sR * X) + z^(2+j) * 2^i`
//! 4. **Compression**: `(l, r)` is replaced by an inner product argument over
//!    `h'_i = h_i * y^-i` and `u' = u * Hash(x)`, binding the argument to this proof's `x`
//!
//! Verification checks two statements:
//!
//! - Statement 1: `Com(tHat, tauX) == Σ z^(j+2) * V_j + δ(y, z) * G + x * T1 + x^2 * T2`
//! - Statement 2: the inner product argument point matches `A`, `S` and the
//!   challenges, and the argument itself holds
//!
//! ## Usage
//!
//! ```rust,no_run
//! use range::AggregatedRangeWitness;
//! use curve25519_dalek::scalar::Scalar;
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let rands = vec![Scalar::random(&mut rng), Scalar::random(&mut rng)];
//! let witness = AggregatedRangeWitness::new(vec![100, 250], rands).unwrap();
//!
//! let proof = witness.prove(&mut rng).unwrap();
//! assert!(proof.verify().is_ok());
//! ```

pub mod batch;
pub mod proof;
pub mod prover;
pub mod verifier;


pub use batch::*;
pub use proof::*;
pub use prover::*;
pub use verifier::*;
