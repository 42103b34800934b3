//! Payment proof size estimation

use privacy_core::{ProofParams, ELEMENT_SIZE};

pub use one_of_many::{proof_size as one_of_many_proof_size, ONE_OF_MANY_PROOF_SIZE};
pub use range::estimate_multi_range_proof_size;
pub use serial_number::{SN_NO_PRIVACY_PROOF_SIZE, SN_PRIVACY_PROOF_SIZE};

/// Bytes of an encoded ledger index or clear value
const VALUE_SIZE: usize = 8;

/// Exact encoded size of a payment proof with the given shape
///
/// Wallets use this to bound the transaction size, and with it the fee,
/// before proving.
pub fn estimate_proof_size(n_input: usize, n_output: usize, has_privacy: bool, params: &ProofParams) -> usize {
    // Privacy flag, three proof counts, range presence byte, two optional points
    let mut size = 1 + 3 + 1 + 2;
    // Seven point list counts, two clear value counts, two opening counts
    size += 7 + 2 + 2;
    // Output coin commitments and receiver keys exist in both modes
    size += 2 * n_output * ELEMENT_SIZE;

    if has_privacy {
        size += n_input * (one_of_many_proof_size(params.ring_size_exp) + SN_PRIVACY_PROOF_SIZE);
        if n_output > 0 {
            size += estimate_multi_range_proof_size(n_output);
        }
        size += 2 * ELEMENT_SIZE;
        size += (2 * n_input + 3 * n_output) * ELEMENT_SIZE;
        size += n_input * params.ring_size() * VALUE_SIZE;
    } else {
        size += n_input * SN_NO_PRIVACY_PROOF_SIZE;
        size += (n_input + n_output) * VALUE_SIZE;
        // Derivator and randomness of every output in clear
        size += 2 * n_output * ELEMENT_SIZE;
    }
    size
}
