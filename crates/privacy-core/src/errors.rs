//! Error types shared by every proof in the workspace

use std::fmt;
use thiserror::Error;

/// Identifies which protocol produced a verification or sanity error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    InnerProduct,
    AggregatedRange,
    OneOutOfMany,
    SerialNumberPrivacy,
    SerialNumberNoPrivacy,
    Payment,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::InnerProduct => "inner product",
            Protocol::AggregatedRange => "aggregated range",
            Protocol::OneOutOfMany => "one-out-of-many",
            Protocol::SerialNumberPrivacy => "serial number privacy",
            Protocol::SerialNumberNoPrivacy => "serial number no-privacy",
            Protocol::Payment => "payment",
        };
        f.write_str(name)
    }
}

/// Main error type for proving and verifying
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivacyError {
    /// Vector length mismatch
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Insufficient generators
    #[error("Insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// Byte buffer ended before a fixed-width slot could be read
    #[error("Truncated input: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Unexpected {0} trailing bytes after proof")]
    TrailingBytes(usize),

    #[error("Scalar encoding is not canonical")]
    NonCanonicalScalar,

    /// Point encoding does not decompress to a group element
    #[error("Point encoding is not a valid group element")]
    InvalidPoint,

    /// A decoded proof carries an element outside the group or field
    #[error("Sanity check failed for {0} proof")]
    SanityCheckFailed(Protocol),

    /// A specific algebraic statement did not hold
    #[error("Verify {protocol} proof statement {statement} failed")]
    VerificationFailed { protocol: Protocol, statement: u8 },

    /// Batch verification failed; `index` is the first failing proof when it could be isolated
    #[error("Batch verification failed at proof {index:?}")]
    BatchVerificationFailed { index: Option<usize> },

    #[error("Unbalanced payment: inputs {inputs} != outputs {outputs} + fee {fee}")]
    Unbalanced { inputs: u64, outputs: u64, fee: u64 },

    #[error("Value sum overflows u64")]
    ValueOverflow,

    #[error("Output {0} has zero value")]
    ZeroOutputValue(usize),

    /// The commitment source has no commitment at this index
    #[error("Commitment not found at index {0}")]
    CommitmentNotFound(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PrivacyError {
    /// Statement number for verification failures
    pub fn statement(&self) -> Option<u8> {
        match self {
            PrivacyError::VerificationFailed { statement, .. } => Some(*statement),
            _ => None,
        }
    }
}

/// Result type for proof operations
pub type PrivacyResult<T> = Result<T, PrivacyError>;
