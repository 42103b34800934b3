//! Proof system parameters

use crate::{PrivacyError, PrivacyResult};
use serde::{Deserialize, Serialize};

/// Bits per range-proven value
pub const MAX_EXP: usize = 64;

/// Largest supported ring size exponent
pub const MAX_RING_EXP: usize = 16;

/// Number of shards coin public keys are partitioned into
pub const MAX_SHARD_NUMBER: u8 = 8;

/// Tunable parameters of the proof system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofParams {
    /// Bits per range-proven value
    pub max_exp: usize,
    /// Maximum number of outputs covered by one aggregated range proof
    pub max_outputs: usize,
    /// Maximum number of inputs spent by one payment
    pub max_inputs: usize,
    /// Ring size is `2^ring_size_exp`
    pub ring_size_exp: usize,
    /// Threads for parallel verification; 0 uses every core
    pub worker_threads: usize,
}

impl Default for ProofParams {
    fn default() -> Self {
        Self {
            max_exp: MAX_EXP,
            max_outputs: 32,
            max_inputs: 32,
            ring_size_exp: 3,
            worker_threads: 0,
        }
    }
}

impl ProofParams {
    /// Parse parameters from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> PrivacyResult<Self> {
        let params: Self = serde_json::from_str(json).map_err(|e| PrivacyError::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> PrivacyResult<()> {
        if self.max_exp != MAX_EXP {
            return Err(PrivacyError::Config(format!(
                "max_exp must be {MAX_EXP}, got {}",
                self.max_exp
            )));
        }
        for (name, count) in [("max_outputs", self.max_outputs), ("max_inputs", self.max_inputs)] {
            // Counts are encoded in a single byte
            if count == 0 || count > u8::MAX as usize {
                return Err(PrivacyError::Config(format!("{name} must be in 1..=255, got {count}")));
            }
        }
        if self.ring_size_exp == 0 || self.ring_size_exp > MAX_RING_EXP {
            return Err(PrivacyError::Config(format!(
                "ring_size_exp must be in 1..={MAX_RING_EXP}, got {}",
                self.ring_size_exp
            )));
        }
        Ok(())
    }

    /// Number of commitments in a ring
    pub fn ring_size(&self) -> usize {
        1 << self.ring_size_exp
    }

    /// Generators needed for the largest aggregated range proof
    pub fn generator_capacity(&self) -> usize {
        self.max_exp * self.max_outputs.next_power_of_two()
    }
}
