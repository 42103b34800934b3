//! Coins spent and created by a payment

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar, traits::MultiscalarMul};
use privacy_core::{hash_to_scalar, shard_id, PedersenBasis, PedersenIndex, MAX_SHARD_NUMBER};
use serde::{Deserialize, Serialize};

/// Blinding of the shard commitment shared by all inputs of a payment
pub fn fixed_shard_blinding() -> Scalar {
    hash_to_scalar(b"shard-id")
}

/// `pk + value * G_value + snd * G_snd + shard * G_shard + randomness * H`
pub fn coin_commitment(
    basis: &PedersenBasis,
    public_key: &RistrettoPoint,
    value: u64,
    snd: &Scalar,
    shard: u8,
    randomness: &Scalar,
) -> RistrettoPoint {
    public_key
        + RistrettoPoint::multiscalar_mul(
            [Scalar::from(value), *snd, Scalar::from(shard as u64), *randomness],
            [
                basis.generator(PedersenIndex::Value),
                basis.generator(PedersenIndex::SerialNumberDerivator),
                basis.generator(PedersenIndex::ShardId),
                basis.h(),
            ],
        )
}

/// A coin owned by the sender; `randomness` folds every component blinding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCoin {
    pub public_key: RistrettoPoint,
    pub value: u64,
    pub snd: Scalar,
    pub randomness: Scalar,
}

impl InputCoin {
    pub fn shard_id(&self) -> u8 {
        shard_id(&self.public_key, MAX_SHARD_NUMBER)
    }

    pub fn commitment(&self, basis: &PedersenBasis) -> RistrettoPoint {
        coin_commitment(basis, &self.public_key, self.value, &self.snd, self.shard_id(), &self.randomness)
    }
}

/// A coin to create for a receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputCoin {
    pub public_key: RistrettoPoint,
    pub value: u64,
    pub snd: Scalar,
}

impl OutputCoin {
    pub fn shard_id(&self) -> u8 {
        shard_id(&self.public_key, MAX_SHARD_NUMBER)
    }
}
