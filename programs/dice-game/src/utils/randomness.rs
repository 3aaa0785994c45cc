// utils/randomness.rs
use sha2::{Digest, Sha256};

use crate::constants::ROLL_RANGE;

/// Turns the house's signature over a bet into a roll in [0, 100).
///
/// The house cannot know its signature bytes before signing, and the player
/// cannot forge one, so the roll is fixed once the bet is placed and
/// reproducible by anyone holding the signature.
pub trait RollSource {
    fn roll(&self, signature: &[u8; 64]) -> u8;
}

/// SHA-256 of the signature, halves summed as little-endian u128s, mod 100.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignatureHashRoll;

impl RollSource for SignatureHashRoll {
    fn roll(&self, signature: &[u8; 64]) -> u8 {
        let hash: [u8; 32] = Sha256::digest(signature).into();

        let mut half = [0u8; 16];
        half.copy_from_slice(&hash[..16]);
        let lower = u128::from_le_bytes(half);
        half.copy_from_slice(&hash[16..]);
        let upper = u128::from_le_bytes(half);

        (lower.wrapping_add(upper) % ROLL_RANGE as u128) as u8
    }
}

/// Always rolls the same number
#[derive(Clone, Copy, Debug)]
pub struct FixedRoll(pub u8);

impl RollSource for FixedRoll {
    fn roll(&self, _signature: &[u8; 64]) -> u8 {
        self.0 % ROLL_RANGE
    }
}
