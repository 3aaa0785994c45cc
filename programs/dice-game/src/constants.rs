// constants.rs

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const HOUSE_SEED: &[u8] = b"house";
pub const VAULT_SEED: &[u8] = b"vault";
pub const BET_SEED: &[u8] = b"bet";

// ============================================================================
// BET LIMITS
// ============================================================================

/// Lowest accepted roll threshold (1% win chance)
pub const MIN_ROLL: u8 = 1;

/// Highest accepted roll threshold (99% win chance)
pub const MAX_ROLL: u8 = 99;

/// Rolls land in [0, ROLL_RANGE)
pub const ROLL_RANGE: u8 = 100;

/// Smallest wager in lamports (0.01 SOL)
pub const MIN_BET_LAMPORTS: u64 = 10_000_000;

// ============================================================================
// HOUSE EDGE
// ============================================================================

pub const BASIS_POINTS: u16 = 10_000;

/// Default deduction from winning payouts, 1.5%
pub const DEFAULT_HOUSE_EDGE_BPS: u16 = 150;
