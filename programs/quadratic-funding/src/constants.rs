// constants.rs

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const DAO_SEED: &[u8] = b"dao";
pub const PROPOSAL_SEED: &[u8] = b"proposal";
pub const VOTE_SEED: &[u8] = b"vote";

// ============================================================================
// LIMITS
// ============================================================================

/// A DAO name is an address seed, and a seed holds at most 32 bytes
pub const MAX_DAO_NAME_LEN: usize = 32;

pub const MAX_METADATA_LEN: usize = 200;
