// address.rs
use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Native ed25519 signature verification program
pub const ED25519_PROGRAM_ID: Pubkey =
    anchor_lang::prelude::Pubkey::from_str_const("Ed25519SigVerify111111111111111111111111111");

/// Instructions sysvar, declared by programs that inspect sibling instructions
pub const INSTRUCTIONS_SYSVAR_ID: Pubkey =
    anchor_lang::prelude::Pubkey::from_str_const("Sysvar1nstructions1111111111111111111111111");

pub const SYSTEM_PROGRAM_ID: Pubkey = anchor_lang::system_program::ID;

pub const TOKEN_PROGRAM_ID: Pubkey = anchor_spl::token::ID;

/// Derive a program address and its canonical bump.
///
/// Bit-exact with `Pubkey::find_program_address`, but reports seeds that
/// cannot produce an address (too many, or longer than 32 bytes) as an error
/// instead of panicking.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| error!(LedgerError::InvalidSeeds))
}

/// Check that `seeds` (bump included) produce `address` for `program_id`.
pub fn is_program_address(address: &Pubkey, seeds: &[&[u8]], program_id: &Pubkey) -> bool {
    Pubkey::create_program_address(seeds, program_id)
        .map(|derived| derived == *address)
        .unwrap_or(false)
}
