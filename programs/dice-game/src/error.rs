// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum DiceError {
    // BET PARAMETERS
    #[msg("Roll threshold must be between 1 and 99")]
    InvalidRoll,

    #[msg("Wager is below the minimum bet")]
    MinimumBet,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Vault cannot cover the potential payout")]
    InsufficientVaultCollateral,

    // BET LIFECYCLE
    #[msg("Bet is not owned by this player")]
    InvalidPlayer,

    // HOUSE
    #[msg("Signer is not the house authority")]
    UnauthorizedHouse,

    #[msg("House edge must be below 100%")]
    InvalidHouseEdge,

    // ED25519 RESOLUTION
    #[msg("Instruction 0 is not an ed25519 verify instruction")]
    Ed25519Program,

    #[msg("Ed25519 instruction must not reference accounts")]
    Ed25519Accounts,

    #[msg("Ed25519 instruction must carry exactly one signature")]
    Ed25519SignatureCount,

    #[msg("Ed25519 signature data must be inline")]
    Ed25519Header,

    #[msg("Ed25519 signer is not the house")]
    Ed25519Pubkey,

    #[msg("Ed25519 signature does not match the submitted one")]
    Ed25519Signature,

    #[msg("Ed25519 message is not the bet account data")]
    Ed25519Message,

    // MISC
    #[msg("Math overflow")]
    Overflow,
}
