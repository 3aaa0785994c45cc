// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // ACCOUNTS
    #[msg("Account is already in use")]
    AccountAlreadyInUse,

    #[msg("Account was not declared by the instruction")]
    AccountNotDeclared,

    #[msg("Insufficient lamports for the operation")]
    InsufficientFunds,

    #[msg("Lamports can only be moved out of a system account")]
    InvalidTransferSource,

    #[msg("Program does not own the account")]
    ExternalAccountDataModified,

    #[msg("Seeds do not derive a valid program address")]
    InvalidSeeds,

    // TRANSACTIONS
    #[msg("Program is not registered with the ledger")]
    UnknownProgram,

    #[msg("Instruction index out of bounds")]
    InstructionIndexOutOfBounds,

    #[msg("Transaction has no instructions")]
    EmptyTransaction,

    // ED25519 PRECOMPILE
    #[msg("Malformed ed25519 instruction data")]
    InvalidEd25519Instruction,

    #[msg("Ed25519 signature verification failed")]
    Ed25519VerificationFailed,

    // TOKENS
    #[msg("Account is not an initialized token mint")]
    InvalidMint,

    #[msg("Math overflow")]
    MathOverflow,
}
