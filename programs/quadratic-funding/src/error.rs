// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum QuadraticFundingError {
    // DAO
    #[msg("DAO name must be between 1 and 32 bytes")]
    InvalidDaoName,

    #[msg("Signer is not the DAO authority")]
    UnauthorizedDaoAuthority,

    // PROPOSALS
    #[msg("Proposal metadata exceeds 200 bytes")]
    MetadataTooLong,

    #[msg("Only the DAO authority can create proposals")]
    UnauthorizedProposalCreation,

    #[msg("Proposal does not belong to this DAO")]
    InvalidDao,

    #[msg("Proposal is no longer accepting votes")]
    ProposalNotActive,

    // VOTING
    #[msg("Vote type must be 0 (no) or 1 (yes)")]
    InvalidVoteType,

    #[msg("Voter token account is not a token account owned by the voter")]
    InvalidTokenAccount,

    #[msg("Token mint does not match the DAO voting mint")]
    InvalidMint,

    // MISC
    #[msg("Math overflow")]
    Overflow,
}
