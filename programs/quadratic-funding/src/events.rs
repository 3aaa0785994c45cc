use anchor_lang::prelude::*;

#[event]
pub struct VoteCast {
    pub voter: Pubkey,
    pub proposal: Pubkey,
    pub vote_type: u8,
    pub vote_credits: u64,
}

#[event]
pub struct ProposalFinalized {
    pub dao: Pubkey,
    pub proposal: Pubkey,
    pub passed: bool,
    pub yes_vote_count: u64,
    pub no_vote_count: u64,
}
