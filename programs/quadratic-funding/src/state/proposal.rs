use anchor_lang::prelude::*;
use ledger_runtime::derive_address;

use crate::constants::*;
use crate::error::QuadraticFundingError;
use crate::state::VoteType;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalState {
    Active,
    Passed,
    Rejected,
}

#[account]
#[derive(Debug, PartialEq)]
pub struct Proposal {
    pub authority: Pubkey,
    pub dao: Pubkey,
    pub proposal_id: u64,
    pub metadata: String,
    /// Sum of the credits of every yes vote
    pub yes_vote_count: u64,
    pub no_vote_count: u64,
    pub state: ProposalState,
    pub bump: u8,
}

impl Proposal {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // dao
        8 + // proposal_id
        4 + MAX_METADATA_LEN + // metadata
        8 + // yes_vote_count
        8 + // no_vote_count
        1 + // state
        1; // bump

    pub fn new(authority: Pubkey, dao: Pubkey, proposal_id: u64, metadata: String, bump: u8) -> Self {
        Self {
            authority,
            dao,
            proposal_id,
            metadata,
            yes_vote_count: 0,
            no_vote_count: 0,
            state: ProposalState::Active,
            bump,
        }
    }

    pub fn address(dao: &Pubkey, proposal_id: u64) -> Result<(Pubkey, u8)> {
        derive_address(
            &[PROPOSAL_SEED, dao.as_ref(), &proposal_id.to_le_bytes()],
            &crate::ID,
        )
    }

    pub fn is_active(&self) -> bool {
        self.state == ProposalState::Active
    }

    pub fn add_votes(&mut self, vote_type: VoteType, credits: u64) -> Result<()> {
        let count = match vote_type {
            VoteType::No => &mut self.no_vote_count,
            VoteType::Yes => &mut self.yes_vote_count,
        };
        *count = count
            .checked_add(credits)
            .ok_or(QuadraticFundingError::Overflow)?;
        Ok(())
    }

    /// Close voting. A tie is rejected.
    pub fn finalize(&mut self) -> ProposalState {
        self.state = if self.yes_vote_count > self.no_vote_count {
            ProposalState::Passed
        } else {
            ProposalState::Rejected
        };
        self.state
    }
}
