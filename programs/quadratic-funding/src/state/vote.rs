use anchor_lang::prelude::*;
use ledger_runtime::derive_address;

use crate::constants::*;
use crate::error::QuadraticFundingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteType {
    No,
    Yes,
}

impl TryFrom<u8> for VoteType {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(VoteType::No),
            1 => Ok(VoteType::Yes),
            _ => err!(QuadraticFundingError::InvalidVoteType),
        }
    }
}

impl From<VoteType> for u8 {
    fn from(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::No => 0,
            VoteType::Yes => 1,
        }
    }
}

/// Receipt of one voter's ballot on one proposal
#[account]
#[derive(Debug, PartialEq)]
pub struct Vote {
    pub authority: Pubkey,
    pub vote_type: VoteType,
    pub vote_credits: u64,
    pub bump: u8,
}

impl Vote {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        1 + // vote_type
        8 + // vote_credits
        1; // bump

    pub fn address(voter: &Pubkey, proposal: &Pubkey) -> Result<(Pubkey, u8)> {
        derive_address(&[VOTE_SEED, voter.as_ref(), proposal.as_ref()], &crate::ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_type_from_wire_byte() {
        assert_eq!(VoteType::try_from(0).unwrap(), VoteType::No);
        assert_eq!(VoteType::try_from(1).unwrap(), VoteType::Yes);
        assert!(VoteType::try_from(2).is_err());
        assert_eq!(u8::from(VoteType::Yes), 1);
    }

    #[test]
    fn size_matches_serialized_layout() {
        let vote = Vote {
            authority: Pubkey::new_unique(),
            vote_type: VoteType::Yes,
            vote_credits: 10_000,
            bump: 255,
        };
        let mut data = Vec::new();
        vote.try_serialize(&mut data).unwrap();

        assert_eq!(data.len(), Vote::SIZE);
    }
}
