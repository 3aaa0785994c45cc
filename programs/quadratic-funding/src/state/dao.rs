use anchor_lang::prelude::*;
use ledger_runtime::derive_address;

use crate::constants::*;
use crate::error::QuadraticFundingError;

/// A named voting namespace owned by its creator
#[account]
#[derive(Debug, PartialEq)]
pub struct Dao {
    pub name: String,
    pub authority: Pubkey,
    /// Token whose balances grant vote credits
    pub mint: Pubkey,
    /// Number of proposals created so far; also the next proposal id
    pub proposal_count: u64,
    pub bump: u8,
}

impl Dao {
    pub const SIZE: usize = 8 + // discriminator
        4 + MAX_DAO_NAME_LEN + // name
        32 + // authority
        32 + // mint
        8 + // proposal_count
        1; // bump

    pub fn new(name: String, authority: Pubkey, mint: Pubkey, bump: u8) -> Self {
        Self {
            name,
            authority,
            mint,
            proposal_count: 0,
            bump,
        }
    }

    pub fn address(creator: &Pubkey, name: &str) -> Result<(Pubkey, u8)> {
        derive_address(&[DAO_SEED, creator.as_ref(), name.as_bytes()], &crate::ID)
    }

    /// Hand out the next proposal id
    pub fn next_proposal_id(&mut self) -> Result<u64> {
        let id = self.proposal_count;
        self.proposal_count = self
            .proposal_count
            .checked_add(1)
            .ok_or(QuadraticFundingError::Overflow)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_fits_longest_name() {
        let dao = Dao::new("d".repeat(MAX_DAO_NAME_LEN), Pubkey::new_unique(), Pubkey::new_unique(), 255);
        let mut data = Vec::new();
        dao.try_serialize(&mut data).unwrap();

        assert_eq!(data.len(), Dao::SIZE);
    }

    #[test]
    fn proposal_ids_count_up_from_zero() {
        let mut dao = Dao::new("grants".to_string(), Pubkey::new_unique(), Pubkey::new_unique(), 255);

        assert_eq!(dao.next_proposal_id().unwrap(), 0);
        assert_eq!(dao.next_proposal_id().unwrap(), 1);
        assert_eq!(dao.proposal_count, 2);
    }

    #[test]
    fn proposal_count_overflow_is_an_error() {
        let mut dao = Dao::new("grants".to_string(), Pubkey::new_unique(), Pubkey::new_unique(), 255);
        dao.proposal_count = u64::MAX;

        assert!(dao.next_proposal_id().is_err());
    }
}
