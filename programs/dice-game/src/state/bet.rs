use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use ledger_runtime::derive_address;

use crate::constants::*;

/// Settled bets are closed in the same instruction, so a stored bet is always `Placed`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetStatus {
    Placed,
    Resolved,
    Refunded,
}

#[account]
#[derive(Debug, PartialEq)]
pub struct Bet {
    pub player: Pubkey,
    pub seed: u128,
    /// Slot the bet was placed in
    pub slot: u64,
    pub amount: u64,
    /// Collateral reserved in the vault for a win
    pub potential_payout: u64,
    /// Win if the house roll is strictly below this
    pub roll: u8,
    pub status: BetStatus,
    pub bump: u8,
}

impl Bet {
    pub const SIZE: usize = 8 + // discriminator
        32 + // player
        16 + // seed
        8 + // slot
        8 + // amount
        8 + // potential_payout
        1 + // roll
        1 + // status
        1; // bump

    pub fn new(
        player: Pubkey,
        seed: u128,
        slot: u64,
        amount: u64,
        potential_payout: u64,
        roll: u8,
        bump: u8,
    ) -> Self {
        Self {
            player,
            seed,
            slot,
            amount,
            potential_payout,
            roll,
            status: BetStatus::Placed,
            bump,
        }
    }

    pub fn address(vault: &Pubkey, seed: u128) -> Result<(Pubkey, u8)> {
        derive_address(&[BET_SEED, vault.as_ref(), &seed.to_le_bytes()], &crate::ID)
    }

    /// Account data after the discriminator. This is what the house signs.
    pub fn to_slice(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(Self::SIZE - 8);
        self.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::AccountDidNotSerialize))?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bet {
        Bet::new(Pubkey::new_unique(), 50, 7, 1_000_000_000, 1_970_000_000, 50, 254)
    }

    #[test]
    fn to_slice_is_account_data_without_discriminator() {
        let bet = sample();
        let mut data = Vec::new();
        bet.try_serialize(&mut data).unwrap();

        assert_eq!(data.len(), Bet::SIZE);
        assert_eq!(&data[8..], bet.to_slice().unwrap().as_slice());
    }

    #[test]
    fn new_bet_is_placed() {
        assert_eq!(sample().status, BetStatus::Placed);
    }

    #[test]
    fn address_uses_sixteen_byte_little_endian_seed() {
        let vault = Pubkey::new_unique();
        let seed: u128 = 50;
        let mut seed_bytes = [0u8; 16];
        seed_bytes[0] = 50;

        let expected = Pubkey::find_program_address(&[b"bet", vault.as_ref(), &seed_bytes], &crate::ID);

        assert_eq!(Bet::address(&vault, seed).unwrap(), expected);
    }
}
