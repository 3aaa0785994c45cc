use anchor_lang::prelude::*;
use ledger_runtime::derive_address;

use crate::constants::*;
use crate::error::DiceError;

/// House configuration and bookkeeping for one vault.
#[account]
#[derive(Debug, PartialEq)]
pub struct House {
    /// Wallet that funds the vault and signs rolls
    pub authority: Pubkey,
    /// Deduction from winning payouts, basis points
    pub house_edge_bps: u16,
    /// Sum of the potential payouts of every live bet
    pub outstanding_liabilities: u64,
    pub open_bets: u64,
    pub total_wagered: u64,
    pub total_paid_out: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl House {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        2 + // house_edge_bps
        8 + // outstanding_liabilities
        8 + // open_bets
        8 + // total_wagered
        8 + // total_paid_out
        1 + // bump
        1; // vault_bump

    pub fn new(authority: Pubkey, house_edge_bps: u16, bump: u8, vault_bump: u8) -> Self {
        Self {
            authority,
            house_edge_bps,
            outstanding_liabilities: 0,
            open_bets: 0,
            total_wagered: 0,
            total_paid_out: 0,
            bump,
            vault_bump,
        }
    }

    pub fn address(authority: &Pubkey) -> Result<(Pubkey, u8)> {
        derive_address(&[HOUSE_SEED, authority.as_ref()], &crate::ID)
    }

    pub fn vault_address(authority: &Pubkey) -> Result<(Pubkey, u8)> {
        derive_address(&[VAULT_SEED, authority.as_ref()], &crate::ID)
    }

    /// Vault lamports not already promised to live bets
    pub fn available_collateral(&self, vault_lamports: u64) -> u64 {
        vault_lamports.saturating_sub(self.outstanding_liabilities)
    }

    /// Reserve collateral for a newly placed bet
    pub fn record_bet(&mut self, amount: u64, potential_payout: u64) -> Result<()> {
        self.outstanding_liabilities = self
            .outstanding_liabilities
            .checked_add(potential_payout)
            .ok_or(DiceError::Overflow)?;
        self.open_bets = self.open_bets.checked_add(1).ok_or(DiceError::Overflow)?;
        self.total_wagered = self
            .total_wagered
            .checked_add(amount)
            .ok_or(DiceError::Overflow)?;
        Ok(())
    }

    /// Release the collateral of a resolved or refunded bet
    pub fn release_bet(&mut self, potential_payout: u64) -> Result<()> {
        self.outstanding_liabilities = self
            .outstanding_liabilities
            .checked_sub(potential_payout)
            .ok_or(DiceError::Overflow)?;
        self.open_bets = self.open_bets.checked_sub(1).ok_or(DiceError::Overflow)?;
        Ok(())
    }

    pub fn record_payout(&mut self, payout: u64) -> Result<()> {
        self.total_paid_out = self
            .total_paid_out
            .checked_add(payout)
            .ok_or(DiceError::Overflow)?;
        Ok(())
    }
}
