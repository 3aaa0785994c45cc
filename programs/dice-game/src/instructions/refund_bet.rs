// instructions/refund_bet.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::events::BetRefunded;
use crate::state::*;
use crate::DiceInstruction;

/// Return an unresolved wager to the player who placed it
pub fn handler(ctx: &mut InstructionContext<'_>) -> Result<()> {
    let accounts = RefundBet::try_accounts(ctx)?;

    let bet: Bet = ctx.load(&accounts.bet)?;
    require_keys_eq!(bet.player, accounts.player, DiceError::InvalidPlayer);
    let (expected_bet, _) = Bet::address(&accounts.vault, bet.seed)?;
    require_keys_eq!(expected_bet, accounts.bet, ErrorCode::ConstraintSeeds);

    let mut house: House = ctx.load(&accounts.house_state)?;

    let vault_bump = [house.vault_bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, accounts.house.as_ref(), &vault_bump];
    ctx.transfer_signed(&accounts.vault, &accounts.player, bet.amount, signer_seeds)?;

    house.release_bet(bet.potential_payout)?;
    ctx.store_account(&accounts.house_state, &house)?;

    ctx.close_account(&accounts.bet, &accounts.player)?;

    emit!(BetRefunded {
        player: bet.player,
        seed: bet.seed,
        amount: bet.amount,
    });

    msg!("Bet {} refunded", bet.seed);
    msg!("Returned {} lamports to {}", bet.amount, bet.player);

    Ok(())
}

/// Accounts, in instruction order
pub struct RefundBet {
    pub player: Pubkey,
    /// House authority; read only
    pub house: Pubkey,
    pub house_state: Pubkey,
    pub vault: Pubkey,
    pub bet: Pubkey,
}

impl RefundBet {
    pub fn new(player: Pubkey, house: Pubkey, seed: u128) -> Result<Self> {
        let vault = House::vault_address(&house)?.0;
        Ok(Self {
            player,
            house,
            house_state: House::address(&house)?.0,
            vault,
            bet: Bet::address(&vault, seed)?.0,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            player: ctx.account_key(0)?,
            house: ctx.account_key(1)?,
            house_state: ctx.account_key(2)?,
            vault: ctx.account_key(3)?,
            bet: ctx.account_key(4)?,
        };
        require_keys_eq!(ctx.account_key(5)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.player)?;

        let (house_state, _) = House::address(&accounts.house)?;
        require_keys_eq!(house_state, accounts.house_state, ErrorCode::ConstraintSeeds);
        let (vault, _) = House::vault_address(&accounts.house)?;
        require_keys_eq!(vault, accounts.vault, ErrorCode::ConstraintSeeds);
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.player, true),
            AccountMeta::new_readonly(self.house, false),
            AccountMeta::new(self.house_state, false),
            AccountMeta::new(self.vault, false),
            AccountMeta::new(self.bet, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(player: Pubkey, house: Pubkey, seed: u128) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(player, house, seed)?.to_account_metas(),
            data: DiceInstruction::RefundBet.data()?,
        })
    }
}
