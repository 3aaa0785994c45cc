// instructions/place_bet.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::events::BetPlaced;
use crate::state::*;
use crate::utils::*;
use crate::DiceInstruction;

pub fn handler(ctx: &mut InstructionContext<'_>, seed: u128, roll: u8, amount: u64) -> Result<()> {
    let accounts = PlaceBet::try_accounts(ctx)?;

    validate_roll(roll)?;
    validate_bet_amount(amount)?;

    let mut house: House = ctx.load(&accounts.house_state)?;
    let potential_payout = calculate_payout(amount, roll, house.house_edge_bps)?;

    // Measured before the wager lands: a bet never collateralizes itself.
    let available = house.available_collateral(ctx.lamports(&accounts.vault)?);
    require!(
        available >= potential_payout,
        DiceError::InsufficientVaultCollateral
    );

    let seed_bytes = seed.to_le_bytes();
    let bump = ctx.create_pda_account(
        &accounts.player,
        &accounts.bet,
        &[BET_SEED, accounts.vault.as_ref(), &seed_bytes],
        Bet::SIZE,
    )?;

    ctx.transfer(&accounts.player, &accounts.vault, amount)?;

    house.record_bet(amount, potential_payout)?;
    ctx.store_account(&accounts.house_state, &house)?;

    let bet = Bet::new(
        accounts.player,
        seed,
        ctx.slot(),
        amount,
        potential_payout,
        roll,
        bump,
    );
    ctx.store_account(&accounts.bet, &bet)?;

    emit!(BetPlaced {
        player: accounts.player,
        seed,
        roll,
        amount,
        potential_payout,
    });

    msg!("Bet placed!");
    msg!("Player: {}", accounts.player);
    msg!("Seed: {}, roll under {}", seed, roll);
    msg!("Wager: {} lamports, potential payout: {} lamports", amount, potential_payout);

    Ok(())
}

/// Accounts, in instruction order
pub struct PlaceBet {
    pub player: Pubkey,
    /// House authority; read only
    pub house: Pubkey,
    pub house_state: Pubkey,
    pub vault: Pubkey,
    pub bet: Pubkey,
}

impl PlaceBet {
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

    pub fn instruction(
        player: Pubkey,
        house: Pubkey,
        seed: u128,
        roll: u8,
        amount: u64,
    ) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(player, house, seed)?.to_account_metas(),
            data: DiceInstruction::PlaceBet { seed, roll, amount }.data()?,
        })
    }
}
