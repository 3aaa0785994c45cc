// instructions/initialize.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::DiceInstruction;

/// Create the house and seed its vault with `amount` lamports
pub fn handler(ctx: &mut InstructionContext<'_>, amount: u64) -> Result<()> {
    let accounts = Initialize::try_accounts(ctx)?;
    require!(amount > 0, DiceError::InvalidAmount);

    let bump = ctx.create_pda_account(
        &accounts.house,
        &accounts.house_state,
        &[HOUSE_SEED, accounts.house.as_ref()],
        House::SIZE,
    )?;
    let (_, vault_bump) = House::vault_address(&accounts.house)?;

    ctx.transfer(&accounts.house, &accounts.vault, amount)?;

    let house = House::new(accounts.house, DEFAULT_HOUSE_EDGE_BPS, bump, vault_bump);
    ctx.store_account(&accounts.house_state, &house)?;

    msg!("House initialized!");
    msg!("Authority: {}", accounts.house);
    msg!("Vault: {} seeded with {} lamports", accounts.vault, amount);
    msg!("House edge: {} bps", house.house_edge_bps);

    Ok(())
}

/// Accounts, in instruction order
pub struct Initialize {
    /// House authority, pays for everything
    pub house: Pubkey,
    pub house_state: Pubkey,
    pub vault: Pubkey,
}

impl Initialize {
    pub fn new(house: Pubkey) -> Result<Self> {
        Ok(Self {
            house,
            house_state: House::address(&house)?.0,
            vault: House::vault_address(&house)?.0,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            house: ctx.account_key(0)?,
            house_state: ctx.account_key(1)?,
            vault: ctx.account_key(2)?,
        };
        require_keys_eq!(ctx.account_key(3)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.house)?;

        let (vault, _) = House::vault_address(&accounts.house)?;
        require_keys_eq!(vault, accounts.vault, ErrorCode::ConstraintSeeds);
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.house, true),
            AccountMeta::new(self.house_state, false),
            AccountMeta::new(self.vault, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(house: Pubkey, amount: u64) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(house)?.to_account_metas(),
            data: DiceInstruction::Initialize { amount }.data()?,
        })
    }
}
