// instructions/admin.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;
use crate::DiceInstruction;

/// Admin function to add collateral to the vault
pub fn deposit(ctx: &mut InstructionContext<'_>, amount: u64) -> Result<()> {
    let accounts = ManageVault::try_accounts(ctx)?;
    require!(amount > 0, DiceError::InvalidAmount);

    let house: House = ctx.load(&accounts.house_state)?;
    require_keys_eq!(house.authority, accounts.house, DiceError::UnauthorizedHouse);

    ctx.transfer(&accounts.house, &accounts.vault, amount)?;

    msg!("Deposited {} lamports into vault", amount);

    Ok(())
}

/// Admin function to pull uncommitted collateral out of the vault
pub fn withdraw(ctx: &mut InstructionContext<'_>, amount: u64) -> Result<()> {
    let accounts = ManageVault::try_accounts(ctx)?;
    require!(amount > 0, DiceError::InvalidAmount);

    let house: House = ctx.load(&accounts.house_state)?;
    require_keys_eq!(house.authority, accounts.house, DiceError::UnauthorizedHouse);

    // Collateral behind live bets stays put
    let available = house.available_collateral(ctx.lamports(&accounts.vault)?);
    require!(available >= amount, DiceError::InsufficientVaultCollateral);

    let vault_bump = [house.vault_bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, accounts.house.as_ref(), &vault_bump];
    ctx.transfer_signed(&accounts.vault, &accounts.house, amount, signer_seeds)?;

    msg!("Withdrew {} lamports from vault", amount);

    Ok(())
}

/// Admin function to update the house edge applied to new bets
pub fn set_house_edge(ctx: &mut InstructionContext<'_>, house_edge_bps: u16) -> Result<()> {
    let accounts = SetHouseEdge::try_accounts(ctx)?;

    let mut house: House = ctx.load(&accounts.house_state)?;
    require_keys_eq!(house.authority, accounts.house, DiceError::UnauthorizedHouse);

    validate_house_edge(house_edge_bps)?;
    house.house_edge_bps = house_edge_bps;
    ctx.store_account(&accounts.house_state, &house)?;

    msg!("House edge updated to: {} bps", house_edge_bps);

    Ok(())
}

/// Accounts shared by deposit and withdraw
pub struct ManageVault {
    pub house: Pubkey,
    pub house_state: Pubkey,
    pub vault: Pubkey,
}

impl ManageVault {
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

        let (house_state, _) = House::address(&accounts.house)?;
        require_keys_eq!(house_state, accounts.house_state, ErrorCode::ConstraintSeeds);
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

    pub fn deposit(house: Pubkey, amount: u64) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(house)?.to_account_metas(),
            data: DiceInstruction::Deposit { amount }.data()?,
        })
    }

    pub fn withdraw(house: Pubkey, amount: u64) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(house)?.to_account_metas(),
            data: DiceInstruction::Withdraw { amount }.data()?,
        })
    }
}

pub struct SetHouseEdge {
    /// Authority (admin)
    pub house: Pubkey,
    pub house_state: Pubkey,
}

impl SetHouseEdge {
    pub fn new(house: Pubkey) -> Result<Self> {
        Ok(Self {
            house,
            house_state: House::address(&house)?.0,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            house: ctx.account_key(0)?,
            house_state: ctx.account_key(1)?,
        };
        ctx.require_signer(&accounts.house)?;
        ctx.require_writable(&accounts.house_state)?;

        let (house_state, _) = House::address(&accounts.house)?;
        require_keys_eq!(house_state, accounts.house_state, ErrorCode::ConstraintSeeds);
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.house, true),
            AccountMeta::new(self.house_state, false),
        ]
    }

    pub fn instruction(&self, house_edge_bps: u16) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: self.to_account_metas(),
            data: DiceInstruction::SetHouseEdge { house_edge_bps }.data()?,
        })
    }
}
