// instructions/init_dao.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::token::Mint;
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;
use crate::QuadraticFundingInstruction;

/// Create a DAO named `name` that votes with `mint`
pub fn handler(ctx: &mut InstructionContext<'_>, name: String) -> Result<()> {
    let accounts = InitDao::try_accounts(ctx)?;
    validate_dao_name(&name)?;

    let mint: Mint = ctx
        .load(&accounts.mint)
        .map_err(|_| QuadraticFundingError::InvalidMint)?;

    let bump = ctx.create_pda_account(
        &accounts.creator,
        &accounts.dao,
        &[DAO_SEED, accounts.creator.as_ref(), name.as_bytes()],
        Dao::SIZE,
    )?;

    let dao = Dao::new(name, accounts.creator, accounts.mint, bump);
    ctx.store_account(&accounts.dao, &dao)?;

    msg!("DAO initialized!");
    msg!("Name: {}", dao.name);
    msg!("Authority: {}", dao.authority);
    msg!("Voting mint: {} ({} decimals)", dao.mint, mint.decimals);

    Ok(())
}

/// Accounts, in instruction order
pub struct InitDao {
    pub creator: Pubkey,
    pub dao: Pubkey,
    pub mint: Pubkey,
}

impl InitDao {
    pub fn new(creator: Pubkey, name: &str, mint: Pubkey) -> Result<Self> {
        Ok(Self {
            creator,
            dao: Dao::address(&creator, name)?.0,
            mint,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            creator: ctx.account_key(0)?,
            dao: ctx.account_key(1)?,
            mint: ctx.account_key(2)?,
        };
        require_keys_eq!(ctx.account_key(3)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.creator)?;
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.creator, true),
            AccountMeta::new(self.dao, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(creator: Pubkey, name: &str, mint: Pubkey) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(creator, name, mint)?.to_account_metas(),
            data: QuadraticFundingInstruction::InitDao {
                name: name.to_string(),
            }
            .data()?,
        })
    }
}
