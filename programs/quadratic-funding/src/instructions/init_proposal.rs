// instructions/init_proposal.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;
use crate::QuadraticFundingInstruction;

pub fn handler(ctx: &mut InstructionContext<'_>, metadata: String) -> Result<()> {
    let accounts = InitProposal::try_accounts(ctx)?;

    let mut dao: Dao = ctx.load(&accounts.dao)?;
    require_keys_eq!(
        dao.authority,
        accounts.creator,
        QuadraticFundingError::UnauthorizedProposalCreation
    );
    validate_metadata(&metadata)?;

    // Addressed by the count before this proposal
    let proposal_id = dao.next_proposal_id()?;
    let id_bytes = proposal_id.to_le_bytes();
    let bump = ctx.create_pda_account(
        &accounts.creator,
        &accounts.proposal,
        &[PROPOSAL_SEED, accounts.dao.as_ref(), &id_bytes],
        Proposal::SIZE,
    )?;

    let proposal = Proposal::new(accounts.creator, accounts.dao, proposal_id, metadata, bump);
    ctx.store_account(&accounts.proposal, &proposal)?;
    ctx.store_account(&accounts.dao, &dao)?;

    msg!("Proposal {} created in DAO {}", proposal_id, dao.name);
    msg!("Metadata: {}", proposal.metadata);

    Ok(())
}

/// Accounts, in instruction order
pub struct InitProposal {
    pub creator: Pubkey,
    pub dao: Pubkey,
    pub proposal: Pubkey,
}

impl InitProposal {
    /// `proposal_id` is the DAO's current `proposal_count`
    pub fn new(creator: Pubkey, dao: Pubkey, proposal_id: u64) -> Result<Self> {
        Ok(Self {
            creator,
            dao,
            proposal: Proposal::address(&dao, proposal_id)?.0,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            creator: ctx.account_key(0)?,
            dao: ctx.account_key(1)?,
            proposal: ctx.account_key(2)?,
        };
        require_keys_eq!(ctx.account_key(3)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.creator)?;
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.creator, true),
            AccountMeta::new(self.dao, false),
            AccountMeta::new(self.proposal, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(
        creator: Pubkey,
        dao: Pubkey,
        proposal_id: u64,
        metadata: &str,
    ) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(creator, dao, proposal_id)?.to_account_metas(),
            data: QuadraticFundingInstruction::InitProposal {
                metadata: metadata.to_string(),
            }
            .data()?,
        })
    }
}
