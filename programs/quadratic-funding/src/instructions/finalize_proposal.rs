// instructions/finalize_proposal.rs
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::InstructionContext;

use crate::error::*;
use crate::events::ProposalFinalized;
use crate::state::*;
use crate::QuadraticFundingInstruction;

/// Close voting on a proposal; it passes on a strict yes majority
pub fn handler(ctx: &mut InstructionContext<'_>) -> Result<()> {
    let accounts = FinalizeProposal::try_accounts(ctx)?;

    let dao: Dao = ctx.load(&accounts.dao)?;
    require_keys_eq!(
        dao.authority,
        accounts.authority,
        QuadraticFundingError::UnauthorizedDaoAuthority
    );

    let mut proposal: Proposal = ctx.load(&accounts.proposal)?;
    require_keys_eq!(proposal.dao, accounts.dao, QuadraticFundingError::InvalidDao);
    require!(proposal.is_active(), QuadraticFundingError::ProposalNotActive);

    let state = proposal.finalize();
    ctx.store_account(&accounts.proposal, &proposal)?;

    emit!(ProposalFinalized {
        dao: accounts.dao,
        proposal: accounts.proposal,
        passed: state == ProposalState::Passed,
        yes_vote_count: proposal.yes_vote_count,
        no_vote_count: proposal.no_vote_count,
    });

    msg!("Proposal {} finalized: {:?}", proposal.proposal_id, state);

    Ok(())
}

/// Accounts, in instruction order
pub struct FinalizeProposal {
    /// DAO authority
    pub authority: Pubkey,
    pub dao: Pubkey,
    pub proposal: Pubkey,
}

impl FinalizeProposal {
    pub fn new(authority: Pubkey, dao: Pubkey, proposal: Pubkey) -> Self {
        Self {
            authority,
            dao,
            proposal,
        }
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            authority: ctx.account_key(0)?,
            dao: ctx.account_key(1)?,
            proposal: ctx.account_key(2)?,
        };
        ctx.require_signer(&accounts.authority)?;
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.authority, true),
            AccountMeta::new_readonly(self.dao, false),
            AccountMeta::new(self.proposal, false),
        ]
    }

    pub fn instruction(&self) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: self.to_account_metas(),
            data: QuadraticFundingInstruction::FinalizeProposal.data()?,
        })
    }
}
