// instructions/cast_vote.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::TokenAccount;
use ledger_runtime::{InstructionContext, SYSTEM_PROGRAM_ID};

use crate::constants::*;
use crate::error::*;
use crate::events::VoteCast;
use crate::state::*;
use crate::utils::*;
use crate::QuadraticFundingInstruction;

/// Vote with credits equal to the square root of the voter's token balance
pub fn handler(ctx: &mut InstructionContext<'_>, vote_type: u8) -> Result<()> {
    let accounts = CastVote::try_accounts(ctx)?;
    let vote_type = VoteType::try_from(vote_type)?;

    let dao: Dao = ctx.load(&accounts.dao)?;
    let mut proposal: Proposal = ctx.load(&accounts.proposal)?;
    require_keys_eq!(proposal.dao, accounts.dao, QuadraticFundingError::InvalidDao);
    require!(proposal.is_active(), QuadraticFundingError::ProposalNotActive);

    let token_account: TokenAccount = ctx
        .load(&accounts.voter_token_account)
        .map_err(|_| QuadraticFundingError::InvalidTokenAccount)?;
    require_keys_eq!(
        token_account.owner,
        accounts.voter,
        QuadraticFundingError::InvalidTokenAccount
    );
    require_keys_eq!(token_account.mint, dao.mint, QuadraticFundingError::InvalidMint);

    let vote_credits = calculate_vote_credits(token_account.amount);

    let bump = ctx.create_pda_account(
        &accounts.voter,
        &accounts.vote,
        &[VOTE_SEED, accounts.voter.as_ref(), accounts.proposal.as_ref()],
        Vote::SIZE,
    )?;
    let vote = Vote {
        authority: accounts.voter,
        vote_type,
        vote_credits,
        bump,
    };
    ctx.store_account(&accounts.vote, &vote)?;

    proposal.add_votes(vote_type, vote_credits)?;
    ctx.store_account(&accounts.proposal, &proposal)?;

    emit!(VoteCast {
        voter: accounts.voter,
        proposal: accounts.proposal,
        vote_type: vote_type.into(),
        vote_credits,
    });

    msg!("Vote cast!");
    msg!("Voter: {}, {:?} with {} credits", accounts.voter, vote_type, vote_credits);
    msg!(
        "Proposal {} tally: {} yes / {} no",
        proposal.proposal_id,
        proposal.yes_vote_count,
        proposal.no_vote_count
    );

    Ok(())
}

/// Accounts, in instruction order
pub struct CastVote {
    pub voter: Pubkey,
    pub dao: Pubkey,
    pub proposal: Pubkey,
    pub vote: Pubkey,
    /// Any token account of the DAO mint owned by the voter
    pub voter_token_account: Pubkey,
}

impl CastVote {
    /// Votes with the voter's associated token account for `mint`
    pub fn new(voter: Pubkey, dao: Pubkey, proposal: Pubkey, mint: &Pubkey) -> Result<Self> {
        Self::with_token_account(
            voter,
            dao,
            proposal,
            get_associated_token_address(&voter, mint),
        )
    }

    pub fn with_token_account(
        voter: Pubkey,
        dao: Pubkey,
        proposal: Pubkey,
        voter_token_account: Pubkey,
    ) -> Result<Self> {
        Ok(Self {
            voter,
            dao,
            proposal,
            vote: Vote::address(&voter, &proposal)?.0,
            voter_token_account,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            voter: ctx.account_key(0)?,
            dao: ctx.account_key(1)?,
            proposal: ctx.account_key(2)?,
            vote: ctx.account_key(3)?,
            voter_token_account: ctx.account_key(4)?,
        };
        require_keys_eq!(ctx.account_key(5)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.voter)?;
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.voter, true),
            AccountMeta::new_readonly(self.dao, false),
            AccountMeta::new(self.proposal, false),
            AccountMeta::new(self.vote, false),
            AccountMeta::new_readonly(self.voter_token_account, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(&self, vote_type: u8) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: self.to_account_metas(),
            data: QuadraticFundingInstruction::CastVote { vote_type }.data()?,
        })
    }
}
