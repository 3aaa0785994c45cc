use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use ledger_runtime::{InstructionContext, Program};

// Import modules
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

// Re-export for convenience
pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("95dAZ5mQPNaBQpzuZ2rUiVjsgxuarF7GqBLKrVHcNg6q");

/// Instruction data accepted by the quadratic-funding program
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub enum QuadraticFundingInstruction {
    InitDao { name: String },
    InitProposal { metadata: String },
    /// 0 = no, 1 = yes
    CastVote { vote_type: u8 },
    FinalizeProposal,
}

impl QuadraticFundingInstruction {
    pub fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotSerialize))?;
        Ok(data)
    }
}

/// The quadratic-funding program as the ledger runs it
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadraticFunding;

impl Program for QuadraticFunding {
    fn id(&self) -> Pubkey {
        crate::ID
    }

    fn process(&self, ctx: &mut InstructionContext<'_>, data: &[u8]) -> Result<()> {
        let instruction = QuadraticFundingInstruction::try_from_slice(data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotDeserialize))?;

        match instruction {
            QuadraticFundingInstruction::InitDao { name } => {
                msg!("Instruction: InitDao");
                instructions::init_dao::handler(ctx, name)
            }
            QuadraticFundingInstruction::InitProposal { metadata } => {
                msg!("Instruction: InitProposal");
                instructions::init_proposal::handler(ctx, metadata)
            }
            QuadraticFundingInstruction::CastVote { vote_type } => {
                msg!("Instruction: CastVote");
                instructions::cast_vote::handler(ctx, vote_type)
            }
            QuadraticFundingInstruction::FinalizeProposal => {
                msg!("Instruction: FinalizeProposal");
                instructions::finalize_proposal::handler(ctx)
            }
        }
    }
}
