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

declare_id!("4pap8zT3Toz7yaDovUU3aiTi3jhoADGPGLP4LhLBZLVV");

/// Instruction data accepted by the dice program
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub enum DiceInstruction {
    /// Create the house state and seed the vault
    Initialize { amount: u64 },
    /// Wager `amount` that the roll lands below `roll`
    PlaceBet { seed: u128, roll: u8, amount: u64 },
    /// Settle a bet with the house signature over it
    ResolveBet { sig: [u8; 64] },
    RefundBet,
    Deposit { amount: u64 },
    Withdraw { amount: u64 },
    SetHouseEdge { house_edge_bps: u16 },
}

impl DiceInstruction {
    pub fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotSerialize))?;
        Ok(data)
    }
}

/// The dice program as the ledger runs it
pub struct DiceGame {
    roll_source: Box<dyn RollSource>,
}

impl Default for DiceGame {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceGame {
    pub fn new() -> Self {
        Self::with_roll_source(SignatureHashRoll)
    }

    pub fn with_roll_source<R: RollSource + 'static>(roll_source: R) -> Self {
        Self {
            roll_source: Box::new(roll_source),
        }
    }
}

impl Program for DiceGame {
    fn id(&self) -> Pubkey {
        crate::ID
    }

    fn process(&self, ctx: &mut InstructionContext<'_>, data: &[u8]) -> Result<()> {
        let instruction = DiceInstruction::try_from_slice(data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotDeserialize))?;

        match instruction {
            DiceInstruction::Initialize { amount } => {
                msg!("Instruction: Initialize");
                instructions::initialize::handler(ctx, amount)
            }
            DiceInstruction::PlaceBet { seed, roll, amount } => {
                msg!("Instruction: PlaceBet");
                instructions::place_bet::handler(ctx, seed, roll, amount)
            }
            DiceInstruction::ResolveBet { sig } => {
                msg!("Instruction: ResolveBet");
                instructions::resolve_bet::handler(ctx, sig, self.roll_source.as_ref())
            }
            DiceInstruction::RefundBet => {
                msg!("Instruction: RefundBet");
                instructions::refund_bet::handler(ctx)
            }
            DiceInstruction::Deposit { amount } => {
                msg!("Instruction: Deposit");
                instructions::admin::deposit(ctx, amount)
            }
            DiceInstruction::Withdraw { amount } => {
                msg!("Instruction: Withdraw");
                instructions::admin::withdraw(ctx, amount)
            }
            DiceInstruction::SetHouseEdge { house_edge_bps } => {
                msg!("Instruction: SetHouseEdge");
                instructions::admin::set_house_edge(ctx, house_edge_bps)
            }
        }
    }
}
