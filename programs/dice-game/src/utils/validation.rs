use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::DiceError;

/// Validate roll threshold
pub fn validate_roll(roll: u8) -> Result<()> {
    if !(MIN_ROLL..=MAX_ROLL).contains(&roll) {
        return Err(DiceError::InvalidRoll.into());
    }
    Ok(())
}

/// Validate wager against the minimum bet
pub fn validate_bet_amount(amount: u64) -> Result<()> {
    if amount < MIN_BET_LAMPORTS {
        return Err(DiceError::MinimumBet.into());
    }
    Ok(())
}

pub fn validate_house_edge(house_edge_bps: u16) -> Result<()> {
    if house_edge_bps >= BASIS_POINTS {
        return Err(DiceError::InvalidHouseEdge.into());
    }
    Ok(())
}
