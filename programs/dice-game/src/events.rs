use anchor_lang::prelude::*;

#[event]
pub struct BetPlaced {
    pub player: Pubkey,
    pub seed: u128,
    pub roll: u8,
    pub amount: u64,
    pub potential_payout: u64,
}

#[event]
pub struct BetResolved {
    pub player: Pubkey,
    pub seed: u128,
    pub roll: u8,
    pub roll_result: u8,
    pub payout: u64,
}

#[event]
pub struct BetRefunded {
    pub player: Pubkey,
    pub seed: u128,
    pub amount: u64,
}
