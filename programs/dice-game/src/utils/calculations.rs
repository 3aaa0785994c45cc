// utils/calculations.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::DiceError;

/// Gross payout of a winning bet.
///
/// `amount * 100 / roll`, less `house_edge_bps`, rounded down. With a zero
/// edge a roll-50 bet pays exactly double.
pub fn calculate_payout(amount: u64, roll: u8, house_edge_bps: u16) -> Result<u64> {
    require!(roll > 0, DiceError::InvalidRoll);
    require!(house_edge_bps < BASIS_POINTS, DiceError::InvalidHouseEdge);

    let payout = (amount as u128)
        .checked_mul((BASIS_POINTS - house_edge_bps) as u128)
        .ok_or(DiceError::Overflow)?
        .checked_mul(ROLL_RANGE as u128)
        .ok_or(DiceError::Overflow)?
        .checked_div(roll as u128 * BASIS_POINTS as u128)
        .ok_or(DiceError::Overflow)?;

    u64::try_from(payout).map_err(|_| error!(DiceError::Overflow))
}

/// Whether `roll_result` beats a bet on `roll`
pub fn is_winning_roll(roll_result: u8, roll: u8) -> bool {
    roll_result < roll
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_edge_pays_inverse_of_probability() {
        assert_eq!(calculate_payout(1_000_000_000, 50, 0).unwrap(), 2_000_000_000);
        assert_eq!(calculate_payout(1_000_000_000, 25, 0).unwrap(), 4_000_000_000);
        assert_eq!(calculate_payout(1_000, 1, 0).unwrap(), 100_000);
        // floor division
        assert_eq!(calculate_payout(100, 99, 0).unwrap(), 101);
    }

    #[test]
    fn house_edge_is_deducted() {
        // 2x less 1.5%
        assert_eq!(
            calculate_payout(1_000_000_000, 50, DEFAULT_HOUSE_EDGE_BPS).unwrap(),
            1_970_000_000
        );
    }

    #[test]
    fn payout_shrinks_as_threshold_grows() {
        let payouts: Vec<u64> = (MIN_ROLL..=MAX_ROLL)
            .map(|roll| calculate_payout(1_000_000, roll, DEFAULT_HOUSE_EDGE_BPS).unwrap())
            .collect();

        assert!(payouts.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn huge_wager_overflows_u64_payout() {
        assert!(calculate_payout(u64::MAX, 1, 0).is_err());
    }

    #[test]
    fn zero_roll_and_full_edge_are_rejected() {
        assert!(calculate_payout(100, 0, 0).is_err());
        assert!(calculate_payout(100, 50, BASIS_POINTS).is_err());
    }

    #[test]
    fn strictly_below_threshold_wins() {
        assert!(is_winning_roll(49, 50));
        assert!(!is_winning_roll(50, 50));
        assert!(is_winning_roll(0, 1));
        assert!(!is_winning_roll(99, 99));
    }
}
