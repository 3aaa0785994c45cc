// utils/calculations.rs

/// Credits a voter holding `token_amount` raw token units may cast.
///
/// Quadratic voting: influence grows with the floor of the square root of
/// holdings, so 100_000_000 units buy 10_000 credits.
pub fn calculate_vote_credits(token_amount: u64) -> u64 {
    token_amount.isqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_credits_for_small_holdings() {
        let expected = [0, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3];
        for (amount, credits) in expected.iter().enumerate() {
            assert_eq!(calculate_vote_credits(amount as u64), *credits, "amount {amount}");
        }
    }

    #[test]
    fn vote_credits_floor_around_perfect_squares() {
        for root in [10u64, 255, 65_535, 1_000_000, 3_037_000_499] {
            assert_eq!(calculate_vote_credits(root * root), root);
            assert_eq!(calculate_vote_credits(root * root - 1), root - 1);
            assert_eq!(calculate_vote_credits(root * root + 1), root);
        }
    }

    #[test]
    fn vote_credits_of_max_supply() {
        assert_eq!(calculate_vote_credits(u64::MAX), u32::MAX as u64);
    }

    #[test]
    fn vote_credits_are_square_root_of_raw_amount() {
        assert_eq!(calculate_vote_credits(100_000_000), 10_000);
        assert_eq!(calculate_vote_credits(99), 9);
        assert_eq!(calculate_vote_credits(0), 0);
    }
}
