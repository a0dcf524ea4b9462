//! Pure payout arithmetic.
//!
//! Every function returns the amount credited back to the player's chips at
//! settlement; bets are debited when placed, so a losing hand simply pays 0.

/// Payout for a winning hand: the bet back plus even money.
#[must_use]
pub const fn win(bet: u64) -> u64 {
    bet * 2
}

/// Payout for a natural blackjack: the bet back plus `bet * ratio`, rounded
/// down.
#[must_use]
pub fn blackjack(bet: u64, ratio: f64) -> u64 {
    bet + ((bet as f64) * ratio).floor() as u64
}

/// Payout for a push: the bet returned.
#[must_use]
pub const fn push(bet: u64) -> u64 {
    bet
}

/// Payout for a winning insurance side bet: the side bet back plus 2:1.
#[must_use]
pub const fn insurance(side_bet: u64) -> u64 {
    side_bet * 3
}

/// Refund for a surrendered hand: half the bet is forfeited, rounded down.
#[must_use]
pub const fn surrender_refund(bet: u64) -> u64 {
    bet - bet / 2
}

/// Largest insurance side bet allowed against a main bet.
#[must_use]
pub const fn max_insurance(bet: u64) -> u64 {
    bet / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackjack_ratios() {
        assert_eq!(blackjack(100, 1.5), 250);
        assert_eq!(blackjack(100, 1.2), 220);
        // Odd bet rounds the bonus down.
        assert_eq!(blackjack(5, 1.5), 12);
    }

    #[test]
    fn surrender_forfeits_half_rounded_down() {
        assert_eq!(surrender_refund(100), 50);
        assert_eq!(surrender_refund(101), 51);
        assert_eq!(surrender_refund(1), 1);
    }

    #[test]
    fn insurance_pays_two_to_one() {
        assert_eq!(insurance(50), 150);
        assert_eq!(max_insurance(101), 50);
    }
}
