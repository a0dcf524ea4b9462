//! Outcome types recorded at settlement.

use serde::{Deserialize, Serialize};

/// Outcome of a single hand measured against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// Dealer busted or the hand scored strictly higher.
    Win,
    /// Hand busted or the dealer scored strictly higher.
    Lose,
    /// Equal scores.
    Push,
}

/// Overall result of a finished round.
///
/// For a split round this compares total payout to total wagered across all
/// split hands; a natural on the original deal is recorded as `Blackjack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The original two-card hand was a natural 21.
    Blackjack,
    /// Net chips up for the round.
    Win,
    /// Net chips even for the round.
    Push,
    /// Net chips down for the round (includes surrender).
    Lose,
}

impl RoundOutcome {
    /// Returns whether the round counts as won for the statistics.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}
