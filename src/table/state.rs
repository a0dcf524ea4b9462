//! Phase and action types for the round state machine.

use serde::{Deserialize, Serialize};

/// Phase of the round state machine.
///
/// `Dealing`, `Doubling`, and `Surrendering` are pass-through phases the
/// engine resolves synchronously and never rests in; they are modeled so
/// that foreign snapshots carrying them are recognized as mid-hand on
/// restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing staged; a bet moves the table to `Betting`.
    Idle,
    /// Accepting bets for the next round.
    Betting,
    /// Initial cards going out.
    Dealing,
    /// Waiting for an action on the original hand.
    PlayerTurn,
    /// Waiting for an action on the active split hand.
    Splitting,
    /// Double down resolving.
    Doubling,
    /// Insurance side bet offered (dealer shows an Ace).
    InsuranceOffer,
    /// Surrender resolving.
    Surrendering,
    /// Dealer playing out their hand, one externally driven step at a time.
    DealerTurn,
    /// Settlement in progress.
    Resolving,
    /// Round finished; `NewRound` returns to `Betting`.
    GameOver,
}

impl Phase {
    /// Returns whether a snapshot saved in this phase left wagers in flight.
    ///
    /// A restored mid-hand phase is never resumed: the shoe's exact draw
    /// position cannot be trusted across a reload boundary, so the engine
    /// refunds the wagers and forces a safe betting phase instead.
    #[must_use]
    pub const fn is_mid_hand(self) -> bool {
        matches!(
            self,
            Self::Dealing
                | Self::PlayerTurn
                | Self::Splitting
                | Self::Doubling
                | Self::InsuranceOffer
                | Self::Surrendering
                | Self::DealerTurn
                | Self::Resolving
        )
    }
}

/// A requested transition, one variant per action with exactly the payload
/// that action needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Add chips to the staged bet.
    PlaceBet {
        /// Amount to add.
        amount: u64,
    },
    /// Clear the staged bet.
    ClearBet,
    /// Deal the initial cards.
    Deal,
    /// Draw a card for the active hand.
    Hit,
    /// Stand on the active hand.
    Stand,
    /// Double the bet for exactly one card.
    Double,
    /// Split the active pair into two hands.
    Split,
    /// Take (or, with zero, decline) the insurance side bet.
    Insure {
        /// Side bet amount; clamped to half the bet and available chips.
        amount: u64,
    },
    /// Forfeit half the bet and end the hand.
    Surrender,
    /// Clear the finished round and return to betting.
    NewRound,
    /// Reinitialize chips to `bankroll` and clear cumulative statistics.
    Reset {
        /// New bankroll.
        bankroll: u64,
    },
}
