//! Error types for table operations.

use thiserror::Error;

/// Why an action request was rejected.
///
/// A rejected action is a strict no-op: the table is left untouched, so an
/// `Err` is exactly the caller's signal that nothing changed. Rejections are
/// never partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not legal in the current phase.
    #[error("action is not legal in the current phase")]
    IllegalPhase,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// No bet has been placed.
    #[error("no bet has been placed")]
    NoBet,
    /// The request exceeds the available chips.
    #[error("insufficient chips")]
    InsufficientChips,
    /// The hand is not eligible to double down.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// The hand is not a splittable pair.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The split-hand limit has been reached.
    #[error("maximum split hands reached")]
    MaxSplitsReached,
    /// The hand is not eligible to surrender.
    #[error("cannot surrender at this point")]
    CannotSurrender,
}
