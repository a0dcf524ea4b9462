//! Interfaces for external collaborators.
//!
//! The engine supplies inputs to these and never depends on their outputs:
//! the persistence medium, the basic-strategy advisor, and the achievement
//! evaluator all live with the host.

use crate::card::Card;
use crate::result::RoundOutcome;
use crate::session::Snapshot;
use crate::stats::{DetailedStats, Stats};

/// Opaque persistence for the session snapshot.
///
/// Any failure is treated as "no saved state": `load` returns `None` and the
/// engine falls back to a fresh table; errors never cross this boundary.
pub trait SnapshotStore {
    /// Persists the snapshot. Failures are swallowed by the implementation.
    fn save(&mut self, snapshot: &Snapshot);

    /// Loads the previously saved snapshot, or `None` if there is none or it
    /// is unreadable.
    fn load(&mut self) -> Option<Snapshot>;
}

/// Inputs for one basic-strategy lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceQuery {
    /// The cards of the hand awaiting a decision.
    pub player_cards: Vec<Card>,
    /// The dealer's face-up card.
    pub dealer_upcard: Option<Card>,
    /// Whether doubling is currently legal.
    pub can_double: bool,
    /// Whether splitting is currently legal.
    pub can_split: bool,
    /// Whether surrendering is currently legal.
    pub can_surrender: bool,
}

/// An action recommended by the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisedAction {
    /// Draw a card.
    Hit,
    /// Keep the hand.
    Stand,
    /// Double the bet for one card.
    Double,
    /// Split the pair.
    Split,
    /// Forfeit half the bet.
    Surrender,
}

/// Static basic-strategy lookup, consulted by callers, never by the engine.
pub trait StrategyAdvisor {
    /// Returns the recommended action for the query.
    fn advise(&self, query: &AdviceQuery) -> AdvisedAction;
}

/// Identifier of an unlockable achievement.
pub type AchievementId = u32;

/// Read-only consumer of post-settlement statistics.
pub trait AchievementEvaluator {
    /// Returns the ids newly unlocked by the last settled round.
    fn evaluate(
        &self,
        stats: &Stats,
        detailed: &DetailedStats,
        last_result: RoundOutcome,
    ) -> Vec<AchievementId>;
}
