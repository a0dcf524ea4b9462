//! Hand-history capture and replay.
//!
//! Two granularities: a step log with one snapshot per action, sufficient to
//! reconstruct the table at that instant, and one immutable [`RoundRecord`]
//! per finished round, kept in a ring capped at [`HISTORY_CAP`] entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::SplitHand;
use crate::result::{HandOutcome, RoundOutcome};
use crate::table::Action;

/// Maximum number of round records retained; the oldest are evicted first.
pub const HISTORY_CAP: usize = 200;

/// What a history step captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Initial deal.
    Deal,
    /// Player hit.
    Hit,
    /// Player stood.
    Stand,
    /// Player doubled down.
    Double,
    /// Player split a pair.
    Split,
    /// Player surrendered.
    Surrender,
    /// Insurance decision (side bet or decline).
    Insurance,
    /// Dealer drew a card.
    DealerDraw,
    /// Terminal result reached.
    Result,
}

/// Snapshot of the table after one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStep {
    /// The action that produced this snapshot.
    pub kind: StepKind,
    /// The player's cards at that instant.
    pub player_cards: Vec<Card>,
    /// The split hands at that instant.
    pub split_hands: Vec<SplitHand>,
    /// The dealer's cards at that instant.
    pub dealer_cards: Vec<Card>,
    /// Whether the dealer's hole card was visible.
    pub dealer_revealed: bool,
}

/// Immutable record of one finished round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Id issued by the session context.
    pub id: u64,
    /// Unix timestamp in milliseconds, taken at settlement.
    pub timestamp_ms: u64,
    /// The player's final cards (empty if the round was split).
    pub player_cards: Vec<Card>,
    /// The dealer's final cards.
    pub dealer_cards: Vec<Card>,
    /// Final split hands, if any.
    pub split_hands: Vec<SplitHand>,
    /// Ordered list of the actions taken.
    pub actions: Vec<Action>,
    /// Overall result of the round.
    pub result: RoundOutcome,
    /// Total chips paid back at settlement.
    pub payout: u64,
    /// Main bet (per split hand, if split).
    pub bet: u64,
    /// Insurance side bet (0 if none).
    pub insurance_bet: u64,
    /// Whether the round was split.
    pub was_split: bool,
    /// Per-hand outcomes for a split round.
    pub split_outcomes: Vec<HandOutcome>,
    /// The complete step log.
    pub steps: Vec<HistoryStep>,
}

/// Ring of finished-round records, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    records: VecDeque<RoundRecord>,
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: RoundRecord) {
        self.records.push_back(record);
        while self.records.len() > HISTORY_CAP {
            self.records.pop_front();
        }
    }

    /// Returns the number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RoundRecord> {
        self.records.get(index)
    }

    /// Returns the most recently settled round.
    #[must_use]
    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.back()
    }

    /// Iterates the retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }
}

/// Accumulates actions and steps while a round is in progress.
///
/// Doubles as the round-in-progress latch: opened at deal, consumed by the
/// first finalize, so a second finalize attempt finds nothing and no-ops.
#[derive(Debug, Clone, Default)]
pub(crate) struct RoundDraft {
    pub(crate) actions: Vec<Action>,
    pub(crate) steps: Vec<HistoryStep>,
}

/// Indexed traversal over one finished round's step log.
///
/// Pure cursor: forward or backward, finite, restartable, no live engine
/// required.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    record: &'a RoundRecord,
    position: usize,
}

impl<'a> Replay<'a> {
    /// Starts a replay at the first step of `record`.
    #[must_use]
    pub const fn new(record: &'a RoundRecord) -> Self {
        Self {
            record,
            position: 0,
        }
    }

    /// Number of steps in the record.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.record.steps.len()
    }

    /// Returns whether the record has no steps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record.steps.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The step under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&'a HistoryStep> {
        self.record.steps.get(self.position)
    }

    /// Advances the cursor and returns the step it lands on.
    pub fn forward(&mut self) -> Option<&'a HistoryStep> {
        if self.position + 1 < self.record.steps.len() {
            self.position += 1;
            self.current()
        } else {
            None
        }
    }

    /// Moves the cursor back and returns the step it lands on.
    pub fn back(&mut self) -> Option<&'a HistoryStep> {
        if self.position > 0 {
            self.position -= 1;
            self.current()
        } else {
            None
        }
    }

    /// Moves the cursor to `index` and returns the step there.
    pub fn seek(&mut self, index: usize) -> Option<&'a HistoryStep> {
        if index < self.record.steps.len() {
            self.position = index;
            self.current()
        } else {
            None
        }
    }

    /// Rewinds to the first step.
    pub const fn restart(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, steps: usize) -> RoundRecord {
        RoundRecord {
            id,
            timestamp_ms: 0,
            player_cards: Vec::new(),
            dealer_cards: Vec::new(),
            split_hands: Vec::new(),
            actions: Vec::new(),
            result: RoundOutcome::Win,
            payout: 0,
            bet: 0,
            insurance_bet: 0,
            was_split: false,
            split_outcomes: Vec::new(),
            steps: (0..steps)
                .map(|_| HistoryStep {
                    kind: StepKind::Hit,
                    player_cards: Vec::new(),
                    split_hands: Vec::new(),
                    dealer_cards: Vec::new(),
                    dealer_revealed: false,
                })
                .collect(),
        }
    }

    #[test]
    fn log_caps_at_200_evicting_oldest() {
        let mut log = HistoryLog::new();
        for id in 0..(HISTORY_CAP as u64 + 25) {
            log.push(record(id, 0));
        }

        assert_eq!(log.len(), HISTORY_CAP);
        assert_eq!(log.get(0).unwrap().id, 25);
        assert_eq!(log.latest().unwrap().id, HISTORY_CAP as u64 + 24);
    }

    #[test]
    fn replay_cursor_is_finite_and_restartable() {
        let record = record(1, 3);
        let mut replay = Replay::new(&record);

        assert_eq!(replay.position(), 0);
        assert!(replay.current().is_some());

        assert!(replay.forward().is_some());
        assert!(replay.forward().is_some());
        assert!(replay.forward().is_none());
        assert_eq!(replay.position(), 2);

        assert!(replay.back().is_some());
        assert_eq!(replay.position(), 1);

        replay.restart();
        assert_eq!(replay.position(), 0);

        assert!(replay.seek(2).is_some());
        assert!(replay.seek(3).is_none());
        assert_eq!(replay.position(), 2);
    }
}
