//! Session-scoped counters, RNG, and the persisted snapshot container.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};
use crate::hand::SplitHand;
use crate::result::RoundOutcome;
use crate::shoe::Shoe;
use crate::stats::{DetailedStats, Stats};
use crate::table::Phase;

/// Mutable context owned by one table session.
///
/// Card identities and history ids come from counters held here, passed and
/// returned explicitly, so independent sessions (and tests) never
/// cross-contaminate through ambient global state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    next_card_id: CardId,
    next_round_id: u64,
    rng: ChaCha8Rng,
}

impl SessionContext {
    /// Creates a session context with a deterministic seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            next_card_id: 1,
            next_round_id: 1,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Issues the next card identity.
    pub(crate) const fn next_card_id(&mut self) -> CardId {
        let id = self.next_card_id;
        self.next_card_id += 1;
        id
    }

    /// Issues the next history entry id.
    pub(crate) const fn next_round_id(&mut self) -> u64 {
        let id = self.next_round_id;
        self.next_round_id += 1;
        id
    }

    /// The session RNG (shoe shuffles).
    pub(crate) const fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Advances the card-id counter past ids already present in restored
    /// state, keeping identities unique across a reload boundary.
    pub(crate) const fn resume_card_ids_after(&mut self, highest: CardId) {
        if self.next_card_id <= highest {
            self.next_card_id = highest + 1;
        }
    }

    /// Advances the history-id counter past ids already present in a
    /// restored history log.
    pub(crate) const fn resume_round_ids_after(&mut self, highest: u64) {
        if self.next_round_id <= highest {
            self.next_round_id = highest + 1;
        }
    }
}

/// The persisted shape of a table session.
///
/// The container is opaque to the engine: the host serializes it with
/// whatever medium it likes and hands it back on restore. Restoring a
/// mid-hand phase does not resume the hand; see
/// [`Table::from_snapshot`](crate::Table::from_snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Player chip count.
    pub chips: u64,
    /// Headline statistics.
    pub stats: Stats,
    /// Detailed statistics.
    pub detailed_stats: DetailedStats,
    /// Bet in flight (or staged, in the betting phase).
    pub bet: u64,
    /// Phase the session was saved in.
    pub phase: Phase,
    /// The player's cards.
    pub player_cards: Vec<Card>,
    /// The dealer's cards.
    pub dealer_cards: Vec<Card>,
    /// The remaining shoe.
    pub shoe: Shoe,
    /// Whether the dealer's hole card was revealed.
    pub dealer_revealed: bool,
    /// Result of the last settled round, if any.
    pub result: Option<RoundOutcome>,
    /// Last user-facing table message.
    pub message: String,
    /// Insurance side bet in flight.
    pub insurance_bet: u64,
    /// Split hands in flight.
    pub split_hands: Vec<SplitHand>,
    /// Index of the split hand awaiting action.
    pub active_split: usize,
    /// Whether the round was split.
    pub was_split: bool,
    /// Size the shoe was built with.
    pub shoe_size: usize,
    /// Whether the cut card has been reached.
    pub cut_card_reached: bool,
}

impl Snapshot {
    /// The highest card identity present anywhere in the snapshot.
    #[must_use]
    pub(crate) fn highest_card_id(&self) -> CardId {
        self.player_cards
            .iter()
            .chain(self.dealer_cards.iter())
            .chain(self.split_hands.iter().flat_map(|s| s.hand.cards().iter()))
            .map(|card| card.id)
            .max()
            .unwrap_or(0)
    }
}
