//! Multi-deck shoe with value-semantics draws and cut-card tracking.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::session::SessionContext;

/// A shuffled multi-deck card sequence, consumed from the end.
///
/// Draws never mutate a shared structure: [`Shoe::draw`] consumes the shoe
/// value and returns the remaining shoe alongside the card, which keeps the
/// in-sequence draws of several split hands unambiguous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
    total: usize,
    penetration: f64,
    cut_card_reached: bool,
}

impl Shoe {
    /// Builds and shuffles a fresh shoe of `decks` standard decks.
    #[must_use]
    pub fn new(decks: u8, penetration: f64, rng: &mut ChaCha8Rng) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        let total = cards.len();

        Self {
            cards,
            total,
            penetration,
            cut_card_reached: false,
        }
    }

    /// Builds a shoe from a fixed card sequence (drawn from the end).
    ///
    /// Intended for deterministic tests that stack the deal.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>, penetration: f64) -> Self {
        let total = cards.len();
        Self {
            cards,
            total,
            penetration,
            cut_card_reached: false,
        }
    }

    /// Draws the next card.
    ///
    /// Consumes the shoe and returns the card, carrying a freshly issued
    /// identity, together with the remaining shoe. Once the remaining count
    /// falls below `(1 - penetration) * total` the sticky cut-card flag is
    /// set; it survives until the shoe is replaced.
    ///
    /// # Panics
    ///
    /// Panics if the shoe is empty. Reshuffle is eager at deal time, so an
    /// empty draw is a precondition violation, never a recoverable state.
    #[must_use]
    pub fn draw(mut self, session: &mut SessionContext) -> (Card, Self) {
        let card = self
            .cards
            .pop()
            .expect("draw from an empty shoe; reshuffle is eager at deal time");
        let card = card.with_id(session.next_card_id());

        if !self.cut_card_reached {
            let threshold = (1.0 - self.penetration) * self.total as f64;
            if (self.cards.len() as f64) < threshold {
                self.cut_card_reached = true;
            }
        }

        (card, self)
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe has been fully consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the size the shoe was built with.
    #[must_use]
    pub const fn total_size(&self) -> usize {
        self.total
    }

    /// Returns whether the cut card has been reached.
    ///
    /// Sticky: once set, a fresh shoe must be built before the next deal.
    #[must_use]
    pub const fn cut_card_reached(&self) -> bool {
        self.cut_card_reached
    }
}
