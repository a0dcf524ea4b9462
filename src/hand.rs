//! Hand scoring and hand containers.

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::result::HandOutcome;

fn evaluate(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        value = value.saturating_add(card.rank.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// Computes the blackjack score of a card sequence.
///
/// Aces are counted as 11 until the total exceeds 21, then reduced to 1 one
/// at a time.
#[must_use]
pub fn score(cards: &[Card]) -> u8 {
    evaluate(cards).0
}

/// Returns whether a card sequence is soft (an Ace currently counts as 11).
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate(cards).1
}

/// Returns whether a card sequence is a natural blackjack (exactly two cards
/// totaling 21).
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == 21
}

/// An ordered sequence of cards.
///
/// The score is always recomputed from the current cards, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand from an existing card sequence.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Adds a card to the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        score(&self.cards)
    }

    /// Returns whether the hand is soft (contains an Ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns whether the hand is a natural blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is bust (over 21).
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > 21
    }

    /// Returns whether the hand is a splittable pair.
    ///
    /// Split requires identical rank; a mixed ten-value pair (ten and jack)
    /// only qualifies when `any_ten` is set.
    #[must_use]
    pub fn is_pair(&self, any_ten: bool) -> bool {
        match self.cards.as_slice() {
            [a, b] => {
                a.rank == b.rank || (any_ten && a.rank.is_ten_value() && b.rank.is_ten_value())
            }
            _ => false,
        }
    }

    /// Returns the first (face-up) card.
    #[must_use]
    pub fn upcard(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Removes and returns both cards of a pair (for splitting).
    pub(crate) fn take_pair(&mut self) -> Option<(Card, Card)> {
        if self.cards.len() == 2 {
            let second = self.cards.pop()?;
            let first = self.cards.pop()?;
            Some((first, second))
        } else {
            None
        }
    }
}

/// One hand of a split pair: its own cards, bet, and terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitHand {
    /// Cards in the hand.
    pub hand: Hand,
    /// Bet riding on this hand.
    pub bet: u64,
    /// Outcome, set at settlement (or at bust).
    pub result: Option<HandOutcome>,
    /// Whether the hand has stood and takes no further action.
    pub stood: bool,
}

impl SplitHand {
    /// Creates a split hand seeded with one card of the original pair.
    #[must_use]
    pub fn seeded(card: Card, bet: u64) -> Self {
        let mut hand = Hand::new();
        hand.push(card);
        Self {
            hand,
            bet,
            result: None,
            stood: false,
        }
    }

    /// Returns whether the hand can still win against the dealer.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.hand.is_bust()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    const fn card(rank: Rank) -> Card {
        Card::new(Suit::Hearts, rank)
    }

    #[test]
    fn ace_reduction_keeps_score_under_21_when_possible() {
        // A + A + 9 = 11 + 11 + 9 -> 11 + 1 + 9 = 21
        let cards = [card(Rank::Ace), card(Rank::Ace), card(Rank::Nine)];
        assert_eq!(score(&cards), 21);
        assert!(is_soft(&cards));

        // A + A + K = 11 + 11 + 10 -> 1 + 1 + 10 = 12
        let cards = [card(Rank::Ace), card(Rank::Ace), card(Rank::King)];
        assert_eq!(score(&cards), 12);
        assert!(!is_soft(&cards));
    }

    #[test]
    fn hard_hand_keeps_unreduced_sum() {
        let cards = [card(Rank::King), card(Rank::Queen), card(Rank::Five)];
        assert_eq!(score(&cards), 25);
        assert!(!is_soft(&cards));
    }

    #[test]
    fn blackjack_requires_two_cards_and_21() {
        assert!(is_blackjack(&[card(Rank::Ace), card(Rank::King)]));
        assert!(!is_blackjack(&[
            card(Rank::Seven),
            card(Rank::Seven),
            card(Rank::Seven)
        ]));
        assert!(!is_blackjack(&[card(Rank::Ten), card(Rank::Nine)]));
    }

    #[test]
    fn mixed_ten_value_pair_split_eligibility() {
        let mut hand = Hand::new();
        hand.push(card(Rank::Ten));
        hand.push(card(Rank::Jack));

        assert!(!hand.is_pair(false));
        assert!(hand.is_pair(true));

        let mut same = Hand::new();
        same.push(card(Rank::Jack));
        same.push(card(Rank::Jack));
        assert!(same.is_pair(false));
    }

    #[test]
    fn take_pair_empties_the_hand() {
        let mut hand = Hand::new();
        hand.push(card(Rank::Eight));
        hand.push(card(Rank::Eight));

        let (a, b) = hand.take_pair().unwrap();
        assert_eq!(a.rank, Rank::Eight);
        assert_eq!(b.rank, Rank::Eight);
        assert!(hand.is_empty());
    }
}
