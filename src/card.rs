//! Card types and deck constants.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits, in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

impl Rank {
    /// All thirteen ranks, in deck order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Blackjack value of the rank.
    ///
    /// Number cards count face value, face cards count 10, and an Ace counts
    /// 11 until soft-ace reduction brings the hand back under 21.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Ace => 11,
        }
    }

    /// Returns whether the rank carries value 10 (ten or any face card).
    #[must_use]
    pub const fn is_ten_value(self) -> bool {
        matches!(self, Self::Ten | Self::Jack | Self::Queen | Self::King)
    }
}

/// Process-lifetime unique card identity.
///
/// Issued by the session context when a card leaves the shoe. The id exists
/// for disambiguation (history snapshots, rendering), never for game logic.
pub type CardId = u64;

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
    /// Unique identity assigned when the card was drawn (0 before then).
    pub id: CardId,
}

impl Card {
    /// Creates a new card with no identity assigned.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, id: 0 }
    }

    /// Returns this card with its drawn identity set.
    #[must_use]
    pub(crate) const fn with_id(mut self, id: CardId) -> Self {
        self.id = id;
        self
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
