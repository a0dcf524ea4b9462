//! Table configuration options.

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use twentyone::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(6)
///     .with_blackjack_pays(1.5)
///     .with_dealer_hits_soft_17(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before the cut card forces a reshuffle.
    pub penetration: f64,
    /// Dealer stands once their score reaches this value (normally 17).
    pub dealer_stand_threshold: u8,
    /// Whether the dealer hits a soft 17.
    pub dealer_hits_soft_17: bool,
    /// Blackjack payout ratio (1.5 for 3:2 tables, 1.2 for 6:5 tables).
    pub blackjack_pays: f64,
    /// Whether double down is allowed on split hands.
    pub double_after_split: bool,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Maximum number of split hands per round.
    pub max_split_hands: usize,
    /// Chips the player starts (and resets) with.
    pub starting_bankroll: u64,
    /// Whether any two ten-value cards may be split, not just equal ranks.
    pub split_any_ten: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.75,
            dealer_stand_threshold: 17,
            dealer_hits_soft_17: false,
            blackjack_pays: 1.5,
            double_after_split: true,
            surrender: true,
            max_split_hands: 4,
            starting_bankroll: 1000,
            split_any_ten: false,
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// ```
    /// use twentyone::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(8);
    /// assert_eq!(options.decks, 8);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration (fraction dealt before reshuffle).
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the dealer's stand threshold.
    #[must_use]
    pub const fn with_dealer_stand_threshold(mut self, threshold: u8) -> Self {
        self.dealer_stand_threshold = threshold;
        self
    }

    /// Sets whether the dealer hits a soft 17.
    ///
    /// ```
    /// use twentyone::TableOptions;
    ///
    /// let options = TableOptions::default().with_dealer_hits_soft_17(true);
    /// assert!(options.dealer_hits_soft_17);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets whether double down is allowed after a split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets the maximum number of split hands.
    #[must_use]
    pub const fn with_max_split_hands(mut self, max: usize) -> Self {
        self.max_split_hands = max;
        self
    }

    /// Sets the starting bankroll.
    #[must_use]
    pub const fn with_starting_bankroll(mut self, chips: u64) -> Self {
        self.starting_bankroll = chips;
        self
    }

    /// Sets whether mixed ten-value pairs may be split.
    ///
    /// ```
    /// use twentyone::TableOptions;
    ///
    /// let options = TableOptions::default().with_split_any_ten(true);
    /// assert!(options.split_any_ten);
    /// ```
    #[must_use]
    pub const fn with_split_any_ten(mut self, allowed: bool) -> Self {
        self.split_any_ten = allowed;
        self
    }
}
