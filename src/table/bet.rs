use tracing::debug;

use crate::card::Rank;
use crate::error::ActionError;
use crate::history::{RoundDraft, StepKind};
use crate::shoe::Shoe;

use super::{Action, Phase, Table};

impl Table {
    /// Adds `amount` to the staged bet.
    ///
    /// # Errors
    ///
    /// Rejected outside the idle/betting phases, for a zero amount, or when
    /// the amount exceeds the chips not already staged.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), ActionError> {
        if !matches!(self.round.phase, Phase::Idle | Phase::Betting) {
            return Err(ActionError::IllegalPhase);
        }
        if amount == 0 {
            return Err(ActionError::ZeroBet);
        }
        if amount > self.round.chips - self.round.bet {
            return Err(ActionError::InsufficientChips);
        }

        self.round.bet += amount;
        self.round.phase = Phase::Betting;
        Ok(())
    }

    /// Clears the staged bet.
    ///
    /// # Errors
    ///
    /// Rejected outside the betting phase.
    pub fn clear_bet(&mut self) -> Result<(), ActionError> {
        if self.round.phase != Phase::Betting {
            return Err(ActionError::IllegalPhase);
        }

        self.round.bet = 0;
        Ok(())
    }

    /// Deals the initial cards and resolves naturals synchronously.
    ///
    /// A fresh shoe is built first when the previous one is empty or its cut
    /// card was reached; the bet is debited immediately. Both naturals push;
    /// a player natural settles at the blackjack ratio; a dealer Ace upcard
    /// offers insurance; otherwise play passes to the player.
    ///
    /// # Errors
    ///
    /// Rejected outside the betting phase or with no bet staged.
    pub fn deal(&mut self) -> Result<(), ActionError> {
        if self.round.phase != Phase::Betting {
            return Err(ActionError::IllegalPhase);
        }
        if self.round.bet == 0 {
            return Err(ActionError::NoBet);
        }

        // Eager reshuffle: the one place a shoe is ever replaced mid-session,
        // which is what makes an empty draw later a programming error.
        if self.round.shoe.is_empty() || self.round.shoe.cut_card_reached() {
            debug!(
                remaining = self.round.shoe.remaining(),
                "building a fresh shoe"
            );
            self.round.shoe = Shoe::new(
                self.options.decks,
                self.options.penetration,
                self.session.rng(),
            );
        }

        let bet = self.round.bet;
        self.round.player.clear();
        self.round.dealer.clear();
        self.round.split_hands.clear();
        self.round.active_split = 0;
        self.round.was_split = false;
        self.round.insurance_bet = 0;
        self.round.dealer_revealed = false;
        self.round.result = None;
        self.round.message.clear();

        self.round.chips -= bet;
        self.round.detailed.total_wagered += bet;
        self.round.phase = Phase::Dealing;

        // Opens the round-in-progress latch.
        self.draft = Some(RoundDraft::default());
        self.record_action(Action::Deal);

        for _ in 0..2 {
            let card = self.draw_card();
            self.round.player.push(card);
            let card = self.draw_card();
            self.round.dealer.push(card);
        }
        self.record_step(StepKind::Deal);

        let player_natural = self.round.player.is_blackjack();
        let dealer_ace_up = self
            .round
            .dealer
            .upcard()
            .is_some_and(|card| card.rank == Rank::Ace);

        if player_natural {
            // Push against a dealer natural, blackjack payout otherwise;
            // settle_round distinguishes the two.
            self.settle_round();
        } else if dealer_ace_up {
            self.round.phase = Phase::InsuranceOffer;
        } else {
            self.round.phase = Phase::PlayerTurn;
        }

        Ok(())
    }
}
