use crate::card::{Card, Rank};
use crate::error::ActionError;
use crate::hand::SplitHand;
use crate::history::StepKind;
use crate::payout;
use crate::result::{HandOutcome, RoundOutcome};

use super::{Action, Phase, Table};

impl Table {
    /// Draws one card for the active hand.
    ///
    /// Bust ends the hand as a loss: a solo hand proceeds straight to
    /// settlement, a split hand passes play onward. A score of exactly 21
    /// auto-stands.
    ///
    /// # Errors
    ///
    /// Rejected unless it is the player's turn on a live hand.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        match self.round.phase {
            Phase::PlayerTurn => {
                let card = self.draw_card();
                self.round.player.push(card);
                self.record_action(Action::Hit);
                self.record_step(StepKind::Hit);

                let score = self.round.player.score();
                if score > 21 {
                    self.settle_round();
                } else if score == 21 {
                    self.begin_dealer_turn();
                }
                Ok(card)
            }
            Phase::Splitting => {
                let card = self.draw_card();
                let index = self.round.active_split;
                self.round.split_hands[index].hand.push(card);

                let score = self.round.split_hands[index].hand.score();
                if score > 21 {
                    let hand = &mut self.round.split_hands[index];
                    hand.result = Some(HandOutcome::Lose);
                    hand.stood = true;
                } else if score == 21 {
                    self.round.split_hands[index].stood = true;
                }

                self.record_action(Action::Hit);
                self.record_step(StepKind::Hit);
                if score >= 21 {
                    self.advance_split();
                }
                Ok(card)
            }
            _ => Err(ActionError::IllegalPhase),
        }
    }

    /// Stands on the active hand.
    ///
    /// Solo: reveals the dealer and begins dealer play. Split: passes play
    /// to the next hand, or to the dealer after the last one — all split
    /// hands then resolve against the one dealer outcome.
    ///
    /// # Errors
    ///
    /// Rejected unless it is the player's turn on a live hand.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        match self.round.phase {
            Phase::PlayerTurn => {
                self.record_action(Action::Stand);
                self.begin_dealer_turn();
                self.record_step(StepKind::Stand);
                Ok(())
            }
            Phase::Splitting => {
                self.round.split_hands[self.round.active_split].stood = true;
                self.record_action(Action::Stand);
                self.record_step(StepKind::Stand);
                self.advance_split();
                Ok(())
            }
            _ => Err(ActionError::IllegalPhase),
        }
    }

    /// Doubles the bet on the active two-card hand for exactly one card.
    ///
    /// # Errors
    ///
    /// Rejected unless the hand holds exactly two cards, chips cover the
    /// extra bet, and (for a split hand) the table allows doubling after a
    /// split.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        match self.round.phase {
            Phase::PlayerTurn => {
                if self.round.player.len() != 2 {
                    return Err(ActionError::CannotDouble);
                }
                let extra = self.round.bet;
                if self.round.chips < extra {
                    return Err(ActionError::InsufficientChips);
                }

                self.round.chips -= extra;
                self.round.bet *= 2;
                self.round.detailed.total_wagered += extra;
                self.round.detailed.doubles += 1;

                let card = self.draw_card();
                self.round.player.push(card);
                self.record_action(Action::Double);
                self.record_step(StepKind::Double);

                if self.round.player.is_bust() {
                    self.settle_round();
                } else {
                    self.begin_dealer_turn();
                }
                Ok(card)
            }
            Phase::Splitting => {
                if !self.options.double_after_split {
                    return Err(ActionError::CannotDouble);
                }
                let index = self.round.active_split;
                if self.round.split_hands[index].hand.len() != 2 {
                    return Err(ActionError::CannotDouble);
                }
                let extra = self.round.split_hands[index].bet;
                if self.round.chips < extra {
                    return Err(ActionError::InsufficientChips);
                }

                self.round.chips -= extra;
                self.round.detailed.total_wagered += extra;
                self.round.detailed.doubles += 1;

                let card = self.draw_card();
                let hand = &mut self.round.split_hands[index];
                hand.bet *= 2;
                hand.hand.push(card);
                if hand.hand.is_bust() {
                    hand.result = Some(HandOutcome::Lose);
                }
                hand.stood = true;

                self.record_action(Action::Double);
                self.record_step(StepKind::Double);
                self.advance_split();
                Ok(card)
            }
            _ => Err(ActionError::IllegalPhase),
        }
    }

    /// Splits the active pair into two independently bet hands.
    ///
    /// Each new hand keeps one card of the pair and draws one fresh card. A
    /// pair of Aces gets exactly one card per hand and auto-stands, with the
    /// round proceeding straight to dealer play; that rule applies uniformly
    /// to every re-split of Aces.
    ///
    /// # Errors
    ///
    /// Rejected unless the active hand is a splittable pair, chips cover the
    /// extra bet, and the split-hand limit has not been reached.
    pub fn split(&mut self) -> Result<(), ActionError> {
        match self.round.phase {
            Phase::PlayerTurn => {
                if !self.round.player.is_pair(self.options.split_any_ten) {
                    return Err(ActionError::CannotSplit);
                }
                if self.options.max_split_hands < 2 {
                    return Err(ActionError::MaxSplitsReached);
                }
                let bet = self.round.bet;
                if self.round.chips < bet {
                    return Err(ActionError::InsufficientChips);
                }

                self.round.chips -= bet;
                self.round.detailed.total_wagered += bet;
                self.round.detailed.splits += 1;

                let is_aces = self.round.player.cards()[0].rank == Rank::Ace;
                let (first, second) = self
                    .round
                    .player
                    .take_pair()
                    .expect("pair was checked above");

                let mut left = SplitHand::seeded(first, bet);
                let card = self.draw_card();
                left.hand.push(card);

                let mut right = SplitHand::seeded(second, bet);
                let card = self.draw_card();
                right.hand.push(card);

                mark_auto_stands(&mut left, is_aces);
                mark_auto_stands(&mut right, is_aces);

                self.round.split_hands.push(left);
                self.round.split_hands.push(right);
                self.round.was_split = true;
                self.round.active_split = 0;

                self.record_action(Action::Split);
                self.record_step(StepKind::Split);
                self.advance_split();
                Ok(())
            }
            Phase::Splitting => {
                let index = self.round.active_split;
                if !self.round.split_hands[index]
                    .hand
                    .is_pair(self.options.split_any_ten)
                {
                    return Err(ActionError::CannotSplit);
                }
                if self.round.split_hands.len() >= self.options.max_split_hands {
                    return Err(ActionError::MaxSplitsReached);
                }
                let bet = self.round.split_hands[index].bet;
                if self.round.chips < bet {
                    return Err(ActionError::InsufficientChips);
                }

                self.round.chips -= bet;
                self.round.detailed.total_wagered += bet;
                self.round.detailed.splits += 1;

                let is_aces = self.round.split_hands[index].hand.cards()[0].rank == Rank::Ace;
                let (first, second) = self.round.split_hands[index]
                    .hand
                    .take_pair()
                    .expect("pair was checked above");

                self.round.split_hands[index].hand.push(first);
                let card = self.draw_card();
                self.round.split_hands[index].hand.push(card);
                mark_auto_stands(&mut self.round.split_hands[index], is_aces);

                let mut fresh = SplitHand::seeded(second, bet);
                let card = self.draw_card();
                fresh.hand.push(card);
                mark_auto_stands(&mut fresh, is_aces);

                self.round.split_hands.insert(index + 1, fresh);

                self.record_action(Action::Split);
                self.record_step(StepKind::Split);
                self.advance_split();
                Ok(())
            }
            _ => Err(ActionError::IllegalPhase),
        }
    }

    /// Forfeits half the bet (rounded down) and ends the hand.
    ///
    /// Only available on the original two cards, never after a split. An
    /// insurance side bet in flight is forfeited with the hand.
    ///
    /// # Errors
    ///
    /// Rejected unless surrender is enabled and the original two-card hand
    /// is awaiting its first action.
    pub fn surrender(&mut self) -> Result<u64, ActionError> {
        if self.round.phase != Phase::PlayerTurn {
            return Err(ActionError::IllegalPhase);
        }
        if !self.options.surrender || self.round.player.len() != 2 || self.round.was_split {
            return Err(ActionError::CannotSurrender);
        }

        let refund = payout::surrender_refund(self.round.bet);
        self.round.chips += refund;
        self.round.detailed.surrenders += 1;
        self.round.dealer_revealed = true;
        self.round.message = format!("Surrendered, {refund} returned");

        self.record_action(Action::Surrender);
        self.record_step(StepKind::Surrender);
        self.finish_round(RoundOutcome::Lose, refund, 0);
        Ok(refund)
    }

    /// Passes play to the lowest-indexed split hand still awaiting action,
    /// or to the dealer once every hand has finished.
    ///
    /// One routine covers solo and split resolution: the solo hand is the
    /// degenerate size-one collection, which skips straight to the dealer.
    pub(super) fn advance_split(&mut self) {
        match self
            .round
            .split_hands
            .iter()
            .position(|hand| !hand.stood)
        {
            Some(index) => {
                self.round.active_split = index;
                self.round.phase = Phase::Splitting;
            }
            None => self.begin_dealer_turn(),
        }
    }

    pub(super) const fn begin_dealer_turn(&mut self) {
        self.round.dealer_revealed = true;
        self.round.phase = Phase::DealerTurn;
    }

    /// Whether doubling is legal for the hand awaiting action.
    #[must_use]
    pub fn can_double(&self) -> bool {
        match self.round.phase {
            Phase::PlayerTurn => {
                self.round.player.len() == 2 && self.round.chips >= self.round.bet
            }
            Phase::Splitting => {
                let hand = &self.round.split_hands[self.round.active_split];
                self.options.double_after_split
                    && hand.hand.len() == 2
                    && self.round.chips >= hand.bet
            }
            _ => false,
        }
    }

    /// Whether splitting is legal for the hand awaiting action.
    #[must_use]
    pub fn can_split(&self) -> bool {
        match self.round.phase {
            Phase::PlayerTurn => {
                self.round.player.is_pair(self.options.split_any_ten)
                    && self.options.max_split_hands >= 2
                    && self.round.chips >= self.round.bet
            }
            Phase::Splitting => {
                let hand = &self.round.split_hands[self.round.active_split];
                hand.hand.is_pair(self.options.split_any_ten)
                    && self.round.split_hands.len() < self.options.max_split_hands
                    && self.round.chips >= hand.bet
            }
            _ => false,
        }
    }

    /// Whether surrender is legal for the hand awaiting action.
    #[must_use]
    pub fn can_surrender(&self) -> bool {
        self.round.phase == Phase::PlayerTurn
            && self.options.surrender
            && self.round.player.len() == 2
            && !self.round.was_split
    }
}

/// Split hands stand automatically on 21; split Aces stand unconditionally
/// with their single extra card.
fn mark_auto_stands(hand: &mut SplitHand, from_aces: bool) {
    if from_aces || hand.hand.score() == 21 {
        hand.stood = true;
    }
}
