use std::cmp::Ordering;

use tracing::debug;

use crate::card::Card;
use crate::hand::SplitHand;
use crate::history::StepKind;
use crate::error::ActionError;
use crate::payout;
use crate::result::{HandOutcome, RoundOutcome};

use super::{Phase, Table};

/// Result of one externally driven dealer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The dealer drew a card and must be stepped again (after whatever
    /// pacing delay the host chooses).
    Drew(Card),
    /// The dealer stood or busted; the round has been settled.
    Done,
}

impl Table {
    fn any_live_hand(&self) -> bool {
        if self.round.was_split {
            self.round.split_hands.iter().any(SplitHand::is_live)
        } else {
            !self.round.player.is_bust()
        }
    }

    fn dealer_must_hit(&self) -> bool {
        let score = self.round.dealer.score();
        if score < self.options.dealer_stand_threshold {
            return true;
        }
        self.options.dealer_hits_soft_17
            && score == self.options.dealer_stand_threshold
            && self.round.dealer.is_soft()
    }

    /// Advances the dealer by one policy step.
    ///
    /// The policy: hit below the stand threshold, and on a soft 17 when the
    /// table says so. Each call either draws exactly one card — publishing
    /// an intermediate "dealer drew" history step — or stands and settles
    /// the round. The pacing delay between steps belongs to the host loop;
    /// a zero-delay loop yields identical final outcomes. When no player
    /// hand is live the dealer does not draw at all.
    ///
    /// The step count is bounded: every draw strictly narrows the dealer's
    /// headroom to 21 until they stand or bust.
    ///
    /// # Errors
    ///
    /// Rejected outside the dealer's turn.
    pub fn dealer_step(&mut self) -> Result<DealerStep, ActionError> {
        if self.round.phase != Phase::DealerTurn {
            return Err(ActionError::IllegalPhase);
        }

        if self.any_live_hand() && self.dealer_must_hit() {
            let card = self.draw_card();
            self.round.dealer.push(card);
            self.record_step(StepKind::DealerDraw);
            return Ok(DealerStep::Drew(card));
        }

        self.settle_round();
        Ok(DealerStep::Done)
    }

    /// Runs the dealer to completion with no pacing delay.
    ///
    /// # Errors
    ///
    /// Rejected outside the dealer's turn.
    pub fn run_dealer(&mut self) -> Result<(), ActionError> {
        while self.round.phase == Phase::DealerTurn {
            let _ = self.dealer_step()?;
        }
        Ok(())
    }

    /// Settles the round against the dealer's completed hand.
    ///
    /// Every hand resolves independently against the one dealer outcome; a
    /// natural pays the blackjack ratio only on the original un-split hand.
    /// Insurance settles on its own: it pays 2:1 exactly when the dealer's
    /// completed hand is a natural, and is forfeited otherwise. The round's
    /// whole net chip change lands here, exactly once, before statistics
    /// and history are updated.
    pub(super) fn settle_round(&mut self) {
        self.round.phase = Phase::Resolving;
        self.round.dealer_revealed = true;

        let dealer_score = self.round.dealer.score();
        let dealer_bust = dealer_score > 21;
        let dealer_natural = self.round.dealer.is_blackjack();

        let outcome;
        let mut hand_payout: u64 = 0;

        if self.round.was_split {
            let mut hand_wager: u64 = 0;
            for hand in &mut self.round.split_hands {
                let result = if hand.hand.is_bust() {
                    HandOutcome::Lose
                } else if dealer_bust {
                    HandOutcome::Win
                } else {
                    match hand.hand.score().cmp(&dealer_score) {
                        Ordering::Greater => HandOutcome::Win,
                        Ordering::Less => HandOutcome::Lose,
                        Ordering::Equal => HandOutcome::Push,
                    }
                };
                hand.result = Some(result);
                hand.stood = true;
                hand_payout += match result {
                    HandOutcome::Win => payout::win(hand.bet),
                    HandOutcome::Push => payout::push(hand.bet),
                    HandOutcome::Lose => 0,
                };
                hand_wager += hand.bet;
            }

            // The overall result compares what came back to what was
            // wagered across the split hands; insurance stays out of it.
            outcome = match hand_payout.cmp(&hand_wager) {
                Ordering::Greater => RoundOutcome::Win,
                Ordering::Less => RoundOutcome::Lose,
                Ordering::Equal => RoundOutcome::Push,
            };
        } else {
            let bet = self.round.bet;
            let player = &self.round.player;
            let (solo, pay) = if player.is_bust() {
                (RoundOutcome::Lose, 0)
            } else if player.is_blackjack() {
                if dealer_natural {
                    (RoundOutcome::Push, payout::push(bet))
                } else {
                    (
                        RoundOutcome::Blackjack,
                        payout::blackjack(bet, self.options.blackjack_pays),
                    )
                }
            } else if dealer_bust {
                (RoundOutcome::Win, payout::win(bet))
            } else {
                match player.score().cmp(&dealer_score) {
                    Ordering::Greater => (RoundOutcome::Win, payout::win(bet)),
                    Ordering::Less => (RoundOutcome::Lose, 0),
                    Ordering::Equal => (RoundOutcome::Push, payout::push(bet)),
                }
            };
            outcome = solo;
            hand_payout = pay;
        }

        let insurance_payout = if dealer_natural && self.round.insurance_bet > 0 {
            payout::insurance(self.round.insurance_bet)
        } else {
            0
        };
        let total_payout = hand_payout + insurance_payout;

        self.round.chips += total_payout;
        self.round.message = settlement_message(outcome, dealer_bust, total_payout);
        debug!(dealer_score, ?outcome, total_payout, "round settled");

        self.finish_round(outcome, total_payout, insurance_payout);
    }
}

fn settlement_message(outcome: RoundOutcome, dealer_bust: bool, payout: u64) -> String {
    match outcome {
        RoundOutcome::Blackjack => format!("Blackjack! {payout} paid"),
        RoundOutcome::Win if dealer_bust => format!("Dealer busts, you win {payout}"),
        RoundOutcome::Win => format!("You win {payout}"),
        RoundOutcome::Push => "Push".to_owned(),
        RoundOutcome::Lose => "Dealer wins".to_owned(),
    }
}
