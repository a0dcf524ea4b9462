use crate::error::ActionError;
use crate::history::StepKind;
use crate::payout;

use super::{Action, Phase, Table};

impl Table {
    /// Returns whether the insurance side bet is currently offered.
    #[must_use]
    pub fn insurance_offered(&self) -> bool {
        self.round.phase == Phase::InsuranceOffer
    }

    /// Takes (or declines) the insurance side bet.
    ///
    /// The amount is clamped to half the main bet and to the available
    /// chips; zero declines. Returns the amount actually staked. The side
    /// bet's outcome is realized only at settlement, never here: play
    /// continues and a dealer natural is discovered when the dealer plays.
    ///
    /// # Errors
    ///
    /// Rejected unless insurance is currently offered.
    pub fn insure(&mut self, amount: u64) -> Result<u64, ActionError> {
        if self.round.phase != Phase::InsuranceOffer {
            return Err(ActionError::IllegalPhase);
        }

        let staked = amount
            .min(payout::max_insurance(self.round.bet))
            .min(self.round.chips);

        if staked > 0 {
            self.round.chips -= staked;
            self.round.insurance_bet = staked;
            self.round.detailed.insurance_taken += 1;
            self.round.detailed.total_wagered += staked;
        }

        self.record_action(Action::Insure { amount: staked });
        self.record_step(StepKind::Insurance);
        self.round.phase = Phase::PlayerTurn;
        Ok(staked)
    }
}
