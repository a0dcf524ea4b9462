//! Cumulative session statistics.
//!
//! Updated once per round at settlement, after the chip write, so external
//! consumers (achievements, history) always observe post-settlement values.

use serde::{Deserialize, Serialize};

use crate::result::RoundOutcome;

/// Headline statistics for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Rounds settled.
    pub hands_played: u32,
    /// Rounds won (including blackjacks).
    pub wins: u32,
    /// Rounds lost (including surrenders).
    pub losses: u32,
    /// Rounds pushed.
    pub pushes: u32,
    /// Natural blackjacks dealt to the player.
    pub blackjacks: u32,
    /// Current win streak (negative while losing).
    pub current_streak: i32,
    /// Best win streak observed.
    pub best_streak: i32,
}

impl Stats {
    pub(crate) fn record(&mut self, outcome: RoundOutcome) {
        self.hands_played += 1;

        match outcome {
            RoundOutcome::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
            RoundOutcome::Win => self.wins += 1,
            RoundOutcome::Push => self.pushes += 1,
            RoundOutcome::Lose => self.losses += 1,
        }

        if outcome.is_win() {
            self.current_streak = self.current_streak.max(0) + 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else if outcome == RoundOutcome::Lose {
            self.current_streak = self.current_streak.min(0) - 1;
        }
    }
}

/// Finer-grained statistics read by the achievement evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedStats {
    /// Double downs taken.
    pub doubles: u32,
    /// Splits performed.
    pub splits: u32,
    /// Hands surrendered.
    pub surrenders: u32,
    /// Insurance side bets placed.
    pub insurance_taken: u32,
    /// Insurance side bets that paid out.
    pub insurance_won: u32,
    /// Total chips wagered across all rounds (bets, doubles, splits,
    /// insurance).
    pub total_wagered: u64,
    /// Total chips paid back across all rounds.
    pub total_won: u64,
    /// Highest chip count observed after a settlement.
    pub peak_chips: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_tracking() {
        let mut stats = Stats::default();

        stats.record(RoundOutcome::Win);
        stats.record(RoundOutcome::Blackjack);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.best_streak, 2);

        stats.record(RoundOutcome::Push);
        assert_eq!(stats.current_streak, 2);

        stats.record(RoundOutcome::Lose);
        stats.record(RoundOutcome::Lose);
        assert_eq!(stats.current_streak, -2);
        assert_eq!(stats.best_streak, 2);

        stats.record(RoundOutcome::Win);
        assert_eq!(stats.current_streak, 1);

        assert_eq!(stats.hands_played, 6);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.blackjacks, 1);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.losses, 2);
    }
}
