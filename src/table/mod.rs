//! The round engine: state machine, orchestration, and session lifecycle.

use std::mem;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, SplitHand};
use crate::history::{HistoryLog, HistoryStep, RoundDraft, RoundRecord, StepKind};
use crate::host::{AdviceQuery, SnapshotStore};
use crate::options::TableOptions;
use crate::result::RoundOutcome;
use crate::session::{SessionContext, Snapshot};
use crate::shoe::Shoe;
use crate::stats::{DetailedStats, Stats};

mod actions;
mod bet;
mod dealer;
mod insurance;
pub mod state;

pub use dealer::DealerStep;
pub use state::{Action, Phase};

/// Everything that varies over the life of one session.
#[derive(Debug, Clone, PartialEq)]
struct RoundState {
    phase: Phase,
    shoe: Shoe,
    player: Hand,
    dealer: Hand,
    split_hands: Vec<SplitHand>,
    active_split: usize,
    was_split: bool,
    bet: u64,
    insurance_bet: u64,
    chips: u64,
    stats: Stats,
    detailed: DetailedStats,
    dealer_revealed: bool,
    result: Option<RoundOutcome>,
    message: String,
}

/// A single-player blackjack table.
///
/// The table owns the shoe, the round state machine, the session counters,
/// and the hand history. All rules-correctness lives here: legal action
/// sequencing, dealer policy, split/double/insurance/surrender semantics,
/// and payout accounting. Exactly one round progresses at a time; every
/// transition happens through `&mut self` and completes before it returns,
/// except dealer play, which the host drives one [`Table::dealer_step`] at
/// a time.
///
/// A rejected action is a strict no-op: when any method returns `Err`, the
/// table is bit-for-bit what it was before the call.
///
/// # Example
///
/// ```
/// use twentyone::{Action, Phase, Table, TableOptions};
///
/// let mut table = Table::new(TableOptions::default(), 42);
/// table.apply(Action::PlaceBet { amount: 25 }).unwrap();
/// table.apply(Action::Deal).unwrap();
///
/// if table.phase() == Phase::InsuranceOffer {
///     table.apply(Action::Insure { amount: 0 }).unwrap();
/// }
/// if table.phase() == Phase::PlayerTurn {
///     table.apply(Action::Stand).unwrap();
///     table.run_dealer().unwrap();
/// }
/// assert_eq!(table.phase(), Phase::GameOver);
/// ```
#[derive(Debug)]
pub struct Table {
    options: TableOptions,
    session: SessionContext,
    round: RoundState,
    history: HistoryLog,
    /// In-progress round draft; also the round-in-progress latch.
    draft: Option<RoundDraft>,
}

impl Table {
    /// Creates a table with a deterministic seed.
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        let mut session = SessionContext::new(seed);
        let shoe = Shoe::new(options.decks, options.penetration, session.rng());

        Self {
            round: RoundState {
                phase: Phase::Betting,
                shoe,
                player: Hand::new(),
                dealer: Hand::new(),
                split_hands: Vec::new(),
                active_split: 0,
                was_split: false,
                bet: 0,
                insurance_bet: 0,
                chips: options.starting_bankroll,
                stats: Stats::default(),
                detailed: DetailedStats::default(),
                dealer_revealed: false,
                result: None,
                message: String::new(),
            },
            options,
            session,
            history: HistoryLog::new(),
            draft: None,
        }
    }

    /// Requests a transition. Dispatches to the per-action methods; an `Err`
    /// means the action was unavailable and nothing changed.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason when the action is not legal in the
    /// current phase or its preconditions fail.
    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        let result = match action {
            Action::PlaceBet { amount } => self.place_bet(amount),
            Action::ClearBet => self.clear_bet(),
            Action::Deal => self.deal(),
            Action::Hit => self.hit().map(drop),
            Action::Stand => self.stand(),
            Action::Double => self.double_down().map(drop),
            Action::Split => self.split(),
            Action::Insure { amount } => self.insure(amount).map(drop),
            Action::Surrender => self.surrender().map(drop),
            Action::NewRound => self.new_round(),
            Action::Reset { bankroll } => self.reset(bankroll),
        };

        if let Err(error) = result {
            debug!(?action, %error, "action rejected");
        }
        result
    }

    /// Clears the finished round and returns to betting. Chips, statistics,
    /// and the shoe carry over.
    ///
    /// # Errors
    ///
    /// Returns an error unless the round is over.
    pub fn new_round(&mut self) -> Result<(), ActionError> {
        if self.round.phase != Phase::GameOver {
            return Err(ActionError::IllegalPhase);
        }

        self.clear_round_state();
        self.round.phase = Phase::Betting;
        Ok(())
    }

    /// Reinitializes chips to `bankroll` and clears cumulative statistics
    /// and the in-flight round. A fresh shoe is built.
    ///
    /// # Errors
    ///
    /// Rejected while cards are moving (dealing, dealer play, settlement);
    /// once dealer play begins it runs to settlement uninterrupted.
    pub fn reset(&mut self, bankroll: u64) -> Result<(), ActionError> {
        if matches!(
            self.round.phase,
            Phase::Dealing | Phase::DealerTurn | Phase::Resolving
        ) {
            return Err(ActionError::IllegalPhase);
        }

        self.draft = None;
        self.clear_round_state();
        self.round.chips = bankroll;
        self.round.stats = Stats::default();
        self.round.detailed = DetailedStats::default();
        self.round.shoe = Shoe::new(
            self.options.decks,
            self.options.penetration,
            self.session.rng(),
        );
        self.round.phase = Phase::Betting;
        Ok(())
    }

    fn clear_round_state(&mut self) {
        let round = &mut self.round;
        round.player.clear();
        round.dealer.clear();
        round.split_hands.clear();
        round.active_split = 0;
        round.was_split = false;
        round.bet = 0;
        round.insurance_bet = 0;
        round.dealer_revealed = false;
        round.result = None;
        round.message.clear();
    }

    /// Draws the next card from the shoe.
    ///
    /// The shoe is replaced wholesale on every draw, never mutated through
    /// aliasing, which keeps sequential draws by several split hands
    /// unambiguous.
    fn draw_card(&mut self) -> Card {
        let shoe = mem::take(&mut self.round.shoe);
        let (card, shoe) = shoe.draw(&mut self.session);
        self.round.shoe = shoe;
        card
    }

    fn record_action(&mut self, action: Action) {
        if let Some(draft) = &mut self.draft {
            draft.actions.push(action);
        }
    }

    fn record_step(&mut self, kind: StepKind) {
        let step = HistoryStep {
            kind,
            player_cards: self.round.player.cards().to_vec(),
            split_hands: self.round.split_hands.clone(),
            dealer_cards: self.round.dealer.cards().to_vec(),
            dealer_revealed: self.round.dealer_revealed,
        };
        if let Some(draft) = &mut self.draft {
            draft.steps.push(step);
        }
    }

    /// Terminal bookkeeping for a settled round.
    ///
    /// Chips must already be credited: statistics and history read the
    /// post-settlement chip value. The history draft latch guarantees at
    /// most one record per round; a second attempt finds the latch cleared
    /// and writes nothing.
    fn finish_round(&mut self, outcome: RoundOutcome, total_payout: u64, insurance_payout: u64) {
        self.round.result = Some(outcome);

        self.round.stats.record(outcome);
        self.round.detailed.total_won += total_payout;
        self.round.detailed.peak_chips = self.round.detailed.peak_chips.max(self.round.chips);
        if insurance_payout > 0 {
            self.round.detailed.insurance_won += 1;
        }

        self.record_step(StepKind::Result);
        if let Some(draft) = self.draft.take() {
            let record = RoundRecord {
                id: self.session.next_round_id(),
                timestamp_ms: unix_millis(),
                player_cards: self.round.player.cards().to_vec(),
                dealer_cards: self.round.dealer.cards().to_vec(),
                split_hands: self.round.split_hands.clone(),
                actions: draft.actions,
                result: outcome,
                payout: total_payout,
                bet: self.round.bet,
                insurance_bet: self.round.insurance_bet,
                was_split: self.round.was_split,
                split_outcomes: self
                    .round
                    .split_hands
                    .iter()
                    .filter_map(|hand| hand.result)
                    .collect(),
                steps: draft.steps,
            };
            debug!(id = record.id, ?outcome, total_payout, "round recorded");
            self.history.push(record);
        }

        self.round.phase = Phase::GameOver;
    }

    // --- read access ---------------------------------------------------

    /// The table's rule configuration.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.round.phase
    }

    /// Player chip count.
    #[must_use]
    pub const fn chips(&self) -> u64 {
        self.round.chips
    }

    /// Current bet (staged in betting, in flight once dealt).
    #[must_use]
    pub const fn bet(&self) -> u64 {
        self.round.bet
    }

    /// Insurance side bet in flight.
    #[must_use]
    pub const fn insurance_bet(&self) -> u64 {
        self.round.insurance_bet
    }

    /// The player's hand (empty once the round has been split).
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.round.player
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.round.dealer
    }

    /// The dealer's face-up card.
    #[must_use]
    pub fn dealer_upcard(&self) -> Option<Card> {
        self.round.dealer.upcard()
    }

    /// Whether the dealer's hole card is visible.
    #[must_use]
    pub const fn dealer_revealed(&self) -> bool {
        self.round.dealer_revealed
    }

    /// The split hands of the current round.
    #[must_use]
    pub fn split_hands(&self) -> &[SplitHand] {
        &self.round.split_hands
    }

    /// Index of the split hand awaiting action.
    #[must_use]
    pub const fn active_split(&self) -> usize {
        self.round.active_split
    }

    /// Whether the current round was split.
    #[must_use]
    pub const fn was_split(&self) -> bool {
        self.round.was_split
    }

    /// Result of the last settled round.
    #[must_use]
    pub const fn result(&self) -> Option<RoundOutcome> {
        self.round.result
    }

    /// Last user-facing table message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.round.message
    }

    /// Headline statistics.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.round.stats
    }

    /// Detailed statistics.
    #[must_use]
    pub const fn detailed_stats(&self) -> &DetailedStats {
        &self.round.detailed
    }

    /// Cards remaining in the shoe.
    #[must_use]
    pub fn shoe_remaining(&self) -> usize {
        self.round.shoe.remaining()
    }

    /// Whether the cut card has been reached (a fresh shoe is built at the
    /// next deal).
    #[must_use]
    pub const fn cut_card_reached(&self) -> bool {
        self.round.shoe.cut_card_reached()
    }

    /// The retained round history, oldest first.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Whether a round is between its deal and its settlement.
    #[must_use]
    pub const fn round_in_progress(&self) -> bool {
        self.draft.is_some()
    }

    /// Builds the advisor inputs for the hand awaiting a decision, or `None`
    /// when no player decision is pending.
    #[must_use]
    pub fn advice_query(&self) -> Option<AdviceQuery> {
        let player_cards = match self.round.phase {
            Phase::PlayerTurn => self.round.player.cards().to_vec(),
            Phase::Splitting => self
                .round
                .split_hands
                .get(self.round.active_split)?
                .hand
                .cards()
                .to_vec(),
            _ => return None,
        };

        Some(AdviceQuery {
            player_cards,
            dealer_upcard: self.round.dealer.upcard(),
            can_double: self.can_double(),
            can_split: self.can_split(),
            can_surrender: self.can_surrender(),
        })
    }

    // --- persistence ----------------------------------------------------

    /// Captures the persisted shape of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            chips: self.round.chips,
            stats: self.round.stats,
            detailed_stats: self.round.detailed,
            bet: self.round.bet,
            phase: self.round.phase,
            player_cards: self.round.player.cards().to_vec(),
            dealer_cards: self.round.dealer.cards().to_vec(),
            shoe: self.round.shoe.clone(),
            dealer_revealed: self.round.dealer_revealed,
            result: self.round.result,
            message: self.round.message.clone(),
            insurance_bet: self.round.insurance_bet,
            split_hands: self.round.split_hands.clone(),
            active_split: self.round.active_split,
            was_split: self.round.was_split,
            shoe_size: self.round.shoe.total_size(),
            cut_card_reached: self.round.shoe.cut_card_reached(),
        }
    }

    /// Rebuilds a table from a saved snapshot.
    ///
    /// A snapshot saved mid-hand is not resumed: the in-flight wagers (the
    /// split-hand bets if the round was split, otherwise the main bet, plus
    /// any insurance) are refunded into chips and the table is forced to a
    /// safe betting phase, because the shoe's exact draw position cannot be
    /// trusted across a reload boundary.
    #[must_use]
    pub fn from_snapshot(options: TableOptions, seed: u64, snapshot: Snapshot) -> Self {
        let mut session = SessionContext::new(seed);
        session.resume_card_ids_after(snapshot.highest_card_id());

        let mid_hand = snapshot.phase.is_mid_hand();
        let mut table = Self {
            round: RoundState {
                phase: snapshot.phase,
                shoe: snapshot.shoe,
                player: Hand::from_cards(snapshot.player_cards),
                dealer: Hand::from_cards(snapshot.dealer_cards),
                split_hands: snapshot.split_hands,
                active_split: snapshot.active_split,
                was_split: snapshot.was_split,
                bet: snapshot.bet,
                insurance_bet: snapshot.insurance_bet,
                chips: snapshot.chips,
                stats: snapshot.stats,
                detailed: snapshot.detailed_stats,
                dealer_revealed: snapshot.dealer_revealed,
                result: snapshot.result,
                message: snapshot.message,
            },
            options,
            session,
            history: HistoryLog::new(),
            draft: None,
        };

        if mid_hand {
            let wagered = if table.round.was_split {
                table.round.split_hands.iter().map(|hand| hand.bet).sum()
            } else {
                table.round.bet
            };
            let refund = wagered + table.round.insurance_bet;
            debug!(refund, "mid-hand snapshot; refunding in-flight wagers");
            table.round.chips += refund;
            table.clear_round_state();
            table.round.phase = Phase::Betting;
        }

        table
    }

    /// Replaces the shoe with a fixed card sequence, drawn from the end.
    ///
    /// Intended for deterministic tests and demos that stack the deal.
    pub fn stack_shoe(&mut self, cards: Vec<Card>) {
        self.round.shoe = Shoe::from_cards(cards, self.options.penetration);
    }

    /// Saves the session through the host's store.
    pub fn persist(&self, store: &mut dyn SnapshotStore) {
        store.save(&self.snapshot());
    }

    /// Loads the saved session, falling back to a fresh table when nothing
    /// usable is stored. Load failures never surface as errors.
    #[must_use]
    pub fn resume(options: TableOptions, seed: u64, store: &mut dyn SnapshotStore) -> Self {
        match store.load() {
            Some(snapshot) => Self::from_snapshot(options, seed, snapshot),
            None => Self::new(options, seed),
        }
    }

    /// Installs a separately persisted history log, keeping future record
    /// ids unique past the restored ones.
    pub fn restore_history(&mut self, history: HistoryLog) {
        if let Some(latest) = history.latest() {
            self.session.resume_round_ids_after(latest.id);
        }
        self.history = history;
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
