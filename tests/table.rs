//! Table integration tests.
//!
//! Deterministic rounds are driven by stacking the shoe with the exact draw
//! order: player, dealer, player, dealer, then every subsequent hit in play
//! order.

use twentyone::{
    AchievementEvaluator, AchievementId, ActionError, Card, DealerStep, DetailedStats, HISTORY_CAP,
    HandOutcome, Phase, Rank, Replay, RoundOutcome, Snapshot, SnapshotStore, StepKind, Stats, Suit,
    Table, TableOptions,
};

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

fn table_with_draws(options: TableOptions, draws: &[Card]) -> Table {
    let mut table = Table::new(options, 7);
    let mut cards: Vec<Card> = draws.to_vec();
    cards.reverse();
    table.stack_shoe(cards);
    table
}

fn bet_and_deal(table: &mut Table, amount: u64) {
    table.place_bet(amount).unwrap();
    table.deal().unwrap();
}

#[test]
fn both_naturals_push() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Ace),
            card(Rank::King),
            card(Rank::Queen),
        ],
    );
    bet_and_deal(&mut table, 100);

    // Player natural settles immediately, even with a dealer Ace showing.
    assert_eq!(table.phase(), Phase::GameOver);
    assert_eq!(table.result(), Some(RoundOutcome::Push));
    assert_eq!(table.chips(), 1000);

    let record = table.history().latest().unwrap();
    assert_eq!(record.payout, 100);
    assert_eq!(record.bet, 100);
    assert_eq!(table.stats().pushes, 1);
    assert_eq!(table.stats().blackjacks, 0);
}

#[test]
fn player_natural_pays_three_to_two() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::King),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);

    assert_eq!(table.phase(), Phase::GameOver);
    assert_eq!(table.result(), Some(RoundOutcome::Blackjack));
    assert_eq!(table.chips(), 1150);
    assert_eq!(table.history().latest().unwrap().payout, 250);
    assert_eq!(table.stats().blackjacks, 1);
    assert_eq!(table.stats().wins, 1);
}

#[test]
fn blackjack_ratio_rounds_down() {
    let options = TableOptions::default().with_blackjack_pays(1.2);
    let mut table = table_with_draws(
        options,
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::Queen),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);

    // 100 + floor(100 * 1.2)
    assert_eq!(table.history().latest().unwrap().payout, 220);
    assert_eq!(table.chips(), 1120);
}

#[test]
fn standing_hand_beats_dealer_bust() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ten),
            card(Rank::Nine),
            card(Rank::Eight),
            card(Rank::Six),
            // Dealer: 15, soft 16, 22 bust.
            card(Rank::Ace),
            card(Rank::Six),
        ],
    );
    bet_and_deal(&mut table, 100);
    assert_eq!(table.phase(), Phase::PlayerTurn);

    table.stand().unwrap();
    assert_eq!(table.phase(), Phase::DealerTurn);
    assert!(table.dealer_revealed());

    assert!(matches!(table.dealer_step().unwrap(), DealerStep::Drew(_)));
    assert!(matches!(table.dealer_step().unwrap(), DealerStep::Drew(_)));
    assert_eq!(table.dealer_step().unwrap(), DealerStep::Done);

    assert_eq!(table.phase(), Phase::GameOver);
    assert_eq!(table.result(), Some(RoundOutcome::Win));
    assert_eq!(table.chips(), 1100);

    let record = table.history().latest().unwrap();
    let dealer_draws = record
        .steps
        .iter()
        .filter(|step| step.kind == StepKind::DealerDraw)
        .count();
    assert_eq!(dealer_draws, 2);
    assert_eq!(record.dealer_cards.len(), 4);
}

#[test]
fn split_aces_receive_one_card_and_stand() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::Ace),
            card(Rank::Five),
            // One card per split ace.
            card(Rank::King),
            card(Rank::Nine),
            // Dealer: 14 draws to 18.
            card(Rank::Four),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.split().unwrap();

    // Both hands auto-stood, play went straight to the dealer.
    assert_eq!(table.phase(), Phase::DealerTurn);
    assert_eq!(table.split_hands().len(), 2);
    for hand in table.split_hands() {
        assert_eq!(hand.hand.len(), 2);
        assert!(hand.stood);
    }
    assert_eq!(table.hit().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.double_down().unwrap_err(), ActionError::IllegalPhase);

    table.run_dealer().unwrap();
    assert_eq!(table.phase(), Phase::GameOver);

    // 21 and 20 against the dealer's 18; no natural bonus after a split.
    let record = table.history().latest().unwrap();
    assert_eq!(
        record.split_outcomes,
        vec![HandOutcome::Win, HandOutcome::Win]
    );
    assert_eq!(record.payout, 400);
    assert_eq!(table.chips(), 1200);
    assert_eq!(table.detailed_stats().splits, 1);
}

#[test]
fn split_hands_settle_independently() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Eight),
            card(Rank::Seven),
            // Split draws, left then right.
            card(Rank::Two),
            card(Rank::Three),
            // Left hand hits to a bust, right hand hits once.
            card(Rank::Five),
            card(Rank::Ten),
            card(Rank::Eight),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.split().unwrap();
    assert_eq!(table.phase(), Phase::Splitting);
    assert_eq!(table.active_split(), 0);

    table.hit().unwrap(); // 15
    table.hit().unwrap(); // 25, busts, play moves on
    assert_eq!(table.active_split(), 1);
    table.hit().unwrap(); // 19
    table.stand().unwrap();

    table.run_dealer().unwrap();
    assert_eq!(table.phase(), Phase::GameOver);

    // One hand lost, one won: payouts cancel and the round is a push.
    let record = table.history().latest().unwrap();
    assert_eq!(
        record.split_outcomes,
        vec![HandOutcome::Lose, HandOutcome::Win]
    );
    assert_eq!(record.result, RoundOutcome::Push);
    assert_eq!(record.payout, 200);
    assert_eq!(table.chips(), 1000);
}

#[test]
fn max_split_hands_is_enforced() {
    let options = TableOptions::default().with_max_split_hands(2);
    let mut table = table_with_draws(
        options,
        &[
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Eight),
            card(Rank::Seven),
            card(Rank::Eight),
            card(Rank::Five),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.split().unwrap();

    // The active hand is a pair again but the table is at its limit.
    assert_eq!(table.split().unwrap_err(), ActionError::MaxSplitsReached);
    assert!(!table.can_split());
}

#[test]
fn ten_value_split_requires_option() {
    let draws = [
        card(Rank::King),
        card(Rank::Nine),
        card(Rank::Queen),
        card(Rank::Five),
        card(Rank::Two),
        card(Rank::Three),
    ];

    let mut table = table_with_draws(TableOptions::default(), &draws);
    bet_and_deal(&mut table, 100);
    assert_eq!(table.split().unwrap_err(), ActionError::CannotSplit);

    let mut table = table_with_draws(TableOptions::default().with_split_any_ten(true), &draws);
    bet_and_deal(&mut table, 100);
    table.split().unwrap();
    assert_eq!(table.split_hands().len(), 2);
}

#[test]
fn double_down_takes_exactly_one_card() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Five),
            card(Rank::Ten),
            card(Rank::Six),
            card(Rank::Seven),
            card(Rank::Ten),
        ],
    );
    bet_and_deal(&mut table, 100);
    assert!(table.can_double());

    table.double_down().unwrap();
    assert_eq!(table.bet(), 200);
    assert_eq!(table.player_hand().len(), 3);
    assert_eq!(table.phase(), Phase::DealerTurn);

    table.run_dealer().unwrap();
    assert_eq!(table.result(), Some(RoundOutcome::Win));
    assert_eq!(table.chips(), 1200);
    assert_eq!(table.detailed_stats().doubles, 1);
}

#[test]
fn double_after_split_respects_option() {
    let options = TableOptions::default().with_double_after_split(false);
    let mut table = table_with_draws(
        options,
        &[
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Eight),
            card(Rank::Seven),
            card(Rank::Two),
            card(Rank::Three),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.split().unwrap();

    assert!(!table.can_double());
    assert_eq!(table.double_down().unwrap_err(), ActionError::CannotDouble);
}

#[test]
fn surrender_refunds_half() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ten),
            card(Rank::Nine),
            card(Rank::Six),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);
    assert!(table.can_surrender());

    let refund = table.surrender().unwrap();
    assert_eq!(refund, 50);
    assert_eq!(table.phase(), Phase::GameOver);
    assert_eq!(table.result(), Some(RoundOutcome::Lose));
    assert_eq!(table.chips(), 950);
    assert_eq!(table.history().latest().unwrap().payout, 50);
    assert_eq!(table.detailed_stats().surrenders, 1);
}

#[test]
fn surrender_is_first_decision_only() {
    let disabled = TableOptions::default().with_surrender(false);
    let draws = [
        card(Rank::Ten),
        card(Rank::Nine),
        card(Rank::Six),
        card(Rank::Seven),
        card(Rank::Two),
    ];

    let mut table = table_with_draws(disabled, &draws);
    bet_and_deal(&mut table, 100);
    assert!(!table.can_surrender());
    assert_eq!(table.surrender().unwrap_err(), ActionError::CannotSurrender);

    let mut table = table_with_draws(TableOptions::default(), &draws);
    bet_and_deal(&mut table, 100);
    table.hit().unwrap();
    assert_eq!(table.surrender().unwrap_err(), ActionError::CannotSurrender);
}

#[test]
fn insurance_pays_independently_of_the_hand() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Nine),
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::Queen),
        ],
    );
    bet_and_deal(&mut table, 100);
    assert!(table.insurance_offered());
    assert_eq!(table.phase(), Phase::InsuranceOffer);

    // Clamped to half the main bet.
    let staked = table.insure(80).unwrap();
    assert_eq!(staked, 50);
    assert_eq!(table.insurance_bet(), 50);
    assert_eq!(table.chips(), 850);
    assert_eq!(table.phase(), Phase::PlayerTurn);

    table.stand().unwrap();
    table.run_dealer().unwrap();

    // Main hand loses to the dealer natural; the side bet pays 2:1.
    assert_eq!(table.result(), Some(RoundOutcome::Lose));
    assert_eq!(table.chips(), 1000);
    assert_eq!(table.history().latest().unwrap().payout, 150);
    assert_eq!(table.detailed_stats().insurance_taken, 1);
    assert_eq!(table.detailed_stats().insurance_won, 1);
}

#[test]
fn insurance_declined_with_zero() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Nine),
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::Seven),
            card(Rank::Ace),
        ],
    );
    bet_and_deal(&mut table, 100);

    assert_eq!(table.insure(0).unwrap(), 0);
    assert_eq!(table.insurance_bet(), 0);
    assert_eq!(table.chips(), 900);
    assert_eq!(table.detailed_stats().insurance_taken, 0);
    assert_eq!(table.phase(), Phase::PlayerTurn);

    // Dealer had 18, no natural: the round plays out normally.
    table.stand().unwrap();
    table.run_dealer().unwrap();
    assert_eq!(table.result(), Some(RoundOutcome::Push));
    assert_eq!(table.chips(), 1000);
}

#[test]
fn dealer_soft_17_policy() {
    let draws = [
        card(Rank::Ten),
        card(Rank::Six),
        card(Rank::Eight),
        card(Rank::Ace),
        card(Rank::Three),
    ];

    // Stands on soft 17 by default: 18 beats 17.
    let mut table = table_with_draws(TableOptions::default(), &draws);
    bet_and_deal(&mut table, 100);
    table.stand().unwrap();
    table.run_dealer().unwrap();
    assert_eq!(table.result(), Some(RoundOutcome::Win));

    // Hitting soft 17 draws to 20 and turns the round around.
    let mut table = table_with_draws(TableOptions::default().with_dealer_hits_soft_17(true), &draws);
    bet_and_deal(&mut table, 100);
    table.stand().unwrap();
    table.run_dealer().unwrap();
    assert_eq!(table.result(), Some(RoundOutcome::Lose));
    assert_eq!(table.dealer_hand().len(), 3);
}

#[test]
fn rejected_actions_leave_the_table_untouched() {
    let mut table = Table::new(TableOptions::default(), 3);

    let before = table.snapshot();
    assert_eq!(table.deal().unwrap_err(), ActionError::NoBet);
    assert_eq!(table.place_bet(0).unwrap_err(), ActionError::ZeroBet);
    assert_eq!(
        table.place_bet(2000).unwrap_err(),
        ActionError::InsufficientChips
    );
    assert_eq!(table.hit().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.stand().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.double_down().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.split().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.surrender().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.insure(10).unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.dealer_step().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.new_round().unwrap_err(), ActionError::IllegalPhase);
    assert_eq!(table.snapshot(), before);

    // Same contract mid-hand, through the dispatch surface.
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ten),
            card(Rank::Nine),
            card(Rank::Five),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);
    let before = table.snapshot();
    for action in [
        twentyone::Action::PlaceBet { amount: 10 },
        twentyone::Action::ClearBet,
        twentyone::Action::Deal,
        twentyone::Action::Split,
        twentyone::Action::NewRound,
    ] {
        assert!(table.apply(action).is_err());
        assert_eq!(table.snapshot(), before);
    }
}

#[test]
fn bets_stage_and_clear() {
    let mut table = Table::new(TableOptions::default(), 3);

    table.place_bet(50).unwrap();
    table.place_bet(30).unwrap();
    assert_eq!(table.bet(), 80);
    assert_eq!(table.chips(), 1000);

    // Staged chips are not available to stage again.
    assert_eq!(
        table.place_bet(950).unwrap_err(),
        ActionError::InsufficientChips
    );

    table.clear_bet().unwrap();
    assert_eq!(table.bet(), 0);
    assert_eq!(table.deal().unwrap_err(), ActionError::NoBet);
}

#[test]
fn chips_are_conserved_across_rounds() {
    let mut table = Table::new(TableOptions::default(), 42);

    for round in 1..=60 {
        let before = table.chips();
        bet_and_deal(&mut table, 10);
        if table.insurance_offered() {
            table.insure(0).unwrap();
        }
        while matches!(table.phase(), Phase::PlayerTurn | Phase::Splitting) {
            table.stand().unwrap();
        }
        if table.phase() == Phase::DealerTurn {
            table.run_dealer().unwrap();
        }
        assert_eq!(table.phase(), Phase::GameOver);

        let record = table.history().latest().unwrap();
        assert_eq!(record.id, round);
        assert_eq!(table.chips(), before - 10 + record.payout);
        table.new_round().unwrap();
    }

    assert_eq!(table.history().len(), 60);
    assert_eq!(table.stats().hands_played, 60);
}

#[test]
fn replay_steps_match_live_observation() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Five),
            card(Rank::Ten),
            card(Rank::Nine),
            card(Rank::Seven),
            card(Rank::Three),
        ],
    );

    let view = |table: &Table| {
        (
            table.player_hand().cards().to_vec(),
            table.dealer_hand().cards().to_vec(),
            table.dealer_revealed(),
        )
    };

    bet_and_deal(&mut table, 100);
    let after_deal = view(&table);
    table.hit().unwrap();
    let after_hit = view(&table);
    table.stand().unwrap();
    let after_stand = view(&table);
    table.run_dealer().unwrap();
    let settled = view(&table);

    let record = table.history().latest().unwrap();
    let kinds: Vec<StepKind> = record.steps.iter().map(|step| step.kind).collect();
    assert_eq!(
        kinds,
        vec![StepKind::Deal, StepKind::Hit, StepKind::Stand, StepKind::Result]
    );
    for (step, live) in record
        .steps
        .iter()
        .zip([after_deal, after_hit, after_stand, settled])
    {
        assert_eq!(step.player_cards, live.0);
        assert_eq!(step.dealer_cards, live.1);
        assert_eq!(step.dealer_revealed, live.2);
    }

    let mut replay = Replay::new(record);
    assert_eq!(replay.len(), 4);
    assert_eq!(replay.current().unwrap().kind, StepKind::Deal);
    assert_eq!(replay.forward().unwrap().kind, StepKind::Hit);
    assert_eq!(replay.seek(3).unwrap().kind, StepKind::Result);
    assert!(replay.forward().is_none());
    assert_eq!(replay.back().unwrap().kind, StepKind::Stand);
    replay.restart();
    assert_eq!(replay.position(), 0);
}

#[test]
fn history_is_capped() {
    let mut table = Table::new(TableOptions::default(), 11);
    let rounds = HISTORY_CAP as u64 + 10;

    for _ in 0..rounds {
        bet_and_deal(&mut table, 1);
        if table.insurance_offered() {
            table.insure(0).unwrap();
        }
        while matches!(table.phase(), Phase::PlayerTurn | Phase::Splitting) {
            table.stand().unwrap();
        }
        if table.phase() == Phase::DealerTurn {
            table.run_dealer().unwrap();
        }
        table.new_round().unwrap();
    }

    assert_eq!(table.history().len(), HISTORY_CAP);
    assert_eq!(table.history().get(0).unwrap().id, 11);
    assert_eq!(table.history().latest().unwrap().id, rounds);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::King),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);
    assert_eq!(table.phase(), Phase::GameOver);

    let snapshot = table.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);

    // A settled round restores verbatim and the session can continue.
    let mut table = Table::from_snapshot(TableOptions::default(), 7, restored);
    assert_eq!(table.phase(), Phase::GameOver);
    assert_eq!(table.chips(), 1150);
    assert_eq!(table.stats().blackjacks, 1);
    table.new_round().unwrap();
    assert_eq!(table.phase(), Phase::Betting);
}

#[test]
fn mid_hand_snapshot_restores_to_betting() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Nine),
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::Queen),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.insure(50).unwrap();
    assert_eq!(table.phase(), Phase::PlayerTurn);
    assert_eq!(table.chips(), 850);

    let snapshot = table.snapshot();
    let table = Table::from_snapshot(TableOptions::default(), 7, snapshot);

    // Wagers in flight are refunded; the hand itself is not resumed.
    assert_eq!(table.phase(), Phase::Betting);
    assert_eq!(table.chips(), 1000);
    assert_eq!(table.bet(), 0);
    assert_eq!(table.insurance_bet(), 0);
    assert!(table.player_hand().cards().is_empty());
    assert!(table.dealer_hand().cards().is_empty());
}

#[test]
fn persist_and_resume_through_store() {
    #[derive(Default)]
    struct MemoryStore(Option<Snapshot>);

    impl SnapshotStore for MemoryStore {
        fn save(&mut self, snapshot: &Snapshot) {
            self.0 = Some(snapshot.clone());
        }

        fn load(&mut self) -> Option<Snapshot> {
            self.0.clone()
        }
    }

    let mut store = MemoryStore::default();

    // Nothing saved yet: a fresh table.
    let table = Table::resume(TableOptions::default(), 7, &mut store);
    assert_eq!(table.chips(), 1000);
    assert!(table.history().is_empty());

    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::King),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.persist(&mut store);

    let table = Table::resume(TableOptions::default(), 7, &mut store);
    assert_eq!(table.chips(), 1150);
    assert_eq!(table.stats().wins, 1);
}

#[test]
fn reset_reinitializes_the_session() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ten),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Five),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.stand().unwrap();

    // Once the dealer is in motion the round runs to settlement.
    assert_eq!(table.phase(), Phase::DealerTurn);
    assert_eq!(table.reset(500).unwrap_err(), ActionError::IllegalPhase);
    table.run_dealer().unwrap();

    table.reset(500).unwrap();
    assert_eq!(table.phase(), Phase::Betting);
    assert_eq!(table.chips(), 500);
    assert_eq!(table.stats(), &Stats::default());
    assert_eq!(table.detailed_stats(), &DetailedStats::default());

    // The capped record log survives a reset.
    assert_eq!(table.history().len(), 1);
}

#[test]
fn cut_card_triggers_a_fresh_shoe() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ten),
            card(Rank::Nine),
            card(Rank::Eight),
            card(Rank::Seven),
            card(Rank::Two),
        ],
    );
    bet_and_deal(&mut table, 100);
    table.stand().unwrap();
    table.run_dealer().unwrap();
    assert!(table.cut_card_reached());

    table.new_round().unwrap();
    bet_and_deal(&mut table, 100);
    assert_eq!(table.shoe_remaining(), 6 * 52 - 4);
    assert!(!table.cut_card_reached());
}

#[test]
fn advice_query_reflects_legal_moves() {
    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Eight),
            card(Rank::Seven),
            card(Rank::Eight),
            card(Rank::Ten),
        ],
    );
    bet_and_deal(&mut table, 100);

    let query = table.advice_query().unwrap();
    assert_eq!(query.player_cards.len(), 2);
    assert_eq!(query.dealer_upcard.unwrap().rank, Rank::Seven);
    assert!(query.can_double);
    assert!(query.can_split);
    assert!(query.can_surrender);

    table.stand().unwrap();
    table.run_dealer().unwrap();
    assert!(table.advice_query().is_none());
}

#[test]
fn achievements_consume_settled_statistics() {
    struct FirstBlackjack;

    impl AchievementEvaluator for FirstBlackjack {
        fn evaluate(
            &self,
            stats: &Stats,
            _detailed: &DetailedStats,
            last_result: RoundOutcome,
        ) -> Vec<AchievementId> {
            if last_result == RoundOutcome::Blackjack && stats.blackjacks == 1 {
                vec![1]
            } else {
                Vec::new()
            }
        }
    }

    let mut table = table_with_draws(
        TableOptions::default(),
        &[
            card(Rank::Ace),
            card(Rank::Nine),
            card(Rank::King),
            card(Rank::Seven),
        ],
    );
    bet_and_deal(&mut table, 100);

    let unlocked = FirstBlackjack.evaluate(
        table.stats(),
        table.detailed_stats(),
        table.result().unwrap(),
    );
    assert_eq!(unlocked, vec![1]);
}
