//! A single-player blackjack round-resolution engine.
//!
//! The crate provides a [`Table`] type that owns all rules-correctness for
//! one player against an automated dealer: legal action sequencing, shoe
//! lifecycle, dealer policy, split/double/insurance/surrender semantics,
//! payout and bankroll accounting, and a replayable record of each round.
//!
//! Rendering, the persistence medium, the basic-strategy table, and
//! achievement definitions live with the host; see [`host`] for the seams.
//!
//! # Example
//!
//! ```
//! use twentyone::{Action, Phase, Table, TableOptions};
//!
//! let mut table = Table::new(TableOptions::default(), 42);
//! table.apply(Action::PlaceBet { amount: 25 }).unwrap();
//! table.apply(Action::Deal).unwrap();
//!
//! if table.phase() == Phase::InsuranceOffer {
//!     table.apply(Action::Insure { amount: 0 }).unwrap();
//! }
//! while table.phase() == Phase::PlayerTurn || table.phase() == Phase::Splitting {
//!     table.apply(Action::Stand).unwrap();
//! }
//! if table.phase() == Phase::DealerTurn {
//!     table.run_dealer().unwrap();
//! }
//! assert_eq!(table.phase(), Phase::GameOver);
//! assert!(table.result().is_some());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod card;
pub mod error;
pub mod hand;
pub mod history;
pub mod host;
pub mod options;
pub mod payout;
pub mod result;
pub mod session;
pub mod shoe;
pub mod stats;
pub mod table;

// Re-export main types
pub use card::{Card, CardId, DECK_SIZE, Rank, Suit};
pub use error::ActionError;
pub use hand::{Hand, SplitHand};
pub use history::{HISTORY_CAP, HistoryLog, HistoryStep, Replay, RoundRecord, StepKind};
pub use host::{
    AchievementEvaluator, AchievementId, AdviceQuery, AdvisedAction, SnapshotStore,
    StrategyAdvisor,
};
pub use options::TableOptions;
pub use result::{HandOutcome, RoundOutcome};
pub use session::{SessionContext, Snapshot};
pub use shoe::Shoe;
pub use stats::{DetailedStats, Stats};
pub use table::{Action, DealerStep, Phase, Table};
