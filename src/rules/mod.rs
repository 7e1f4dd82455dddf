//! Turn flow and the game driver.
//!
//! `RulesEngine` is the reducer seam: validate an intent, apply it to a
//! cloned snapshot, report what happened. `TurnStateMachine` is the one
//! implementation, composed from the board, dice, ledger and movement
//! components. `Game` wraps it with a dice source and a running log.

pub mod engine;
pub mod game;
pub mod turn;

pub use engine::{RulesEngine, Transition};
pub use game::{Applied, Game, GameBuilder};
pub use turn::TurnStateMachine;
