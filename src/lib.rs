//! # Animal City Firefighters
//!
//! Rules engine for a turn-based cooperative firefighting board game.
//! Players roll dice, move through a house, collect water and put out
//! fires while every roll feeds more fire into the rooms.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `(GameState, Intent) -> GameState` plus log
//!    entries. Rejected intents leave the state untouched.
//!
//! 2. **Injected Randomness**: dice faces come from a `FaceSource`, so a
//!    seeded `GameRng` replays a game exactly and tests can script rolls.
//!
//! 3. **Configuration Over Convention**: rooms, characters and the store
//!    are data in a `GameConfig`, validated once at startup.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **No UI**: the presentation layer reads snapshots and the returned
//!   `LogEvent`s. Logging for operators goes through `tracing`; the
//!   library never installs a subscriber.
//!
//! ## Modules
//!
//! - `core`: players, configuration, RNG, state, intents, errors
//! - `board`: room graph and fire spread
//! - `dice`: die faces, rolling with keeps, tallying
//! - `ledger`: water and fire tokens
//! - `movement`: single-step movement
//! - `events`: human-readable log entries
//! - `store`: upgrade cards on offer
//! - `rules`: the turn state machine and the game driver

pub mod core;
pub mod board;
pub mod dice;
pub mod ledger;
pub mod movement;
pub mod events;
pub mod store;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Character, CharacterId, PlayerId, SeatMap,
    FaceSource, GameRng, GameRngState, ScriptedFaces,
    GameConfig, RulesConfig,
    ConfigError, IntentError, MoveError, ExtinguishError,
    Intent, IntentRecord,
    BoardState, GameOutcome, GameState, Phase, PlayerState, TurnState,
};

pub use crate::board::{FireSpreadEngine, RoomGraph, RoomId, RoomSpec, SpreadEvent, SpreadOutcome};

pub use crate::dice::{DiceResolver, DiceTally, DieFace, DieKind, Symbol, DICE_COUNT};

pub use crate::ledger::{Extinguished, ResourceLedger};

pub use crate::movement::MovementValidator;

pub use crate::events::{LogCategory, LogEvent};

pub use crate::store::{TokenCost, UpgradeCard};

pub use crate::rules::{Applied, Game, GameBuilder, RulesEngine, Transition, TurnStateMachine};
