//! Core engine types: players, configuration, randomness, state, intents, errors.
//!
//! Everything the rules read or write lives here; the rules themselves live
//! in the component modules and in `rules`.

pub mod config;
pub mod error;
pub mod intent;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, RulesConfig};
pub use error::{ConfigError, ExtinguishError, IntentError, MoveError};
pub use intent::{Intent, IntentRecord};
pub use player::{Ability, AbilityKind, Character, CharacterId, PlayerId, SeatMap};
pub use rng::{FaceSource, GameRng, GameRngState, ScriptedFaces};
pub use state::{BoardState, GameOutcome, GameState, Phase, PlayerState, TurnState};
