//! Game driver.
//!
//! Owns the rules, the current snapshot, the dice source and the running
//! log. Presentation code dispatches intents through [`Game::dispatch`] (or
//! the named shortcuts) and reads back immutable snapshots.

use tracing::info;

use super::engine::RulesEngine;
use super::turn::TurnStateMachine;
use crate::board::RoomId;
use crate::core::config::GameConfig;
use crate::core::error::{ConfigError, IntentError};
use crate::core::intent::Intent;
use crate::core::rng::{FaceSource, GameRng};
use crate::core::state::{BoardState, GameState};
use crate::events::LogEvent;
use crate::store::UpgradeCard;

/// What one dispatched intent did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub events: Vec<LogEvent>,
    pub rejected: Option<IntentError>,
}

impl Applied {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.rejected.is_none()
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Game<S: FaceSource = GameRng> {
    rules: TurnStateMachine,
    state: GameState,
    source: S,
    log: Vec<LogEvent>,
}

/// Builder for creating a [`Game`].
#[derive(Clone, Debug)]
pub struct GameBuilder {
    config: GameConfig,
    fire_levels: Option<Vec<(RoomId, u8)>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::standard(),
            fire_levels: None,
        }
    }
}

impl GameBuilder {
    /// Builder for the standard house.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from explicit fire levels instead of one unit per room.
    pub fn fire_levels(mut self, levels: impl IntoIterator<Item = (RoomId, u8)>) -> Self {
        self.fire_levels = Some(levels.into_iter().collect());
        self
    }

    /// Build a game rolling seeded dice.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn build(self, seed: u64) -> Result<Game, ConfigError> {
        self.build_with(GameRng::new(seed))
    }

    /// Build a game drawing dice faces from `source`.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn build_with<S: FaceSource>(self, source: S) -> Result<Game<S>, ConfigError> {
        let rules = TurnStateMachine::new(self.config)?;
        let state = match self.fire_levels {
            Some(levels) => {
                rules.initial_state_with_board(BoardState::with_levels(rules.graph(), levels))
            }
            None => rules.initial_state(),
        };

        info!(
            players = state.player_count(),
            rooms = rules.graph().len(),
            fire = state.board.total_fire(),
            "game created"
        );
        let first = rules.character_of(&state, state.current_player);
        let log = vec![
            LogEvent::game("The fire alarm is ringing! Animal City firefighters, roll out!"),
            LogEvent::turn(format!("Turn {}: {}'s turn", state.turn_number, first)),
        ];

        Ok(Game {
            rules,
            state,
            source,
            log,
        })
    }
}

impl<S: FaceSource> Game<S> {
    /// Apply an intent and append its log entries.
    pub fn dispatch(&mut self, intent: Intent) -> Applied {
        let transition = self.rules.reduce(&self.state, &intent, &mut self.source);
        self.state = transition.state;
        self.log.extend(transition.events.iter().cloned());
        Applied {
            events: transition.events,
            rejected: transition.rejected,
        }
    }

    pub fn roll(&mut self) -> Applied {
        self.dispatch(Intent::Roll)
    }

    pub fn toggle_keep(&mut self, slot: usize) -> Applied {
        self.dispatch(Intent::ToggleKeep { slot })
    }

    pub fn confirm_roll(&mut self) -> Applied {
        self.dispatch(Intent::ConfirmRoll)
    }

    pub fn move_to(&mut self, room: RoomId) -> Applied {
        self.dispatch(Intent::Move { room })
    }

    pub fn extinguish(&mut self, room: RoomId) -> Applied {
        self.dispatch(Intent::Extinguish { room })
    }

    pub fn end_turn(&mut self) -> Applied {
        self.dispatch(Intent::EndTurn)
    }

    pub fn buy_card(&mut self, index: usize) -> Applied {
        self.dispatch(Intent::BuyCard { index })
    }

    // === Queries ===

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &TurnStateMachine {
        &self.rules
    }

    /// Every log entry since the game started.
    #[must_use]
    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        self.rules.legal_intents(&self.state)
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<RoomId> {
        self.rules.legal_moves(&self.state)
    }

    #[must_use]
    pub fn can_extinguish(&self, room: RoomId) -> bool {
        self.rules.can_extinguish(&self.state, room)
    }

    #[must_use]
    pub fn store_offer(&self) -> &[UpgradeCard] {
        self.rules.store_offer()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}
