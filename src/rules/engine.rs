//! Rules engine trait.
//!
//! The engine is a reducer: `(GameState, Intent) -> GameState` plus the log
//! entries the step produced. Implementations must be deterministic given
//! the same face source, and must never partially apply an intent.

use crate::core::config::GameConfig;
use crate::core::error::IntentError;
use crate::core::intent::Intent;
use crate::core::rng::FaceSource;
use crate::core::state::{GameOutcome, GameState};
use crate::events::LogEvent;

/// Result of reducing one intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The new snapshot. Equal to the input when the intent was rejected.
    pub state: GameState,

    /// Log entries produced by this step, in order.
    pub events: Vec<LogEvent>,

    /// Why the intent was refused, if it was.
    pub rejected: Option<IntentError>,
}

impl Transition {
    /// Whether the intent was applied.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.rejected.is_none()
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate`: the single source of legality; `reduce` and
///   `legal_intents` both go through it
/// - `reduce`: a rejected intent returns the input state unchanged
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// State at the start of the game.
    fn initial_state(&self) -> GameState;

    /// Every intent worth offering in this state, legal or not.
    fn candidate_intents(&self, state: &GameState) -> Vec<Intent>;

    /// Check an intent against the current state.
    ///
    /// # Errors
    ///
    /// The reason the intent cannot be applied.
    fn validate(&self, state: &GameState, intent: &Intent) -> Result<(), IntentError>;

    /// Apply an intent, drawing any dice from `source`.
    fn reduce(&self, state: &GameState, intent: &Intent, source: &mut dyn FaceSource) -> Transition;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameOutcome> {
        state.outcome.is_over().then_some(state.outcome)
    }

    // === Convenience Methods ===

    /// Intents that `reduce` would accept right now.
    fn legal_intents(&self, state: &GameState) -> Vec<Intent> {
        self.candidate_intents(state)
            .into_iter()
            .filter(|intent| self.validate(state, intent).is_ok())
            .collect()
    }

    /// Whether `reduce` would accept the intent.
    fn is_legal(&self, state: &GameState, intent: &Intent) -> bool {
        self.validate(state, intent).is_ok()
    }
}
