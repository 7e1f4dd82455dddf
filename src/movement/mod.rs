//! Single-step movement between adjacent rooms.

use crate::board::{RoomGraph, RoomId};
use crate::core::error::MoveError;
use crate::core::state::{GameState, Phase};

/// Movement rules over a room graph.
#[derive(Clone, Copy, Debug)]
pub struct MovementValidator<'a> {
    graph: &'a RoomGraph,
}

impl<'a> MovementValidator<'a> {
    #[must_use]
    pub fn new(graph: &'a RoomGraph) -> Self {
        Self { graph }
    }

    /// Check a move of the current player to `target`.
    ///
    /// # Errors
    ///
    /// The first unmet precondition.
    pub fn check_move(&self, state: &GameState, target: RoomId) -> Result<(), MoveError> {
        if state.turn.phase != Phase::Actions {
            return Err(MoveError::WrongPhase);
        }
        if state.turn.movement_budget == 0 {
            return Err(MoveError::NoMovement);
        }
        if !self.graph.contains(target) {
            return Err(MoveError::UnknownRoom(target));
        }
        let from = state.current_room();
        if !self.graph.is_adjacent(from, target) {
            return Err(MoveError::NotAdjacent { from, to: target });
        }
        Ok(())
    }

    #[must_use]
    pub fn can_move(&self, state: &GameState, target: RoomId) -> bool {
        self.check_move(state, target).is_ok()
    }

    /// Move the current player one room and spend one movement.
    /// Returns the room left behind.
    ///
    /// # Errors
    ///
    /// See [`MovementValidator::check_move`]. State is untouched on error.
    pub fn apply_move(&self, state: &mut GameState, target: RoomId) -> Result<RoomId, MoveError> {
        self.check_move(state, target)?;

        let from = state.current_room();
        state.current_mut().position = target;
        state.turn.movement_budget -= 1;
        Ok(from)
    }

    /// Rooms the current player could move to right now.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> Vec<RoomId> {
        self.graph
            .neighbors(state.current_room())
            .iter()
            .copied()
            .filter(|&room| self.can_move(state, room))
            .collect()
    }
}
