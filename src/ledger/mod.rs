//! Water and fire token accounting.
//!
//! Token counts never leave `[0, capacity]`. Collecting past capacity
//! silently drops the excess; so does banking fire past capacity.

use tracing::debug;

use crate::board::{RoomGraph, RoomId};
use crate::core::error::ExtinguishError;
use crate::core::player::{Character, PlayerId};
use crate::core::state::{GameState, Phase, PlayerState};

/// What a successful extinguish did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extinguished {
    pub room: RoomId,
    /// Fire level left in the room.
    pub remaining_fire: u8,
    /// Whether the fire token fit in the player's bank.
    pub banked: bool,
}

/// Token rules for a single game.
#[derive(Clone, Copy, Debug)]
pub struct ResourceLedger<'a> {
    graph: &'a RoomGraph,
    requires_presence: bool,
}

impl<'a> ResourceLedger<'a> {
    #[must_use]
    pub fn new(graph: &'a RoomGraph, requires_presence: bool) -> Self {
        Self {
            graph,
            requires_presence,
        }
    }

    /// Add water up to the character's capacity. Returns the amount kept.
    pub fn collect_water(player: &mut PlayerState, character: &Character, amount: u32) -> u8 {
        let space = character.max_water_tokens.saturating_sub(player.water_tokens);
        let gained = u8::try_from(amount).unwrap_or(u8::MAX).min(space);
        player.water_tokens += gained;
        if u32::from(gained) < amount {
            debug!(
                lost = amount - u32::from(gained),
                capacity = character.max_water_tokens,
                "water beyond capacity dropped"
            );
        }
        gained
    }

    /// Check whether the current player may put out a fire unit in `room`.
    ///
    /// # Errors
    ///
    /// The first unmet precondition.
    pub fn check_extinguish(&self, state: &GameState, room: RoomId) -> Result<(), ExtinguishError> {
        if state.turn.phase != Phase::Actions {
            return Err(ExtinguishError::WrongPhase);
        }
        if !self.graph.contains(room) {
            return Err(ExtinguishError::UnknownRoom(room));
        }
        if self.requires_presence && state.current_room() != room {
            return Err(ExtinguishError::NotInRoom(room));
        }
        if state.current().water_tokens == 0 {
            return Err(ExtinguishError::NoWater);
        }
        if state.board.level(room) == 0 {
            return Err(ExtinguishError::NoFire(room));
        }
        Ok(())
    }

    /// Spend one water token to remove one fire unit and bank it.
    ///
    /// Leaves `state` untouched on error.
    ///
    /// # Errors
    ///
    /// See [`ResourceLedger::check_extinguish`].
    pub fn extinguish(
        &self,
        state: &mut GameState,
        character: &Character,
        room: RoomId,
    ) -> Result<Extinguished, ExtinguishError> {
        self.check_extinguish(state, room)?;

        let remaining_fire = state.board.level(room) - 1;
        state.board.set_level(room, remaining_fire);

        let player = state.current_mut();
        player.water_tokens -= 1;
        let banked = player.fire_tokens_banked < character.max_fire_tokens;
        if banked {
            player.fire_tokens_banked += 1;
        }

        Ok(Extinguished {
            room,
            remaining_fire,
            banked,
        })
    }

    /// Token totals across all players: (water, banked fire).
    #[must_use]
    pub fn totals(state: &GameState) -> (u32, u32) {
        state.players.iter().fold((0, 0), |(water, fire), (_, player)| {
            (
                water + u32::from(player.water_tokens),
                fire + u32::from(player.fire_tokens_banked),
            )
        })
    }

    /// Water tokens a player could still collect.
    #[must_use]
    pub fn water_space(state: &GameState, player: PlayerId, character: &Character) -> u8 {
        character
            .max_water_tokens
            .saturating_sub(state.players[player].water_tokens)
    }
}
