//! Game state: board, players and the turn in progress.
//!
//! ## BoardState
//!
//! Fire level per room. Only fire spread raises a level and only
//! extinguishing lowers one.
//!
//! ## TurnState
//!
//! Dice, keep flags and budgets for the current player's turn. Replaced
//! wholesale at the start of every turn.
//!
//! ## GameState
//!
//! The single source of truth handed to the presentation layer. Uses `im`
//! persistent data structures so the reducer can clone the previous
//! snapshot cheaply and mutate the copy.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentRecord};
use super::player::{CharacterId, PlayerId, SeatMap};
use crate::board::{RoomGraph, RoomId};
use crate::dice::{DieFace, DICE_COUNT};

/// Fire level of every room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    fire: OrdMap<RoomId, u8>,
}

impl BoardState {
    /// Starting board: one fire unit in every flammable room.
    #[must_use]
    pub fn new(graph: &RoomGraph) -> Self {
        let fire = graph
            .rooms()
            .map(|room| (room.id, u8::from(room.is_flammable())))
            .collect();
        Self { fire }
    }

    /// Board with explicit levels, each clamped to its room's capacity.
    ///
    /// Rooms not listed have no fire. Unknown rooms are ignored.
    #[must_use]
    pub fn with_levels(graph: &RoomGraph, levels: impl IntoIterator<Item = (RoomId, u8)>) -> Self {
        let mut fire: OrdMap<RoomId, u8> = graph.rooms().map(|room| (room.id, 0)).collect();
        for (room, level) in levels {
            if graph.contains(room) {
                fire.insert(room, level.min(graph.capacity(room)));
            }
        }
        Self { fire }
    }

    /// Fire level of a room (0 for unknown rooms).
    #[must_use]
    pub fn level(&self, room: RoomId) -> u8 {
        self.fire.get(&room).copied().unwrap_or(0)
    }

    pub(crate) fn set_level(&mut self, room: RoomId, level: u8) {
        self.fire.insert(room, level);
    }

    /// Iterate over (room, level) in room order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, u8)> + '_ {
        self.fire.iter().map(|(&room, &level)| (room, level))
    }

    /// Sum of all fire units on the board.
    #[must_use]
    pub fn total_fire(&self) -> u32 {
        self.fire.values().map(|&level| u32::from(level)).sum()
    }

    /// Rooms currently burning.
    pub fn burning(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.iter().filter(|&(_, level)| level > 0).map(|(room, _)| room)
    }
}

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Rolling and keeping dice.
    Rolling,
    /// Moving, extinguishing, ending the turn.
    Actions,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Rolling => "rolling",
            Phase::Actions => "actions",
        })
    }
}

/// Per-turn state, reset for every player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: Phase,

    /// Rolls left. 0 whenever the phase is `Actions`.
    pub rolls_remaining: u8,

    /// Face per slot, `None` until first rolled.
    pub dice: [Option<DieFace>; DICE_COUNT],

    /// Slots locked against re-rolling.
    pub kept: [bool; DICE_COUNT],

    /// Single-room moves left.
    pub movement_budget: u32,

    pub water_collected: u32,

    /// Flame total `F` of the resolved dice.
    pub flames_rolled: u32,
}

impl TurnState {
    /// Fresh turn: rolling phase, nothing rolled, all budgets 0.
    #[must_use]
    pub fn new(rolls_per_turn: u8) -> Self {
        Self {
            phase: Phase::Rolling,
            rolls_remaining: rolls_per_turn,
            dice: [None; DICE_COUNT],
            kept: [false; DICE_COUNT],
            movement_budget: 0,
            water_collected: 0,
            flames_rolled: 0,
        }
    }

    /// Whether any die has been rolled this turn.
    #[must_use]
    pub fn has_rolled(&self) -> bool {
        self.dice.iter().any(Option::is_some)
    }
}

/// Mutable per-player data. Capacities live on the character profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub character: CharacterId,
    pub position: RoomId,
    pub water_tokens: u8,
    pub fire_tokens_banked: u8,
}

impl PlayerState {
    #[must_use]
    pub fn new(character: CharacterId, position: RoomId) -> Self {
        Self {
            character,
            position,
            water_tokens: 0,
            fire_tokens_banked: 0,
        }
    }
}

/// Whether the game can continue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    /// Fire overflowed past the end of its chain, or looped back on itself.
    Uncontained { room: RoomId },
}

impl GameOutcome {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// Complete engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Per-seat state, indexed in turn order.
    pub players: SeatMap<PlayerState>,

    pub board: BoardState,

    pub turn: TurnState,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    pub outcome: GameOutcome,

    /// Accepted intents, oldest first.
    pub history: Vector<IntentRecord>,

    /// Next record sequence number within the turn.
    pub(crate) sequence: u32,
}

impl GameState {
    /// Initial state: first seat to roll, every player on their start room.
    #[must_use]
    pub fn new(board: BoardState, players: SeatMap<PlayerState>, rolls_per_turn: u8) -> Self {
        Self {
            current_player: PlayerId::new(0),
            players,
            board,
            turn: TurnState::new(rolls_per_turn),
            turn_number: 1,
            outcome: GameOutcome::InProgress,
            history: Vector::new(),
            sequence: 0,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// State of the player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    pub(crate) fn current_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.current_player]
    }

    /// Room the current player stands in.
    #[must_use]
    pub fn current_room(&self) -> RoomId {
        self.current().position
    }

    /// Players standing in a room.
    pub fn players_in(&self, room: RoomId) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(move |(_, player)| player.position == room)
            .map(|(id, _)| id)
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Record for an intent issued now by the current player.
    ///
    /// Claims the next sequence number of the turn.
    pub(crate) fn next_record(&mut self, intent: Intent) -> IntentRecord {
        let record = IntentRecord::new(self.current_player, intent, self.turn_number, self.sequence);
        self.sequence += 1;
        record
    }

    /// Pass the turn to the next seat and reset the turn state.
    pub(crate) fn advance_turn(&mut self, rolls_per_turn: u8) {
        self.current_player = self.current_player.next(self.player_count());
        self.turn = TurnState::new(rolls_per_turn);
        self.turn_number += 1;
        self.sequence = 0;
    }
}
