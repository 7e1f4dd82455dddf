//! Error types.
//!
//! Two families, split by when they can happen:
//!
//! - [`ConfigError`]: the static configuration is unusable. Raised once while
//!   loading; the game cannot start.
//! - [`IntentError`]: a player intent is not legal in the current state. The
//!   reducer turns these into a no-op plus a warning log entry, so callers
//!   only see them as `Transition::rejected`.
//!
//! An uncontained fire is *not* an error: it is recorded as the game outcome.

use thiserror::Error;

use crate::board::RoomId;
use crate::core::state::Phase;

/// Fatal configuration problems, detected at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("room {0} is declared more than once")]
    DuplicateRoom(RoomId),

    #[error("room {room} lists unknown adjacent room {target}")]
    DanglingAdjacency { room: RoomId, target: RoomId },

    #[error("room {room} overflows into unknown room {target}")]
    DanglingOverflow { room: RoomId, target: RoomId },

    #[error("room {room} cannot be adjacent to itself")]
    SelfAdjacent { room: RoomId },

    #[error("room 0 must be the non-flammable Outside room")]
    InvalidOutside,

    #[error("turn order is empty")]
    NoPlayers,

    #[error("turn order has {0} seats, at most 255 are supported")]
    TooManyPlayers(usize),

    #[error("{0} characters defined, at most 256 are supported")]
    TooManyCharacters(usize),

    #[error("character {0:?} is defined twice")]
    DuplicateCharacter(String),

    #[error("turn order names unknown character {0:?}")]
    UnknownCharacter(String),

    #[error("character {character:?} starts in unknown room {room}")]
    UnknownStartRoom { character: String, room: RoomId },

    #[error("rolls per turn must be at least 1")]
    NoRolls,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("movement is only possible in the actions phase")]
    WrongPhase,

    #[error("no movement left this turn")]
    NoMovement,

    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("room {to} is not adjacent to room {from}")]
    NotAdjacent { from: RoomId, to: RoomId },
}

/// Why putting out a fire was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExtinguishError {
    #[error("fires can only be put out in the actions phase")]
    WrongPhase,

    #[error("no water tokens left")]
    NoWater,

    #[error("there is no fire in room {0}")]
    NoFire(RoomId),

    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    #[error("player is not in room {0}")]
    NotInRoom(RoomId),
}

/// Recoverable rejection of a single intent. State is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("not allowed during the {actual} phase")]
    WrongPhase { actual: Phase },

    #[error("no rolls remaining")]
    NoRollsLeft,

    #[error("dice have not been rolled yet")]
    NotRolled,

    #[error("die slot {0} does not exist")]
    InvalidSlot(usize),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("cannot put out fire: {0}")]
    CannotExtinguish(#[from] ExtinguishError),

    #[error("store has no card at position {0}")]
    UnknownCard(usize),

    #[error("the fire is out of control, the game is over")]
    GameOver,
}
