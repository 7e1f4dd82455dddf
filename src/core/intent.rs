//! Player intents.
//!
//! The presentation layer forwards what the player asked for as an
//! [`Intent`]; the rules decide whether it applies. Accepted intents are
//! kept as [`IntentRecord`]s for replay and debugging.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::RoomId;

/// Something the current player asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Roll every die that is not kept.
    Roll,
    /// Keep or release a die.
    ToggleKeep { slot: usize },
    /// Stop rolling and resolve the dice.
    ConfirmRoll,
    /// Step into an adjacent room.
    Move { room: RoomId },
    /// Spend a water token on a fire unit.
    Extinguish { room: RoomId },
    /// Hand the turn to the next player.
    EndTurn,
    /// Ask to buy a card from the store offer.
    BuyCard { index: usize },
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Roll => write!(f, "roll"),
            Intent::ToggleKeep { slot } => write!(f, "toggle keep on die {slot}"),
            Intent::ConfirmRoll => write!(f, "confirm roll"),
            Intent::Move { room } => write!(f, "move to room {room}"),
            Intent::Extinguish { room } => write!(f, "extinguish room {room}"),
            Intent::EndTurn => write!(f, "end turn"),
            Intent::BuyCard { index } => write!(f, "buy card {index}"),
        }
    }
}

/// An accepted intent with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The player who issued it.
    pub player: PlayerId,

    pub intent: Intent,

    /// Turn number when it was applied.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl IntentRecord {
    #[must_use]
    pub fn new(player: PlayerId, intent: Intent, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            intent,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::Move { room: RoomId::new(4) }.to_string(), "move to room 4");
        assert_eq!(Intent::ToggleKeep { slot: 2 }.to_string(), "toggle keep on die 2");
    }

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::Extinguish { room: RoomId::new(7) };
        let json = serde_json::to_string(&intent).unwrap();

        assert_eq!(json, r#"{"kind":"extinguish","room":7}"#);
        assert_eq!(serde_json::from_str::<Intent>(&json).unwrap(), intent);
    }

    #[test]
    fn test_intent_record() {
        let record = IntentRecord::new(PlayerId::new(1), Intent::Roll, 3, 0);

        assert_eq!(record.player, PlayerId::new(1));
        assert_eq!(record.intent, Intent::Roll);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 0);
    }
}
