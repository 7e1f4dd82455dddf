//! Human-readable game log.
//!
//! Every reduction returns the log entries it produced. The presentation
//! layer decides how to show them; the category lets it style entries
//! without parsing text.

use serde::{Deserialize, Serialize};

use crate::board::{RoomGraph, SpreadEvent};

/// Kind of log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    /// A new turn began.
    Turn,
    Move,
    /// Extinguishing, collecting, buying.
    Action,
    Fire,
    Roll,
    /// Rejected intents and capacity alerts.
    Warning,
    Phase,
    /// Game over.
    Game,
}

impl LogCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogCategory::Turn => "turn",
            LogCategory::Move => "move",
            LogCategory::Action => "action",
            LogCategory::Fire => "fire",
            LogCategory::Roll => "roll",
            LogCategory::Warning => "warning",
            LogCategory::Phase => "phase",
            LogCategory::Game => "game",
        }
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub text: String,
    pub category: LogCategory,
}

impl LogEvent {
    pub fn new(category: LogCategory, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn turn(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Turn, text)
    }

    pub fn movement(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Move, text)
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Action, text)
    }

    pub fn fire(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Fire, text)
    }

    pub fn roll(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Roll, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Warning, text)
    }

    pub fn phase(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Phase, text)
    }

    pub fn game(text: impl Into<String>) -> Self {
        Self::new(LogCategory::Game, text)
    }

    /// Describe a fire spread step using room names.
    #[must_use]
    pub fn from_spread(event: &SpreadEvent, graph: &RoomGraph) -> Self {
        match *event {
            SpreadEvent::Breakout { room } => {
                Self::fire(format!("A fire breaks out in the {}!", graph.name(room)))
            }
            SpreadEvent::Spread { room, added, level } => Self::fire(format!(
                "Fire spreads in the {}: +{} ({}/{})",
                graph.name(room),
                added,
                level,
                graph.capacity(room)
            )),
            SpreadEvent::CapacityReached { room, capacity } => Self::warning(format!(
                "The {} is fully ablaze ({}/{})",
                graph.name(room),
                capacity,
                capacity
            )),
            SpreadEvent::Overflow { from, to, amount } => Self::fire(format!(
                "{} flame(s) overflow from the {} into the {}",
                amount,
                graph.name(from),
                graph.name(to)
            )),
            SpreadEvent::Uncontained { room, amount } => Self::game(format!(
                "The fire escapes the {} with {} flame(s) left and is out of control. Game over!",
                graph.name(room),
                amount
            )),
        }
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.text)
    }
}
