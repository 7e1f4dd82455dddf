//! Die faces and face sets.
//!
//! Every face shows exactly one symbol with a magnitude. Slot 0 is the
//! friendly die; slots 1-3 are dangerous dice that can show flames.

use serde::{Deserialize, Serialize};

/// Symbol printed on a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// Movement.
    Steps,
    /// Water tokens.
    Water,
    /// Fire spread.
    Flame,
}

impl Symbol {
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Symbol::Steps => "🦶",
            Symbol::Water => "💧",
            Symbol::Flame => "🔥",
        }
    }
}

/// A single face: symbol plus magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieFace {
    pub symbol: Symbol,
    pub magnitude: u8,
}

impl DieFace {
    #[must_use]
    pub const fn steps(magnitude: u8) -> Self {
        Self {
            symbol: Symbol::Steps,
            magnitude,
        }
    }

    #[must_use]
    pub const fn water(magnitude: u8) -> Self {
        Self {
            symbol: Symbol::Water,
            magnitude,
        }
    }

    #[must_use]
    pub const fn flame(magnitude: u8) -> Self {
        Self {
            symbol: Symbol::Flame,
            magnitude,
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol.emoji(), self.magnitude)
    }
}

/// Which face set a slot draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieKind {
    Friendly,
    Dangerous,
}

impl DieKind {
    /// The six equally likely faces of this die.
    #[must_use]
    pub const fn faces(self) -> &'static [DieFace; 6] {
        match self {
            DieKind::Friendly => &FRIENDLY_FACES,
            DieKind::Dangerous => &DANGEROUS_FACES,
        }
    }
}

/// Faces of the friendly die (slot 0).
pub const FRIENDLY_FACES: [DieFace; 6] = [
    DieFace::steps(1),
    DieFace::steps(2),
    DieFace::water(1),
    DieFace::water(2),
    DieFace::steps(1),
    DieFace::water(1),
];

/// Faces of the dangerous dice (slots 1-3).
pub const DANGEROUS_FACES: [DieFace; 6] = [
    DieFace::flame(1),
    DieFace::flame(2),
    DieFace::flame(3),
    DieFace::steps(1),
    DieFace::water(1),
    DieFace::flame(0),
];

/// Die kind for a slot.
#[must_use]
pub const fn kind_for_slot(slot: usize) -> DieKind {
    if slot == 0 {
        DieKind::Friendly
    } else {
        DieKind::Dangerous
    }
}
