//! Dice: faces, rolling with keeps, and tallying.

pub mod face;
pub mod resolver;

pub use face::{kind_for_slot, DieFace, DieKind, Symbol, DANGEROUS_FACES, FRIENDLY_FACES};
pub use resolver::{DiceResolver, DiceTally, DICE_COUNT};
