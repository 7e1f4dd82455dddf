//! The house: room topology and how fire moves through it.
//!
//! - `room`: room ids, declarations and the symmetric room graph
//! - `fire`: turning a flame total into fire on the board

pub mod fire;
pub mod room;

pub use fire::{FireSpreadEngine, SpreadEvent, SpreadOutcome};
pub use room::{Room, RoomGraph, RoomId, RoomSpec};
