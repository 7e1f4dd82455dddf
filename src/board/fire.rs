//! Fire spread.
//!
//! A flame total `F` targets the room numbered `F`. Fire there either breaks
//! out (empty room gains 1) or doubles (gains its current level). Whatever
//! does not fit under the room's capacity overflows along the room's
//! overflow chain, carrying its literal amount forward. If the chain ends,
//! or loops back to a room already touched by this spread, the fire is
//! uncontained and the game is lost.
//!
//! ## Example
//!
//! ```
//! use firefighters::board::{FireSpreadEngine, RoomGraph, RoomId, RoomSpec};
//! use firefighters::core::BoardState;
//!
//! let graph = RoomGraph::build(&[
//!     RoomSpec::new(0, "Outside", 0),
//!     RoomSpec::new(1, "Hall", 2).overflowing_to(2),
//!     RoomSpec::new(2, "Kitchen", 4),
//! ])
//! .unwrap();
//! let mut board = BoardState::new(&graph);
//!
//! let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 1);
//! assert!(!outcome.uncontained);
//! assert_eq!(board.level(RoomId::new(1)), 2);
//! ```

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::warn;

use super::room::{RoomGraph, RoomId};
use crate::core::state::BoardState;

/// One observable step of a spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadEvent {
    /// An empty room caught fire.
    Breakout { room: RoomId },

    /// Fire was added to a room.
    Spread { room: RoomId, added: u8, level: u8 },

    /// A room is now at capacity.
    CapacityReached { room: RoomId, capacity: u8 },

    /// Flames that did not fit moved on.
    Overflow { from: RoomId, to: RoomId, amount: u8 },

    /// Overflow had nowhere left to go.
    Uncontained { room: RoomId, amount: u8 },
}

/// Result of a single spread operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpreadOutcome {
    pub events: SmallVec<[SpreadEvent; 8]>,
    /// The spread escaped containment. Terminal.
    pub uncontained: bool,
}

impl SpreadOutcome {
    /// Total fire units placed on the board.
    #[must_use]
    pub fn units_added(&self) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                SpreadEvent::Spread { added, .. } => u32::from(*added),
                _ => 0,
            })
            .sum()
    }
}

/// Applies flame totals to a board.
#[derive(Clone, Copy, Debug)]
pub struct FireSpreadEngine<'a> {
    graph: &'a RoomGraph,
}

impl<'a> FireSpreadEngine<'a> {
    #[must_use]
    pub fn new(graph: &'a RoomGraph) -> Self {
        Self { graph }
    }

    /// Feed a flame total into the board.
    ///
    /// No-op when `flames` is 0 or names no room.
    pub fn spread(&self, board: &mut BoardState, flames: u32) -> SpreadOutcome {
        let mut outcome = SpreadOutcome::default();
        if flames == 0 {
            return outcome;
        }
        let Some(target) = RoomId::from_flames(flames).filter(|&id| self.graph.contains(id)) else {
            return outcome;
        };

        let mut visited = FxHashSet::default();
        visited.insert(target);

        let mut room = target;
        let mut incoming = match board.level(room) {
            0 => 1,
            level => level,
        };
        let mut carried = false;

        loop {
            let overflow = self.place(board, room, incoming, carried, &mut outcome);
            if overflow == 0 {
                break;
            }

            let next = self
                .graph
                .overflow_target(room)
                .filter(|next| visited.insert(*next));
            let Some(next) = next else {
                warn!(room = %room, amount = overflow, "fire is uncontained");
                outcome.events.push(SpreadEvent::Uncontained {
                    room,
                    amount: overflow,
                });
                outcome.uncontained = true;
                break;
            };

            outcome.events.push(SpreadEvent::Overflow {
                from: room,
                to: next,
                amount: overflow,
            });
            room = next;
            incoming = overflow;
            carried = true;
        }

        outcome
    }

    /// Put as much of `amount` into `room` as fits; return the remainder.
    fn place(
        &self,
        board: &mut BoardState,
        room: RoomId,
        amount: u8,
        carried: bool,
        outcome: &mut SpreadOutcome,
    ) -> u8 {
        let capacity = self.graph.capacity(room);
        let level = board.level(room);
        let applied = amount.min(capacity.saturating_sub(level));

        if applied > 0 {
            if level == 0 && !carried {
                outcome.events.push(SpreadEvent::Breakout { room });
            }
            board.set_level(room, level + applied);
            outcome.events.push(SpreadEvent::Spread {
                room,
                added: applied,
                level: level + applied,
            });
            // Only the step that fills a room reports it; full rooms that
            // overflow merely passes through stay quiet.
            if level + applied == capacity {
                warn!(room = %room, capacity, "room is at fire capacity");
                outcome.events.push(SpreadEvent::CapacityReached { room, capacity });
            }
        }

        amount - applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RoomSpec;

    fn graph() -> RoomGraph {
        RoomGraph::build(&[
            RoomSpec::new(0, "Outside", 0),
            RoomSpec::new(1, "Laundry", 2).overflowing_to(2),
            RoomSpec::new(2, "Kitchen", 5).overflowing_to(3),
            RoomSpec::new(3, "Bath", 1),
            RoomSpec::new(4, "Bedroom", 3).overflowing_to(5),
            RoomSpec::new(5, "Hall", 5).overflowing_to(6),
            RoomSpec::new(6, "Den", 7),
        ])
        .unwrap()
    }

    fn board_with(graph: &RoomGraph, levels: &[(u8, u8)]) -> BoardState {
        let mut board = BoardState::new(graph);
        for room in graph.rooms() {
            board.set_level(room.id, 0);
        }
        for &(room, level) in levels {
            board.set_level(RoomId(room), level);
        }
        board
    }

    #[test]
    fn test_zero_flames_is_noop() {
        let graph = graph();
        let mut board = board_with(&graph, &[]);
        let before = board.clone();

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 0);

        assert!(outcome.events.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_flames_without_room_are_wasted() {
        let graph = graph();
        let mut board = board_with(&graph, &[]);
        let before = board.clone();

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 9);

        assert!(outcome.events.is_empty());
        assert!(!outcome.uncontained);
        assert_eq!(board, before);
    }

    #[test]
    fn test_breakout_in_empty_room() {
        let graph = graph();
        let mut board = board_with(&graph, &[]);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 5);

        assert_eq!(board.level(RoomId(5)), 1);
        assert!(!outcome.uncontained);
        assert_eq!(
            outcome.events.as_slice(),
            &[
                SpreadEvent::Breakout { room: RoomId(5) },
                SpreadEvent::Spread { room: RoomId(5), added: 1, level: 1 },
            ]
        );
    }

    #[test]
    fn test_doubling_overflows_remainder() {
        let graph = graph();
        let mut board = board_with(&graph, &[(5, 3)]);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 5);

        assert_eq!(board.level(RoomId(5)), 5);
        assert_eq!(board.level(RoomId(6)), 1);
        assert!(!outcome.uncontained);
        assert!(outcome
            .events
            .contains(&SpreadEvent::CapacityReached { room: RoomId(5), capacity: 5 }));
        assert!(outcome.events.contains(&SpreadEvent::Overflow {
            from: RoomId(5),
            to: RoomId(6),
            amount: 1,
        }));
        // Overflow arriving in an empty room is not a fresh breakout.
        assert!(!outcome
            .events
            .contains(&SpreadEvent::Breakout { room: RoomId(6) }));
    }

    #[test]
    fn test_exact_fill_does_not_overflow() {
        let graph = graph();
        // Laundry at 1 of 2: doubling adds exactly 1.
        let mut board = board_with(&graph, &[(1, 1), (2, 1)]);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 1);

        assert_eq!(board.level(RoomId(1)), 2);
        assert_eq!(board.level(RoomId(2)), 1);
        assert_eq!(outcome.units_added(), 1);
        assert!(outcome
            .events
            .contains(&SpreadEvent::CapacityReached { room: RoomId(1), capacity: 2 }));
        assert!(!outcome
            .events
            .iter()
            .any(|event| matches!(event, SpreadEvent::Overflow { .. })));
    }

    #[test]
    fn test_overflow_cascades_along_chain() {
        let graph = graph();
        // Laundry full (2/2), Kitchen 4/5, Bath empty.
        let mut board = board_with(&graph, &[(1, 2), (2, 4)]);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 1);

        // Laundry doubles: +2, all overflow. Kitchen takes 1, 1 overflows to Bath.
        assert_eq!(board.level(RoomId(1)), 2);
        assert_eq!(board.level(RoomId(2)), 5);
        assert_eq!(board.level(RoomId(3)), 1);
        assert!(!outcome.uncontained);
        assert_eq!(outcome.units_added(), 2);

        let filled: Vec<_> = outcome
            .events
            .iter()
            .filter_map(|event| match event {
                SpreadEvent::CapacityReached { room, .. } => Some(*room),
                _ => None,
            })
            .collect();
        assert_eq!(filled, vec![RoomId(2), RoomId(3)]);
    }

    #[test]
    fn test_chain_end_is_uncontained() {
        let graph = graph();
        // Bath (cap 1) is full and has no overflow target.
        let mut board = board_with(&graph, &[(3, 1)]);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 3);

        assert!(outcome.uncontained);
        assert_eq!(board.level(RoomId(3)), 1);
        assert_eq!(
            outcome.events.last(),
            Some(&SpreadEvent::Uncontained { room: RoomId(3), amount: 1 })
        );
    }

    #[test]
    fn test_cycle_is_detected_once() {
        let graph = RoomGraph::build(&[
            RoomSpec::new(0, "Outside", 0),
            RoomSpec::new(1, "A", 2).overflowing_to(2),
            RoomSpec::new(2, "B", 2).overflowing_to(1),
        ])
        .unwrap();
        let mut board = BoardState::new(&graph);
        board.set_level(RoomId(1), 2);
        board.set_level(RoomId(2), 2);

        let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 1);

        assert!(outcome.uncontained);
        let uncontained = outcome
            .events
            .iter()
            .filter(|event| matches!(event, SpreadEvent::Uncontained { .. }))
            .count();
        assert_eq!(uncontained, 1);
        assert_eq!(board.level(RoomId(1)), 2);
        assert_eq!(board.level(RoomId(2)), 2);
    }
}
