//! Fire spread integration tests.
//!
//! Breakout, doubling, overflow cascades and loss of containment, both on
//! the bare engine and through a full game.

use firefighters::board::{FireSpreadEngine, RoomGraph, RoomSpec, SpreadEvent};
use firefighters::core::{
    BoardState, Character, GameConfig, GameOutcome, IntentError, ScriptedFaces,
};
use firefighters::events::LogCategory;
use firefighters::rules::RulesEngine;
use firefighters::{GameBuilder, RoomId};

fn street() -> RoomGraph {
    RoomGraph::build(&[
        RoomSpec::new(0, "Outside", 0).with_doors(&[1]),
        RoomSpec::new(1, "Porch", 2).with_doors(&[2]).overflowing_to(2),
        RoomSpec::new(2, "Hall", 3).with_doors(&[3]).overflowing_to(3),
        RoomSpec::new(3, "Study", 2).with_doors(&[4]).overflowing_to(4),
        RoomSpec::new(4, "Attic", 4).with_doors(&[5]).overflowing_to(5),
        RoomSpec::new(5, "Den", 5).with_doors(&[6]).overflowing_to(6),
        RoomSpec::new(6, "Garage", 8),
    ])
    .unwrap()
}

fn cycle_rooms() -> Vec<RoomSpec> {
    vec![
        RoomSpec::new(0, "Outside", 0).with_doors(&[1]),
        RoomSpec::new(1, "Attic", 1).with_doors(&[2]).overflowing_to(2),
        RoomSpec::new(2, "Cellar", 1).overflowing_to(1),
    ]
}

/// Test that an empty target room catches exactly one unit.
#[test]
fn test_breakout_in_empty_room() {
    let graph = street();
    let mut board = BoardState::with_levels(&graph, std::iter::empty());

    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 5);

    assert_eq!(board.level(RoomId::new(5)), 1);
    assert_eq!(board.total_fire(), 1);
    assert!(!outcome.uncontained);
    assert_eq!(
        outcome.events.as_slice(),
        &[
            SpreadEvent::Breakout { room: RoomId::new(5) },
            SpreadEvent::Spread { room: RoomId::new(5), added: 1, level: 1 },
        ]
    );
}

/// Test that a burning room doubles and the excess overflows.
#[test]
fn test_doubling_overflows_excess() {
    let graph = street();
    let mut board = BoardState::with_levels(&graph, [(RoomId::new(5), 3)]);

    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 5);

    assert_eq!(board.level(RoomId::new(5)), 5);
    assert_eq!(board.level(RoomId::new(6)), 1);
    assert!(!outcome.uncontained);
    assert!(outcome.events.contains(&SpreadEvent::CapacityReached {
        room: RoomId::new(5),
        capacity: 5,
    }));
    assert!(outcome.events.contains(&SpreadEvent::Overflow {
        from: RoomId::new(5),
        to: RoomId::new(6),
        amount: 1,
    }));
    // Overflow into an empty room is not a new breakout.
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, SpreadEvent::Breakout { .. })));
}

/// Test that overflow carries its amount through several full rooms.
#[test]
fn test_cascade_through_full_rooms() {
    let graph = street();
    let mut board = BoardState::with_levels(
        &graph,
        [(RoomId::new(2), 3), (RoomId::new(3), 2), (RoomId::new(4), 3)],
    );

    // Hall doubles 3 -> 3 overflow, Study is full, Attic takes 1, Den takes 2.
    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 2);

    assert_eq!(board.level(RoomId::new(2)), 3);
    assert_eq!(board.level(RoomId::new(3)), 2);
    assert_eq!(board.level(RoomId::new(4)), 4);
    assert_eq!(board.level(RoomId::new(5)), 2);
    assert_eq!(outcome.units_added(), 3);
    assert!(!outcome.uncontained);
}

/// Test that overflow past the end of the chain is uncontained.
#[test]
fn test_end_of_chain_is_uncontained() {
    let graph = street();
    let mut board = BoardState::with_levels(&graph, [(RoomId::new(6), 8)]);

    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 6);

    assert!(outcome.uncontained);
    assert_eq!(
        outcome.events.last(),
        Some(&SpreadEvent::Uncontained { room: RoomId::new(6), amount: 8 })
    );
    assert_eq!(board.level(RoomId::new(6)), 8);
}

/// Test that a two-room overflow loop ends the spread exactly once.
#[test]
fn test_cycle_is_uncontained_once() {
    let graph = RoomGraph::build(&cycle_rooms()).unwrap();
    let mut board = BoardState::new(&graph);

    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 1);

    let uncontained = outcome
        .events
        .iter()
        .filter(|e| matches!(e, SpreadEvent::Uncontained { .. }))
        .count();
    assert_eq!(uncontained, 1);
    assert!(outcome.uncontained);
    assert_eq!(board.level(RoomId::new(1)), 1);
    assert_eq!(board.level(RoomId::new(2)), 1);
}

/// Test that a flame total with no matching room burns nothing.
#[test]
fn test_flames_without_a_room_are_wasted() {
    let graph = street();
    let mut board = BoardState::new(&graph);
    let before = board.clone();

    let outcome = FireSpreadEngine::new(&graph).spread(&mut board, 9);

    assert!(outcome.events.is_empty());
    assert_eq!(board, before);
}

/// Test that losing containment ends the game for every intent.
#[test]
fn test_uncontained_fire_ends_the_game() {
    let config = GameConfig::new(cycle_rooms())
        .with_player(Character::new("Lion", "🦁", "Leader", 3, 3));
    // One flame 1, everything else flame 0.
    let mut game = GameBuilder::new()
        .config(config)
        .build_with(ScriptedFaces::new([0, 0, 5, 5]))
        .unwrap();

    game.roll();
    let applied = game.confirm_roll();

    assert!(applied.is_accepted());
    assert!(game.is_over());
    assert_eq!(
        game.state().outcome,
        GameOutcome::Uncontained { room: RoomId::new(2) }
    );
    assert_eq!(
        applied.events.last().map(|e| e.category),
        Some(LogCategory::Game)
    );
    assert_eq!(
        game.rules().is_terminal(game.state()),
        Some(GameOutcome::Uncontained { room: RoomId::new(2) })
    );

    let before = game.state().clone();
    assert_eq!(game.end_turn().rejected, Some(IntentError::GameOver));
    assert_eq!(game.move_to(RoomId::new(1)).rejected, Some(IntentError::GameOver));
    assert_eq!(game.state(), &before);
    assert!(game.legal_intents().is_empty());
    assert!(game.legal_moves().is_empty());
}

/// Test that rolled flames reach the board through the turn.
#[test]
fn test_rolled_flames_spread_on_the_standard_house() {
    // Flame 3 + flame 2: the Front Hallway (capacity 1) is full, so its
    // doubled unit overflows into the Den.
    let mut game = GameBuilder::new()
        .build_with(ScriptedFaces::new([0, 2, 1, 5]))
        .unwrap();

    game.roll();
    let applied = game.confirm_roll();

    assert_eq!(game.state().turn.flames_rolled, 5);
    assert_eq!(game.state().board.level(RoomId::new(5)), 1);
    assert_eq!(game.state().board.level(RoomId::new(6)), 2);
    assert!(applied
        .events
        .iter()
        .any(|e| e.text == "1 flame(s) overflow from the Front Hallway into the Den"));
    assert!(!game.is_over());
}
