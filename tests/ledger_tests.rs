//! Token accounting through full turns.

use firefighters::core::{
    Character, ExtinguishError, GameConfig, IntentError, RulesConfig, ScriptedFaces,
};
use firefighters::ledger::ResourceLedger;
use firefighters::{Game, GameBuilder, LogCategory, RoomId};

/// Friendly die on water 2, dangerous dice on water 1: five water, no fire.
const WET_ROLL: [usize; 4] = [3, 4, 4, 4];

fn kitchen_fire(config: GameConfig, faces: impl IntoIterator<Item = usize>) -> Game<ScriptedFaces> {
    GameBuilder::new()
        .config(config)
        .fire_levels([(RoomId::new(2), 2)])
        .build_with(ScriptedFaces::new(faces))
        .unwrap()
}

/// Test that collected water stops at the character's capacity.
#[test]
fn test_water_clamps_at_capacity() {
    let mut game = kitchen_fire(GameConfig::standard(), WET_ROLL.repeat(5));

    game.roll();
    let applied = game.confirm_roll();

    // The Lion carries at most 3 water.
    assert_eq!(game.state().turn.water_collected, 5);
    assert_eq!(game.state().current().water_tokens, 3);
    assert!(applied
        .events
        .iter()
        .any(|e| e.category == LogCategory::Warning && e.text.contains("2 water lost")));

    // A full tank shows no change on the next collection.
    for _ in 0..4 {
        game.end_turn();
        game.roll();
        game.confirm_roll();
    }
    assert_eq!(game.state().current_player.index(), 0);
    assert_eq!(game.state().current().water_tokens, 3);
}

/// Test that each extinguish trades one water for one banked fire.
#[test]
fn test_extinguish_trades_water_for_fire() {
    let mut game = kitchen_fire(GameConfig::standard(), WET_ROLL);
    game.roll();
    game.confirm_roll();

    assert!(game.can_extinguish(RoomId::new(2)));
    assert!(game.extinguish(RoomId::new(2)).is_accepted());

    let state = game.state();
    assert_eq!(state.board.level(RoomId::new(2)), 1);
    assert_eq!(state.current().water_tokens, 2);
    assert_eq!(state.current().fire_tokens_banked, 1);
    assert_eq!(ResourceLedger::totals(state), (2, 1));
}

/// Test that extinguishing a room with no fire never changes state.
#[test]
fn test_extinguish_empty_room_is_a_no_op() {
    let mut game = kitchen_fire(GameConfig::standard(), WET_ROLL);
    game.roll();
    game.confirm_roll();
    game.extinguish(RoomId::new(2));
    game.extinguish(RoomId::new(2));
    assert_eq!(game.state().board.level(RoomId::new(2)), 0);

    let before = game.state().clone();
    let applied = game.extinguish(RoomId::new(2));

    assert_eq!(
        applied.rejected,
        Some(IntentError::CannotExtinguish(ExtinguishError::NoFire(RoomId::new(2))))
    );
    assert_eq!(game.state(), &before);
    assert!(!game.can_extinguish(RoomId::new(2)));
}

/// Test that extinguishing needs water.
#[test]
fn test_extinguish_without_water() {
    // Friendly steps 1, dangerous flame 0: no water at all.
    let mut game = kitchen_fire(GameConfig::standard(), [0, 5, 5, 5]);
    game.roll();
    game.confirm_roll();

    assert_eq!(
        game.extinguish(RoomId::new(2)).rejected,
        Some(IntentError::CannotExtinguish(ExtinguishError::NoWater))
    );
    assert_eq!(game.state().board.level(RoomId::new(2)), 2);
}

/// Test that fire past the bank capacity is put out but not kept.
#[test]
fn test_full_fire_bank_still_extinguishes() {
    let config = GameConfig::standard();
    let rooms = config.rooms.clone();
    let config = GameConfig::new(rooms)
        .with_player(Character::new("Beaver", "🦫", "Builder", 5, 1));
    let mut game = kitchen_fire(config, WET_ROLL);
    game.roll();
    game.confirm_roll();

    game.extinguish(RoomId::new(2));
    let applied = game.extinguish(RoomId::new(2));

    assert!(applied.is_accepted());
    assert_eq!(game.state().board.level(RoomId::new(2)), 0);
    assert_eq!(game.state().current().fire_tokens_banked, 1);
    assert!(applied.events.iter().any(|e| e.category == LogCategory::Warning));
}

/// Test the optional rule that firefighters must stand in the room.
#[test]
fn test_presence_rule() {
    let config = GameConfig::standard().with_rules(RulesConfig {
        extinguish_requires_presence: true,
        ..RulesConfig::default()
    });
    // Water 2 and three steps 1 on the dangerous dice.
    let mut game = kitchen_fire(config, [3, 3, 3, 3]);
    game.roll();
    game.confirm_roll();

    assert_eq!(
        game.extinguish(RoomId::new(2)).rejected,
        Some(IntentError::CannotExtinguish(ExtinguishError::NotInRoom(RoomId::new(2))))
    );

    game.move_to(RoomId::new(2));
    assert!(game.extinguish(RoomId::new(2)).is_accepted());
}
