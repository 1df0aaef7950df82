//! Integration tests for saving and loading whole games.

mod common;

use common::{open_doors, walk, walk_door_one, Planned};
use delve::{
    load_from_bytes, save_to_bytes, DelveError, DungeonConfig, GameSession, Item, TurnOutcome,
};
use proptest::prelude::*;

/// Plays a session, picking doors by index modulo the door count.
fn play(seed: u64, moves: &[(usize, bool)]) -> GameSession {
    let mut session = GameSession::new(DungeonConfig::new(seed));
    let mut controller = Planned::default();
    for &(door, correct) in moves {
        if session.is_over() {
            break;
        }
        let doors = open_doors(&mut session).len();
        walk(&mut session, &mut controller, door % doors, correct).unwrap();
    }
    session
}

#[test]
fn test_replay_is_byte_identical() {
    let moves: Vec<(usize, bool)> = (0..60).map(|i| (1 + i % 3, i % 4 != 0)).collect();
    let first = save_to_bytes(&play(21, &moves)).unwrap();
    let second = save_to_bytes(&play(21, &moves)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_after_play() {
    let mut session = GameSession::new(DungeonConfig::new(8));
    walk_door_one(&mut session, 50);

    let bytes = save_to_bytes(&session).unwrap();
    let loaded = load_from_bytes(&bytes, DungeonConfig::new(8)).unwrap();

    assert_eq!(loaded.dungeon, session.dungeon);
    assert_eq!(loaded.player, session.player);
    assert_eq!(save_to_bytes(&loaded).unwrap(), bytes);
}

#[test]
fn test_loaded_game_can_continue() {
    let mut session = GameSession::new(DungeonConfig::new(9));
    walk_door_one(&mut session, 10);
    let bytes = save_to_bytes(&session).unwrap();

    let mut loaded = load_from_bytes(&bytes, DungeonConfig::new(9)).unwrap();
    let outcomes = walk_door_one(&mut loaded, 10);
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, TurnOutcome::Moved { .. })));
    assert!(loaded.dungeon.room_count() >= session.dungeon.room_count());
}

#[test]
fn test_left_player_round_trips() {
    let mut session = GameSession::new(DungeonConfig::new(10));
    let mut controller = Planned::default();
    walk(&mut session, &mut controller, 0, true).unwrap();
    assert!(session.is_over());

    let bytes = save_to_bytes(&session).unwrap();
    let loaded = load_from_bytes(&bytes, DungeonConfig::new(10)).unwrap();
    assert!(loaded.is_over());
}

#[test]
fn test_save_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");

    let mut session = GameSession::new(DungeonConfig::new(12));
    walk_door_one(&mut session, 25);
    session.save(&path).unwrap();

    let loaded = GameSession::load(&path, DungeonConfig::new(12)).unwrap();
    assert_eq!(loaded.dungeon, session.dungeon);
    assert_eq!(loaded.player, session.player);
    assert_eq!(std::fs::read(&path).unwrap(), save_to_bytes(&session).unwrap());
}

#[test]
fn test_truncated_save_is_rejected() {
    let mut session = GameSession::new(DungeonConfig::new(13));
    walk_door_one(&mut session, 15);
    let bytes = save_to_bytes(&session).unwrap();

    for len in 0..bytes.len() {
        assert!(
            load_from_bytes(&bytes[..len], DungeonConfig::new(13)).is_err(),
            "a save cut to {len} of {} bytes was accepted",
            bytes.len()
        );
    }
}

#[test]
fn test_unknown_item_is_rejected() {
    let mut session = GameSession::new(DungeonConfig::new(14));
    assert!(session.player.inventory.add_item(&Item::new("Philosopher's Stone", "")));
    let bytes = save_to_bytes(&session).unwrap();

    let result = load_from_bytes(&bytes, DungeonConfig::new(14));
    assert!(matches!(result, Err(DelveError::UnknownItem(name)) if name == "Philosopher's Stone"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_played_games_round_trip(
        seed in any::<u64>(),
        moves in prop::collection::vec((0usize..8, any::<bool>()), 0..40),
    ) {
        let session = play(seed, &moves);
        let bytes = save_to_bytes(&session).unwrap();
        let loaded = load_from_bytes(&bytes, DungeonConfig::new(seed)).unwrap();

        prop_assert_eq!(&loaded.dungeon, &session.dungeon);
        prop_assert_eq!(&loaded.player, &session.player);
        prop_assert_eq!(save_to_bytes(&loaded).unwrap(), bytes);
    }
}
