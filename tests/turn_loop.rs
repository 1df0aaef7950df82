//! Integration tests for the turn loop: moving, rollbacks, leaving and room
//! exhaustion.

mod common;

use common::{open_doors, walk, walk_door_one, Planned};
use delve::{
    DelveError, DoorChoice, DungeonConfig, GameSession, RoomId, Task, TurnOutcome, EXIT_ID,
    START_ID,
};
use std::collections::BTreeSet;

/// Finds a seed and a Start door leading to a question room.
fn question_door() -> (GameSession, usize, RoomId) {
    for seed in 0..100 {
        let mut session = GameSession::new(DungeonConfig::new(seed));
        let targets = open_doors(&mut session);
        for (door, &target) in targets.iter().enumerate().skip(1) {
            if let Some(Task::Question { .. }) = session.dungeon.room(target).task {
                return (session, door, target);
            }
        }
    }
    panic!("no question room behind any Start door");
}

#[test]
fn test_correct_answers_through_door_one() {
    let mut session = GameSession::new(DungeonConfig::new(0));
    let mut controller = Planned::default();
    let mut entered_task_rooms = BTreeSet::new();
    let mut highest = session.player.highest_room_number();

    for _ in 0..200 {
        let outcome = walk(&mut session, &mut controller, 1, true).unwrap();
        let TurnOutcome::Moved { room, .. } = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        if session.dungeon.room(room).task.is_some() {
            entered_task_rooms.insert(room);
        }
        assert!(session.player.highest_room_number() >= highest);
        highest = session.player.highest_room_number();
    }

    assert_eq!(session.player.cleared_tasks(), &entered_task_rooms);
    assert_eq!(
        session.player.highest_room_number(),
        entered_task_rooms.iter().copied().max().unwrap_or(START_ID)
    );
    assert_eq!(session.statistics.turns, 200);
    assert_eq!(session.statistics.moves, 200);
    assert_eq!(session.statistics.rollbacks, 0);
    assert_eq!(
        session.statistics.tasks_cleared as usize,
        entered_task_rooms.len()
    );
}

#[test]
fn test_wrong_answer_rolls_back() {
    let (mut session, door, target) = question_door();
    let rooms_before = session.dungeon.room_count();
    let mut controller = Planned::default();

    let outcome = walk(&mut session, &mut controller, door, false).unwrap();
    assert_eq!(outcome, TurnOutcome::RolledBack { attempted: target });
    assert_eq!(session.player.current_room(), Some(START_ID));
    assert!(!session.player.has_cleared_task(target));
    assert_eq!(session.player.highest_room_number(), START_ID);
    assert!(!session.dungeon.room(target).reward_collected);
    assert!(controller.rewards.is_empty());
    assert_eq!(session.dungeon.room_count(), rooms_before);
    assert_eq!(session.statistics.rollbacks, 1);

    let outcome = walk(&mut session, &mut controller, door, true).unwrap();
    assert!(matches!(
        outcome,
        TurnOutcome::Moved { room, cleared: true, .. } if room == target
    ));
    assert!(session.dungeon.room(target).reward_collected);
    assert_eq!(session.player.highest_room_number(), target);
}

#[test]
fn test_revisiting_a_cleared_room() {
    let (mut session, door, target) = question_door();
    let mut controller = Planned::default();

    walk(&mut session, &mut controller, door, true).unwrap();
    assert_eq!(controller.questions_asked, 1);
    assert_eq!(session.dungeon.room(target).from_id, START_ID);

    let back = walk(&mut session, &mut controller, 0, false).unwrap();
    assert!(matches!(back, TurnOutcome::Moved { room: START_ID, .. }));

    let again = walk(&mut session, &mut controller, door, false).unwrap();
    assert_eq!(
        again,
        TurnOutcome::Moved {
            room: target,
            cleared: false,
            reward: None,
            lost: 0
        }
    );
    assert_eq!(controller.questions_asked, 1);
    assert_eq!(session.player.cleared_task_count(), 1);
}

#[test]
fn test_room_limit_is_respected() {
    let config = DungeonConfig::new(11).with_room_limit(3);
    let mut session = GameSession::new(config);
    let outcomes = walk_door_one(&mut session, 100);

    assert_eq!(outcomes.len(), 100);
    assert!(session.dungeon.room_count() <= 3);
    for room in session.dungeon.rooms() {
        assert!(room.doors().iter().all(|&door| door >= EXIT_ID && door < 3));
    }
}

#[test]
fn test_leaving_through_start() {
    let mut session = GameSession::new(DungeonConfig::new(4));
    let mut controller = Planned::default();

    let targets = open_doors(&mut session);
    assert_eq!(targets[0], EXIT_ID);

    let outcome = walk(&mut session, &mut controller, 0, true).unwrap();
    assert_eq!(outcome, TurnOutcome::Left);
    assert!(session.is_over());
    assert_eq!(session.player.current_room(), None);

    controller.choice = Some(DoorChoice::Door(1));
    assert!(matches!(
        session.take_turn(&mut controller),
        Err(DelveError::InvalidState(_))
    ));
}

#[test]
fn test_leave_from_deeper_room() {
    let mut session = GameSession::new(DungeonConfig::new(5));
    walk_door_one(&mut session, 5);

    let mut controller = Planned {
        choice: Some(DoorChoice::Leave),
        ..Default::default()
    };
    assert_eq!(session.take_turn(&mut controller).unwrap(), TurnOutcome::Left);
    assert!(session.is_over());
}

#[test]
fn test_invalid_door_is_rejected() {
    let mut session = GameSession::new(DungeonConfig::new(6));
    let mut controller = Planned::default();

    let result = walk(&mut session, &mut controller, 99, true);
    assert!(matches!(result, Err(DelveError::InvalidAction(_))));
    assert_eq!(session.player.current_room(), Some(START_ID));
}

#[test]
fn test_same_seed_same_game() {
    let mut first = GameSession::new(DungeonConfig::new(7));
    let mut second = GameSession::new(DungeonConfig::new(7));

    let first_outcomes = walk_door_one(&mut first, 40);
    let second_outcomes = walk_door_one(&mut second, 40);

    assert_eq!(first_outcomes, second_outcomes);
    assert_eq!(first.dungeon, second.dungeon);
    assert_eq!(first.player, second.player);
}
