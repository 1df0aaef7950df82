//! Shared helpers for the integration tests.

#![allow(dead_code)]

use delve::{
    DelveResult, DoorChoice, DoorSelector, GameSession, Reward, RewardSink, Room, RoomId, Task,
    TaskPresenter, TurnOutcome,
};

/// Answer given when a test wants a task to fail.
pub const WRONG_ANSWER: &str = "certainly not the answer";

/// A controller that is told the door and the answer before each turn.
#[derive(Debug, Default)]
pub struct Planned {
    pub choice: Option<DoorChoice>,
    pub answer: Option<String>,
    pub questions_asked: usize,
    pub informations_shown: usize,
    pub rewards: Vec<(Reward, u32)>,
}

impl DoorSelector for Planned {
    fn select_door(&mut self, _room: &Room) -> DoorChoice {
        self.choice.take().unwrap_or(DoorChoice::Leave)
    }
}

impl TaskPresenter for Planned {
    fn present_information(&mut self, _text: &str) {
        self.informations_shown += 1;
    }

    fn present_question(&mut self, _prompt: &str) -> String {
        self.questions_asked += 1;
        self.answer.take().unwrap_or_default()
    }
}

impl RewardSink for Planned {
    fn reward_acquired(&mut self, reward: &Reward, lost: u32) {
        self.rewards.push((reward.clone(), lost));
    }
}

/// Fills the doors of the player's room and returns its door targets.
pub fn open_doors(session: &mut GameSession) -> Vec<RoomId> {
    let current = session
        .player
        .current_room()
        .expect("player is still in the dungeon");
    session.dungeon.fill_doors(current).unwrap();
    session.dungeon.room(current).doors().to_vec()
}

/// Walks through `door`, answering correctly if `correct` is set.
pub fn walk(
    session: &mut GameSession,
    controller: &mut Planned,
    door: usize,
    correct: bool,
) -> DelveResult<TurnOutcome> {
    let targets = open_doors(session);
    controller.choice = Some(DoorChoice::Door(door));
    controller.answer = Some(WRONG_ANSWER.to_string());
    if correct {
        if let Some(&target) = targets.get(door) {
            if target >= 0 {
                if let Some(Task::Question { answer, .. }) = &session.dungeon.room(target).task {
                    controller.answer = Some(answer.clone());
                }
            }
        }
    }
    session.take_turn(controller)
}

/// Walks through door 1 `turns` times with correct answers.
pub fn walk_door_one(session: &mut GameSession, turns: usize) -> Vec<TurnOutcome> {
    let mut controller = Planned::default();
    (0..turns)
        .map(|_| walk(session, &mut controller, 1, true).unwrap())
        .collect()
}
