//! # Player
//!
//! The player's position, progress and belongings, and the turn state
//! machine that moves the player through the dungeon.
//!
//! A player is either exploring (standing in a room) or has left the
//! dungeon. Everything a turn needs from the outside world (which door to
//! take, the answer to a question, where to report a reward) comes through
//! the [`Controller`] capabilities, so console play, scripted tests and
//! simulated players all drive the same state machine.

use crate::persistence::{SaveReader, SaveWriter};
use crate::{
    CraftOutcome, Creature, DelveError, DelveResult, Dungeon, DungeonConfig, GameContext,
    Inventory, Item, ItemCatalog, RecipeBook, Reward, Room, RoomId, TaskPresenter, EXIT_ID,
    START_ID,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// A choice made at a room's doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorChoice {
    /// Walk through the door with this index.
    Door(usize),
    /// Leave the dungeon.
    Leave,
}

/// Chooses a door in a room whose doors are filled.
pub trait DoorSelector {
    fn select_door(&mut self, room: &Room) -> DoorChoice;
}

/// Receives rewards once they have been collected.
pub trait RewardSink {
    /// `lost` counts the units that did not fit into the inventory.
    fn reward_acquired(&mut self, reward: &Reward, lost: u32);
}

/// Everything a turn asks of the outside world.
pub trait Controller: DoorSelector + TaskPresenter + RewardSink {}

impl<T: DoorSelector + TaskPresenter + RewardSink> Controller for T {}

/// What happened during one call to [`Player::enter_next_room`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player is now in `room`. `cleared` is set if its task was solved
    /// during this turn.
    Moved {
        room: RoomId,
        cleared: bool,
        reward: Option<Reward>,
        lost: u32,
    },
    /// The task of `attempted` was failed; the player stays where they were.
    RolledBack { attempted: RoomId },
    /// The player left the dungeon.
    Left,
}

/// The player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    current_room: Option<RoomId>,
    cleared_tasks: BTreeSet<RoomId>,
    highest_room_number: RoomId,
    pub menagerie: Vec<Creature>,
    pub inventory: Inventory,
}

impl Player {
    /// Creates a player standing in the Start room with an empty inventory.
    pub fn new(config: &DungeonConfig) -> Self {
        Self {
            current_room: Some(START_ID),
            cleared_tasks: BTreeSet::new(),
            highest_room_number: START_ID,
            menagerie: Vec::new(),
            inventory: Inventory::new(config.inventory_capacity, config.stack_capacity),
        }
    }

    /// The room the player stands in, `None` once they have left.
    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    pub fn has_left(&self) -> bool {
        self.current_room.is_none()
    }

    pub fn highest_room_number(&self) -> RoomId {
        self.highest_room_number
    }

    pub fn has_cleared_task(&self, room_id: RoomId) -> bool {
        self.cleared_tasks.contains(&room_id)
    }

    pub fn cleared_tasks(&self) -> &BTreeSet<RoomId> {
        &self.cleared_tasks
    }

    pub fn cleared_task_count(&self) -> usize {
        self.cleared_tasks.len()
    }

    /// Plays one turn.
    ///
    /// Fills the doors of the current room, lets the controller pick one and
    /// moves through it. Entering a room with an unsolved task requires
    /// solving it; failing puts the player back where they came from. Rooms
    /// generated along the way stay generated. A successful entry collects
    /// the room's reward if it has not been collected yet.
    ///
    /// Fails with [`DelveError::InvalidState`] if the player has already
    /// left, and with [`DelveError::InvalidAction`] if the controller picks a
    /// door the room does not have.
    pub fn enter_next_room<C: Controller + ?Sized>(
        &mut self,
        dungeon: &mut Dungeon,
        controller: &mut C,
    ) -> DelveResult<TurnOutcome> {
        let previous = self.current_room.ok_or_else(|| {
            DelveError::InvalidState("the player has already left the dungeon".to_string())
        })?;
        dungeon.fill_doors(previous)?;

        let room = dungeon.room(previous);
        let selected = match controller.select_door(room) {
            DoorChoice::Leave => None,
            DoorChoice::Door(index) => Some(room.door_target(index).ok_or_else(|| {
                DelveError::InvalidAction(format!("room {previous} has no door {index}"))
            })?),
        };

        self.current_room = selected.filter(|&id| id != EXIT_ID);
        let Some(next) = self.current_room else {
            info!("Player left the dungeon from room {}", previous);
            return Ok(TurnOutcome::Left);
        };

        let mut cleared = false;
        if let Some(task) = &dungeon.room(next).task {
            if !self.has_cleared_task(next) {
                if task.resolve(controller) {
                    self.cleared_tasks.insert(next);
                    self.highest_room_number = self.highest_room_number.max(next);
                    cleared = true;
                } else {
                    debug!("Task of room {} failed, back to room {}", next, previous);
                    self.current_room = Some(previous);
                    return Ok(TurnOutcome::RolledBack { attempted: next });
                }
            }
        }

        let reward = dungeon.award_reward(next, self);
        let lost = match &reward {
            Some(reward) => {
                let lost = self.collect(reward);
                controller.reward_acquired(reward, lost);
                lost
            }
            None => 0,
        };
        debug!("Player moved from room {} to room {}", previous, next);
        Ok(TurnOutcome::Moved {
            room: next,
            cleared,
            reward,
            lost,
        })
    }

    /// Routes a reward by kind and returns the number of units lost.
    fn collect(&mut self, reward: &Reward) -> u32 {
        match reward {
            Reward::Creature { creature, amount } => {
                self.menagerie
                    .extend(std::iter::repeat(creature).take(*amount as usize).cloned());
                0
            }
            Reward::Item { item, amount } => (0..*amount)
                .filter(|_| !self.inventory.add_item(item))
                .count() as u32,
            Reward::PermanentUpgrade { kind } => {
                kind.apply(&mut self.inventory);
                0
            }
        }
    }

    /// Crafts two items into the output of the matching recipe.
    ///
    /// The inputs are removed before the output is added. If the output no
    /// longer fits, the inputs stay consumed.
    pub fn craft(
        &mut self,
        first: &Item,
        second: &Item,
        recipes: &RecipeBook,
        context: &mut GameContext,
    ) -> CraftOutcome {
        let Some(recipe) = recipes.find(first, second) else {
            return CraftOutcome::NoRecipe {
                diss_line: context.random_diss_line(),
            };
        };
        if !self.inventory.contains_all(recipe.input()) {
            return CraftOutcome::MissingIngredients;
        }
        let removed = self.inventory.remove_all(recipe.input());
        debug_assert!(removed);
        let output = recipe.output_item().clone();
        if self.inventory.add_all(recipe.output()) {
            CraftOutcome::Crafted(output)
        } else {
            CraftOutcome::CraftedWithLoss(output)
        }
    }

    /// Writes the player record.
    ///
    /// Layout: current room id (`-1` once left), highest room number, the
    /// cleared task ids in ascending order, the menagerie, then the
    /// inventory. The first field holds the room the player stands in, not
    /// the room of a rollback.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_i32(self.current_room.unwrap_or(EXIT_ID))?;
        writer.write_i32(self.highest_room_number)?;
        writer.write_len(self.cleared_tasks.len())?;
        for &id in &self.cleared_tasks {
            writer.write_i32(id)?;
        }
        writer.write_len(self.menagerie.len())?;
        for creature in &self.menagerie {
            creature.encode(writer)?;
        }
        self.inventory.encode(writer)
    }

    /// Reads a player record. Room ids must refer to one of `room_count`
    /// rooms.
    pub fn decode<R: Read>(
        reader: &mut SaveReader<R>,
        room_count: usize,
        catalog: &ItemCatalog,
    ) -> DelveResult<Self> {
        let in_dungeon = |id: RoomId| id >= START_ID && (id as i64) < room_count as i64;

        let current = reader.read_i32()?;
        let current_room = match current {
            EXIT_ID => None,
            id if in_dungeon(id) => Some(id),
            id => {
                return Err(DelveError::CorruptSave(format!(
                    "player stands in unknown room {id}"
                )))
            }
        };
        let highest_room_number = reader.read_i32()?;
        if !in_dungeon(highest_room_number) {
            return Err(DelveError::CorruptSave(format!(
                "highest room number {highest_room_number} out of range"
            )));
        }

        let cleared_count = reader.read_len()?;
        let mut cleared_tasks = BTreeSet::new();
        for _ in 0..cleared_count {
            let id = reader.read_i32()?;
            if !in_dungeon(id) || !cleared_tasks.insert(id) {
                return Err(DelveError::CorruptSave(format!("invalid cleared task {id}")));
            }
        }

        let menagerie_count = reader.read_len()?;
        let menagerie = (0..menagerie_count)
            .map(|_| Creature::decode(reader))
            .collect::<DelveResult<Vec<_>>>()?;

        let inventory = Inventory::decode(reader, catalog)?;
        Ok(Self {
            current_room,
            cleared_tasks,
            highest_room_number,
            menagerie,
            inventory,
        })
    }
}
