//! # Generation Module
//!
//! Lazy construction of the room graph and of the content that fills it.
//!
//! The [`Dungeon`] grows one room at a time as the player opens doors. Each new
//! room asks a [`TaskFactory`] for its task, and the first successful entry
//! asks a [`RewardFactory`] for its reward. Both draw from the shared
//! [`GameContext`], so a seed fully determines the graph and its content for a
//! given sequence of player choices.

pub mod content;
pub mod dungeon;
pub mod rewards;
pub mod tasks;

pub use content::*;
pub use dungeon::*;
pub use rewards::*;
pub use tasks::*;

use crate::utils::{GameRng, SeededRng};
use crate::{config, Player, Reward, RoomId, Task};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Configuration for dungeon generation and the player's starting inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Maximum number of rooms, Start included. Once reached, doors only
    /// lead to existing rooms.
    pub room_limit: i32,
    /// Probability that a door leads to an existing room (0.0 to 1.0)
    pub loop_back_chance: f64,
    /// Starting inventory capacity in stacks
    pub inventory_capacity: usize,
    /// Starting stack capacity
    pub stack_capacity: u32,
}

impl DungeonConfig {
    /// Creates the default configuration for a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::DungeonConfig;
    ///
    /// let config = DungeonConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.room_limit, i32::MAX);
    /// assert!(config.loop_back_chance > 0.36 && config.loop_back_chance < 0.37);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            room_limit: i32::MAX,
            loop_back_chance: config::LOOP_BACK_CHANCE,
            inventory_capacity: config::DEFAULT_INVENTORY_CAPACITY,
            stack_capacity: config::DEFAULT_STACK_CAPACITY,
        }
    }

    /// Creates a small configuration for tests, with a tight room limit and
    /// a cramped inventory.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            room_limit: 64,
            loop_back_chance: config::LOOP_BACK_CHANCE,
            inventory_capacity: 2,
            stack_capacity: 2,
        }
    }

    /// Sets the room limit.
    pub fn with_room_limit(mut self, room_limit: i32) -> Self {
        self.room_limit = room_limit;
        self
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Everything generation draws from: the shared random source and the content
/// tables.
#[derive(Debug)]
pub struct GameContext {
    pub rng: Box<dyn GameRng>,
    pub items: ItemCatalog,
    pub creatures: CreatureCatalog,
    pub information_lines: Vec<String>,
    pub diss_lines: Vec<String>,
}

impl GameContext {
    /// Creates a context with built-in content and a seeded generator.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Box::new(SeededRng::new(seed)))
    }

    /// Creates a context with built-in content around any generator.
    pub fn with_rng(rng: Box<dyn GameRng>) -> Self {
        Self {
            rng,
            items: ItemCatalog::default(),
            creatures: CreatureCatalog::default(),
            information_lines: default_information_lines(),
            diss_lines: default_diss_lines(),
        }
    }

    /// Picks a random line for a failed crafting attempt.
    pub fn random_diss_line(&mut self) -> Option<String> {
        crate::utils::choose(self.rng.as_mut(), &self.diss_lines).cloned()
    }
}

/// Produces the task of a newly generated room.
///
/// Never called for the Start or Exit room.
pub trait TaskFactory: Debug {
    fn create_task(&self, room_id: RoomId, context: &mut GameContext) -> Task;
}

/// Decides the reward of a room on its first successful entry.
pub trait RewardFactory: Debug {
    fn create_reward(
        &self,
        room_id: RoomId,
        player: &Player,
        context: &mut GameContext,
    ) -> Option<Reward>;
}
