//! # Game Session Module
//!
//! The session ties the dungeon, the player and the recipe book together and
//! keeps running statistics. It is the unit that is saved and loaded.

use crate::persistence::{self, SaveReader, SaveWriter};
use crate::{
    Controller, CraftOutcome, DelveError, DelveResult, Dungeon, DungeonConfig, GameContext, Item,
    Player, RecipeBook, Reward, TurnOutcome,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Running totals over a session's turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Turns played
    pub turns: u32,
    /// Turns that ended in another room
    pub moves: u32,
    /// Turns undone by a failed task
    pub rollbacks: u32,
    /// Tasks solved
    pub tasks_cleared: u32,
    /// Rewards collected, of any kind
    pub rewards_collected: u32,
    /// Creatures that joined the menagerie
    pub creatures_collected: u32,
    /// Item units that did not fit into the inventory
    pub items_lost: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on the outcome of a turn.
    pub fn update_from_outcome(&mut self, outcome: &TurnOutcome) {
        self.turns += 1;
        match outcome {
            TurnOutcome::Moved {
                cleared,
                reward,
                lost,
                ..
            } => {
                self.moves += 1;
                if *cleared {
                    self.tasks_cleared += 1;
                }
                if let Some(reward) = reward {
                    self.rewards_collected += 1;
                    if let Reward::Creature { amount, .. } = reward {
                        self.creatures_collected += amount;
                    }
                }
                self.items_lost += lost;
            }
            TurnOutcome::RolledBack { .. } => self.rollbacks += 1,
            TurnOutcome::Left => {}
        }
    }
}

/// A game in progress.
#[derive(Debug)]
pub struct GameSession {
    pub dungeon: Dungeon,
    pub player: Player,
    pub recipes: RecipeBook,
    pub statistics: GameStatistics,
}

/// Serializable view of a session for debugging.
#[derive(Serialize)]
struct SessionSnapshot<'a> {
    config: &'a DungeonConfig,
    rooms: &'a [crate::Room],
    player: &'a Player,
    statistics: &'a GameStatistics,
}

impl GameSession {
    /// Starts a new game from a configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DungeonConfig, GameSession, START_ID};
    ///
    /// let session = GameSession::new(DungeonConfig::new(0));
    /// assert_eq!(session.player.current_room(), Some(START_ID));
    /// assert_eq!(session.dungeon.room_count(), 1);
    /// ```
    pub fn new(config: DungeonConfig) -> Self {
        info!("Starting a new game with seed {}", config.seed);
        let context = GameContext::new(config.seed);
        let player = Player::new(&config);
        let recipes = RecipeBook::from_catalog(&context.items);
        Self {
            dungeon: Dungeon::new(config, context),
            player,
            recipes,
            statistics: GameStatistics::new(),
        }
    }

    /// Builds a session around an existing dungeon and player.
    pub fn from_parts(dungeon: Dungeon, player: Player) -> Self {
        let recipes = RecipeBook::from_catalog(&dungeon.context().items);
        Self {
            dungeon,
            player,
            recipes,
            statistics: GameStatistics::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.player.has_left()
    }

    /// Plays one turn and records it in the statistics.
    pub fn take_turn<C: Controller + ?Sized>(&mut self, controller: &mut C) -> DelveResult<TurnOutcome> {
        let outcome = self.player.enter_next_room(&mut self.dungeon, controller)?;
        self.statistics.update_from_outcome(&outcome);
        Ok(outcome)
    }

    /// Crafts two items using the session's recipes.
    pub fn craft(&mut self, first: &Item, second: &Item) -> CraftOutcome {
        self.player
            .craft(first, second, &self.recipes, self.dungeon.context_mut())
    }

    /// One-line summary of the player's progress.
    pub fn summary(&self) -> String {
        format!(
            "{} tasks cleared, {} pets collected, highest room: {}",
            self.player.cleared_task_count(),
            self.player.menagerie.len(),
            self.player.highest_room_number()
        )
    }

    /// Writes the dungeon record followed by the player record.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        self.dungeon.encode(writer)?;
        self.player.encode(writer)
    }

    /// Reads a session. The whole input must be consumed.
    ///
    /// The random source is not saved, so the loaded dungeon continues with
    /// a fresh generator seeded from `config`.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>, config: DungeonConfig) -> DelveResult<Self> {
        let context = GameContext::new(config.seed);
        let items = context.items.clone();
        let dungeon = Dungeon::decode(reader, config, context)?;
        let player = Player::decode(reader, dungeon.room_count(), &items)?;
        reader.expect_end()?;
        Ok(Self::from_parts(dungeon, player))
    }

    /// Saves the session to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> DelveResult<()> {
        persistence::save_game(self, path)
    }

    /// Loads a session from a file.
    pub fn load(path: impl AsRef<Path>, config: DungeonConfig) -> DelveResult<Self> {
        persistence::load_game(path, config)
    }

    /// Pretty-printed JSON view of the session.
    pub fn snapshot_json(&self) -> DelveResult<String> {
        let snapshot = SessionSnapshot {
            config: self.dungeon.config(),
            rooms: self.dungeon.rooms(),
            player: &self.player,
            statistics: &self.statistics,
        };
        serde_json::to_string_pretty(&snapshot).map_err(DelveError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Creature;

    #[test]
    fn test_statistics_update() {
        let mut stats = GameStatistics::new();
        stats.update_from_outcome(&TurnOutcome::Moved {
            room: 3,
            cleared: true,
            reward: Some(Reward::Creature {
                creature: Creature::new("Bat", "", 4),
                amount: 1,
            }),
            lost: 0,
        });
        stats.update_from_outcome(&TurnOutcome::RolledBack { attempted: 4 });
        stats.update_from_outcome(&TurnOutcome::Moved {
            room: 5,
            cleared: true,
            reward: Some(Reward::Item {
                item: Item::new("Stick", ""),
                amount: 3,
            }),
            lost: 2,
        });
        stats.update_from_outcome(&TurnOutcome::Left);

        assert_eq!(stats.turns, 4);
        assert_eq!(stats.moves, 2);
        assert_eq!(stats.rollbacks, 1);
        assert_eq!(stats.tasks_cleared, 2);
        assert_eq!(stats.rewards_collected, 2);
        assert_eq!(stats.creatures_collected, 1);
        assert_eq!(stats.items_lost, 2);
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(DungeonConfig::new(12345));
        assert!(!session.is_over());
        assert!(!session.recipes.is_empty());
        assert_eq!(
            session.summary(),
            "0 tasks cleared, 0 pets collected, highest room: 0"
        );
    }

    #[test]
    fn test_snapshot_json() {
        let session = GameSession::new(DungeonConfig::new(12345));
        let json = session.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["config"]["seed"], 12345);
        assert_eq!(value["rooms"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_session_craft_uses_recipes() {
        let mut session = GameSession::new(DungeonConfig::new(1));
        let stick = session.dungeon.context().items.lookup("Stick").cloned().unwrap();
        let stone = session.dungeon.context().items.lookup("Stone").cloned().unwrap();
        session.player.inventory.add_item(&stick);
        session.player.inventory.add_item(&stone);
        assert!(matches!(session.craft(&stick, &stone), CraftOutcome::Crafted(_)));
    }
}
