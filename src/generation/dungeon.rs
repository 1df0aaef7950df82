//! # Dungeon
//!
//! The room graph and its lazy expansion.
//!
//! The dungeon is the sole owner of every room. Rooms live in an append-only
//! vector where the room at index `i` has id `i`; the Exit is a separate
//! singleton with id [`EXIT_ID`]. Doors hold room ids, never references, so
//! the graph can contain arbitrary cycles without any ownership cycles.
//!
//! Every operation here draws from the shared random source in a fixed order.
//! Changing the order or number of draws changes every seeded dungeon.

use crate::config::{MAX_DOORS, MIN_DOORS};
use crate::persistence::{SaveReader, SaveWriter};
use crate::utils::shuffle;
use crate::{
    DefaultRewardFactory, DefaultTaskFactory, DelveError, DelveResult, DungeonConfig,
    GameContext, Player, Reward, RewardFactory, Room, RoomId, TaskFactory, EXIT_ID, START_ID,
};
use log::{debug, trace, warn};
use std::io::{Read, Write};

/// The lazily expanding room graph.
#[derive(Debug)]
pub struct Dungeon {
    rooms: Vec<Room>,
    exit: Room,
    config: DungeonConfig,
    context: GameContext,
    task_factory: Box<dyn TaskFactory>,
    reward_factory: Box<dyn RewardFactory>,
}

impl Dungeon {
    /// Creates a dungeon holding only the Start room, with the default
    /// content factories.
    ///
    /// Start is generated from the Exit, so its return door leaves the
    /// dungeon.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Dungeon, DungeonConfig, GameContext, EXIT_ID};
    ///
    /// let config = DungeonConfig::new(0);
    /// let dungeon = Dungeon::new(config.clone(), GameContext::new(config.seed));
    /// assert_eq!(dungeon.room_count(), 1);
    /// assert_eq!(dungeon.start_room().from_id, EXIT_ID);
    /// assert!(dungeon.start_room().task.is_none());
    /// ```
    pub fn new(config: DungeonConfig, context: GameContext) -> Self {
        Self::with_factories(
            config,
            context,
            Box::new(DefaultTaskFactory),
            Box::new(DefaultRewardFactory),
        )
    }

    /// Creates a dungeon with custom content factories.
    pub fn with_factories(
        config: DungeonConfig,
        context: GameContext,
        task_factory: Box<dyn TaskFactory>,
        reward_factory: Box<dyn RewardFactory>,
    ) -> Self {
        let mut dungeon = Self::empty(config, context, task_factory, reward_factory);
        let start = dungeon.generate_room(EXIT_ID);
        debug_assert_eq!(start, Some(START_ID));
        dungeon
    }

    fn empty(
        config: DungeonConfig,
        context: GameContext,
        task_factory: Box<dyn TaskFactory>,
        reward_factory: Box<dyn RewardFactory>,
    ) -> Self {
        Self {
            rooms: Vec::new(),
            exit: Room::exit(),
            config,
            context,
            task_factory,
            reward_factory,
        }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }

    /// Number of generated rooms, Start included.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn start_room(&self) -> &Room {
        self.room(START_ID)
    }

    pub fn exit_room(&self) -> &Room {
        &self.exit
    }

    /// Looks up a room by id.
    ///
    /// Panics if the id was never generated or the stored room's id does not
    /// match its index.
    pub fn room(&self, id: RoomId) -> &Room {
        if id == EXIT_ID {
            return &self.exit;
        }
        let room = usize::try_from(id)
            .ok()
            .and_then(|index| self.rooms.get(index))
            .unwrap_or_else(|| panic!("room {id} does not exist"));
        assert_eq!(room.id, id, "room stored at index {id} has id {}", room.id);
        room
    }

    fn room_mut(&mut self, id: RoomId) -> &mut Room {
        if id == EXIT_ID {
            return &mut self.exit;
        }
        let room = usize::try_from(id)
            .ok()
            .and_then(|index| self.rooms.get_mut(index))
            .unwrap_or_else(|| panic!("room {id} does not exist"));
        assert_eq!(room.id, id, "room stored at index {id} has id {}", room.id);
        room
    }

    /// Whether no further room ids can be allocated.
    pub fn is_exhausted(&self) -> bool {
        self.rooms.len() >= self.config.room_limit.max(1) as usize
    }

    /// Allocates the next room id and builds the room reached from `from`.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn generate_room(&mut self, from: RoomId) -> Option<RoomId> {
        if self.is_exhausted() {
            warn!(
                "Room limit of {} reached, no room generated from room {}",
                self.config.room_limit, from
            );
            return None;
        }
        let id = self.rooms.len() as RoomId;
        let door_count = self.context.rng.next_int_range(MIN_DOORS, MAX_DOORS + 1) as usize;
        let task = if id == START_ID {
            None
        } else {
            Some(self.task_factory.create_task(id, &mut self.context))
        };
        debug!("Generated room {} from room {} with {} doors", id, from, door_count);
        self.rooms.push(Room::new(id, door_count, from, task));
        Some(id)
    }

    /// Picks a uniformly random existing room other than `excluding`.
    ///
    /// Fails with [`DelveError::NoRoomsAvailable`] if there is no room, or the
    /// only room is the excluded one.
    pub fn get_random_generated_room(&mut self, excluding: RoomId) -> DelveResult<RoomId> {
        let count = self.rooms.len();
        if count == 0 || (count == 1 && self.rooms[0].id == excluding) {
            return Err(DelveError::NoRoomsAvailable);
        }
        loop {
            let pick = self.context.rng.next_int(count as i32);
            if pick != excluding {
                return Ok(pick);
            }
        }
    }

    /// Resolves one door of `from`: either a loop back to an existing room or
    /// a brand new room.
    pub fn get_random_room(&mut self, from: RoomId) -> DelveResult<RoomId> {
        let roll = self.context.rng.next_double();
        if roll < self.config.loop_back_chance || self.is_exhausted() {
            trace!("Door of room {} loops back (roll {:.3})", from, roll);
            return self.get_random_generated_room(from);
        }
        match self.generate_room(from) {
            Some(id) => Ok(id),
            None => self.get_random_generated_room(from),
        }
    }

    /// Resolves every door of a room. Does nothing if they are resolved
    /// already, or for the Exit.
    ///
    /// One door always leads to a new room (or, once exhausted, a random
    /// existing one); the others may loop back. They are shuffled, then the
    /// return door is put in front.
    pub fn fill_doors(&mut self, room_id: RoomId) -> DelveResult<()> {
        let room = self.room(room_id);
        if room.is_exit() || room.is_filled() {
            return Ok(());
        }
        let (door_count, from_id) = (room.door_count, room.from_id);

        let mut doors = Vec::with_capacity(door_count);
        let forward = match self.generate_room(room_id) {
            Some(id) => id,
            None => {
                warn!("No forward room for room {}, reusing an existing one", room_id);
                self.get_random_generated_room(room_id)?
            }
        };
        doors.push(forward);
        for _ in MIN_DOORS as usize..door_count {
            doors.push(self.get_random_room(room_id)?);
        }
        shuffle(self.context.rng.as_mut(), &mut doors);
        doors.insert(0, from_id);

        debug!("Filled doors of room {}: {:?}", room_id, doors);
        self.room_mut(room_id).set_doors(doors);
        Ok(())
    }

    /// Room behind a door of a filled room.
    pub fn room_behind_door(&self, room_id: RoomId, door: usize) -> Option<RoomId> {
        self.room(room_id).door_target(door)
    }

    /// Grants the room's reward at most once.
    ///
    /// The gate closes on the first call even if the factory decides there
    /// is no reward.
    pub fn award_reward(&mut self, room_id: RoomId, player: &Player) -> Option<Reward> {
        let room = self.room_mut(room_id);
        if room.reward_collected {
            return None;
        }
        room.reward_collected = true;
        let reward = self
            .reward_factory
            .create_reward(room_id, player, &mut self.context);
        if let Some(reward) = &reward {
            debug!("Room {} yields {}", room_id, reward.acquisition_message(0));
        }
        reward
    }

    /// Writes the room count followed by every room record.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_len(self.rooms.len())?;
        for room in &self.rooms {
            room.encode(writer)?;
        }
        Ok(())
    }

    /// Reads a dungeon with the default content factories.
    ///
    /// The random source is not part of a save; `context` supplies a fresh
    /// one.
    pub fn decode<R: Read>(
        reader: &mut SaveReader<R>,
        config: DungeonConfig,
        context: GameContext,
    ) -> DelveResult<Self> {
        Self::decode_with_factories(
            reader,
            config,
            context,
            Box::new(DefaultTaskFactory),
            Box::new(DefaultRewardFactory),
        )
    }

    /// Reads a dungeon, validating ids and door references.
    pub fn decode_with_factories<R: Read>(
        reader: &mut SaveReader<R>,
        config: DungeonConfig,
        context: GameContext,
        task_factory: Box<dyn TaskFactory>,
        reward_factory: Box<dyn RewardFactory>,
    ) -> DelveResult<Self> {
        let count = reader.read_len()?;
        if count == 0 {
            return Err(DelveError::CorruptSave("dungeon has no rooms".to_string()));
        }
        let mut rooms = Vec::new();
        for index in 0..count {
            let room = Room::decode(reader)?;
            if room.id != index as RoomId {
                return Err(DelveError::CorruptSave(format!(
                    "room at index {index} has id {}",
                    room.id
                )));
            }
            rooms.push(room);
        }

        let valid = |id: RoomId| id >= EXIT_ID && (id as i64) < count as i64;
        for room in &rooms {
            if let Some(bad) = std::iter::once(&room.from_id)
                .chain(room.doors())
                .find(|id| !valid(**id))
            {
                return Err(DelveError::CorruptSave(format!(
                    "room {} refers to unknown room {bad}",
                    room.id
                )));
            }
        }

        let mut dungeon = Self::empty(config, context, task_factory, reward_factory);
        dungeon.rooms = rooms;
        Ok(dungeon)
    }
}

/// Dungeons are equal when their rooms are. Configuration, content and the
/// random source are not compared.
impl PartialEq for Dungeon {
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GameRng;
    use crate::Task;
    use std::io::Cursor;

    /// Hands out zeroes and a fixed double, counting draws.
    #[derive(Debug, Default)]
    struct CountingRng {
        double: f64,
        draws: usize,
    }

    impl GameRng for CountingRng {
        fn next_int(&mut self, _bound: i32) -> i32 {
            self.draws += 1;
            0
        }

        fn next_int_range(&mut self, low: i32, _high_exclusive: i32) -> i32 {
            self.draws += 1;
            low + 1
        }

        fn next_double(&mut self) -> f64 {
            self.draws += 1;
            self.double
        }

        fn next_bool(&mut self) -> bool {
            self.draws += 1;
            false
        }
    }

    #[derive(Debug)]
    struct FixedTasks;

    impl TaskFactory for FixedTasks {
        fn create_task(&self, room_id: RoomId, _context: &mut GameContext) -> Task {
            Task::question(format!("Room {room_id}?"), room_id.to_string())
        }
    }

    fn dungeon(seed: u64) -> Dungeon {
        let config = DungeonConfig::new(seed);
        Dungeon::new(config.clone(), GameContext::new(config.seed))
    }

    #[test]
    fn test_start_room() {
        let dungeon = dungeon(0);
        let start = dungeon.start_room();
        assert_eq!(start.id, START_ID);
        assert_eq!(start.from_id, EXIT_ID);
        assert!(start.task.is_none());
        assert!((2..=8).contains(&start.door_count));
        assert!(dungeon.room(EXIT_ID).is_exit());
    }

    #[test]
    fn test_generated_rooms_have_tasks() {
        let mut dungeon = dungeon(1);
        let id = dungeon.generate_room(START_ID).unwrap();
        assert_eq!(id, 1);
        let room = dungeon.room(id);
        assert_eq!(room.from_id, START_ID);
        assert!(room.task.is_some());
        assert!(!room.is_filled());
    }

    #[test]
    fn test_fill_doors_shape_and_idempotence() {
        let mut dungeon = dungeon(7);
        dungeon.fill_doors(START_ID).unwrap();
        let doors = dungeon.start_room().doors().to_vec();
        assert_eq!(doors.len(), dungeon.start_room().door_count);
        assert_eq!(doors[0], EXIT_ID);
        assert!(doors[1..].contains(&1), "forward room must be behind some door");

        let count = dungeon.room_count();
        dungeon.fill_doors(START_ID).unwrap();
        assert_eq!(dungeon.start_room().doors(), &doors[..]);
        assert_eq!(dungeon.room_count(), count);
    }

    #[test]
    fn test_fill_doors_of_exit_is_noop() {
        let mut dungeon = dungeon(7);
        dungeon.fill_doors(EXIT_ID).unwrap();
        assert!(!dungeon.exit_room().is_filled());
        assert_eq!(dungeon.room_count(), 1);
    }

    #[test]
    fn test_three_door_room_reached_from_five() {
        let context = GameContext::with_rng(Box::new(CountingRng::default()));
        let mut dungeon = Dungeon::new(DungeonConfig::new(0), context);
        for _ in 0..5 {
            dungeon.generate_room(START_ID).unwrap();
        }
        // CountingRng makes every door count MIN_DOORS + 1 = 3
        let id = dungeon.generate_room(5).unwrap();
        assert_eq!(dungeon.room(id).door_count, 3);
        assert_eq!(dungeon.room(id).from_id, 5);

        dungeon.fill_doors(id).unwrap();
        let doors = dungeon.room(id).doors();
        assert_eq!(doors.len(), 3);
        assert_eq!(doors[0], 5);
    }

    #[test]
    fn test_random_generated_room_needs_two_rooms() {
        let mut dungeon = dungeon(3);
        assert!(matches!(
            dungeon.get_random_generated_room(START_ID),
            Err(DelveError::NoRoomsAvailable)
        ));
        assert_eq!(dungeon.get_random_generated_room(EXIT_ID).unwrap(), START_ID);

        dungeon.generate_room(START_ID).unwrap();
        for _ in 0..20 {
            assert_eq!(dungeon.get_random_generated_room(START_ID).unwrap(), 1);
        }
    }

    #[test]
    fn test_random_generated_room_on_empty_dungeon() {
        let mut dungeon = Dungeon::empty(
            DungeonConfig::new(0),
            GameContext::new(0),
            Box::new(DefaultTaskFactory),
            Box::new(DefaultRewardFactory),
        );
        assert!(matches!(
            dungeon.get_random_generated_room(EXIT_ID),
            Err(DelveError::NoRoomsAvailable)
        ));
    }

    #[test]
    fn test_loop_back_chance_extremes() {
        let mut always_new = Dungeon::new(
            DungeonConfig {
                loop_back_chance: 0.0,
                ..DungeonConfig::new(11)
            },
            GameContext::new(11),
        );
        always_new.generate_room(START_ID).unwrap();
        let before = always_new.room_count();
        let id = always_new.get_random_room(START_ID).unwrap();
        assert_eq!(id as usize, before);

        let mut always_back = Dungeon::new(
            DungeonConfig {
                loop_back_chance: 1.0,
                ..DungeonConfig::new(11)
            },
            GameContext::new(11),
        );
        always_back.generate_room(START_ID).unwrap();
        let id = always_back.get_random_room(START_ID).unwrap();
        assert_eq!(id, 1);
        assert_eq!(always_back.room_count(), 2);
    }

    #[test]
    fn test_exhaustion_falls_back_to_existing_rooms() {
        let config = DungeonConfig::new(5).with_room_limit(3);
        let mut dungeon = Dungeon::new(config, GameContext::new(5));
        for _ in 0..10 {
            let ids: Vec<RoomId> = dungeon.rooms().iter().map(|room| room.id).collect();
            for id in ids {
                dungeon.fill_doors(id).unwrap();
            }
        }
        assert_eq!(dungeon.room_count(), 3);
        assert!(dungeon.is_exhausted());
        assert_eq!(dungeon.generate_room(START_ID), None);
        for room in dungeon.rooms() {
            assert!(room.is_filled());
            assert!(room.doors()[1..].iter().all(|&door| (0..3).contains(&door)));
        }
    }

    #[test]
    fn test_single_room_limit_cannot_fill_start() {
        let config = DungeonConfig::new(5).with_room_limit(1);
        let mut dungeon = Dungeon::new(config, GameContext::new(5));
        assert!(matches!(
            dungeon.fill_doors(START_ID),
            Err(DelveError::NoRoomsAvailable)
        ));
        assert!(!dungeon.start_room().is_filled());
    }

    #[test]
    fn test_same_seed_same_graph() {
        let mut a = dungeon(99);
        let mut b = dungeon(99);
        for id in 0..5 {
            a.fill_doors(id).unwrap();
            b.fill_doors(id).unwrap();
        }
        assert_eq!(a, b);
        assert!(a.room_count() > 5);
    }

    #[test]
    fn test_custom_task_factory() {
        let config = DungeonConfig::new(2);
        let mut dungeon = Dungeon::with_factories(
            config,
            GameContext::new(2),
            Box::new(FixedTasks),
            Box::new(DefaultRewardFactory),
        );
        let id = dungeon.generate_room(START_ID).unwrap();
        assert_eq!(dungeon.room(id).task, Some(Task::question("Room 1?", "1")));
    }

    #[test]
    fn test_reward_gate_closes_once() {
        let mut dungeon = dungeon(4);
        let player = Player::new(&DungeonConfig::new(4));
        dungeon.award_reward(START_ID, &player);
        assert!(dungeon.start_room().reward_collected);
        assert_eq!(dungeon.award_reward(START_ID, &player), None);
    }

    #[test]
    fn test_dungeon_record() {
        let mut dungeon = dungeon(8);
        dungeon.fill_doors(START_ID).unwrap();
        dungeon.fill_doors(1).unwrap();
        let mut writer = SaveWriter::new(Vec::new());
        dungeon.encode(&mut writer).unwrap();
        let bytes = writer.into_inner();

        let decoded = Dungeon::decode(
            &mut SaveReader::new(Cursor::new(bytes)),
            DungeonConfig::new(8),
            GameContext::new(8),
        )
        .unwrap();
        assert_eq!(decoded, dungeon);
    }

    #[test]
    fn test_dangling_door_is_corrupt() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_i32(1).unwrap();
        Room::new(START_ID, 2, 7, None).encode(&mut writer).unwrap();
        let result = Dungeon::decode(
            &mut SaveReader::new(Cursor::new(writer.into_inner())),
            DungeonConfig::new(0),
            GameContext::new(0),
        );
        assert!(matches!(result, Err(DelveError::CorruptSave(_))));
    }

    #[test]
    fn test_misplaced_room_is_corrupt() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_i32(1).unwrap();
        Room::new(3, 2, EXIT_ID, None).encode(&mut writer).unwrap();
        let result = Dungeon::decode(
            &mut SaveReader::new(Cursor::new(writer.into_inner())),
            DungeonConfig::new(0),
            GameContext::new(0),
        );
        assert!(matches!(result, Err(DelveError::CorruptSave(_))));
    }
}
