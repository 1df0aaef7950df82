//! # Rooms
//!
//! A room is a node of the dungeon graph. It refers to other rooms only by
//! id; the [`Dungeon`](crate::Dungeon) owns every room and resolves ids.

use crate::config::{MAX_DOORS, MIN_DOORS};
use crate::persistence::{SaveReader, SaveWriter};
use crate::{DelveError, DelveResult, RoomId, Task, EXIT_ID};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A node of the room graph.
///
/// Doors are resolved lazily: until [`Dungeon::fill_doors`](crate::Dungeon::fill_doors)
/// runs for this room, only the room it was first reached from is known.
/// Once filled, door 0 always leads back to that room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub door_count: usize,
    pub from_id: RoomId,
    doors: Vec<RoomId>,
    pub task: Option<Task>,
    pub reward_collected: bool,
}

impl Room {
    /// Creates an unfilled room.
    pub fn new(id: RoomId, door_count: usize, from_id: RoomId, task: Option<Task>) -> Self {
        Self {
            id,
            door_count,
            from_id,
            doors: Vec::new(),
            task,
            reward_collected: false,
        }
    }

    /// The dungeon exit. It has the minimum number of doors and no task.
    pub fn exit() -> Self {
        Self::new(EXIT_ID, MIN_DOORS as usize, EXIT_ID, None)
    }

    pub fn is_exit(&self) -> bool {
        self.id == EXIT_ID
    }

    /// Whether the doors have been resolved.
    pub fn is_filled(&self) -> bool {
        !self.doors.is_empty()
    }

    /// Resolved door targets, empty until filled.
    pub fn doors(&self) -> &[RoomId] {
        &self.doors
    }

    /// Target of a door, if the doors are filled and the index exists.
    pub fn door_target(&self, index: usize) -> Option<RoomId> {
        self.doors.get(index).copied()
    }

    /// Stores resolved doors.
    ///
    /// Panics if the doors are already filled, the count is wrong, or door 0
    /// does not lead back.
    pub(crate) fn set_doors(&mut self, doors: Vec<RoomId>) {
        assert!(!self.is_filled(), "doors of room {} filled twice", self.id);
        assert_eq!(doors.len(), self.door_count, "door count mismatch in room {}", self.id);
        assert_eq!(doors[0], self.from_id, "door 0 of room {} must lead back", self.id);
        self.doors = doors;
    }

    /// Writes the room record.
    ///
    /// Layout: id, door count, filled flag, then either the return room id
    /// or every door id, then the reward flag and the optional task.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_i32(self.id)?;
        writer.write_len(self.door_count)?;
        writer.write_bool(self.is_filled())?;
        if self.is_filled() {
            for door in &self.doors {
                writer.write_i32(*door)?;
            }
        } else {
            writer.write_i32(self.from_id)?;
        }
        writer.write_bool(self.reward_collected)?;
        writer.write_bool(self.task.is_some())?;
        if let Some(task) = &self.task {
            task.encode(writer)?;
        }
        Ok(())
    }

    /// Reads a room record. Door references are checked by the dungeon.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>) -> DelveResult<Self> {
        let id = reader.read_i32()?;
        let door_count = reader.read_len()?;
        if !(MIN_DOORS as usize..=MAX_DOORS as usize).contains(&door_count) {
            return Err(DelveError::CorruptSave(format!(
                "room {id} has {door_count} doors"
            )));
        }
        let filled = reader.read_bool()?;
        let (from_id, doors) = if filled {
            let doors = (0..door_count)
                .map(|_| reader.read_i32())
                .collect::<DelveResult<Vec<_>>>()?;
            (doors[0], doors)
        } else {
            (reader.read_i32()?, Vec::new())
        };
        let reward_collected = reader.read_bool()?;
        let task = if reader.read_bool()? {
            Some(Task::decode(reader)?)
        } else {
            None
        };
        Ok(Self {
            id,
            door_count,
            from_id,
            doors,
            task,
            reward_collected,
        })
    }
}
