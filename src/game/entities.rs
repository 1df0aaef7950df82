//! # Entities
//!
//! The things a player can carry, collect, or be granted: items, creatures,
//! and permanent upgrades.

use crate::persistence::{SaveReader, SaveWriter};
use crate::{DelveError, DelveResult, Inventory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};

/// A carryable item.
///
/// Items are identified by name and description. They are ordered by name
/// first, which is the order inventories are listed and saved in.
///
/// # Examples
///
/// ```
/// use delve::Item;
///
/// let stick = Item::new("Stick", "A sturdy stick.");
/// assert_eq!(stick.name, "Stick");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A living creature that can be collected into the menagerie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub description: String,
    pub max_hp: i32,
    pub current_hp: i32,
}

impl Creature {
    /// Creates a creature at full health.
    pub fn new(name: impl Into<String>, description: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            max_hp,
            current_hp: max_hp,
        }
    }

    /// Writes the creature record: name, description, max hp, current hp.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_str(&self.name)?;
        writer.write_str(&self.description)?;
        writer.write_i32(self.max_hp)?;
        writer.write_i32(self.current_hp)
    }

    /// Reads a creature record.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>) -> DelveResult<Self> {
        let name = reader.read_string()?;
        let description = reader.read_string()?;
        let max_hp = reader.read_i32()?;
        let current_hp = reader.read_i32()?;
        if max_hp < 0 {
            return Err(DelveError::CorruptSave(format!(
                "creature {name} has negative max hp {max_hp}"
            )));
        }
        Ok(Self {
            name,
            description,
            max_hp,
            current_hp,
        })
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}): {}",
            self.name, self.current_hp, self.max_hp, self.description
        )
    }
}

/// Permanent upgrades granted to the player's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermanentUpgrade {
    /// One more stack slot.
    InventorySize,
    /// One more item per stack.
    StackSize,
}

impl PermanentUpgrade {
    /// Display name of the upgrade.
    pub fn name(self) -> &'static str {
        match self {
            PermanentUpgrade::InventorySize => "Inventory Size Upgrade",
            PermanentUpgrade::StackSize => "Inventory Stack Size Upgrade",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PermanentUpgrade::InventorySize => "Increases the size of the inventory by 1.",
            PermanentUpgrade::StackSize => "Increases the stack size of the inventory by 1.",
        }
    }

    /// Tag written to save files.
    pub fn save_tag(self) -> &'static str {
        match self {
            PermanentUpgrade::InventorySize => "InventorySize",
            PermanentUpgrade::StackSize => "StackSize",
        }
    }

    /// Parses a save tag.
    pub fn from_save_tag(tag: &str) -> DelveResult<Self> {
        match tag {
            "InventorySize" => Ok(PermanentUpgrade::InventorySize),
            "StackSize" => Ok(PermanentUpgrade::StackSize),
            other => Err(DelveError::UnknownUpgrade(other.to_string())),
        }
    }

    /// Applies the upgrade to an inventory.
    pub fn apply(self, inventory: &mut Inventory) {
        match self {
            PermanentUpgrade::InventorySize => inventory.increase_capacity(),
            PermanentUpgrade::StackSize => inventory.increase_stack_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_item_ordering_by_name() {
        let apple = Item::new("Apple", "zzz");
        let stick = Item::new("Stick", "aaa");
        assert!(apple < stick);
    }

    #[test]
    fn test_creature_starts_at_full_health() {
        let hamster = Creature::new("Hamster", "Fluffy.", 5);
        assert_eq!(hamster.current_hp, 5);
        assert_eq!(hamster.to_string(), "Hamster (5/5): Fluffy.");
    }

    #[test]
    fn test_creature_record() {
        let mut hamster = Creature::new("Hamster", "Fluffy.", 5);
        hamster.current_hp = 3;
        let mut writer = SaveWriter::new(Vec::new());
        hamster.encode(&mut writer).unwrap();
        let bytes = writer.into_inner();
        // two strings (4 + 7, 4 + 7) plus two i32s
        assert_eq!(bytes.len(), 4 + 7 + 4 + 7 + 4 + 4);
        let decoded = Creature::decode(&mut SaveReader::new(Cursor::new(bytes))).unwrap();
        assert_eq!(decoded, hamster);
    }

    #[test]
    fn test_creature_negative_max_hp_is_corrupt() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_str("Ghost").unwrap();
        writer.write_str("Boo.").unwrap();
        writer.write_i32(-1).unwrap();
        writer.write_i32(0).unwrap();
        let result = Creature::decode(&mut SaveReader::new(Cursor::new(writer.into_inner())));
        assert!(matches!(result, Err(DelveError::CorruptSave(_))));
    }

    #[test]
    fn test_upgrade_tags() {
        for upgrade in [PermanentUpgrade::InventorySize, PermanentUpgrade::StackSize] {
            assert_eq!(
                PermanentUpgrade::from_save_tag(upgrade.save_tag()).unwrap(),
                upgrade
            );
        }
        assert!(matches!(
            PermanentUpgrade::from_save_tag("Wings"),
            Err(DelveError::UnknownUpgrade(_))
        ));
    }

    #[test]
    fn test_upgrades_grow_inventory() {
        let mut inventory = Inventory::new(1, 1);
        PermanentUpgrade::InventorySize.apply(&mut inventory);
        PermanentUpgrade::StackSize.apply(&mut inventory);
        assert_eq!(inventory.capacity(), 2);
        assert_eq!(inventory.stack_capacity(), 2);
    }
}
