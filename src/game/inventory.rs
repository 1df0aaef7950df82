//! # Inventory
//!
//! A bounded multi-stack container. Each item maps to an ordered list of
//! stack sizes. The number of stacks across all items is bounded by the
//! inventory capacity and every stack is bounded by the stack capacity.
//!
//! Running out of room is a normal outcome and is reported as `false`.
//! Mutating a locked inventory or finding an overfull stack is a programming
//! error and panics.

use crate::persistence::{SaveReader, SaveWriter};
use crate::{DelveError, DelveResult, Item, ItemCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};

/// Bounded multi-stack item container.
///
/// # Examples
///
/// ```
/// use delve::{Inventory, Item};
///
/// let sword = Item::new("Sword", "Sharp.");
/// let mut inventory = Inventory::new(1, 2);
/// assert!(inventory.add_item(&sword));
/// assert!(inventory.add_item(&sword));
/// assert!(!inventory.add_item(&sword));
/// assert_eq!(inventory.stacks(&sword), Some(&[2][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(with = "item_stacks")]
    items: BTreeMap<Item, Vec<u32>>,
    capacity: usize,
    stack_capacity: u32,
    locked: bool,
}

impl Inventory {
    /// Creates an empty, unlocked inventory.
    ///
    /// Panics if either capacity is zero.
    pub fn new(capacity: usize, stack_capacity: u32) -> Self {
        assert!(capacity > 0, "inventory capacity must be positive");
        assert!(stack_capacity > 0, "stack capacity must be positive");
        Self {
            items: BTreeMap::new(),
            capacity,
            stack_capacity,
            locked: false,
        }
    }

    /// Creates a locked snapshot holding exactly the given items, one item
    /// per stack. Used for crafting recipe inputs and outputs.
    pub fn locked_snapshot(items: &[Item]) -> Self {
        let mut snapshot = Self::new(items.len().max(1), 1);
        for item in items {
            // one stack per unit and one slot per stack, so this cannot fail
            let added = snapshot.add_item(item);
            debug_assert!(added);
        }
        snapshot.lock();
        snapshot
    }

    /// Maximum number of stacks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum size of a single stack.
    pub fn stack_capacity(&self) -> u32 {
        self.stack_capacity
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks the inventory against further mutation.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Number of stacks in use across all items.
    pub fn slots_used(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items held.
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    /// Stack sizes held for an item.
    pub fn stacks(&self, item: &Item) -> Option<&[u32]> {
        self.items.get(item).map(Vec::as_slice)
    }

    /// Total units of an item across all its stacks.
    pub fn count(&self, item: &Item) -> u32 {
        self.items
            .get(item)
            .map(|stacks| stacks.iter().sum())
            .unwrap_or(0)
    }

    /// Total units of every item with the given name.
    pub fn count_by_name(&self, name: &str) -> u32 {
        self.items
            .iter()
            .filter(|(item, _)| item.name == name)
            .flat_map(|(_, stacks)| stacks.iter())
            .sum()
    }

    /// Iterates items with their stacks, in item order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, &[u32])> {
        self.items
            .iter()
            .map(|(item, stacks)| (item, stacks.as_slice()))
    }

    /// Iterates every unit held, one entry per unit.
    pub fn units(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().flat_map(|(item, stacks)| {
            let total: u32 = stacks.iter().sum();
            std::iter::repeat(item).take(total as usize)
        })
    }

    /// Checks that this inventory holds at least the units in `other`.
    pub fn contains_all(&self, other: &Inventory) -> bool {
        other
            .items
            .keys()
            .all(|item| self.count(item) >= other.count(item))
    }

    fn assert_unlocked(&self) {
        if self.locked {
            panic!("attempted to mutate a locked inventory");
        }
    }

    fn first_non_full_stack(&self, stacks: &[u32]) -> Option<usize> {
        for (index, &size) in stacks.iter().enumerate() {
            if size < self.stack_capacity {
                return Some(index);
            }
            if size > self.stack_capacity {
                panic!(
                    "overfull stack detected: {size} > {}",
                    self.stack_capacity
                );
            }
        }
        None
    }

    /// Adds one unit of an item.
    ///
    /// Fills the first non-full stack, or opens a new stack if a slot is
    /// free. Returns `false` if there is no room.
    pub fn add_item(&mut self, item: &Item) -> bool {
        self.assert_unlocked();
        let has_free_slot = self.slots_used() < self.capacity;
        let target = self
            .items
            .get(item)
            .map(|stacks| self.first_non_full_stack(stacks));
        match target {
            Some(Some(index)) => {
                if let Some(stacks) = self.items.get_mut(item) {
                    stacks[index] += 1;
                }
                true
            }
            Some(None) if has_free_slot => {
                if let Some(stacks) = self.items.get_mut(item) {
                    stacks.push(1);
                }
                true
            }
            None if has_free_slot => {
                self.items.insert(item.clone(), vec![1]);
                true
            }
            _ => false,
        }
    }

    /// Removes one unit of an item.
    ///
    /// With no stack index the first non-full stack is drained, falling back
    /// to the last stack when all are full. Empty stacks are dropped, and the
    /// item is dropped with its last stack. Returns `false` if the item is
    /// absent or the index is out of range.
    pub fn remove_item(&mut self, item: &Item, stack_index: Option<usize>) -> bool {
        self.assert_unlocked();
        let index = match (self.items.get(item), stack_index) {
            (None, _) => return false,
            (Some(stacks), Some(index)) if index >= stacks.len() => return false,
            (Some(_), Some(index)) => index,
            (Some(stacks), None) => self
                .first_non_full_stack(stacks)
                .unwrap_or(stacks.len() - 1),
        };
        let Some(stacks) = self.items.get_mut(item) else {
            return false;
        };
        if stacks[index] == 1 {
            stacks.remove(index);
            if stacks.is_empty() {
                self.items.remove(item);
            }
        } else {
            stacks[index] -= 1;
        }
        true
    }

    /// Adds every unit of `other`, stopping at the first unit that does not
    /// fit. Units added before a failure stay added.
    pub fn add_all(&mut self, other: &Inventory) -> bool {
        self.assert_unlocked();
        other.units().all(|item| self.add_item(item))
    }

    /// Removes every unit of `other`, stopping at the first unit that is
    /// missing. Units removed before a failure stay removed.
    pub fn remove_all(&mut self, other: &Inventory) -> bool {
        self.assert_unlocked();
        other.units().all(|item| self.remove_item(item, None))
    }

    /// Grants one more stack slot.
    pub fn increase_capacity(&mut self) {
        self.assert_unlocked();
        self.capacity += 1;
    }

    /// Grants one more unit per stack.
    pub fn increase_stack_capacity(&mut self) {
        self.assert_unlocked();
        self.stack_capacity += 1;
    }

    /// Writes the inventory record.
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_len(self.capacity)?;
        writer.write_i32(self.stack_capacity as i32)?;
        writer.write_len(self.items.len())?;
        for (item, stacks) in &self.items {
            writer.write_str(&item.name)?;
            writer.write_len(stacks.len())?;
            for &size in stacks {
                writer.write_i32(size as i32)?;
            }
        }
        Ok(())
    }

    /// Reads an inventory record, resolving item names through the catalog.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>, catalog: &ItemCatalog) -> DelveResult<Self> {
        let capacity = reader.read_len()?;
        let stack_capacity = reader.read_i32()?;
        if capacity == 0 || stack_capacity <= 0 {
            return Err(DelveError::CorruptSave(format!(
                "invalid inventory capacities {capacity}/{stack_capacity}"
            )));
        }
        let mut inventory = Self::new(capacity, stack_capacity as u32);
        let distinct = reader.read_len()?;
        for _ in 0..distinct {
            let name = reader.read_string()?;
            let item = catalog
                .lookup(&name)
                .cloned()
                .ok_or_else(|| DelveError::UnknownItem(name.clone()))?;
            let stack_count = reader.read_len()?;
            if stack_count == 0 || stack_count > capacity - inventory.slots_used() {
                return Err(DelveError::CorruptSave(format!(
                    "item {name} has {stack_count} stacks"
                )));
            }
            let mut stacks = Vec::new();
            for _ in 0..stack_count {
                let size = reader.read_i32()?;
                if size <= 0 || size > stack_capacity {
                    return Err(DelveError::CorruptSave(format!(
                        "stack of {name} has invalid size {size}"
                    )));
                }
                stacks.push(size as u32);
            }
            if inventory.items.insert(item, stacks).is_some() {
                return Err(DelveError::CorruptSave(format!("item {name} listed twice")));
            }
            if inventory.slots_used() > capacity {
                return Err(DelveError::CorruptSave(
                    "inventory holds more stacks than its capacity".to_string(),
                ));
            }
        }
        Ok(inventory)
    }
}

/// Serializes the item map as a list of pairs, since item keys are not strings.
mod item_stacks {
    use crate::Item;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        items: &BTreeMap<Item, Vec<u32>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Item, Vec<u32>>, D::Error> {
        let pairs: Vec<(Item, Vec<u32>)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Inventory is empty!");
        }
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|(item, stacks)| format!("{}: {}", item.name, stacks.iter().sum::<u32>()))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}
