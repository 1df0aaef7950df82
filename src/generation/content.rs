//! # Content Catalogs
//!
//! Named items, creature templates and flavor text the generators draw from.
//! Catalogs are plain values owned by a [`GameContext`](crate::GameContext),
//! never process-wide registries, so two sessions can run different content
//! side by side.

use crate::utils::{choose, GameRng};
use crate::{Creature, Item};
use serde::{Deserialize, Serialize};

/// Items known to the game, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    /// Sorted by name, names unique.
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Builds a catalog. Later duplicates of a name are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Item, ItemCatalog};
    ///
    /// let catalog = ItemCatalog::from_items(vec![
    ///     Item::new("Stick", "A sturdy stick."),
    ///     Item::new("Stone", "Smooth and grey."),
    /// ]);
    /// assert_eq!(catalog.len(), 2);
    /// assert!(catalog.lookup("Stone").is_some());
    /// assert!(catalog.lookup("Gem").is_none());
    /// ```
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut unique: Vec<Item> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|known| known.name == item.name) {
                unique.push(item);
            }
        }
        unique.sort();
        Self { items: unique }
    }

    pub fn lookup(&self, name: &str) -> Option<&Item> {
        self.items
            .binary_search_by(|item| item.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.items[index])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draws one item uniformly. Draws nothing from an empty catalog.
    pub fn random(&self, rng: &mut dyn GameRng) -> Option<&Item> {
        choose(rng, &self.items)
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::from_items(
            DEFAULT_ITEMS
                .iter()
                .map(|(name, description)| Item::new(*name, *description))
                .collect(),
        )
    }
}

/// Creature templates. Collected creatures are fresh copies of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureCatalog {
    templates: Vec<Creature>,
}

impl CreatureCatalog {
    pub fn from_templates(templates: Vec<Creature>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[Creature] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Draws a template and returns a full-health copy of it.
    pub fn spawn_random(&self, rng: &mut dyn GameRng) -> Option<Creature> {
        choose(rng, &self.templates)
            .map(|template| Creature::new(template.name.clone(), template.description.clone(), template.max_hp))
    }
}

impl Default for CreatureCatalog {
    fn default() -> Self {
        Self::from_templates(
            DEFAULT_CREATURES
                .iter()
                .map(|(name, description, max_hp)| Creature::new(*name, *description, *max_hp))
                .collect(),
        )
    }
}

/// Built-in information lines shown by information tasks.
pub fn default_information_lines() -> Vec<String> {
    DEFAULT_INFORMATION_LINES.iter().map(|line| line.to_string()).collect()
}

/// Built-in lines for failed crafting attempts.
pub fn default_diss_lines() -> Vec<String> {
    DEFAULT_DISS_LINES.iter().map(|line| line.to_string()).collect()
}

/// Built-in recipes as `(input, input, output)` names.
pub const DEFAULT_RECIPES: &[(&str, &str, &str)] = &[
    ("Stick", "Stone", "Hammer"),
    ("Stick", "String", "Bow"),
    ("Raspberry", "Raspberry", "Raspberry Jam"),
    ("Feather", "Stick", "Arrow"),
    ("Stone", "Stone", "Gravel"),
    ("Leaf", "String", "Bandage"),
];

const DEFAULT_ITEMS: &[(&str, &str)] = &[
    ("Arrow", "Pointy on one end, fluffy on the other."),
    ("Bandage", "Better than nothing."),
    ("Bow", "Needs arrows to be more than a stick with ambitions."),
    ("Feather", "Light as, well, a feather."),
    ("Gravel", "A handful of small stones."),
    ("Hammer", "Every problem looks like a nail now."),
    ("Leaf", "Green and slightly damp."),
    ("Raspberry", "Small animals seem to love these."),
    ("Raspberry Jam", "Sticky and sweet."),
    ("Stick", "A sturdy stick."),
    ("Stone", "Smooth and grey."),
    ("String", "Could hold something together."),
];

const DEFAULT_CREATURES: &[(&str, &str, i32)] = &[
    ("Hamster", "Small, round and always chewing.", 3),
    ("Bat", "Hangs around the ceiling.", 4),
    ("Frog", "Sits very still, then doesn't.", 5),
    ("Snail", "In no hurry whatsoever.", 2),
    ("Raven", "Watches you with one eye.", 6),
];

const DEFAULT_INFORMATION_LINES: &[&str] = &[
    "The walls of this room are covered in scribbled equations.",
    "A cold draft blows through the room.",
    "You hear water dripping somewhere behind the walls.",
    "Someone has carved 'turn back' into the door frame.",
    "The floor is suspiciously clean.",
    "A faded map on the wall shows rooms that do not seem to exist.",
];

const DEFAULT_DISS_LINES: &[&str] = &[
    "That is not how any of this works.",
    "The items refuse to cooperate.",
    "You fiddle around for a while. Nothing happens.",
    "Even a goblin would know better.",
];
