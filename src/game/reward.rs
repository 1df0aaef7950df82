//! # Rewards
//!
//! One-time payoffs granted when a room is successfully entered.

use crate::persistence::{SaveReader, SaveWriter};
use crate::{Creature, DelveError, DelveResult, Item, ItemCatalog, PermanentUpgrade};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A typed payoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    /// Units of an item, added to the inventory one at a time.
    Item { item: Item, amount: u32 },
    /// Creatures, all of which join the menagerie.
    Creature { creature: Creature, amount: u32 },
    /// A permanent change to the player's inventory.
    PermanentUpgrade { kind: PermanentUpgrade },
}

impl Reward {
    /// Tag written to save files.
    pub fn kind(&self) -> &'static str {
        match self {
            Reward::Item { .. } => "Item",
            Reward::Creature { .. } => "Creature",
            Reward::PermanentUpgrade { .. } => "PermanentUpgrade",
        }
    }

    /// Display name of what is granted.
    pub fn name(&self) -> &str {
        match self {
            Reward::Item { item, .. } => &item.name,
            Reward::Creature { creature, .. } => &creature.name,
            Reward::PermanentUpgrade { kind } => kind.name(),
        }
    }

    /// Number of units granted. Upgrades always count as one.
    pub fn amount(&self) -> u32 {
        match self {
            Reward::Item { amount, .. } | Reward::Creature { amount, .. } => *amount,
            Reward::PermanentUpgrade { .. } => 1,
        }
    }

    /// Message announcing the reward, mentioning units lost to a full inventory.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Item, Reward};
    ///
    /// let reward = Reward::Item { item: Item::new("Stick", ""), amount: 3 };
    /// assert_eq!(reward.acquisition_message(0), "Reward: Stick (x3)");
    /// assert_eq!(
    ///     reward.acquisition_message(1),
    ///     "Reward: Stick (x3), but x1 were lost due to full inventory."
    /// );
    /// ```
    pub fn acquisition_message(&self, lost: u32) -> String {
        if lost == 0 {
            format!("Reward: {} (x{})", self.name(), self.amount())
        } else {
            format!(
                "Reward: {} (x{}), but x{} were lost due to full inventory.",
                self.name(),
                self.amount(),
                lost
            )
        }
    }

    /// Writes the reward kind, its payload, and the amount (not for upgrades).
    pub fn encode<W: Write>(&self, writer: &mut SaveWriter<W>) -> DelveResult<()> {
        writer.write_str(self.kind())?;
        match self {
            Reward::Item { item, amount } => {
                writer.write_str(&item.name)?;
                writer.write_i32(*amount as i32)
            }
            Reward::Creature { creature, amount } => {
                creature.encode(writer)?;
                writer.write_i32(*amount as i32)
            }
            Reward::PermanentUpgrade { kind } => writer.write_str(kind.save_tag()),
        }
    }

    /// Reads a reward record, resolving items through the catalog.
    pub fn decode<R: Read>(reader: &mut SaveReader<R>, items: &ItemCatalog) -> DelveResult<Self> {
        let kind = reader.read_string()?;
        let reward = match kind.as_str() {
            "Item" => {
                let name = reader.read_string()?;
                let item = items
                    .lookup(&name)
                    .cloned()
                    .ok_or(DelveError::UnknownItem(name))?;
                Reward::Item {
                    item,
                    amount: read_amount(reader)?,
                }
            }
            "Creature" => {
                let creature = Creature::decode(reader)?;
                Reward::Creature {
                    creature,
                    amount: read_amount(reader)?,
                }
            }
            "PermanentUpgrade" => Reward::PermanentUpgrade {
                kind: PermanentUpgrade::from_save_tag(&reader.read_string()?)?,
            },
            _ => return Err(DelveError::UnknownRewardKind(kind)),
        };
        Ok(reward)
    }
}

fn read_amount<R: Read>(reader: &mut SaveReader<R>) -> DelveResult<u32> {
    let amount = reader.read_i32()?;
    if amount <= 0 {
        return Err(DelveError::CorruptSave(format!(
            "reward amount must be positive, got {amount}"
        )));
    }
    Ok(amount as u32)
}
