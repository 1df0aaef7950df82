//! # Reward Generation
//!
//! The default reward curve keys off number-theoretic properties of the room
//! number. Prime rooms may hold a creature, more likely the more raspberries
//! the player carries. Fibonacci rooms may grant a permanent upgrade. Every
//! fifth room likely holds an item.

use crate::utils::{is_fibonacci, is_prime};
use crate::{GameContext, PermanentUpgrade, Player, Reward, RewardFactory, RoomId};
use log::trace;

/// Item whose count raises the creature chance.
pub const CREATURE_BAIT: &str = "Raspberry";

const BASE_CREATURE_CHANCE: f64 = 0.2;
const CREATURE_CHANCE_PER_BAIT: f64 = 0.01;
const UPGRADE_CHANCE: f64 = 0.5;
const ITEM_CHANCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRewardFactory;

impl RewardFactory for DefaultRewardFactory {
    fn create_reward(
        &self,
        room_id: RoomId,
        player: &Player,
        context: &mut GameContext,
    ) -> Option<Reward> {
        if is_prime(room_id) {
            let chance = BASE_CREATURE_CHANCE
                + CREATURE_CHANCE_PER_BAIT * player.inventory.count_by_name(CREATURE_BAIT) as f64;
            let roll = context.rng.next_double();
            trace!("Prime room {}: creature roll {:.3} against {:.3}", room_id, roll, chance);
            if roll < chance {
                let creature = context.creatures.spawn_random(context.rng.as_mut())?;
                return Some(Reward::Creature { creature, amount: 1 });
            }
            None
        } else if is_fibonacci(room_id) {
            if context.rng.next_double() < UPGRADE_CHANCE {
                let kind = if context.rng.next_bool() {
                    PermanentUpgrade::InventorySize
                } else {
                    PermanentUpgrade::StackSize
                };
                return Some(Reward::PermanentUpgrade { kind });
            }
            None
        } else if room_id % 5 == 0 {
            if context.rng.next_double() < ITEM_CHANCE {
                let item = context.items.random(context.rng.as_mut())?.clone();
                return Some(Reward::Item { item, amount: 1 });
            }
            None
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GameRng;
    use crate::{DungeonConfig, Item, START_ID};

    /// Returns a fixed double and `true`, and always the first index.
    #[derive(Debug)]
    struct FixedRng(f64);

    impl GameRng for FixedRng {
        fn next_int(&mut self, _bound: i32) -> i32 {
            0
        }

        fn next_int_range(&mut self, low: i32, _high_exclusive: i32) -> i32 {
            low
        }

        fn next_double(&mut self) -> f64 {
            self.0
        }

        fn next_bool(&mut self) -> bool {
            true
        }
    }

    fn reward(room_id: RoomId, roll: f64, player: &Player) -> Option<Reward> {
        let mut context = GameContext::with_rng(Box::new(FixedRng(roll)));
        DefaultRewardFactory.create_reward(room_id, player, &mut context)
    }

    fn player() -> Player {
        Player::new(&DungeonConfig::new(0))
    }

    #[test]
    fn test_start_room_counts_as_fifth_room() {
        let player = player();
        assert!(matches!(
            reward(START_ID, 0.0, &player),
            Some(Reward::Item { amount: 1, .. })
        ));
        assert_eq!(reward(START_ID, 0.9, &player), None);
    }

    #[test]
    fn test_prime_rooms_give_creatures() {
        let player = player();
        assert!(matches!(
            reward(7, 0.1, &player),
            Some(Reward::Creature { amount: 1, .. })
        ));
        assert_eq!(reward(7, 0.2, &player), None);
    }

    #[test]
    fn test_raspberries_attract_creatures() {
        let mut player = Player::new(&DungeonConfig {
            inventory_capacity: 10,
            stack_capacity: 10,
            ..DungeonConfig::new(0)
        });
        let raspberry = Item::new(CREATURE_BAIT, "");
        for _ in 0..10 {
            assert!(player.inventory.add_item(&raspberry));
        }
        assert!(reward(7, 0.25, &player).is_some());
        assert_eq!(reward(7, 0.35, &player), None);
    }

    #[test]
    fn test_fibonacci_rooms_give_upgrades() {
        // 8 and 21 are Fibonacci numbers but not prime
        assert_eq!(
            reward(8, 0.4, &player()),
            Some(Reward::PermanentUpgrade {
                kind: PermanentUpgrade::InventorySize
            })
        );
        assert_eq!(reward(21, 0.6, &player()), None);
    }

    #[test]
    fn test_every_fifth_room_gives_items() {
        let player = player();
        let expected = GameContext::new(0).items.items()[0].clone();
        assert_eq!(
            reward(10, 0.5, &player),
            Some(Reward::Item {
                item: expected,
                amount: 1
            })
        );
        assert_eq!(reward(10, 0.9, &player), None);
    }

    #[test]
    fn test_other_rooms_give_nothing() {
        for room_id in [4, 6, 9, 12] {
            assert_eq!(reward(room_id, 0.0, &player()), None);
        }
    }
}
