//! `action::pickup` module
//!
//! Picking up an item uses it on the spot.

use log::info;

use crate::action::{Action, ActionError};
use crate::item::ItemKind;
use crate::view::{View, ViewItem};
use crate::world::World;

/// Collect the item on the player's tile and apply its effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupItem;

impl Action for PickupItem {
    fn name(&self) -> &str {
        "pickup"
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        let here = world.player.position;
        let Some(item) = world.remove_item_at(here) else {
            view.push(ViewItem::ActionFailure("There's nothing here to pick up.".into()));
            return Ok(());
        };

        let rules = world.rules;
        let player = &mut world.player;
        let effect = match item.kind {
            ItemKind::Potion => {
                let restored = player.health.heal(rules.potion_heal);
                format!(
                    "You drink it and recover {restored} HP (now {}/{}).",
                    player.health.current_hp(),
                    player.health.max_hp()
                )
            },
            ItemKind::Weapon => {
                player.damage = player.damage.saturating_add(rules.weapon_bonus);
                format!("Your attack rises to {}.", player.damage)
            },
            ItemKind::Treasure => {
                player.add_gold(rules.treasure_gold);
                format!("It's worth {} gold.", rules.treasure_gold)
            },
        };
        info!("{} picked up {} at {here}", player.name, item.name);

        view.push(ViewItem::ItemCollected {
            name: item.name.clone(),
            effect,
        });
        player.add_item(item);
        Ok(())
    }
}
