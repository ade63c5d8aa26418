//! Player -- module for the player character in Delve
use crate::health::{HealthState, LifeState};
use crate::item::Item;
use crate::world::Position;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub health: HealthState,
    /// Attack power applied to an enemy per blow.
    pub damage: u32,
    pub position: Position,
    /// Items in the order they were picked up.
    pub inventory: Vec<Item>,
    pub gold: u32,
}
impl Default for Player {
    fn default() -> Player {
        Self {
            name: "Hero".into(),
            health: HealthState::new_at_max(100),
            damage: 15,
            position: Position::default(),
            inventory: Vec::new(),
            gold: 0,
        }
    }
}
impl Player {
    pub fn is_alive(&self) -> bool {
        self.health.life_state() == LifeState::Alive
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }
}
