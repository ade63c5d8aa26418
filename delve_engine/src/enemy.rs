//! Enemy -- hostile creatures seeded into the cave at world creation.
use serde::{Deserialize, Serialize};

use crate::world::Position;

/// A hostile creature.
///
/// `health` is signed because a heavy blow can push it below zero before the
/// enemy is marked defeated. Defeated enemies stay in the world's roster so
/// the stats screen can count them; they no longer block or fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    pub damage: u32,
    pub position: Position,
    pub alive: bool,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: i32, damage: u32, position: Position) -> Self {
        Self {
            name: name.into(),
            health,
            damage,
            position,
            alive: true,
        }
    }

    /// Apply a blow. Returns true if this blow defeated the enemy.
    ///
    /// Blows against an enemy that is already down are ignored.
    pub fn take_hit(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub_unsigned(amount);
        if self.health <= 0 {
            self.alive = false;
        }
        !self.alive
    }
}
