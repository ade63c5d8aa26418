//! Health Module
//!
//! Bounded hit points for the player character.
use std::cmp;

use serde::{Deserialize, Serialize};

/// Current and maximum hit points. `current_hp` never leaves `0..=max_hp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    max_hp: u32,
    current_hp: u32,
}
impl HealthState {
    /// Create a `HealthState` at full health.
    pub fn new_at_max(max_hp: u32) -> HealthState {
        HealthState {
            max_hp,
            current_hp: max_hp,
        }
    }

    /// Create a `HealthState` with explicit current health, clamped to `max_hp`.
    pub fn new(current_hp: u32, max_hp: u32) -> HealthState {
        HealthState {
            max_hp,
            current_hp: cmp::min(current_hp, max_hp),
        }
    }

    /// Get the maximum HP for this entity
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Get the current HP for this entity
    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Return whether this entity is alive or dead.
    pub fn life_state(&self) -> LifeState {
        if self.current_hp > 0 {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    /// Do damage to health. Saturates at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Heal the character. Saturates at max health.
    /// Returns the number of hit points actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = cmp::min(self.max_hp, self.current_hp.saturating_add(amount));
        self.current_hp - before
    }
}

/// Possible life states for living entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}
