//! `action::combat` module
//!
//! Melee combat. The player strikes first; a surviving enemy strikes back at
//! once. A defeated enemy drops a purse of gold whose size comes from a
//! [`RewardSource`], so tests can pin it down.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::{Action, ActionError};
use crate::view::{View, ViewItem};
use crate::world::{Direction, World};

/// Supplies the gold awarded for a defeated enemy.
pub trait RewardSource {
    /// Pick a reward from `min..=max`.
    fn roll(&mut self, min: u32, max: u32) -> u32;
}

/// A shared source, so one generator can serve every attack in a session.
impl<R: RewardSource + ?Sized> RewardSource for Rc<RefCell<R>> {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.borrow_mut().roll(min, max)
    }
}

/// Rolls rewards with the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReward;

impl RewardSource for RandomReward {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        rand::rng().random_range(min..=max.max(min))
    }
}

/// Rolls rewards from a seeded generator, so a sequence of fights is reproducible.
#[derive(Debug, Clone)]
pub struct SeededReward(StdRng);

impl SeededReward {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RewardSource for SeededReward {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max.max(min))
    }
}

/// Always awards the same amount, regardless of the range.
#[derive(Debug, Clone, Copy)]
pub struct FixedReward(pub u32);

impl RewardSource for FixedReward {
    fn roll(&mut self, _min: u32, _max: u32) -> u32 {
        self.0
    }
}

/// Strike the enemy on the player's tile, or on a neighboring tile.
pub struct Attack {
    target: Option<Direction>,
    rewards: Box<dyn RewardSource>,
    name: String,
}

impl Attack {
    /// Attack whatever stands on the player's own tile.
    pub fn here() -> Self {
        Self {
            target: None,
            rewards: Box::new(RandomReward),
            name: "attack".to_string(),
        }
    }

    /// Attack the enemy one step away in `direction`.
    pub fn toward(direction: Direction) -> Self {
        Self {
            target: Some(direction),
            rewards: Box::new(RandomReward),
            name: format!("attack {direction}"),
        }
    }

    /// Replace the source of defeat rewards.
    #[must_use]
    pub fn with_rewards(mut self, rewards: impl RewardSource + 'static) -> Self {
        self.rewards = Box::new(rewards);
        self
    }
}

impl Action for Attack {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        let target = match self.target {
            Some(direction) => world.player.position.step(direction),
            None => world.player.position,
        };
        let player_damage = world.player.damage;
        let (min, max) = (world.rules.reward_min, world.rules.reward_max);

        let Some(enemy) = world.enemy_at_mut(target) else {
            let msg = match self.target {
                Some(direction) => format!("There's nobody to the {direction} to attack."),
                None => "There's nobody here to attack.".to_string(),
            };
            view.push(ViewItem::ActionFailure(msg));
            return Ok(());
        };

        let defeated = enemy.take_hit(player_damage);
        let enemy_name = enemy.name.clone();
        let enemy_hp = enemy.health;
        let enemy_damage = enemy.damage;
        view.push(ViewItem::CombatBlow {
            enemy: enemy_name.clone(),
            damage: player_damage,
            enemy_hp,
        });

        if defeated {
            let gold = self.rewards.roll(min, max);
            world.player.add_gold(gold);
            info!("{} defeated {enemy_name} and looted {gold} gold", world.player.name);
            view.push(ViewItem::EnemyDefeated { enemy: enemy_name, gold });
            return Ok(());
        }

        world.player.health.damage(enemy_damage);
        let player_hp = world.player.health.current_hp();
        info!(
            "{enemy_name} ({enemy_hp} HP left) struck {} for {enemy_damage}, {player_hp} HP left",
            world.player.name
        );
        view.push(ViewItem::Counterattack {
            enemy: enemy_name.clone(),
            damage: enemy_damage,
            player_hp,
        });
        if !world.player.is_alive() {
            info!("{} was slain by {enemy_name}", world.player.name);
            view.push(ViewItem::PlayerDefeated(enemy_name));
        }
        Ok(())
    }
}
