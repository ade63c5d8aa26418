//! WorldDef loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime engine structs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use delve_data::{EnemyDef, ItemDef, ItemKindDef, PlayerDef, PositionDef, WorldDef};

use crate::enemy::Enemy;
use crate::health::HealthState;
use crate::item::Item;
use crate::loader::rules::Rules;
use crate::loader::validate_worlddef;
use crate::player::Player;
use crate::world::{Position, World};

/// Load a `WorldDef` from a RON file.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Validate a `WorldDef` and convert it into a populated `World`.
pub fn build_world_from_def(def: &WorldDef, rules: Rules) -> Result<World> {
    validate_worlddef(def)?;

    let player = player_from_def(&def.player);
    let enemies = def.enemies.iter().map(enemy_from_def).collect();
    let items = def
        .items
        .iter()
        .map(|item_def| (Position::from(item_def.at), Item::from(item_def)))
        .collect::<BTreeMap<_, _>>();

    let mut world = World::new(def.size, player, enemies, items, rules);
    world.title.clone_from(&def.title);
    world.intro.clone_from(&def.intro);
    Ok(world)
}

fn player_from_def(def: &PlayerDef) -> Player {
    Player {
        name: def.name.clone(),
        health: HealthState::new_at_max(def.max_hp),
        damage: def.damage,
        position: def.start.into(),
        inventory: Vec::new(),
        gold: def.gold,
    }
}

fn enemy_from_def(def: &EnemyDef) -> Enemy {
    Enemy::new(def.name.clone(), def.hp, def.damage, def.at.into())
}

/// The classic five-by-five cave, used when no `world.ron` is available.
pub fn default_world_def() -> WorldDef {
    let enemy = |name: &str, hp, damage, x, y| EnemyDef {
        name: name.into(),
        hp,
        damage,
        at: PositionDef::new(x, y),
    };
    let item = |name: &str, description: &str, kind, x, y| ItemDef {
        name: name.into(),
        description: description.into(),
        kind,
        at: PositionDef::new(x, y),
    };

    WorldDef {
        title: "Delve".into(),
        intro: "You wake in a cold cave. Somewhere in the dark, three creatures guard what \
                little treasure is left. Clear the cave of every foe and every item to win."
            .into(),
        size: 5,
        player: PlayerDef {
            start: PositionDef::new(2, 2),
            ..PlayerDef::default()
        },
        enemies: vec![
            enemy("Goblin", 30, 8, 1, 1),
            enemy("Orc", 50, 12, 4, 1),
            enemy("Troll", 80, 20, 4, 4),
        ],
        items: vec![
            item("Healing Potion", "Restores 50 HP", ItemKindDef::Potion, 1, 3),
            item("Warrior's Sword", "Adds +10 damage", ItemKindDef::Weapon, 0, 0),
            item("Gold Hoard", "A chest full of gold coins", ItemKindDef::Treasure, 3, 4),
            item("Healing Potion", "Restores 50 HP", ItemKindDef::Potion, 2, 0),
        ],
    }
}
