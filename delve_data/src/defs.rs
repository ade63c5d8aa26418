use serde::{Deserialize, Serialize};

/// Top-level world data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    /// Edge length of the square map.
    pub size: i32,
    pub player: PlayerDef,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

/// Grid coordinate as written in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct PositionDef {
    pub x: i32,
    pub y: i32,
}

impl PositionDef {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Starting state of the player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub name: String,
    pub max_hp: u32,
    pub damage: u32,
    pub start: PositionDef,
    #[serde(default)]
    pub gold: u32,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            name: "Hero".into(),
            max_hp: 100,
            damage: 15,
            start: PositionDef::default(),
            gold: 0,
        }
    }
}

/// An enemy placed at world creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub name: String,
    pub hp: i32,
    pub damage: u32,
    pub at: PositionDef,
}

/// Effect applied when an item is picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKindDef {
    Weapon,
    Potion,
    Treasure,
}

/// An item lying on the map at world creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKindDef,
    pub at: PositionDef,
}

/// Tuning constants for combat and item effects (`rules.toml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesDef {
    pub potion_heal: u32,
    pub weapon_bonus: u32,
    pub treasure_gold: u32,
    pub reward_min: u32,
    pub reward_max: u32,
}

impl Default for RulesDef {
    fn default() -> Self {
        Self {
            potion_heal: 50,
            weapon_bonus: 10,
            treasure_gold: 100,
            reward_min: 10,
            reward_max: 39,
        }
    }
}
