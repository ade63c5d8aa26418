//! Item module
//!
//! Items lie on the map until picked up. Picking one up consumes it at once:
//! the kind decides which stat changes, and there is no separate "use" step.
use serde::{Deserialize, Serialize};

use delve_data::{ItemDef, ItemKindDef};

/// Effect class of an item, applied on pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Potion,
    Treasure,
}

impl From<ItemKindDef> for ItemKind {
    fn from(value: ItemKindDef) -> Self {
        match value {
            ItemKindDef::Weapon => ItemKind::Weapon,
            ItemKindDef::Potion => ItemKind::Potion,
            ItemKindDef::Treasure => ItemKind::Treasure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

impl From<&ItemDef> for Item {
    fn from(def: &ItemDef) -> Self {
        Item::new(def.name.clone(), def.description.clone(), def.kind.into())
    }
}
