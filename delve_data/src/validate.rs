use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Largest accepted map edge length.
pub const MAX_MAP_SIZE: i32 = 1000;

/// Validation error for malformed layouts in a `WorldDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    OutOfBounds { kind: &'static str, name: String, at: PositionDef, size: i32 },
    SharedTile { kind: &'static str, name: String, at: PositionDef },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfBounds { kind, name, at, size } => {
                write!(f, "{kind} '{name}' at ({}, {}) lies outside a {size}x{size} map", at.x, at.y)
            },
            ValidationError::SharedTile { kind, name, at } => {
                write!(f, "{kind} '{name}' shares tile ({}, {}) with another {kind}", at.x, at.y)
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate bounds and tile occupancy rules in a `WorldDef`.
///
/// ```
/// use delve_data::{ItemDef, ItemKindDef, PlayerDef, PositionDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     title: "Demo".into(),
///     size: 3,
///     player: PlayerDef {
///         start: PositionDef::new(1, 1),
///         ..PlayerDef::default()
///     },
///     items: vec![ItemDef {
///         name: "Coin".into(),
///         description: String::new(),
///         kind: ItemKindDef::Treasure,
///         at: PositionDef::new(0, 2),
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if world.size <= 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("map size must be positive, got {}", world.size),
        });
        // every bounds check below would fail, so report the root cause alone
        return errors;
    }
    if world.size > MAX_MAP_SIZE {
        errors.push(ValidationError::InvalidValue {
            context: format!("map size {} exceeds the limit of {MAX_MAP_SIZE}", world.size),
        });
        return errors;
    }

    let player = &world.player;
    check_bounds("player", &player.name, player.start, world.size, &mut errors);
    if player.max_hp == 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("player '{}' max_hp is zero", player.name),
        });
    }

    let mut enemy_tiles = HashSet::new();
    for enemy in &world.enemies {
        check_bounds("enemy", &enemy.name, enemy.at, world.size, &mut errors);
        if !enemy_tiles.insert(enemy.at) {
            errors.push(ValidationError::SharedTile {
                kind: "enemy",
                name: enemy.name.clone(),
                at: enemy.at,
            });
        }
        if enemy.hp <= 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("enemy '{}' starts defeated (hp {})", enemy.name, enemy.hp),
            });
        }
    }

    let mut item_tiles = HashSet::new();
    for item in &world.items {
        check_bounds("item", &item.name, item.at, world.size, &mut errors);
        if !item_tiles.insert(item.at) {
            errors.push(ValidationError::SharedTile {
                kind: "item",
                name: item.name.clone(),
                at: item.at,
            });
        }
    }

    errors
}

fn check_bounds(kind: &'static str, name: &str, at: PositionDef, size: i32, errors: &mut Vec<ValidationError>) {
    let inside = (0..size).contains(&at.x) && (0..size).contains(&at.y);
    if !inside {
        errors.push(ValidationError::OutOfBounds {
            kind,
            name: name.to_string(),
            at,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> WorldDef {
        WorldDef {
            title: "Test".into(),
            size: 4,
            player: PlayerDef {
                start: PositionDef::new(2, 2),
                ..PlayerDef::default()
            },
            enemies: vec![EnemyDef {
                name: "Rat".into(),
                hp: 5,
                damage: 1,
                at: PositionDef::new(0, 0),
            }],
            items: vec![ItemDef {
                name: "Tonic".into(),
                description: "Restores health".into(),
                kind: ItemKindDef::Potion,
                at: PositionDef::new(0, 0),
            }],
            ..WorldDef::default()
        }
    }

    #[test]
    fn enemy_and_item_may_share_a_tile() {
        assert!(validate_world(&small_world()).is_empty());
    }

    #[test]
    fn out_of_bounds_entities_are_reported() {
        let mut world = small_world();
        world.enemies[0].at = PositionDef::new(4, 0);
        world.player.start = PositionDef::new(-1, 3);
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ValidationError::OutOfBounds { .. }))
        );
    }

    #[test]
    fn two_items_on_one_tile_are_rejected() {
        let mut world = small_world();
        let mut twin = world.items[0].clone();
        twin.name = "Second Tonic".into();
        world.items.push(twin);
        let errors = validate_world(&world);
        assert_eq!(
            errors,
            vec![ValidationError::SharedTile {
                kind: "item",
                name: "Second Tonic".into(),
                at: PositionDef::new(0, 0),
            }]
        );
    }

    #[test]
    fn non_positive_size_short_circuits() {
        let mut world = small_world();
        world.size = 0;
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("map size"));
    }

    #[test]
    fn oversized_map_is_rejected() {
        let mut world = small_world();
        world.size = MAX_MAP_SIZE;
        assert!(validate_world(&world).is_empty());

        world.size = MAX_MAP_SIZE + 1;
        world.player.start = PositionDef::new(MAX_MAP_SIZE, MAX_MAP_SIZE);
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("exceeds the limit"));
    }

    #[test]
    fn defeated_enemies_cannot_be_seeded() {
        let mut world = small_world();
        world.enemies[0].hp = 0;
        let errors = validate_world(&world);
        assert!(matches!(errors[0], ValidationError::InvalidValue { .. }));
    }
}
