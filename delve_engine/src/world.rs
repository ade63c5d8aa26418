//! Data structures representing the game world.
//!
//! This module defines [`World`] and the small value types used to address
//! it. A `World` is built once per session (see [`crate::loader`]) and is
//! lent to every action as `&mut World`; nothing else owns game state.

use crate::loader::rules::Rules;
use crate::{Enemy, Item, Player};

use delve_data::PositionDef;
use log::info;
use serde::{Deserialize, Serialize};

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Flavor lines for empty tiles, picked by position so a tile always reads the same.
pub const ROOM_DESCRIPTIONS: [&str; 5] = [
    "A dark chamber with damp walls.",
    "A corridor lit by guttering torches.",
    "A spacious hall under a high vaulted ceiling.",
    "A narrow passage strung with cobwebs.",
    "A stone chamber echoing with dripping water.",
];

pub const GLYPH_PLAYER: char = '@';
pub const GLYPH_ENEMY: char = 'E';
pub const GLYPH_ITEM: char = '*';
pub const GLYPH_VISITED: char = '.';
pub const GLYPH_UNKNOWN: char = '?';

/// A grid coordinate, used directly as the key of the world's maps and sets.
/// Two positions name the same tile iff they are equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring coordinate one step in `direction`. May lie off the map.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
impl From<PositionDef> for Position {
    fn from(def: PositionDef) -> Self {
        Position::new(def.x, def.y)
    }
}

/// Compass directions the player can walk. North is toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}
impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the session is still running, and how it ended if not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Won,
    Lost,
}
impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

/// What the player notices on the tile they occupy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Enemy { name: String, health: i32 },
    Item { name: String, description: String },
    Empty(&'static str),
}

/// Result of [`World::describe_current_location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDescription {
    pub position: Position,
    pub feature: Feature,
}

/// Snapshot of the numbers shown in the status bar and stats screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    pub gold: u32,
    pub inventory_count: usize,
    pub living_enemies: usize,
    pub total_enemies: usize,
}
impl StatusSummary {
    pub fn defeated_enemies(&self) -> usize {
        self.total_enemies - self.living_enemies
    }
}

/// Complete state of the running game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub title: String,
    pub intro: String,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Items still lying on the map, at most one per tile.
    pub items: BTreeMap<Position, Item>,
    /// Edge length of the square map: valid coordinates are `0..size`.
    pub size: i32,
    /// Tiles the player has stood on. Only ever grows.
    pub visited: HashSet<Position>,
    pub rules: Rules,
}
impl World {
    /// Create a world with the given contents. The player's starting tile counts as visited.
    pub fn new(size: i32, player: Player, enemies: Vec<Enemy>, items: BTreeMap<Position, Item>, rules: Rules) -> World {
        let mut visited = HashSet::new();
        visited.insert(player.position);
        let world = World {
            title: String::new(),
            intro: String::new(),
            player,
            enemies,
            items,
            size,
            visited,
            rules,
        };
        info!(
            "new {size}x{size} world created with {} enemies and {} items",
            world.enemies.len(),
            world.items.len()
        );
        world
    }

    /// First living enemy standing on `pos`.
    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.alive && e.position == pos)
    }

    /// Mutable access to the first living enemy standing on `pos`.
    pub fn enemy_at_mut(&mut self, pos: Position) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.alive && e.position == pos)
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.get(&pos)
    }

    /// Remove and return the item on `pos`, if any. Removing from an empty tile is a no-op.
    pub fn remove_item_at(&mut self, pos: Position) -> Option<Item> {
        self.items.remove(&pos)
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    pub fn mark_visited(&mut self, pos: Position) {
        self.visited.insert(pos);
    }

    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    /// Describe the player's tile: a living enemy wins over an item, and an
    /// empty tile gets a flavor line fixed by its coordinates.
    pub fn describe_current_location(&self) -> LocationDescription {
        let pos = self.player.position;
        let feature = if let Some(enemy) = self.enemy_at(pos) {
            Feature::Enemy {
                name: enemy.name.clone(),
                health: enemy.health,
            }
        } else if let Some(item) = self.item_at(pos) {
            Feature::Item {
                name: item.name.clone(),
                description: item.description.clone(),
            }
        } else {
            Feature::Empty(flavor_line(pos, self.size))
        };
        LocationDescription { position: pos, feature }
    }

    /// Render the map as one string per row (y = 0 first), one glyph per tile.
    ///
    /// Tile priority: player, living enemy, item, visited, unknown.
    pub fn render_map(&self) -> Vec<String> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| self.glyph_at(Position::new(x, y)).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn glyph_at(&self, pos: Position) -> char {
        if self.player.position == pos {
            GLYPH_PLAYER
        } else if self.enemy_at(pos).is_some() {
            GLYPH_ENEMY
        } else if self.items.contains_key(&pos) {
            GLYPH_ITEM
        } else if self.is_visited(pos) {
            GLYPH_VISITED
        } else {
            GLYPH_UNKNOWN
        }
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary {
            name: self.player.name.clone(),
            hp: self.player.health.current_hp(),
            max_hp: self.player.health.max_hp(),
            damage: self.player.damage,
            gold: self.player.gold,
            inventory_count: self.player.inventory.len(),
            living_enemies: self.living_enemy_count(),
            total_enemies: self.enemies.len(),
        }
    }

    /// Terminal state check. A dead player loses even if the board is also cleared.
    pub fn state(&self) -> GameState {
        if !self.player.is_alive() {
            GameState::Lost
        } else if self.enemies.iter().all(|e| !e.alive) && self.items.is_empty() {
            GameState::Won
        } else {
            GameState::Ongoing
        }
    }
}

fn flavor_line(pos: Position, size: i32) -> &'static str {
    // i64 holds x + y * size for any pair of i32 coordinates
    let len = i64::try_from(ROOM_DESCRIPTIONS.len()).unwrap_or(i64::MAX);
    let index = (i64::from(pos.x) + i64::from(pos.y) * i64::from(size)).rem_euclid(len);
    ROOM_DESCRIPTIONS[usize::try_from(index).unwrap_or_default()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthState;
    use crate::item::ItemKind;

    fn player_at(x: i32, y: i32) -> Player {
        Player {
            position: Position::new(x, y),
            ..Player::default()
        }
    }

    fn test_world() -> World {
        let mut items = BTreeMap::new();
        items.insert(
            Position::new(0, 0),
            Item::new("Sword", "+10 damage", ItemKind::Weapon),
        );
        items.insert(
            Position::new(1, 1),
            Item::new("Potion", "Restores 50 HP", ItemKind::Potion),
        );
        World::new(
            3,
            player_at(2, 2),
            vec![Enemy::new("Goblin", 30, 8, Position::new(1, 1))],
            items,
            Rules::default(),
        )
    }

    #[test]
    fn start_tile_is_visited() {
        let world = test_world();
        assert!(world.is_visited(Position::new(2, 2)));
        assert_eq!(world.visited.len(), 1);
    }

    #[test]
    fn bounds_are_half_open() {
        let world = test_world();
        assert!(world.is_in_bounds(Position::new(0, 0)));
        assert!(world.is_in_bounds(Position::new(2, 2)));
        assert!(!world.is_in_bounds(Position::new(3, 0)));
        assert!(!world.is_in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn defeated_enemies_are_invisible_to_lookup() {
        let mut world = test_world();
        assert!(world.enemy_at(Position::new(1, 1)).is_some());
        world.enemies[0].alive = false;
        assert!(world.enemy_at(Position::new(1, 1)).is_none());
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut world = test_world();
        assert!(world.remove_item_at(Position::new(0, 0)).is_some());
        assert!(world.remove_item_at(Position::new(0, 0)).is_none());
        assert_eq!(world.items.len(), 1);
    }

    #[test]
    fn enemy_is_described_before_item() {
        let mut world = test_world();
        world.player.position = Position::new(1, 1);
        let desc = world.describe_current_location();
        assert_eq!(
            desc.feature,
            Feature::Enemy {
                name: "Goblin".into(),
                health: 30
            }
        );

        world.enemies[0].alive = false;
        let desc = world.describe_current_location();
        assert!(matches!(desc.feature, Feature::Item { ref name, .. } if name == "Potion"));
    }

    #[test]
    fn empty_tile_flavor_is_a_function_of_position() {
        let mut world = test_world();
        world.player.position = Position::new(2, 1);
        // (2 + 1 * 3) % 5 == 0
        assert_eq!(
            world.describe_current_location().feature,
            Feature::Empty(ROOM_DESCRIPTIONS[0])
        );
        world.player.position = Position::new(2, 2);
        // (2 + 2 * 3) % 5 == 3
        assert_eq!(
            world.describe_current_location().feature,
            Feature::Empty(ROOM_DESCRIPTIONS[3])
        );
    }

    #[test]
    fn flavor_index_does_not_overflow_on_huge_maps() {
        let world = World::new(50_000, player_at(49_999, 49_999), Vec::new(), BTreeMap::new(), Rules::default());
        // (49_999 + 49_999 * 50_000) % 5 == 4
        assert_eq!(
            world.describe_current_location().feature,
            Feature::Empty(ROOM_DESCRIPTIONS[4])
        );
    }

    #[test]
    fn map_glyphs_follow_priority() {
        let mut world = test_world();
        world.mark_visited(Position::new(2, 0));
        assert_eq!(world.render_map(), vec!["* ? .", "? E ?", "? ? @"]);

        // item shows once the enemy on the same tile is down
        world.enemies[0].alive = false;
        assert_eq!(world.render_map()[1], "? * ?");

        // player glyph hides everything beneath it
        world.player.position = Position::new(0, 0);
        assert_eq!(world.render_map()[0], "@ ? .");
    }

    #[test]
    fn state_requires_cleared_board_for_victory() {
        let mut world = test_world();
        assert_eq!(world.state(), GameState::Ongoing);

        world.enemies[0].alive = false;
        assert_eq!(world.state(), GameState::Ongoing);

        world.items.clear();
        assert_eq!(world.state(), GameState::Won);
    }

    #[test]
    fn death_outranks_victory() {
        let mut world = test_world();
        world.enemies[0].alive = false;
        world.items.clear();
        world.player.health = HealthState::new(0, 100);
        assert_eq!(world.state(), GameState::Lost);
        assert!(world.state().is_terminal());
    }

    #[test]
    fn status_summary_counts_from_state() {
        let mut world = test_world();
        world.player.gold = 42;
        world.player.add_item(Item::new("Gem", "Shiny", ItemKind::Treasure));
        let summary = world.status_summary();
        assert_eq!(summary.hp, 100);
        assert_eq!(summary.gold, 42);
        assert_eq!(summary.inventory_count, 1);
        assert_eq!(summary.living_enemies, 1);
        assert_eq!(summary.defeated_enemies(), 0);
    }

    #[test]
    fn step_may_leave_the_map() {
        assert_eq!(Position::new(1, 1).step(Direction::North), Position::new(1, 0));
        assert_eq!(Position::new(0, 1).step(Direction::West), Position::new(-1, 1));
    }
}
