//! `action::inspect` module
//!
//! Read-only actions: they look at the world and report, nothing more.

use crate::action::{Action, ActionError};
use crate::view::{InventoryLine, View, ViewItem};
use crate::world::World;

/// Describe the player's current tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookAround;

impl Action for LookAround {
    fn name(&self) -> &str {
        "look"
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        view.push(ViewItem::Location(world.describe_current_location()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowMap;

impl Action for ShowMap {
    fn name(&self) -> &str {
        "map"
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        view.push(ViewItem::Map(world.render_map()));
        Ok(())
    }
}

/// List collected items in pickup order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowInventory;

impl Action for ShowInventory {
    fn name(&self) -> &str {
        "inventory"
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        let lines = world
            .player
            .inventory
            .iter()
            .map(|item| InventoryLine {
                name: item.name.clone(),
                description: item.description.clone(),
            })
            .collect();
        view.push(ViewItem::Inventory(lines));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowStats;

impl Action for ShowStats {
    fn name(&self) -> &str {
        "stats"
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        view.push(ViewItem::Stats(world.status_summary()));
        Ok(())
    }
}
