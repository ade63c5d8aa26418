//! `action::movement` module
//!
//! Contains the one action that changes the player's location.

use log::info;

use crate::action::{Action, ActionError, Reversible};
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::{Direction, Position, World};

/// Step the player one tile in a compass direction.
///
/// A step into a wall or into a living enemy is refused and changes nothing.
/// Undo puts the player back where they stood when the action was built; the
/// tiles they saw stay explored.
#[derive(Debug, Clone)]
pub struct Move {
    direction: Direction,
    previous: Position,
    name: String,
}

impl Move {
    pub fn new(world: &World, direction: Direction) -> Self {
        Self {
            direction,
            previous: world.player.position,
            name: format!("move {direction}"),
        }
    }
}

impl Action for Move {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        let destination = world.player.position.step(self.direction);

        if !world.is_in_bounds(destination) {
            view.push(ViewItem::ActionFailure(format!(
                "You can't go {} - there's a solid wall that way.",
                self.direction
            )));
            return Ok(());
        }
        if let Some(enemy) = world.enemy_at(destination) {
            view.push(ViewItem::ActionFailure(format!(
                "You can't get past - {} blocks the way {}!",
                enemy.name.enemy_style(),
                self.direction
            )));
            return Ok(());
        }

        world.player.position = destination;
        world.mark_visited(destination);
        info!("{} moved {} to {destination}", world.player.name, self.direction);

        view.push(ViewItem::ActionSuccess(format!("You head {}...", self.direction)));
        view.push(ViewItem::Location(world.describe_current_location()));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for Move {
    fn undo(&mut self, world: &mut World, view: &mut View) {
        world.player.position = self.previous;
        info!("{} returned to {}", world.player.name, self.previous);
        view.push(ViewItem::Undone(format!("You retrace your steps to {}.", self.previous)));
    }
}
