//! Action module
//!
//! Every player command and every mission step is an [`Action`]: a boxed
//! object that can be executed against the world and stored in the
//! [`Invoker`](crate::Invoker)'s history afterward. Actions that know how to
//! reverse themselves expose that through [`Action::as_reversible`].
//!
//! Actions never own the world. It is lent to them on each call, and anything
//! an action needs to remember for undo is captured when it is constructed or
//! when it runs.
//!
//! Failures come in two strengths. A *soft* failure (walking into a wall,
//! attacking thin air) is reported to the player through the [`View`] and the
//! action still returns `Ok(())`. A *hard* failure is an [`ActionError`] and
//! aborts whatever composite the action belongs to.

pub mod combat;
pub mod composite;
pub mod inspect;
pub mod movement;
pub mod pickup;

pub use combat::{Attack, FixedReward, RandomReward, RewardSource, SeededReward};
pub use composite::CompositeAction;
pub use inspect::{LookAround, ShowInventory, ShowMap, ShowStats};
pub use movement::Move;
pub use pickup::PickupItem;

use thiserror::Error;

use crate::view::View;
use crate::world::World;

/// A unit of game behavior that runs against the world.
pub trait Action {
    /// Short human-readable label used in the history listing.
    fn name(&self) -> &str;

    /// Run the action.
    ///
    /// # Errors
    /// Returns an [`ActionError`] only for hard failures; soft failures are
    /// reported to `view` and return `Ok(())`.
    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError>;

    /// Access to this action's undo capability, if it has one.
    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        None
    }
}

/// Capability of an action that can reverse its own effect.
pub trait Reversible {
    fn undo(&mut self, world: &mut World, view: &mut View);
}

/// Hard failures that abort an action and any composite containing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("failed to initialize characters {ids:?}")]
    CharacterInitFailed { ids: Vec<u32> },
}

/// The built-in cave layout with default rules, for unit tests.
#[cfg(test)]
pub(crate) fn classic_world() -> World {
    crate::loader::build_world_from_def(&crate::loader::default_world_def(), crate::loader::rules::Rules::default())
        .expect("built-in layout is valid")
}
