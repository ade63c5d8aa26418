//! `action::composite` module
//!
//! A composite bundles several actions into one history entry.

use log::{info, warn};

use crate::action::{Action, ActionError, Reversible};
use crate::view::View;
use crate::world::World;

/// An ordered sequence of actions that executes and undoes as a unit.
///
/// Members run in insertion order and stop at the first hard error. Undo
/// walks the members that ran in reverse order, skipping any that cannot be
/// reversed.
pub struct CompositeAction {
    name: String,
    actions: Vec<Box<dyn Action>>,
    /// Number of leading members that completed on the last execution.
    completed: usize,
}

impl CompositeAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            completed: 0,
        }
    }

    /// Append an action to the end of the sequence.
    pub fn push(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, action: impl Action + 'static) -> Self {
        self.push(Box::new(action));
        self
    }

    /// Remove and return the action at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Action>> {
        (index < self.actions.len()).then(|| self.actions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Names of the member actions, in execution order.
    pub fn member_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }
}

impl Action for CompositeAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        self.completed = 0;
        for action in &mut self.actions {
            if let Err(e) = action.execute(world, view) {
                warn!("'{}' aborted at '{}': {e}", self.name, action.name());
                return Err(e);
            }
            self.completed += 1;
        }
        info!("'{}' completed {} actions", self.name, self.completed);
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for CompositeAction {
    fn undo(&mut self, world: &mut World, view: &mut View) {
        for action in self.actions[..self.completed].iter_mut().rev() {
            if let Some(reversible) = action.as_reversible() {
                reversible.undo(world, view);
            }
        }
        self.completed = 0;
    }
}
