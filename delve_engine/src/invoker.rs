//! Invoker -- runs actions and keeps the undo history.

use log::{info, warn};

use crate::action::{Action, ActionError};
use crate::view::{View, ViewItem};
use crate::world::World;

/// What happened when the player asked to undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// History was empty.
    NothingToUndo,
    /// The newest entry could not be reversed; it was discarded anyway.
    NotReversible(String),
    /// The newest entry was reversed.
    Undone(String),
}

/// Executes actions and records them, newest last.
///
/// Every action that returns `Ok` is recorded, including soft failures, so
/// `history_size` counts commands issued rather than commands that changed
/// anything.
#[derive(Default)]
pub struct Invoker {
    history: Vec<Box<dyn Action>>,
}

impl Invoker {
    pub fn new() -> Self {
        Self { history: Vec::new() }
    }

    /// Run `action` and record it.
    ///
    /// # Errors
    /// A hard [`ActionError`] is passed through and the action is not recorded.
    pub fn execute(&mut self, mut action: Box<dyn Action>, world: &mut World, view: &mut View) -> Result<(), ActionError> {
        action.execute(world, view)?;
        info!("executed '{}' (history: {})", action.name(), self.history.len() + 1);
        self.history.push(action);
        Ok(())
    }

    /// Undo the most recent action. Single step only; there is no redo.
    pub fn undo_last(&mut self, world: &mut World, view: &mut View) -> UndoOutcome {
        let Some(mut action) = self.history.pop() else {
            view.push(ViewItem::ActionFailure("Nothing to undo.".into()));
            return UndoOutcome::NothingToUndo;
        };
        let name = action.name().to_string();
        if let Some(reversible) = action.as_reversible() {
            reversible.undo(world, view);
            info!("undid '{name}'");
            UndoOutcome::Undone(name)
        } else {
            warn!("'{name}' cannot be undone; dropped from history");
            view.push(ViewItem::ActionFailure(format!("'{name}' can't be undone.")));
            UndoOutcome::NotReversible(name)
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    /// Names of recorded actions, oldest first.
    pub fn history_names(&self) -> Vec<&str> {
        self.history.iter().map(|a| a.name()).collect()
    }
}
