//! `repl::system` module
//!
//! Contains repl loop handlers for commands that don't act on the cave itself.

use std::collections::HashMap;

use gametools::Spinner;
use log::info;

use crate::command::VOCABULARY;
use crate::invoker::{Invoker, UndoOutcome};
use crate::repl::ReplControl;
use crate::spinners::{SpinnerType, spin};
use crate::view::{HelpLine, View, ViewItem};
use crate::world::World;

/// Quit the game.
pub fn quit_handler(
    world: &World,
    view: &mut View,
    spinners: &HashMap<SpinnerType, Spinner<&'static str>>,
) -> ReplControl {
    info!(
        "{} quit with {} gold after visiting {} tiles",
        world.player.name,
        world.player.gold,
        world.visited.len()
    );
    info!("ending inventory:");
    world.player.inventory.iter().for_each(|i| info!("- {}", i.name));

    let tiles = usize::try_from(world.size * world.size).unwrap_or_default();
    view.push(ViewItem::QuitSummary {
        farewell: spin(spinners, SpinnerType::QuitMsg, "Farewell."),
        gold: world.player.gold,
        visited: world.visited.len(),
        tiles,
    });
    ReplControl::Quit
}

/// Show available commands.
pub fn help_handler(view: &mut View) {
    let lines = VOCABULARY
        .iter()
        .map(|(words, description)| HelpLine {
            words: words.join(", "),
            description: (*description).to_string(),
        })
        .collect();
    view.push(ViewItem::Help(lines));
}

/// List the commands in the undo history, oldest first.
pub fn history_handler(invoker: &Invoker, view: &mut View) {
    let names = invoker.history_names().into_iter().map(String::from).collect();
    view.push(ViewItem::History { names });
}

/// Ask before clearing the history.
///
/// Returns true if the player now has to answer; an empty history needs no
/// confirmation and is left alone.
pub fn clear_request_handler(invoker: &Invoker, view: &mut View) -> bool {
    let size = invoker.history_size();
    if size == 0 {
        view.push(ViewItem::ActionFailure("History is already empty.".into()));
        return false;
    }
    view.push(ViewItem::EngineMessage(format!(
        "Really clear {size} command(s) from the history? Undo will no longer reach them. (a/n)"
    )));
    true
}

/// Carry out the answer to [`clear_request_handler`].
pub fn clear_confirm_handler(invoker: &mut Invoker, view: &mut View, confirmed: bool) {
    if confirmed {
        info!("history cleared ({} entries)", invoker.history_size());
        invoker.clear_history();
        view.push(ViewItem::EngineMessage("History cleared.".into()));
    } else {
        view.push(ViewItem::ActionFailure("History left as it was.".into()));
    }
}

/// Take back the most recent command.
pub fn undo_handler(invoker: &mut Invoker, world: &mut World, view: &mut View) -> UndoOutcome {
    let outcome = invoker.undo_last(world, view);
    info!("undo requested: {outcome:?}");
    outcome
}
