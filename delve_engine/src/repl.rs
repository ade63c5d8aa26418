//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. [`run_repl`] owns the terminal
//! side (prompt, input, flushing the view); the [`Session`] owns the game.

mod input;
pub mod session;
pub mod system;

pub use session::Session;
pub use system::*;

use crate::command::{parse_command, parse_confirmation};
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::StatusSummary;

use anyhow::Result;
use colored::Colorize;
use log::info;
use variantly::Variantly;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the user quits or the game ends.
///
/// # Errors
/// Currently infallible once started; the `Result` leaves room for handlers
/// that touch the filesystem.
pub fn run_repl(session: &mut Session) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new();
    let mut turn = 0_usize;

    loop {
        let prompt = if session.awaiting_confirmation() {
            CONFIRM_PROMPT.prompt_style().to_string()
        } else {
            status_prompt(&session.status()).prompt_style().to_string()
        };

        let input_event = if let Ok(event) = input_manager.read_line(&prompt) {
            event
        } else {
            view.push(ViewItem::Error("Failed to read input. Try again.".red().to_string()));
            view.flush();
            continue;
        };

        let input = match input_event {
            // any line answers a pending question, even an empty one
            InputEvent::Line(line) if session.awaiting_confirmation() => {
                session.confirm(parse_confirmation(&line), &mut view);
                view.flush();
                continue;
            },
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                session.confirm(false, &mut view);
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };
        if input.trim().is_empty() {
            continue;
        }

        turn += 1;
        info!("================> BEGIN TURN {turn} <================");
        let command = parse_command(&input);
        let control = session.handle(command, &mut view);
        view.flush();
        if control.is_quit() {
            break;
        }
    }
    Ok(())
}

const CONFIRM_PROMPT: &str = "(a/n)> ";

/// One-line status bar shown as the prompt.
fn status_prompt(status: &StatusSummary) -> String {
    format!(
        "\n[HP: {}/{}|Dmg: {}|Gold: {}|Items: {}|Foes: {}]>> ",
        status.hp, status.max_hp, status.damage, status.gold, status.inventory_count, status.living_enemies
    )
}
