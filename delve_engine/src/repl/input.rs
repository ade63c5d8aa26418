//! Terminal input handling for the Delve REPL.
//!
//! A rustyline editor with completion over the game's command words, and a
//! plain stdin fallback for pipes and dumb terminals.

use std::io::{self, IsTerminal, Write};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::VOCABULARY;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

lazy_static! {
    static ref COMMAND_TERMS: Vec<String> = build_command_terms();
}

/// Words that accept a direction after them.
const DIRECTED_VERBS: &[&str] = &["attack", "a", "utok"];
const DIRECTION_WORDS: &[&str] = &["north", "south", "east", "west", "sever", "jih", "vychod", "zapad"];

pub type ReplEditor = rustyline::Editor<DelveHelper, DefaultHistory>;

/// Tab completion over [`COMMAND_TERMS`].
#[derive(Default)]
pub struct DelveHelper;

impl Helper for DelveHelper {}

impl Completer for DelveHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&lower))
            .map(|term| Pair {
                display: term.clone(),
                replacement: term.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for DelveHelper {
    type Hint = String;
}

impl Highlighter for DelveHelper {}

impl Validator for DelveHelper {}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Every full command the player can type, for prefix completion.
fn build_command_terms() -> Vec<String> {
    let mut terms: Vec<String> = VOCABULARY
        .iter()
        .flat_map(|(words, _)| words.iter())
        .filter(|word| word.len() > 1)
        .map(ToString::to_string)
        .collect();
    for verb in DIRECTED_VERBS.iter().filter(|v| v.len() > 1) {
        terms.extend(DIRECTION_WORDS.iter().map(|dir| format!("{verb} {dir}")));
    }
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Line source for the REPL: a completing editor on a terminal, plain stdin otherwise.
///
/// History lives only as long as the editor does; nothing is written to disk.
pub enum InputManager {
    Editor(Box<ReplEditor>),
    Plain,
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a TTY; using plain input");
            return InputManager::Plain;
        }
        match ReplEditor::new() {
            Ok(mut editor) => {
                editor.set_helper(Some(DelveHelper));
                InputManager::Editor(Box::new(editor))
            },
            Err(err) => {
                warn!("editor unavailable ({err}); using plain input");
                InputManager::Plain
            },
        }
    }

    /// Read one line. An editor that breaks mid-game is dropped for plain stdin.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let InputManager::Editor(editor) = self else {
            return read_plain(prompt);
        };
        match read_with_editor(editor, prompt) {
            Err(err) => {
                warn!("editor input failed: {err}; switching to plain input");
                *self = InputManager::Plain;
                read_plain(prompt)
            },
            event => event,
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

fn read_with_editor(editor: &mut ReplEditor, prompt: &str) -> io::Result<InputEvent> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty()
                && let Err(err) = editor.add_history_entry(line.as_str())
            {
                warn!("failed to add history entry: {err}");
            }
            Ok(InputEvent::Line(line))
        },
        Err(err) => convert_readline_error(err),
    }
}

fn read_plain(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(InputEvent::Line(line))
}

fn convert_readline_error(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(io_err) => Err(io_err),
        other => Err(io::Error::other(other)),
    }
}
