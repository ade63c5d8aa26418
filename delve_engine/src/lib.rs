#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DELVE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod action;
pub mod command;
pub mod data_paths;
pub mod enemy;
pub mod health;
pub mod invoker;
pub mod item;
pub mod loader;
pub mod mission;
pub mod player;
pub mod repl;
pub mod spinners;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use action::{Action, ActionError, Reversible};
pub use enemy::Enemy;
pub use invoker::{Invoker, UndoOutcome};
pub use item::{Item, ItemKind};
pub use loader::load_world;
pub use player::Player;
pub use repl::{Session, run_repl};
pub use view::{View, ViewItem};
pub use world::{Direction, GameState, Position, World};
