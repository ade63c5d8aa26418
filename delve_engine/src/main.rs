#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! Turn-based cave crawler

use delve_engine::style::{GameStyle, normal_block};
use delve_engine::{DELVE_VERSION, Session, View, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use textwrap::fill;

use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading Delve world...");
    let world = load_world().context("while loading World")?;
    info!("World loaded successfully.");

    let title = world.title.to_uppercase();
    let intro = world.intro.clone();
    let mut session = Session::new(world);

    // ready the outer subsystems, then keep start-up out of the player's undo reach
    let mut view = View::new();
    let mission = session.missions().start_mission("Dark Cave", 1, "player-1");
    session.run_mission(mission, &mut view).context("while running the start-up mission")?;
    session.clear_history();

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("while clearing the screen")?;
    info!("Starting the game!");

    println!("{:^60}", title.bright_yellow().underline());
    println!("{:^60}\n", format!("v{DELVE_VERSION}").dimmed());
    view.flush();
    println!("{}\n", fill(&intro, normal_block()).description_style());
    println!("Type {} for the list of commands.", "help".bold());

    run_repl(&mut session)
}
