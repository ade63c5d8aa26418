//! Scripted walkthrough of missions, single subsystem actions and undo.
//!
//! Runs without a prompt: every step is executed through one `Invoker` and its
//! output flushed, ending with the size of the remaining history.
//! Run with `RUST_LOG=info` to see the subsystem calls as they happen.

use delve_engine::mission::MissionFactory;
use delve_engine::style::GameStyle;
use delve_engine::{Invoker, View, load_world};

use anyhow::{Context, Result};
use log::info;

fn heading(text: &str) {
    println!("{}\n", text.subheading_style());
}

fn main() -> Result<()> {
    env_logger::init();
    let mut world = load_world().context("while loading World")?;
    let factory = MissionFactory::default();
    let mut invoker = Invoker::new();
    let mut view = View::new();

    heading("1. Start a mission in one step");
    let mission = factory.start_mission("Forest Temple", 3, "player_123");
    invoker.execute(Box::new(mission), &mut world, &mut view)?;
    view.flush();

    heading("2. Drive subsystems one action at a time");
    invoker.execute(Box::new(factory.load_map("Desert Arena", 5)), &mut world, &mut view)?;
    invoker.execute(Box::new(factory.init_characters(vec![10, 11, 12])), &mut world, &mut view)?;
    invoker.execute(
        Box::new(factory.play_sound("desert-wind.mp3", Some(0.6))),
        &mut world,
        &mut view,
    )?;
    view.flush();

    heading("3. Undo the last action");
    let outcome = invoker.undo_last(&mut world, &mut view);
    info!("undo outcome: {outcome:?}");
    view.flush();

    heading("4. A second mission with its own settings");
    let custom = factory.start_mission("Ice Dungeon", 7, "player_456");
    invoker.execute(Box::new(custom), &mut world, &mut view)?;
    view.flush();

    println!("Actions in history: {}", invoker.history_size());
    for name in invoker.history_names() {
        println!("  - {name}");
    }
    Ok(())
}
