//! Loader utilities for building a `World` from serialized data.
//!
//! The cave layout comes from `world.ron` (a `WorldDef`) and the tuning
//! constants from `rules.toml`. Neither file is required: a missing layout is
//! replaced by the built-in cave and missing rules by the defaults.

pub mod rules;
pub mod worlddef;

pub use crate::loader::worlddef::{build_world_from_def, default_world_def, load_worlddef};

use crate::World;
use crate::data_paths::data_path;
use crate::loader::rules::load_rules;

use anyhow::{Context, Result, bail};
use delve_data::WorldDef;
use log::{info, warn};
use std::path::Path;

/// Load the `World` from the data directory.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation of `world.ron`.
pub fn load_world() -> Result<World> {
    load_world_from(&data_path("world.ron"), &data_path("rules.toml"))
}

/// Load the `World` from explicit file locations.
///
/// # Errors
/// Fails if `world_path` exists but cannot be read, parsed or validated.
pub fn load_world_from(world_path: &Path, rules_path: &Path) -> Result<World> {
    let rules = load_rules(rules_path);

    let worlddef = if world_path.exists() {
        load_worlddef(world_path).context("while loading worlddef from file")?
    } else {
        warn!(
            "no world file at '{}'; using the built-in cave layout",
            world_path.display()
        );
        default_world_def()
    };

    let world = build_world_from_def(&worlddef, rules).context("while building world from worlddef")?;
    info!("{} enemies added to World", world.enemies.len());
    info!("{} items added to World", world.items.len());
    info!(
        "player \"{}\" added to World at {}",
        world.player.name, world.player.position
    );
    Ok(world)
}

/// Validate a `WorldDef` and return a single aggregated error.
pub(crate) fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = delve_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}
