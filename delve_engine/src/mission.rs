//! Mission module
//!
//! A mission is the start-up sequence that readies the game's outer
//! subsystems (map, characters, inventory, sound, HUD) before the first
//! prompt. Those subsystems sit behind the [`Subsystems`] trait; the engine
//! only calls into them and reports what it asked for. Each call is wrapped
//! in its own reversible action so a mission can be undone as one step.

use std::fmt;
use std::rc::Rc;

use log::info;

use crate::action::{Action, ActionError, CompositeAction, Reversible};
use crate::view::{View, ViewItem};
use crate::world::World;

/// Soundtrack volume used when none is given.
pub const DEFAULT_VOLUME: f32 = 0.8;
/// Track played by the start-up mission.
pub const MISSION_TRACK: &str = "epic-battle.mp3";
/// Characters readied by the start-up mission.
pub const MISSION_CHARACTERS: [u32; 3] = [1, 2, 3];

// Fallbacks for mission commands typed without arguments.
pub const DEFAULT_MAP: &str = "Default Map";
pub const DEFAULT_DIFFICULTY: u32 = 5;
pub const DEFAULT_PLAYER_ID: &str = "player_default";
pub const DEFAULT_TRACK: &str = "default-sound.mp3";

/// Which HUD panels to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudConfig {
    pub show_health: bool,
    pub show_mana: bool,
    pub show_minimap: bool,
}

impl HudConfig {
    pub fn all_on() -> Self {
        Self {
            show_health: true,
            show_mana: true,
            show_minimap: true,
        }
    }
}

impl fmt::Display for HudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool| if on { "on" } else { "off" };
        write!(
            f,
            "health {}, mana {}, minimap {}",
            flag(self.show_health),
            flag(self.show_mana),
            flag(self.show_minimap)
        )
    }
}

/// Outer subsystems the mission actions drive.
///
/// Calls are fire-and-forget; only character initialization reports success.
pub trait Subsystems {
    fn load_map(&self, name: &str, difficulty: u32);
    /// Ready the given characters. Returns false if that failed.
    fn initialize_characters(&self, ids: &[u32]) -> bool;
    fn check_inventory(&self, player_id: &str);
    fn play_sound(&self, track: &str, volume: f32);
    fn setup_hud(&self, config: HudConfig);
}

/// Subsystems that only write to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSubsystems;

impl Subsystems for ConsoleSubsystems {
    fn load_map(&self, name: &str, difficulty: u32) {
        info!("map loaded: {name} (difficulty {difficulty})");
    }

    fn initialize_characters(&self, ids: &[u32]) -> bool {
        info!("characters initialized: {ids:?}");
        true
    }

    fn check_inventory(&self, player_id: &str) {
        info!("inventory checked for player {player_id}");
    }

    fn play_sound(&self, track: &str, volume: f32) {
        info!("soundtrack started: {track} (volume {volume})");
    }

    fn setup_hud(&self, config: HudConfig) {
        info!("HUD set up: {config}");
    }
}

/// Load a map at a given difficulty.
pub struct LoadMap {
    subsystems: Rc<dyn Subsystems>,
    map: String,
    difficulty: u32,
    name: String,
}

impl LoadMap {
    pub fn new(subsystems: Rc<dyn Subsystems>, map: impl Into<String>, difficulty: u32) -> Self {
        let map = map.into();
        Self {
            subsystems,
            name: format!("load map '{map}'"),
            map,
            difficulty,
        }
    }
}

impl Action for LoadMap {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, _world: &mut World, view: &mut View) -> Result<(), ActionError> {
        self.subsystems.load_map(&self.map, self.difficulty);
        view.push(ViewItem::SubsystemReport(format!(
            "Map loaded: {} (difficulty {})",
            self.map, self.difficulty
        )));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for LoadMap {
    fn undo(&mut self, _world: &mut World, view: &mut View) {
        view.push(ViewItem::Undone(format!("Map '{}' unloaded.", self.map)));
    }
}

/// Ready a set of characters. The only mission step that can fail.
pub struct InitializeCharacters {
    subsystems: Rc<dyn Subsystems>,
    ids: Vec<u32>,
}

impl InitializeCharacters {
    pub fn new(subsystems: Rc<dyn Subsystems>, ids: Vec<u32>) -> Self {
        Self { subsystems, ids }
    }
}

impl Action for InitializeCharacters {
    fn name(&self) -> &str {
        "initialize characters"
    }

    fn execute(&mut self, _world: &mut World, view: &mut View) -> Result<(), ActionError> {
        if !self.subsystems.initialize_characters(&self.ids) {
            return Err(ActionError::CharacterInitFailed { ids: self.ids.clone() });
        }
        let ids = self.ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        view.push(ViewItem::SubsystemReport(format!("Characters initialized: {ids}")));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for InitializeCharacters {
    fn undo(&mut self, _world: &mut World, view: &mut View) {
        view.push(ViewItem::Undone("Characters reset.".into()));
    }
}

pub struct CheckInventory {
    subsystems: Rc<dyn Subsystems>,
    player_id: String,
}

impl CheckInventory {
    pub fn new(subsystems: Rc<dyn Subsystems>, player_id: impl Into<String>) -> Self {
        Self {
            subsystems,
            player_id: player_id.into(),
        }
    }
}

impl Action for CheckInventory {
    fn name(&self) -> &str {
        "check inventory"
    }

    fn execute(&mut self, _world: &mut World, view: &mut View) -> Result<(), ActionError> {
        self.subsystems.check_inventory(&self.player_id);
        view.push(ViewItem::SubsystemReport(format!(
            "Inventory checked for player {}",
            self.player_id
        )));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for CheckInventory {
    fn undo(&mut self, _world: &mut World, view: &mut View) {
        view.push(ViewItem::Undone("Inventory closed.".into()));
    }
}

pub struct PlaySound {
    subsystems: Rc<dyn Subsystems>,
    track: String,
    volume: f32,
    name: String,
}

impl PlaySound {
    pub fn new(subsystems: Rc<dyn Subsystems>, track: impl Into<String>, volume: Option<f32>) -> Self {
        let track = track.into();
        Self {
            subsystems,
            name: format!("play '{track}'"),
            track,
            volume: volume.unwrap_or(DEFAULT_VOLUME),
        }
    }
}

impl Action for PlaySound {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, _world: &mut World, view: &mut View) -> Result<(), ActionError> {
        self.subsystems.play_sound(&self.track, self.volume);
        view.push(ViewItem::SubsystemReport(format!(
            "Soundtrack started: {} (volume {})",
            self.track, self.volume
        )));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for PlaySound {
    fn undo(&mut self, _world: &mut World, view: &mut View) {
        view.push(ViewItem::Undone(format!("Sound '{}' stopped.", self.track)));
    }
}

pub struct SetupHud {
    subsystems: Rc<dyn Subsystems>,
    config: HudConfig,
}

impl SetupHud {
    pub fn new(subsystems: Rc<dyn Subsystems>, config: HudConfig) -> Self {
        Self { subsystems, config }
    }
}

impl Action for SetupHud {
    fn name(&self) -> &str {
        "set up HUD"
    }

    fn execute(&mut self, _world: &mut World, view: &mut View) -> Result<(), ActionError> {
        self.subsystems.setup_hud(self.config);
        view.push(ViewItem::SubsystemReport(format!("HUD set up: {}", self.config)));
        Ok(())
    }

    fn as_reversible(&mut self) -> Option<&mut dyn Reversible> {
        Some(self)
    }
}

impl Reversible for SetupHud {
    fn undo(&mut self, _world: &mut World, view: &mut View) {
        view.push(ViewItem::Undone("HUD hidden.".into()));
    }
}

/// Builds mission actions that share one set of subsystems.
#[derive(Clone)]
pub struct MissionFactory {
    subsystems: Rc<dyn Subsystems>,
}

impl MissionFactory {
    pub fn new(subsystems: Rc<dyn Subsystems>) -> Self {
        Self { subsystems }
    }

    /// The full start-up sequence: map, characters, inventory, soundtrack, HUD.
    pub fn start_mission(&self, map: &str, difficulty: u32, player_id: &str) -> CompositeAction {
        CompositeAction::new(format!("start mission '{map}'"))
            .with(self.load_map(map, difficulty))
            .with(self.init_characters(MISSION_CHARACTERS.to_vec()))
            .with(self.check_inventory(player_id))
            .with(self.play_sound(MISSION_TRACK, Some(DEFAULT_VOLUME)))
            .with(self.setup_hud(HudConfig::all_on()))
    }

    pub fn load_map(&self, map: &str, difficulty: u32) -> LoadMap {
        LoadMap::new(Rc::clone(&self.subsystems), map, difficulty)
    }

    pub fn init_characters(&self, ids: Vec<u32>) -> InitializeCharacters {
        InitializeCharacters::new(Rc::clone(&self.subsystems), ids)
    }

    pub fn check_inventory(&self, player_id: &str) -> CheckInventory {
        CheckInventory::new(Rc::clone(&self.subsystems), player_id)
    }

    pub fn play_sound(&self, track: &str, volume: Option<f32>) -> PlaySound {
        PlaySound::new(Rc::clone(&self.subsystems), track, volume)
    }

    pub fn setup_hud(&self, config: HudConfig) -> SetupHud {
        SetupHud::new(Rc::clone(&self.subsystems), config)
    }
}

impl Default for MissionFactory {
    fn default() -> Self {
        Self::new(Rc::new(ConsoleSubsystems))
    }
}
