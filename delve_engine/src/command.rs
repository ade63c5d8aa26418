//! Command module
//!
//! Describes possible commands used during gameplay. Every command word has
//! an English and a Czech form; both are always accepted.
//!
//! Game commands are matched case-insensitively. The mission commands take
//! free-form arguments (map names, player ids, tracks) which keep the case the
//! player typed; any argument left out falls back to a default.

use crate::mission::{DEFAULT_DIFFICULTY, DEFAULT_MAP, DEFAULT_PLAYER_ID, DEFAULT_TRACK, DEFAULT_VOLUME, HudConfig, MISSION_CHARACTERS};
use crate::world::Direction;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, variantly::Variantly)]
pub enum Command {
    /// Attack on the player's tile, or on the neighboring tile in a direction.
    Attack(Option<Direction>),
    CheckInventory(String),
    /// Ask to clear the undo history; the player has to confirm.
    ClearHistory,
    Go(Direction),
    Help,
    History,
    InitCharacters(Vec<u32>),
    Inventory,
    LoadMap {
        map: String,
        difficulty: u32,
    },
    Look,
    Map,
    Mission {
        map: String,
        difficulty: u32,
        player: String,
    },
    Pickup,
    PlaySound {
        track: String,
        volume: f32,
    },
    Quit,
    SetupHud(HudConfig),
    Stats,
    Undo,
    Unknown,
}

/// Command words with the help line shown for them.
///
/// This is the single source for parsing, completion and the help listing.
pub const VOCABULARY: &[(&[&str], &str)] = &[
    (&["north", "n", "sever", "s"], "move north"),
    (&["south", "j", "jih"], "move south"),
    (&["east", "e", "vychod", "v"], "move east"),
    (&["west", "w", "zapad", "z"], "move west"),
    (
        &["attack", "a", "utok"],
        "attack the enemy here, or add a direction to attack a neighbor",
    ),
    (&["pickup", "take", "seber"], "pick up and use the item here"),
    (&["look", "l", "rozhliz"], "describe your surroundings"),
    (&["map", "m", "mapa"], "show the map of explored tiles"),
    (&["inventory", "inv", "i", "inventar"], "list what you carry"),
    (&["stats", "statistiky"], "show your statistics"),
    (
        &["mission", "mise"],
        "start a full mission: mission <map> <difficulty> <player id>",
    ),
    (&["loadmap", "nactimapu"], "load a map: loadmap <map> <difficulty>"),
    (&["characters", "postavy"], "ready characters: characters 1,2,3"),
    (&["checkinv", "kontrola"], "check a player's inventory: checkinv <player id>"),
    (&["sound", "zvuk"], "play a sound: sound <track> <volume 0.0-1.0>"),
    (&["hud"], "set up the HUD: hud <health a/n> <mana a/n> <minimap a/n>"),
    (&["undo", "zpet"], "take back the last command"),
    (&["history", "historie"], "list the commands you have issued"),
    (&["clear", "vymazat"], "clear the command history (asks first)"),
    (&["help", "?", "napoveda"], "show this help"),
    (&["quit", "exit", "konec"], "leave the game"),
];

/// Parses an input string and returns a corresponding `Command` if recognized.
///
/// Input is trimmed and compared case-insensitively.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let args: Vec<&str> = input.split_whitespace().skip(1).collect();
    match words.as_slice() {
        ["attack" | "a" | "utok"] => Command::Attack(None),
        ["attack" | "a" | "utok", dir] => parse_direction(dir).map_or(Command::Unknown, |d| Command::Attack(Some(d))),
        ["pickup" | "take" | "seber"] => Command::Pickup,
        ["look" | "l" | "rozhliz"] => Command::Look,
        ["map" | "m" | "mapa"] => Command::Map,
        ["inventory" | "inv" | "i" | "inventar"] => Command::Inventory,
        ["stats" | "statistiky"] => Command::Stats,
        ["mission" | "mise", ..] => Command::Mission {
            map: text_arg(&args, 0, DEFAULT_MAP),
            difficulty: difficulty_arg(&args, 1),
            player: text_arg(&args, 2, DEFAULT_PLAYER_ID),
        },
        ["loadmap" | "nactimapu", ..] => Command::LoadMap {
            map: text_arg(&args, 0, DEFAULT_MAP),
            difficulty: difficulty_arg(&args, 1),
        },
        ["characters" | "postavy", ..] => Command::InitCharacters(character_ids(&args)),
        ["checkinv" | "kontrola", ..] => Command::CheckInventory(text_arg(&args, 0, DEFAULT_PLAYER_ID)),
        ["sound" | "zvuk", ..] => Command::PlaySound {
            track: text_arg(&args, 0, DEFAULT_TRACK),
            volume: volume_arg(&args, 1),
        },
        ["hud", ..] => Command::SetupHud(HudConfig {
            show_health: flag_arg(&args, 0),
            show_mana: flag_arg(&args, 1),
            show_minimap: flag_arg(&args, 2),
        }),
        ["undo" | "zpet"] => Command::Undo,
        ["history" | "historie"] => Command::History,
        ["clear" | "vymazat"] => Command::ClearHistory,
        ["help" | "?" | "napoveda"] => Command::Help,
        ["quit" | "exit" | "konec"] => Command::Quit,
        [word] => parse_direction(word).map_or(Command::Unknown, Command::Go),
        _ => Command::Unknown,
    }
}

/// Maps a direction word to a `Direction`.
///
/// `s` is the Czech *sever* (north), not south.
pub fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "north" | "n" | "sever" | "s" => Some(Direction::North),
        "south" | "j" | "jih" => Some(Direction::South),
        "east" | "e" | "vychod" | "v" => Some(Direction::East),
        "west" | "w" | "zapad" | "z" => Some(Direction::West),
        _ => None,
    }
}

/// Reads a yes/no answer. Only an explicit yes (`a`, `ano`, `y`, `yes`) counts.
pub fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "a" | "ano" | "y" | "yes")
}

fn text_arg(args: &[&str], index: usize, default: &str) -> String {
    args.get(index).copied().unwrap_or(default).to_string()
}

/// Difficulty must be a positive whole number.
fn difficulty_arg(args: &[&str], index: usize) -> u32 {
    args.get(index)
        .and_then(|arg| arg.parse::<u32>().ok())
        .filter(|difficulty| *difficulty > 0)
        .unwrap_or(DEFAULT_DIFFICULTY)
}

/// Volume must be a finite number above zero.
fn volume_arg(args: &[&str], index: usize) -> f32 {
    args.get(index)
        .and_then(|arg| arg.parse::<f32>().ok())
        .filter(|volume| volume.is_finite() && *volume > 0.0)
        .unwrap_or(DEFAULT_VOLUME)
}

/// A missing HUD flag means "on"; a given one must be a yes to count.
fn flag_arg(args: &[&str], index: usize) -> bool {
    args.get(index).is_none_or(|arg| parse_confirmation(arg))
}

/// Ids separated by commas and/or spaces. Nothing usable means the mission's default set.
fn character_ids(args: &[&str]) -> Vec<u32> {
    let ids: Vec<u32> = args
        .iter()
        .flat_map(|arg| arg.split(','))
        .filter_map(|id| id.trim().parse().ok())
        .collect();
    if ids.is_empty() { MISSION_CHARACTERS.to_vec() } else { ids }
}
