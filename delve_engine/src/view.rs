//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each action, we aggregate needed information and messages
//! to be organized and displayed at the end of the turn.
use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::style::{GameStyle, indented_block, normal_block};
use crate::world::{Feature, GLYPH_ENEMY, GLYPH_ITEM, GLYPH_PLAYER, GLYPH_UNKNOWN, GLYPH_VISITED, LocationDescription, StatusSummary};

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_ENGINE: &str = "⚙";
const ICON_HARMED: &str = "\u{2623}"; // biohazard sign
const ICON_ATTACK: &str = "\u{2694}"; // crossed swords
const ICON_CELEBRATE: &str = "🎉"; // U+1F389
const ICON_DEATH: &str = "☠";
const ICON_UNDO: &str = "\u{27F2}"; // ⟲
const ICON_SUBSYSTEM: &str = "\u{2713}"; // ✓

/// View aggregates information to be displayed on each pass through the REPL and then organizes
/// and displays the result.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub items: Vec<ViewItem>,
}

impl View {
    /// Create a new empty view.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Discard everything buffered for this turn without printing it.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compose and display all message contents in the current frame / turn.
    pub fn flush(&mut self) {
        let width = termwidth();
        let in_section = |section: Section| self.items.iter().any(|i| i.section() == section);

        // First Section: Environment / Frame of Reference
        if in_section(Section::Environment) {
            println!("{:.>width$}\n", "scene".section_style());
            self.environment();
        }
        // Second Section: Immediate / direct results of player command
        if in_section(Section::DirectResult) {
            println!("{:.>width$}\n", "results".section_style());
            self.direct_results();
        }
        // Third Section: the cave's reaction (counterattacks, deaths)
        if in_section(Section::WorldResponse) {
            println!("{:.>width$}\n", "responses".section_style());
            self.world_reaction();
        }
        // Fourth Section: System Commands (help, undo, history, quit etc)
        if in_section(Section::System) {
            println!("{:.>width$}\n", "game".section_style());
            self.system();
        }

        // clear the buffer for the next turn
        self.items.clear();

        // create a little space before the next prompt
        println!();
    }

    // SECTION AGGREGATORS START HERE --------------------

    fn environment(&self) {
        self.location();
        self.map();
    }

    fn direct_results(&self) {
        self.inventory();
        self.stats();
        self.combat_blows();
        self.items_collected();
        self.subsystem_reports();

        // successes / failures
        self.action_success();
        self.action_failure();
        self.errors();
    }

    fn world_reaction(&self) {
        self.enemies_defeated();
        self.counterattacks();
        self.player_defeated();
    }

    fn system(&self) {
        self.show_help();
        self.undone();
        self.history();
        self.engine_message();
        self.victory();
        self.quit_summary();
    }

    // INDIVIDUAL VIEW ITEM HANDLERS START HERE -------------------------------

    fn location(&self) {
        if let Some(LocationDescription { position, feature }) =
            self.items.iter().find_map(|i| i.clone().location())
        {
            println!("{} {}", "You stand at".subheading_style(), position.to_string().location_style());
            let line = match feature {
                Feature::Enemy { name, health } => {
                    format!("Before you stands {} (HP: {health}).", name.enemy_style())
                },
                Feature::Item { name, description } => {
                    format!("You see {} here: {description}", name.item_style())
                },
                Feature::Empty(flavor) => flavor.description_style().to_string(),
            };
            println!("{}\n", fill(&line, indented_block()));
        }
    }

    fn map(&self) {
        if let Some(rows) = self.items.iter().find_map(|i| i.clone().map()) {
            println!("{}:\n", "Cave map".subheading_style());
            for row in rows {
                println!("    {row}");
            }
            println!(
                "\n    {}",
                format!(
                    "{GLYPH_PLAYER}=you {GLYPH_ENEMY}=enemy {GLYPH_ITEM}=item {GLYPH_VISITED}=visited {GLYPH_UNKNOWN}=unknown"
                )
                .dimmed()
            );
            println!();
        }
    }

    fn inventory(&self) {
        if let Some(item_lines) = self.items.iter().find_map(|i| i.clone().inventory()) {
            println!("{}:", "Inventory".subheading_style());
            if item_lines.is_empty() {
                println!("   {}", "Your pack is empty.".italic().dimmed());
            } else {
                for (index, line) in item_lines.iter().enumerate() {
                    println!("   {}. {} - {}", index + 1, line.name.item_style(), line.description.italic());
                }
            }
            println!();
        }
    }

    fn stats(&self) {
        if let Some(summary) = self.items.iter().find_map(|i| i.clone().stats()) {
            println!("{}:", "Player statistics".subheading_style());
            println!("   {:10} {}", "Name:", summary.name);
            println!("   {:10} {}/{}", "Health:", summary.hp, summary.max_hp);
            println!("   {:10} {}", "Damage:", summary.damage);
            println!("   {:10} {}", "Gold:", summary.gold.to_string().gold_style());
            println!("   {:10} {}", "Items:", summary.inventory_count);
            println!(
                "   {:10} {}/{}",
                "Defeated:",
                summary.defeated_enemies(),
                summary.total_enemies
            );
            println!();
        }
    }

    fn combat_blows(&self) {
        for item in &self.items {
            if let ViewItem::CombatBlow { enemy, damage, enemy_hp } = item {
                println!("{:<4}You strike {} for {damage} damage!", ICON_ATTACK.bold(), enemy.enemy_style());
                if *enemy_hp > 0 {
                    println!("    {} has {enemy_hp} HP left.", enemy.enemy_style());
                }
            }
        }
    }

    fn items_collected(&self) {
        for item in &self.items {
            if let ViewItem::ItemCollected { name, effect } = item {
                println!("{} You picked up {}.", ICON_SUCCESS.bright_green(), name.item_style());
                println!("{}", fill(effect, indented_block()));
            }
        }
    }

    fn subsystem_reports(&self) {
        for item in &self.items {
            if let ViewItem::SubsystemReport(msg) = item {
                println!("{:<4}{}", ICON_SUBSYSTEM.bright_green(), msg.subsystem_style());
            }
        }
    }

    fn action_success(&self) {
        for msg in self.items.iter().filter_map(|i| match i {
            ViewItem::ActionSuccess(msg) => Some(msg),
            _ => None,
        }) {
            println!(
                "{}",
                fill(format!("{} {}", ICON_SUCCESS.bright_green(), msg).as_str(), normal_block())
            );
        }
    }

    fn action_failure(&self) {
        for msg in self.items.iter().filter_map(|i| match i {
            ViewItem::ActionFailure(msg) => Some(msg),
            _ => None,
        }) {
            println!(
                "{}",
                fill(format!("{} {}", ICON_FAILURE.bright_red(), msg).as_str(), normal_block())
            );
        }
    }

    fn errors(&self) {
        for msg in self.items.iter().filter_map(|i| match i {
            ViewItem::Error(msg) => Some(msg),
            _ => None,
        }) {
            println!(
                "{}",
                fill(format!("{:<4}{}", ICON_ERROR.error_icon_style(), msg).as_str(), normal_block())
            );
        }
    }

    fn enemies_defeated(&self) {
        for item in &self.items {
            if let ViewItem::EnemyDefeated { enemy, gold } = item {
                println!("{:<4}You defeated {}!", ICON_CELEBRATE, enemy.enemy_style());
                println!("    You loot {} gold.", gold.to_string().gold_style());
            }
        }
    }

    fn counterattacks(&self) {
        for item in &self.items {
            if let ViewItem::Counterattack { enemy, damage, player_hp } = item {
                println!(
                    "{:<4}{} strikes back for {}!",
                    ICON_HARMED.harm_style(),
                    enemy.enemy_style(),
                    format!("{damage} damage").harm_style()
                );
                println!("    You have {player_hp} HP left.");
            }
        }
    }

    fn player_defeated(&self) {
        if let Some(enemy) = self.items.iter().find_map(|i| i.clone().player_defeated()) {
            println!(
                "\n{:<4}{}",
                ICON_DEATH.bold(),
                format!("You were slain by {enemy}. The game is over.").denied_style()
            );
        }
    }

    fn show_help(&self) {
        if let Some(lines) = self.items.iter().find_map(|i| i.clone().help()) {
            println!("{}", "Available commands:".bold().yellow());
            println!();
            for line in lines {
                let formatted = format!("{} - {}", line.words.bold().green(), line.description.italic());
                println!("{}", fill(&formatted, indented_block()));
            }
            println!();
        }
    }

    fn undone(&self) {
        for msg in self.items.iter().filter_map(|i| match i {
            ViewItem::Undone(msg) => Some(msg),
            _ => None,
        }) {
            println!("{:<4}{}", ICON_UNDO.bold(), msg.undo_style());
        }
    }

    fn history(&self) {
        for item in &self.items {
            if let ViewItem::History { names } = item {
                if names.is_empty() {
                    println!("    {}", "History is empty - no command has been executed.".italic());
                } else {
                    println!("Commands executed: {}", names.len());
                    for (index, name) in names.iter().enumerate() {
                        println!("   {}. {name}", index + 1);
                    }
                }
                println!();
            }
        }
    }

    fn engine_message(&self) {
        for msg in self.items.iter().filter_map(|i| match i {
            ViewItem::EngineMessage(msg) => Some(msg),
            _ => None,
        }) {
            println!("{}", fill(format!("{ICON_ENGINE:<4}{msg}").as_str(), normal_block()));
        }
    }

    fn victory(&self) {
        for item in &self.items {
            if let ViewItem::Victory { gold, hp, max_hp } = item {
                println!("{:^width$}", "CONGRATULATIONS!".black().on_yellow(), width = termwidth());
                println!("You cleared the cave of every foe and every treasure.");
                println!("{:16} {}", "Total gold:", gold.to_string().gold_style());
                println!("{:16} {hp}/{max_hp}", "Health left:");
                println!();
            }
        }
    }

    fn quit_summary(&self) {
        for item in &self.items {
            if let ViewItem::QuitSummary {
                farewell,
                gold,
                visited,
                tiles,
            } = item
            {
                println!("{}", farewell.description_style());
                // tile counts are tiny, so the f32 conversion is exact
                #[allow(clippy::cast_precision_loss)]
                let explored = 100.0 * (*visited as f32 / *tiles as f32);
                println!("{:10} {}", "Gold:", gold.to_string().gold_style());
                println!("{:10} {visited}/{tiles} ({explored:.1}%)", "Explored:");
            }
        }
    }
}

/// Subsections of the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Where the player is and what the cave looks like.
    Environment,
    /// Direct results of the player's command.
    DirectResult,
    /// Follow-up reactions from the cave's inhabitants.
    WorldResponse,
    /// Meta/game-system feedback (help, undo, quit etc.).
    System,
}

/// Row data for the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub name: String,
    pub description: String,
}

/// Row data for the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub words: String,
    pub description: String,
}

/// Every kind of message an action or handler can hand to the view.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    CombatBlow {
        enemy: String,
        damage: u32,
        enemy_hp: i32,
    },
    Counterattack {
        enemy: String,
        damage: u32,
        player_hp: u32,
    },
    EnemyDefeated {
        enemy: String,
        gold: u32,
    },
    EngineMessage(String),
    Error(String),
    Help(Vec<HelpLine>),
    History {
        names: Vec<String>,
    },
    Inventory(Vec<InventoryLine>),
    ItemCollected {
        name: String,
        effect: String,
    },
    Location(LocationDescription),
    Map(Vec<String>),
    PlayerDefeated(String),
    QuitSummary {
        farewell: String,
        gold: u32,
        visited: usize,
        tiles: usize,
    },
    Stats(StatusSummary),
    SubsystemReport(String),
    Undone(String),
    Victory {
        gold: u32,
        hp: u32,
        max_hp: u32,
    },
}
impl ViewItem {
    /// Classify a view item into a top-level output section.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::Location(_) | ViewItem::Map(_) => Section::Environment,
            ViewItem::ActionSuccess(_)
            | ViewItem::ActionFailure(_)
            | ViewItem::Error(_)
            | ViewItem::CombatBlow { .. }
            | ViewItem::ItemCollected { .. }
            | ViewItem::Inventory(_)
            | ViewItem::Stats(_)
            | ViewItem::SubsystemReport(_) => Section::DirectResult,
            ViewItem::Counterattack { .. } | ViewItem::EnemyDefeated { .. } | ViewItem::PlayerDefeated(_) => {
                Section::WorldResponse
            },
            ViewItem::EngineMessage(_)
            | ViewItem::Help(_)
            | ViewItem::History { .. }
            | ViewItem::Undone(_)
            | ViewItem::Victory { .. }
            | ViewItem::QuitSummary { .. } => Section::System,
        }
    }
}
