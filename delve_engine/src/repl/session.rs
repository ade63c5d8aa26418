//! `repl::session` module
//!
//! A [`Session`] is one playthrough: it owns the world, the undo history,
//! the mission subsystems and the flavor text, turns parsed commands into
//! actions, and watches for the game to end. Clearing the history takes two
//! steps: [`Command::ClearHistory`] asks, and [`Session::confirm`] carries out
//! the answer. It never reads or prints anything itself, which lets tests
//! drive a whole game through [`Session::handle`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gametools::Spinner;
use log::{info, warn};

use crate::action::{
    Action, ActionError, Attack, CompositeAction, LookAround, Move, PickupItem, RandomReward, RewardSource, ShowInventory,
    ShowMap, ShowStats,
};
use crate::command::Command;
use crate::invoker::Invoker;
use crate::mission::{MissionFactory, Subsystems};
use crate::repl::ReplControl;
use crate::repl::system::{
    clear_confirm_handler, clear_request_handler, help_handler, history_handler, quit_handler, undo_handler,
};
use crate::spinners::{SpinnerType, default_spinners, spin};
use crate::view::{View, ViewItem};
use crate::world::{GameState, StatusSummary, World};

pub struct Session {
    world: World,
    invoker: Invoker,
    spinners: HashMap<SpinnerType, Spinner<&'static str>>,
    rewards: Rc<RefCell<dyn RewardSource>>,
    missions: MissionFactory,
    /// True while a "clear history?" question is waiting for its answer.
    awaiting_clear: bool,
    /// Set once the game is won or lost; no command runs after that.
    finished: Option<GameState>,
}

impl Session {
    pub fn new(world: World) -> Self {
        Self {
            world,
            invoker: Invoker::new(),
            spinners: default_spinners(),
            rewards: Rc::new(RefCell::new(RandomReward)),
            missions: MissionFactory::default(),
            awaiting_clear: false,
            finished: None,
        }
    }

    /// Use `rewards` for every enemy defeated in this session.
    #[must_use]
    pub fn with_rewards(mut self, rewards: impl RewardSource + 'static) -> Self {
        self.rewards = Rc::new(RefCell::new(rewards));
        self
    }

    /// Drive mission commands through `subsystems` instead of the console ones.
    #[must_use]
    pub fn with_subsystems(mut self, subsystems: Rc<dyn Subsystems>) -> Self {
        self.missions = MissionFactory::new(subsystems);
        self
    }

    pub fn missions(&self) -> &MissionFactory {
        &self.missions
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn history_size(&self) -> usize {
        self.invoker.history_size()
    }

    /// Forget every recorded action, e.g. after start-up so `undo` can't unwind it.
    pub fn clear_history(&mut self) {
        self.invoker.clear_history();
    }

    /// The stored terminal state if the game has ended, the live state otherwise.
    pub fn state(&self) -> GameState {
        self.finished.unwrap_or_else(|| self.world.state())
    }

    pub fn status(&self) -> StatusSummary {
        self.world.status_summary()
    }

    /// Run a mission through the invoker so it lands in the history like any command.
    ///
    /// # Errors
    /// Passes on the mission's hard failure; nothing is recorded in that case.
    pub fn run_mission(&mut self, mission: CompositeAction, view: &mut View) -> Result<(), ActionError> {
        info!("running mission '{}' ({} steps)", mission.name(), mission.len());
        self.invoker.execute(Box::new(mission), &mut self.world, view)
    }

    /// Whether the next line of input answers a pending question rather than being a command.
    pub fn awaiting_confirmation(&self) -> bool {
        self.awaiting_clear
    }

    /// Answer the pending "clear history?" question. Does nothing if none is pending.
    pub fn confirm(&mut self, confirmed: bool, view: &mut View) {
        if std::mem::take(&mut self.awaiting_clear) {
            clear_confirm_handler(&mut self.invoker, view, confirmed);
        }
    }

    /// Carry out one player command and report whether the REPL should go on.
    ///
    /// A command arriving while a question is pending counts as a "no".
    pub fn handle(&mut self, command: Command, view: &mut View) -> ReplControl {
        if let Some(state) = self.finished {
            warn!("{command:?} refused: game already ended ({state:?})");
            view.push(ViewItem::Error("The game is over. Nothing more can be done.".into()));
            return ReplControl::Quit;
        }
        self.confirm(false, view);

        match command {
            Command::Go(direction) => {
                let step = Move::new(&self.world, direction);
                self.perform(Box::new(step), view);
            },
            Command::Attack(target) => {
                let attack = target.map_or_else(Attack::here, Attack::toward);
                self.perform(Box::new(attack.with_rewards(Rc::clone(&self.rewards))), view);
            },
            Command::Pickup => self.perform(Box::new(PickupItem), view),
            Command::Look => self.perform(Box::new(LookAround), view),
            Command::Map => self.perform(Box::new(ShowMap), view),
            Command::Inventory => self.perform(Box::new(ShowInventory), view),
            Command::Stats => self.perform(Box::new(ShowStats), view),
            Command::Mission { map, difficulty, player } => {
                let mission = self.missions.start_mission(&map, difficulty, &player);
                let name = mission.name().to_string();
                if let Err(e) = self.run_mission(mission, view) {
                    report_failure(&name, &e, view);
                }
            },
            Command::LoadMap { map, difficulty } => {
                let action = self.missions.load_map(&map, difficulty);
                self.perform(Box::new(action), view);
            },
            Command::InitCharacters(ids) => {
                let action = self.missions.init_characters(ids);
                self.perform(Box::new(action), view);
            },
            Command::CheckInventory(player) => {
                let action = self.missions.check_inventory(&player);
                self.perform(Box::new(action), view);
            },
            Command::PlaySound { track, volume } => {
                let action = self.missions.play_sound(&track, Some(volume));
                self.perform(Box::new(action), view);
            },
            Command::SetupHud(config) => {
                let action = self.missions.setup_hud(config);
                self.perform(Box::new(action), view);
            },
            Command::Undo => {
                undo_handler(&mut self.invoker, &mut self.world, view);
            },
            Command::History => history_handler(&self.invoker, view),
            Command::ClearHistory => self.awaiting_clear = clear_request_handler(&self.invoker, view),
            Command::Help => help_handler(view),
            Command::Quit => return quit_handler(&self.world, view, &self.spinners),
            Command::Unknown => {
                let msg = spin(&self.spinners, SpinnerType::UnrecognizedCommand, "Didn't quite catch that?");
                view.push(ViewItem::Error(msg));
            },
        }

        self.check_game_over(view)
    }

    fn perform(&mut self, action: Box<dyn Action>, view: &mut View) {
        let name = action.name().to_string();
        if let Err(e) = self.invoker.execute(action, &mut self.world, view) {
            report_failure(&name, &e, view);
        }
    }

    fn check_game_over(&mut self, view: &mut View) -> ReplControl {
        let state = self.world.state();
        match state {
            GameState::Ongoing => return ReplControl::Continue,
            GameState::Won => {
                info!("{} cleared the cave with {} gold", self.world.player.name, self.world.player.gold);
                view.push(ViewItem::Victory {
                    gold: self.world.player.gold,
                    hp: self.world.player.health.current_hp(),
                    max_hp: self.world.player.health.max_hp(),
                });
            },
            GameState::Lost => {
                info!("{} died with {} gold", self.world.player.name, self.world.player.gold);
                view.push(ViewItem::EngineMessage(format!(
                    "Game over. You fall with {} gold in your purse.",
                    self.world.player.gold
                )));
            },
        }
        self.finished = Some(state);
        ReplControl::Quit
    }
}

fn report_failure(name: &str, error: &ActionError, view: &mut View) {
    warn!("'{name}' failed: {error}");
    view.push(ViewItem::Error(format!("'{name}' failed: {error}")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{FixedReward, classic_world};
    use crate::command::parse_command;
    use crate::health::HealthState;
    use crate::invoker::UndoOutcome;
    use crate::mission::HudConfig;
    use crate::world::{Direction, Position};

    /// Subsystems that log every call and can refuse character init.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        refuse_characters: bool,
    }

    impl Subsystems for Recorder {
        fn load_map(&self, name: &str, difficulty: u32) {
            self.calls.borrow_mut().push(format!("map {name} {difficulty}"));
        }
        fn initialize_characters(&self, ids: &[u32]) -> bool {
            self.calls.borrow_mut().push(format!("chars {ids:?}"));
            !self.refuse_characters
        }
        fn check_inventory(&self, player_id: &str) {
            self.calls.borrow_mut().push(format!("inventory {player_id}"));
        }
        fn play_sound(&self, track: &str, volume: f32) {
            self.calls.borrow_mut().push(format!("sound {track} {volume}"));
        }
        fn setup_hud(&self, config: HudConfig) {
            self.calls.borrow_mut().push(format!("hud {config}"));
        }
    }

    fn recorded_session(recorder: &Rc<Recorder>) -> Session {
        Session::new(classic_world()).with_subsystems(recorder.clone())
    }

    #[test]
    fn commands_are_recorded_and_undone() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();

        assert!(session.handle(Command::Go(Direction::East), &mut view).is_continue());
        assert_eq!(session.world().player.position, Position::new(3, 2));
        assert_eq!(session.history_size(), 1);

        session.handle(Command::Undo, &mut view);
        assert_eq!(session.world().player.position, Position::new(2, 2));
        assert_eq!(session.history_size(), 0);
    }

    #[test]
    fn meta_commands_are_not_recorded() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();
        for command in [Command::Help, Command::History, Command::Unknown, Command::Undo] {
            session.handle(command, &mut view);
        }
        assert_eq!(session.history_size(), 0);
    }

    #[test]
    fn session_refuses_commands_after_defeat() {
        let mut world = classic_world();
        world.player.position = Position::new(4, 2);
        world.player.health = HealthState::new(1, 100);
        let mut session = Session::new(world);
        let mut view = View::new();

        let control = session.handle(Command::Attack(Some(Direction::North)), &mut view);
        assert!(control.is_quit());
        assert_eq!(session.state(), GameState::Lost);

        let orc_hp = session.world().enemies[1].health;
        assert!(session.handle(Command::Attack(Some(Direction::North)), &mut view).is_quit());
        assert_eq!(session.world().enemies[1].health, orc_hp);
    }

    #[test]
    fn victory_ends_the_session() {
        let mut world = classic_world();
        world.items.clear();
        world.enemies.truncate(1);
        world.enemies[0].health = 10;
        world.player.position = Position::new(1, 2);
        let mut session = Session::new(world).with_rewards(FixedReward(20));
        let mut view = View::new();

        let control = session.handle(Command::Attack(Some(Direction::North)), &mut view);
        assert!(control.is_quit());
        assert_eq!(session.state(), GameState::Won);
        assert!(view.items.iter().any(ViewItem::is_victory));
        assert_eq!(session.status().gold, 20);
    }

    #[test]
    fn mission_is_one_history_entry_until_cleared() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();
        let mut mission = MissionFactory::default().start_mission("Cave", 1, "p");
        mission.push(Box::new(ShowMap));

        session.run_mission(mission, &mut view).unwrap();
        assert_eq!(session.history_size(), 1);
        session.clear_history();
        assert_eq!(session.history_size(), 0);
    }

    #[test]
    fn clearing_waits_for_an_answer() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();
        session.handle(parse_command("v"), &mut view);
        session.handle(parse_command("z"), &mut view);

        assert!(session.handle(parse_command("vymazat"), &mut view).is_continue());
        assert!(session.awaiting_confirmation());
        session.confirm(false, &mut view);
        assert!(!session.awaiting_confirmation());
        assert_eq!(session.history_size(), 2);

        session.handle(parse_command("clear"), &mut view);
        session.confirm(true, &mut view);
        assert_eq!(session.history_size(), 0);
        assert_eq!(
            undo_handler(&mut session.invoker, &mut session.world, &mut view),
            UndoOutcome::NothingToUndo
        );
        assert_eq!(session.world().player.position, Position::new(2, 2));
    }

    #[test]
    fn clearing_an_empty_history_asks_nothing() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();
        session.handle(Command::ClearHistory, &mut view);
        assert!(!session.awaiting_confirmation());
        assert!(view.items.iter().any(ViewItem::is_action_failure));
    }

    #[test]
    fn another_command_declines_a_pending_clear() {
        let mut session = Session::new(classic_world());
        let mut view = View::new();
        session.handle(Command::Go(Direction::East), &mut view);
        session.handle(Command::ClearHistory, &mut view);

        session.handle(Command::Go(Direction::West), &mut view);
        assert!(!session.awaiting_confirmation());
        assert_eq!(session.history_size(), 2);

        // a stray answer with nothing pending is ignored
        session.confirm(true, &mut view);
        assert_eq!(session.history_size(), 2);
    }

    #[test]
    fn mission_command_runs_as_one_entry() {
        let recorder = Rc::new(Recorder::default());
        let mut session = recorded_session(&recorder);
        let mut view = View::new();

        assert!(session.handle(parse_command("mise Ruins 4 hero_1"), &mut view).is_continue());
        assert_eq!(
            *recorder.calls.borrow(),
            [
                "map Ruins 4",
                "chars [1, 2, 3]",
                "inventory hero_1",
                "sound epic-battle.mp3 0.8",
                "hud health on, mana on, minimap on",
            ]
        );
        assert_eq!(session.history_size(), 1);

        view.clear();
        session.handle(Command::Undo, &mut view);
        assert_eq!(session.history_size(), 0);
        assert_eq!(view.items.iter().filter(|i| i.is_undone()).count(), 5);
    }

    #[test]
    fn each_subsystem_command_is_its_own_entry() {
        let recorder = Rc::new(Recorder::default());
        let mut session = recorded_session(&recorder);
        let mut view = View::new();
        let script = [
            "loadmap Arena 2",
            "postavy 7,8",
            "checkinv hero_2",
            "zvuk wind.mp3 0.5",
            "hud a n a",
        ];
        for line in script {
            session.handle(parse_command(line), &mut view);
        }

        assert_eq!(
            *recorder.calls.borrow(),
            [
                "map Arena 2",
                "chars [7, 8]",
                "inventory hero_2",
                "sound wind.mp3 0.5",
                "hud health on, mana off, minimap on",
            ]
        );
        assert_eq!(session.history_size(), script.len());
        assert_eq!(session.world().player.position, Position::new(2, 2));
    }

    #[test]
    fn refused_characters_are_reported_and_play_goes_on() {
        let recorder = Rc::new(Recorder {
            refuse_characters: true,
            ..Recorder::default()
        });
        let mut session = recorded_session(&recorder);
        let mut view = View::new();

        assert!(session.handle(parse_command("characters 1"), &mut view).is_continue());
        assert!(view.items.iter().any(ViewItem::is_error));
        assert_eq!(session.history_size(), 0);

        assert!(session.handle(parse_command("mission"), &mut view).is_continue());
        assert_eq!(session.history_size(), 0);
        assert_eq!(recorder.calls.borrow()[1], "map Default Map 5");

        session.handle(Command::Go(Direction::East), &mut view);
        assert_eq!(session.history_size(), 1);
    }
}
