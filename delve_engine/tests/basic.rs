use delve_engine::action::{Attack, CompositeAction, FixedReward, Move, PickupItem, SeededReward, ShowMap};
use delve_engine::command::{Command, parse_command};
use delve_engine::health::HealthState;
use delve_engine::loader::rules::Rules;
use delve_engine::loader::{build_world_from_def, default_world_def};
use delve_engine::mission::{HudConfig, MissionFactory, Subsystems};
use delve_engine::repl::ReplControl;
use delve_engine::{Action, ActionError, Direction, GameState, Invoker, Position, Session, UndoOutcome, View, World};

use std::cell::Cell;
use std::rc::Rc;

fn classic() -> World {
    build_world_from_def(&default_world_def(), Rules::default()).expect("built-in layout is valid")
}

fn run(world: &mut World, mut action: impl Action) {
    let mut view = View::new();
    action.execute(world, &mut view).expect("no hard failure");
}

#[test]
fn blocked_moves_change_nothing_in_every_direction() {
    // walls at the edges, then every neighbor of the Goblin at (1, 1)
    let cases = [
        (Position::new(0, 0), Direction::North),
        (Position::new(0, 0), Direction::West),
        (Position::new(4, 3), Direction::East),
        (Position::new(2, 4), Direction::South),
        (Position::new(1, 2), Direction::North),
        (Position::new(1, 0), Direction::South),
        (Position::new(0, 1), Direction::East),
        (Position::new(2, 1), Direction::West),
    ];
    for (start, direction) in cases {
        let mut world = classic();
        world.player.position = start;
        let visited = world.visited.clone();
        let step = Move::new(&world, direction);
        run(&mut world, step);
        assert_eq!(world.player.position, start, "moved {direction} from {start}");
        assert_eq!(world.visited, visited, "visited changed moving {direction} from {start}");
    }
}

#[test]
fn move_then_undo_round_trip() {
    let mut world = classic();
    let mut view = View::new();
    let mut invoker = Invoker::new();

    let step = Move::new(&world, Direction::South);
    invoker.execute(Box::new(step), &mut world, &mut view).unwrap();
    assert_eq!(world.player.position, Position::new(2, 3));

    assert_eq!(
        invoker.undo_last(&mut world, &mut view),
        UndoOutcome::Undone("move south".into())
    );
    assert_eq!(world.player.position, Position::new(2, 2));
    assert!(world.is_visited(Position::new(2, 3)));
    assert_eq!(invoker.history_size(), 0);
}

#[test]
fn attack_on_nothing_is_harmless() {
    let mut world = classic();
    run(&mut world, Attack::here());
    run(&mut world, Attack::toward(Direction::West));
    assert_eq!(world.player.health.current_hp(), 100);
    assert_eq!(world.player.gold, 0);
    assert!(world.enemies.iter().all(|e| e.alive));
}

#[test]
fn defeated_enemy_pays_out_and_stops_blocking() {
    let mut world = classic();
    world.player.position = Position::new(1, 2);

    // 30 HP goblin against 15 damage: two blows, one counterattack
    run(&mut world, Attack::toward(Direction::North));
    assert!(world.enemies[0].alive);
    run(&mut world, Attack::toward(Direction::North).with_rewards(SeededReward::new(11)));

    assert!(!world.enemies[0].alive);
    assert!((10..=39).contains(&world.player.gold));
    assert_eq!(world.player.health.current_hp(), 92);

    let gold = world.player.gold;
    run(&mut world, Attack::toward(Direction::North));
    assert_eq!(world.player.gold, gold);

    let step = Move::new(&world, Direction::North);
    run(&mut world, step);
    assert_eq!(world.player.position, Position::new(1, 1));
}

#[test]
fn counterattack_can_end_the_game() {
    let mut world = classic();
    world.player.position = Position::new(3, 4);
    world.player.health = HealthState::new(20, 100);

    // Troll at (4, 4): 80 HP, hits for 20
    run(&mut world, Attack::toward(Direction::East));
    assert_eq!(world.enemies[2].health, 65);
    assert_eq!(world.player.health.current_hp(), 0);
    assert!(!world.player.is_alive());
    assert_eq!(world.state(), GameState::Lost);
}

#[test]
fn pickups_apply_their_effects() {
    let mut world = classic();
    world.player.health = HealthState::new(60, 100);

    world.player.position = Position::new(1, 3);
    run(&mut world, PickupItem);
    assert_eq!(world.player.health.current_hp(), 100);
    assert!(world.item_at(Position::new(1, 3)).is_none());

    world.player.position = Position::new(0, 0);
    run(&mut world, PickupItem);
    assert_eq!(world.player.damage, 25);

    world.player.position = Position::new(3, 4);
    run(&mut world, PickupItem);
    assert_eq!(world.player.gold, 100);

    let names: Vec<_> = world.player.inventory.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Healing Potion", "Warrior's Sword", "Gold Hoard"]);
    assert_eq!(world.items.len(), 1);
}

#[test]
fn empty_undo_does_not_fail() {
    let mut world = classic();
    let mut view = View::new();
    assert_eq!(
        Invoker::new().undo_last(&mut world, &mut view),
        UndoOutcome::NothingToUndo
    );
    assert!(!view.items.is_empty());
    assert_eq!(world.player.position, Position::new(2, 2));
}

#[test]
fn composite_undo_runs_in_reverse() {
    let mut world = classic();
    let mut view = View::new();

    let east = Move::new(&world, Direction::East);
    let mut ahead = world.clone();
    ahead.player.position = Position::new(3, 2);
    let north = Move::new(&ahead, Direction::North);
    let walk = CompositeAction::new("walk").with(east).with(north).with(ShowMap);

    let mut invoker = Invoker::new();
    invoker.execute(Box::new(walk), &mut world, &mut view).unwrap();
    assert_eq!(world.player.position, Position::new(3, 1));
    assert_eq!(invoker.history_names(), ["walk"]);

    view.clear();
    assert_eq!(
        invoker.undo_last(&mut world, &mut view),
        UndoOutcome::Undone("walk".into())
    );
    let undone: Vec<String> = view.items.iter().filter_map(|i| i.clone().undone()).collect();
    assert_eq!(
        undone,
        ["You retrace your steps to [3, 2].", "You retrace your steps to [2, 2]."]
    );
    assert_eq!(world.player.position, Position::new(2, 2));
}

#[test]
fn near_miss_is_not_a_win() {
    let mut world = classic();
    world.items.clear();
    for enemy in &mut world.enemies[..2] {
        enemy.alive = false;
    }
    assert_eq!(world.state(), GameState::Ongoing);
}

#[test]
fn last_pickup_wins_on_the_same_command() {
    let mut world = classic();
    for enemy in &mut world.enemies {
        enemy.alive = false;
    }
    world.items.retain(|pos, _| *pos == Position::new(3, 4));
    world.player.position = Position::new(3, 3);

    let mut session = Session::new(world);
    let mut view = View::new();
    assert!(session.handle(Command::Go(Direction::South), &mut view).is_continue());
    assert_eq!(session.state(), GameState::Ongoing);

    assert!(session.handle(parse_command("seber"), &mut view).is_quit());
    assert_eq!(session.state(), GameState::Won);
}

#[test]
fn last_kill_wins_on_the_same_command() {
    let mut world = classic();
    world.items.clear();
    world.enemies[0].alive = false;
    world.enemies[1].alive = false;
    world.enemies[2].health = 15;
    world.player.position = Position::new(4, 3);

    let mut session = Session::new(world).with_rewards(FixedReward(30));
    let mut view = View::new();
    assert!(session.handle(parse_command("utok jih"), &mut view).is_quit());
    assert_eq!(session.state(), GameState::Won);
    assert_eq!(session.status().gold, 30);
}

#[test]
fn full_playthrough_of_the_classic_cave() {
    let mut session = Session::new(classic()).with_rewards(FixedReward(10));
    let mut view = View::new();
    let script = [
        // potion at (2, 0), then the sword in the corner
        "n", "n", "take", "w", "w", "take",
        // goblin at (1, 1), two blows at 25 damage
        "j", "a v", "a v",
        // second potion at (1, 3), then the hoard at (3, 4)
        "j", "j", "v", "take", "j", "v", "v", "seber",
        // troll at (4, 4) takes four blows
        "utok vychod", "utok vychod", "utok vychod", "utok vychod",
        // orc at (4, 1) is last
        "s", "s", "v", "attack north", "attack north",
    ];
    let mut control = ReplControl::Continue;
    let mut turns = 0;
    for line in script {
        view.clear();
        control = session.handle(parse_command(line), &mut view);
        turns += 1;
        if control.is_quit() {
            break;
        }
    }
    assert!(control.is_quit());
    assert_eq!(turns, script.len());
    assert_eq!(session.state(), GameState::Won);
    assert_eq!(session.world().living_enemy_count(), 0);
    assert!(session.world().items.is_empty());

    let status = session.status();
    assert_eq!(status.hp, 28);
    assert_eq!(status.gold, 130);
    assert_eq!(status.inventory_count, 4);
}

#[derive(Default)]
struct FailingCharacters {
    sounds: Cell<u32>,
}

impl Subsystems for FailingCharacters {
    fn load_map(&self, _name: &str, _difficulty: u32) {}
    fn initialize_characters(&self, _ids: &[u32]) -> bool {
        false
    }
    fn check_inventory(&self, _player_id: &str) {}
    fn play_sound(&self, _track: &str, _volume: f32) {
        self.sounds.set(self.sounds.get() + 1);
    }
    fn setup_hud(&self, _config: HudConfig) {}
}

#[test]
fn character_failure_aborts_the_mission_in_a_session() {
    let subsystems = Rc::new(FailingCharacters::default());
    let factory = MissionFactory::new(subsystems.clone());
    let mut session = Session::new(classic());
    let mut view = View::new();

    let result = session.run_mission(factory.start_mission("Cave", 1, "p"), &mut view);
    assert_eq!(result, Err(ActionError::CharacterInitFailed { ids: vec![1, 2, 3] }));
    assert_eq!(subsystems.sounds.get(), 0);
    assert_eq!(session.history_size(), 0);
}
