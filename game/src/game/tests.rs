use super::*;
use crate::direction::Dir4;
use crate::input::MoveKeys;
use crate::levels::Level;
use crate::motion::tile_center;
use crate::position::Position;

const DT: f32 = 1.0 / 64.0;
const SEED: u64 = 0x5eed;

fn game_from_text(text: &str, tuning: Tuning) -> Game {
    let level = Level {
        name: "test".to_string(),
        grid: Grid::from_text(text).unwrap(),
    };
    let levels = LevelSet::new(vec![level]).unwrap();
    Game::new(Rc::new(levels), Rc::new(tuning), SEED)
}

fn holding(dir: Dir4) -> Input {
    Input {
        keys: MoveKeys::holding(dir),
        ..Default::default()
    }
}

fn ghost_points(events: &[GameEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::GhostEaten { points, .. } => Some(*points),
            _ => None,
        })
        .collect()
}

const OPEN_5X5: &str = "\
.....
.P...
..o..
...G.
.....";

#[test]
fn power_pellet_frightens_in_the_same_tick_and_wears_off_on_time() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    let idle = Input::default();
    game.player.pos = tile_center(Position::new(2, 2));

    assert_eq!(game.update(DT, &idle), TickOutcome::Continue);
    assert!(game.ghosts.iter().all(|g| g.mode == GhostMode::Frightened));
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::PelletEaten {
        kind: PelletKind::Power
    }));
    assert!(events.contains(&GameEvent::FrightenedStarted));
    assert_eq!(game.stats.score, Tuning::default().power_pellet_points);

    // 6 s at 64 ticks per second is 384 ticks, counting the one above.
    for _ in 1..383 {
        game.update(DT, &idle);
    }
    assert_eq!(game.ghosts[0].mode, GhostMode::Frightened);
    game.update(DT, &idle);
    assert_eq!(game.stats.global_mode, GlobalMode::Scatter);
    assert_eq!(game.ghosts[0].mode, GhostMode::Scatter);
}

#[test]
fn chain_bonus_escalates_and_saturates() {
    let mut game = game_from_text("#########\n#P.GGGGG#\n#########", Tuning::default());
    game.stats.current_level = 5;
    game.load_level();
    assert_eq!(game.ghosts.len(), 5);

    game.trigger_frightened();
    let player_pos = game.player.pos;
    for ghost in &mut game.ghosts {
        ghost.pos = player_pos;
    }
    game.drain_events();
    game.update(DT, &Input::default());

    let events = game.drain_events();
    assert_eq!(ghost_points(&events), vec![200, 400, 800, 1600, 1600]);
    assert_eq!(game.stats.score, 4600);
    assert!(game.ghosts.iter().all(|g| g.mode == GhostMode::Eaten));
}

#[test]
fn eaten_ghosts_ignore_a_new_power_pellet() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    game.trigger_frightened();
    game.ghosts[0].set_eaten(3.0);
    game.stats.ghost_chain_count = 3;
    game.trigger_frightened();
    assert_eq!(game.ghosts[0].mode, GhostMode::Eaten);
    assert_eq!(game.stats.ghost_chain_count, 0);
}

#[test]
fn lives_run_out_after_initial_lives_contacts() {
    let tuning = Tuning::default();
    let lives = tuning.initial_lives;
    let mut game = game_from_text(OPEN_5X5, tuning);
    let idle = Input::default();
    for remaining in (0..lives).rev() {
        game.ghosts[0].pos = game.player.pos;
        let outcome = game.update(DT, &idle);
        assert_eq!(game.stats.lives, remaining);
        if remaining == 0 {
            assert_eq!(outcome, TickOutcome::GameOver);
        } else {
            assert_eq!(outcome, TickOutcome::Continue);
        }
    }
    let events = game.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
}

#[test]
fn touching_an_eaten_ghost_costs_no_life() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    let lives = game.stats.lives;
    game.ghosts[0].set_eaten(3.0);
    game.ghosts[0].pos = game.player.pos;

    assert_eq!(game.update(DT, &Input::default()), TickOutcome::Continue);
    assert_eq!(game.stats.lives, lives);
    assert_eq!(game.ghosts[0].mode, GhostMode::Eaten);
    assert!(
        !game
            .drain_events()
            .iter()
            .any(|event| matches!(event, GameEvent::PlayerDied { .. }))
    );
}

#[test]
fn eaten_ghost_recovers_into_the_global_mode() {
    let mut game = game_from_text("#########\n#P.....G#\n#########", Tuning::default());
    let idle = Input::default();
    game.ghosts[0].set_eaten(0.5);
    for _ in 0..31 {
        game.update(DT, &idle);
    }
    assert_eq!(game.ghosts[0].mode, GhostMode::Eaten);
    game.update(DT, &idle);
    assert_eq!(game.ghosts[0].mode, GhostMode::Scatter);
    assert_eq!(game.stats.lives, Tuning::default().initial_lives);
}

#[test]
fn ghosts_wrap_through_the_tunnel() {
    let mut game = game_from_text(
        "#######\n#P#####\n#######\n.....G.\n#######",
        Tuning::default(),
    );
    let idle = Input::default();
    let mut previous = game.ghosts[0].tile();
    let mut wrapped = false;
    for _ in 0..256 {
        game.update(DT, &idle);
        let tile = game.ghosts[0].tile();
        assert_eq!(tile.y, 3);
        assert!((0..7).contains(&tile.x));
        wrapped |= (tile.x - previous.x).abs() == 6;
        previous = tile;
    }
    assert!(wrapped);
}

#[test]
fn death_resets_actors_and_the_schedule() {
    let mut game = game_from_text(
        "#######\n#P....#\n#.....#\n#..GG.#\n#######",
        Tuning::default(),
    );
    game.stats.current_level = 2;
    game.load_level();
    assert_eq!(game.ghosts.len(), 2);

    game.ghosts[1].set_frightened(6.0);
    game.ghosts[0].pos = game.player.pos;
    game.stats.mode_timer = 5.0;
    game.stats.ghost_chain_count = 2;
    game.update(DT, &Input::default());

    assert_eq!(game.stats.lives, Tuning::default().initial_lives - 1);
    assert_eq!(game.stats.mode_timer, 0.0);
    assert_eq!(game.stats.mode_schedule_index, 0);
    assert_eq!(game.stats.ghost_chain_count, 0);
    assert_eq!(game.player.pos, tile_center(game.grid.player_spawn()));
    for ghost in &game.ghosts {
        assert_eq!(ghost.mode, GhostMode::Scatter);
        assert_eq!(ghost.pos, tile_center(ghost.spawn));
    }
}

#[test]
fn schedule_flip_switches_ghosts_to_chase() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    game.stats.mode_timer = 7.0 - DT;
    game.update(DT, &Input::default());
    assert_eq!(game.stats.global_mode, GlobalMode::Chase);
    assert_eq!(game.ghosts[0].mode, GhostMode::Chase);
    assert!(game.drain_events().contains(&GameEvent::ModeChanged {
        mode: GlobalMode::Chase
    }));
}

const ONE_PELLET: &str = "\
######
#P.#G#
######";

#[test]
fn clearing_a_level_advances_with_a_fresh_grid() {
    let mut game = game_from_text(ONE_PELLET, Tuning::default());
    let right = holding(Dir4::Right);
    let mut outcome = TickOutcome::Continue;
    for _ in 0..60 {
        outcome = game.update(DT, &right);
        if outcome != TickOutcome::Continue {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Victory);
    assert_eq!(game.stats.current_level, 2);
    assert_eq!(game.stats.score, 10);
    assert_eq!(game.grid.pellets_remaining(), 1);
    assert_eq!(game.player.pos, tile_center(Position::new(1, 1)));
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
    assert_eq!(events.last(), Some(&GameEvent::LevelAdvanced { level: 2 }));
}

#[test]
fn clearing_the_last_level_completes_the_game() {
    let tuning = Tuning {
        max_level: 1,
        ..Default::default()
    };
    let mut game = game_from_text(ONE_PELLET, tuning);
    let right = holding(Dir4::Right);
    let mut outcome = TickOutcome::Continue;
    for _ in 0..60 {
        outcome = game.update(DT, &right);
        if outcome != TickOutcome::Continue {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::CompleteVictory);
    assert_eq!(game.stats.current_level, 1);
    assert_eq!(
        game.drain_events().last(),
        Some(&GameEvent::GameComplete { score: 10 })
    );
}

#[test]
fn long_frames_are_split_so_no_pellet_is_skipped() {
    let mut game = game_from_text(
        "##############\n#P.........#G#\n#.############\n##############",
        Tuning::default(),
    );
    let right = holding(Dir4::Right);
    for _ in 0..30 {
        game.update(0.1, &right);
    }
    let eaten = game
        .drain_events()
        .iter()
        .filter(|event| matches!(event, GameEvent::PelletEaten { .. }))
        .count();
    assert_eq!(eaten, 9);
    assert_eq!(game.player.tile(), Position::new(10, 1));
    assert_eq!(game.player.direction, None);
}

#[test]
fn pause_freezes_the_simulation() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    let pause = Input {
        pause: true,
        ..Default::default()
    };
    game.update(DT, &pause);
    assert!(game.stats.paused);
    let before = game.ghosts[0].pos;
    for _ in 0..10 {
        game.update(DT, &holding(Dir4::Right));
    }
    assert_eq!(game.ghosts[0].pos, before);
    assert_eq!(game.player.pos, tile_center(Position::new(1, 1)));

    game.update(DT, &pause);
    assert!(!game.stats.paused);
}

#[test]
fn ghost_count_grows_with_level_and_spare_spawns_become_pellets() {
    let levels = Rc::new(LevelSet::embedded().unwrap());
    let pristine = levels.get(1).grid.clone();
    let spawns = pristine.ghost_spawns().len();
    let game = Game::new(levels, Rc::new(Tuning::default()), SEED);
    assert_eq!(game.ghosts.len(), 1);
    assert_eq!(game.ghosts[0].personality, Personality::Blinky);
    assert_eq!(
        game.grid.pellets_remaining(),
        pristine.pellets_remaining() + spawns - 1
    );
}

#[test]
fn identical_seeds_replay_identically() {
    let run = || {
        let levels = Rc::new(LevelSet::embedded().unwrap());
        let mut game = Game::new(levels, Rc::new(Tuning::default()), 42);
        game.stats.current_level = 4;
        game.load_level();
        for i in 0..600 {
            let dir = Dir4::PRIORITY[(i / 90) % 4];
            game.update(DT, &holding(dir));
        }
        let ghosts: Vec<_> = game.ghosts.iter().map(|g| (g.pos, g.direction, g.mode)).collect();
        (game.stats.clone(), ghosts)
    };
    let (stats_a, ghosts_a) = run();
    let (stats_b, ghosts_b) = run();
    assert_eq!(stats_a, stats_b);
    assert_eq!(ghosts_a, ghosts_b);
}

#[test]
fn session_stats_round_trip_through_json() {
    let mut game = game_from_text(OPEN_5X5, Tuning::default());
    game.player.pos = tile_center(Position::new(2, 2));
    game.update(DT, &Input::default());
    let json = serde_json::to_string(&game.stats).unwrap();
    let restored: SessionStats = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, game.stats);
}
