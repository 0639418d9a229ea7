use engine::surface::{RgbaBufferSurface, SurfaceSize, draw_frame};

use wristflap::input::sim::{ScriptedHand, SyntheticCamera};
use wristflap::input::{FrameSource, HandDetector};
use wristflap::{GameConfig, GameLoop, Phase, TickOutcome};

fn surface(config: &GameConfig) -> RgbaBufferSurface {
    RgbaBufferSurface::new(SurfaceSize::new(config.playfield_width, config.playfield_height))
}

fn run_ticks<S: FrameSource, D: HandDetector>(
    game: &mut GameLoop<S, D>,
    surface: &mut RgbaBufferSurface,
    n: u32,
    quit: bool,
) -> TickOutcome {
    let mut last = TickOutcome::Simulated;
    for _ in 0..n {
        last = draw_frame(surface, |gfx| game.step(quit, gfx)).expect("tick should not fail");
    }
    last
}

#[test]
fn no_hand_for_a_thousand_ticks_keeps_player_centered() {
    let config = GameConfig::default();
    let mut surface = surface(&config);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), ScriptedHand::absent());
    let start_y = game.state().player.player().y;

    run_ticks(&mut game, &mut surface, 1_000, false);

    assert_eq!(game.state().elapsed_ticks, 1_000);
    assert_eq!(game.state().player.player().y, start_y);
    assert_eq!(start_y, (480.0 - 30.0) / 2.0);
}

#[test]
fn dropped_camera_frames_hold_the_last_position() {
    let config = GameConfig::default();
    let mut surface = surface(&config);
    // Every other frame is dropped; the hand is at the top on every detection.
    let camera = SyntheticCamera::new(32, 24).with_dropped_frames(2);
    let mut game = GameLoop::new(config, camera, ScriptedHand::cycling([Some(0.0)]));

    run_ticks(&mut game, &mut surface, 1, false);
    assert_eq!(game.state().player.player().y, 0.0);

    // Dropped frame: no sample, same position.
    run_ticks(&mut game, &mut surface, 1, false);
    assert_eq!(game.state().last_sample, None);
    assert_eq!(game.state().player.player().y, 0.0);
}

#[test]
fn extreme_samples_clamp_to_top_and_bottom() {
    let config = GameConfig::default();
    let mut surface = surface(&config);
    let hand = ScriptedHand::new([Some(0.0), Some(1.0)]);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), hand);

    run_ticks(&mut game, &mut surface, 1, false);
    assert_eq!(game.state().player.player().y, 0.0);

    run_ticks(&mut game, &mut surface, 1, false);
    let p = *game.state().player.player();
    assert_eq!(p.y + p.height, 480.0);
}

#[test]
fn ten_spawn_intervals_spawn_exactly_ten_obstacles() {
    let config = GameConfig::default();
    let interval = config.time_between_pipe_spawn;
    let spacing = config.horizontal_spawn_distance;
    let mut surface = surface(&config);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), ScriptedHand::absent());

    run_ticks(&mut game, &mut surface, 10 * interval, false);

    let track = &game.state().track;
    assert_eq!(track.spawned_total(), 10);
    assert_eq!(
        track.spawned_total(),
        track.evicted_total() + track.obstacles().len() as u64
    );

    // Newest sits at the right edge; each older one is one spacing further left.
    let xs: Vec<f32> = track.obstacles().iter().map(|o| o.x).collect();
    let newest = *xs.last().expect("at least one live obstacle");
    assert_eq!(newest, 640.0);
    for (i, x) in xs.iter().rev().enumerate() {
        assert_eq!(*x, 640.0 - spacing * i as f32);
    }
}

#[test]
fn oldest_of_ten_obstacles_is_nine_spacings_back() {
    // Slow enough that nothing leaves the playfield.
    let config = GameConfig {
        time_between_pipe_spawn: 10,
        horizontal_spawn_distance: 20.0,
        ..GameConfig::default()
    };
    let mut surface = surface(&config);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), ScriptedHand::absent());

    run_ticks(&mut game, &mut surface, 100, false);

    let track = &game.state().track;
    assert_eq!(track.spawned_total(), 10);
    assert_eq!(track.obstacles().len(), 10);
    assert_eq!(track.obstacles()[0].x, 640.0 - 20.0 * 9.0);
}

#[test]
fn spacing_holds_when_velocity_is_not_a_whole_number() {
    // 10 px every 7 ticks: 1.428... px per tick, accumulated in f32.
    let config = GameConfig {
        time_between_pipe_spawn: 7,
        horizontal_spawn_distance: 10.0,
        ..GameConfig::default()
    };
    let mut surface = surface(&config);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), ScriptedHand::absent());

    run_ticks(&mut game, &mut surface, 70, false);

    let track = &game.state().track;
    assert_eq!(track.spawned_total(), 10);
    assert_eq!(track.obstacles().len(), 10);

    let xs: Vec<f32> = track.obstacles().iter().map(|o| o.x).collect();
    for pair in xs.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((gap - 10.0).abs() < 1e-2, "spacing {gap}");
    }
    assert!((xs[0] - (640.0 - 10.0 * 9.0)).abs() < 1e-2, "oldest at {}", xs[0]);
}

#[test]
fn quit_renders_one_game_over_frame_and_stops_simulating() {
    let config = GameConfig {
        game_over_display_ticks: 30,
        ..GameConfig::default()
    };
    let mut surface = surface(&config);
    let mut game = GameLoop::new(
        config,
        SyntheticCamera::new(32, 24),
        ScriptedHand::cycling([Some(0.3), Some(0.7)]),
    );

    let n = 200;
    run_ticks(&mut game, &mut surface, n, false);
    assert_eq!(game.renders(), n as u64);
    let frozen = game.state().clone();

    let outcome = run_ticks(&mut game, &mut surface, 1, true);
    assert_eq!(outcome, TickOutcome::EnteredGameOver);
    assert_eq!(game.renders(), n as u64 + 1);
    assert_eq!(game.state().elapsed_ticks, n as u64);
    let game_over_frame = surface.frame().to_vec();

    // Holding: no simulation, no further draws, frame unchanged.
    let outcome = run_ticks(&mut game, &mut surface, 29, true);
    assert_eq!(outcome, TickOutcome::Holding);
    assert_eq!(game.renders(), n as u64 + 1);
    assert_eq!(game.state().elapsed_ticks, frozen.elapsed_ticks);
    assert_eq!(game.state().player.player(), frozen.player.player());
    assert_eq!(game.state().track.obstacles(), frozen.track.obstacles());
    assert_eq!(surface.frame(), game_over_frame.as_slice());

    let outcome = run_ticks(&mut game, &mut surface, 1, true);
    assert_eq!(outcome, TickOutcome::Finished);
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.renders(), n as u64 + 1);
}

#[test]
fn a_steady_hand_in_the_gap_scores_over_time() {
    let config = GameConfig::default();
    let mut surface = surface(&config);
    let mut game = GameLoop::new(config, SyntheticCamera::new(32, 24), ScriptedHand::cycling([Some(0.5)]));

    run_ticks(&mut game, &mut surface, 900, false);

    // No collisions, so every obstacle that has fully passed x=100 scores once.
    let state = game.state();
    let passed = state
        .track
        .obstacles()
        .iter()
        .filter(|o| o.scored)
        .count() as u64
        + state.track.evicted_total();
    assert!(state.score() > 0);
    assert_eq!(state.score() as u64, passed);
    assert_eq!(state.stage(), 1 + state.score() / 5);
}
