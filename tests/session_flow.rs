//! End-to-end session tests through the public API

use glam::Vec2;
use launch_sim::GameConfig;
use launch_sim::platform::{FrameClock, TickPacing};
use launch_sim::render::{Frame, RenderSink};
use launch_sim::sim::{InputController, InputEvent, Key, Phase, Simulation, Transition};

fn config(seed: u64) -> GameConfig {
    GameConfig {
        star_count: 0,
        ..GameConfig::default()
    }
    .with_seed(seed)
}

/// Sit still at the spawn point until a hazard lands on the craft
fn play_until_game_over(sim: &mut Simulation, input: &InputController) -> u64 {
    let mut ticks = 0;
    while sim.phase() == Phase::Running {
        sim.tick(input);
        ticks += 1;
        assert!(ticks < 100_000, "no hazard ever reached the craft");
    }
    ticks
}

#[test]
fn start_from_idle_places_pools() {
    let config = config(3);
    let mut sim = Simulation::new(&config);
    assert_eq!(sim.phase(), Phase::Idle);
    assert_eq!(sim.session().epoch(), 0);

    assert_eq!(sim.start(), Transition::Applied);
    assert_eq!(sim.session().epoch(), 1);
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.phase(), Phase::Running);

    let frame = Frame::capture(&sim);
    assert_eq!(frame.hazards.len(), 6);
    assert_eq!(frame.collectibles.len(), 4);
    assert!(
        frame
            .hazards
            .iter()
            .all(|h| (5.0..10.0).contains(&h.pos.y) && (-5.0..5.0).contains(&h.pos.x))
    );
    assert!(frame.collectibles.iter().all(|c| (5.0..8.0).contains(&c.pos.y)));

    // A second start is a no-op
    assert_eq!(sim.start(), Transition::Ignored);
    assert_eq!(sim.session().epoch(), 1);
}

#[test]
fn holding_right_moves_one_unit_in_ten_ticks() {
    let config = config(4);
    let mut sim = Simulation::new(&config);
    let mut input = InputController::new(&config);
    sim.start();

    input.handle(InputEvent::KeyDown(Key::Right));
    for _ in 0..10 {
        sim.tick(&input);
    }
    let pos = sim.player().position().expect("placed");
    assert!((pos.x - 1.0).abs() < 1e-5);

    // Keep going: the craft stops at the wall
    for _ in 0..50 {
        sim.tick(&input);
    }
    assert_eq!(sim.player().position().map(|p| p.x), Some(5.0));

    input.handle(InputEvent::KeyUp(Key::Right));
    sim.tick(&input);
    assert_eq!(sim.player().position().map(|p| p.x), Some(5.0));
}

#[test]
fn game_over_freezes_until_restart() {
    let config = config(5);
    let mut sim = Simulation::new(&config);
    let input = InputController::new(&config);
    sim.start();

    play_until_game_over(&mut sim, &input);
    assert_eq!(sim.phase(), Phase::GameOver);

    let frozen = Frame::capture(&sim);
    for _ in 0..30 {
        assert!(!sim.tick(&input).advanced);
    }
    let later = Frame::capture(&sim);
    assert_eq!(later.player, frozen.player);
    assert_eq!(later.hazards, frozen.hazards);
    assert_eq!(later.collectibles, frozen.collectibles);
    assert_eq!(later.score, frozen.score);
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let config = config(6);
    let mut sim = Simulation::new(&config);
    let mut input = InputController::new(&config);
    sim.start();
    play_until_game_over(&mut sim, &input);
    let epoch = sim.session().epoch();

    assert_eq!(sim.restart(), Transition::Applied);
    assert_eq!(sim.phase(), Phase::Running);
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.session().epoch(), epoch + 1);
    assert_eq!(sim.player().position(), Some(Vec2::new(0.0, -2.0)));

    // The new layout is already in place before the next tick renders
    let frame = Frame::capture(&sim);
    assert!(frame.hazards.iter().all(|h| h.pos.y >= 5.0));

    input.handle(InputEvent::KeyDown(Key::Left));
    let report = sim.tick(&input);
    assert!(report.advanced);
}

#[test]
fn held_key_keeps_steering_after_restart() {
    let config = config(10);
    let mut sim = Simulation::new(&config);
    let mut input = InputController::new(&config);
    sim.start();
    input.handle(InputEvent::KeyDown(Key::Right));
    play_until_game_over(&mut sim, &input);

    // No fresh key-down between restart and the next ticks
    sim.restart();
    for _ in 0..10 {
        sim.tick(&input);
    }
    let pos = sim.player().position().expect("placed");
    assert!((pos.x - 1.0).abs() < 1e-5);
}

#[test]
fn score_only_grows_by_single_points() {
    let config = config(7);
    let mut sim = Simulation::new(&config);
    let mut input = InputController::new(&config);
    sim.start();
    input.handle(InputEvent::KeyDown(Key::Right));

    let mut score = 0;
    for tick in 0..5_000 {
        // Sweep back and forth
        if tick % 100 == 0 {
            let key = if (tick / 100) % 2 == 0 { Key::Left } else { Key::Right };
            input.handle(InputEvent::KeyDown(key));
        }
        let report = sim.tick(&input);
        assert_eq!(sim.score(), score + report.collected.len() as u32);
        score = sim.score();
        if sim.phase() == Phase::GameOver {
            break;
        }
    }
}

#[test]
fn config_json_drives_pool_sizes() {
    let config = GameConfig::from_json(
        r#"{"hazard_count": 2, "collectible_count": 9, "star_count": 0, "seed": 11}"#,
    )
    .expect("valid config");
    let mut sim = Simulation::new(&config);
    sim.start();
    let input = InputController::new(&config);
    for _ in 0..400 {
        sim.tick(&input);
        assert_eq!(sim.pool().hazards().len(), 2);
        assert_eq!(sim.pool().collectibles().len(), 9);
    }
}

#[test]
fn fixed_pacing_drives_ticks() {
    let config = GameConfig {
        fixed_tick_hz: Some(60.0),
        ..config(8)
    };
    let mut sim = Simulation::new(&config);
    let mut input = InputController::new(&config);
    let mut clock = FrameClock::new(TickPacing::from_config(&config));
    sim.start();
    input.handle(InputEvent::KeyDown(Key::Right));

    // One second of 30 Hz frames still runs about 60 ticks
    let mut ticks = 0;
    for frame in 0..=30 {
        for _ in 0..clock.ticks_for_frame(frame as f64 * 1000.0 / 30.0) {
            sim.tick(&input);
            ticks += 1;
        }
    }
    assert!((58..=60).contains(&ticks), "ran {} ticks", ticks);
}

#[test]
fn render_sink_sees_every_frame() {
    struct Counter {
        frames: usize,
        last_phase: Option<Phase>,
    }
    impl RenderSink for Counter {
        fn draw(&mut self, frame: &Frame) {
            self.frames += 1;
            self.last_phase = Some(frame.phase);
        }
    }

    let config = config(9);
    let mut sim = Simulation::new(&config);
    let input = InputController::new(&config);
    let mut sink = Counter {
        frames: 0,
        last_phase: None,
    };
    sim.start();
    for _ in 0..20 {
        sim.tick(&input);
        sink.draw(&Frame::capture(&sim));
    }
    assert_eq!(sink.frames, 20);
    assert_eq!(sink.last_phase, Some(Phase::Running));
}
