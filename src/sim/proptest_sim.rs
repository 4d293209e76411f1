//! Property-based tests for the simulation using proptest.
//!
//! Random seeds and input scripts drive whole sessions; the pool, clamp and
//! collision invariants must hold on every tick.

use glam::Vec2;
use proptest::prelude::*;

use super::*;
use crate::config::GameConfig;

/// One scripted input step
fn input_event() -> impl Strategy<Value = InputEvent> {
    let key = prop_oneof![
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::Up),
        Just(Key::Down)
    ];
    prop_oneof![
        key.clone().prop_map(InputEvent::KeyDown),
        key.prop_map(InputEvent::KeyUp),
        (0.0f32..1000.0).prop_map(|x| InputEvent::TouchStart { x }),
        (0.0f32..1000.0).prop_map(|x| InputEvent::TouchMove { x }),
        Just(InputEvent::TouchEnd),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Pool sizes, slot identities and the clamp box survive any session.
    #[test]
    fn prop_pool_and_clamp_invariants(
        seed in any::<u64>(),
        script in prop::collection::vec((input_event(), 1usize..40), 1..30),
    ) {
        let config = GameConfig::default().with_seed(seed);
        let mut sim = Simulation::new(&config);
        let mut input = InputController::new(&config);
        sim.start();

        for (event, ticks) in script {
            input.handle(event);
            for _ in 0..ticks {
                sim.tick(&input);

                prop_assert_eq!(sim.pool().hazards().len(), config.hazard_count);
                prop_assert_eq!(sim.pool().collectibles().len(), config.collectible_count);
                for (i, h) in sim.pool().hazards().iter().enumerate() {
                    prop_assert_eq!(h.slot, i);
                    prop_assert!(h.pos.y >= config.despawn_y);
                }
                for (i, c) in sim.pool().collectibles().iter().enumerate() {
                    prop_assert_eq!(c.slot, i);
                    prop_assert!(c.pos.y >= config.despawn_y);
                }

                let pos = sim.player().position();
                prop_assert!(pos.is_some());
                if let Some(pos) = pos {
                    prop_assert!(sim.player().field().contains(pos));
                }
            }
            if sim.phase() == Phase::GameOver {
                sim.restart();
                prop_assert_eq!(sim.player().position(), Some(Vec2::new(0.0, -2.0)));
            }
        }
    }

    /// After game over nothing moves until restart.
    #[test]
    fn prop_game_over_freezes(seed in any::<u64>(), extra in 1usize..50) {
        let config = GameConfig {
            star_count: 0,
            ..GameConfig::default()
        }
        .with_seed(seed);
        let mut sim = Simulation::new(&config);
        let input = InputController::new(&config);
        sim.start();

        // Sit at the spawn point until something lands on the craft
        let mut ticks = 0;
        while sim.phase() == Phase::Running && ticks < 20_000 {
            sim.tick(&input);
            ticks += 1;
        }
        prop_assume!(sim.phase() == Phase::GameOver);

        let player = sim.player().position();
        let hazards = sim.pool().hazards().to_vec();
        let coins = sim.pool().collectibles().to_vec();
        let score = sim.score();
        for _ in 0..extra {
            sim.tick(&input);
        }
        prop_assert_eq!(sim.player().position(), player);
        prop_assert_eq!(sim.pool().hazards(), &hazards[..]);
        prop_assert_eq!(sim.pool().collectibles(), &coins[..]);
        prop_assert_eq!(sim.score(), score);
    }

    /// Restart always lands on score 0, the spawn point and epoch + 1.
    #[test]
    fn prop_restart_resets(seed in any::<u64>(), warmup in 0usize..300) {
        let config = GameConfig::default().with_seed(seed);
        let mut sim = Simulation::new(&config);
        let mut input = InputController::new(&config);
        input.key_down(Key::Right);
        sim.start();
        for _ in 0..warmup {
            sim.tick(&input);
        }
        let epoch = sim.session().epoch();
        sim.restart();
        prop_assert_eq!(sim.score(), 0);
        prop_assert_eq!(sim.phase(), Phase::Running);
        prop_assert_eq!(sim.session().epoch(), epoch + 1);
        prop_assert_eq!(sim.player().position(), Some(Vec2::new(0.0, -2.0)));
    }

    /// The hit test is symmetric and exclusive at the radius.
    #[test]
    fn prop_within_radius_symmetric(
        ax in -5.0f32..5.0, ay in -6.0f32..10.0,
        bx in -5.0f32..5.0, by in -6.0f32..10.0,
    ) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        prop_assert_eq!(within_radius(a, b, 0.5), within_radius(b, a, 0.5));
        prop_assert_eq!(within_radius(a, b, 0.5), a.distance(b) < 0.5);
    }
}
