//! The loader half of the render contract, checked against every built-in
//! piece: after `invoke`, a surface is never left in its pre-invocation
//! state; it holds either module output or exactly the placeholder.

use easel::{Loader, Registry, RenderEnv, Stage, Surface, WallClock};

fn fresh_stage() -> Stage {
    Stage::new(Surface::new(96, 64).unwrap()).unwrap()
}

#[test]
fn every_registry_entry_paints_or_placeholders() {
    let loader = Loader::new();

    for handle in Registry::builtin().handles() {
        let mut stage = fresh_stage();
        let before = stage.pixels().to_vec();
        let outcome = loader.invoke(handle.file_name(), &mut stage, &RenderEnv::seeded(17));

        assert!(
            !outcome.is_placeholder(),
            "{} should render, not placeholder",
            handle.file_name()
        );
        assert_ne!(
            stage.pixels(),
            &before[..],
            "{} left the surface in its pre-invocation state",
            handle.file_name()
        );
    }
}

#[test]
fn animated_pieces_report_handles_and_static_pieces_do_not() {
    let loader = Loader::new();
    let animated = [
        "particle-waves",
        "spiral-motion",
        "animated-rects",
        "classic-watch",
        "omega-speedmaster",
        "chanel-watch",
        "nomos-tangente",
    ];

    for handle in Registry::builtin().handles() {
        let mut stage = fresh_stage();
        let outcome = loader.invoke(handle.file_name(), &mut stage, &RenderEnv::seeded(3));
        let expect_loop = animated.contains(&handle.file_name());
        assert_eq!(
            outcome.cancel_handle().is_some(),
            expect_loop,
            "{} loop contract mismatch",
            handle.file_name()
        );
        assert_eq!(stage.has_live_loop(), expect_loop);
    }
}

#[test]
fn animated_pieces_survive_many_ticks() {
    let loader = Loader::new();
    let clock = WallClock::fixed(10, 9, 30, 250);

    for name in ["particle-waves", "spiral-motion", "classic-watch"] {
        let mut stage = fresh_stage();
        loader.invoke(name, &mut stage, &RenderEnv::seeded(7));
        for _ in 0..60 {
            stage.tick(clock).unwrap();
        }
        assert!(stage.has_live_loop(), "{name} loop died unexpectedly");
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}

#[test]
fn resolution_miss_is_not_transient() {
    let loader = Loader::new();
    // Same miss, same answer: the registry is static.
    for _ in 0..3 {
        assert!(loader.resolve("missing-piece").is_none());
    }
}

#[test]
fn seeded_invocations_reproduce_pixels() {
    let loader = Loader::new();
    let deterministic = ["flow-field", "circuit-board", "mountain-topo", "seeded-rects"];

    for name in deterministic {
        let run = |seed: u64| {
            let mut stage = fresh_stage();
            loader.invoke(name, &mut stage, &RenderEnv::seeded(seed));
            stage.pixels().to_vec()
        };
        assert_eq!(run(5), run(5), "{name} not reproducible for equal seeds");
    }
}
