//! The built-in art module corpus.
//!
//! One file per piece, flat, mirroring the content directory the manifest
//! generator scans; helpers shared between pieces live under `common/`
//! where the scanner does not look. Pieces share nothing beyond the render
//! contract, with one deliberate exception: the watch faces all lay out
//! through the `common::dial` polar utilities.

pub(crate) mod common;

pub mod animated_rects;
pub mod chanel_watch;
pub mod circuit_board;
pub mod classic_watch;
pub mod colorful_rects;
pub mod concentric_waves;
pub mod flow_field;
pub mod geometric_maze;
pub mod hatching_portrait;
pub mod mountain_topo;
pub mod nomos_tangente;
pub mod omega_speedmaster;
pub mod particle_waves;
pub mod perspective_boxes;
pub mod seeded_rects;
pub mod spiral_motion;
pub mod stippled_landscape;

use crate::registry::ModuleHandle;

/// Every built-in piece, in gallery display order.
pub fn builtin_entries() -> Vec<ModuleHandle> {
    vec![
        ModuleHandle::new("flow-field", || Box::new(flow_field::FlowField)),
        ModuleHandle::new("geometric-maze", || Box::new(geometric_maze::GeometricMaze)),
        ModuleHandle::new("hatching-portrait", || {
            Box::new(hatching_portrait::HatchingPortrait)
        }),
        ModuleHandle::new("concentric-waves", || {
            Box::new(concentric_waves::ConcentricWaves)
        }),
        ModuleHandle::new("stippled-landscape", || {
            Box::new(stippled_landscape::StippledLandscape)
        }),
        ModuleHandle::new("mountain-topo", || Box::new(mountain_topo::MountainTopo)),
        ModuleHandle::new("circuit-board", || Box::new(circuit_board::CircuitBoard)),
        ModuleHandle::new("perspective-boxes", || {
            Box::new(perspective_boxes::PerspectiveBoxes::default())
        }),
        ModuleHandle::new("colorful-rects", || Box::new(colorful_rects::ColorfulRects)),
        ModuleHandle::new("seeded-rects", || Box::new(seeded_rects::SeededRects)),
        ModuleHandle::new("animated-rects", || Box::new(animated_rects::AnimatedRects)),
        ModuleHandle::new("particle-waves", || Box::new(particle_waves::ParticleWaves)),
        ModuleHandle::new("spiral-motion", || Box::new(spiral_motion::SpiralMotion)),
        ModuleHandle::new("classic-watch", || Box::new(classic_watch::ClassicWatch)),
        ModuleHandle::new("omega-speedmaster", || {
            Box::new(omega_speedmaster::Speedmaster)
        }),
        ModuleHandle::new("chanel-watch", || Box::new(chanel_watch::ChanelWatch)),
        ModuleHandle::new("nomos-tangente", || Box::new(nomos_tangente::Tangente)),
    ]
}
