#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A first-person voxel sandbox core: a world of unit cubes the player can
//! walk on, collide with, place, and remove, backed by deterministic
//! procedurally generated terrain.
//!
//! ## Key Modules
//!
//! * `engine_state` - The world context and all subsystems: voxel store,
//!   terrain generation, chunk streaming, player physics, block interaction,
//!   and persistence
//!
//! ## Architecture
//!
//! The core is single-threaded and tick-driven: one logical frame advances
//! control-state sampling, player physics, chunk streaming, and the camera
//! pose, strictly in that order. Rendering and raw input stay outside the
//! core; the renderer is consumed through the narrow
//! [`engine_state::rendering::RenderBackend`] trait and input arrives as a
//! normalized [`engine_state::ControlState`] per tick.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use voxel_sandbox::engine_state::rendering::NullRenderer;
//! use voxel_sandbox::engine_state::{ControlState, EngineState};
//!
//! let mut engine = EngineState::new(NullRenderer::new());
//! engine.set_captured(true);
//! engine.set_controls(ControlState {
//!     move_forward: true,
//!     ..ControlState::default()
//! });
//! loop {
//!     engine.tick();
//!     # break;
//! }
//! ```

use engine_state::rendering::NullRenderer;
use engine_state::{ControlState, EngineState};
use log::info;
use web_time::Duration;

pub mod engine_state;

/// Runs a short headless demo session.
///
/// Initializes logging, spawns a world over the recording render backend,
/// and drives a scripted walk with a few edits so the whole pipeline
/// (generation, streaming, physics, interaction, persistence) is exercised
/// end to end.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut engine = EngineState::new(NullRenderer::new());
    engine.set_captured(true);

    info!(
        "World spawned: {} blocks stored, {} drawables",
        engine.store.len(),
        engine.registry.len()
    );

    let step = Duration::from_micros(16_667);

    // Fall onto the terrain, then walk forward across a chunk boundary.
    engine.set_controls(ControlState::default());
    for _ in 0..120 {
        engine.advance(step);
    }
    engine.set_controls(ControlState {
        move_forward: true,
        ..ControlState::default()
    });
    for _ in 0..600 {
        engine.advance(step);
    }
    engine.set_controls(ControlState::default());

    // Look down and stack a couple of blocks.
    engine.set_controls(ControlState {
        pitch_delta: -0.9,
        ..ControlState::default()
    });
    engine.advance(step);
    engine.set_controls(ControlState::default());
    for _ in 0..2 {
        if let Some(coord) = engine.place_action() {
            info!("Demo placed a block at {:?}", coord);
        }
    }
    if let Some(coord) = engine.break_action() {
        info!("Demo removed the block at {:?}", coord);
    }

    match engine.export_world() {
        Ok(json) => info!("Exported world: {} bytes of JSON", json.len()),
        Err(error) => info!("Export failed: {}", error),
    }

    info!(
        "Session finished at {:?}: {} blocks stored, {} drawables, {} created / {} destroyed",
        engine.player.position,
        engine.store.len(),
        engine.registry.len(),
        engine.renderer.created(),
        engine.renderer.destroyed()
    );
}
