//! # Engine State Module
//!
//! The core sandbox module: the explicit world-context object owning every
//! subsystem, with no ambient globals.
//!
//! ## Key Components
//!
//! * `EngineState` - The world context: store, drawable registry, player,
//!   streamer, and the render collaborator
//! * `voxels` - Block catalogue, terrain generation, and the sparse store
//! * `streaming` - The chunk streaming window
//! * `player` - Player movement, gravity, and collision
//! * `interaction` - Raycast-driven block placement and removal
//! * `rendering` - The render collaborator seam and drawable registry
//! * `persistence` - JSON export/import of the drawable block set
//!
//! ## Tick Order
//!
//! Each tick advances in a fixed order: control-state snapshot, player
//! physics, chunk streaming, camera pose. Everything runs synchronously on
//! the tick thread; input handlers only produce the next `ControlState`
//! snapshot and discrete place/break intents, never mutating world state
//! directly.

use cgmath::{Point3, Rad};
use log::info;
use web_time::{Duration, Instant};

use interaction::{place_block, remove_block};
use player::PlayerController;
use rendering::{DrawableRegistry, RenderBackend};
use streaming::ChunkStreamer;
use voxels::block::block_type::BlockType;
use voxels::store::VoxelStore;
use voxels::terrain::TerrainGenerator;

pub mod interaction;
pub mod persistence;
pub mod player;
pub mod rendering;
pub mod streaming;
pub mod voxels;

/// Where the player spawns (and respawns after a world reset).
const SPAWN_POSITION: (f32, f32, f32) = (0.0, 18.0, 60.0);

/// A snapshot of the normalized player controls for one tick.
///
/// Produced externally from whatever raw input exists (keyboard, pointer
/// lock) and consumed read-only by the player controller. Yaw/pitch deltas
/// are in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ControlState {
    /// Movement flags - true while the corresponding control is held.
    pub move_forward: bool,
    /// See `move_forward`.
    pub move_backward: bool,
    /// See `move_forward`.
    pub move_left: bool,
    /// See `move_forward`.
    pub move_right: bool,
    /// Whether a jump was requested this tick.
    pub jump: bool,
    /// Yaw change for this tick, in radians.
    pub yaw_delta: f32,
    /// Pitch change for this tick, in radians.
    pub pitch_delta: f32,
}

/// The world context object owning all sandbox state.
///
/// Generic over the render collaborator so the same core drives a real
/// renderer, the headless demo, and the test suite.
pub struct EngineState<R: RenderBackend> {
    /// The authoritative sparse voxel world.
    pub store: VoxelStore,
    /// Coordinates currently backed by a drawable.
    pub registry: DrawableRegistry,
    /// The streaming window maintainer.
    pub streamer: ChunkStreamer,
    /// Player position, orientation, and vertical-motion state.
    pub player: PlayerController,
    /// The render collaborator.
    pub renderer: R,
    /// The block type the next placement will use.
    pub selected_block: BlockType,
    /// The control snapshot consumed by the next tick.
    controls: ControlState,
    /// Whether the view is exclusively captured; place/break actions are
    /// ignored while it is not.
    captured: bool,
    /// Whether the tick loop is paused.
    paused: bool,
    /// When the previous tick ran. `None` right after startup or resume so
    /// the next measured interval excludes the gap.
    last_tick: Option<Instant>,
}

impl<R: RenderBackend> EngineState<R> {
    /// Creates the world context and materializes the initial streaming
    /// window around the spawn point.
    pub fn new(renderer: R) -> Self {
        let mut state = EngineState {
            store: VoxelStore::new(TerrainGenerator::new()),
            registry: DrawableRegistry::new(),
            streamer: ChunkStreamer::new(),
            player: PlayerController::new(
                Point3::new(SPAWN_POSITION.0, SPAWN_POSITION.1, SPAWN_POSITION.2),
                Rad(0.0),
                Rad(0.0),
            ),
            renderer,
            selected_block: BlockType::SAND,
            controls: ControlState::default(),
            captured: false,
            paused: false,
            last_tick: None,
        };
        state.stream_around_player();
        state
    }

    /// Replaces the control snapshot consumed by the next tick.
    pub fn set_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }

    /// Sets whether the view is exclusively captured by the player.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Whether place/break actions are currently accepted.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Pauses or resumes the tick loop.
    ///
    /// While paused, ticks advance nothing (the renderer may keep presenting
    /// the last frame). Resuming clears the tick clock so the paused
    /// interval is excluded from the next measured elapsed time, avoiding a
    /// physics discontinuity.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            info!("Simulation paused");
        } else {
            self.last_tick = None;
            info!("Simulation resumed");
        }
    }

    /// Whether the tick loop is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Selects the block type used by subsequent placements.
    pub fn select_block(&mut self, block_type: BlockType) {
        self.selected_block = block_type;
    }

    /// Advances one tick with a measured elapsed time.
    ///
    /// # Returns
    /// The elapsed time that was applied (zero while paused and on the first
    /// tick after startup or resume).
    pub fn tick(&mut self) -> Duration {
        if self.paused {
            return Duration::ZERO;
        }
        let now = Instant::now();
        let dt = match self.last_tick {
            Some(previous) => now.duration_since(previous),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);
        self.advance(dt);
        dt
    }

    /// Advances one tick with an explicit elapsed time.
    ///
    /// This is the deterministic entry point `tick` delegates to; tests and
    /// fixed-step drivers call it directly.
    pub fn advance(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        self.player.update(&self.controls, &self.store, dt);
        self.stream_around_player();
        self.renderer
            .set_camera_pose(self.player.position, self.player.yaw, self.player.pitch);
    }

    /// Handles a discrete "place" action from the input collaborator.
    ///
    /// Ignored unless the view is captured. The ray originates at the eye
    /// along the look direction.
    pub fn place_action(&mut self) -> Option<Point3<i32>> {
        if !self.captured {
            return None;
        }
        place_block(
            self.player.position,
            self.player.look_direction(),
            self.selected_block,
            &mut self.store,
            &mut self.registry,
            &mut self.renderer,
        )
    }

    /// Handles a discrete "break" action from the input collaborator.
    pub fn break_action(&mut self) -> Option<Point3<i32>> {
        if !self.captured {
            return None;
        }
        remove_block(
            self.player.position,
            self.player.look_direction(),
            &mut self.store,
            &mut self.registry,
            &mut self.renderer,
        )
    }

    /// Discards all blocks and drawables, respawns the player, and streams a
    /// fresh window.
    pub fn reset_world(&mut self) {
        for (_, handle) in self.registry.drain() {
            self.renderer.destroy_drawable(handle);
        }
        self.store.clear();
        self.streamer = ChunkStreamer::new();
        self.player = PlayerController::new(
            Point3::new(SPAWN_POSITION.0, SPAWN_POSITION.1, SPAWN_POSITION.2),
            Rad(0.0),
            Rad(0.0),
        );
        self.stream_around_player();
        info!("World reset");
    }

    /// Serializes the currently drawable block set to JSON.
    pub fn export_world(&self) -> Result<String, serde_json::Error> {
        persistence::export_drawable_blocks(&self.store, &self.registry)
    }

    /// Replaces the world with a serialized block set, then re-streams
    /// terrain around the player.
    ///
    /// # Returns
    /// The number of blocks loaded, or the parse error for an unreadable
    /// document.
    pub fn import_world(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let loaded = persistence::import_blocks(
            json,
            &mut self.store,
            &mut self.registry,
            &mut self.renderer,
        )?;
        self.streamer = ChunkStreamer::new();
        self.stream_around_player();
        Ok(loaded)
    }

    fn stream_around_player(&mut self) {
        self.streamer.update_window(
            self.player.position.x,
            self.player.position.z,
            &mut self.store,
            &mut self.registry,
            &mut self.renderer,
        );
    }
}
