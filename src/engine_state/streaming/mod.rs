//! # Chunk Streaming
//!
//! Decides which coordinates must have a visible representation given the
//! player's position. The streaming window is an axis-aligned horizontal
//! square of chunks centered on the player's chunk cell, crossed with a fixed
//! vertical band `[0, STREAM_BAND_HEIGHT)`.
//!
//! Recentering happens only when the player crosses into a different chunk
//! cell; movement inside a cell does no streaming work. On recenter, every
//! coordinate newly inside the window is materialized through
//! `VoxelStore::get_or_generate` and given a drawable if non-empty, and every
//! drawable that left the window is destroyed. The store entry itself
//! survives leaving the window and is reused if the player comes back.

use cgmath::Point3;
use log::debug;

use super::rendering::{DrawableRegistry, RenderBackend};
use super::voxels::store::VoxelStore;

/// The side length of a chunk cell in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// Streaming window radius in chunks around the player's chunk cell.
pub const WINDOW_CHUNK_RADIUS: i32 = 1;
/// Height of the streamed vertical band: coordinates with `0 <= y < height`.
pub const STREAM_BAND_HEIGHT: i32 = 16;
/// Horizontal retention radius for store eviction, in blocks. Generated
/// entries outside this distance that have no drawable are dropped and
/// regenerated on revisit.
pub const RETENTION_RADIUS: i32 = 4 * CHUNK_DIMENSION;

/// The chunk cell containing a continuous horizontal coordinate.
pub fn chunk_cell_of(coord: f32) -> i32 {
    (coord / CHUNK_DIMENSION as f32).floor() as i32
}

/// Maintains the streaming window and keeps the drawable registry in
/// lockstep with the subset of the store inside it.
#[derive(Default)]
pub struct ChunkStreamer {
    /// The chunk cell the window is currently centered on. `None` until the
    /// first update.
    current_chunk: Option<(i32, i32)>,
}

impl ChunkStreamer {
    /// Creates a streamer with no window materialized yet.
    pub fn new() -> Self {
        ChunkStreamer {
            current_chunk: None,
        }
    }

    /// The chunk cell the window is centered on, if it has been centered.
    pub fn current_chunk(&self) -> Option<(i32, i32)> {
        self.current_chunk
    }

    /// Recenters the streaming window on the player's position.
    ///
    /// No-op while the player stays inside the same chunk cell. On a cell
    /// change: destroys drawables that left the window, materializes and
    /// registers drawables for non-empty coordinates that entered it, then
    /// runs the distant-entry eviction sweep on the store.
    pub fn update_window<R: RenderBackend>(
        &mut self,
        player_x: f32,
        player_z: f32,
        store: &mut VoxelStore,
        registry: &mut DrawableRegistry,
        renderer: &mut R,
    ) {
        let cell = (chunk_cell_of(player_x), chunk_cell_of(player_z));
        if self.current_chunk == Some(cell) {
            return;
        }
        self.current_chunk = Some(cell);

        let min_x = (cell.0 - WINDOW_CHUNK_RADIUS) * CHUNK_DIMENSION;
        let max_x = (cell.0 + WINDOW_CHUNK_RADIUS + 1) * CHUNK_DIMENSION;
        let min_z = (cell.1 - WINDOW_CHUNK_RADIUS) * CHUNK_DIMENSION;
        let max_z = (cell.1 + WINDOW_CHUNK_RADIUS + 1) * CHUNK_DIMENSION;

        let inside = |coord: Point3<i32>| {
            coord.x >= min_x
                && coord.x < max_x
                && coord.z >= min_z
                && coord.z < max_z
                && coord.y >= 0
                && coord.y < STREAM_BAND_HEIGHT
        };

        // Drawables that left the window.
        let stale: Vec<Point3<i32>> = registry.coords().filter(|coord| !inside(*coord)).collect();
        let destroyed = stale.len();
        for coord in stale {
            if let Some(handle) = registry.deregister(coord) {
                renderer.destroy_drawable(handle);
            }
        }

        // Coordinates newly inside the window.
        let mut created = 0usize;
        for x in min_x..max_x {
            for z in min_z..max_z {
                for y in 0..STREAM_BAND_HEIGHT {
                    let coord = Point3::new(x, y, z);
                    if registry.contains(coord) {
                        continue;
                    }
                    if let Some(block_type) = store.get_or_generate(coord) {
                        let handle = renderer.create_drawable(coord, block_type);
                        registry.register(coord, handle);
                        created += 1;
                    }
                }
            }
        }

        debug!(
            "Streaming window recentered on chunk ({}, {}): {} drawables created, {} destroyed",
            cell.0, cell.1, created, destroyed
        );

        let center_x = cell.0 * CHUNK_DIMENSION + CHUNK_DIMENSION / 2;
        let center_z = cell.1 * CHUNK_DIMENSION + CHUNK_DIMENSION / 2;
        let evicted = store.evict_distant(center_x, center_z, RETENTION_RADIUS, registry);
        if evicted > 0 {
            debug!("Evicted {} distant generated entries", evicted);
        }
    }
}
