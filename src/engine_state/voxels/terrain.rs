//! # Terrain Generator
//!
//! Deterministic procedural terrain. `height_at` is a pure closed-form
//! combination of periodic functions of the horizontal coordinates: the same
//! `(x, z)` always yields the same height, with no noise source or state.
//! `block_at` derives the full column layering (water, sand, stone, grass,
//! dirt) from the height and a fixed water level.
//!
//! ## Column layout
//!
//! For a column with surface height `h`:
//!
//! * `y < 0` is always solid dirt (the world floor, logically unreachable from
//!   above but solid wherever sampled).
//! * Cells strictly below `h` are dirt.
//! * The surface cell `y == h` is sand exactly at the water level, stone on
//!   high terrain, grass above the water level, and dirt when the column tops
//!   out underwater.
//! * Cells above `h` up to the water level are water; everything higher is
//!   empty.

use super::block::block_type::BlockType;

/// Sea level: columns whose surface sits at or below this height are wet.
pub const WATER_LEVEL: i32 = 3;
/// Heights at or above this value expose stone instead of grass.
pub const STONE_HEIGHT: i32 = 9;
/// Cells below this height are unconditionally solid dirt.
pub const FLOOR_HEIGHT: i32 = 0;

/// Amplitudes and frequencies of the periodic height components. Chosen so
/// heights stay inside `[0, STONE_HEIGHT + 5)` and every band of the
/// catalogue actually occurs.
const BASE_HEIGHT: f64 = 5.0;
const RIDGE_AMPLITUDE: f64 = 3.0;
const RIDGE_FREQUENCY: f64 = 0.08;
const VALLEY_AMPLITUDE: f64 = 2.5;
const VALLEY_FREQUENCY: f64 = 0.06;
const SWELL_AMPLITUDE: f64 = 2.0;
const SWELL_FREQUENCY_X: f64 = 0.013;
const SWELL_FREQUENCY_Z: f64 = 0.017;
const DETAIL_AMPLITUDE: f64 = 1.0;
const DETAIL_FREQUENCY: f64 = 0.11;

/// Stateless terrain generation.
///
/// Both operations are pure functions of their arguments, which makes
/// regeneration after eviction safe: a coordinate always regenerates to the
/// value it had before.
#[derive(Copy, Clone, Debug, Default)]
pub struct TerrainGenerator;

impl TerrainGenerator {
    /// Creates a new terrain generator.
    pub fn new() -> Self {
        TerrainGenerator
    }

    /// Computes the surface height of the column at `(x, z)`.
    ///
    /// # Returns
    /// The integer height of the topmost generated block of the column,
    /// always at least `FLOOR_HEIGHT`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let fx = x as f64;
        let fz = z as f64;

        let height = BASE_HEIGHT
            + RIDGE_AMPLITUDE * (fx * RIDGE_FREQUENCY).sin()
            + VALLEY_AMPLITUDE * (fz * VALLEY_FREQUENCY).cos()
            + SWELL_AMPLITUDE * (fx * SWELL_FREQUENCY_X + fz * SWELL_FREQUENCY_Z).sin()
            + DETAIL_AMPLITUDE * ((fx + fz) * DETAIL_FREQUENCY).sin();

        (height.floor() as i32).max(FLOOR_HEIGHT)
    }

    /// Computes the generated block at a coordinate, or `None` for air.
    ///
    /// Rules are evaluated in a fixed priority order: below-zero dirt, water,
    /// sand, stone, grass, dirt under the surface, underwater dirt, empty.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if y < FLOOR_HEIGHT {
            return Some(BlockType::DIRT);
        }

        let height = self.height_at(x, z);

        if y > height {
            // Above the surface: water up to the water line, then open air.
            if y <= WATER_LEVEL {
                return Some(BlockType::WATER);
            }
            return None;
        }

        if y == height {
            return Some(if height == WATER_LEVEL {
                BlockType::SAND
            } else if height >= STONE_HEIGHT {
                BlockType::STONE
            } else if height > WATER_LEVEL {
                BlockType::GRASS
            } else {
                // Column tops out underwater.
                BlockType::DIRT
            });
        }

        Some(BlockType::DIRT)
    }
}
