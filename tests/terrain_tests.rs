//! Integration tests for deterministic terrain generation.
//! These validate purity, the solid floor invariant, and the column banding
//! rules.

use voxel_sandbox::engine_state::voxels::block::block_type::BlockType;
use voxel_sandbox::engine_state::voxels::terrain::{
    TerrainGenerator, FLOOR_HEIGHT, STONE_HEIGHT, WATER_LEVEL,
};

#[test]
fn height_at_is_pure() {
    let terrain = TerrainGenerator::new();

    fastrand::seed(42);
    for _ in 0..10_000 {
        let x = fastrand::i32(-100_000..100_000);
        let z = fastrand::i32(-100_000..100_000);
        let first = terrain.height_at(x, z);
        let second = terrain.height_at(x, z);
        assert_eq!(first, second, "height_at({}, {}) is not pure", x, z);
    }
}

#[test]
fn block_at_is_pure() {
    let terrain = TerrainGenerator::new();

    fastrand::seed(7);
    for _ in 0..10_000 {
        let x = fastrand::i32(-10_000..10_000);
        let y = fastrand::i32(-8..24);
        let z = fastrand::i32(-10_000..10_000);
        assert_eq!(terrain.block_at(x, y, z), terrain.block_at(x, y, z));
    }
}

#[test]
fn below_floor_is_always_dirt() {
    let terrain = TerrainGenerator::new();

    for x in -50..50 {
        for z in -50..50 {
            for y in [-1, -2, -10, -1000] {
                assert_eq!(
                    terrain.block_at(x, y, z),
                    Some(BlockType::DIRT),
                    "floor must be solid dirt at ({}, {}, {})",
                    x,
                    y,
                    z
                );
            }
        }
    }
}

#[test]
fn heights_stay_above_the_floor() {
    let terrain = TerrainGenerator::new();
    for x in -200..200 {
        for z in -200..200 {
            assert!(terrain.height_at(x, z) >= FLOOR_HEIGHT);
        }
    }
}

#[test]
fn surface_cell_follows_the_band_rules() {
    let terrain = TerrainGenerator::new();

    for x in -200..200 {
        for z in -200..200 {
            let height = terrain.height_at(x, z);
            let surface = terrain.block_at(x, height, z);

            let expected = if height == WATER_LEVEL {
                BlockType::SAND
            } else if height >= STONE_HEIGHT {
                BlockType::STONE
            } else if height > WATER_LEVEL {
                BlockType::GRASS
            } else {
                BlockType::DIRT
            };
            assert_eq!(surface, Some(expected), "surface at ({}, {})", x, z);
        }
    }
}

#[test]
fn every_surface_band_occurs() {
    let terrain = TerrainGenerator::new();

    let mut saw_sand = false;
    let mut saw_stone = false;
    let mut saw_grass = false;
    let mut saw_underwater = false;
    for x in -200..200 {
        for z in -200..200 {
            let height = terrain.height_at(x, z);
            saw_sand |= height == WATER_LEVEL;
            saw_stone |= height >= STONE_HEIGHT;
            saw_grass |= height > WATER_LEVEL && height < STONE_HEIGHT;
            saw_underwater |= height < WATER_LEVEL;
        }
    }
    assert!(saw_sand, "no beach in the sampled region");
    assert!(saw_stone, "no stone peaks in the sampled region");
    assert!(saw_grass, "no grassland in the sampled region");
    assert!(saw_underwater, "no lakes in the sampled region");
}

#[test]
fn water_fills_columns_up_to_the_water_level() {
    let terrain = TerrainGenerator::new();

    for x in -200..200 {
        for z in -200..200 {
            let height = terrain.height_at(x, z);
            if height >= WATER_LEVEL {
                continue;
            }
            for y in height + 1..=WATER_LEVEL {
                assert_eq!(terrain.block_at(x, y, z), Some(BlockType::WATER));
            }
            assert_eq!(terrain.block_at(x, WATER_LEVEL + 1, z), None);
        }
    }
}

#[test]
fn cells_below_the_surface_are_dirt() {
    let terrain = TerrainGenerator::new();

    for x in -40..40 {
        for z in -40..40 {
            let height = terrain.height_at(x, z);
            for y in FLOOR_HEIGHT..height {
                assert_eq!(terrain.block_at(x, y, z), Some(BlockType::DIRT));
            }
        }
    }
}

#[test]
fn air_above_dry_columns() {
    let terrain = TerrainGenerator::new();

    for x in -100..100 {
        for z in -100..100 {
            let height = terrain.height_at(x, z);
            if height <= WATER_LEVEL {
                continue;
            }
            for y in height + 1..height + 8 {
                assert_eq!(terrain.block_at(x, y, z), None);
            }
        }
    }
}
