//! Integration tests for the sparse voxel store: on-demand generation,
//! removal permanence, provenance, and eviction.

use cgmath::Point3;
use voxel_sandbox::engine_state::rendering::{DrawableHandle, DrawableRegistry};
use voxel_sandbox::engine_state::voxels::block::block_type::BlockType;
use voxel_sandbox::engine_state::voxels::store::{Provenance, VoxelStore};
use voxel_sandbox::engine_state::voxels::terrain::TerrainGenerator;

fn new_store() -> VoxelStore {
    VoxelStore::new(TerrainGenerator::new())
}

#[test]
fn lookup_of_unvisited_coordinate_is_empty_not_an_error() {
    let store = new_store();
    assert_eq!(store.get(Point3::new(3, 4, 5)), None);
    assert!(!store.contains(Point3::new(3, 4, 5)));
    assert!(!store.is_solid(Point3::new(3, 4, 5)));
}

#[test]
fn get_or_generate_is_idempotent() {
    let mut store = new_store();
    let terrain = *store.terrain();
    let coord = Point3::new(10, terrain.height_at(10, -4), -4);

    let first = store.get_or_generate(coord);
    assert!(first.is_some(), "surface cell must generate a block");
    let len_after_first = store.len();

    let second = store.get_or_generate(coord);
    assert_eq!(first, second);
    assert_eq!(store.len(), len_after_first, "second call must not grow the store");
}

#[test]
fn generated_empty_cells_are_not_stored() {
    let mut store = new_store();
    let coord = Point3::new(0, 50, 0);

    assert_eq!(store.get_or_generate(coord), None);
    assert!(!store.contains(coord));
    assert_eq!(store.len(), 0);
}

#[test]
fn generation_matches_the_terrain_function() {
    let mut store = new_store();
    let terrain = *store.terrain();

    for x in -10..10 {
        for z in -10..10 {
            for y in -1..16 {
                let coord = Point3::new(x, y, z);
                assert_eq!(store.get_or_generate(coord), terrain.block_at(x, y, z));
            }
        }
    }
}

#[test]
fn removal_is_permanent() {
    let mut store = new_store();
    let terrain = *store.terrain();
    let coord = Point3::new(2, terrain.height_at(2, 2), 2);

    assert!(store.get_or_generate(coord).is_some());
    assert!(store.remove(coord).is_some());

    assert_eq!(store.get(coord), None);
    // Removed is not the same as never visited: generation must not
    // resurrect the cell.
    assert_eq!(store.get_or_generate(coord), None);
    assert_eq!(store.get(coord), None);
}

#[test]
fn removing_an_empty_cell_does_nothing() {
    let mut store = new_store();
    let coord = Point3::new(0, 40, 0);
    assert_eq!(store.remove(coord), None);
    // The cell was never present, so it is still generatable.
    assert_eq!(store.get_or_generate(Point3::new(0, -1, 0)), Some(BlockType::DIRT));
}

#[test]
fn placing_into_a_removed_cell_revives_it() {
    let mut store = new_store();
    let terrain = *store.terrain();
    let coord = Point3::new(5, terrain.height_at(5, 5), 5);

    store.get_or_generate(coord);
    store.remove(coord);
    store.set(coord, BlockType::BRICK);

    assert_eq!(store.get(coord), Some(BlockType::BRICK));
    assert_eq!(store.provenance(coord), Some(Provenance::Edited));
}

#[test]
fn provenance_distinguishes_generated_from_edited() {
    let mut store = new_store();
    let terrain = *store.terrain();
    let generated = Point3::new(1, terrain.height_at(1, 1), 1);
    let edited = Point3::new(1, 30, 1);

    store.get_or_generate(generated);
    store.set(edited, BlockType::GLASS);

    assert_eq!(store.provenance(generated), Some(Provenance::Generated));
    assert_eq!(store.provenance(edited), Some(Provenance::Edited));
    assert_eq!(store.provenance(Point3::new(9, 40, 9)), None);
}

#[test]
fn eviction_drops_distant_generated_entries_only() {
    let mut store = new_store();
    let registry = DrawableRegistry::new();

    let near = Point3::new(3, -1, 3);
    let far_generated = Point3::new(500, -1, 500);
    let far_edited = Point3::new(600, 10, 600);

    store.get_or_generate(near);
    store.get_or_generate(far_generated);
    store.set(far_edited, BlockType::PLANKS);

    let evicted = store.evict_distant(0, 0, 64, &registry);
    assert_eq!(evicted, 1);

    assert!(store.contains(near));
    assert!(!store.contains(far_generated));
    assert_eq!(store.get(far_edited), Some(BlockType::PLANKS));
}

#[test]
fn eviction_spares_entries_with_drawables() {
    let mut store = new_store();
    let mut registry = DrawableRegistry::new();
    let far = Point3::new(500, -1, 500);

    store.get_or_generate(far);
    registry.register(far, DrawableHandle(1));

    assert_eq!(store.evict_distant(0, 0, 64, &registry), 0);
    assert!(store.contains(far));
}

#[test]
fn evicted_terrain_regenerates_identically() {
    let mut store = new_store();
    let registry = DrawableRegistry::new();
    let terrain = *store.terrain();
    let coord = Point3::new(400, terrain.height_at(400, 0), 0);

    let before = store.get_or_generate(coord);
    store.evict_distant(0, 0, 64, &registry);
    assert!(!store.contains(coord));

    let after = store.get_or_generate(coord);
    assert_eq!(before, after);
}
