//! # Persistence
//!
//! Serializes the currently drawable `(coordinate, block type)` set to JSON
//! and bulk-loads such a set back, replacing all current entries. The file
//! dialogs and actual I/O live outside the core; this module only produces
//! and consumes the serialized form.
//!
//! Malformed entries (unknown block names, out-of-range coordinates) are
//! skipped individually with a warning rather than aborting the whole load.
//! Only an unparseable document is an error.

use cgmath::Point3;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::rendering::{DrawableRegistry, RenderBackend};
use super::voxels::block::block_type::BlockType;
use super::voxels::store::VoxelStore;
use super::voxels::terrain::FLOOR_HEIGHT;

/// Coordinates beyond this magnitude are treated as corrupt during load.
const COORDINATE_LIMIT: i32 = 100_000;

/// One serialized block: a coordinate and the block type's name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockRecord {
    /// Block coordinate components.
    pub x: i32,
    /// See `x`.
    pub y: i32,
    /// See `x`.
    pub z: i32,
    /// Serialized block type name, e.g. `"sand"`.
    pub block: String,
}

/// Serializes every currently drawable block to a JSON array.
///
/// Records are sorted by coordinate so repeated exports of the same world
/// compare equal.
pub fn export_drawable_blocks(
    store: &VoxelStore,
    registry: &DrawableRegistry,
) -> Result<String, serde_json::Error> {
    let mut records: Vec<BlockRecord> = registry
        .coords()
        .filter_map(|coord| {
            store.get(coord).map(|block_type| BlockRecord {
                x: coord.x,
                y: coord.y,
                z: coord.z,
                block: block_type.name().to_string(),
            })
        })
        .collect();
    records.sort_by_key(|record| (record.x, record.y, record.z));
    serde_json::to_string(&records)
}

/// Whether a record's coordinate is plausible for this world.
fn coordinate_in_range(record: &BlockRecord) -> bool {
    record.y >= FLOOR_HEIGHT
        && record.x.abs() <= COORDINATE_LIMIT
        && record.y.abs() <= COORDINATE_LIMIT
        && record.z.abs() <= COORDINATE_LIMIT
}

/// Bulk-loads a serialized block set, replacing all current entries.
///
/// Every previous drawable is destroyed and the store is cleared before
/// loading. Loaded blocks carry edited provenance (they survive eviction)
/// and get drawables immediately. Entries that fail validation are skipped
/// with a warning.
///
/// # Returns
/// The number of blocks loaded, or the parse error for an unreadable
/// document.
pub fn import_blocks<R: RenderBackend>(
    json: &str,
    store: &mut VoxelStore,
    registry: &mut DrawableRegistry,
    renderer: &mut R,
) -> Result<usize, serde_json::Error> {
    let records: Vec<BlockRecord> = serde_json::from_str(json)?;

    for (_, handle) in registry.drain() {
        renderer.destroy_drawable(handle);
    }
    store.clear();

    let mut loaded = 0;
    for record in records {
        let Some(block_type) = BlockType::from_name(&record.block) else {
            warn!(
                "Skipping block at ({}, {}, {}): unknown block type {:?}",
                record.x, record.y, record.z, record.block
            );
            continue;
        };
        if !coordinate_in_range(&record) {
            warn!(
                "Skipping {} block at ({}, {}, {}): coordinate out of range",
                record.block, record.x, record.y, record.z
            );
            continue;
        }

        let coord = Point3::new(record.x, record.y, record.z);
        store.set(coord, block_type);
        let handle = renderer.create_drawable(coord, block_type);
        registry.register(coord, handle);
        loaded += 1;
    }

    info!("Imported {} blocks", loaded);
    Ok(loaded)
}
