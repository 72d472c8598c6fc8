//! # Voxel Store
//!
//! The authoritative sparse world model: a map from integer coordinate to
//! block type. A coordinate absent from the map is empty air. The store grows
//! as terrain streams in and as the player places blocks, and shrinks only
//! through explicit removal or the distant-entry eviction sweep.
//!
//! ## Provenance
//!
//! Every stored block records whether it was produced by the terrain
//! generator or by a player edit. Generated entries may be evicted and
//! regenerated later (safe because generation is pure); edited entries are
//! never evicted.
//!
//! ## Removal permanence
//!
//! Removing a block leaves a tombstone so `get_or_generate` does not quietly
//! resurrect it from the terrain function. A removed cell stays empty for the
//! rest of the session, unlike a cell that was merely never visited.

use std::collections::{HashMap, HashSet};

use cgmath::Point3;

use crate::engine_state::rendering::DrawableRegistry;

use super::block::block_type::BlockType;
use super::terrain::TerrainGenerator;

/// Records how a stored block came to exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// Produced by the terrain generator on first visit.
    Generated,
    /// Placed (or bulk-loaded) by the player; exempt from eviction.
    Edited,
}

/// A block entry together with its provenance.
#[derive(Copy, Clone, Debug)]
struct StoredBlock {
    block_type: BlockType,
    provenance: Provenance,
}

/// The sparse voxel world map. Single source of truth for what exists.
///
/// All operations are total: lookups for coordinates never present and never
/// generated return `None`, not an error.
pub struct VoxelStore {
    /// The terrain generator backing `get_or_generate`.
    terrain: TerrainGenerator,
    /// Mapping from coordinate to stored block.
    blocks: HashMap<Point3<i32>, StoredBlock>,
    /// Coordinates explicitly removed this session; generation skips them.
    tombstones: HashSet<Point3<i32>>,
}

impl VoxelStore {
    /// Creates an empty store backed by the given terrain generator.
    pub fn new(terrain: TerrainGenerator) -> Self {
        VoxelStore {
            terrain,
            blocks: HashMap::new(),
            tombstones: HashSet::new(),
        }
    }

    /// The terrain generator this store was built with.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Gets the block at a coordinate, or `None` if the cell is empty.
    pub fn get(&self, coord: Point3<i32>) -> Option<BlockType> {
        self.blocks.get(&coord).map(|stored| stored.block_type)
    }

    /// Whether a coordinate currently holds a block.
    pub fn contains(&self, coord: Point3<i32>) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Whether the block at a coordinate occupies space.
    ///
    /// Empty cells are not solid; stored cells are solid unless their type is
    /// marked otherwise in the catalogue.
    pub fn is_solid(&self, coord: Point3<i32>) -> bool {
        self.get(coord).is_some_and(|block_type| block_type.is_solid())
    }

    /// Stores a player-placed block at a coordinate.
    ///
    /// Clears any removal tombstone: placing into a previously-removed cell
    /// makes it a normal edited cell again.
    pub fn set(&mut self, coord: Point3<i32>, block_type: BlockType) {
        self.tombstones.remove(&coord);
        self.blocks.insert(
            coord,
            StoredBlock {
                block_type,
                provenance: Provenance::Edited,
            },
        );
    }

    /// Removes the block at a coordinate, permanently.
    ///
    /// # Returns
    /// The removed block type, or `None` if the cell was already empty.
    pub fn remove(&mut self, coord: Point3<i32>) -> Option<BlockType> {
        let removed = self.blocks.remove(&coord);
        if removed.is_some() {
            self.tombstones.insert(coord);
        }
        removed.map(|stored| stored.block_type)
    }

    /// Returns the stored block at a coordinate, generating it on first visit.
    ///
    /// If the coordinate has never been stored (and never been removed), the
    /// terrain generator decides its content; non-empty results are recorded
    /// with `Generated` provenance. Empty results are not stored, so calling
    /// again re-derives the same answer. Idempotent: a second call never
    /// changes the stored value.
    pub fn get_or_generate(&mut self, coord: Point3<i32>) -> Option<BlockType> {
        if let Some(stored) = self.blocks.get(&coord) {
            return Some(stored.block_type);
        }
        if self.tombstones.contains(&coord) {
            return None;
        }

        let generated = self.terrain.block_at(coord.x, coord.y, coord.z)?;
        self.blocks.insert(
            coord,
            StoredBlock {
                block_type: generated,
                provenance: Provenance::Generated,
            },
        );
        Some(generated)
    }

    /// The provenance of the block at a coordinate, if one is stored.
    pub fn provenance(&self, coord: Point3<i32>) -> Option<Provenance> {
        self.blocks.get(&coord).map(|stored| stored.provenance)
    }

    /// The number of stored blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Drops everything: blocks, provenance, and tombstones.
    ///
    /// Used by world reset and by bulk load, which replaces all entries.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.tombstones.clear();
    }

    /// Evicts generated entries far from the player to bound memory growth.
    ///
    /// An entry is dropped only if it is generated (never edited), absent
    /// from the drawable registry, and horizontally outside `retention_radius`
    /// of `(center_x, center_z)`. Evicted cells regenerate identically on
    /// revisit because the terrain function is pure.
    ///
    /// # Returns
    /// The number of entries evicted.
    pub fn evict_distant(
        &mut self,
        center_x: i32,
        center_z: i32,
        retention_radius: i32,
        registry: &DrawableRegistry,
    ) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|coord, stored| {
            if stored.provenance == Provenance::Edited {
                return true;
            }
            if registry.contains(*coord) {
                return true;
            }
            let dx = (coord.x - center_x).abs();
            let dz = (coord.z - center_z).abs();
            dx <= retention_radius && dz <= retention_radius
        });
        before - self.blocks.len()
    }
}
