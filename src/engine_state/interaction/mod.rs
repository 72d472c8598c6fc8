//! # Placement Resolver
//!
//! Raycast-driven block placement and removal. Rays are cast against the
//! currently drawable block set only: blocks outside the streaming window
//! are not rendered and therefore cannot be aimed at.
//!
//! Placement targets the cell adjacent to the hit face and must obey the
//! adjacency rule: a new block may only be placed touching existing solid
//! structure, either a solid side neighbor behind a horizontal face normal
//! or a solid cell directly below. An underside hit alone never qualifies.
//! When the adjacency check fails, or when the ray hits nothing, placement
//! falls back to stacking on top of the target column. Placement below the
//! world floor is always rejected.
//!
//! Invalid requests are rejected silently (the action has no effect); the
//! only report is a debug-level diagnostic line.

use cgmath::{InnerSpace, Point3, Vector3};
use log::debug;

use super::rendering::{DrawableRegistry, RenderBackend};
use super::voxels::block::block_type::BlockType;
use super::voxels::store::VoxelStore;
use super::voxels::terrain::FLOOR_HEIGHT;

/// Maximum distance a pick ray travels, in blocks.
pub const PICK_RANGE: f32 = 8.0;
/// Distance ahead of the ray origin used when no block face is hit.
pub const FALLBACK_REACH: f32 = 5.0;
/// Highest cell considered when stacking on a column.
const COLUMN_SCAN_TOP: i32 = 64;

/// A block face hit by a pick ray.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// The coordinate of the hit block.
    pub coord: Point3<i32>,
    /// The unit normal of the entered face. Zero if the ray started inside
    /// the block.
    pub normal: Vector3<i32>,
}

/// Casts a ray against the drawable block set.
///
/// Steps cell-by-cell along the ray (blocks are unit cubes centered on
/// integer coordinates, so cell boundaries sit at half-integers) and returns
/// the first registered coordinate entered, with the face normal derived
/// from the last step axis.
pub fn raycast_drawables(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    registry: &DrawableRegistry,
    max_distance: f32,
) -> Option<RayHit> {
    if direction.magnitude2() == 0.0 {
        return None;
    }
    let dir = direction.normalize();

    // Shift by half a block so cells are floor-indexed.
    let ox = origin.x + 0.5;
    let oy = origin.y + 0.5;
    let oz = origin.z + 0.5;
    let mut x = ox.floor() as i32;
    let mut y = oy.floor() as i32;
    let mut z = oz.floor() as i32;

    let step_x = if dir.x > 0.0 { 1 } else { -1 };
    let step_y = if dir.y > 0.0 { 1 } else { -1 };
    let step_z = if dir.z > 0.0 { 1 } else { -1 };

    // A zero direction component never crosses a boundary on its axis; its
    // entry distance must be infinite, not a division by zero.
    let mut t_max_x = if dir.x > 0.0 {
        (x as f32 + 1.0 - ox) / dir.x
    } else if dir.x < 0.0 {
        (x as f32 - ox) / dir.x
    } else {
        f32::INFINITY
    };
    let mut t_max_y = if dir.y > 0.0 {
        (y as f32 + 1.0 - oy) / dir.y
    } else if dir.y < 0.0 {
        (y as f32 - oy) / dir.y
    } else {
        f32::INFINITY
    };
    let mut t_max_z = if dir.z > 0.0 {
        (z as f32 + 1.0 - oz) / dir.z
    } else if dir.z < 0.0 {
        (z as f32 - oz) / dir.z
    } else {
        f32::INFINITY
    };

    let t_delta_x = (1.0 / dir.x).abs();
    let t_delta_y = (1.0 / dir.y).abs();
    let t_delta_z = (1.0 / dir.z).abs();

    let mut normal = Vector3::new(0, 0, 0);
    let mut t = 0.0;
    while t <= max_distance {
        let coord = Point3::new(x, y, z);
        if registry.contains(coord) {
            return Some(RayHit { coord, normal });
        }

        if t_max_x < t_max_y {
            if t_max_x < t_max_z {
                x += step_x;
                t = t_max_x;
                t_max_x += t_delta_x;
                normal = Vector3::new(-step_x, 0, 0);
            } else {
                z += step_z;
                t = t_max_z;
                t_max_z += t_delta_z;
                normal = Vector3::new(0, 0, -step_z);
            }
        } else if t_max_y < t_max_z {
            y += step_y;
            t = t_max_y;
            t_max_y += t_delta_y;
            normal = Vector3::new(0, -step_y, 0);
        } else {
            z += step_z;
            t = t_max_z;
            t_max_z += t_delta_z;
            normal = Vector3::new(0, 0, -step_z);
        }
    }

    None
}

/// Finds the cell one above the highest solid block of a column.
///
/// # Returns
/// `None` when the column has no solid support in scan range or the target
/// cell is occupied.
fn column_target(store: &VoxelStore, x: i32, z: i32) -> Option<Point3<i32>> {
    for y in (FLOOR_HEIGHT - 1..=COLUMN_SCAN_TOP).rev() {
        if store.is_solid(Point3::new(x, y, z)) {
            let target = Point3::new(x, y + 1, z);
            if store.contains(target) {
                return None;
            }
            return Some(target);
        }
    }
    None
}

/// Resolves the target coordinate for placing a block along a view ray.
///
/// A face hit yields the hit coordinate offset by the face normal, valid if
/// the cell is empty and adjacent to solid structure (solid side neighbor
/// for a horizontal normal, or solid cell below); otherwise placement falls
/// back to stacking on the column at the candidate's `(x, z)`. With no hit
/// at all, the column a fixed reach ahead of the origin is used.
pub fn resolve_placement(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    store: &VoxelStore,
    registry: &DrawableRegistry,
) -> Option<Point3<i32>> {
    let target = match raycast_drawables(origin, direction, registry, PICK_RANGE) {
        Some(hit) => {
            let candidate = hit.coord + hit.normal;
            if store.contains(candidate) {
                debug!("Placement rejected: {:?} is already occupied", candidate);
                return None;
            }
            // Adjacency: a solid side neighbor (only meaningful for a
            // horizontal face normal) or a solid cell directly below. An
            // underside hit alone does not qualify; a block may not hang
            // with nothing beside or beneath it.
            let side_supported =
                hit.normal.y == 0 && store.is_solid(candidate - hit.normal);
            let below = Point3::new(candidate.x, candidate.y - 1, candidate.z);
            if side_supported || store.is_solid(below) {
                Some(candidate)
            } else {
                // Adjacency failed; stack on the column instead of allowing
                // floating geometry.
                column_target(store, candidate.x, candidate.z)
            }
        }
        None => {
            if direction.magnitude2() == 0.0 {
                return None;
            }
            let ahead = origin + direction.normalize() * FALLBACK_REACH;
            column_target(store, ahead.x.round() as i32, ahead.z.round() as i32)
        }
    };

    match target {
        Some(coord) if coord.y < FLOOR_HEIGHT => {
            debug!("Placement rejected: {:?} is below the world floor", coord);
            None
        }
        Some(coord) => Some(coord),
        None => {
            debug!("Placement rejected: no valid target along the ray");
            None
        }
    }
}

/// Resolves the target coordinate for removal: the first drawable block the
/// ray intersects. No validity constraints beyond a block existing there.
pub fn resolve_removal(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    registry: &DrawableRegistry,
) -> Option<Point3<i32>> {
    raycast_drawables(origin, direction, registry, PICK_RANGE).map(|hit| hit.coord)
}

/// Resolves and applies a placement: writes the block into the store and
/// creates its drawable immediately, independent of the streaming window.
///
/// # Returns
/// The placed coordinate, or `None` if the request was rejected.
pub fn place_block<R: RenderBackend>(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    block_type: BlockType,
    store: &mut VoxelStore,
    registry: &mut DrawableRegistry,
    renderer: &mut R,
) -> Option<Point3<i32>> {
    let coord = resolve_placement(origin, direction, store, registry)?;
    store.set(coord, block_type);
    let handle = renderer.create_drawable(coord, block_type);
    registry.register(coord, handle);
    debug!("Placed {} at {:?}", block_type.name(), coord);
    Some(coord)
}

/// Resolves and applies a removal: deletes the block from the store and
/// destroys its drawable immediately.
///
/// # Returns
/// The removed coordinate, or `None` if the ray hit nothing.
pub fn remove_block<R: RenderBackend>(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    store: &mut VoxelStore,
    registry: &mut DrawableRegistry,
    renderer: &mut R,
) -> Option<Point3<i32>> {
    let coord = resolve_removal(origin, direction, registry)?;
    store.remove(coord);
    if let Some(handle) = registry.deregister(coord) {
        renderer.destroy_drawable(handle);
    }
    debug!("Removed block at {:?}", coord);
    Some(coord)
}
