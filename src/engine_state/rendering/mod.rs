//! # Rendering Seam
//!
//! The core never constructs meshes or touches a GPU; it consumes a render
//! collaborator through the narrow [`RenderBackend`] trait: create a drawable
//! cube for a coordinate, destroy one, and update the camera pose. All calls
//! are assumed to succeed.
//!
//! The [`DrawableRegistry`] tracks which coordinates currently have a
//! drawable. Invariant: every registered coordinate exists in the voxel
//! store; the converse need not hold (the store keeps entries outside the
//! streaming window for lazy reuse).

use std::collections::HashMap;

use cgmath::{Point3, Rad};

use super::voxels::block::block_type::BlockType;

/// An opaque handle to a drawable owned by the render collaborator.
///
/// The core only stores and returns these; it never interprets the value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u64);

/// The render collaborator consumed by the core.
pub trait RenderBackend {
    /// Creates a drawable unit cube at a coordinate with the appearance of
    /// the given block type.
    fn create_drawable(&mut self, coord: Point3<i32>, block_type: BlockType) -> DrawableHandle;

    /// Destroys a previously created drawable.
    fn destroy_drawable(&mut self, handle: DrawableHandle);

    /// Updates the camera pose after player movement.
    fn set_camera_pose(&mut self, position: Point3<f32>, yaw: Rad<f32>, pitch: Rad<f32>);
}

/// Mapping from coordinate to drawable handle.
///
/// Kept in lockstep with the subset of the store inside the streaming window,
/// plus any player edits (which create and destroy drawables synchronously,
/// independent of the window).
#[derive(Default)]
pub struct DrawableRegistry {
    drawables: HashMap<Point3<i32>, DrawableHandle>,
}

impl DrawableRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        DrawableRegistry {
            drawables: HashMap::new(),
        }
    }

    /// Registers a drawable for a coordinate.
    pub fn register(&mut self, coord: Point3<i32>, handle: DrawableHandle) {
        self.drawables.insert(coord, handle);
    }

    /// Deregisters a coordinate.
    ///
    /// # Returns
    /// The handle that was registered, or `None` if the coordinate had no
    /// drawable. The caller is responsible for destroying the handle.
    pub fn deregister(&mut self, coord: Point3<i32>) -> Option<DrawableHandle> {
        self.drawables.remove(&coord)
    }

    /// Whether a coordinate currently has a drawable.
    pub fn contains(&self, coord: Point3<i32>) -> bool {
        self.drawables.contains_key(&coord)
    }

    /// The handle registered for a coordinate, if any.
    pub fn get(&self, coord: Point3<i32>) -> Option<DrawableHandle> {
        self.drawables.get(&coord).copied()
    }

    /// Iterates over all registered coordinates.
    pub fn coords(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.drawables.keys().copied()
    }

    /// Removes and returns every entry. Used when replacing the whole world.
    pub fn drain(&mut self) -> Vec<(Point3<i32>, DrawableHandle)> {
        self.drawables.drain().collect()
    }

    /// The number of registered drawables.
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Whether no drawables are registered.
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

/// A render backend that records calls without rendering anything.
///
/// Backs the headless demo binary and the test suite: handles are minted from
/// a counter, and create/destroy totals are kept for inspection.
#[derive(Default)]
pub struct NullRenderer {
    next_handle: u64,
    created: usize,
    destroyed: usize,
    camera_pose: Option<(Point3<f32>, Rad<f32>, Rad<f32>)>,
}

impl NullRenderer {
    /// Creates a new recording backend.
    pub fn new() -> Self {
        NullRenderer::default()
    }

    /// Total drawables created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total drawables destroyed so far.
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// Drawables currently alive (created minus destroyed).
    pub fn live(&self) -> usize {
        self.created - self.destroyed
    }

    /// The most recent camera pose, if one was set.
    pub fn camera_pose(&self) -> Option<(Point3<f32>, Rad<f32>, Rad<f32>)> {
        self.camera_pose
    }
}

impl RenderBackend for NullRenderer {
    fn create_drawable(&mut self, _coord: Point3<i32>, _block_type: BlockType) -> DrawableHandle {
        self.next_handle += 1;
        self.created += 1;
        DrawableHandle(self.next_handle)
    }

    fn destroy_drawable(&mut self, _handle: DrawableHandle) {
        self.destroyed += 1;
    }

    fn set_camera_pose(&mut self, position: Point3<f32>, yaw: Rad<f32>, pitch: Rad<f32>) {
        self.camera_pose = Some((position, yaw, pitch));
    }
}
