//! # Block Module
//!
//! This module provides the core block-related functionality for the sandbox.
//! It includes the block type catalogue, per-type display appearance, and the
//! compact integer representation used by serialization.

use block_type::BlockType;

pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Display properties for a block type, consumed by the render collaborator.
///
/// The core never interprets these values itself; they ride along with
/// drawable creation requests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockAppearance {
    /// Base display color as linear RGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Opacity factor for translucent types (`None` for fully opaque blocks).
    pub transparency: Option<f32>,
    /// Whether the block occupies space: blocks movement and ray intersection.
    ///
    /// Every entry in the default catalogue is solid, but the model allows
    /// non-solid types so decorative blocks can be added without touching
    /// collision code.
    pub solid: bool,
}

/// Maps each block type to its display appearance.
///
/// The array is indexed by `BlockType` as a `usize`, in catalogue order:
/// [Grass, Dirt, Sand, Water, Stone, Wood, Leaves, Brick, Glass, Planks]
pub static BLOCK_TYPE_TO_APPEARANCE: [BlockAppearance; 10] = [
    BlockAppearance { color: [0.23, 0.62, 0.17], transparency: None, solid: true }, // GRASS
    BlockAppearance { color: [0.55, 0.35, 0.20], transparency: None, solid: true }, // DIRT
    BlockAppearance { color: [0.76, 0.70, 0.50], transparency: None, solid: true }, // SAND
    BlockAppearance { color: [0.31, 0.76, 0.97], transparency: Some(0.8), solid: true }, // WATER
    BlockAppearance { color: [0.50, 0.50, 0.50], transparency: None, solid: true }, // STONE
    BlockAppearance { color: [0.55, 0.33, 0.14], transparency: None, solid: true }, // WOOD
    BlockAppearance { color: [0.13, 0.55, 0.13], transparency: None, solid: true }, // LEAVES
    BlockAppearance { color: [0.70, 0.25, 0.21], transparency: None, solid: true }, // BRICK
    BlockAppearance { color: [0.85, 0.93, 0.95], transparency: Some(0.4), solid: true }, // GLASS
    BlockAppearance { color: [0.72, 0.56, 0.35], transparency: None, solid: true }, // PLANKS
];

/// Gets the appearance for a block type.
///
/// # Arguments
/// * `block_type` - The block type to look up
///
/// # Returns
/// The `BlockAppearance` entry for the given type.
pub fn appearance_of(block_type: BlockType) -> BlockAppearance {
    BLOCK_TYPE_TO_APPEARANCE[block_type as usize]
}
