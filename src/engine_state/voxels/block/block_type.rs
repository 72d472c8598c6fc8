//! # Block Type Module
//!
//! This module defines the different types of blocks in the sandbox world.
//! It provides functionality for block type identification, integer and name
//! conversion, and solidity queries.
//!
//! "Empty" is deliberately not a variant: absence of a block is represented by
//! a coordinate's absence from the store, never by a sentinel enumerant.

use num_derive::FromPrimitive;

use super::{appearance_of, BlockAppearance, BlockTypeSize};

/// Enumerates all block types in the sandbox world, in catalogue order.
///
/// The `FromPrimitive` derive allows conversion from the compact
/// `BlockTypeSize` integer form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// A grass block, the surface of dry terrain above the water line.
    GRASS,

    /// A basic dirt block, filling everything below the surface.
    DIRT,

    /// A sand block, the surface cell exactly at the water line.
    SAND,

    /// A translucent water block filling columns up to the water level.
    WATER,

    /// A stone block, the surface of high terrain.
    STONE,

    /// A wooden block with a bark-brown color.
    WOOD,

    /// A leaf block.
    LEAVES,

    /// A brick block.
    BRICK,

    /// A translucent glass block.
    GLASS,

    /// A plank block.
    PLANKS,
}

/// Maps serialized block names to block types.
///
/// Used by the persistence module when bulk-loading worlds; unknown names are
/// skipped there rather than rejected wholesale.
pub static BLOCK_TYPE_FROM_NAME: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "grass" => BlockType::GRASS,
    "dirt" => BlockType::DIRT,
    "sand" => BlockType::SAND,
    "water" => BlockType::WATER,
    "stone" => BlockType::STONE,
    "wood" => BlockType::WOOD,
    "leaves" => BlockType::LEAVES,
    "brick" => BlockType::BRICK,
    "glass" => BlockType::GLASS,
    "planks" => BlockType::PLANKS,
};

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value doesn't map to a
    /// catalogue entry (malformed persisted data takes this path).
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Looks up a block type from its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPE_FROM_NAME.get(name).copied()
    }

    /// The serialized name of this block type.
    pub fn name(&self) -> &'static str {
        match self {
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::SAND => "sand",
            BlockType::WATER => "water",
            BlockType::STONE => "stone",
            BlockType::WOOD => "wood",
            BlockType::LEAVES => "leaves",
            BlockType::BRICK => "brick",
            BlockType::GLASS => "glass",
            BlockType::PLANKS => "planks",
        }
    }

    /// Whether this block type occupies space (blocks movement and rays).
    pub fn is_solid(&self) -> bool {
        appearance_of(*self).solid
    }

    /// The display appearance for this block type.
    pub fn appearance(&self) -> BlockAppearance {
        appearance_of(*self)
    }
}
