//! # Voxel World Model
//!
//! This module contains the sparse voxel world model:
//!
//! * **Block**: the fixed block-type catalogue and per-type appearance
//! * **Terrain**: pure deterministic generation of heights and columns
//! * **Store**: the authoritative coordinate → block map with provenance
//!   tracking, removal tombstones, and distant-entry eviction
//!
//! ## Data Flow
//!
//! 1. The streamer or an edit asks the store for a coordinate
//! 2. The store answers from memory, or derives the cell from the terrain
//!    generator on first visit
//! 3. Edits overwrite with edited provenance; removals leave tombstones so
//!    removed cells never regenerate

pub mod block;
pub mod store;
pub mod terrain;
