//! In-memory world container

use super::chunk::{Chunk, ChunkCoord};
use crate::core::{Error, Result};
use crate::store::WorldStore;
use std::collections::HashMap;

/// World held entirely in memory.
///
/// Applies the same placement rules as the on-disk store, which makes it the
/// store of choice for tests and for callers that post-process chunks.
pub struct MemoryWorld {
    name: String,
    /// Map from chunk coordinates to placed chunks
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Coordinates in placement order
    placement_order: Vec<ChunkCoord>,
    save_count: usize,
}

impl MemoryWorld {
    /// Create a new empty world
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunks: HashMap::new(),
            placement_order: Vec::new(),
            save_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get immutable reference to a chunk by coordinate
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Get the number of placed chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Coordinates in the order chunks were placed
    pub fn placement_order(&self) -> &[ChunkCoord] {
        &self.placement_order
    }

    /// Number of times `save` succeeded
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl WorldStore for MemoryWorld {
    fn place_chunk(&mut self, chunk: Chunk) -> Result<()> {
        if self.save_count > 0 {
            return Err(Error::AlreadySaved);
        }
        let coord = chunk.coord();
        if self.chunks.contains_key(&coord) {
            return Err(Error::DuplicateChunk { x: coord.x, z: coord.z });
        }
        self.chunks.insert(coord, chunk);
        self.placement_order.push(coord);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.save_count > 0 {
            return Err(Error::AlreadySaved);
        }
        self.save_count += 1;
        log::debug!("Saved in-memory world '{}' ({} chunks)", self.name, self.chunks.len());
        Ok(())
    }
}
