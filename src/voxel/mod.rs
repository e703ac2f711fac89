//! Voxel data structures

pub mod material;
pub mod chunk;
pub mod world;

pub use material::Material;
pub use chunk::{Chunk, ChunkCoord, ChunkDims, CHUNK_HEIGHT, CHUNK_WIDTH, MAX_CHUNK_EXTENT};
pub use world::MemoryWorld;
