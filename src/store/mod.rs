//! World persistence for finished chunks.

pub mod disk_io;
pub mod manifest;
pub mod disk_world;

pub use disk_io::{
    ChunkData,
    serialize_chunk, deserialize_chunk,
    compress_chunk, decompress_chunk,
    chunk_path, load_chunk,
};
pub use manifest::{WorldManifest, read_manifest, MANIFEST_FILE};
pub use disk_world::DiskWorld;

use crate::core::Result;
use crate::voxel::chunk::Chunk;

/// Receiver of generated chunks.
///
/// A store is created once per run, receives each chunk exactly once, and
/// is saved once at the end. Placing a coordinate twice, placing after the
/// save, or saving twice are errors.
pub trait WorldStore {
    /// Take ownership of a fully populated chunk at its own coordinate.
    fn place_chunk(&mut self, chunk: Chunk) -> Result<()>;

    /// Finalize every placement made so far.
    fn save(&mut self) -> Result<()>;
}
