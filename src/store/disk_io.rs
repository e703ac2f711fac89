//! Chunk serialization and disk I/O

use crate::core::{Error, Result};
use crate::voxel::chunk::{Chunk, ChunkCoord, ChunkDims};
use crate::voxel::material::Material;
use rkyv::{Archive, Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extension of compressed chunk files
pub const CHUNK_EXTENSION: &str = "flc";

/// Serializable chunk data
///
/// Materials are stored as their raw block ids in the in-memory layout
/// (`lx * W * H + lz * H + ly`), so readers can index them directly.
#[derive(Archive, Deserialize, Serialize)]
pub struct ChunkData {
    pub coord_x: i32,
    pub coord_z: i32,
    pub width: u32,
    pub height: u32,
    pub materials: Vec<u8>,
}

/// Serialize a chunk to bytes (uncompressed)
pub fn serialize_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
    let dims = chunk.dims();
    let data = ChunkData {
        coord_x: chunk.coord().x,
        coord_z: chunk.coord().z,
        width: dims.width,
        height: dims.height,
        materials: chunk.as_bytes().to_vec(),
    };

    let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&data)
        .map_err(|e| Error::Serialization(e.to_string()))?;

    Ok(bytes.to_vec())
}

/// Deserialize a chunk from bytes (uncompressed)
pub fn deserialize_chunk(data: &[u8]) -> Result<Chunk> {
    // Archived fields need their natural alignment
    let mut aligned = rkyv::util::AlignedVec::<16>::with_capacity(data.len());
    aligned.extend_from_slice(data);

    let archived = rkyv::access::<ArchivedChunkData, rkyv::rancor::Error>(&aligned)
        .map_err(|e| Error::Serialization(e.to_string()))?;

    let chunk_data: ChunkData = rkyv::deserialize::<ChunkData, rkyv::rancor::Error>(archived)
        .map_err(|e| Error::Serialization(e.to_string()))?;

    let dims = ChunkDims::new(chunk_data.width, chunk_data.height);
    dims.validate()
        .map_err(|e| Error::InvalidChunk(e.to_string()))?;

    let coord = ChunkCoord::new(chunk_data.coord_x, chunk_data.coord_z);
    let materials: Vec<Material> = bytemuck::cast_slice(&chunk_data.materials).to_vec();

    Chunk::from_materials(coord, dims, materials)
}

/// Compress a serialized chunk using LZ4
pub fn compress_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
    let serialized = serialize_chunk(chunk)?;
    Ok(lz4_flex::compress_prepend_size(&serialized))
}

/// Decompress and deserialize a chunk
pub fn decompress_chunk(data: &[u8]) -> Result<Chunk> {
    let decompressed = lz4_flex::decompress_size_prepended(data)
        .map_err(|e| Error::Serialization(format!("LZ4 decompression failed: {}", e)))?;
    deserialize_chunk(&decompressed)
}

/// Get the file path for a chunk
pub fn chunk_path(chunk_dir: &Path, coord: ChunkCoord) -> PathBuf {
    chunk_dir.join(format!("chunk_{}_{}.{}", coord.x, coord.z, CHUNK_EXTENSION))
}

/// Write a chunk to disk (compressed), returning the number of bytes written
pub fn write_chunk(chunk_dir: &Path, chunk: &Chunk) -> Result<usize> {
    let path = chunk_path(chunk_dir, chunk.coord());
    let compressed = compress_chunk(chunk)?;
    std::fs::write(&path, &compressed)?;
    Ok(compressed.len())
}

/// Load a chunk from disk (if it exists)
pub fn load_chunk(chunk_dir: &Path, coord: ChunkCoord) -> Result<Option<Chunk>> {
    let path = chunk_path(chunk_dir, coord);

    if !path.exists() {
        return Ok(None);
    }

    let compressed = std::fs::read(&path)?;
    let chunk = decompress_chunk(&compressed)?;

    if chunk.coord() != coord {
        return Err(Error::InvalidChunk(format!(
            "{} holds chunk ({}, {})",
            path.display(),
            chunk.coord().x,
            chunk.coord().z
        )));
    }

    Ok(Some(chunk))
}
