//! Chunk system for fixed-size columns of voxel space

use glam::IVec3;
use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::core::{Error, Result};

/// Default horizontal chunk extent in voxels
pub const CHUNK_WIDTH: u32 = 16;

/// Default vertical chunk extent in voxels. Half of it lies below y = 0.
pub const CHUNK_HEIGHT: u32 = 128;

/// Largest accepted width or height
pub const MAX_CHUNK_EXTENT: u32 = 4096;

/// Voxel extents of a chunk column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkDims {
    pub width: u32,
    pub height: u32,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self {
            width: CHUNK_WIDTH,
            height: CHUNK_HEIGHT,
        }
    }
}

impl ChunkDims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check the extents can be sampled: both non-zero and at most
    /// [`MAX_CHUNK_EXTENT`], height even.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "chunk extents must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if self.width > MAX_CHUNK_EXTENT || self.height > MAX_CHUNK_EXTENT {
            return Err(Error::Config(format!(
                "chunk extents must be at most {} (got {}x{})",
                MAX_CHUNK_EXTENT, self.width, self.height
            )));
        }
        if self.height % 2 != 0 {
            return Err(Error::Config(format!(
                "chunk height must be even (got {})",
                self.height
            )));
        }
        if self.checked_volume().is_none() {
            return Err(Error::Config(format!(
                "chunk {}x{}x{} does not fit in memory",
                self.width, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of cells in one chunk, or `None` if it overflows `usize`
    pub fn checked_volume(&self) -> Option<usize> {
        let w = self.width as usize;
        w.checked_mul(w)?.checked_mul(self.height as usize)
    }

    /// Number of cells in one chunk. Dims must have passed [`validate`](Self::validate).
    pub fn volume(&self) -> usize {
        self.width as usize * self.width as usize * self.height as usize
    }

    /// Vertical offset between local `ly` and world `y`
    pub fn half_height(&self) -> i32 {
        (self.height / 2) as i32
    }

    /// Flatten a local position to a buffer index.
    ///
    /// Columns are contiguous: `lx * W * H + lz * H + ly`.
    #[inline]
    pub fn index(&self, lx: u32, lz: u32, ly: u32) -> usize {
        let w = self.width as usize;
        let h = self.height as usize;
        lx as usize * w * h + lz as usize * h + ly as usize
    }
}

/// Integer coordinate identifying a chunk column in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space voxel position of the chunk's minimum corner.
    ///
    /// Valid for validated dims and coords whose voxel span fits in `i32`.
    /// [`WorldExtent::validate_span`](crate::generation::WorldExtent::validate_span)
    /// enforces this for generated grids.
    pub fn world_origin(&self, dims: ChunkDims) -> IVec3 {
        let w = dims.width as i32;
        IVec3::new(self.x * w, -dims.half_height(), self.z * w)
    }

    /// World-space voxel position of a local cell in this chunk
    #[inline]
    pub fn world_pos(&self, dims: ChunkDims, lx: u32, lz: u32, ly: u32) -> IVec3 {
        self.world_origin(dims) + IVec3::new(lx as i32, ly as i32, lz as i32)
    }
}

/// A fully populated column of materials.
///
/// There is no way to build a chunk with unset cells: the buffer length is
/// checked against the dims on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    dims: ChunkDims,
    materials: Vec<Material>,
}

impl Chunk {
    /// Wrap a flat buffer laid out by [`ChunkDims::index`].
    pub fn from_materials(coord: ChunkCoord, dims: ChunkDims, materials: Vec<Material>) -> Result<Self> {
        if materials.len() != dims.volume() {
            return Err(Error::InvalidChunk(format!(
                "chunk ({}, {}) has {} cells, expected {} for {}x{}x{}",
                coord.x,
                coord.z,
                materials.len(),
                dims.volume(),
                dims.width,
                dims.width,
                dims.height
            )));
        }
        Ok(Self { coord, dims, materials })
    }

    /// Build a chunk by evaluating `f(lx, lz, ly)` once per cell.
    ///
    /// Cells are visited in buffer order (x, then z, then y innermost), so
    /// the buffer is filled by appending and every cell is written once.
    pub fn from_fn(coord: ChunkCoord, dims: ChunkDims, mut f: impl FnMut(u32, u32, u32) -> Material) -> Self {
        let mut materials = Vec::with_capacity(dims.volume());
        for lx in 0..dims.width {
            for lz in 0..dims.width {
                for ly in 0..dims.height {
                    materials.push(f(lx, lz, ly));
                }
            }
        }
        debug_assert_eq!(materials.len(), dims.volume());
        Self { coord, dims, materials }
    }

    /// Chunk filled with a single material
    pub fn filled(coord: ChunkCoord, dims: ChunkDims, material: Material) -> Self {
        Self {
            coord,
            dims,
            materials: vec![material; dims.volume()],
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Material at a local position
    ///
    /// Panics if the position lies outside the chunk.
    #[inline]
    pub fn get(&self, lx: u32, lz: u32, ly: u32) -> Material {
        assert!(
            lx < self.dims.width && lz < self.dims.width && ly < self.dims.height,
            "local position ({lx}, {lz}, {ly}) outside chunk"
        );
        self.materials[self.dims.index(lx, lz, ly)]
    }

    /// Bottom-to-top materials of one column
    pub fn column(&self, lx: u32, lz: u32) -> &[Material] {
        let start = self.dims.index(lx, lz, 0);
        &self.materials[start..start + self.dims.height as usize]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Raw block ids in buffer order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.materials)
    }

    /// Number of cells holding `material`
    pub fn count(&self, material: Material) -> usize {
        self.materials.iter().filter(|&&m| m == material).count()
    }

    /// True when every cell holds the same material
    pub fn is_uniform(&self) -> bool {
        match self.materials.first() {
            Some(&first) => self.materials.iter().all(|&m| m == first),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dims() {
        let dims = ChunkDims::default();
        assert_eq!(dims.width, 16);
        assert_eq!(dims.height, 128);
        assert_eq!(dims.volume(), 16 * 16 * 128);
        assert!(dims.validate().is_ok());
    }

    #[test]
    fn test_dims_validation() {
        assert!(ChunkDims::new(0, 128).validate().is_err());
        assert!(ChunkDims::new(16, 0).validate().is_err());
        assert!(matches!(ChunkDims::new(16, 127).validate(), Err(Error::Config(_))));
        assert!(ChunkDims::new(1, 2).validate().is_ok());
        assert!(ChunkDims::new(MAX_CHUNK_EXTENT, 2).validate().is_ok());
    }

    #[test]
    fn test_oversized_dims_rejected() {
        assert!(matches!(ChunkDims::new(u32::MAX, 2).validate(), Err(Error::Config(_))));
        assert!(matches!(ChunkDims::new(16, MAX_CHUNK_EXTENT + 2).validate(), Err(Error::Config(_))));
        assert_eq!(ChunkDims::new(16, 128).checked_volume(), Some(16 * 16 * 128));
    }

    #[test]
    fn test_index_layout() {
        let dims = ChunkDims::new(4, 8);
        assert_eq!(dims.index(0, 0, 0), 0);
        assert_eq!(dims.index(0, 0, 7), 7);
        assert_eq!(dims.index(0, 1, 0), 8);
        assert_eq!(dims.index(1, 0, 0), 32);
        assert_eq!(dims.index(3, 3, 7), dims.volume() - 1);
    }

    #[test]
    fn test_world_origin() {
        let dims = ChunkDims::default();
        assert_eq!(ChunkCoord::new(0, 0).world_origin(dims), IVec3::new(0, -64, 0));
        assert_eq!(ChunkCoord::new(-1, 2).world_origin(dims), IVec3::new(-16, -64, 32));
    }

    #[test]
    fn test_world_pos() {
        let dims = ChunkDims::default();
        let coord = ChunkCoord::new(-2, 3);
        assert_eq!(coord.world_pos(dims, 5, 6, 70), IVec3::new(-27, 6, 54));
        assert_eq!(coord.world_pos(dims, 15, 15, 127), IVec3::new(-17, 63, 63));
    }

    #[test]
    fn test_from_materials_rejects_wrong_length() {
        let dims = ChunkDims::new(2, 4);
        let short = vec![Material::AIR; dims.volume() - 1];
        let err = Chunk::from_materials(ChunkCoord::new(0, 0), dims, short).unwrap_err();
        assert!(matches!(err, Error::InvalidChunk(_)));
    }

    #[test]
    fn test_get_and_column() {
        let dims = ChunkDims::new(2, 4);
        let cells: Vec<Material> = (0..dims.volume() as u8).map(Material).collect();
        let chunk = Chunk::from_materials(ChunkCoord::new(1, 1), dims, cells).unwrap();

        assert_eq!(chunk.get(1, 0, 2), Material(10));
        assert_eq!(chunk.column(0, 1), &[Material(4), Material(5), Material(6), Material(7)]);
        assert_eq!(chunk.as_bytes()[15], 15);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds() {
        let chunk = Chunk::filled(ChunkCoord::new(0, 0), ChunkDims::new(2, 4), Material::AIR);
        chunk.get(0, 2, 0);
    }

    #[test]
    fn test_from_fn_visits_in_buffer_order() {
        let dims = ChunkDims::new(3, 4);
        let mut visited = Vec::new();
        let chunk = Chunk::from_fn(ChunkCoord::new(0, 0), dims, |lx, lz, ly| {
            visited.push(dims.index(lx, lz, ly));
            Material((lx * 100 + lz * 10 + ly) as u8)
        });

        assert_eq!(visited, (0..dims.volume()).collect::<Vec<_>>());
        assert_eq!(chunk.get(2, 1, 3), Material(213));
    }

    #[test]
    fn test_filled_and_count() {
        let dims = ChunkDims::new(2, 4);
        let chunk = Chunk::filled(ChunkCoord::new(0, 0), dims, Material::WATER);
        assert!(chunk.is_uniform());
        assert_eq!(chunk.count(Material::WATER), dims.volume());
        assert_eq!(chunk.count(Material::DIRT), 0);
    }
}
