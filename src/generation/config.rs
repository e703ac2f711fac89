//! Generation configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::terrain::iceberg::IcebergParams;
use crate::voxel::chunk::{ChunkCoord, ChunkDims};

/// Half-extent of the chunk grid.
///
/// Rows run over `[-x, x)` and columns over `[-z, z)`, so the default
/// extent of 8 gives a 16 x 16 grid centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldExtent {
    pub x: i32,
    pub z: i32,
}

impl Default for WorldExtent {
    fn default() -> Self {
        Self { x: 8, z: 8 }
    }
}

impl WorldExtent {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk rows in generation order
    pub fn rows(&self) -> std::ops::Range<i32> {
        -self.x..self.x
    }

    /// Coordinates of one row in column order
    pub fn row(&self, row: i32) -> impl Iterator<Item = ChunkCoord> + use<> {
        (-self.z..self.z).map(move |col| ChunkCoord::new(row, col))
    }

    /// Every coordinate, row-major
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + use<> {
        let ext = *self;
        ext.rows().flat_map(move |row| ext.row(row))
    }

    /// Total number of chunks in the grid
    pub fn chunk_count(&self) -> usize {
        (2 * self.x.max(0) as usize) * (2 * self.z.max(0) as usize)
    }

    pub fn validate(&self) -> Result<()> {
        if self.x < 0 || self.z < 0 {
            return Err(Error::Config(format!(
                "world extent must be non-negative (got {} x {})",
                self.x, self.z
            )));
        }
        Ok(())
    }

    /// Check that voxel x and z of every cell in the grid fit in `i32`.
    pub fn validate_span(&self, dims: ChunkDims) -> Result<()> {
        let span = self.x.max(self.z) as i64 * dims.width as i64;
        if span > i32::MAX as i64 {
            return Err(Error::Config(format!(
                "world extent {} x {} with chunk width {} exceeds the voxel coordinate range",
                self.x, self.z, dims.width
            )));
        }
        Ok(())
    }
}

/// Configuration for the generation pipeline.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Chunk extents in voxels.
    pub dims: ChunkDims,
    /// Chunk grid half-extent.
    pub extent: WorldExtent,
    /// Iceberg shape parameters.
    pub params: IcebergParams,
    /// Worker threads used for sampling. 1 samples on the calling thread.
    pub jobs: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            dims: ChunkDims::default(),
            extent: WorldExtent::default(),
            params: IcebergParams::default(),
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl GenerationConfig {
    /// Sequential configuration over the given extent with default shape.
    pub fn with_extent(extent: WorldExtent) -> Self {
        Self {
            extent,
            jobs: 1,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.dims.validate()?;
        self.extent.validate()?;
        self.extent.validate_span(self.dims)?;
        if self.jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        Ok(())
    }
}
