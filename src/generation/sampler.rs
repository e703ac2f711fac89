//! Chunk sampling over the voxel lattice of each chunk.

use glam::IVec3;

use crate::core::Result;
use crate::terrain::classifier::VoxelClassifier;
use crate::voxel::chunk::{Chunk, ChunkCoord, ChunkDims};

/// Anything that can produce a fully populated chunk for a grid coordinate.
pub trait ChunkSource: Send + Sync {
    /// Extents of every chunk this source produces
    fn dims(&self) -> ChunkDims;

    /// Produce the chunk at `coord`. Must be deterministic.
    fn sample_chunk(&self, coord: ChunkCoord) -> Chunk;
}

/// Samples a [`VoxelClassifier`] on the voxel lattice of each chunk.
///
/// Chunk `(cx, cz)` covers world x in `[cx*W, (cx+1)*W)`, z in
/// `[cz*W, (cz+1)*W)` and y in `[-H/2, H/2)`.
#[derive(Clone, Debug)]
pub struct ChunkSampler<C> {
    classifier: C,
    dims: ChunkDims,
}

impl<C: VoxelClassifier> ChunkSampler<C> {
    /// Create a sampler, rejecting extents that cannot be centred on y = 0.
    pub fn new(classifier: C, dims: ChunkDims) -> Result<Self> {
        dims.validate()?;
        Ok(Self { classifier, dims })
    }
}

impl<C: VoxelClassifier> ChunkSource for ChunkSampler<C> {
    fn dims(&self) -> ChunkDims {
        self.dims
    }

    fn sample_chunk(&self, coord: ChunkCoord) -> Chunk {
        let origin = coord.world_origin(self.dims);
        Chunk::from_fn(coord, self.dims, |lx, lz, ly| {
            self.classifier
                .classify(origin + IVec3::new(lx as i32, ly as i32, lz as i32))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::terrain::iceberg::IcebergField;
    use crate::voxel::material::Material;

    /// Encodes the queried position so tests can read it back from the chunk.
    struct Probe;

    impl VoxelClassifier for Probe {
        fn classify(&self, pos: IVec3) -> Material {
            Material((pos.x * 31 + pos.y * 7 + pos.z * 3).rem_euclid(251) as u8)
        }
    }

    #[test]
    fn test_rejects_odd_height() {
        let err = ChunkSampler::new(IcebergField::default(), ChunkDims::new(16, 127)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_chunk_is_complete() {
        let sampler = ChunkSampler::new(IcebergField::default(), ChunkDims::default()).unwrap();
        let chunk = sampler.sample_chunk(ChunkCoord::new(1, 1));

        assert_eq!(chunk.coord(), ChunkCoord::new(1, 1));
        assert_eq!(chunk.materials().len(), 16 * 16 * 128);
        assert!(chunk.materials().iter().all(|m| Material::ALL.contains(m)));
    }

    #[test]
    fn test_local_to_world_mapping() {
        let dims = ChunkDims::default();
        let field = IcebergField::default();
        let sampler = ChunkSampler::new(field.clone(), dims).unwrap();

        for (cx, cz) in [(0, 0), (1, 1), (-1, -1), (-3, 2), (7, -8)] {
            let chunk = sampler.sample_chunk(ChunkCoord::new(cx, cz));
            for lx in 0..dims.width {
                for lz in 0..dims.width {
                    for ly in (0..dims.height).step_by(3) {
                        let world = IVec3::new(
                            cx * 16 + lx as i32,
                            ly as i32 - 64,
                            cz * 16 + lz as i32,
                        );
                        assert_eq!(chunk.get(lx, lz, ly), field.classify(world));
                    }
                }
            }
        }
    }

    #[test]
    fn test_mapping_with_probe_and_small_dims() {
        let dims = ChunkDims::new(4, 6);
        let sampler = ChunkSampler::new(Probe, dims).unwrap();
        let chunk = sampler.sample_chunk(ChunkCoord::new(-2, 5));

        for lx in 0..4 {
            for lz in 0..4 {
                for ly in 0..6 {
                    let world = IVec3::new(-8 + lx as i32, ly as i32 - 3, 20 + lz as i32);
                    assert_eq!(chunk.get(lx, lz, ly), Probe.classify(world));
                }
            }
        }
    }

    #[test]
    fn test_island_chunk_has_all_bands() {
        let sampler = ChunkSampler::new(IcebergField::default(), ChunkDims::default()).unwrap();
        let chunk = sampler.sample_chunk(ChunkCoord::new(1, 1));

        assert!(chunk.count(Material::DIRT) > 0);
        assert!(chunk.count(Material::WATER) > 0);
        assert!(chunk.count(Material::SNOW) > 0);
        assert!(chunk.count(Material::AIR) > 0);
    }

    #[test]
    fn test_open_sea_chunk_is_banded() {
        let sampler = ChunkSampler::new(IcebergField::default(), ChunkDims::default()).unwrap();
        let chunk = sampler.sample_chunk(ChunkCoord::new(0, 0));

        assert_eq!(chunk.count(Material::DIRT), 0);
        let column = chunk.column(0, 0);
        // y = ly - 64: water up to y = -3, snow at -2 and -1, air from 0.
        assert_eq!(column[61], Material::WATER);
        assert_eq!(column[62], Material::SNOW);
        assert_eq!(column[63], Material::SNOW);
        assert_eq!(column[64], Material::AIR);
        assert_eq!(chunk.count(Material::WATER), 16 * 16 * 62);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let sampler = ChunkSampler::new(IcebergField::default(), ChunkDims::default()).unwrap();
        let coord = ChunkCoord::new(-2, 1);
        assert_eq!(sampler.sample_chunk(coord), sampler.sample_chunk(coord));
    }
}
