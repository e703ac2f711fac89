//! Point classification for chunk sampling.

use crate::core::types::IVec3;

use crate::voxel::material::Material;

/// Trait for 3D voxel classification.
///
/// Implementations must be total and pure: every position maps to a
/// material and repeated calls agree. The sampler relies on this to
/// evaluate chunks on any thread in any order.
pub trait VoxelClassifier: Send + Sync {
    /// Material at a world-space voxel position (y up).
    fn classify(&self, pos: IVec3) -> Material;
}

impl<C: VoxelClassifier + ?Sized> VoxelClassifier for &C {
    fn classify(&self, pos: IVec3) -> Material {
        (**self).classify(pos)
    }
}
