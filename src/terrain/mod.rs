//! Terrain classification

pub mod classifier;
pub mod iceberg;

pub use classifier::VoxelClassifier;
pub use iceberg::{IcebergField, IcebergParams};
