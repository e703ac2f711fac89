//! Floe - procedural iceberg island generator for chunked voxel worlds

pub mod core;
pub mod voxel;
pub mod terrain;
pub mod generation;
pub mod store;
