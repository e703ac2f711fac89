//! Core type aliases and re-exports

pub use glam::{DVec3, IVec3};

/// Standard Result type for the generator
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
