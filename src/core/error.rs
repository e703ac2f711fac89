//! Error types for world generation

use thiserror::Error;

/// Main error type for the generator
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Chunk ({x}, {z}) has already been placed")]
    DuplicateChunk { x: i32, z: i32 },

    #[error("Invalid chunk: {0}")]
    InvalidChunk(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("World has already been saved")]
    AlreadySaved,

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
