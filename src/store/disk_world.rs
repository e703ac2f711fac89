//! On-disk world store.
//!
//! Layout:
//!   <base_dir>/<name>/
//!     manifest.json           # Written by `save`; absent until then
//!     chunks/
//!       chunk_<x>_<z>.flc     # LZ4-compressed rkyv chunk data
//!       ...

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::disk_io::{self, CHUNK_EXTENSION};
use super::manifest::{self, WorldManifest, FORMAT_VERSION, MANIFEST_FILE};
use super::WorldStore;
use crate::core::{Error, Result};
use crate::terrain::iceberg::IcebergParams;
use crate::voxel::chunk::{Chunk, ChunkCoord, ChunkDims};

/// Chunk directory name inside a world directory
pub const CHUNK_DIR: &str = "chunks";

/// World store that writes each chunk as it is placed and the manifest on save.
#[derive(Debug)]
pub struct DiskWorld {
    name: String,
    root: PathBuf,
    dims: ChunkDims,
    params: IcebergParams,
    placed: BTreeSet<ChunkCoord>,
    total_bytes: u64,
    saved: bool,
}

impl DiskWorld {
    /// Create the world directory `<base_dir>/<name>` and its chunk directory.
    ///
    /// An existing world at that path is cleared first: its manifest and chunk
    /// files are removed, so the directory holds no finished world until
    /// `save`. Fails if the directories cannot be created or cleared.
    pub fn create(base_dir: &Path, name: &str, dims: ChunkDims, params: IcebergParams) -> Result<Self> {
        dims.validate()?;
        if name.is_empty() {
            return Err(Error::Config("world name must not be empty".to_string()));
        }

        let root = base_dir.join(name);
        let chunk_dir = root.join(CHUNK_DIR);
        std::fs::create_dir_all(&chunk_dir)?;
        clear_world(&root, &chunk_dir)?;
        log::info!("Created world '{}' at {}", name, root.display());

        Ok(Self {
            name: name.to_string(),
            root,
            dims,
            params,
            placed: BTreeSet::new(),
            total_bytes: 0,
            saved: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the chunk files
    pub fn chunk_dir(&self) -> PathBuf {
        self.root.join(CHUNK_DIR)
    }

    pub fn chunk_count(&self) -> usize {
        self.placed.len()
    }

    /// Compressed bytes written so far
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    fn manifest(&self) -> WorldManifest {
        WorldManifest {
            name: self.name.clone(),
            version: FORMAT_VERSION,
            chunk_width: self.dims.width,
            chunk_height: self.dims.height,
            chunk_directory: CHUNK_DIR.to_string(),
            params: self.params.clone(),
            palette: manifest::palette(),
            chunk_count: self.placed.len(),
            total_bytes: self.total_bytes,
            chunks: self.placed.iter().copied().collect(),
        }
    }
}

/// Remove the manifest and chunk files a previous run left behind.
fn clear_world(root: &Path, chunk_dir: &Path) -> Result<()> {
    match std::fs::remove_file(root.join(MANIFEST_FILE)) {
        Ok(()) => log::info!("Removed previous manifest in {}", root.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(chunk_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == CHUNK_EXTENSION) {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    if removed > 0 {
        log::info!("Removed {} stale chunk files from {}", removed, chunk_dir.display());
    }

    Ok(())
}

impl WorldStore for DiskWorld {
    fn place_chunk(&mut self, chunk: Chunk) -> Result<()> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }

        let coord = chunk.coord();
        if chunk.dims() != self.dims {
            return Err(Error::InvalidChunk(format!(
                "chunk ({}, {}) is {}x{}, world expects {}x{}",
                coord.x,
                coord.z,
                chunk.dims().width,
                chunk.dims().height,
                self.dims.width,
                self.dims.height
            )));
        }
        if self.placed.contains(&coord) {
            return Err(Error::DuplicateChunk { x: coord.x, z: coord.z });
        }

        let written = disk_io::write_chunk(&self.chunk_dir(), &chunk)?;
        self.total_bytes += written as u64;
        self.placed.insert(coord);
        log::debug!("Wrote chunk ({}, {}) ({} bytes)", coord.x, coord.z, written);

        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }

        manifest::write_manifest(&self.root, &self.manifest())?;
        self.saved = true;

        log::info!(
            "Saved world '{}': {} chunks, {:.1} KB",
            self.name,
            self.placed.len(),
            self.total_bytes as f64 / 1024.0
        );
        Ok(())
    }
}
