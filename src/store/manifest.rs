//! World manifest, the file that marks a saved world as complete.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::terrain::iceberg::IcebergParams;
use crate::voxel::chunk::ChunkCoord;
use crate::voxel::material::Material;

/// Manifest file name inside a world directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// World metadata written at save time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldManifest {
    pub name: String,
    pub version: u32,
    pub chunk_width: u32,
    pub chunk_height: u32,
    /// Directory holding chunk files, relative to the world directory
    pub chunk_directory: String,
    pub params: IcebergParams,
    /// Material name to block id
    pub palette: BTreeMap<String, u8>,
    pub chunk_count: usize,
    /// Compressed size of all chunk files
    pub total_bytes: u64,
    /// Placed chunk coordinates, sorted
    pub chunks: Vec<ChunkCoord>,
}

/// Palette of every material the generator emits
pub fn palette() -> BTreeMap<String, u8> {
    Material::ALL
        .iter()
        .filter_map(|m| m.name().map(|name| (name.to_string(), m.id())))
        .collect()
}

/// Read the manifest of a saved world
pub fn read_manifest(world_dir: &Path) -> Result<WorldManifest> {
    let text = std::fs::read_to_string(world_dir.join(MANIFEST_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a manifest into a world directory
pub fn write_manifest(world_dir: &Path, manifest: &WorldManifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(world_dir.join(MANIFEST_FILE), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        let palette = palette();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette["air"], 0);
        assert_eq!(palette["dirt"], 3);
        assert_eq!(palette["water"], 9);
        assert_eq!(palette["snow"], 80);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_manifest(dir.path()).is_err());
    }

    #[test]
    fn test_corrupt_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(matches!(
            read_manifest(dir.path()),
            Err(crate::core::Error::Serialization(_))
        ));
    }
}
