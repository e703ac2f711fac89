//! Material ids stored in chunk cells

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Block material - exactly 1 byte.
///
/// Ids follow the classic block table used by the host that renders the
/// saved world, so the raw byte is written to disk unchanged.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Material(pub u8);

impl Material {
    pub const AIR: Self = Self(0);
    pub const DIRT: Self = Self(3);
    pub const WATER: Self = Self(9);
    pub const SNOW: Self = Self(80);

    /// Every material the generator can emit
    pub const ALL: [Material; 4] = [Self::AIR, Self::WATER, Self::SNOW, Self::DIRT];

    /// Raw block id
    pub fn id(self) -> u8 {
        self.0
    }

    /// Human readable name, `None` for ids outside the palette
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::AIR => Some("air"),
            Self::DIRT => Some("dirt"),
            Self::WATER => Some("water"),
            Self::SNOW => Some("snow"),
            _ => None,
        }
    }

    /// Whether this id belongs to the generator's palette
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Material>(), 1);
    }

    #[test]
    fn test_default_is_air() {
        assert_eq!(Material::default(), Material::AIR);
        assert!(Material::default().is_air());
    }

    #[test]
    fn test_palette_ids_are_distinct() {
        let mut ids: Vec<u8> = Material::ALL.iter().map(|m| m.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Material::ALL.len());
        assert!(Material::ALL.iter().all(|m| m.is_known()));
    }

    #[test]
    fn test_unknown_id() {
        let m = Material(200);
        assert!(!m.is_known());
        assert_eq!(m.to_string(), "unknown(200)");
        assert_eq!(Material::SNOW.to_string(), "snow");
    }

    #[test]
    fn test_cast_slice() {
        let cells = [Material::DIRT, Material::WATER];
        let bytes: &[u8] = bytemuck::cast_slice(&cells);
        assert_eq!(bytes, &[3, 9]);
    }
}
