//! Iceberg island distance field.
//!
//! Coordinates are folded into a repeating 64-voxel tile and jittered with
//! low-frequency sines, then a weighted Manhattan distance to the tile
//! centre carves the solid body. Everything outside the body is banded by
//! altitude into water, a thin snow layer and open air.

use crate::core::types::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use super::classifier::VoxelClassifier;
use crate::voxel::material::Material;

/// Shape parameters of the iceberg field.
///
/// The defaults define the reference island; changing any of them changes
/// the generated world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IcebergParams {
    /// Horizontal repeat period of the island tile
    pub period: f64,
    /// Amplitude of the horizontal sine jitter
    pub jitter_amplitude: f64,
    /// Divisor of z in the x jitter
    pub x_jitter_wavelength: f64,
    /// Divisor of x in the z jitter
    pub z_jitter_wavelength: f64,
    /// Phase of the vertical sine offset
    pub y_phase: f64,
    /// Divisor of x in the vertical offset
    pub y_wavelength_x: f64,
    /// Divisor of z in the vertical offset
    pub y_wavelength_z: f64,
    /// Weight applied to the vertical term of the distance
    pub vertical_weight: f64,
    /// Distance below which a voxel is solid
    pub solid_threshold: f64,
    /// Voxels with y below this are water
    pub water_below: i32,
    /// Voxels with y below this (and not water) are snow
    pub snow_below: i32,
}

impl Default for IcebergParams {
    fn default() -> Self {
        Self {
            period: 64.0,
            jitter_amplitude: 2.0,
            x_jitter_wavelength: 4.7,
            z_jitter_wavelength: 5.9,
            y_phase: 0.75,
            y_wavelength_x: 7.8,
            y_wavelength_z: 9.1,
            vertical_weight: 8.0,
            solid_threshold: 20.0,
            water_below: -2,
            snow_below: 0,
        }
    }
}

/// Fold `v` into `[-period/2, period/2)` around the tile centre.
///
/// Mirrored for negative input, so the field is symmetric about each axis.
#[inline]
pub fn warp(v: f64, period: f64) -> f64 {
    v.abs() % period - period / 2.0
}

/// The iceberg classifier
#[derive(Clone, Debug, Default)]
pub struct IcebergField {
    params: IcebergParams,
}

impl IcebergField {
    pub fn new(params: IcebergParams) -> Self {
        Self { params }
    }

    /// Warped and jittered sample position for a voxel.
    pub fn warped(&self, pos: IVec3) -> DVec3 {
        let p = &self.params;
        let x = pos.x as f64;
        let y = pos.y as f64;
        let z = pos.z as f64;

        DVec3::new(
            warp(x, p.period) + p.jitter_amplitude * (z / p.x_jitter_wavelength).sin(),
            y + (p.y_phase + x / p.y_wavelength_x + z / p.y_wavelength_z).sin(),
            warp(z, p.period) + p.jitter_amplitude * (x / p.z_jitter_wavelength).cos(),
        )
    }

    /// Weighted Manhattan distance from the warped position to the tile centre.
    pub fn distance(&self, pos: IVec3) -> f64 {
        let n = self.warped(pos);
        n.x.abs() + n.z.abs() + (n.y * self.params.vertical_weight).abs()
    }

    /// Material at a world voxel position.
    ///
    /// The solid test runs first: the body overrides the altitude bands at
    /// any height.
    pub fn classify(&self, pos: IVec3) -> Material {
        if self.distance(pos) < self.params.solid_threshold {
            return Material::DIRT;
        }

        if pos.y < self.params.water_below {
            return Material::WATER;
        }
        if pos.y < self.params.snow_below {
            return Material::SNOW;
        }

        Material::AIR
    }
}

impl VoxelClassifier for IcebergField {
    fn classify(&self, pos: IVec3) -> Material {
        IcebergField::classify(self, pos)
    }
}
