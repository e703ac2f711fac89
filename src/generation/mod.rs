//! World generation pipeline: samples chunks and hands them to a world store.
//!
//! The pipeline orchestrates:
//! 1. Chunk sampling of the iceberg field (row by row, optionally parallel)
//! 2. Serial placement of each row into the store, in column order
//! 3. A single save once every chunk is placed

pub mod config;
pub mod sampler;

pub use config::{GenerationConfig, WorldExtent};
pub use sampler::{ChunkSampler, ChunkSource};

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::core::{Error, Result};
use crate::store::WorldStore;
use crate::terrain::iceberg::IcebergField;
use crate::voxel::chunk::{Chunk, ChunkCoord};
use crate::voxel::material::Material;

/// Summary of a completed generation run.
#[derive(Clone, Debug)]
pub struct GenerationReport {
    /// Chunks handed to the store
    pub chunks_placed: usize,
    /// Rows processed
    pub rows: usize,
    /// Cell count per material over the whole world
    pub histogram: BTreeMap<Material, u64>,
    /// Wall time from the first sample to the end of the save
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Cells of `material` in the generated world
    pub fn cells(&self, material: Material) -> u64 {
        self.histogram.get(&material).copied().unwrap_or(0)
    }
}

/// Iceberg world generator built from a [`GenerationConfig`].
pub struct GenerationPipeline {
    sampler: ChunkSampler<IcebergField>,
    extent: WorldExtent,
    pool: Option<rayon::ThreadPool>,
}

impl GenerationPipeline {
    /// Create a new pipeline from configuration.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        config.validate()?;

        let sampler = ChunkSampler::new(IcebergField::new(config.params.clone()), config.dims)?;
        let pool = if config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.jobs)
                .thread_name(|i| format!("floe-sampler-{i}"))
                .build()
                .map_err(|e| Error::ThreadPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            sampler,
            extent: config.extent,
            pool,
        })
    }

    pub fn sampler(&self) -> &ChunkSampler<IcebergField> {
        &self.sampler
    }

    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Sample a single chunk.
    pub fn sample_chunk(&self, coord: ChunkCoord) -> Chunk {
        self.sampler.sample_chunk(coord)
    }

    /// Generate the whole world into `store` and save it.
    pub fn generate<W: WorldStore + ?Sized>(&self, store: &mut W) -> Result<GenerationReport> {
        generate(&self.sampler, store, self.extent, self.pool.as_ref())
    }
}

/// Sample every chunk of `extent` from `source`, place each into `store`,
/// then save the store once.
///
/// With a pool, each row is sampled in parallel; placement always happens on
/// the calling thread in row-major order. The first store error aborts the
/// run and the store is left unsaved.
pub fn generate<S, W>(
    source: &S,
    store: &mut W,
    extent: WorldExtent,
    pool: Option<&rayon::ThreadPool>,
) -> Result<GenerationReport>
where
    S: ChunkSource + ?Sized,
    W: WorldStore + ?Sized,
{
    extent.validate()?;
    extent.validate_span(source.dims())?;

    let start = Instant::now();
    let rows = extent.rows().len();
    let mut counts = [0u64; 256];
    let mut chunks_placed = 0;

    log::info!(
        "Generating {} chunks ({} rows, {}x{} voxels each)...",
        extent.chunk_count(),
        rows,
        source.dims().width,
        source.dims().height
    );

    for (i, row) in extent.rows().enumerate() {
        log::info!("Generating row {} ({}/{})", row, i + 1, rows);

        let coords: Vec<ChunkCoord> = extent.row(row).collect();
        let chunks: Vec<Chunk> = match pool {
            Some(pool) => pool.install(|| {
                coords.par_iter().map(|&coord| source.sample_chunk(coord)).collect()
            }),
            None => coords.iter().map(|&coord| source.sample_chunk(coord)).collect(),
        };

        for chunk in chunks {
            for &m in chunk.materials() {
                counts[m.id() as usize] += 1;
            }
            store.place_chunk(chunk)?;
            chunks_placed += 1;
        }
    }

    store.save()?;

    let elapsed = start.elapsed();
    log::info!(
        "Generated {} chunks in {:.2}s ({:.0} chunks/sec)",
        chunks_placed,
        elapsed.as_secs_f64(),
        chunks_placed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    let histogram = counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(id, &n)| (Material(id as u8), n))
        .collect();

    Ok(GenerationReport {
        chunks_placed,
        rows,
        histogram,
        elapsed,
    })
}
