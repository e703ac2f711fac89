//! World generator binary: generates the iceberg island and saves it to disk.
//!
//! Usage: cargo run --release --bin generate_world
//!
//! Takes no arguments. Log verbosity follows RUST_LOG (default: info).
//!
//! Output structure:
//!   output/nuclai.world/
//!     manifest.json           # World metadata + placed chunk list
//!     chunks/
//!       chunk_-8_-8.flc
//!       ...

use std::path::Path;
use std::process::ExitCode;

use floe::core::Result;
use floe::generation::{GenerationConfig, GenerationPipeline};
use floe::store::DiskWorld;
use floe::voxel::Material;

const OUTPUT_DIR: &str = "output";
const WORLD_NAME: &str = "nuclai.world";

fn main() -> ExitCode {
    floe::core::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Generation failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = GenerationConfig::default();
    let pipeline = GenerationPipeline::new(&config)?;

    let output_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(output_dir)?;

    println!("=== Floe World Generator ===");
    println!("World:  {}", WORLD_NAME);
    println!("Grid:   {} x {} chunks", config.extent.x * 2, config.extent.z * 2);
    println!("Chunk:  {} x {} x {}", config.dims.width, config.dims.width, config.dims.height);
    println!("Jobs:   {} parallel", config.jobs);
    println!("Output: {}", output_dir.join(WORLD_NAME).display());
    println!();

    let mut world = DiskWorld::create(output_dir, WORLD_NAME, config.dims, config.params.clone())?;
    let report = pipeline.generate(&mut world)?;

    println!();
    println!("=== Generation Complete ===");
    println!("Chunks: {}", report.chunks_placed);
    for material in Material::ALL {
        println!("  {:<6} {:>10} voxels", material.to_string(), report.cells(material));
    }
    println!("Size:   {:.1} KB on disk", world.total_bytes() as f64 / 1024.0);
    println!("Processing took {:.3} seconds.", report.elapsed.as_secs_f64());

    Ok(())
}
