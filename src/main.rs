use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use soilgrid::{config::GridConfig, export::JsonExportSink, logging::init_logging, GridBuilder};

#[derive(Debug, Parser)]
#[command(author, version, about = "Seeded soil/vegetation tile grid generator")]
struct Cli {
    /// Path to a grid YAML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column count (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Row count (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Tile edge length
    #[arg(long)]
    side_length: Option<f32>,

    /// Spacing between tiles
    #[arg(long)]
    gap: Option<f32>,

    /// Sampling attempts per tile before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Directory for the JSON export
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "soilgrid=trace"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<GridConfig> {
        let mut config = match &self.config {
            Some(path) => GridConfig::from_yaml(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GridConfig::new(16, 9, 0),
        };
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if let Some(side_length) = self.side_length {
            config.grid.side_length = side_length;
        }
        if let Some(gap) = self.gap {
            config.grid.gap = gap;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(dir) = &self.export_dir {
            config.export.output_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config.validate().context("Invalid grid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(&config.logging);

    let builder = GridBuilder::from_config(&config)?;
    let generated = builder
        .generate(config.random_seed)
        .with_context(|| format!("Failed to generate grid '{}'", config.name))?;

    if let Some(dir) = &config.export.output_dir {
        let mut sink = JsonExportSink::new(
            dir,
            &config.name,
            config.random_seed,
            config.grid.width,
            config.grid.height,
        );
        let report = generated.emit_into(&mut sink);
        if !report.is_clean() {
            warn!(failed = report.failed.len(), "some tiles were not exported");
        }
        let path = sink.finish().context("Failed to write export")?;
        info!(path = %path.display(), "export written");
    }

    let frame = generated.camera_frame();
    println!(
        "Grid '{}' ({}x{}, seed {}) generated.",
        config.name, config.grid.width, config.grid.height, config.random_seed
    );
    println!(
        "Camera focal point: ({:.3}, {:.3}, {:.1})",
        frame.focal_x, frame.focal_y, frame.depth
    );
    print!("{}", generated.summary());
    Ok(())
}
