use rand::Rng;
use tracing::{info, warn};

use crate::assigner::AttributeAssigner;
use crate::config::GridConfig;
use crate::error::GenerationError;
use crate::grid::{Grid, GridCoordinate, TileState};
use crate::layout::{CameraFrame, GridExtents, HexLayout};
use crate::rng::{stream_rng, ATTRIBUTE_STREAM};
use crate::sink::{CameraFramer, EmitReport, TileRecord, TileSink};
use crate::summary::GridSummary;

/// Lays out and fills a `width` x `height` grid in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder {
    width: u32,
    height: u32,
    layout: HexLayout,
    assigner: AttributeAssigner,
}

impl GridBuilder {
    pub fn new(
        width: u32,
        height: u32,
        side_length: f32,
        gap: f32,
    ) -> Result<Self, GenerationError> {
        let config = GridConfig::new(width, height, 0).with_spacing(side_length, gap);
        Self::from_config(&config)
    }

    /// Rejects invalid settings before any tile is generated.
    pub fn from_config(config: &GridConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            width: config.grid.width,
            height: config.grid.height,
            layout: HexLayout::new(config.grid.side_length, config.grid.gap),
            assigner: AttributeAssigner::new(config.max_attempts),
        })
    }

    pub fn with_assigner(mut self, assigner: AttributeAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Rows outer, columns inner: every tile's left neighbor is final before
    /// the tile itself is sampled.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedGrid, GenerationError> {
        let mut grid = Grid::new(self.width, self.height);
        let mut records = Vec::with_capacity(self.width as usize * self.height as usize);

        for row in 0..self.height {
            for column in 0..self.width {
                let coordinate = GridCoordinate::new(column, row);
                let placement = self.layout.position(coordinate);
                let attributes = self.assigner.assign(coordinate, &grid, rng)?;
                let tile = TileState::new(attributes);
                grid.insert(coordinate, tile);
                records.push(TileRecord {
                    coordinate,
                    placement,
                    tile,
                });
            }
        }

        let camera = self.layout.camera_frame(self.width, self.height);
        info!(
            width = self.width,
            height = self.height,
            tiles = grid.len(),
            extent_width = camera.extents.width,
            extent_height = camera.extents.height,
            "grid generated"
        );

        Ok(GeneratedGrid {
            grid,
            records,
            camera,
        })
    }

    /// Builds from the attribute stream of a fresh generator seeded with `seed`.
    pub fn generate(&self, seed: u64) -> Result<GeneratedGrid, GenerationError> {
        let mut rng = stream_rng(seed, ATTRIBUTE_STREAM);
        self.build(&mut rng)
    }
}

/// A finished, read-only grid together with its layout.
#[derive(Debug, Clone)]
pub struct GeneratedGrid {
    grid: Grid,
    records: Vec<TileRecord>,
    camera: CameraFrame,
}

impl GeneratedGrid {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile records in generation order.
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }

    pub fn extents(&self) -> GridExtents {
        self.camera.extents
    }

    pub fn camera_frame(&self) -> CameraFrame {
        self.camera
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary::from_grid(&self.grid)
    }

    /// Replays every tile into `sink`, then frames the camera. Sink failures
    /// are logged and collected; the remaining tiles are still emitted.
    pub fn emit<S, F>(&self, sink: &mut S, framer: &mut F) -> EmitReport
    where
        S: TileSink + ?Sized,
        F: CameraFramer + ?Sized,
    {
        let mut report = EmitReport::default();
        self.emit_tiles(sink, &mut report);
        self.frame_camera(framer, &mut report);
        report
    }

    /// Same as [`emit`](Self::emit) for a target that is both sink and framer.
    pub fn emit_into<T>(&self, target: &mut T) -> EmitReport
    where
        T: TileSink + CameraFramer + ?Sized,
    {
        let mut report = EmitReport::default();
        self.emit_tiles(target, &mut report);
        self.frame_camera(target, &mut report);
        report
    }

    fn emit_tiles<S: TileSink + ?Sized>(&self, sink: &mut S, report: &mut EmitReport) {
        for record in &self.records {
            match sink.emit_tile(record) {
                Ok(()) => report.emitted += 1,
                Err(err) => {
                    warn!(coordinate = %record.coordinate, error = %err, "tile sink failed");
                    report.failed.push((record.coordinate, err));
                }
            }
        }
    }

    fn frame_camera<F: CameraFramer + ?Sized>(&self, framer: &mut F, report: &mut EmitReport) {
        if let Err(err) = framer.frame(&self.camera) {
            warn!(error = %err, "camera framer failed");
            report.frame_error = Some(err);
        }
    }
}
