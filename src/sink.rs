//! Outbound interfaces for whoever renders the grid.
//!
//! Generation never calls these. A finished [`GeneratedGrid`](crate::builder::GeneratedGrid)
//! is replayed into a sink afterwards, so a failing render target cannot
//! disturb the grid itself.

use serde::Serialize;

use crate::error::SinkError;
use crate::grid::{GridCoordinate, TileState};
use crate::layout::{CameraFrame, TilePlacement};

/// Everything a renderer needs to place and paint one tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileRecord {
    pub coordinate: GridCoordinate,
    pub placement: TilePlacement,
    pub tile: TileState,
}

pub trait TileSink {
    fn emit_tile(&mut self, record: &TileRecord) -> Result<(), SinkError>;
}

pub trait CameraFramer {
    fn frame(&mut self, frame: &CameraFrame) -> Result<(), SinkError>;
}

/// Outcome of replaying a grid into a sink.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub emitted: usize,
    pub failed: Vec<(GridCoordinate, SinkError)>,
    pub frame_error: Option<SinkError>,
}

impl EmitReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.frame_error.is_none()
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub records: Vec<TileRecord>,
    pub frame: Option<CameraFrame>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileSink for CollectingSink {
    fn emit_tile(&mut self, record: &TileRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        Ok(())
    }
}

impl CameraFramer for CollectingSink {
    fn frame(&mut self, frame: &CameraFrame) -> Result<(), SinkError> {
        self.frame = Some(*frame);
        Ok(())
    }
}
