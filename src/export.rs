//! JSON export of a generated grid.
//!
//! [`JsonExportSink`] stands in for a renderer: it accepts tile records and the
//! camera frame like any other sink, then writes them to disk in one file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, SinkError};
use crate::layout::CameraFrame;
use crate::sink::{CameraFramer, TileRecord, TileSink};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub name: String,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTile {
    pub column: u32,
    pub row: u32,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub soil: String,
    pub vegetation: u8,
    pub vegetation_name: String,
    pub human_presence: u8,
    pub human_presence_name: String,
    pub color: [f32; 3],
    pub hex: String,
}

impl From<&TileRecord> for ExportedTile {
    fn from(record: &TileRecord) -> Self {
        let tile = &record.tile;
        let color = tile.color();
        let [r, g, b] = color.to_rgb8();
        Self {
            column: record.coordinate.column,
            row: record.coordinate.row,
            x: record.placement.x,
            y: record.placement.y,
            rotation_degrees: record.placement.rotation_degrees,
            soil: tile.soil().display_name().to_string(),
            vegetation: tile.vegetation(),
            vegetation_name: tile.vegetation_name().to_string(),
            human_presence: tile.human_presence(),
            human_presence_name: tile.human_presence_name().to_string(),
            color: [color.r, color.g, color.b],
            hex: format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridExport {
    pub metadata: ExportMetadata,
    pub camera: CameraFrame,
    pub tiles: Vec<ExportedTile>,
}

pub struct JsonExportSink {
    output_dir: PathBuf,
    metadata: ExportMetadata,
    tiles: Vec<ExportedTile>,
    camera: Option<CameraFrame>,
}

impl JsonExportSink {
    pub fn new<P: AsRef<Path>>(
        output_dir: P,
        name: &str,
        seed: u64,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            metadata: ExportMetadata {
                name: name.to_string(),
                seed,
                width,
                height,
                generated_at: Utc::now(),
            },
            tiles: Vec::with_capacity(width as usize * height as usize),
            camera: None,
        }
    }

    /// `<output_dir>/<name>/grid_seed_<seed>.json`
    pub fn target_path(&self) -> PathBuf {
        self.output_dir
            .join(&self.metadata.name)
            .join(format!("grid_seed_{}.json", self.metadata.seed))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Writes everything received so far. Requires the camera frame.
    pub fn finish(self) -> Result<PathBuf, ExportError> {
        let path = self.target_path();
        let camera = self.camera.ok_or(ExportError::MissingFrame)?;
        let export = GridExport {
            metadata: self.metadata,
            camera,
            tiles: self.tiles,
        };
        let json = serde_json::to_string_pretty(&export)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, json).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl TileSink for JsonExportSink {
    fn emit_tile(&mut self, record: &TileRecord) -> Result<(), SinkError> {
        self.tiles.push(ExportedTile::from(record));
        Ok(())
    }
}

impl CameraFramer for JsonExportSink {
    fn frame(&mut self, frame: &CameraFrame) -> Result<(), SinkError> {
        self.camera = Some(*frame);
        Ok(())
    }
}

/// Reads back a file written by [`JsonExportSink::finish`].
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<GridExport, ExportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Attributes, GridCoordinate, TileState};
    use crate::layout::HexLayout;
    use crate::soil::SoilType;

    #[test]
    fn test_exported_tile_fields() {
        let coordinate = GridCoordinate::new(1, 0);
        let record = TileRecord {
            coordinate,
            placement: HexLayout::unspaced(1.0).position(coordinate),
            tile: TileState::new(Attributes {
                soil: SoilType::Paved,
                vegetation: 0,
                human_presence: 0,
            }),
        };
        let exported = ExportedTile::from(&record);
        assert_eq!(exported.column, 1);
        assert_eq!(exported.rotation_degrees, 180.0);
        assert_eq!(exported.soil, "Paved");
        assert_eq!(exported.vegetation_name, "Wasteland");
        assert_eq!(exported.human_presence_name, "Untouched");
        assert_eq!(exported.hex, "#646464");
    }

    #[test]
    fn test_finish_without_frame_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonExportSink::new(dir.path(), "empty", 1, 1, 1);
        assert!(matches!(sink.finish(), Err(ExportError::MissingFrame)));
    }
}
