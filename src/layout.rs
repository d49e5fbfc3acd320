//! Triangular tile placement.
//!
//! Tiles sit on a brick-offset lattice: each column advances half a side
//! length, and every other tile in a row is flipped upside-down and nudged up
//! by a third of the tile height so the triangles interlock.

use serde::{Deserialize, Serialize};

use crate::grid::GridCoordinate;

/// Depth of the camera relative to the grid plane.
pub const CAMERA_DEPTH: f32 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileOrientation {
    Upright,
    UpsideDown,
}

impl TileOrientation {
    pub fn of(coord: GridCoordinate) -> Self {
        if (u64::from(coord.column) + u64::from(coord.row)) % 2 == 0 {
            TileOrientation::Upright
        } else {
            TileOrientation::UpsideDown
        }
    }

    pub fn rotation_degrees(self) -> f32 {
        match self {
            TileOrientation::Upright => 0.0,
            TileOrientation::UpsideDown => 180.0,
        }
    }
}

/// World-space placement of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub orientation: TileOrientation,
}

/// Bounding size of the laid-out grid, measured between tile origins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtents {
    pub width: f32,
    pub height: f32,
}

/// Where a camera should sit to frame the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub extents: GridExtents,
    pub focal_x: f32,
    pub focal_y: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    side_length: f32,
    gap: f32,
}

impl HexLayout {
    pub fn new(side_length: f32, gap: f32) -> Self {
        Self { side_length, gap }
    }

    /// Layout with tiles touching edge to edge.
    pub fn unspaced(side_length: f32) -> Self {
        Self::new(side_length, 0.0)
    }

    pub fn tile_height(&self) -> f32 {
        (3.0_f32.sqrt() / 2.0) * self.side_length
    }

    /// Vertical nudge applied to upside-down tiles.
    pub fn y_correction(&self) -> f32 {
        self.tile_height() / 3.0
    }

    pub fn x_step(&self) -> f32 {
        self.side_length / 2.0 + self.gap
    }

    pub fn y_step(&self) -> f32 {
        self.tile_height() + self.gap
    }

    pub fn position(&self, coord: GridCoordinate) -> TilePlacement {
        let orientation = TileOrientation::of(coord);
        let x = coord.column as f32 * self.x_step();
        let y_base = coord.row as f32 * self.y_step();
        let y = match orientation {
            TileOrientation::Upright => y_base,
            TileOrientation::UpsideDown => y_base + self.y_correction(),
        };
        TilePlacement {
            x,
            y,
            rotation_degrees: orientation.rotation_degrees(),
            orientation,
        }
    }

    /// Width is the x of the last column, height spans first to last row
    /// baseline. A zero-sized grid has zero extents.
    pub fn extents(&self, columns: u32, rows: u32) -> GridExtents {
        GridExtents {
            width: columns.saturating_sub(1) as f32 * self.x_step(),
            height: rows.saturating_sub(1) as f32 * self.y_step(),
        }
    }

    pub fn camera_frame(&self, columns: u32, rows: u32) -> CameraFrame {
        let extents = self.extents(columns, rows);
        CameraFrame {
            extents,
            focal_x: extents.width / 2.0,
            focal_y: extents.height / 2.0,
            depth: CAMERA_DEPTH,
        }
    }
}

/// Free-function form of [`HexLayout::position`].
pub fn position(coord: GridCoordinate, side_length: f32, gap: f32) -> TilePlacement {
    HexLayout::new(side_length, gap).position(coord)
}
