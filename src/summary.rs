use std::fmt;

use serde::Serialize;

use crate::grid::Grid;
use crate::soil::SoilType;

/// Aggregate statistics over a generated grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub tiles: usize,
    /// Tile count per soil, in [`SoilType::ALL`] order.
    pub soil_counts: [usize; SoilType::ALL.len()],
    pub mean_vegetation: f64,
    pub mean_human_presence: f64,
}

impl GridSummary {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut soil_counts = [0usize; SoilType::ALL.len()];
        let mut vegetation_total = 0u64;
        let mut presence_total = 0u64;
        for (_, tile) in grid.iter() {
            soil_counts[tile.soil().index()] += 1;
            vegetation_total += u64::from(tile.vegetation());
            presence_total += u64::from(tile.human_presence());
        }
        let tiles = grid.len();
        let mean = |total: u64| {
            if tiles == 0 {
                0.0
            } else {
                total as f64 / tiles as f64
            }
        };
        Self {
            tiles,
            soil_counts,
            mean_vegetation: mean(vegetation_total),
            mean_human_presence: mean(presence_total),
        }
    }

    pub fn count(&self, soil: SoilType) -> usize {
        self.soil_counts[soil.index()]
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tiles: {}", self.tiles)?;
        writeln!(f, "mean vegetation: {:.2}", self.mean_vegetation)?;
        writeln!(f, "mean human presence: {:.2}", self.mean_human_presence)?;
        for soil in SoilType::ALL {
            let count = self.count(soil);
            if count > 0 {
                writeln!(f, "  {:<24}{count}", soil.display_name())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Attributes, GridCoordinate, TileState};

    #[test]
    fn test_summary_counts_and_means() {
        let mut grid = Grid::new(3, 1);
        let tiles = [
            (SoilType::PureSand, 2, 4),
            (SoilType::PureSand, 4, 6),
            (SoilType::ClayLoam, 6, 8),
        ];
        for (column, (soil, vegetation, human_presence)) in tiles.into_iter().enumerate() {
            grid.insert(
                GridCoordinate::new(column as u32, 0),
                TileState::new(Attributes {
                    soil,
                    vegetation,
                    human_presence,
                }),
            );
        }
        let summary = GridSummary::from_grid(&grid);
        assert_eq!(summary.tiles, 3);
        assert_eq!(summary.count(SoilType::PureSand), 2);
        assert_eq!(summary.count(SoilType::ClayLoam), 1);
        assert_eq!(summary.count(SoilType::Paved), 0);
        assert_eq!(summary.mean_vegetation, 4.0);
        assert_eq!(summary.mean_human_presence, 6.0);
        assert!(summary.to_string().contains("Pure Sand"));
    }

    #[test]
    fn test_every_soil_has_a_slot() {
        let width = SoilType::ALL.len() as u32;
        let mut grid = Grid::new(width, 1);
        for (column, soil) in SoilType::ALL.into_iter().enumerate() {
            grid.insert(
                GridCoordinate::new(column as u32, 0),
                TileState::new(Attributes {
                    soil,
                    vegetation: 0,
                    human_presence: 0,
                }),
            );
        }
        let summary = GridSummary::from_grid(&grid);
        assert_eq!(summary.soil_counts.len(), SoilType::ALL.len());
        assert!(SoilType::ALL.into_iter().all(|soil| summary.count(soil) == 1));
    }

    #[test]
    fn test_empty_grid_summary() {
        let summary = GridSummary::from_grid(&Grid::new(2, 2));
        assert_eq!(summary.tiles, 0);
        assert_eq!(summary.mean_vegetation, 0.0);
    }
}
