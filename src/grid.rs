use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{derive_color, Rgb};
use crate::soil::{human_presence_name, vegetation_name, SoilType};

/// Integer position of a tile in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub column: u32,
    pub row: u32,
}

impl GridCoordinate {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Same row, previous column. `None` in the first column.
    pub fn left(self) -> Option<GridCoordinate> {
        self.column
            .checked_sub(1)
            .map(|column| GridCoordinate::new(column, self.row))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// The sampled part of a tile: everything except its derived color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    pub soil: SoilType,
    pub vegetation: u8,
    pub human_presence: u8,
}

/// A finished tile. Only constructible from [`Attributes`], so the color always
/// matches the attributes it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileState {
    soil: SoilType,
    vegetation: u8,
    human_presence: u8,
    color: Rgb,
}

impl TileState {
    pub fn new(attributes: Attributes) -> Self {
        let Attributes {
            soil,
            vegetation,
            human_presence,
        } = attributes;
        Self {
            soil,
            vegetation,
            human_presence,
            color: derive_color(soil, vegetation, human_presence),
        }
    }

    pub fn soil(&self) -> SoilType {
        self.soil
    }

    pub fn vegetation(&self) -> u8 {
        self.vegetation
    }

    pub fn human_presence(&self) -> u8 {
        self.human_presence
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn attributes(&self) -> Attributes {
        Attributes {
            soil: self.soil,
            vegetation: self.vegetation,
            human_presence: self.human_presence,
        }
    }

    pub fn vegetation_name(&self) -> &'static str {
        vegetation_name(self.vegetation)
    }

    pub fn human_presence_name(&self) -> &'static str {
        human_presence_name(self.human_presence)
    }
}

/// Tiles keyed by coordinate, remembering the order they were generated in.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: HashMap<GridCoordinate, TileState>,
    order: Vec<GridCoordinate>,
}

impl Grid {
    /// Empty grid. Callers validate the dimensions first, see
    /// [`GridConfig::validate`](crate::config::GridConfig::validate).
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let capacity = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn in_bounds(&self, coord: GridCoordinate) -> bool {
        coord.column < self.width && coord.row < self.height
    }

    /// True once every coordinate of the rectangle holds a tile.
    pub fn is_complete(&self) -> bool {
        self.len() == self.width as usize * self.height as usize
    }

    pub fn get(&self, coord: GridCoordinate) -> Option<&TileState> {
        self.tiles.get(&coord)
    }

    pub fn left_neighbor(&self, coord: GridCoordinate) -> Option<&TileState> {
        coord.left().and_then(|left| self.get(left))
    }

    /// Tiles are write-once; inserting a coordinate twice or outside the
    /// rectangle is a bug in the caller.
    pub(crate) fn insert(&mut self, coord: GridCoordinate, tile: TileState) {
        assert!(self.in_bounds(coord), "coordinate {coord} outside grid");
        let previous = self.tiles.insert(coord, tile);
        assert!(previous.is_none(), "coordinate {coord} assigned twice");
        self.order.push(coord);
    }

    /// Tiles in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoordinate, &TileState)> + '_ {
        self.order.iter().map(move |coord| {
            let tile = self
                .tiles
                .get(coord)
                .expect("ordered coordinate has a tile");
            (*coord, tile)
        })
    }
}
