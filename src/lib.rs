pub mod assigner;
pub mod builder;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod rng;
pub mod sink;
pub mod soil;
pub mod summary;

pub use assigner::{AttributeAssigner, ConstraintRule};
pub use builder::{GeneratedGrid, GridBuilder};
pub use color::{derive_color, Rgb};
pub use config::GridConfig;
pub use error::{ConfigError, GenerationError, SinkError};
pub use grid::{Attributes, Grid, GridCoordinate, TileState};
pub use layout::{CameraFrame, GridExtents, HexLayout, TilePlacement};
pub use soil::SoilType;
