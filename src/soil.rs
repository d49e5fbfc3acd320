use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Ground composition of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Paved,
    PureDryClay,
    PureSand,
    PureCompactedSiltide,
    SandyLoam,
    SiltyLoam,
    PureLoam,
    HumusLoam,
    ClayLoam,
    ClayHumusLoam,
}

impl SoilType {
    /// Sampling universe, in declaration order.
    pub const ALL: [SoilType; 10] = [
        SoilType::Paved,
        SoilType::PureDryClay,
        SoilType::PureSand,
        SoilType::PureCompactedSiltide,
        SoilType::SandyLoam,
        SoilType::SiltyLoam,
        SoilType::PureLoam,
        SoilType::HumusLoam,
        SoilType::ClayLoam,
        SoilType::ClayHumusLoam,
    ];

    pub fn base_color(self) -> Rgb {
        match self {
            SoilType::Paved => Rgb::new(0.392, 0.392, 0.392),
            SoilType::PureDryClay => Rgb::new(0.745, 0.588, 0.471),
            SoilType::PureSand => Rgb::new(0.941, 0.902, 0.745),
            SoilType::PureCompactedSiltide => Rgb::new(0.706, 0.667, 0.588),
            SoilType::SandyLoam => Rgb::new(0.824, 0.725, 0.549),
            SoilType::SiltyLoam => Rgb::new(0.667, 0.627, 0.549),
            SoilType::PureLoam => Rgb::new(0.627, 0.549, 0.353),
            SoilType::HumusLoam => Rgb::new(0.588, 0.471, 0.314),
            SoilType::ClayLoam => Rgb::new(0.314, 0.235, 0.157),
            SoilType::ClayHumusLoam => Rgb::new(0.275, 0.196, 0.118),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SoilType::Paved => "Paved",
            SoilType::PureDryClay => "Pure Dry Clay",
            SoilType::PureSand => "Pure Sand",
            SoilType::PureCompactedSiltide => "Pure Compacted Siltide",
            SoilType::SandyLoam => "Sandy Loam",
            SoilType::SiltyLoam => "Silty Loam",
            SoilType::PureLoam => "Pure Loam",
            SoilType::HumusLoam => "Humus Loam",
            SoilType::ClayLoam => "Clay Loam",
            SoilType::ClayHumusLoam => "Clay Humus Loam",
        }
    }

    /// Position of this variant in [`SoilType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Highest vegetation or human-presence level.
pub const MAX_LEVEL: u8 = 9;

const VEGETATION_LEVEL_NAMES: [&str; 10] = [
    "Wasteland",
    "Mown Grass",
    "Grassland",
    "Scattered Shrubs",
    "Hedge",
    "Orchard",
    "Pasture",
    "Woodland Edge",
    "Forest",
    "Dense Forest",
];

const HUMAN_PRESENCE_LEVEL_NAMES: [&str; 10] = [
    "Untouched",
    "Natural",
    "Refuge",
    "Rural",
    "Shared Habitat",
    "Urban Park",
    "Urban Fringe",
    "Conflict Zone",
    "Concrete Jungle",
    "Fully Artificial",
];

/// Label for a vegetation level; levels above 9 clamp to the densest label.
pub fn vegetation_name(level: u8) -> &'static str {
    VEGETATION_LEVEL_NAMES[usize::from(level.min(MAX_LEVEL))]
}

/// Label for a human-presence level; levels above 9 clamp.
pub fn human_presence_name(level: u8) -> &'static str {
    HUMAN_PRESENCE_LEVEL_NAMES[usize::from(level.min(MAX_LEVEL))]
}
