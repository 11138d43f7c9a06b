//! Game rule constants and map generation parameters
//!
//! All tuning values are collected here with explanations of their purpose.
//! Changing them will affect gameplay pacing and balance.

/// Chance per round that an existing tree spreads to one empty neighbor
pub const TREE_SPREAD_RATE: f32 = 0.3;

/// Chance per round that an empty tile spontaneously grows a tree
///
/// Kept far below [`TREE_SPREAD_RATE`] so forests mostly expand from
/// existing woods instead of popping up everywhere.
pub const TREE_SPAWN_RATE: f32 = 0.01;

/// Vegetation probability used when the caller does not supply one
pub const DEFAULT_VEGETATION_DENSITY: f32 = 0.1;

/// Fraction of all map tiles a single kingdom must reach to win
pub const WIN_LANDMASS_FRACTION: f32 = 0.8;

/// Cost of buying a fresh peasant
pub const UNIT_COST: i32 = 10;

/// Cost of buying a castle
pub const CASTLE_COST: i32 = 15;

/// Starting savings per kingdom tile at map generation
pub const STARTING_SAVINGS_PER_TILE: i32 = 5;

/// Parameters for procedural map generation
///
/// `density` biases the random walk: positive values cluster tiles into
/// compact blobs, negative values produce sprawling coastlines. Values
/// between -3 and 3 give good results.
#[derive(Debug, Clone)]
pub struct MapParams {
    /// Total number of land tiles to generate
    pub land_mass: u32,
    /// Clustering bias for the growth walk
    pub density: f32,
    /// Probability that a generated tile starts with a tree; defaults to
    /// [`DEFAULT_VEGETATION_DENSITY`] when absent
    pub vegetation_density: Option<f32>,
    /// RNG seed; defaults to wall-clock time when absent
    pub seed: Option<u64>,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            land_mass: 100,
            density: 0.0,
            vegetation_density: None,
            seed: None,
        }
    }
}
