//! Configuration types for the engine and runner.

use serde::{Deserialize, Serialize};

/// Universe configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Width of the grid in cells
    pub width: i32,
    /// Height of the grid in cells
    pub height: i32,
    /// Fraction of cells seeded alive (0.0 to 1.0)
    pub alive_density: f32,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            alive_density: 0.3,
        }
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of generations to advance
    pub num_generations: u64,
    /// Random seed for reproducible initialization
    pub seed: u64,
    /// Emit a progress event every this many generations
    pub log_interval: u64,
    /// Universe configuration
    pub universe: UniverseConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_generations: 1_000,
            seed: 0,
            log_interval: 100,
            universe: UniverseConfig::default(),
        }
    }
}
