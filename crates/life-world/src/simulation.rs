//! Caller-driven simulation runner.
//!
//! `Simulation` owns a [`Universe`] and advances it on demand. It never
//! schedules itself: `run` is a plain synchronous loop the caller invokes,
//! and single stepping stays available through [`Simulation::step`].

use crate::grid::Universe;
use life_core::{Result, RunConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

pub struct Simulation {
    universe: Universe,
    config: RunConfig,
}

impl Simulation {
    /// Create a simulation with a randomly seeded universe. The RNG is
    /// seeded from `config.seed`, so equal configs produce equal runs.
    pub fn new(config: RunConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let universe = Universe::from_config(&config.universe, &mut rng)?;

        debug!(
            width = universe.width(),
            height = universe.height(),
            initial_population = universe.population(),
            seed = config.seed,
            "Universe initialized"
        );

        Ok(Self { universe, config })
    }

    /// Wrap an explicitly constructed universe
    pub fn with_universe(universe: Universe, config: RunConfig) -> Self {
        Self { universe, config }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Advance the universe by one generation
    pub fn step(&mut self) {
        self.universe.step();
        trace!(
            generation = self.universe.generation(),
            population = self.universe.population(),
            "Generation advanced"
        );
    }

    /// Run for the configured number of generations
    pub fn run(&mut self) -> SimulationResult {
        info!(
            "Starting simulation for {} generations",
            self.config.num_generations
        );

        for generation in 0..self.config.num_generations {
            self.step();

            if self.config.log_interval > 0 && generation % self.config.log_interval == 0 {
                info!(
                    "Generation {}/{}: {} cells alive",
                    self.universe.generation(),
                    self.config.num_generations,
                    self.universe.population()
                );
            }
        }

        let result = SimulationResult {
            generations: self.universe.generation(),
            final_population: self.universe.population(),
        };

        info!(
            event = "run_complete",
            generations = result.generations,
            final_population = result.final_population,
            "Simulation run complete"
        );

        result
    }
}

/// Result from a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub generations: u64,
    pub final_population: usize,
}
