//! Toroidal grid universe and the generation step.

use crate::patterns::Pattern;
use life_core::{Cell, Direction, Error, Position, Result, UniverseConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A fixed-size toroidal universe of cells.
///
/// The grid is row-major, `width * height` cells, with wraparound
/// addressing: every coordinate is taken modulo the grid dimensions, so
/// neighbor lookups never go out of bounds. Dimensions are fixed at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    generation: u64,
}

impl Universe {
    /// Create a universe from an explicit initial generation in row-major
    /// order. `initial` must contain exactly `width * height` cells.
    pub fn new(width: i32, height: i32, initial: Vec<Cell>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if initial.len() != expected {
            return Err(Error::InvalidPattern {
                expected,
                actual: initial.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells: initial,
            generation: 0,
        })
    }

    /// Create an all-dead universe
    pub fn dead(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Self::new(
            width,
            height,
            vec![Cell::Dead; width as usize * height as usize],
        )
    }

    /// Create a universe from configuration, seeding random cells alive
    /// at the configured density
    pub fn from_config(config: &UniverseConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        let mut universe = Self::dead(config.width, config.height)?;

        for cell in &mut universe.cells {
            if rng.gen::<f32>() < config.alive_density {
                *cell = Cell::Alive;
            }
        }

        Ok(universe)
    }

    /// Create an all-dead universe with one pattern stamped at `origin`
    pub fn from_pattern(
        width: i32,
        height: i32,
        pattern: &Pattern,
        origin: Position,
    ) -> Result<Self> {
        let mut universe = Self::dead(width, height)?;
        universe.stamp(pattern, origin);
        Ok(universe)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Generations advanced since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get the cell at a position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        let wrapped = pos.wrap(self.width, self.height);
        self.cells[self.pos_to_index(wrapped)]
    }

    /// Set the cell at a position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let wrapped = pos.wrap(self.width, self.height);
        let index = self.pos_to_index(wrapped);
        self.cells[index] = cell;
    }

    /// Set a pattern's cells alive, offset from `origin`
    pub fn stamp(&mut self, pattern: &Pattern, origin: Position) {
        for &(row, col) in pattern.cells {
            self.set(origin.add(col, row), Cell::Alive);
        }
    }

    /// Read-only view of the current generation, row-major. The borrow
    /// ends before the next `step()` can run, so a stale view is
    /// unrepresentable.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of live cells in the current generation
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count live cells among the 8 toroidal neighbors of a position
    pub fn live_neighbors(&self, pos: Position) -> u8 {
        let mut count = 0;
        for direction in Direction::all() {
            let (dx, dy) = direction.to_delta();
            if self.get(pos.add(dx, dy)).is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Advance the universe by exactly one generation.
    ///
    /// The next generation is computed into a fresh buffer from the
    /// current one only, then swapped in whole; no partially updated
    /// state is ever readable. Rows of the new buffer are filled in
    /// parallel, each worker reading the immutable current generation.
    pub fn step(&mut self) {
        let width = self.width as usize;
        let mut next = vec![Cell::Dead; self.cells.len()];

        next.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, next_row)| {
                for (col, slot) in next_row.iter_mut().enumerate() {
                    let pos = Position::new(col as i32, row as i32);
                    let neighbors = self.live_neighbors(pos);
                    *slot = next_state(self.cells[row * width + col], neighbors);
                }
            });

        debug_assert_eq!(next.len(), self.cells.len());
        self.cells = next;
        self.generation += 1;
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}

/// The B3/S23 rule, evaluated against the pre-step generation
fn next_state(current: Cell, live_neighbors: u8) -> Cell {
    match (current, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use rand::SeedableRng;

    fn universe_with_alive(width: i32, height: i32, alive: &[(i32, i32)]) -> Universe {
        let mut universe = Universe::dead(width, height).unwrap();
        for &(row, col) in alive {
            universe.set(Position::new(col, row), Cell::Alive);
        }
        universe
    }

    #[test]
    fn test_universe_creation() {
        let universe = Universe::new(10, 5, vec![Cell::Dead; 50]).unwrap();
        assert_eq!(universe.width(), 10);
        assert_eq!(universe.height(), 5);
        assert_eq!(universe.cells().len(), 50);
        assert_eq!(universe.generation(), 0);
        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Universe::new(0, 5, vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDimensions {
                width: 0,
                height: 5
            }
        );

        let err = Universe::dead(3, 0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDimensions {
                width: 3,
                height: 0
            }
        );
    }

    #[test]
    fn test_invalid_pattern_length() {
        let err = Universe::new(4, 4, vec![Cell::Dead; 15]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPattern {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_cells_read_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let universe = Universe::from_config(&UniverseConfig::default(), &mut rng).unwrap();

        let first: Vec<Cell> = universe.cells().to_vec();
        let second: Vec<Cell> = universe.cells().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_toroidal_corner_adjacency() {
        // (height-1, width-1) wraps around to touch (0, 0)
        let universe = universe_with_alive(4, 4, &[(3, 3)]);
        assert_eq!(universe.live_neighbors(Position::new(0, 0)), 1);
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut universe = universe_with_alive(5, 5, &[(2, 2)]);
        universe.step();
        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let mut universe = Universe::dead(8, 8).unwrap();
        for _ in 0..10 {
            universe.step();
        }
        assert_eq!(universe.population(), 0);
        assert_eq!(universe.generation(), 10);
    }

    #[test]
    fn test_block_is_still_life() {
        let mut universe =
            Universe::from_pattern(6, 6, &patterns::BLOCK, Position::new(2, 2)).unwrap();
        let before = universe.cells().to_vec();
        universe.step();
        assert_eq!(universe.cells(), &before[..]);
    }

    #[test]
    fn test_blinker_oscillates() {
        // Horizontal triple in the middle row of a 5x5 grid
        let mut universe = universe_with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let original = universe.cells().to_vec();

        universe.step();
        let vertical = universe_with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(universe.cells(), vertical.cells());

        universe.step();
        assert_eq!(universe.cells(), &original[..]);
    }

    #[test]
    fn test_glider_translates_diagonally() {
        let mut universe =
            Universe::from_pattern(8, 8, &patterns::GLIDER, Position::new(1, 1)).unwrap();
        for _ in 0..4 {
            universe.step();
        }

        // After one full period the glider has moved one cell down-right
        let shifted = Universe::from_pattern(8, 8, &patterns::GLIDER, Position::new(2, 2)).unwrap();
        assert_eq!(universe.cells(), shifted.cells());
    }

    #[test]
    fn test_from_config_density_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let empty = Universe::from_config(
            &UniverseConfig {
                width: 16,
                height: 16,
                alive_density: 0.0,
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(empty.population(), 0);

        let full = Universe::from_config(
            &UniverseConfig {
                width: 16,
                height: 16,
                alive_density: 1.0,
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(full.population(), 256);
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let config = UniverseConfig {
            width: 32,
            height: 32,
            alive_density: 0.4,
        };

        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let a = Universe::from_config(&config, &mut rng_a).unwrap();
        let b = Universe::from_config(&config, &mut rng_b).unwrap();
        assert_eq!(a.cells(), b.cells());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_step_preserves_buffer_length(
                width in 1i32..32,
                height in 1i32..32,
                seed in any::<u64>(),
            ) {
                let config = UniverseConfig { width, height, alive_density: 0.5 };
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut universe = Universe::from_config(&config, &mut rng).unwrap();
                universe.step();
                prop_assert_eq!(universe.cells().len(), (width * height) as usize);
            }

            #[test]
            fn prop_extinction_is_absorbing(
                width in 1i32..32,
                height in 1i32..32,
                steps in 0usize..5,
            ) {
                let mut universe = Universe::dead(width, height).unwrap();
                for _ in 0..steps {
                    universe.step();
                }
                prop_assert_eq!(universe.population(), 0);
            }

            #[test]
            fn prop_get_wraps_out_of_range_coordinates(
                x in -100i32..100,
                y in -100i32..100,
            ) {
                let universe = universe_with_alive(10, 10, &[(3, 4)]);
                let wrapped = Position::new(x, y).wrap(10, 10);
                prop_assert_eq!(universe.get(Position::new(x, y)), universe.get(wrapped));
            }
        }
    }
}
