//! Generation stepping for Game of Life grids
//!
//! A step runs in two phases. The decide phase reads the current generation
//! and records every cell's next state into a fresh buffer; the grid is not
//! touched until every cell has been decided. The apply phase then swaps the
//! buffer in as the new generation. Because the decide phase is read-only it
//! may fan out over rows with rayon.

use super::{Cell, Grid, Rule};
use crate::config::EngineConfig;
use crate::error::GridResult;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a single generation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Dead cells that came alive (NEW LIFE)
    pub births: usize,
    /// Live cells that stayed alive (HARMONY)
    pub survivors: usize,
    /// Live cells that died with fewer than two neighbors
    pub solitude_deaths: usize,
    /// Live cells that died with four or more neighbors
    pub overpopulation_deaths: usize,
}

impl StepReport {
    fn record(&mut self, rule: Option<Rule>) {
        match rule {
            Some(Rule::NewLife) => self.births += 1,
            Some(Rule::Harmony) => self.survivors += 1,
            Some(Rule::Solitude) => self.solitude_deaths += 1,
            Some(Rule::Overpopulation) => self.overpopulation_deaths += 1,
            None => {}
        }
    }

    pub fn deaths(&self) -> usize {
        self.solitude_deaths + self.overpopulation_deaths
    }

    /// Living cells in the new generation
    pub fn alive(&self) -> usize {
        self.births + self.survivors
    }

    /// Cells whose state flipped
    pub fn changed(&self) -> usize {
        self.births + self.deaths()
    }

    /// Accumulate another step's counts
    pub fn merge(&mut self, other: &StepReport) {
        self.births += other.births;
        self.survivors += other.survivors;
        self.solitude_deaths += other.solitude_deaths;
        self.overpopulation_deaths += other.overpopulation_deaths;
    }
}

/// Game of Life simulation engine
#[derive(Debug, Clone)]
pub struct Engine {
    parallel: bool,
    parallel_threshold: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Engine {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            parallel: config.parallel,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Engine that always decides cells on the calling thread
    pub fn serial() -> Self {
        Self {
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    fn uses_parallelism(&self, grid: &Grid) -> bool {
        self.parallel && grid.size() >= self.parallel_threshold
    }

    /// Decide one row of the next generation from the frozen current one
    fn decide_row(grid: &Grid, row: usize) -> Vec<(Cell, Option<Rule>)> {
        grid.row(row)
            .iter()
            .enumerate()
            .map(|(col, &cell)| {
                let neighbors = grid.neighbor_count(row, col);
                (Rule::next_state(cell, neighbors), Rule::classify(cell, neighbors))
            })
            .collect()
    }

    fn decide(&self, grid: &Grid) -> Vec<(Cell, Option<Rule>)> {
        let size = grid.size();
        if self.uses_parallelism(grid) {
            (0..size)
                .into_par_iter()
                .flat_map_iter(|row| Self::decide_row(grid, row))
                .collect()
        } else {
            (0..size).flat_map(|row| Self::decide_row(grid, row)).collect()
        }
    }

    /// Advance `grid` by exactly one generation in place
    pub fn step(&self, grid: &mut Grid) -> StepReport {
        let decisions = self.decide(grid);

        let mut report = StepReport::default();
        let next: Vec<Cell> = decisions
            .into_iter()
            .map(|(cell, rule)| {
                report.record(rule);
                cell
            })
            .collect();
        grid.replace_cells(next);

        debug!(
            births = report.births,
            deaths = report.deaths(),
            alive = report.alive(),
            "advanced one generation"
        );
        report
    }

    /// Compute the next generation without modifying `current`
    pub fn evolve(&self, current: &Grid) -> Grid {
        let mut next = current.clone();
        self.step(&mut next);
        next
    }

    /// Advance `grid` by `generations` steps, returning the combined report
    pub fn advance(&self, grid: &mut Grid, generations: usize) -> StepReport {
        let mut total = StepReport::default();
        for _ in 0..generations {
            total.merge(&self.step(grid));
        }
        total
    }

    /// Evolve a copy of the grid for multiple generations
    pub fn evolve_generations(&self, grid: &Grid, generations: usize) -> Grid {
        let mut next = grid.clone();
        self.advance(&mut next, generations);
        next
    }

    pub fn set_alive(&self, grid: &mut Grid, row: usize, col: usize) -> GridResult<()> {
        grid.set_alive(row, col)
    }

    pub fn set_dead(&self, grid: &mut Grid, row: usize, col: usize) -> GridResult<()> {
        grid.set_dead(row, col)
    }

    /// Replace the grid with an all-dead grid of `size`
    pub fn reset(&self, grid: &mut Grid, size: usize) -> GridResult<()> {
        let previous = grid.size();
        grid.reset(size)?;
        info!(previous, size, "grid reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Pattern;

    fn grid_with(size: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &(row, col) in alive {
            grid.set_alive(row, col).unwrap();
        }
        grid
    }

    /// Pseudo-random soup from a fixed seed
    fn soup(size: usize, seed: u64) -> Grid {
        let mut state = seed;
        let mut grid = Grid::new(size).unwrap();
        for row in 0..size {
            for col in 0..size {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                if (state >> 33) % 3 == 0 {
                    grid.set_alive(row, col).unwrap();
                }
            }
        }
        grid
    }

    /// The in-place update a correct step must not reproduce
    fn naive_in_place_step(grid: &mut Grid) {
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let neighbors = grid.count_alive_neighbors(row, col).unwrap();
                let cell = grid.cell(row, col).unwrap();
                grid.set(row, col, Rule::next_state(cell, neighbors)).unwrap();
            }
        }
    }

    #[test]
    fn test_still_life_block() {
        let engine = Engine::default();
        let grid = grid_with(6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);

        let mut evolved = grid.clone();
        for _ in 0..10 {
            let report = engine.step(&mut evolved);
            assert_eq!(report.survivors, 4);
            assert_eq!(report.changed(), 0);
        }
        assert_eq!(evolved, grid);
    }

    #[test]
    fn test_oscillator_blinker() {
        let engine = Engine::default();
        let horizontal = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);

        let once = engine.evolve(&horizontal);
        assert_eq!(once, vertical);

        let twice = engine.evolve(&once);
        assert_eq!(twice, horizontal);
    }

    #[test]
    fn test_step_uses_frozen_generation() {
        let engine = Engine::serial();
        let horizontal = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);

        // Updating in scan order lets (1, 2) come alive before (2, 1) is
        // counted, which corrupts the rest of the row.
        let mut naive = horizontal.clone();
        naive_in_place_step(&mut naive);
        assert_ne!(naive, vertical);

        let mut stepped = horizontal.clone();
        let report = engine.step(&mut stepped);
        assert_eq!(stepped, vertical);
        assert_eq!(report.births, 2);
        assert_eq!(report.solitude_deaths, 2);
        assert_eq!(report.survivors, 1);
    }

    #[test]
    fn test_solitude() {
        let engine = Engine::default();
        let mut grid = grid_with(5, &[(2, 2)]);
        let report = engine.step(&mut grid);
        assert!(grid.is_empty());
        assert_eq!(report.solitude_deaths, 1);
    }

    #[test]
    fn test_no_birth_with_four_neighbors() {
        let engine = Engine::default();
        // Center (2, 2) is dead with four orthogonal neighbors
        let mut grid = grid_with(5, &[(1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(grid.count_alive_neighbors(2, 2).unwrap(), 4);

        engine.step(&mut grid);
        assert!(!grid.is_alive(2, 2).unwrap());
    }

    #[test]
    fn test_overpopulation() {
        let engine = Engine::default();
        // Center has all eight neighbors
        let mut grid = Grid::from_rows(vec![vec![true; 3]; 3]).unwrap();
        let report = engine.step(&mut grid);

        assert!(!grid.is_alive(1, 1).unwrap());
        assert_eq!(report.overpopulation_deaths, 5);
        assert_eq!(report.survivors, 4);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_corner_pattern_does_not_wrap() {
        let engine = Engine::default();
        // Would survive as a block on a torus through the corners
        let mut grid = grid_with(4, &[(0, 0), (0, 3), (3, 0), (3, 3)]);
        engine.step(&mut grid);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_step_is_deterministic() {
        let engine = Engine::default();
        let first = soup(20, 7);
        let second = soup(20, 7);
        assert_eq!(first, second);

        assert_eq!(
            engine.evolve_generations(&first, 5),
            engine.evolve_generations(&second, 5)
        );
    }

    #[test]
    fn test_parallel_matches_serial() {
        let parallel = Engine::from_config(&EngineConfig {
            parallel: true,
            parallel_threshold: 1,
        });
        let serial = Engine::serial();

        for seed in [1, 2, 3] {
            let grid = soup(40, seed);
            assert_eq!(
                parallel.evolve_generations(&grid, 3),
                serial.evolve_generations(&grid, 3)
            );
        }
    }

    #[test]
    fn test_evolve_leaves_input_untouched() {
        let engine = Engine::default();
        let grid = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        let snapshot = grid.clone();
        let _ = engine.evolve(&grid);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_glider_translates() {
        let engine = Engine::default();
        let glider = Pattern::preset("glider").unwrap();
        let mut grid = Grid::new(10).unwrap();
        grid.stamp(&glider, 0, 0).unwrap();

        let report = engine.advance(&mut grid, 4);
        assert!(report.births > 0);

        let mut expected = Grid::new(10).unwrap();
        expected.stamp(&glider, 1, 1).unwrap();
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_engine_edits_and_reset() {
        let engine = Engine::default();
        let mut grid = Grid::new(4).unwrap();

        engine.set_alive(&mut grid, 1, 1).unwrap();
        assert!(grid.is_alive(1, 1).unwrap());
        engine.set_dead(&mut grid, 1, 1).unwrap();
        assert!(!grid.is_alive(1, 1).unwrap());
        assert!(engine.set_alive(&mut grid, 4, 0).is_err());

        engine.set_alive(&mut grid, 3, 3).unwrap();
        engine.reset(&mut grid, 8).unwrap();
        assert_eq!(grid.size(), 8);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let engine = Engine::default();
        let mut grid = Grid::new(1).unwrap();
        let report = engine.step(&mut grid);
        assert!(grid.is_empty());
        assert_eq!(report, StepReport::default());
    }
}
