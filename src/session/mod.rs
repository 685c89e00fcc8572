//! Interactive editing session over a single grid
//!
//! A session owns one grid and applies commands to it strictly one at a
//! time, so an edit can never land in the middle of a generation step.
//! Auto-run is modelled as a flag: `tick` advances the grid only while the
//! session is running.

pub mod command;

pub use command::Command;

use crate::config::{Settings, SimulationConfig};
use crate::game_of_life::{grid_from_pattern, load_pattern_from_file, Cell, Engine, Grid, StepReport};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// What a command did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single cell changed to the given state
    Edited { row: usize, col: usize, cell: Cell },
    /// One or more generations were advanced
    Stepped { generations: usize, report: StepReport },
    /// The grid was replaced by an all-dead grid
    Reset { size: usize },
    /// Auto-run was switched on or off
    Running(bool),
    /// A tick arrived while paused
    Idle,
    /// The caller should render the grid
    Show,
    Quit,
}

/// A grid, the engine that steps it, and the caller-side run state
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    engine: Engine,
    generation: u64,
    running: bool,
    steps_per_tick: usize,
    max_steps_per_command: usize,
}

impl Session {
    /// Start a session on an empty grid
    pub fn new(size: usize, engine: Engine) -> Result<Self> {
        let grid = Grid::new(size)?;
        Ok(Self::with_grid(grid, engine))
    }

    pub fn with_grid(grid: Grid, engine: Engine) -> Self {
        Self {
            grid,
            engine,
            generation: 0,
            running: false,
            steps_per_tick: 1,
            max_steps_per_command: SimulationConfig::default().max_steps_per_command,
        }
    }

    /// Build a session from settings, seeding the configured pattern if any
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let engine = Engine::from_config(&settings.engine);
        let grid = match settings.input.pattern_file {
            Some(ref path) => {
                let pattern = load_pattern_from_file(path)?;
                grid_from_pattern(&pattern, settings.grid.size)
                    .with_context(|| format!("Failed to seed grid from {}", path.display()))?
            }
            None => Grid::new(settings.grid.size)?,
        };

        let mut session = Self::with_grid(grid, engine);
        session.steps_per_tick = settings.simulation.steps_per_tick.max(1);
        session.max_steps_per_command = settings.simulation.max_steps_per_command;
        Ok(session)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance `generations` steps
    fn advance(&mut self, generations: usize) -> Outcome {
        let report = self.engine.advance(&mut self.grid, generations);
        self.generation += generations as u64;
        debug!(generation = self.generation, alive = self.grid.living_count(), "session advanced");
        Outcome::Stepped { generations, report }
    }

    /// Apply one command to the session
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        let outcome = match command {
            Command::SetAlive { row, col } => {
                self.engine.set_alive(&mut self.grid, row, col)?;
                Outcome::Edited { row, col, cell: Cell::Alive }
            }
            Command::SetDead { row, col } => {
                self.engine.set_dead(&mut self.grid, row, col)?;
                Outcome::Edited { row, col, cell: Cell::Dead }
            }
            Command::Toggle { row, col } => {
                let cell = self.grid.toggle(row, col)?;
                Outcome::Edited { row, col, cell }
            }
            Command::Step(generations) => {
                if generations > self.max_steps_per_command {
                    anyhow::bail!(
                        "Step count {} exceeds the limit of {} per command",
                        generations,
                        self.max_steps_per_command
                    );
                }
                self.advance(generations)
            }
            Command::Reset(size) => {
                let size = size.unwrap_or_else(|| self.grid.size());
                self.engine.reset(&mut self.grid, size)?;
                self.generation = 0;
                Outcome::Reset { size }
            }
            Command::Run => self.set_running(true),
            Command::Pause => self.set_running(false),
            Command::ToggleRunning => self.set_running(!self.running),
            Command::Tick => {
                if self.running {
                    self.advance(self.steps_per_tick)
                } else {
                    Outcome::Idle
                }
            }
            Command::Show => Outcome::Show,
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    fn set_running(&mut self, running: bool) -> Outcome {
        if self.running != running {
            info!(running, generation = self.generation, "auto-run changed");
        }
        self.running = running;
        Outcome::Running(running)
    }

    /// Parse and apply one line of input; blank lines and `#` comments yield `None`
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let command: Command = line.parse()?;
        self.apply(command).map(Some)
    }
}
