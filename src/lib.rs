//! Conway's Game of Life engine
//!
//! This library provides a bounded square grid, the generation-stepping
//! engine, and an interactive session that applies user edits between steps.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use error::GridError;
pub use game_of_life::{Cell, Engine, Grid, StepReport};
pub use session::{Command, Session};

use anyhow::Result;

/// Run a batch simulation from settings and return the final grid
pub fn simulate(settings: &Settings) -> Result<Grid> {
    let mut session = Session::from_settings(settings)?;
    for _ in 0..settings.simulation.generations {
        session.apply(Command::Step(1))?;
    }
    Ok(session.grid().clone())
}
