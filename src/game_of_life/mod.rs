//! Game of Life core functionality

pub mod analysis;
pub mod engine;
pub mod grid;
pub mod io;
pub mod pattern;
pub mod rules;

pub use analysis::{PatternAnalysis, PatternKind};
pub use engine::{Engine, StepReport};
pub use grid::{Cell, Grid};
pub use io::{grid_from_pattern, load_pattern_from_file, save_grid_to_file, create_example_patterns};
pub use pattern::{Pattern, PRESETS};
pub use rules::Rule;
