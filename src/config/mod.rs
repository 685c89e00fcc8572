//! Configuration management for the Game of Life engine

pub mod settings;

pub use settings::{
    Settings, GridConfig, EngineConfig, SimulationConfig, InputConfig, OutputConfig,
    OutputFormat, CliOverrides
};
