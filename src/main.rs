//! Command line driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_of_life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_patterns, grid_from_pattern, load_pattern_from_file, Engine, PatternAnalysis},
    session::{Command, Outcome, Session},
    utils::{ColorOutput, GridFormatter},
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Conway's Game of Life on a bounded square grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Step a seeded grid for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Grid size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print every generation instead of only the last
        #[arg(long)]
        show_each: bool,

        /// Step on the calling thread only
        #[arg(long)]
        serial: bool,
    },

    /// Read edit and step commands from stdin
    Interactive {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Grid size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Classify a pattern as still life, oscillator or extinct
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Grid size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, pattern, size, generations, format, show_each, serial } => {
            let overrides = CliOverrides {
                size,
                generations,
                pattern_file: pattern,
                format: format.map(Into::into),
                serial,
            };
            run_command(config, overrides, show_each)
        }
        Commands::Interactive { config, pattern, size } => {
            let overrides = CliOverrides {
                size,
                pattern_file: pattern,
                ..Default::default()
            };
            interactive_command(config, overrides)
        }
        Commands::Analyze { config, pattern, size, json } => {
            analyze_command(config, pattern, size, json)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, show_each: bool) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let format = settings.output.format;
    let coords = settings.output.show_coordinates;
    let mut session = Session::from_settings(&settings).context("Failed to create session")?;

    let mut stdout = std::io::stdout().lock();
    let start_time = Instant::now();

    if show_each {
        write!(stdout, "{}", GridFormatter::render(session.grid(), 0, format, coords)?)?;
    }

    for _ in 0..settings.simulation.generations {
        session.apply(Command::Step(1))?;
        if show_each {
            write!(stdout, "{}", GridFormatter::render(session.grid(), session.generation(), format, coords)?)?;
        }
    }

    if !show_each {
        write!(stdout, "{}", GridFormatter::render(session.grid(), session.generation(), format, coords)?)?;
    }

    if format != OutputFormat::Json {
        writeln!(
            stdout,
            "{}",
            ColorOutput::success(&format!(
                "Advanced {} generation(s) in {:.3}s, {} cell(s) alive",
                session.generation(),
                start_time.elapsed().as_secs_f64(),
                session.grid().living_count()
            ))
        )?;
    }

    Ok(())
}

fn interactive_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let format = settings.output.format;
    let coords = settings.output.show_coordinates;
    let mut session = Session::from_settings(&settings).context("Failed to create session")?;

    println!("{}", ColorOutput::info(&format!(
        "{}x{} grid ready. Commands: alive R C, dead R C, toggle R C, step [N], reset [SIZE], run, pause, space, tick, show, quit",
        session.grid().size(),
        session.grid().size()
    )));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;

        match session.execute_line(&line) {
            Ok(None) => {}
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(Outcome::Show)) => {
                print!("{}", GridFormatter::render(session.grid(), session.generation(), format, coords)?);
            }
            Ok(Some(Outcome::Stepped { report, .. })) => {
                println!("Generation {}: {}", session.generation(), GridFormatter::format_report(&report));
            }
            Ok(Some(Outcome::Reset { size })) => {
                println!("{}", ColorOutput::info(&format!("Grid reset to {}x{}", size, size)));
            }
            Ok(Some(Outcome::Running(running))) => {
                println!("Auto-run {}", if running { "on" } else { "off" });
            }
            Ok(Some(Outcome::Idle)) => {
                println!("{}", ColorOutput::warning("Paused; send 'run' or 'space' before 'tick'"));
            }
            Ok(Some(Outcome::Edited { .. })) => {}
            Err(e) => println!("{}", ColorOutput::error(&format!("Error: {:#}", e))),
        }
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, pattern_path: PathBuf, size: Option<usize>, json: bool) -> Result<()> {
    let overrides = CliOverrides { size, ..Default::default() };
    let settings = load_settings(&config_path, &overrides)?;

    let pattern = load_pattern_from_file(&pattern_path)?;
    let grid = grid_from_pattern(&pattern, settings.grid.size)?;
    let engine = Engine::from_config(&settings.engine);
    let analysis = PatternAnalysis::analyze(&engine, &grid, settings.simulation.analysis_limit);

    if json {
        println!("{}", GridFormatter::format_analysis_json(&analysis)?);
        return Ok(());
    }

    println!("Pattern ({}x{}) on a {}x{} grid:", pattern.height(), pattern.width(), grid.size(), grid.size());
    println!("{}", GridFormatter::format_compact(&grid));
    println!("{}", analysis);

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display())));
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --pattern patterns/glider.txt --size 20 --show-each");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_engine",
            "run",
            "--config", "test.yaml",
            "--generations", "5",
            "--format", "json",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life_engine", "analyze"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());

        let settings = Settings::from_file(temp_dir.path().join("config/default.yaml")).unwrap();
        assert_eq!(settings.grid.size, 60);

        // Second run keeps the existing config
        std::fs::write(temp_dir.path().join("config/default.yaml"), "grid:\n  size: 12\n").unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        let settings = Settings::from_file(temp_dir.path().join("config/default.yaml")).unwrap();
        assert_eq!(settings.grid.size, 12);
    }

    #[test]
    fn test_load_settings_applies_overrides() {
        let temp_dir = tempdir().unwrap();
        let overrides = CliOverrides { size: Some(16), ..Default::default() };
        let settings = load_settings(&temp_dir.path().join("missing.yaml"), &overrides).unwrap();
        assert_eq!(settings.grid.size, 16);

        let overrides = CliOverrides { size: Some(0), ..Default::default() };
        assert!(load_settings(&temp_dir.path().join("missing.yaml"), &overrides).is_err());

        let overrides = CliOverrides { size: Some(1 << 32), ..Default::default() };
        assert!(load_settings(&temp_dir.path().join("missing.yaml"), &overrides).is_err());
    }
}
