//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{Grid, PatternAnalysis, StepReport};
use anyhow::{Context, Result};
use serde::Serialize;

/// Format grids and step results for the terminal
pub struct GridFormatter;

/// JSON view of one generation
#[derive(Serialize)]
struct GenerationSnapshot<'a> {
    generation: u64,
    alive: usize,
    living_cells: Vec<(usize, usize)>,
    grid: &'a Grid,
}

impl GridFormatter {
    /// One character per cell
    pub fn format_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.size() * (grid.size() + 1));
        for row in grid.rows() {
            for cell in row {
                output.push(if cell.is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Two characters per cell with row and column indices
    pub fn format_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.size() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for (row, cells) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", row));
            for cell in cells {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Render a generation in the configured output format
    pub fn render(grid: &Grid, generation: u64, format: OutputFormat, show_coordinates: bool) -> Result<String> {
        let body = match format {
            OutputFormat::Text => crate::game_of_life::io::grid_to_string(grid),
            OutputFormat::Visual if show_coordinates => Self::format_with_coords(grid),
            OutputFormat::Visual => Self::format_compact(grid),
            OutputFormat::Json => {
                let snapshot = GenerationSnapshot {
                    generation,
                    alive: grid.living_count(),
                    living_cells: grid.living_cells(),
                    grid,
                };
                let mut json = serde_json::to_string(&snapshot)
                    .context("Failed to serialize generation")?;
                json.push('\n');
                return Ok(json);
            }
        };

        Ok(format!("Generation {} (Living: {}):\n{}", generation, grid.living_count(), body))
    }

    /// One-line summary of a step
    pub fn format_report(report: &StepReport) -> String {
        format!(
            "+{} born, -{} died ({} solitude, {} overpopulation), {} alive",
            report.births,
            report.deaths(),
            report.solitude_deaths,
            report.overpopulation_deaths,
            report.alive()
        )
    }

    pub fn format_analysis_json(analysis: &PatternAnalysis) -> Result<String> {
        serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = sample_grid();

        let compact = GridFormatter::format_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_render_formats() {
        let grid = sample_grid();

        let text = GridFormatter::render(&grid, 4, OutputFormat::Text, false).unwrap();
        assert!(text.starts_with("Generation 4 (Living: 5):\n"));
        assert!(text.ends_with("101\n010\n101\n"));

        let json = GridFormatter::render(&grid, 4, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generation"], 4);
        assert_eq!(value["alive"], 5);
        assert_eq!(value["grid"]["size"], 3);
        assert_eq!(value["grid"]["cells"][0], "alive");
        assert_eq!(value["living_cells"][1], serde_json::json!([0, 2]));
    }

    #[test]
    fn test_report_formatting() {
        let report = StepReport {
            births: 2,
            survivors: 1,
            solitude_deaths: 2,
            overpopulation_deaths: 0,
        };
        assert_eq!(
            GridFormatter::format_report(&report),
            "+2 born, -2 died (2 solitude, 0 overpopulation), 3 alive"
        );
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));

        let warning = ColorOutput::warning("Skipped: config/default.yaml");
        assert!(warning.contains("Skipped: config/default.yaml"));
    }
}
