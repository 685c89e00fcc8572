//! Text import and export of patterns and grids
//!
//! Format: each line is a row; `1`, `#` or `O` marks a live cell and `0` or
//! `.` a dead one. Blank lines are ignored.

use super::{Grid, Pattern, PRESETS};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// Parse a pattern from its text representation
pub fn parse_pattern(content: &str) -> Result<Pattern> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].chars().count();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx, len, width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' | '.' => row.push(false),
                '1' | '#' | 'O' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Use '1', '#' or 'O' for alive and '0' or '.' for dead",
                    ch, row_idx, col_idx
                ),
            }
        }
        rows.push(row);
    }

    Pattern::from_rows(rows)
}

/// Load a pattern from a text file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Build a `size` x `size` grid with `pattern` placed in the middle
pub fn grid_from_pattern(pattern: &Pattern, size: usize) -> Result<Grid> {
    let mut grid = Grid::new(size)?;
    let (row, col) = pattern.centered_offset(size).with_context(|| {
        format!(
            "{}x{} pattern does not fit on a {}x{} grid",
            pattern.height(), pattern.width(), size, size
        )
    })?;
    grid.stamp(pattern, row, col)?;
    Ok(grid)
}

/// Convert a grid to its `0`/`1` text form
pub fn grid_to_string(grid: &Grid) -> String {
    let size = grid.size();
    let mut result = String::with_capacity(size * (size + 1));

    for row in grid.rows() {
        for cell in row {
            result.push(if cell.is_alive() { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Export a grid snapshot to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load every `.txt` pattern in a directory, sorted by name
pub fn load_patterns_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Pattern)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut patterns = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_pattern_from_file(&path) {
            Ok(pattern) => patterns.push((name, pattern)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable pattern"),
        }
    }

    patterns.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(patterns)
}

/// Write the built-in patterns as text files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, rows) in PRESETS {
        let mut content = rows.join("\n");
        content.push('\n');
        let file_name = format!("{}.txt", name);
        std::fs::write(dir.join(&file_name), content)
            .with_context(|| format!("Failed to write {}", file_name))?;
    }

    Ok(())
}
