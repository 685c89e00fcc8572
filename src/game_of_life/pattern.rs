//! Rectangular seed patterns that can be stamped onto a grid

use anyhow::Result;

/// Built-in patterns as `(name, rows)`, `#` alive and `.` dead
pub const PRESETS: [(&str, &[&str]); 5] = [
    ("glider", &["..#", "#.#", ".##"]),
    ("blinker", &["###"]),
    ("block", &["##", "##"]),
    ("beacon", &["##..", "##..", "..##", "..##"]),
    ("toad", &[".###", "###."]),
];

/// A rectangular, non-empty block of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Create a pattern from rows of equal length
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Pattern cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Pattern width cannot be zero");
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Look up a built-in pattern by name
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .and_then(|(_, rows)| {
                let rows = rows
                    .iter()
                    .map(|line| line.chars().map(|ch| ch == '#').collect())
                    .collect();
                Self::from_rows(rows).ok()
            })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value, `false` outside the pattern
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Top-left offset that centers this pattern on a `size` x `size` grid
    pub fn centered_offset(&self, size: usize) -> Option<(usize, usize)> {
        if self.height > size || self.width > size {
            return None;
        }
        Some(((size - self.height) / 2, (size - self.width) / 2))
    }
}
