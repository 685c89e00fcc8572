//! Long-run behavior of a pattern: still lifes, oscillators and extinction

use super::{Engine, Grid};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// How a pattern behaves once it settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PatternKind {
    /// Every cell died
    Extinct,
    /// Unchanged by further steps
    StillLife,
    /// Returns to an earlier state after `period` steps
    Oscillator { period: usize },
    /// No repeat seen within the examined generations
    Unsettled,
}

/// Result of running a pattern forward and watching for repeats
#[derive(Debug, Clone, Serialize)]
pub struct PatternAnalysis {
    pub kind: PatternKind,
    /// Generations before the repeating cycle (or extinction) begins
    pub transient: usize,
    pub generations_examined: usize,
    /// Living cell count at every examined generation, starting with the input
    pub population: Vec<usize>,
}

impl PatternAnalysis {
    /// Step a copy of `grid` for up to `max_generations`, stopping at the first repeated state
    pub fn analyze(engine: &Engine, grid: &Grid, max_generations: usize) -> Self {
        let mut seen: HashMap<Grid, usize> = HashMap::new();
        let mut population = vec![grid.living_count()];
        let mut current = grid.clone();

        if current.is_empty() {
            return Self::settled(PatternKind::Extinct, 0, 0, population);
        }
        seen.insert(current.clone(), 0);

        for generation in 1..=max_generations {
            engine.step(&mut current);
            population.push(current.living_count());

            if current.is_empty() {
                return Self::settled(PatternKind::Extinct, generation, generation, population);
            }

            if let Some(&first) = seen.get(&current) {
                let period = generation - first;
                let kind = if period == 1 {
                    PatternKind::StillLife
                } else {
                    PatternKind::Oscillator { period }
                };
                return Self::settled(kind, first, generation, population);
            }
            seen.insert(current.clone(), generation);
        }

        Self::settled(PatternKind::Unsettled, max_generations, max_generations, population)
    }

    fn settled(kind: PatternKind, transient: usize, examined: usize, population: Vec<usize>) -> Self {
        Self {
            kind,
            transient,
            generations_examined: examined,
            population,
        }
    }

    /// True when the input itself is a still life
    pub fn is_still_life(&self) -> bool {
        self.kind == PatternKind::StillLife && self.transient == 0
    }

    /// Period when the input itself oscillates
    pub fn oscillation_period(&self) -> Option<usize> {
        match self.kind {
            PatternKind::Oscillator { period } if self.transient == 0 => Some(period),
            _ => None,
        }
    }

    pub fn peak_population(&self) -> usize {
        self.population.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Extinct => write!(f, "Extinct"),
            PatternKind::StillLife => write!(f, "Still Life"),
            PatternKind::Oscillator { period } => write!(f, "Oscillator (period {})", period),
            PatternKind::Unsettled => write!(f, "Unsettled"),
        }
    }
}

impl fmt::Display for PatternAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern Analysis:")?;
        writeln!(f, "  Type: {}", self.kind)?;
        writeln!(f, "  Settles after: {} generation(s)", self.transient)?;
        writeln!(f, "  Generations examined: {}", self.generations_examined)?;
        writeln!(
            f,
            "  Population: {} initial, {} peak, {} final",
            self.population.first().copied().unwrap_or(0),
            self.peak_population(),
            self.population.last().copied().unwrap_or(0)
        )?;
        Ok(())
    }
}
