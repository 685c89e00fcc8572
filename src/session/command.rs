//! Text commands accepted by an interactive session

use anyhow::{Context, Result};
use std::str::FromStr;

/// A discrete request from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetAlive { row: usize, col: usize },
    SetDead { row: usize, col: usize },
    Toggle { row: usize, col: usize },
    /// Advance the given number of generations
    Step(usize),
    /// Clear the grid, optionally resizing it
    Reset(Option<usize>),
    Run,
    Pause,
    ToggleRunning,
    /// One frame of the caller's loop
    Tick,
    Show,
    Quit,
}

fn parse_number(token: Option<&str>, what: &str) -> Result<usize> {
    let token = token.with_context(|| format!("missing {}", what))?;
    token
        .parse()
        .with_context(|| format!("invalid {} '{}'", what, token))
}

fn parse_coordinates<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    let row = parse_number(args.next(), "row")?;
    let col = parse_number(args.next(), "column")?;
    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument '{}'", extra);
    }
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().context("empty command")?.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "alive" | "a" => {
                let (row, col) = parse_coordinates(tokens)?;
                Command::SetAlive { row, col }
            }
            "dead" | "d" => {
                let (row, col) = parse_coordinates(tokens)?;
                Command::SetDead { row, col }
            }
            "toggle" | "t" => {
                let (row, col) = parse_coordinates(tokens)?;
                Command::Toggle { row, col }
            }
            "step" | "s" | "n" => match tokens.next() {
                Some(count) => Command::Step(parse_number(Some(count), "generation count")?),
                None => Command::Step(1),
            },
            "reset" | "clear" | "c" => match tokens.next() {
                Some(size) => Command::Reset(Some(parse_number(Some(size), "grid size")?)),
                None => Command::Reset(None),
            },
            "run" => Command::Run,
            "pause" => Command::Pause,
            "space" | "play" => Command::ToggleRunning,
            "tick" => Command::Tick,
            "show" | "print" | "p" => Command::Show,
            "quit" | "exit" | "q" => Command::Quit,
            other => anyhow::bail!("unknown command '{}'", other),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edits() {
        assert_eq!("alive 3 4".parse::<Command>().unwrap(), Command::SetAlive { row: 3, col: 4 });
        assert_eq!("D 0 9".parse::<Command>().unwrap(), Command::SetDead { row: 0, col: 9 });
        assert_eq!("  toggle   1  1 ".parse::<Command>().unwrap(), Command::Toggle { row: 1, col: 1 });
    }

    #[test]
    fn test_parse_step_and_reset() {
        assert_eq!("step".parse::<Command>().unwrap(), Command::Step(1));
        assert_eq!("s 12".parse::<Command>().unwrap(), Command::Step(12));
        assert_eq!("c".parse::<Command>().unwrap(), Command::Reset(None));
        assert_eq!("reset 40".parse::<Command>().unwrap(), Command::Reset(Some(40)));
    }

    #[test]
    fn test_parse_run_controls() {
        assert_eq!("space".parse::<Command>().unwrap(), Command::ToggleRunning);
        assert_eq!("run".parse::<Command>().unwrap(), Command::Run);
        assert_eq!("tick".parse::<Command>().unwrap(), Command::Tick);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("alive 1".parse::<Command>().is_err());
        assert!("alive 1 2 3".parse::<Command>().is_err());
        assert!("alive -1 2".parse::<Command>().is_err());
        assert!("step many".parse::<Command>().is_err());

        let err = "fly 1 2".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("unknown command 'fly'"));
    }
}
