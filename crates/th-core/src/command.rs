//! Turn command grammar.
//!
//! One line of input per turn: `q`, `help`, or `<direction> <steps>`.
//! Directions are case-insensitive and accept compass synonyms.

use std::str::FromStr;

use strum::{Display, EnumString};
use thiserror::Error;

use crate::game::GameMode;

/// A cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "up", serialize = "north")]
    Up,
    #[strum(to_string = "right", serialize = "east")]
    Right,
    #[strum(to_string = "down", serialize = "south")]
    Down,
    #[strum(to_string = "left", serialize = "west")]
    Left,
}

impl Direction {
    /// Unit (row, col) delta for one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A fully parsed turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Quit the game.
    Quit,
    /// Show the help screen. Consumes no turn.
    Help,
    /// Move a number of steps in one direction.
    Move { direction: Direction, steps: u32 },
}

/// Recoverable command-parsing errors. The turn loop reports the message
/// and continues; no game state changes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid input, required: direction and step(s), see 'help'")]
    BadShape,

    #[error("invalid direction input!")]
    UnknownDirection,

    #[error("invalid step input! needed: a non-negative integer")]
    InvalidStep,
}

/// Parse one line of player input under the given rule set.
///
/// `q` is matched before lowercasing, then `help`, then exactly two
/// whitespace-separated tokens. Negative or non-integer step counts are
/// rejected rather than fed to the per-step movement loop.
pub fn parse(input: &str, mode: GameMode) -> Result<Command, CommandError> {
    let input = input.trim();
    if input == "q" {
        return Ok(Command::Quit);
    }
    if input.eq_ignore_ascii_case("help") {
        return Ok(Command::Help);
    }

    let input = input.to_ascii_lowercase();
    let mut tokens = input.split_whitespace();
    let (Some(direction), Some(steps), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(CommandError::BadShape);
    };

    let direction =
        Direction::from_str(direction).map_err(|_| CommandError::UnknownDirection)?;
    if !mode.directions().contains(&direction) {
        return Err(CommandError::UnknownDirection);
    }

    let steps: u32 = steps.parse().map_err(|_| CommandError::InvalidStep)?;

    Ok(Command::Move { direction, steps })
}
