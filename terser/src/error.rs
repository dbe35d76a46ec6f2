//! Error types for terser path parsing.

use std::fmt;

use crate::path::Level;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Missing segment name at position {position}")]
    MissingSegment { position: usize },

    #[error("Invalid {level} repeat at position {position}: {defect}")]
    InvalidRepeat {
        level: Level,
        position: usize,
        defect: RepeatDefect,
    },

    #[error("Unexpected {} in {level} at position {position}", describe(.found))]
    UnexpectedCharacter {
        level: Level,
        position: usize,
        found: char,
    },

    #[error("Missing {level} number at position {position}")]
    MissingNumber { level: Level, position: usize },

    #[error("Number out of range in {level} at position {position}")]
    NumberOutOfRange { level: Level, position: usize },

    #[error("Too many levels at position {position}: at most field, component and subcomponent may follow the segment")]
    TooManyLevels { position: usize },

    #[error("Trailing content at position {position}: {rest:?}")]
    TrailingContent { position: usize, rest: String },

    #[error("Level gap: {level} given without {missing}")]
    LevelGap { level: Level, missing: Level },
}

impl Error {
    /// Byte offset into the input where the problem was detected.
    ///
    /// `None` for errors found in an already structured query.
    pub fn position(&self) -> Option<usize> {
        let position = match self {
            Error::MissingSegment { position }
            | Error::InvalidRepeat { position, .. }
            | Error::UnexpectedCharacter { position, .. }
            | Error::MissingNumber { position, .. }
            | Error::NumberOutOfRange { position, .. }
            | Error::TooManyLevels { position }
            | Error::TrailingContent { position, .. } => *position,
            Error::LevelGap { .. } => return None,
        };
        Some(position)
    }
}

/// What was wrong inside a parenthesized repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatDefect {
    /// `()`
    Empty,
    /// `(x)`, `(-1)`, `( 1)`
    NotNumeric(char),
    /// `(1` at end of input
    Unterminated,
}

impl fmt::Display for RepeatDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatDefect::Empty => write!(f, "empty parentheses"),
            RepeatDefect::NotNumeric(c) => write!(f, "expected digit, found {}", describe(c)),
            RepeatDefect::Unterminated => write!(f, "missing closing parenthesis"),
        }
    }
}

fn describe(c: &char) -> String {
    if c.is_ascii_graphic() {
        format!("character '{}'", c)
    } else {
        format!("character {:?}", c)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
