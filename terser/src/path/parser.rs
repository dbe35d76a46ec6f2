//! State machine for terser paths: `SEG(r)-F(r)-C(r)-S(r)`.

use std::str::FromStr;

use super::query::{Level, Query};
use crate::error::{Error, RepeatDefect, Result};

/// Where the scanner is in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Reading the segment name.
    Segment,
    /// Just after a name or number; an optional `(n)` may follow.
    Repeat(Level),
    /// A level is complete; only `-` or end of input may follow.
    Separator(Level),
    /// Just after a `-`; digits must follow.
    Number(Level),
}

/// Parse a terser path into a [`Query`].
///
/// Accepts `segment ("(" uint ")")? ("-" uint ("(" uint ")")?){0,3}` and
/// nothing else: no whitespace, no signs, no empty parentheses.
pub fn parse_path(input: &str) -> Result<Query> {
    match scan(input) {
        Ok(query) => {
            log::debug!("parsed {:?} as {} (depth {})", input, query, query.depth());
            Ok(query)
        }
        Err(e) => {
            log::debug!("failed to parse {:?}: {}", input, e);
            Err(e)
        }
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_path(s)
    }
}

fn scan(input: &str) -> Result<Query> {
    let mut cursor = Cursor::new(input);
    let mut query = Query::new(String::new());
    let mut state = State::Segment;

    loop {
        log::trace!("{:?} at position {}", state, cursor.pos);
        state = match state {
            State::Segment => {
                query.segment = segment_name(&mut cursor)?.to_string();
                State::Repeat(Level::Segment)
            }
            State::Number(level) => {
                let index = number(&mut cursor, level)?;
                query.set_index(level, index);
                State::Repeat(level)
            }
            State::Repeat(level) => match cursor.peek() {
                Some('(') => {
                    let repeat = repeat(&mut cursor, level)?;
                    query.set_repeat(level, repeat);
                    State::Separator(level)
                }
                None | Some('-') => State::Separator(level),
                Some(found) => {
                    return Err(Error::UnexpectedCharacter {
                        level,
                        position: cursor.pos,
                        found,
                    })
                }
            },
            State::Separator(level) => match cursor.peek() {
                None => return Ok(query),
                Some('-') => {
                    let next = level
                        .next()
                        .ok_or(Error::TooManyLevels { position: cursor.pos })?;
                    cursor.bump();
                    State::Number(next)
                }
                Some(_) => {
                    return Err(Error::TrailingContent {
                        position: cursor.pos,
                        rest: cursor.rest().to_string(),
                    })
                }
            },
        };
    }
}

/// Read the segment name: everything up to the first delimiter.
fn segment_name<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str> {
    let start = cursor.pos;
    let name = cursor.take_while(is_segment_char);
    if !name.is_empty() {
        return Ok(name);
    }

    match cursor.peek() {
        None | Some('-' | '(' | ')') => Err(Error::MissingSegment { position: start }),
        Some(found) => Err(Error::UnexpectedCharacter {
            level: Level::Segment,
            position: start,
            found,
        }),
    }
}

/// A segment name on its own must be consumed entirely by [`segment_name`].
pub(crate) fn check_segment(segment: &str) -> Result<()> {
    let mut cursor = Cursor::new(segment);
    segment_name(&mut cursor)?;
    match cursor.peek() {
        None => Ok(()),
        Some(found) => Err(Error::UnexpectedCharacter {
            level: Level::Segment,
            position: cursor.pos,
            found,
        }),
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '-' | '(' | ')')
}

/// Read the number after a dash.
fn number(cursor: &mut Cursor<'_>, level: Level) -> Result<usize> {
    let start = cursor.pos;
    let digits = cursor.take_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(match cursor.peek() {
            None => Error::MissingNumber {
                level,
                position: start,
            },
            Some(found) => Error::UnexpectedCharacter {
                level,
                position: start,
                found,
            },
        });
    }
    to_usize(digits, level, start)
}

/// Read a parenthesized repeat. The cursor must be on the `(`.
fn repeat(cursor: &mut Cursor<'_>, level: Level) -> Result<usize> {
    let open = cursor.pos;
    cursor.bump();

    let start = cursor.pos;
    let digits = cursor.take_while(|c| c.is_ascii_digit());
    let defect = match cursor.peek() {
        Some(')') if !digits.is_empty() => {
            cursor.bump();
            return to_usize(digits, level, start);
        }
        Some(')') => RepeatDefect::Empty,
        Some(c) => {
            return Err(Error::InvalidRepeat {
                level,
                position: cursor.pos,
                defect: RepeatDefect::NotNumeric(c),
            })
        }
        None => RepeatDefect::Unterminated,
    };

    Err(Error::InvalidRepeat {
        level,
        position: open,
        defect,
    })
}

fn to_usize(digits: &str, level: Level, position: usize) -> Result<usize> {
    // Only overflow can fail here; `digits` is non-empty ASCII digits.
    digits
        .parse()
        .map_err(|_| Error::NumberOutOfRange { level, position })
}

/// Byte cursor over the input.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }
}
