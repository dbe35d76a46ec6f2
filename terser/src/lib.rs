//! HL7 terser paths.
//!
//! Parses location expressions such as `PID-3(2)-1` into a [`Query`] that a
//! message evaluator can use to navigate segment, field, component and
//! subcomponent levels.

pub mod error;
pub mod path;

pub use error::{Error, RepeatDefect, Result};
pub use path::{parse_path, Level, Query, Resolved, Selector};
