//! Terser path parser.
//!
//! # Syntax Overview
//!
//! Full pattern: `SEG(r)-F(r)-C(r)-S(r)`
//!
//! - **Segment**: name up to the first `-` or `(`, e.g. `MSH`, `PV1`
//! - **Field**: first dash group, `PID-3`
//! - **Component**: second dash group, `PID-3-1`
//! - **Subcomponent**: third dash group, `PID-3-1-2`
//! - **Repeat**: optional `(n)` after any level, `OBX(2)-5(1)`
//!
//! An unwritten field resolves to 0 and an unwritten component or
//! subcomponent to 1; the `has_*` accessors tell the two cases apart.

mod parser;
mod query;

pub use parser::parse_path;
pub use query::{Level, Query, Resolved, Selector};
