//! The parsed path descriptor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the four nesting levels a path can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Segment,
    Field,
    Component,
    SubComponent,
}

impl Level {
    /// Levels that follow the segment, in path order.
    pub const NESTED: [Level; 3] = [Level::Field, Level::Component, Level::SubComponent];

    /// The level one dash deeper, if any.
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Segment => Some(Level::Field),
            Level::Field => Some(Level::Component),
            Level::Component => Some(Level::SubComponent),
            Level::SubComponent => None,
        }
    }

    /// Index an evaluator should use when the level was not written.
    ///
    /// Fields have no implicit default (0 means "the whole segment"), while
    /// components and subcomponents address the first one.
    pub fn default_index(self) -> usize {
        match self {
            Level::Segment | Level::Field => 0,
            Level::Component | Level::SubComponent => 1,
        }
    }

    /// Lowercase name used in messages and output.
    pub fn name(self) -> &'static str {
        match self {
            Level::Segment => "segment",
            Level::Field => "field",
            Level::Component => "component",
            Level::SubComponent => "subcomponent",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A numeric level written in the path, e.g. the `4(5)` in `PID-3-4(5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    /// The number after the dash.
    pub index: usize,
    /// The parenthesized repeat, if written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<usize>,
}

impl Selector {
    pub fn new(index: usize) -> Self {
        Self { index, repeat: None }
    }

    pub fn with_repeat(index: usize, repeat: usize) -> Self {
        Self {
            index,
            repeat: Some(repeat),
        }
    }
}

/// A parsed terser path.
///
/// Each level below the segment is `None` when the path stopped before it.
/// The accessor methods resolve absent levels to their addressing defaults
/// (see [`Level::default_index`]) while the `has_*` methods report whether
/// the level was actually written.
///
/// Deserializing applies the same checks as parsing: the segment name must
/// be valid and levels must nest without gaps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuery")]
pub struct Query {
    /// Segment name (MSH, PID, PV1, ...)
    pub segment: String,
    /// Segment repeat: MSH(1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_repeat: Option<usize>,
    /// First dash group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Selector>,
    /// Second dash group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Selector>,
    /// Third dash group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcomponent: Option<Selector>,
}

impl Query {
    /// A query addressing a whole segment.
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            segment_repeat: None,
            field: None,
            component: None,
            subcomponent: None,
        }
    }

    /// Selector written at `level`. Always `None` for [`Level::Segment`].
    pub fn selector(&self, level: Level) -> Option<&Selector> {
        match level {
            Level::Segment => None,
            Level::Field => self.field.as_ref(),
            Level::Component => self.component.as_ref(),
            Level::SubComponent => self.subcomponent.as_ref(),
        }
    }

    pub(crate) fn set_index(&mut self, level: Level, index: usize) {
        let slot = match level {
            Level::Segment => return,
            Level::Field => &mut self.field,
            Level::Component => &mut self.component,
            Level::SubComponent => &mut self.subcomponent,
        };
        *slot = Some(Selector::new(index));
    }

    pub(crate) fn set_repeat(&mut self, level: Level, repeat: usize) {
        let slot = match level {
            Level::Segment => {
                self.segment_repeat = Some(repeat);
                return;
            }
            Level::Field => &mut self.field,
            Level::Component => &mut self.component,
            Level::SubComponent => &mut self.subcomponent,
        };
        if let Some(selector) = slot {
            selector.repeat = Some(repeat);
        }
    }

    /// Check what the parser guarantees for queries built by other means.
    pub fn validate(&self) -> Result<()> {
        super::parser::check_segment(&self.segment)?;

        let mut missing = None;
        for level in Level::NESTED {
            match (self.selector(level), missing) {
                (Some(_), Some(missing)) => return Err(Error::LevelGap { level, missing }),
                (None, None) => missing = Some(level),
                _ => {}
            }
        }
        Ok(())
    }

    /// Deepest level written in the path.
    pub fn depth(&self) -> Level {
        Level::NESTED
            .iter()
            .rev()
            .copied()
            .find(|level| self.selector(*level).is_some())
            .unwrap_or(Level::Segment)
    }

    /// Resolved index at `level`, falling back to the level's default.
    pub fn index(&self, level: Level) -> usize {
        self.selector(level)
            .map(|s| s.index)
            .unwrap_or_else(|| level.default_index())
    }

    /// Resolved repeat at `level`, 0 when not written.
    pub fn repeat(&self, level: Level) -> usize {
        self.repeat_of(level).unwrap_or(0)
    }

    /// Whether `level` was written. Always true for the segment.
    pub fn has_level(&self, level: Level) -> bool {
        level == Level::Segment || self.selector(level).is_some()
    }

    /// Whether a `(n)` repeat was written at `level`.
    pub fn has_repeat(&self, level: Level) -> bool {
        self.repeat_of(level).is_some()
    }

    fn repeat_of(&self, level: Level) -> Option<usize> {
        match level {
            Level::Segment => self.segment_repeat,
            _ => self.selector(level).and_then(|s| s.repeat),
        }
    }

    pub fn segment_repeat(&self) -> usize {
        self.repeat(Level::Segment)
    }

    pub fn has_segment_repeat(&self) -> bool {
        self.has_repeat(Level::Segment)
    }

    pub fn field(&self) -> usize {
        self.index(Level::Field)
    }

    pub fn has_field(&self) -> bool {
        self.has_level(Level::Field)
    }

    pub fn field_repeat(&self) -> usize {
        self.repeat(Level::Field)
    }

    pub fn has_field_repeat(&self) -> bool {
        self.has_repeat(Level::Field)
    }

    pub fn component(&self) -> usize {
        self.index(Level::Component)
    }

    pub fn has_component(&self) -> bool {
        self.has_level(Level::Component)
    }

    pub fn component_repeat(&self) -> usize {
        self.repeat(Level::Component)
    }

    pub fn has_component_repeat(&self) -> bool {
        self.has_repeat(Level::Component)
    }

    pub fn subcomponent(&self) -> usize {
        self.index(Level::SubComponent)
    }

    pub fn has_subcomponent(&self) -> bool {
        self.has_level(Level::SubComponent)
    }

    pub fn subcomponent_repeat(&self) -> usize {
        self.repeat(Level::SubComponent)
    }

    pub fn has_subcomponent_repeat(&self) -> bool {
        self.has_repeat(Level::SubComponent)
    }

    /// Flatten into explicit value/flag pairs with defaults applied.
    pub fn resolved(&self) -> Resolved {
        Resolved {
            segment: self.segment.clone(),
            segment_repeat: self.segment_repeat(),
            has_segment_repeat: self.has_segment_repeat(),
            field: self.field(),
            has_field: self.has_field(),
            field_repeat: self.field_repeat(),
            has_field_repeat: self.has_field_repeat(),
            component: self.component(),
            has_component: self.has_component(),
            component_repeat: self.component_repeat(),
            has_component_repeat: self.has_component_repeat(),
            subcomponent: self.subcomponent(),
            has_subcomponent: self.has_subcomponent(),
            subcomponent_repeat: self.subcomponent_repeat(),
            has_subcomponent_repeat: self.has_subcomponent_repeat(),
        }
    }
}

/// Wire form of [`Query`] before validation.
#[derive(Deserialize)]
struct RawQuery {
    segment: String,
    #[serde(default)]
    segment_repeat: Option<usize>,
    #[serde(default)]
    field: Option<Selector>,
    #[serde(default)]
    component: Option<Selector>,
    #[serde(default)]
    subcomponent: Option<Selector>,
}

impl TryFrom<RawQuery> for Query {
    type Error = Error;

    fn try_from(raw: RawQuery) -> Result<Self> {
        let query = Query {
            segment: raw.segment,
            segment_repeat: raw.segment_repeat,
            field: raw.field,
            component: raw.component,
            subcomponent: raw.subcomponent,
        };
        query.validate()?;
        Ok(query)
    }
}

/// Flat view of a [`Query`]: every value with defaults applied, next to the
/// flag saying whether it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub segment: String,
    pub segment_repeat: usize,
    pub has_segment_repeat: bool,
    pub field: usize,
    pub has_field: bool,
    pub field_repeat: usize,
    pub has_field_repeat: bool,
    pub component: usize,
    pub has_component: bool,
    pub component_repeat: usize,
    pub has_component_repeat: bool,
    pub subcomponent: usize,
    pub has_subcomponent: bool,
    pub subcomponent_repeat: usize,
    pub has_subcomponent_repeat: bool,
}

/// Canonical path form. Leading zeros are dropped, and nothing is printed
/// below the first unwritten level.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segment)?;
        if let Some(repeat) = self.segment_repeat {
            write!(f, "({})", repeat)?;
        }
        for level in Level::NESTED {
            let Some(selector) = self.selector(level) else {
                break;
            };
            write!(f, "-{}", selector.index)?;
            if let Some(repeat) = selector.repeat {
                write!(f, "({})", repeat)?;
            }
        }
        Ok(())
    }
}
