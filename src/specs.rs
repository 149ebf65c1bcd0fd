//! Typed layout specs and the reader that produces them.
//!
//! The data model mirrors the surface language: a [`Spec`] is one parsed
//! assertion line, and its [`SpecKind`] carries the fields of the keyword
//! grammar that produced it. Distances are [`Ranges`](Range) applied to
//! box edges ([`Sides`](Side)) through [`Locations`](Location).

use std::fmt;

use crate::config::ReaderConfig;
use crate::line;

mod reader;

pub use reader::SyntaxError;

// Data model
// ==========

/// A numeric pixel interval with inclusive bounds.
///
/// An approximate distance (`~30px`) is resolved into a plain interval
/// while reading, using the configured tolerance; the model keeps no
/// memory of how the interval was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    min: i32,
    max: i32,
}

impl Range {
    /// The interval `[value, value]`.
    pub fn exact(value: i32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// The interval `[min, max]`.
    ///
    /// # Panics
    ///
    /// When `min > max`. The reader rejects reversed bounds in spec text
    /// with a [`SyntaxError`] before ever reaching this constructor.
    pub fn between(min: i32, max: i32) -> Self {
        assert!(min <= max, "reversed range bounds: {min} > {max}");
        Self { min, max }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether the interval holds a single value.
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}px", self.min)
        } else {
            write!(f, "{} to {}px", self.min, self.max)
        }
    }
}

/// One of the four box edges a location constraint applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Look up a side by its spec-text name.
    ///
    /// Matching is case sensitive: `TOP` is not a side.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            _ => None,
        }
    }

    /// The spec-text name of the side.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distance [`Range`] applied to one or more [`Sides`](Side).
///
/// Sides keep their order of appearance in the source text. The reader
/// rejects empty and duplicated side lists before constructing a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    range: Range,
    sides: Vec<Side>,
}

impl Location {
    /// Build a location from a range and a non-empty side list.
    ///
    /// # Panics
    ///
    /// When `sides` is empty.
    pub fn new(range: Range, sides: Vec<Side>) -> Self {
        assert!(!sides.is_empty(), "a location needs at least one side");
        Self { range, sides }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range)?;
        for side in &self.sides {
            write!(f, " {side}")?;
        }
        Ok(())
    }
}

/// A parsed layout spec: the normalized source text plus its typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spec {
    original_text: String,
    kind: SpecKind,
}

impl Spec {
    /// The source text with surrounding whitespace trimmed and internal
    /// whitespace runs collapsed to single spaces.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The typed form of the assertion.
    pub fn kind(&self) -> &SpecKind {
        &self.kind
    }
}

/// The typed forms a layout assertion can take.
///
/// Each variant carries only the fields its keyword grammar produces;
/// consumers match on the variants they evaluate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecKind {
    /// `inside [partly] OBJECT [location (, location)*]`
    ///
    /// Zero locations means "inside, at any distance".
    Inside {
        object: String,
        partly: bool,
        locations: Vec<Location>,
    },
    /// `contains [partly] OBJECT (, OBJECT)*`
    ///
    /// Object names keep their order and pass wildcards through verbatim.
    Contains { partly: bool, objects: Vec<String> },
    /// `near OBJECT location (, location)*`
    Near {
        object: String,
        locations: Vec<Location>,
    },
    /// `above OBJECT [range]`
    ///
    /// A missing range means "above, at any distance".
    Above {
        object: String,
        range: Option<Range>,
    },
    /// `below OBJECT [range]`
    Below {
        object: String,
        range: Option<Range>,
    },
    /// `width range`
    Width { range: Range },
    /// `height range`
    Height { range: Range },
    /// `visible`
    Visible,
    /// `absent`
    Absent,
}

// Reading
// =======

/// Read a single spec line into a [`Spec`].
///
/// The `config` parameter supplies the approximation tolerance for `~N`
/// ranges; see [`ReaderConfig::range_approximation`].
///
/// # Errors
///
/// Returns a [`SyntaxError`] with a fixed, testable message for every way
/// the line can be malformed. No partial spec is ever produced.
pub fn read(text: &str, config: &ReaderConfig) -> Result<Spec, SyntaxError> {
    let kind = reader::spec_kind(text, config)?;

    Ok(Spec {
        original_text: line::normalize(text),
        kind,
    })
}
