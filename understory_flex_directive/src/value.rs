// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed directive values.

use core::fmt;

use crate::reference::{CrossReference, ReferenceSyntaxError};
use crate::registry::Edge;

/// An enumerated keyword understood by the layout engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Stack children horizontally.
    Row,
    /// Stack children vertically.
    Column,
    /// Stack children horizontally, last child first.
    RowReverse,
    /// Stack children vertically, last child first.
    ColumnReverse,
    /// Stretch along the cross axis.
    Stretch,
    /// Center along the cross axis.
    Center,
    /// Align to the cross-start edge.
    FlexStart,
    /// Align to the cross-end edge.
    FlexEnd,
    /// Align baselines.
    Baseline,
}

/// Keywords accepted by `flex-direction`.
pub const FLEX_DIRECTION_KEYWORDS: &[(&str, Keyword)] = &[
    ("row", Keyword::Row),
    ("column", Keyword::Column),
    ("row-reverse", Keyword::RowReverse),
    ("column-reverse", Keyword::ColumnReverse),
];

/// Keywords accepted by `align-items` and `align-self`.
pub const ALIGN_KEYWORDS: &[(&str, Keyword)] = &[
    ("stretch", Keyword::Stretch),
    ("center", Keyword::Center),
    ("flex-start", Keyword::FlexStart),
    ("flex-end", Keyword::FlexEnd),
    ("baseline", Keyword::Baseline),
];

/// A resolved argument, ready to hand to the layout engine operation of its property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Argument {
    /// An enumerated keyword.
    Keyword(Keyword),
    /// A plain number (lengths are in layout units).
    Number(f32),
    /// A number for one edge of an edge-qualified property.
    Edge(Edge, f32),
}

/// Outcome of resolving a raw value.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// The value could be resolved immediately.
    Ready(Argument),
    /// The value names another node's computed geometry.
    ///
    /// Once the referenced number is known, pass it to
    /// [`PropertySpec::resolve_number`](crate::PropertySpec::resolve_number).
    Reference(CrossReference),
}

/// Error returned when a value does not fit its property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// Not one of the property's keywords.
    UnknownKeyword,
    /// Not a finite numeric literal.
    InvalidNumber,
    /// `auto` on a property that has no measurement axis.
    AutoWithoutAxis,
    /// A malformed cross-reference.
    Reference(ReferenceSyntaxError),
}

impl ValueError {
    /// Returns `true` for errors that make downstream layout meaningless.
    ///
    /// Only malformed cross-references are fatal; everything else can be skipped.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword => f.write_str("unknown keyword"),
            Self::InvalidNumber => f.write_str("not a finite number"),
            Self::AutoWithoutAxis => f.write_str("`auto` is not supported for this property"),
            Self::Reference(err) => write!(f, "invalid cross-reference: {err}"),
        }
    }
}

impl core::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Reference(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ReferenceSyntaxError> for ValueError {
    fn from(err: ReferenceSyntaxError) -> Self {
        Self::Reference(err)
    }
}

pub(crate) fn parse_number(raw: &str) -> Result<f32, ValueError> {
    raw.parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ValueError::InvalidNumber)
}

pub(crate) fn lookup_keyword(
    table: &[(&'static str, Keyword)],
    raw: &str,
) -> Result<Keyword, ValueError> {
    table
        .iter()
        .find_map(|(name, keyword)| (*name == raw).then_some(*keyword))
        .ok_or(ValueError::UnknownKeyword)
}
