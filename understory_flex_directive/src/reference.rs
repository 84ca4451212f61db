// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-references to another node's computed geometry.

use alloc::string::{String, ToString};
use core::fmt;

/// Leading character that marks a value as a [`CrossReference`].
pub const REFERENCE_SIGIL: char = '$';

/// A computed geometry output of the layout engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryField {
    /// Offset from the parent's left edge.
    Left,
    /// Offset from the parent's top edge.
    Top,
    /// Computed width.
    Width,
    /// Computed height.
    Height,
}

impl GeometryField {
    /// All fields, in declaration order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Width, Self::Height];

    /// Parse a field name (`left`, `top`, `width` or `height`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// The field's name in the directive language.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for GeometryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed `$<selector>#<field>` value.
///
/// The selector is kept verbatim; locating the node it names is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrossReference {
    /// Selector that must match exactly one node.
    pub selector: String,
    /// Geometry field to read from the matched node.
    pub field: GeometryField,
}

impl CrossReference {
    /// Returns `true` if `value` uses the cross-reference sigil.
    #[must_use]
    pub fn is_reference(value: &str) -> bool {
        value.starts_with(REFERENCE_SIGIL)
    }

    /// Parse a cross-reference value.
    ///
    /// The selector and field are separated by the *last* `#`, so id selectors work:
    ///
    /// ```rust
    /// use understory_flex_directive::{CrossReference, GeometryField};
    ///
    /// let r = CrossReference::parse("$#legend#height").unwrap();
    /// assert_eq!(r.selector, "#legend");
    /// assert_eq!(r.field, GeometryField::Height);
    /// ```
    pub fn parse(value: &str) -> Result<Self, ReferenceSyntaxError> {
        let body = value
            .strip_prefix(REFERENCE_SIGIL)
            .ok_or(ReferenceSyntaxError::MissingSigil)?;
        let (selector, field) = body
            .rsplit_once('#')
            .ok_or(ReferenceSyntaxError::MissingField)?;
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(ReferenceSyntaxError::EmptySelector);
        }
        let field = field.trim();
        let field = GeometryField::parse(field)
            .ok_or_else(|| ReferenceSyntaxError::UnknownField(field.to_string()))?;
        Ok(Self {
            selector: selector.to_string(),
            field,
        })
    }
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_SIGIL}{}#{}", self.selector, self.field)
    }
}

/// Error returned when a cross-reference value is malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceSyntaxError {
    /// The value does not start with [`REFERENCE_SIGIL`].
    MissingSigil,
    /// No `#<field>` suffix.
    MissingField,
    /// Nothing between the sigil and the field.
    EmptySelector,
    /// The field is not one of `left`, `top`, `width`, `height`.
    UnknownField(String),
}

impl fmt::Display for ReferenceSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSigil => write!(f, "cross-reference must start with `{REFERENCE_SIGIL}`"),
            Self::MissingField => f.write_str("cross-reference has no `#<field>` suffix"),
            Self::EmptySelector => f.write_str("cross-reference has an empty selector"),
            Self::UnknownField(field) => write!(
                f,
                "unknown geometry field `{field}` (expected left, top, width or height)"
            ),
        }
    }
}

impl core::error::Error for ReferenceSyntaxError {}
