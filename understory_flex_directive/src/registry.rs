// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed set of recognized layout properties.
//!
//! This module provides [`PropertyRegistry`], mapping property names to a [`PropertySpec`]
//! that knows which engine [`Operation`] the property drives and how its value is parsed.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::reference::CrossReference;
use crate::value::{
    ALIGN_KEYWORDS, Argument, FLEX_DIRECTION_KEYWORDS, Keyword, Resolved, ValueError,
    lookup_keyword, parse_number,
};

/// A layout engine operation that a property drives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Set the stacking direction of a container.
    FlexDirection,
    /// Set the cross-axis alignment of a container's items.
    AlignItems,
    /// Override the cross-axis alignment of a single item.
    AlignSelf,
    /// Set the grow factor.
    FlexGrow,
    /// Set the shrink factor.
    FlexShrink,
    /// Set the width.
    Width,
    /// Set the height.
    Height,
    /// Set the margin of one edge.
    Margin,
    /// Set the padding of one edge.
    Padding,
}

/// A box edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

impl Edge {
    /// All edges, in the order they are expanded into property names.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The edge's suffix in property names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// The axis an `auto` value on this edge is measured along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }
}

/// A measurement axis for `auto` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Measure the rendered width.
    Horizontal,
    /// Measure the rendered height.
    Vertical,
}

/// How a property's raw value is parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// One of a fixed table of keywords.
    Keyword(&'static [(&'static str, Keyword)]),
    /// A number, `auto` (when an axis is given) or a cross-reference.
    NumericOrAuto(Option<Axis>),
    /// Like [`ValueKind::NumericOrAuto`], prefixed with a fixed edge.
    EdgeQualified(Edge),
}

/// Registry entry for one property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySpec {
    name: String,
    operation: Operation,
    kind: ValueKind,
}

impl PropertySpec {
    fn new(name: impl Into<String>, operation: Operation, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            operation,
            kind,
        }
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The engine operation this property drives.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// How the property's value is parsed.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The axis `auto` is measured along, if the property supports `auto`.
    #[must_use]
    pub fn auto_axis(&self) -> Option<Axis> {
        match self.kind {
            ValueKind::Keyword(_) => None,
            ValueKind::NumericOrAuto(axis) => axis,
            ValueKind::EdgeQualified(edge) => Some(edge.axis()),
        }
    }

    /// Returns `true` if the property accepts cross-references.
    #[must_use]
    pub fn accepts_reference(&self) -> bool {
        !matches!(self.kind, ValueKind::Keyword(_))
    }

    /// Resolve a raw value.
    ///
    /// `measure` is called at most once, for `auto` values, with the property's axis.
    /// Cross-references are parsed but not evaluated; see [`Resolved::Reference`].
    pub fn resolve(
        &self,
        raw: &str,
        measure: impl FnOnce(Axis) -> f32,
    ) -> Result<Resolved, ValueError> {
        if let ValueKind::Keyword(table) = self.kind {
            return lookup_keyword(table, raw).map(|kw| Resolved::Ready(Argument::Keyword(kw)));
        }
        if CrossReference::is_reference(raw) {
            return Ok(Resolved::Reference(CrossReference::parse(raw)?));
        }
        let number = if raw == "auto" {
            measure(self.auto_axis().ok_or(ValueError::AutoWithoutAxis)?)
        } else {
            parse_number(raw)?
        };
        self.resolve_number(number).map(Resolved::Ready)
    }

    /// Build the argument for an already-known number.
    ///
    /// Used once a cross-reference has been evaluated. Keyword properties reject numbers.
    pub fn resolve_number(&self, number: f32) -> Result<Argument, ValueError> {
        match self.kind {
            ValueKind::Keyword(_) => Err(ValueError::UnknownKeyword),
            ValueKind::NumericOrAuto(_) => Ok(Argument::Number(number)),
            ValueKind::EdgeQualified(edge) => Ok(Argument::Edge(edge, number)),
        }
    }
}

/// Lookup table from property names to [`PropertySpec`]s.
///
/// The standard registry is built once and never mutated afterwards.
///
/// ```rust
/// use understory_flex_directive::{Edge, Operation, PropertyRegistry, ValueKind};
///
/// let registry = PropertyRegistry::standard();
/// let spec = registry.get("padding-bottom").unwrap();
/// assert_eq!(spec.operation(), Operation::Padding);
/// assert_eq!(spec.kind(), ValueKind::EdgeQualified(Edge::Bottom));
/// assert!(registry.get("justify-content").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    specs: Vec<PropertySpec>,
    by_name: HashMap<String, usize>,
}

impl PropertyRegistry {
    /// Build the standard property set.
    ///
    /// Margin and padding entries are generated for every [`Edge`].
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.insert(PropertySpec::new(
            "flex-direction",
            Operation::FlexDirection,
            ValueKind::Keyword(FLEX_DIRECTION_KEYWORDS),
        ));
        registry.insert(PropertySpec::new(
            "align-items",
            Operation::AlignItems,
            ValueKind::Keyword(ALIGN_KEYWORDS),
        ));
        registry.insert(PropertySpec::new(
            "align-self",
            Operation::AlignSelf,
            ValueKind::Keyword(ALIGN_KEYWORDS),
        ));
        registry.insert(PropertySpec::new(
            "flex-grow",
            Operation::FlexGrow,
            ValueKind::NumericOrAuto(None),
        ));
        registry.insert(PropertySpec::new(
            "flex-shrink",
            Operation::FlexShrink,
            ValueKind::NumericOrAuto(None),
        ));
        registry.insert(PropertySpec::new(
            "width",
            Operation::Width,
            ValueKind::NumericOrAuto(Some(Axis::Horizontal)),
        ));
        registry.insert(PropertySpec::new(
            "height",
            Operation::Height,
            ValueKind::NumericOrAuto(Some(Axis::Vertical)),
        ));

        for (base, operation) in [("margin", Operation::Margin), ("padding", Operation::Padding)] {
            for edge in Edge::ALL {
                registry.insert(PropertySpec::new(
                    format!("{base}-{}", edge.name()),
                    operation,
                    ValueKind::EdgeQualified(edge),
                ));
            }
        }
        registry
    }

    fn insert(&mut self, spec: PropertySpec) {
        debug_assert!(
            !self.by_name.contains_key(spec.name()),
            "property `{}` registered twice",
            spec.name()
        );
        self.by_name.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
    }

    /// Look up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertySpec> {
        self.by_name.get(name).map(|&index| &self.specs[index])
    }

    /// Iterate over all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertySpec> + '_ {
        self.specs.iter()
    }

    /// Number of recognized properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
