// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flex Directive: the layout mini-language carried in node attributes.
//!
//! A layout directive attribute is a list of `name: value` declarations separated by
//! semicolons, for example `flex-direction: column; flex-grow: 1; margin-left: 25`.
//! This crate knows how to split such a string, which property names are recognized, and
//! how each value is turned into a typed [`Argument`] for a layout engine.
//!
//! It does not talk to a layout engine or a visual tree itself. Callers provide a
//! measurement callback for `auto` values, and receive a [`CrossReference`] for values that
//! depend on another node's computed geometry.
//!
//! ```rust
//! use understory_flex_directive::{
//!     Argument, Axis, Edge, Operation, PropertyRegistry, Resolved, directives,
//! };
//!
//! let registry = PropertyRegistry::standard();
//! let mut resolved = Vec::new();
//! for directive in directives("width: auto; margin-left: 10") {
//!     let spec = registry.get(directive.property).unwrap();
//!     let value = directive.value.unwrap();
//!     // Pretend the node renders 42 units wide.
//!     let measured = spec.resolve(value, |axis| match axis {
//!         Axis::Horizontal => 42.0,
//!         Axis::Vertical => 0.0,
//!     });
//!     resolved.push((spec.operation(), measured.unwrap()));
//! }
//!
//! assert_eq!(
//!     resolved,
//!     [
//!         (Operation::Width, Resolved::Ready(Argument::Number(42.0))),
//!         (Operation::Margin, Resolved::Ready(Argument::Edge(Edge::Left, 10.0))),
//!     ]
//! );
//! ```
//!
//! ## Value grammar
//!
//! - A keyword, for enumerated properties such as `flex-direction` and `align-items`.
//! - A numeric literal.
//! - `auto`, replaced by the node's rendered size along the property's [`Axis`].
//! - `$<selector>#<field>`, a [`CrossReference`] to the computed `left`, `top`, `width` or
//!   `height` of the single node matched by `selector`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod directive;
mod reference;
mod registry;
mod value;

pub use directive::{Directive, Directives, directives};
pub use reference::{CrossReference, GeometryField, REFERENCE_SIGIL, ReferenceSyntaxError};
pub use registry::{Axis, Edge, Operation, PropertyRegistry, PropertySpec, ValueKind};
pub use value::{ALIGN_KEYWORDS, Argument, FLEX_DIRECTION_KEYWORDS, Keyword, Resolved, ValueError};
