// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flex Attr: flexbox layout driven by node attributes, backed by Taffy.
//!
//! Visual nodes opt into layout by carrying a directive attribute such as
//! `flex-direction: column; flex-grow: 1; margin-left: 25` (the language is described in
//! [`understory_flex_directive`]). [`FlexAttrLayout`] mirrors every such node into a
//! [`taffy::TaffyTree`], computes the layout for a container size, and writes each node's
//! computed offset back as a `translate(<left>, <top>)` transform.
//!
//! ```rust
//! use kurbo::Size;
//! use understory_flex_attr::{AttrTree, FlexAttrLayout, GeometryField};
//!
//! let mut tree = AttrTree::new();
//! let svg = tree.insert_with_attributes(None, "svg", &[("layout", "flex-direction: row")]);
//! let axis = tree.insert_with_attributes(
//!     Some(svg),
//!     "g",
//!     &[("class", "axis"), ("layout", "width: auto")],
//! );
//! let bars = tree.insert_with_attributes(Some(svg), "g", &[("layout", "flex-grow: 1")]);
//! tree.set_rendered_size(axis, Size::new(40.0, 300.0));
//!
//! let mut layout = FlexAttrLayout::new();
//! layout.parse_node_hierarchy(&tree, svg).unwrap();
//! layout.calculate_layout(&tree, 400.0, 300.0).unwrap();
//! layout.apply_layout(&mut tree).unwrap();
//!
//! assert_eq!(layout.computed(bars, GeometryField::Width), Some(360.0));
//! assert_eq!(tree.attribute(bars, "transform"), Some("translate(40, 0)"));
//! ```
//!
//! ## Pieces
//!
//! - [`FlexAttrLayout::parse_node_hierarchy`] builds the layout tree. Only nodes with the
//!   directive attribute take part; siblings without it are skipped and do not take a child
//!   slot (see [`SiblingPolicy`]).
//! - [`FlexAttrLayout::calculate_layout`] runs layout twice, resolving cross-references such as
//!   `$.axis#width` in between. Those need another node's computed geometry, so they are
//!   deferred until the first pass has run.
//! - [`FlexAttrLayout::apply_layout`] writes translations, replacing only the translation it
//!   wrote last time.
//! - [`FlexAttrLayout::geometry`] and friends expose computed geometry, for example to size a
//!   chart scale to the area a node was given.
//!
//! The visual tree is reached through the [`VisualTree`] trait. [`AttrTree`] is a simple
//! in-memory implementation with a small selector language, handy for headless layout and
//! tests.
//!
//! ## Problems in directives
//!
//! Unrecognized properties and values that do not fit their property are skipped and reported
//! as [`Diagnostic`]s (also logged through the `log` facade at warn level). Cross-references
//! that are malformed or do not name exactly one laid-out node make the operation fail with a
//! [`LayoutError`], since any layout depending on them would be meaningless.

mod apply;
mod attr_tree;
mod config;
mod diagnostic;
mod driver;
mod error;
mod layout;
mod resolve;
mod selector;
mod style;
mod sync;
mod visual;

pub use apply::translation;
pub use attr_tree::{AttrTree, ElementId};
pub use config::{AttrLayoutConfig, SiblingPolicy};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{LayoutError, ReferenceErrorKind};
pub use layout::{FlexAttrLayout, layout_to_rect};
pub use visual::VisualTree;

pub use understory_flex_directive::GeometryField;
