// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual tree collaborator.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Size;

/// A retained tree of visual nodes carrying string attributes.
///
/// The layout adapter never creates or destroys visual nodes. It reads the directive
/// attribute, enumerates children, measures nodes for `auto` values, looks up nodes named by
/// cross-references, and writes the transform attribute.
pub trait VisualTree {
    /// Handle to a node in this tree.
    type Node: Copy + Eq + Hash + Debug;

    /// Read a named attribute.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Write a named attribute.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// The node's children, in stable document order.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node>;

    /// The node's current rendered size.
    fn rendered_size(&self, node: Self::Node) -> Size;

    /// All nodes matched by `selector`, in document order.
    ///
    /// A selector the tree cannot interpret matches nothing.
    fn select(&self, selector: &str) -> impl Iterator<Item = Self::Node>;
}
