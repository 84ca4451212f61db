// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing computed positions back onto visual nodes.

use taffy::{Layout, NodeId as TaffyNode};

use crate::error::LayoutError;
use crate::layout::FlexAttrLayout;
use crate::visual::VisualTree;

impl<N> FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// Position every registered visual node at its computed offset.
    ///
    /// Each node's transform attribute gets `translate(<left>, <top>)` prepended. The
    /// translation written by the previous call is removed first, so repeated calls do not
    /// accumulate, and transform content authored by others is preserved. Nodes released by a
    /// re-parse since the last call only lose their translation.
    ///
    /// ```rust
    /// use understory_flex_attr::{AttrTree, FlexAttrLayout};
    ///
    /// let mut tree = AttrTree::new();
    /// let root = tree.insert_with_attributes(None, "svg", &[("layout", "padding-left: 25")]);
    /// let axis = tree.insert_with_attributes(
    ///     Some(root),
    ///     "g",
    ///     &[("layout", "height: 20"), ("transform", "scale(1, 1)")],
    /// );
    ///
    /// let mut layout = FlexAttrLayout::new();
    /// layout.parse_node_hierarchy(&tree, root).unwrap();
    /// layout.calculate_layout(&tree, 200.0, 100.0).unwrap();
    /// layout.apply_layout(&mut tree).unwrap();
    /// layout.apply_layout(&mut tree).unwrap();
    ///
    /// assert_eq!(tree.attribute(axis, "transform"), Some("translate(25, 0)scale(1, 1)"));
    /// ```
    pub fn apply_layout<T>(&mut self, tree: &mut T) -> Result<(), LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        let attribute = self.config.transform_attribute.as_str();
        for (node, previous) in self.released_transforms.drain(..) {
            let current = tree.attribute(node, attribute).unwrap_or_default();
            let remainder = strip_first(current, &previous);
            if remainder != current {
                tree.set_attribute(node, attribute, &remainder);
            }
        }
        for (&node, &layout_node) in &self.nodes {
            let layout = self.taffy.layout(layout_node)?;
            let translation = translation(layout);

            let current = tree.attribute(node, attribute).unwrap_or_default();
            let previous = self.last_transforms.get(&node).map_or("", String::as_str);
            let remainder = strip_first(current, previous);

            tree.set_attribute(node, attribute, &format!("{translation}{remainder}"));
            self.last_transforms.insert(node, translation);
        }
        Ok(())
    }

    /// Visit every registered node with its computed Taffy layout.
    ///
    /// This is the hook for consumers that position nodes by other means than the transform
    /// attribute, for example by building a `kurbo::Affine` per node.
    pub fn apply_layout_with<F>(&self, mut apply: F) -> Result<(), LayoutError<N>>
    where
        F: FnMut(N, TaffyNode, &Layout),
    {
        for (&node, &layout_node) in &self.nodes {
            let layout = self.taffy.layout(layout_node)?;
            apply(node, layout_node, layout);
        }
        Ok(())
    }
}

/// The translation command for a computed layout.
///
/// ```rust
/// use taffy::prelude::Layout;
/// use understory_flex_attr::translation;
///
/// let mut layout = Layout::new();
/// layout.location.x = 12.5;
/// layout.location.y = 40.0;
/// assert_eq!(translation(&layout), "translate(12.5, 40)");
/// ```
#[must_use]
pub fn translation(layout: &Layout) -> String {
    // Adding zero folds -0 into 0.
    let left = layout.location.x + 0.0;
    let top = layout.location.y + 0.0;
    format!("translate({left}, {top})")
}

fn strip_first(transform: &str, previous: &str) -> String {
    if previous.is_empty() {
        transform.to_owned()
    } else {
        transform.replacen(previous, "", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_first_removes_one_occurrence() {
        assert_eq!(
            strip_first("translate(1, 2)rotate(-90)", "translate(1, 2)"),
            "rotate(-90)"
        );
        assert_eq!(
            strip_first("translate(1, 2)translate(1, 2)", "translate(1, 2)"),
            "translate(1, 2)"
        );
        assert_eq!(strip_first("scale(0, 1)", ""), "scale(0, 1)");
    }

    #[test]
    fn translation_normalizes_negative_zero() {
        let mut layout = Layout::new();
        layout.location.x = -0.0;
        layout.location.y = -3.0;
        assert_eq!(translation(&layout), "translate(0, -3)");
    }
}
