// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-pass layout computation.

use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, NodeId as TaffyNode, Size, Style,
};

use crate::error::LayoutError;
use crate::layout::FlexAttrLayout;
use crate::visual::VisualTree;

impl<N> FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// Compute the layout for a container of `width` × `height`.
    ///
    /// The root fills the container along any axis it has no authored size for, less its
    /// margins, and is offset by its leading margins. Layout runs twice: the first pass makes
    /// computed geometry available, deferred cross-references are then resolved in the order
    /// they were parsed, and the second pass picks up the values they set. The second pass
    /// runs even with nothing deferred.
    ///
    /// Resolved cross-references stay in place as plain numbers; calling this again with a
    /// new container size does not re-derive them.
    ///
    /// ```rust
    /// use kurbo::Rect;
    /// use understory_flex_attr::{AttrTree, FlexAttrLayout};
    ///
    /// let mut tree = AttrTree::new();
    /// let root = tree.insert_with_attributes(None, "svg", &[("layout", "flex-direction: column")]);
    /// let header = tree.insert_with_attributes(Some(root), "g", &[("layout", "height: 100")]);
    /// let body = tree.insert_with_attributes(Some(root), "g", &[("layout", "flex-grow: 1")]);
    ///
    /// let mut layout = FlexAttrLayout::new();
    /// layout.parse_node_hierarchy(&tree, root).unwrap();
    /// layout.calculate_layout(&tree, 500.0, 300.0).unwrap();
    ///
    /// assert_eq!(layout.geometry(header), Some(Rect::new(0.0, 0.0, 500.0, 100.0)));
    /// assert_eq!(layout.geometry(body), Some(Rect::new(0.0, 100.0, 500.0, 300.0)));
    /// ```
    pub fn calculate_layout<T>(
        &mut self,
        tree: &T,
        width: f32,
        height: f32,
    ) -> Result<(), LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        let root = self.root_layout_node().ok_or(LayoutError::NotParsed)?;

        self.compute(root, width, height)?;
        self.layout_calculated = true;

        self.drain_pending(tree)?;

        self.compute(root, width, height)?;
        Ok(())
    }

    fn compute(&mut self, root: TaffyNode, width: f32, height: f32) -> Result<(), LayoutError<N>> {
        log::debug!("computing layout for a {width}x{height} container");
        let viewport = self.viewport(width, height)?;

        // The root is a flex item of the viewport only for the computation: it stretches across
        // and grows down along any axis it has no authored size for, inside its own margins.
        let authored = self.taffy.style(root)?.clone();
        let filling = Style {
            flex_grow: if authored.size.height == Dimension::auto() {
                1.0
            } else {
                0.0
            },
            flex_shrink: 0.0,
            align_self: Some(AlignItems::Stretch),
            ..authored.clone()
        };
        let changed = filling != authored;
        if changed {
            self.taffy.set_style(root, filling)?;
        }
        let result = self.taffy.compute_layout(
            viewport,
            Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::Definite(height),
            },
        );
        // Computed layouts survive the style reset; only the cache is cleared.
        if changed {
            self.taffy.set_style(root, authored)?;
        }
        result.map_err(LayoutError::from)
    }

    /// The unregistered node standing in for the container, holding only the root.
    fn viewport(&mut self, width: f32, height: f32) -> Result<TaffyNode, LayoutError<N>> {
        let style = Style {
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::length(width),
                height: Dimension::length(height),
            },
            ..Style::DEFAULT
        };
        let viewport = match self.viewport {
            Some(viewport) => {
                self.taffy.set_style(viewport, style)?;
                viewport
            }
            None => {
                let viewport = self.taffy.new_leaf(style)?;
                self.viewport = Some(viewport);
                viewport
            }
        };
        if let Some(root) = self.root_layout_node()
            && self.taffy.parent(root) != Some(viewport)
        {
            self.taffy.set_children(viewport, &[root])?;
        }
        Ok(viewport)
    }
}
