// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building the layout tree from the visual tree.

use hashbrown::HashSet;
use taffy::NodeId as TaffyNode;
use understory_flex_directive::{
    Argument, Axis, Directive, Operation, Resolved, ValueError, directives,
};

use crate::config::SiblingPolicy;
use crate::diagnostic::DiagnosticKind;
use crate::error::{LayoutError, ReferenceErrorKind};
use crate::layout::FlexAttrLayout;
use crate::resolve::PendingResolution;
use crate::style::apply_argument;
use crate::visual::VisualTree;

impl<N> FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// Mirror `node` and its directive-bearing descendants into the layout tree.
    ///
    /// The first call fixes the [`root`](Self::root). Every node reached gets one layout node,
    /// its directives applied, and its directive-bearing children inserted in visual order.
    /// Children without the directive attribute are invisible to layout, along with their
    /// subtrees. `node` itself is parsed even without the attribute.
    ///
    /// Calling this again for an already parsed node reuses its layout node: directives are
    /// re-applied from the base style, the child list is rebuilt, and layout nodes of
    /// descendants that disappeared are released. The translation last written onto a released
    /// node is removed by the next [`apply_layout`](Self::apply_layout). Cross-references met
    /// before the first [`calculate_layout`](Self::calculate_layout) are deferred; afterwards
    /// they resolve immediately.
    ///
    /// Unrecognized properties and unsupported values are reported as
    /// [`Diagnostic`](crate::Diagnostic)s and skipped. Malformed or unresolvable
    /// cross-references, and interleaved siblings under
    /// [`SiblingPolicy::RejectInterleaved`], are errors.
    pub fn parse_node_hierarchy<T>(&mut self, tree: &T, node: N) -> Result<TaffyNode, LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        if self.root.is_none() {
            self.root = Some(node);
        }
        let previous = self.registered_descendants(node)?;
        let mut visited = HashSet::new();
        let layout_node = self.parse_node(tree, node, &mut visited)?;
        for stale in previous {
            if !visited.contains(&stale) {
                self.release(stale)?;
            }
        }
        Ok(layout_node)
    }

    fn parse_node<T>(
        &mut self,
        tree: &T,
        node: N,
        visited: &mut HashSet<N>,
    ) -> Result<TaffyNode, LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        visited.insert(node);
        self.last_transforms.entry(node).or_default();

        let base = self.config.base_style.clone();
        let layout_node = match self.nodes.get(&node) {
            Some(&existing) => {
                self.taffy.set_style(existing, base)?;
                self.taffy.set_children(existing, &[])?;
                self.pending.retain(|pending| pending.node != node);
                existing
            }
            None => {
                let created = self.taffy.new_leaf(base)?;
                self.nodes.insert(node, created);
                self.visuals.insert(created, node);
                created
            }
        };

        if let Some(attribute) = tree.attribute(node, &self.config.directive_attribute) {
            for directive in directives(attribute) {
                self.apply_directive(tree, node, layout_node, directive)?;
            }
        }

        let mut index = 0;
        let mut after_plain = false;
        for (position, child) in tree.children(node).enumerate() {
            if tree
                .attribute(child, &self.config.directive_attribute)
                .is_none()
            {
                after_plain = true;
                continue;
            }
            if after_plain && self.config.sibling_policy == SiblingPolicy::RejectInterleaved {
                return Err(LayoutError::InterleavedSiblings {
                    parent: node,
                    child,
                    index: position,
                });
            }
            let child_layout = self.parse_node(tree, child, visited)?;
            self.taffy
                .insert_child_at_index(layout_node, index, child_layout)?;
            index += 1;
        }

        Ok(layout_node)
    }

    fn apply_directive<T>(
        &mut self,
        tree: &T,
        node: N,
        layout_node: TaffyNode,
        directive: Directive<'_>,
    ) -> Result<(), LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        let Directive { property, value } = directive;
        let Some(spec) = self.registry.get(property).cloned() else {
            self.report(
                node,
                property,
                value.unwrap_or_default(),
                DiagnosticKind::UnknownProperty,
            );
            return Ok(());
        };
        let Some(value) = value else {
            self.report(node, property, "", DiagnosticKind::MissingValue);
            return Ok(());
        };

        match spec.resolve(value, |axis| rendered_extent(tree, node, axis)) {
            Ok(Resolved::Ready(argument)) => {
                self.set_property(node, layout_node, spec.operation(), argument, value)?;
            }
            Ok(Resolved::Reference(reference)) => {
                let pending = PendingResolution {
                    node,
                    layout_node,
                    property: spec,
                    value: value.into(),
                    reference,
                };
                if self.layout_calculated {
                    self.apply_pending(tree, &pending)?;
                } else {
                    log::debug!(
                        "deferring `{property}: {value}` on {node:?} until after the first layout pass"
                    );
                    self.pending.push_back(pending);
                }
            }
            Err(ValueError::Reference(syntax)) => {
                return Err(LayoutError::Reference {
                    node,
                    property: property.into(),
                    value: value.into(),
                    kind: ReferenceErrorKind::Syntax(syntax),
                });
            }
            Err(err) => {
                self.report(node, property, value, DiagnosticKind::UnsupportedValue(err));
            }
        }
        Ok(())
    }

    pub(crate) fn set_property(
        &mut self,
        node: N,
        layout_node: TaffyNode,
        operation: Operation,
        argument: Argument,
        value: &str,
    ) -> Result<(), LayoutError<N>> {
        let mut style = self.taffy.style(layout_node)?.clone();
        if apply_argument(&mut style, operation, argument) {
            self.taffy.set_style(layout_node, style)?;
        } else {
            log::warn!("{operation:?} cannot take {argument:?} (from `{value}` on {node:?})");
        }
        Ok(())
    }

    /// Visual nodes whose layout nodes currently sit below `node`'s layout node.
    fn registered_descendants(&self, node: N) -> Result<Vec<N>, LayoutError<N>> {
        let mut found = Vec::new();
        let Some(&start) = self.nodes.get(&node) else {
            return Ok(found);
        };
        let mut stack = self.taffy.children(start)?;
        while let Some(layout_node) = stack.pop() {
            if let Some(&visual) = self.visuals.get(&layout_node) {
                found.push(visual);
            }
            stack.extend(self.taffy.children(layout_node)?);
        }
        Ok(found)
    }

    fn release(&mut self, node: N) -> Result<(), LayoutError<N>> {
        if let Some(layout_node) = self.nodes.remove(&node) {
            log::debug!("releasing layout node of {node:?}");
            self.visuals.remove(&layout_node);
            self.taffy.remove(layout_node)?;
        }
        if let Some(last) = self.last_transforms.remove(&node)
            && !last.is_empty()
        {
            self.released_transforms.push((node, last));
        }
        self.pending.retain(|pending| pending.node != node);
        Ok(())
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Taffy works in f32 layout units"
)]
fn rendered_extent<T>(tree: &T, node: T::Node, axis: Axis) -> f32
where
    T: VisualTree + ?Sized,
{
    let size = tree.rendered_size(node);
    match axis {
        Axis::Horizontal => size.width as f32,
        Axis::Vertical => size.height as f32,
    }
}
