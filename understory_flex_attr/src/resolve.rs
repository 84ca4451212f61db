// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluating cross-references against computed geometry.

use taffy::NodeId as TaffyNode;
use understory_flex_directive::{CrossReference, PropertySpec};

use crate::diagnostic::DiagnosticKind;
use crate::error::{LayoutError, ReferenceErrorKind};
use crate::layout::{FlexAttrLayout, computed_field};
use crate::visual::VisualTree;

/// A cross-reference directive waiting for the first layout pass.
#[derive(Clone, Debug)]
pub(crate) struct PendingResolution<N> {
    pub(crate) node: N,
    pub(crate) layout_node: TaffyNode,
    pub(crate) property: PropertySpec,
    pub(crate) value: String,
    pub(crate) reference: CrossReference,
}

impl<N> FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// Apply every deferred cross-reference, oldest first.
    ///
    /// Each entry is consumed before it is evaluated, so a failing entry is not retried.
    pub(crate) fn drain_pending<T>(&mut self, tree: &T) -> Result<(), LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        if !self.pending.is_empty() {
            log::debug!("resolving {} deferred cross-references", self.pending.len());
        }
        while let Some(pending) = self.pending.pop_front() {
            self.apply_pending(tree, &pending)?;
        }
        Ok(())
    }

    pub(crate) fn apply_pending<T>(
        &mut self,
        tree: &T,
        pending: &PendingResolution<N>,
    ) -> Result<(), LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        let number = self.evaluate(tree, pending)?;
        match pending.property.resolve_number(number) {
            Ok(argument) => self.set_property(
                pending.node,
                pending.layout_node,
                pending.property.operation(),
                argument,
                &pending.value,
            ),
            Err(err) => {
                self.report(
                    pending.node,
                    pending.property.name(),
                    &pending.value,
                    DiagnosticKind::UnsupportedValue(err),
                );
                Ok(())
            }
        }
    }

    /// Read the referenced field from the single node the selector matches.
    fn evaluate<T>(&self, tree: &T, pending: &PendingResolution<N>) -> Result<f32, LayoutError<N>>
    where
        T: VisualTree<Node = N> + ?Sized,
    {
        let fail = |kind| LayoutError::Reference {
            node: pending.node,
            property: pending.property.name().into(),
            value: pending.value.clone(),
            kind,
        };

        let mut matches = tree.select(&pending.reference.selector);
        let target = matches.next().ok_or_else(|| fail(ReferenceErrorKind::NoMatch))?;
        let others = matches.count();
        if others > 0 {
            return Err(fail(ReferenceErrorKind::Ambiguous {
                matches: others + 1,
            }));
        }
        let layout_node = self
            .layout_node(target)
            .ok_or_else(|| fail(ReferenceErrorKind::Unregistered))?;
        let layout = self.taffy.layout(layout_node)?;
        let number = computed_field(layout, pending.reference.field);
        log::debug!(
            "{} of {target:?} is {number} for `{}: {}` on {:?}",
            pending.reference.field,
            pending.property.name(),
            pending.value,
            pending.node
        );
        Ok(number)
    }
}
