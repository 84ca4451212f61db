// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adapter type and its read-only accessors.

use std::collections::VecDeque;

use hashbrown::HashMap;
use kurbo::Rect;
use taffy::{Layout, NodeId as TaffyNode, TaffyTree};
use understory_flex_directive::{GeometryField, PropertyRegistry};

use crate::config::AttrLayoutConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::resolve::PendingResolution;

/// Attribute-driven flexbox layout for a visual tree.
///
/// One instance owns one Taffy tree mirroring the directive-bearing nodes of one visual tree.
/// Its lifetime is: construct, [`parse_node_hierarchy`](Self::parse_node_hierarchy) once per
/// visual-tree construction, then [`calculate_layout`](Self::calculate_layout) and
/// [`apply_layout`](Self::apply_layout) as often as the geometry changes.
///
/// Visual nodes are borrowed per call through [`VisualTree`](crate::VisualTree); the adapter
/// only keeps their handles.
pub struct FlexAttrLayout<N> {
    pub(crate) config: AttrLayoutConfig,
    pub(crate) registry: PropertyRegistry,
    pub(crate) taffy: TaffyTree<()>,
    pub(crate) root: Option<N>,
    pub(crate) nodes: HashMap<N, TaffyNode>,
    pub(crate) visuals: HashMap<TaffyNode, N>,
    pub(crate) last_transforms: HashMap<N, String>,
    pub(crate) pending: VecDeque<PendingResolution<N>>,
    pub(crate) diagnostics: Vec<Diagnostic<N>>,
    pub(crate) layout_calculated: bool,
    pub(crate) viewport: Option<TaffyNode>,
    pub(crate) released_transforms: Vec<(N, String)>,
}

impl<N: core::fmt::Debug> core::fmt::Debug for FlexAttrLayout<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlexAttrLayout")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("pending", &self.pending.len())
            .field("diagnostics", &self.diagnostics.len())
            .field("layout_calculated", &self.layout_calculated)
            .finish_non_exhaustive()
    }
}

impl<N> Default for FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> FlexAttrLayout<N>
where
    N: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// Create an adapter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AttrLayoutConfig::default())
    }

    /// Create an adapter with the given configuration.
    #[must_use]
    pub fn with_config(config: AttrLayoutConfig) -> Self {
        Self {
            config,
            registry: PropertyRegistry::standard(),
            taffy: TaffyTree::new(),
            root: None,
            nodes: HashMap::new(),
            visuals: HashMap::new(),
            last_transforms: HashMap::new(),
            pending: VecDeque::new(),
            diagnostics: Vec::new(),
            layout_calculated: false,
            viewport: None,
            released_transforms: Vec::new(),
        }
    }

    /// The configuration this adapter was built with.
    #[must_use]
    pub fn config(&self) -> &AttrLayoutConfig {
        &self.config
    }

    /// The recognized property set.
    #[must_use]
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Read-only access to the underlying Taffy tree.
    #[must_use]
    pub fn taffy(&self) -> &TaffyTree<()> {
        &self.taffy
    }

    /// The visual node passed to the first [`parse_node_hierarchy`](Self::parse_node_hierarchy).
    #[must_use]
    pub fn root(&self) -> Option<N> {
        self.root
    }

    /// The layout node of [`root`](Self::root).
    #[must_use]
    pub fn root_layout_node(&self) -> Option<TaffyNode> {
        self.root.and_then(|root| self.layout_node(root))
    }

    /// Look up the layout node of a visual node.
    #[must_use]
    pub fn layout_node(&self, node: N) -> Option<TaffyNode> {
        self.nodes.get(&node).copied()
    }

    /// Look up the visual node of a layout node.
    #[must_use]
    pub fn visual_node(&self, layout_node: TaffyNode) -> Option<N> {
        self.visuals.get(&layout_node).copied()
    }

    /// Iterate over all `(visual node, layout node)` pairs, in no particular order.
    pub fn node_map(&self) -> impl Iterator<Item = (N, TaffyNode)> + '_ {
        self.nodes.iter().map(|(node, layout_node)| (*node, *layout_node))
    }

    /// Number of registered visual nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no visual node is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The computed Taffy layout of a visual node.
    ///
    /// Only meaningful after [`calculate_layout`](Self::calculate_layout).
    #[must_use]
    pub fn layout(&self, node: N) -> Option<&Layout> {
        let layout_node = self.layout_node(node)?;
        self.taffy.layout(layout_node).ok()
    }

    /// The computed geometry of a visual node, relative to its layout parent.
    #[must_use]
    pub fn geometry(&self, node: N) -> Option<Rect> {
        self.layout(node).map(layout_to_rect)
    }

    /// One computed geometry field of a visual node.
    #[must_use]
    pub fn computed(&self, node: N, field: GeometryField) -> Option<f32> {
        self.layout(node).map(|layout| computed_field(layout, field))
    }

    /// Returns `true` once the first layout pass has run.
    #[must_use]
    pub fn is_layout_calculated(&self) -> bool {
        self.layout_calculated
    }

    /// Number of cross-references waiting for the first layout pass.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Diagnostics reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic<N>] {
        &self.diagnostics
    }

    /// Take the diagnostics reported so far, leaving none behind.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic<N>> {
        core::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn report(&mut self, node: N, property: &str, value: &str, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            node,
            property: property.into(),
            value: value.into(),
            kind,
        };
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// The border box of a computed layout, in its layout parent's coordinates.
///
/// ```rust
/// use kurbo::Rect;
/// use taffy::prelude::Layout;
/// use understory_flex_attr::layout_to_rect;
///
/// let mut bars = Layout::new();
/// bars.location.x = 56.0;
/// bars.size.width = 534.0;
/// bars.size.height = 290.0;
///
/// let rect = layout_to_rect(&bars);
/// assert_eq!(rect, Rect::new(56.0, 0.0, 590.0, 290.0));
/// assert_eq!(rect.width(), 534.0);
/// ```
#[must_use]
pub fn layout_to_rect(layout: &Layout) -> Rect {
    let Layout { location, size, .. } = layout;
    Rect::from_origin_size(
        (f64::from(location.x), f64::from(location.y)),
        (f64::from(size.width), f64::from(size.height)),
    )
}

pub(crate) fn computed_field(layout: &Layout, field: GeometryField) -> f32 {
    match field {
        GeometryField::Left => layout.location.x,
        GeometryField::Top => layout.location.y,
        GeometryField::Width => layout.size.width,
        GeometryField::Height => layout.size.height,
    }
}
