// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small retained tree of attributed elements.

use kurbo::Size;

use crate::selector::Selector;
use crate::visual::VisualTree;

/// Handle of an element in an [`AttrTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Vec<(String, String)>,
    rendered_size: Size,
}

/// An in-memory [`VisualTree`] of tagged elements with string attributes.
///
/// Elements are never removed. The `id` attribute and the whitespace-separated `class`
/// attribute take part in selector matching; see [`AttrTree::query_all`]. Rendered sizes are
/// whatever the caller last set, standing in for measuring text or drawn content.
///
/// All methods taking an [`ElementId`] panic if the id did not come from this tree.
#[derive(Clone, Debug, Default)]
pub struct AttrTree {
    elements: Vec<Element>,
}

impl AttrTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new element with the given tag under `parent` (or as a new root).
    ///
    /// # Panics
    ///
    /// Panics if the tree holds more than `u32::MAX` elements.
    pub fn insert(&mut self, parent: Option<ElementId>, tag: &str) -> ElementId {
        assert!(
            self.elements.len() < u32::MAX as usize,
            "Too many elements (max {})",
            u32::MAX
        );
        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element {
            tag: tag.into(),
            parent,
            children: Vec::new(),
            attributes: Vec::new(),
            rendered_size: Size::ZERO,
        });
        if let Some(parent) = parent {
            self.elements[parent.index()].children.push(id);
        }
        id
    }

    /// Append a new element and set its attributes.
    pub fn insert_with_attributes(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let id = self.insert(parent, tag);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        id
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the tree has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element's tag.
    #[must_use]
    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.index()].tag
    }

    /// The element's parent.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.index()].parent
    }

    /// The element's children, in insertion order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.index()].children
    }

    /// Read an attribute.
    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.index()]
            .attributes
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value.as_str()))
    }

    /// Write an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let attributes = &mut self.elements[id.index()].attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => attributes.push((name.into(), value.into())),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Option<String> {
        let attributes = &mut self.elements[id.index()].attributes;
        let position = attributes.iter().position(|(key, _)| key == name)?;
        Some(attributes.remove(position).1)
    }

    /// The element's classes, from its `class` attribute.
    pub fn classes(&self, id: ElementId) -> impl Iterator<Item = &str> + Clone + '_ {
        self.attribute(id, "class")
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Add a class to the element's `class` attribute.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if self.classes(id).any(|existing| existing == class) {
            return;
        }
        let value = match self.attribute(id, "class") {
            Some(current) if !current.trim().is_empty() => format!("{current} {class}"),
            _ => class.to_owned(),
        };
        self.set_attribute(id, "class", &value);
    }

    /// The size last set with [`set_rendered_size`](Self::set_rendered_size).
    #[must_use]
    pub fn rendered_size(&self, id: ElementId) -> Size {
        self.elements[id.index()].rendered_size
    }

    /// Record the element's rendered size.
    pub fn set_rendered_size(&mut self, id: ElementId, size: Size) {
        self.elements[id.index()].rendered_size = size;
    }

    /// All elements, roots first, each followed by its descendants.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        let mut stack: Vec<ElementId> = self
            .ids()
            .filter(|id| self.elements[id.index()].parent.is_none())
            .collect();
        stack.reverse();
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev());
            Some(id)
        })
    }

    /// All elements matching `selector`, in document order.
    ///
    /// Supported selectors are compounds of a tag (or `*`), `#id` and `.class` parts, joined
    /// by whitespace for descendant matching. Anything else matches nothing.
    ///
    /// ```rust
    /// use understory_flex_attr::AttrTree;
    ///
    /// let mut tree = AttrTree::new();
    /// let svg = tree.insert(None, "svg");
    /// let axis = tree.insert_with_attributes(Some(svg), "g", &[("class", "axis numeric")]);
    /// let title = tree.insert_with_attributes(Some(axis), "text", &[("class", "title")]);
    /// tree.insert_with_attributes(Some(svg), "text", &[("class", "title")]);
    ///
    /// assert_eq!(tree.query_all(".axis .title"), [title]);
    /// assert_eq!(tree.query_all("g.numeric"), [axis]);
    /// assert_eq!(tree.query_all("text").len(), 2);
    /// assert!(tree.query_all("g > text").is_empty());
    /// ```
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            log::debug!("unsupported selector `{selector}`");
            return Vec::new();
        };
        self.iter()
            .filter(|&id| self.matches(&selector, id))
            .collect()
    }

    /// The first element matching `selector`, in document order.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "element count is bounded at insertion"
    )]
    fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(|index| ElementId(index as u32))
    }

    fn matches(&self, selector: &Selector, id: ElementId) -> bool {
        let Some((subject, ancestors)) = selector.compounds.split_last() else {
            return false;
        };
        if !self.matches_compound(subject, id) {
            return false;
        }
        // Match the remaining compounds right to left against the nearest ancestors.
        let mut current = self.parent(id);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = self.parent(candidate);
                if self.matches_compound(compound, candidate) {
                    break;
                }
            }
        }
        true
    }

    fn matches_compound(&self, compound: &crate::selector::Compound, id: ElementId) -> bool {
        compound.matches(self.tag(id), self.attribute(id, "id"), self.classes(id))
    }
}

impl VisualTree for AttrTree {
    type Node = ElementId;

    fn attribute(&self, node: ElementId, name: &str) -> Option<&str> {
        Self::attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: ElementId, name: &str, value: &str) {
        Self::set_attribute(self, node, name, value);
    }

    fn children(&self, node: ElementId) -> impl Iterator<Item = ElementId> {
        Self::children(self, node).iter().copied()
    }

    fn rendered_size(&self, node: ElementId) -> Size {
        Self::rendered_size(self, node)
    }

    fn select(&self, selector: &str) -> impl Iterator<Item = ElementId> {
        self.query_all(selector).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_replace_in_place() {
        let mut tree = AttrTree::new();
        let node = tree.insert(None, "g");
        tree.set_attribute(node, "transform", "scale(1, 1)");
        tree.set_attribute(node, "transform", "rotate(-90)");
        assert_eq!(tree.attribute(node, "transform"), Some("rotate(-90)"));
        assert_eq!(
            tree.remove_attribute(node, "transform").as_deref(),
            Some("rotate(-90)")
        );
        assert_eq!(tree.attribute(node, "transform"), None);
    }

    #[test]
    fn add_class_does_not_duplicate() {
        let mut tree = AttrTree::new();
        let node = tree.insert(None, "g");
        tree.add_class(node, "ticks");
        tree.add_class(node, "major");
        tree.add_class(node, "ticks");
        assert_eq!(tree.attribute(node, "class"), Some("ticks major"));
    }

    #[test]
    fn iter_is_document_order() {
        let mut tree = AttrTree::new();
        let root = tree.insert(None, "svg");
        let a = tree.insert(Some(root), "g");
        let b = tree.insert(Some(root), "g");
        // Inserted after `b`, but comes before it in document order.
        let a_child = tree.insert(Some(a), "text");
        assert_eq!(tree.iter().collect::<Vec<_>>(), [root, a, a_child, b]);
    }

    #[test]
    fn selectors_match_ids_and_nested_classes() {
        let mut tree = AttrTree::new();
        let root = tree.insert(None, "svg");
        let legend = tree.insert_with_attributes(Some(root), "g", &[("id", "legend")]);
        let outer = tree.insert_with_attributes(Some(root), "g", &[("class", "axis")]);
        let middle = tree.insert(Some(outer), "g");
        let ticks = tree.insert_with_attributes(Some(middle), "g", &[("class", "ticks")]);

        assert_eq!(tree.query("#legend"), Some(legend));
        assert_eq!(tree.query_all("svg .axis .ticks"), [ticks]);
        assert!(tree.query_all("#legend .ticks").is_empty());
        assert_eq!(tree.query_all("*").len(), 5);
    }
}
