// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `FlexAttrLayout` driving Taffy through an `AttrTree`.

use kurbo::{Rect, Size};
use taffy::{Dimension, LengthPercentageAuto};
use understory_flex_attr::{
    AttrLayoutConfig, AttrTree, DiagnosticKind, ElementId, FlexAttrLayout, GeometryField,
    LayoutError, ReferenceErrorKind, SiblingPolicy,
};
use understory_flex_directive::{ReferenceSyntaxError, ValueError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn node(tree: &mut AttrTree, parent: Option<ElementId>, directives: &str) -> ElementId {
    tree.insert_with_attributes(parent, "g", &[("layout", directives)])
}

fn margin_left(layout: &FlexAttrLayout<ElementId>, node: ElementId) -> LengthPercentageAuto {
    let id = layout.layout_node(node).unwrap();
    layout.taffy().style(id).unwrap().margin.left
}

#[test]
fn column_with_fixed_and_growing_children() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: column; align-items: stretch");
    let node1 = node(&mut tree, Some(root), "height: 100; flex-grow: 0; flex-shrink: 0");
    let node2 = node(&mut tree, Some(root), "flex-grow: 1");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 500.0, 300.0).unwrap();

    assert_eq!(layout.geometry(root), Some(Rect::new(0.0, 0.0, 500.0, 300.0)));
    assert_eq!(layout.computed(node1, GeometryField::Height), Some(100.0));
    assert_eq!(layout.computed(node2, GeometryField::Height), Some(200.0));
    assert_eq!(layout.computed(node1, GeometryField::Width), Some(500.0));
    assert_eq!(layout.computed(node2, GeometryField::Width), Some(500.0));
    assert_eq!(layout.computed(node2, GeometryField::Top), Some(100.0));
}

#[test]
fn growing_child_fills_container_minus_padding() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "padding-left: 25; padding-right: 25; padding-top: 10");
    let child = node(&mut tree, Some(root), "flex-grow: 1");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 640.0, 480.0).unwrap();

    assert_eq!(
        layout.geometry(child),
        Some(Rect::new(25.0, 10.0, 615.0, 480.0)),
        "the child takes everything inside the padding"
    );
}

#[test]
fn one_layout_node_per_directive_node_in_visual_order() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    let first = node(&mut tree, Some(root), "width: 10");
    let plain = tree.insert(Some(root), "text");
    let hidden = node(&mut tree, Some(plain), "width: 99");
    let second = node(&mut tree, Some(root), "width: 20");
    let third = node(&mut tree, Some(root), "width: 30");

    let mut layout = FlexAttrLayout::new();
    let root_layout = layout.parse_node_hierarchy(&tree, root).unwrap();

    assert_eq!(layout.len(), 4);
    assert_eq!(layout.root(), Some(root));
    assert_eq!(layout.root_layout_node(), Some(root_layout));
    assert!(layout.layout_node(plain).is_none());
    assert!(
        layout.layout_node(hidden).is_none(),
        "descendants of plain nodes are not laid out"
    );

    let expected: Vec<_> = [first, second, third]
        .into_iter()
        .map(|child| layout.layout_node(child).unwrap())
        .collect();
    assert_eq!(layout.taffy().children(root_layout).unwrap(), expected);
    for (visual, layout_node) in layout.node_map() {
        assert_eq!(layout.visual_node(layout_node), Some(visual));
    }

    layout.calculate_layout(&tree, 100.0, 50.0).unwrap();
    assert_eq!(layout.computed(second, GeometryField::Left), Some(10.0));
    assert_eq!(layout.computed(third, GeometryField::Left), Some(30.0));
}

#[test]
fn interleaved_siblings_are_rejected_on_request() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "");
    node(&mut tree, Some(root), "height: 10");
    tree.insert(Some(root), "text");
    let late = node(&mut tree, Some(root), "height: 10");

    let mut compact = FlexAttrLayout::new();
    compact.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(compact.len(), 3);

    let config = AttrLayoutConfig::default().with_sibling_policy(SiblingPolicy::RejectInterleaved);
    let mut strict = FlexAttrLayout::with_config(config);
    let err = strict.parse_node_hierarchy(&tree, root).unwrap_err();
    assert!(
        matches!(
            err,
            LayoutError::InterleavedSiblings { parent, child, index: 2 }
                if parent == root && child == late
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn trailing_plain_siblings_are_fine_under_strict_policy() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "");
    node(&mut tree, Some(root), "height: 10");
    tree.insert(Some(root), "text");

    let config = AttrLayoutConfig::default().with_sibling_policy(SiblingPolicy::RejectInterleaved);
    let mut strict = FlexAttrLayout::with_config(config);
    strict.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(strict.len(), 2);
}

#[test]
fn apply_layout_is_idempotent_and_keeps_foreign_transforms() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "padding-left: 25");
    let title = tree.insert_with_attributes(
        Some(root),
        "text",
        &[("layout", "height: 20; margin-top: 5"), ("transform", "rotate(-90)")],
    );

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 200.0, 100.0).unwrap();

    layout.apply_layout(&mut tree).unwrap();
    let once = tree.attribute(title, "transform").map(str::to_owned);
    layout.apply_layout(&mut tree).unwrap();
    assert_eq!(tree.attribute(title, "transform").map(str::to_owned), once);
    assert_eq!(once.as_deref(), Some("translate(25, 5)rotate(-90)"));
    assert_eq!(tree.attribute(root, "transform"), Some("translate(0, 0)"));

    // Someone else appends to the transform; the next layout only swaps our part.
    tree.set_attribute(title, "transform", "translate(25, 5)rotate(-90) scale(2)");
    tree.set_attribute(root, "layout", "padding-left: 40");
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 200.0, 100.0).unwrap();
    layout.apply_layout(&mut tree).unwrap();
    assert_eq!(
        tree.attribute(title, "transform"),
        Some("translate(40, 5)rotate(-90) scale(2)")
    );
}

#[test]
fn cross_reference_resolves_between_passes() {
    init_logging();
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    let a = tree.insert_with_attributes(Some(root), "g", &[("id", "a"), ("layout", "flex-grow: 1")]);
    let b = node(&mut tree, Some(root), "flex-grow: 1; margin-left: $#a#width");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(layout.pending_count(), 1);
    assert!(!layout.is_layout_calculated());
    assert_eq!(margin_left(&layout, b), layout.config().base_style.margin.left);

    layout.calculate_layout(&tree, 500.0, 300.0).unwrap();
    assert_eq!(layout.pending_count(), 0);
    // Pass one split 500 evenly, so the margin is a's first-pass width.
    assert_eq!(margin_left(&layout, b), LengthPercentageAuto::length(250.0));
    assert_eq!(layout.computed(a, GeometryField::Width), Some(125.0));
    assert_eq!(layout.computed(b, GeometryField::Width), Some(125.0));
    assert_eq!(layout.computed(b, GeometryField::Left), Some(375.0));

    // A new container size does not re-derive the resolved margin.
    layout.calculate_layout(&tree, 1000.0, 300.0).unwrap();
    assert_eq!(margin_left(&layout, b), LengthPercentageAuto::length(250.0));
    assert_eq!(layout.computed(a, GeometryField::Width), Some(375.0));
}

#[test]
fn deferred_references_apply_in_parse_order() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    tree.insert_with_attributes(Some(root), "g", &[("id", "a"), ("layout", "width: 30")]);
    tree.insert_with_attributes(Some(root), "g", &[("id", "c"), ("layout", "width: 70")]);
    let b = node(&mut tree, Some(root), "margin-left: $#a#width; margin-left: $#c#width");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(layout.pending_count(), 2);
    layout.calculate_layout(&tree, 500.0, 100.0).unwrap();

    assert_eq!(
        margin_left(&layout, b),
        LengthPercentageAuto::length(70.0),
        "the later declaration wins"
    );
    assert_eq!(layout.computed(b, GeometryField::Left), Some(170.0));
}

#[test]
fn references_read_first_pass_geometry() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    tree.insert_with_attributes(Some(root), "g", &[("id", "a"), ("layout", "width: 30")]);
    let t = tree.insert_with_attributes(
        Some(root),
        "g",
        &[("id", "t"), ("layout", "width: 20; margin-left: $#a#width")],
    );
    let u = node(&mut tree, Some(root), "width: 10; margin-left: $#t#left");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 500.0, 100.0).unwrap();

    // `t` was at 30 in the first pass; its own margin only shows up in the second.
    assert_eq!(margin_left(&layout, u), LengthPercentageAuto::length(30.0));
    assert_eq!(layout.computed(t, GeometryField::Left), Some(60.0));
    assert_eq!(layout.computed(u, GeometryField::Left), Some(110.0));
}

#[test]
fn root_margins_shrink_and_offset_the_root() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "margin-left: 10; margin-top: 5; margin-bottom: 15");
    let child = node(&mut tree, Some(root), "flex-grow: 1");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 500.0, 300.0).unwrap();
    layout.apply_layout(&mut tree).unwrap();

    assert_eq!(layout.geometry(root), Some(Rect::new(10.0, 5.0, 500.0, 285.0)));
    assert_eq!(layout.geometry(child), Some(Rect::new(0.0, 0.0, 490.0, 280.0)));
    assert_eq!(tree.attribute(root, "transform"), Some("translate(10, 5)"));

    let id = layout.layout_node(root).unwrap();
    assert_eq!(
        layout.taffy().style(id).unwrap().flex_grow,
        0.0,
        "the root keeps its authored style between layouts"
    );
}

#[test]
fn root_with_authored_size_keeps_it() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "width: 200; height: 100; margin-left: 20");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 500.0, 300.0).unwrap();

    assert_eq!(layout.geometry(root), Some(Rect::new(20.0, 0.0, 220.0, 100.0)));
}

#[test]
fn cross_reference_after_first_layout_resolves_immediately() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "");
    let header = tree.insert_with_attributes(
        Some(root),
        "g",
        &[("class", "header"), ("layout", "height: 30")],
    );

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 100.0, 100.0).unwrap();

    let body = node(&mut tree, Some(root), "margin-top: $.header#height; flex-grow: 1");
    layout.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(layout.pending_count(), 0);

    let id = layout.layout_node(body).unwrap();
    assert_eq!(
        layout.taffy().style(id).unwrap().margin.top,
        LengthPercentageAuto::length(30.0)
    );
    layout.calculate_layout(&tree, 100.0, 100.0).unwrap();
    assert_eq!(layout.computed(body, GeometryField::Top), Some(60.0));
    assert_eq!(layout.computed(header, GeometryField::Top), Some(0.0));
}

#[test]
fn unresolvable_references_fail_the_layout() {
    init_logging();
    let cases = [
        ("margin-left: $#missing#width", "NoMatch"),
        ("margin-left: $text#width", "Ambiguous"),
        ("margin-left: $.plain#width", "Unregistered"),
    ];
    for (directives, expected) in cases {
        let mut tree = AttrTree::new();
        let root = node(&mut tree, None, "");
        node(&mut tree, Some(root), directives);
        tree.insert_with_attributes(Some(root), "text", &[("class", "plain")]);
        tree.insert(Some(root), "text");

        let mut layout = FlexAttrLayout::new();
        layout.parse_node_hierarchy(&tree, root).unwrap();
        let err = layout.calculate_layout(&tree, 100.0, 100.0).unwrap_err();
        let LayoutError::Reference { kind, property, .. } = &err else {
            panic!("expected a reference error for `{directives}`, got {err}");
        };
        assert_eq!(property, "margin-left");
        let matched = match kind {
            ReferenceErrorKind::NoMatch => "NoMatch",
            ReferenceErrorKind::Ambiguous { matches: 2 } => "Ambiguous",
            ReferenceErrorKind::Unregistered => "Unregistered",
            other => panic!("unexpected kind {other:?}"),
        };
        assert_eq!(matched, expected, "wrong failure for `{directives}`");
    }
}

#[test]
fn malformed_reference_fails_the_parse() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "height: 10; padding-top: $#a#depth");

    let mut layout = FlexAttrLayout::new();
    let err = layout.parse_node_hierarchy(&tree, root).unwrap_err();
    assert!(
        matches!(
            &err,
            LayoutError::Reference {
                kind: ReferenceErrorKind::Syntax(ReferenceSyntaxError::UnknownField(field)),
                ..
            } if field == "depth"
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn auto_uses_rendered_size_at_parse_time() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    let label = node(&mut tree, Some(root), "width: auto; height: auto");
    tree.set_rendered_size(label, Size::new(37.0, 12.0));

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    tree.set_rendered_size(label, Size::new(99.0, 99.0));
    layout.calculate_layout(&tree, 200.0, 100.0).unwrap();

    let id = layout.layout_node(label).unwrap();
    assert_eq!(
        layout.taffy().style(id).unwrap().size.width,
        Dimension::length(37.0)
    );
    assert_eq!(layout.geometry(label), Some(Rect::new(0.0, 0.0, 37.0, 12.0)));
}

#[test]
fn unknown_properties_are_reported_and_skipped() {
    init_logging();
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "unsupported-prop: 3; height: 100; align-items: middle");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();

    let diagnostics = layout.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].node, root);
    assert_eq!(diagnostics[0].property, "unsupported-prop");
    assert_eq!(diagnostics[0].value, "3");
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownProperty);
    assert_eq!(
        diagnostics[1].kind,
        DiagnosticKind::UnsupportedValue(ValueError::UnknownKeyword)
    );

    let mut expected = layout.config().base_style.clone();
    expected.size.height = Dimension::length(100.0);
    let id = layout.layout_node(root).unwrap();
    assert_eq!(
        layout.taffy().style(id).unwrap(),
        &expected,
        "only the recognized directive changes the style"
    );

    assert_eq!(layout.take_diagnostics().len(), 2);
    assert!(layout.diagnostics().is_empty());
}

#[test]
fn reparse_releases_removed_descendants() {
    init_logging();
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "");
    let kept = node(&mut tree, Some(root), "height: 10");
    let dropped = node(&mut tree, Some(root), "height: 20");
    let grandchild = node(&mut tree, Some(dropped), "height: 5");

    let mut layout = FlexAttrLayout::new();
    let root_layout = layout.parse_node_hierarchy(&tree, root).unwrap();
    assert_eq!(layout.len(), 4);

    tree.remove_attribute(dropped, "layout");
    tree.set_attribute(kept, "layout", "height: 40");
    assert_eq!(layout.parse_node_hierarchy(&tree, root).unwrap(), root_layout);

    assert_eq!(layout.len(), 2);
    assert!(layout.layout_node(dropped).is_none());
    assert!(layout.layout_node(grandchild).is_none());
    assert_eq!(
        layout.taffy().children(root_layout).unwrap(),
        [layout.layout_node(kept).unwrap()]
    );

    layout.calculate_layout(&tree, 50.0, 50.0).unwrap();
    assert_eq!(layout.computed(kept, GeometryField::Height), Some(40.0));
}

#[test]
fn released_nodes_lose_their_translation() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    node(&mut tree, Some(root), "width: 5");
    let dropped = tree.insert_with_attributes(
        Some(root),
        "g",
        &[("layout", "width: 10"), ("transform", "rotate(45)")],
    );

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 100.0, 100.0).unwrap();
    layout.apply_layout(&mut tree).unwrap();
    assert_eq!(tree.attribute(dropped, "transform"), Some("translate(5, 0)rotate(45)"));

    tree.remove_attribute(dropped, "layout");
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 100.0, 100.0).unwrap();
    layout.apply_layout(&mut tree).unwrap();
    layout.apply_layout(&mut tree).unwrap();

    assert!(layout.layout_node(dropped).is_none());
    assert_eq!(
        tree.attribute(dropped, "transform"),
        Some("rotate(45)"),
        "only the translation is removed"
    );
}

#[test]
fn custom_attribute_names() {
    let mut tree = AttrTree::new();
    let root = tree.insert_with_attributes(None, "svg", &[("yogaLayout", "padding-top: 7")]);
    let child = tree.insert_with_attributes(Some(root), "g", &[("yogaLayout", "height: 3")]);

    let config = AttrLayoutConfig::default()
        .with_directive_attribute("yogaLayout")
        .with_transform_attribute("data-offset");
    let mut layout = FlexAttrLayout::with_config(config);
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 10.0, 10.0).unwrap();
    layout.apply_layout(&mut tree).unwrap();

    assert_eq!(tree.attribute(child, "data-offset"), Some("translate(0, 7)"));
    assert_eq!(tree.attribute(child, "transform"), None);
}

#[test]
fn layout_before_parse_is_an_error() {
    let tree = AttrTree::new();
    let mut layout = FlexAttrLayout::<ElementId>::new();
    assert!(matches!(
        layout.calculate_layout(&tree, 1.0, 1.0),
        Err(LayoutError::NotParsed)
    ));
}

#[test]
fn apply_layout_with_visits_every_node() {
    let mut tree = AttrTree::new();
    let root = node(&mut tree, None, "flex-direction: row");
    node(&mut tree, Some(root), "width: 10");
    node(&mut tree, Some(root), "width: 20");

    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, root).unwrap();
    layout.calculate_layout(&tree, 100.0, 100.0).unwrap();

    let mut total_width = 0.0;
    let mut visited = 0;
    layout
        .apply_layout_with(|node, _, computed| {
            visited += 1;
            if node != root {
                total_width += computed.size.width;
            }
        })
        .unwrap();
    assert_eq!(visited, 3);
    assert_eq!(total_width, 30.0);
}
