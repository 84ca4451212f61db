// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar chart scaffold laid out from `layout` attributes.
//!
//! This demo shows how to:
//! - Annotate a chart skeleton (axes, titles, plot area) with flexbox directives.
//! - Size labels with `auto` from their rendered extent.
//! - Align the categoric axis under the plot area with a cross-reference to the numeric
//!   axis width.
//! - Relayout for several container sizes and read back each node's translation.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_flex_demos --bin bar_chart`

use std::error::Error;

use kurbo::Size;
use understory_flex_attr::{AttrTree, ElementId, FlexAttrLayout};

fn build_chart() -> (AttrTree, ElementId) {
    let mut tree = AttrTree::new();
    let svg = tree.insert_with_attributes(
        None,
        "svg",
        &[(
            "layout",
            "flex-direction: column; align-items: stretch; padding-left: 25; padding-right: 25; \
             padding-top: 10; padding-bottom: 10",
        )],
    );
    // Plain nodes stay out of layout.
    tree.insert(Some(svg), "defs");

    let plot_row = tree.insert_with_attributes(
        Some(svg),
        "g",
        &[
            ("class", "plot-row"),
            ("layout", "flex-direction: row; align-items: stretch; flex-grow: 1"),
        ],
    );
    let numeric_axis = tree.insert_with_attributes(
        Some(plot_row),
        "g",
        &[
            ("class", "numeric-axis"),
            ("layout", "flex-direction: row; flex-grow: 0; flex-shrink: 0"),
        ],
    );
    let numeric_title = tree.insert_with_attributes(
        Some(numeric_axis),
        "text",
        &[
            ("class", "title"),
            ("layout", "width: auto; align-self: center; margin-right: 10"),
            ("transform", "rotate(-90)"),
        ],
    );
    tree.set_rendered_size(numeric_title, Size::new(14.0, 120.0));
    let numeric_ticks = tree.insert_with_attributes(
        Some(numeric_axis),
        "g",
        &[("class", "ticks"), ("layout", "width: auto")],
    );
    tree.set_rendered_size(numeric_ticks, Size::new(32.0, 0.0));
    tree.insert_with_attributes(
        Some(plot_row),
        "g",
        &[("class", "bars"), ("layout", "flex-grow: 1")],
    );

    let categoric_axis = tree.insert_with_attributes(
        Some(svg),
        "g",
        &[
            ("class", "categoric-axis"),
            (
                "layout",
                "flex-direction: column; margin-left: $.numeric-axis#width; flex-grow: 0; \
                 flex-shrink: 0",
            ),
        ],
    );
    let categoric_ticks = tree.insert_with_attributes(
        Some(categoric_axis),
        "g",
        &[("class", "ticks"), ("layout", "height: auto")],
    );
    tree.set_rendered_size(categoric_ticks, Size::new(0.0, 16.0));
    let categoric_title = tree.insert_with_attributes(
        Some(categoric_axis),
        "text",
        &[
            ("class", "title"),
            ("layout", "height: auto; align-self: center; margin-top: 10"),
        ],
    );
    tree.set_rendered_size(categoric_title, Size::new(80.0, 14.0));

    (tree, svg)
}

fn describe(tree: &AttrTree, node: ElementId) -> String {
    match tree.attribute(node, "class") {
        Some(class) => format!("{}.{}", tree.tag(node), class.replace(' ', ".")),
        None => tree.tag(node).to_owned(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (mut tree, svg) = build_chart();
    let mut layout = FlexAttrLayout::new();
    layout.parse_node_hierarchy(&tree, svg)?;
    println!(
        "{} nodes in layout, {} cross-references deferred",
        layout.len(),
        layout.pending_count()
    );

    for (width, height) in [(640.0, 360.0), (800.0, 480.0), (320.0, 240.0)] {
        layout.calculate_layout(&tree, width, height)?;
        layout.apply_layout(&mut tree)?;

        println!("\n{width}x{height}");
        for node in tree.iter() {
            let Some(rect) = layout.geometry(node) else {
                continue;
            };
            let transform = tree.attribute(node, "transform").unwrap_or_default();
            println!(
                "  {:<24} {:>7.1} x {:<7.1} {transform}",
                describe(&tree, node),
                rect.width(),
                rect.height()
            );
        }
    }

    // Skipped directives were already logged at warn level while parsing.
    let skipped = layout.diagnostics().len();
    if skipped > 0 {
        log::info!("{skipped} directives were skipped");
    }
    Ok(())
}
