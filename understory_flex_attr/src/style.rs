// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping resolved directive arguments onto Taffy styles.

use taffy::{AlignItems, Dimension, FlexDirection, LengthPercentage, LengthPercentageAuto, Style};
use understory_flex_directive::{Argument, Edge, Keyword, Operation};

/// Apply one resolved argument to `style`.
///
/// Returns `false` if the argument does not fit the operation; `style` is then unchanged.
pub(crate) fn apply_argument(style: &mut Style, operation: Operation, argument: Argument) -> bool {
    match (operation, argument) {
        (Operation::FlexDirection, Argument::Keyword(keyword)) => {
            let Some(direction) = flex_direction(keyword) else {
                return false;
            };
            style.flex_direction = direction;
        }
        (Operation::AlignItems, Argument::Keyword(keyword)) => {
            let Some(align) = align(keyword) else {
                return false;
            };
            style.align_items = Some(align);
        }
        (Operation::AlignSelf, Argument::Keyword(keyword)) => {
            let Some(align) = align(keyword) else {
                return false;
            };
            style.align_self = Some(align);
        }
        (Operation::FlexGrow, Argument::Number(value)) => style.flex_grow = value,
        (Operation::FlexShrink, Argument::Number(value)) => style.flex_shrink = value,
        (Operation::Width, Argument::Number(value)) => {
            style.size.width = Dimension::length(value);
        }
        (Operation::Height, Argument::Number(value)) => {
            style.size.height = Dimension::length(value);
        }
        (Operation::Margin, Argument::Edge(edge, value)) => {
            let length = LengthPercentageAuto::length(value);
            match edge {
                Edge::Top => style.margin.top = length,
                Edge::Right => style.margin.right = length,
                Edge::Bottom => style.margin.bottom = length,
                Edge::Left => style.margin.left = length,
            }
        }
        (Operation::Padding, Argument::Edge(edge, value)) => {
            let length = LengthPercentage::length(value);
            match edge {
                Edge::Top => style.padding.top = length,
                Edge::Right => style.padding.right = length,
                Edge::Bottom => style.padding.bottom = length,
                Edge::Left => style.padding.left = length,
            }
        }
        _ => return false,
    }
    true
}

fn flex_direction(keyword: Keyword) -> Option<FlexDirection> {
    Some(match keyword {
        Keyword::Row => FlexDirection::Row,
        Keyword::Column => FlexDirection::Column,
        Keyword::RowReverse => FlexDirection::RowReverse,
        Keyword::ColumnReverse => FlexDirection::ColumnReverse,
        _ => return None,
    })
}

fn align(keyword: Keyword) -> Option<AlignItems> {
    Some(match keyword {
        Keyword::Stretch => AlignItems::Stretch,
        Keyword::Center => AlignItems::Center,
        Keyword::FlexStart => AlignItems::FlexStart,
        Keyword::FlexEnd => AlignItems::FlexEnd,
        Keyword::Baseline => AlignItems::Baseline,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_arguments_target_one_edge() {
        let untouched: Style = Style::DEFAULT;
        let mut style = untouched.clone();
        assert!(apply_argument(
            &mut style,
            Operation::Padding,
            Argument::Edge(Edge::Left, 25.0)
        ));
        assert_eq!(style.padding.left, LengthPercentage::length(25.0));
        assert_eq!(style.padding.right, untouched.padding.right);

        assert!(apply_argument(
            &mut style,
            Operation::Margin,
            Argument::Edge(Edge::Top, 10.0)
        ));
        assert_eq!(style.margin.top, LengthPercentageAuto::length(10.0));
    }

    #[test]
    fn mismatched_arguments_leave_style_untouched() {
        let mut style: Style = Style::DEFAULT;
        assert!(!apply_argument(
            &mut style,
            Operation::FlexDirection,
            Argument::Keyword(Keyword::Stretch)
        ));
        assert!(!apply_argument(
            &mut style,
            Operation::Width,
            Argument::Keyword(Keyword::Row)
        ));
        assert_eq!(style, Style::DEFAULT);
    }

    #[test]
    fn keywords_map_to_taffy_enums() {
        let mut style: Style = Style::DEFAULT;
        apply_argument(
            &mut style,
            Operation::FlexDirection,
            Argument::Keyword(Keyword::ColumnReverse),
        );
        apply_argument(
            &mut style,
            Operation::AlignSelf,
            Argument::Keyword(Keyword::Center),
        );
        assert_eq!(style.flex_direction, FlexDirection::ColumnReverse);
        assert_eq!(style.align_self, Some(AlignItems::Center));
    }
}
