// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fatal errors.

use core::fmt;

use taffy::TaffyError;
use understory_flex_directive::ReferenceSyntaxError;

/// Why a cross-reference could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceErrorKind {
    /// The value is not a well-formed `$<selector>#<field>`.
    Syntax(ReferenceSyntaxError),
    /// The selector matches no node.
    NoMatch,
    /// The selector matches more than one node.
    Ambiguous {
        /// Number of matched nodes.
        matches: usize,
    },
    /// The matched node carries no directive attribute, so it has no computed geometry.
    Unregistered,
}

impl fmt::Display for ReferenceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => err.fmt(f),
            Self::NoMatch => f.write_str("selector matches no node"),
            Self::Ambiguous { matches } => {
                write!(f, "selector matches {matches} nodes, expected exactly one")
            }
            Self::Unregistered => f.write_str("matched node has no layout node"),
        }
    }
}

/// Error returned by [`FlexAttrLayout`](crate::FlexAttrLayout) operations.
#[derive(Clone, Debug)]
pub enum LayoutError<N> {
    /// Layout was requested before any hierarchy was parsed.
    NotParsed,
    /// A cross-reference directive could not be evaluated.
    Reference {
        /// Node carrying the directive.
        node: N,
        /// Property name of the directive.
        property: String,
        /// Raw directive value.
        value: String,
        /// What went wrong.
        kind: ReferenceErrorKind,
    },
    /// A directive-bearing child follows a plain sibling under
    /// [`SiblingPolicy::RejectInterleaved`](crate::SiblingPolicy::RejectInterleaved).
    InterleavedSiblings {
        /// The parent node.
        parent: N,
        /// The offending child.
        child: N,
        /// The child's position among all of the parent's children.
        index: usize,
    },
    /// The layout engine rejected an operation.
    Engine(TaffyError),
}

impl<N: fmt::Debug> fmt::Display for LayoutError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotParsed => f.write_str("no node hierarchy has been parsed"),
            Self::Reference {
                node,
                property,
                value,
                kind,
            } => write!(
                f,
                "cannot resolve `{property}: {value}` on {node:?}: {kind}"
            ),
            Self::InterleavedSiblings {
                parent,
                child,
                index,
            } => write!(
                f,
                "child {child:?} at index {index} of {parent:?} follows a sibling without layout directives"
            ),
            Self::Engine(err) => write!(f, "layout engine error: {err}"),
        }
    }
}

impl<N: fmt::Debug> core::error::Error for LayoutError<N> {}

impl<N> From<TaffyError> for LayoutError<N> {
    fn from(err: TaffyError) -> Self {
        Self::Engine(err)
    }
}
