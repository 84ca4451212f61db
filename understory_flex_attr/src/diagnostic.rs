// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal diagnostics.

use core::fmt;

use understory_flex_directive::ValueError;

/// What kind of problem a [`Diagnostic`] reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The property name is not recognized.
    UnknownProperty,
    /// The declaration has no `:`.
    MissingValue,
    /// The value does not fit the recognized property.
    UnsupportedValue(ValueError),
}

/// A skipped directive.
///
/// The rest of the node's directives are still applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic<N> {
    /// Node carrying the directive.
    pub node: N,
    /// Property name as written.
    pub property: String,
    /// Raw value as written (empty when missing).
    pub value: String,
    /// The problem.
    pub kind: DiagnosticKind,
}

impl<N: fmt::Debug> fmt::Display for Diagnostic<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            node,
            property,
            value,
            kind,
        } = self;
        match kind {
            DiagnosticKind::UnknownProperty => {
                write!(f, "unparsable layout property `{property}: {value}` on {node:?}")
            }
            DiagnosticKind::MissingValue => {
                write!(f, "layout property `{property}` on {node:?} has no value")
            }
            DiagnosticKind::UnsupportedValue(err) => write!(
                f,
                "unsupported value `{value}` for layout property `{property}` on {node:?}: {err}"
            ),
        }
    }
}
