// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a directive attribute into declarations.

use core::iter::FusedIterator;
use core::str::Split;

/// One `property: value` declaration from a directive attribute.
///
/// Both halves are whitespace-trimmed. `value` is `None` when the declaration has no `:`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Directive<'a> {
    /// The property name, e.g. `flex-grow`.
    pub property: &'a str,
    /// The raw value text, e.g. `1` or `$.axis#width`.
    pub value: Option<&'a str>,
}

/// Iterator over the declarations of a directive attribute.
///
/// Created by [`directives`].
#[derive(Clone, Debug)]
pub struct Directives<'a> {
    inner: Split<'a, char>,
}

/// Split a directive attribute string into [`Directive`]s.
///
/// Declarations are separated by `;` and split at their first `:`. Empty declarations
/// (for example after a trailing `;`) are skipped.
///
/// ```rust
/// use understory_flex_directive::{Directive, directives};
///
/// let parsed: Vec<_> = directives(" flex-grow : 1;width;").collect();
/// assert_eq!(
///     parsed,
///     [
///         Directive { property: "flex-grow", value: Some("1") },
///         Directive { property: "width", value: None },
///     ]
/// );
/// ```
#[must_use]
pub fn directives(attribute: &str) -> Directives<'_> {
    Directives {
        inner: attribute.split(';'),
    }
}

impl<'a> Iterator for Directives<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let declaration = self.inner.next()?.trim();
            if declaration.is_empty() {
                continue;
            }
            return Some(match declaration.split_once(':') {
                Some((property, value)) => Directive {
                    property: property.trim(),
                    value: Some(value.trim()),
                },
                None => Directive {
                    property: declaration,
                    value: None,
                },
            });
        }
    }
}

impl FusedIterator for Directives<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn splits_on_semicolons_and_first_colon() {
        let parsed: Vec<_> = directives("flex-direction: row;align-items: stretch;flex-grow: 1")
            .map(|d| (d.property, d.value))
            .collect();
        assert_eq!(
            parsed,
            [
                ("flex-direction", Some("row")),
                ("align-items", Some("stretch")),
                ("flex-grow", Some("1")),
            ]
        );
    }

    #[test]
    fn keeps_colons_inside_values() {
        let d = directives("margin-left: $a:b#width").next().unwrap();
        assert_eq!(d.value, Some("$a:b#width"));
    }

    #[test]
    fn empty_attribute_yields_nothing() {
        assert_eq!(directives("").count(), 0);
        assert_eq!(directives(" ; ;; ").count(), 0);
    }

    #[test]
    fn empty_value_is_kept_as_empty_string() {
        let d = directives("width:").next().unwrap();
        assert_eq!(d.property, "width");
        assert_eq!(d.value, Some(""), "a trailing colon still marks a value");
    }
}
