// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter configuration.

use taffy::{FlexDirection, Style};

/// How plain siblings (without a directive attribute) are treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SiblingPolicy {
    /// Plain siblings are skipped and do not consume a child index.
    #[default]
    Compact,
    /// A directive-bearing child that follows a plain sibling is an error.
    ///
    /// Use this when the visual tree is expected to keep each level either fully annotated
    /// or not annotated at all.
    RejectInterleaved,
}

/// Configuration for a [`FlexAttrLayout`](crate::FlexAttrLayout).
///
/// ```rust
/// use understory_flex_attr::{AttrLayoutConfig, SiblingPolicy};
///
/// let config = AttrLayoutConfig::default()
///     .with_directive_attribute("yogaLayout")
///     .with_sibling_policy(SiblingPolicy::RejectInterleaved);
/// assert_eq!(config.transform_attribute, "transform");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AttrLayoutConfig {
    /// Attribute holding layout directives. Defaults to `layout`.
    pub directive_attribute: String,
    /// Attribute the computed translation is written to. Defaults to `transform`.
    pub transform_attribute: String,
    /// Treatment of plain siblings.
    pub sibling_policy: SiblingPolicy,
    /// Style every layout node starts from before its directives are applied.
    ///
    /// The default stacks children vertically and does not shrink them.
    pub base_style: Style,
}

impl Default for AttrLayoutConfig {
    fn default() -> Self {
        Self {
            directive_attribute: "layout".into(),
            transform_attribute: "transform".into(),
            sibling_policy: SiblingPolicy::default(),
            base_style: Style {
                flex_direction: FlexDirection::Column,
                flex_shrink: 0.0,
                ..Style::DEFAULT
            },
        }
    }
}

impl AttrLayoutConfig {
    /// Set the directive attribute name.
    #[must_use]
    pub fn with_directive_attribute(mut self, name: impl Into<String>) -> Self {
        self.directive_attribute = name.into();
        self
    }

    /// Set the transform attribute name.
    #[must_use]
    pub fn with_transform_attribute(mut self, name: impl Into<String>) -> Self {
        self.transform_attribute = name.into();
        self
    }

    /// Set the sibling policy.
    #[must_use]
    pub fn with_sibling_policy(mut self, policy: SiblingPolicy) -> Self {
        self.sibling_policy = policy;
        self
    }

    /// Set the base style.
    #[must_use]
    pub fn with_base_style(mut self, style: Style) -> Self {
        self.base_style = style;
        self
    }
}
