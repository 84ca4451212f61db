// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectors for [`AttrTree`](crate::AttrTree) lookups.
//!
//! Deliberately small: compound selectors made of an optional type tag (or `*`), `#id` and
//! `.class` parts, joined by the descendant combinator (whitespace).

/// One compound selector, e.g. `g.ticks` or `#legend`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) type_tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) required_classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Option<Self> {
        let mut compound = Self::default();
        let mut rest = text;

        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
        } else {
            let (tag, tail) = split_ident(rest);
            if !tag.is_empty() {
                compound.type_tag = Some(tag.into());
            }
            rest = tail;
        }

        while let Some(marker) = rest.chars().next() {
            let (ident, tail) = split_ident(&rest[marker.len_utf8()..]);
            if ident.is_empty() {
                return None;
            }
            match marker {
                '.' => compound.required_classes.push(ident.into()),
                '#' if compound.id.is_none() => compound.id = Some(ident.into()),
                _ => return None,
            }
            rest = tail;
        }
        Some(compound)
    }

    pub(crate) fn matches<'a>(
        &self,
        tag: &str,
        id: Option<&str>,
        classes: impl Iterator<Item = &'a str> + Clone,
    ) -> bool {
        if let Some(required) = &self.type_tag
            && required != tag
        {
            return false;
        }
        if let Some(required) = &self.id
            && id != Some(required.as_str())
        {
            return false;
        }
        self.required_classes
            .iter()
            .all(|required| classes.clone().any(|class| class == required))
    }
}

/// A parsed selector: compounds from outermost ancestor to subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Selector {
    pub(crate) compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector, or `None` if it uses syntax outside the supported subset.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let compounds = text
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }
}

fn split_ident(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(text.len());
    text.split_at(end)
}
