//! Selector Rules
//!
//! Removal rules used by the sanitizing passes. A rule is a small value
//! evaluated against one element: its tag name, its `class`/`id` attribute
//! strings, or its inline style.
//!
//! Attribute patterns follow CSS attribute-selector semantics: they test the
//! whole attribute string, case-sensitively (`[class*=ad]`, `[id^=side]`).

use dom_query::NodeRef;

use crate::dom;

pub mod discard;

/// How an attribute string is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `[attr^=needle]`
    Prefix(&'static str),
    /// `[attr$=needle]`
    Suffix(&'static str),
    /// `[attr*=needle]`
    Contains(&'static str),
}

impl Pattern {
    /// Test an attribute value. Empty values never match.
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Self::Prefix(needle) => value.starts_with(needle),
            Self::Suffix(needle) => value.ends_with(needle),
            Self::Contains(needle) => value.contains(needle),
        }
    }
}

/// A single removal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalRule {
    /// Element with this (lowercase) tag name.
    Tag(&'static str),
    /// Element whose `class` attribute matches.
    Class(Pattern),
    /// Element whose `id` attribute matches.
    Id(Pattern),
    /// Element whose `class` or `id` attribute matches.
    IdOrClass(Pattern),
    /// Element hidden with inline `display: none`.
    Hidden,
}

impl RemovalRule {
    /// Test one element against this rule.
    ///
    /// Only `Tag` rules ever match the `html` or `body` roots; a page-wide
    /// class such as `<body class="loaded">` must not erase the document.
    #[must_use]
    pub fn matches(&self, node: &NodeRef) -> bool {
        let Some(tag) = dom::tag_name(node) else {
            return false;
        };

        match self {
            Self::Tag(name) => tag == *name,
            _ if is_document_root(&tag) => false,
            Self::Class(pattern) => pattern.matches(&dom::class_name(node)),
            Self::Id(pattern) => pattern.matches(&dom::id(node)),
            Self::IdOrClass(pattern) => {
                pattern.matches(&dom::class_name(node)) || pattern.matches(&dom::id(node))
            }
            Self::Hidden => is_hidden_style(&dom::attr(node, "style")),
        }
    }
}

/// True if any rule in the set matches the element.
#[must_use]
pub fn matches_any(rules: &[RemovalRule], node: &NodeRef) -> bool {
    rules.iter().any(|rule| rule.matches(node))
}

fn is_document_root(tag: &str) -> bool {
    matches!(tag, "html" | "body")
}

fn is_hidden_style(style: &str) -> bool {
    if style.is_empty() {
        return false;
    }
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("display:none")
}
