//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate. `dom_query` keeps its tree in an
//! arena addressed by `NodeId` handles, so detaching a node drops the whole
//! subtree from every later traversal without any pointer juggling.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// === Parsing ===

/// Parse HTML string into document
///
/// html5ever recovers from unclosed and misnested tags, so this never fails.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Tag/Attribute Information ===

/// Get tag name (lowercase), `None` for non-element nodes
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Get any attribute value (empty string if missing)
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> String {
    node.attr(name).map(|s| s.to_string()).unwrap_or_default()
}

/// Get element ID attribute (empty string if missing)
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    attr(node, "id")
}

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    attr(node, "class")
}

/// Get an attribute of the first node in a selection
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Tree Manipulation ===

/// Detach every element for which `rule` returns true.
///
/// Matches are collected before anything is detached, so a rule sees the
/// original tree. Returns the number of matched elements.
pub fn remove_matching<F>(doc: &Document, rule: F) -> usize
where
    F: Fn(&NodeRef) -> bool,
{
    let doomed: Vec<NodeRef> = doc
        .select("*")
        .nodes()
        .iter()
        .filter(|node| rule(node))
        .copied()
        .collect();

    for node in &doomed {
        node.remove_from_parent();
    }

    doomed.len()
}

// === Text Content ===

/// Text of every text node under the selection, separated by single spaces.
///
/// Unlike `Selection::text`, adjacent block elements never glue their words
/// together ("<p>a</p><p>b</p>" yields "a b", not "ab").
#[must_use]
pub fn spaced_text(sel: &Selection) -> String {
    let mut out = String::new();

    for root in sel.nodes() {
        for node in root.descendants() {
            if !node.is_text() {
                continue;
            }
            let text = node.text();
            if text.trim().is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&text);
        }
    }

    out
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> String {
    sel.html().to_string()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> String {
    sel.inner_html().to_string()
}
