//! HTML Meta Tag Lookup
//!
//! Lookups over the head subtree: Open Graph and Twitter card `<meta>` tags,
//! the `<title>` element and the AMP `<link>`.

use dom_query::{Document, Selection};

use crate::dom;

/// Content of the first `<meta>` whose `property` or `name` equals `key`.
///
/// Keys compare case-insensitively. Tags with blank content are skipped;
/// the returned value is trimmed.
#[must_use]
pub fn meta_content(doc: &Document, key: &str) -> Option<String> {
    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let matches_key = ["property", "name"].iter().any(|attr| {
            dom::get_attribute(&meta, attr).is_some_and(|v| v.trim().eq_ignore_ascii_case(key))
        });
        if !matches_key {
            continue;
        }

        let content = dom::get_attribute(&meta, "content").unwrap_or_default();
        let content = content.trim();
        if !content.is_empty() {
            return Some(content.to_string());
        }
    }
    None
}

/// First match over `keys`, in priority order.
#[must_use]
pub fn first_meta_content(doc: &Document, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| meta_content(doc, key))
}

/// Text of the first non-blank `<title>` element.
#[must_use]
pub fn title_element(doc: &Document) -> Option<String> {
    doc.select("title").nodes().iter().find_map(|node| {
        let text = node.text();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

/// `href` of the first `<link rel="amphtml">`.
#[must_use]
pub fn amphtml_link(doc: &Document) -> Option<String> {
    for node in doc.select("link[href]").nodes() {
        let rel = dom::attr(node, "rel");
        if !rel
            .split_ascii_whitespace()
            .any(|r| r.eq_ignore_ascii_case("amphtml"))
        {
            continue;
        }
        let href = dom::attr(node, "href");
        let href = href.trim();
        if !href.is_empty() {
            return Some(href.to_string());
        }
    }
    None
}
