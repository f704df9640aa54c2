//! Metadata extraction module.
//!
//! Reads title, lead image, description and AMP link from the sanitized
//! head subtree. Nothing here fails: a missing signal leaves its field at
//! the default (empty, or "Untitled" for the title).

pub mod meta_tags;

use url::Url;

use crate::dom;
use crate::patterns::{BAD_TITLE_TAGS, ENCODED_AMP};
use crate::result::{Metadata, UNTITLED};
use crate::sanitize::Fragment;
use crate::url_utils;

pub use meta_tags::{amphtml_link, first_meta_content, meta_content, title_element};

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const IMAGE_KEYS: &[&str] = &["og:image", "twitter:image:src"];
const DESCRIPTION_KEYS: &[&str] = &["og:description"];

/// Extract metadata from a head fragment.
///
/// Priority, first match wins:
/// 1. Title: `og:title`, `twitter:title`, `<title>`, "Untitled"
/// 2. Image: `og:image`, `twitter:image:src`, made absolute against `page_url`
/// 3. Description: `og:description`
/// 4. AMP link: `<link rel="amphtml">`
///
/// A title or description that is empty after [`clean_text`] does not count
/// as a match; the next source is tried.
#[must_use]
pub fn extract_metadata(head: &Fragment, page_url: &Url) -> Metadata {
    let doc = dom::parse(&head.html);

    let title = TITLE_KEYS
        .iter()
        .find_map(|key| cleaned(meta_content(&doc, key)))
        .or_else(|| cleaned(title_element(&doc)))
        .unwrap_or_else(|| UNTITLED.to_string());

    let image = first_meta_content(&doc, IMAGE_KEYS)
        .map(|img| url_utils::absolutize_image(&img, page_url))
        .unwrap_or_default();

    let description = DESCRIPTION_KEYS
        .iter()
        .find_map(|key| cleaned(meta_content(&doc, key)))
        .unwrap_or_default();

    let amphtml = amphtml_link(&doc).unwrap_or_default();

    tracing::debug!(%title, has_image = !image.is_empty(), "extracted metadata");

    Metadata {
        title,
        image,
        description,
        amphtml,
    }
}

/// A source that cleans to nothing counts as missing.
fn cleaned(value: Option<String>) -> Option<String> {
    value.map(|v| clean_text(&v)).filter(|v| !v.is_empty())
}

/// Remove tag-like fragments and decode `&amp;`.
#[must_use]
pub fn clean_text(s: &str) -> String {
    let stripped = BAD_TITLE_TAGS.replace_all(s, "");
    ENCODED_AMP.replace_all(&stripped, "&").trim().to_string()
}
