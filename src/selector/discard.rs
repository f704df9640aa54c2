//! Discard Rule Sets
//!
//! The fixed removal rules of the three sanitizing passes.

use super::Pattern::{Contains, Prefix};
use super::RemovalRule::{self, Hidden, IdOrClass, Tag};

/// Scripting, media and layout chrome that never carries head metadata.
pub static METADATA_DISCARD: &[RemovalRule] = &[
    Tag("script"),
    Tag("noscript"),
    Tag("style"),
    Tag("iframe"),
    Tag("nav"),
    Tag("footer"),
    Tag("label"),
    Tag("audio"),
    Tag("video"),
    Tag("aside"),
];

/// Scripting, media and boilerplate blocks stripped before body text is read.
///
/// The class/id patterns are deliberately broad (`ad` also hits `header`
/// and `shadow`); precision is traded for a quieter keyword signal.
pub static BODY_DISCARD: &[RemovalRule] = &[
    Tag("head"),
    Tag("script"),
    Tag("noscript"),
    Tag("style"),
    Tag("iframe"),
    Tag("nav"),
    Tag("footer"),
    Tag("label"),
    Tag("audio"),
    Tag("video"),
    Tag("aside"),
    // Social widgets
    IdOrClass(Contains("google")),
    IdOrClass(Contains("facebook")),
    IdOrClass(Contains("twitter")),
    IdOrClass(Contains("email")),
    // Page chrome
    IdOrClass(Contains("footer")),
    IdOrClass(Contains("header")),
    IdOrClass(Prefix("side")),
    IdOrClass(Contains("comments")),
    IdOrClass(Contains("share")),
    IdOrClass(Contains("social")),
    IdOrClass(Contains("nav")),
    // Ads and promotion
    IdOrClass(Contains("sponsored")),
    IdOrClass(Contains("widget")),
    IdOrClass(Contains("ad")),
    IdOrClass(Contains("promo")),
    IdOrClass(Contains("banner")),
    // Teasers and cross-links
    IdOrClass(Contains("abridged")),
    IdOrClass(Contains("news")),
    IdOrClass(Contains("highlight")),
    IdOrClass(Contains("copyright")),
    IdOrClass(Contains("popular")),
    IdOrClass(Contains("prev")),
    IdOrClass(Contains("next")),
    IdOrClass(Prefix("right")),
    IdOrClass(Contains("link")),
    Hidden,
];

/// Executable and styling content stripped from the source copy.
pub static SOURCE_DISCARD: &[RemovalRule] = &[Tag("script"), Tag("style")];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::selector::matches_any;

    fn removed_by(rules: &[RemovalRule], html: &str, selector: &str) -> bool {
        let doc = dom::parse(html);
        let sel = doc.select(selector);
        let node = sel.nodes()[0];
        matches_any(rules, &node)
    }

    #[test]
    fn test_metadata_discard_keeps_meta_and_title() {
        let html = r#"<head><title>T</title><meta property="og:title" content="x"><script>1</script></head>"#;
        assert!(!removed_by(METADATA_DISCARD, html, "title"));
        assert!(!removed_by(METADATA_DISCARD, html, "meta"));
        assert!(removed_by(METADATA_DISCARD, html, "script"));
    }

    #[test]
    fn test_body_discard_boilerplate() {
        let html = r#"<body>
            <div class="share-tools">a</div>
            <div id="sidebar-1">b</div>
            <div class="rightcol">c</div>
            <div style="display: none">d</div>
            <div class="entry">e</div>
            <ul class="related">f</ul>
        </body>"#;
        assert!(removed_by(BODY_DISCARD, html, ".share-tools"));
        assert!(removed_by(BODY_DISCARD, html, "#sidebar-1"));
        assert!(removed_by(BODY_DISCARD, html, ".rightcol"));
        assert!(removed_by(BODY_DISCARD, html, "div[style]"));
        assert!(!removed_by(BODY_DISCARD, html, ".entry"));
        assert!(!removed_by(BODY_DISCARD, html, ".related"));
    }

    #[test]
    fn test_body_discard_prefix_rules_are_anchored() {
        let html = r#"<body><div class="inside">x</div><div class="bright">y</div></body>"#;
        assert!(!removed_by(BODY_DISCARD, html, ".inside"));
        assert!(!removed_by(BODY_DISCARD, html, ".bright"));
    }

    #[test]
    fn test_source_discard_only_scripts_and_styles() {
        let html = "<body><nav>n</nav><style>s</style></body>";
        assert!(!removed_by(SOURCE_DISCARD, html, "nav"));
        assert!(removed_by(SOURCE_DISCARD, html, "style"));
    }
}
