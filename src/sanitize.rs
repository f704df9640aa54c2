//! DOM Sanitizing Passes
//!
//! A pass parses raw markup, detaches every element matched by its removal
//! rules, and only then selects its target subtree. Because removal happens
//! on the whole tree first, a removed element can never leak into the
//! emitted fragment.

use std::sync::Arc;
use std::time::Duration;

use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::WHITESPACE;
use crate::selector::discard::{BODY_DISCARD, METADATA_DISCARD, SOURCE_DISCARD};
use crate::selector::{matches_any, RemovalRule};

/// Upper bound for a single sanitizing pass.
pub const SANITIZE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Subtree kept by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Head,
    Body,
    /// The `<html>` element; the pass emits its inner markup.
    Document,
}

impl Target {
    /// CSS selector of the subtree.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
            Self::Document => "html",
        }
    }
}

/// A (target subtree, removal rule set) pair describing one pass.
#[derive(Debug, Clone, Copy)]
pub struct SanitizationSpec {
    pub target: Target,
    pub rules: &'static [RemovalRule],
}

impl SanitizationSpec {
    /// Head subtree with scripting and media removed.
    pub const METADATA: Self = Self {
        target: Target::Head,
        rules: METADATA_DISCARD,
    };

    /// Body subtree with scripting, media and boilerplate removed.
    pub const BODY: Self = Self {
        target: Target::Body,
        rules: BODY_DISCARD,
    };

    /// Whole document with only scripts and styles removed.
    pub const SOURCE: Self = Self {
        target: Target::Document,
        rules: SOURCE_DISCARD,
    };
}

/// Output of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Markup of the target subtree.
    ///
    /// Outer HTML for `head`/`body`. For the document target this is the
    /// inner HTML of `<html>` with whitespace runs collapsed.
    pub html: String,

    /// Space-separated text of the subtree, whitespace collapsed and trimmed.
    pub text: String,
}

/// Run one pass synchronously.
///
/// A missing target yields an empty fragment; malformed markup is repaired
/// by the parser and never fails.
#[must_use]
pub fn sanitize_html(raw: &str, spec: &SanitizationSpec) -> Fragment {
    let doc = dom::parse(raw);

    let removed = dom::remove_matching(&doc, |node| matches_any(spec.rules, node));
    tracing::trace!(pass = spec.target.selector(), removed, "pruned elements");

    let sel = doc.select(spec.target.selector());
    if sel.is_empty() {
        return Fragment::default();
    }

    let text = collapse(&dom::spaced_text(&sel)).trim().to_string();
    let html = match spec.target {
        Target::Head | Target::Body => dom::outer_html(&sel),
        Target::Document => collapse(&dom::inner_html(&sel)),
    };

    Fragment { html, text }
}

/// Run one pass on the blocking pool, bounded by [`SANITIZE_TIMEOUT`].
///
/// # Errors
///
/// `DomParseTimeout` when the bound expires, `Internal` when the worker
/// panics.
pub async fn sanitize(raw: Arc<str>, spec: SanitizationSpec) -> Result<Fragment> {
    sanitize_with_timeout(raw, spec, SANITIZE_TIMEOUT).await
}

/// [`sanitize`] with an explicit bound.
pub(crate) async fn sanitize_with_timeout(
    raw: Arc<str>,
    spec: SanitizationSpec,
    bound: Duration,
) -> Result<Fragment> {
    let target = spec.target.selector();
    let task = tokio::task::spawn_blocking(move || sanitize_html(&raw, &spec));

    match tokio::time::timeout(bound, task).await {
        Ok(Ok(fragment)) => Ok(fragment),
        Ok(Err(join_err)) => Err(Error::Internal(format!("{target} pass failed: {join_err}"))),
        Err(_elapsed) => {
            tracing::debug!(pass = target, ?bound, "sanitizing pass timed out");
            Err(Error::DomParseTimeout { target })
        }
    }
}

fn collapse(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}
