//! URL Utility Functions
//!
//! Validation of page URLs and resolution of image URLs found in metadata.

use url::Url;

use crate::error::{Error, Result};
use crate::patterns::{ABSOLUTE_IMAGE_URL, ENCODED_AMP};

/// Parse a page URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
///
/// # Errors
///
/// `InvalidUrl` for anything else.
pub fn parse_page_url(s: &str) -> Result<Url> {
    let s = s.trim();
    let url = Url::parse(s).map_err(|e| Error::InvalidUrl(format!("{s}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("{s}: unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(format!("{s}: missing host")));
    }

    Ok(url)
}

/// `host[:port]` of a page URL, the port only when non-default.
#[must_use]
pub fn host_with_port(page: &Url) -> String {
    let host = page.host_str().unwrap_or_default();
    match page.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Rewrite a metadata image URL to absolute form.
///
/// - Absolute, scheme-relative and `data:` URLs are kept.
/// - A URL that starts with the page host but lacks a scheme gets `http://`.
/// - Anything else is placed at the root of the page's origin.
///
/// A leading `//` then becomes `http://`, and `&amp;` becomes `&`.
#[must_use]
pub fn absolutize_image(image: &str, page: &Url) -> String {
    let image = image.trim();
    if image.is_empty() {
        return String::new();
    }

    let host = host_with_port(page);
    let mut resolved = if ABSOLUTE_IMAGE_URL.is_match(image) {
        image.to_string()
    } else if !host.is_empty() && starts_with_ignore_case(image, &host) {
        format!("http://{image}")
    } else {
        format!(
            "{}://{}/{}",
            page.scheme(),
            host,
            image.trim_start_matches('/')
        )
    };

    if resolved.starts_with("//") {
        resolved = format!("http:{resolved}");
    }

    ENCODED_AMP.replace_all(&resolved, "&").into_owned()
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_page_url_accepts_http() {
        assert!(parse_page_url("https://example.com/a?b=c").is_ok());
        assert!(parse_page_url("  http://localhost:8080/ ").is_ok());
    }

    #[test]
    fn test_parse_page_url_rejects() {
        for bad in ["", "example.com/page", "ftp://example.com/", "mailto:a@b.c", "http://"] {
            let err = parse_page_url(bad).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::InvalidUrl, "{bad}");
        }
    }

    #[test]
    fn test_absolute_images_kept() {
        let base = page("https://example.com/post/1");
        assert_eq!(
            absolutize_image("https://cdn.example.net/a.png", &base),
            "https://cdn.example.net/a.png"
        );
        assert_eq!(
            absolutize_image("data:image/png;base64,AAAA", &base),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_scheme_relative_becomes_http() {
        let base = page("https://example.com/");
        assert_eq!(absolutize_image("//cdn.example.net/a.png", &base), "http://cdn.example.net/a.png");
    }

    #[test]
    fn test_relative_image_uses_page_origin() {
        let base = page("https://example.com/post/1");
        assert_eq!(absolutize_image("/img/a.png", &base), "https://example.com/img/a.png");
        assert_eq!(absolutize_image("img/a.png", &base), "https://example.com/img/a.png");

        let base = page("http://localhost:8080/x");
        assert_eq!(absolutize_image("a.png", &base), "http://localhost:8080/a.png");
    }

    #[test]
    fn test_host_prefixed_image_gets_scheme() {
        let base = page("https://Example.com/");
        assert_eq!(absolutize_image("EXAMPLE.com/a.png", &base), "http://EXAMPLE.com/a.png");
    }

    #[test]
    fn test_amp_entities_normalized() {
        let base = page("https://example.com/");
        assert_eq!(
            absolutize_image("https://example.com/i?w=1&amp;h=2", &base),
            "https://example.com/i?w=1&h=2"
        );
    }
}
