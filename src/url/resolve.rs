use url::Url;

/// Resolves a link reference against the URL of the page it appeared on
///
/// Resolution follows RFC 3986 via [`Url::join`], which covers relative
/// paths, dot segments, protocol-relative references (`//host/path`) and
/// same-document fragments (`#section`, which keeps the fragment).
///
/// Returns `None` when the reference cannot be resolved or resolves to a
/// scheme other than HTTP(S), e.g. `mailto:`, `javascript:` or `data:`.
///
/// # Examples
///
/// ```
/// use sumi_rank::url::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     resolve_reference(&base, "../about").as_deref(),
///     Some("https://example.com/about")
/// );
/// assert_eq!(resolve_reference(&base, "mailto:a@example.com"), None);
/// ```
pub fn resolve_reference(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href.trim()).ok()?;

    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    #[test]
    fn test_absolute_reference() {
        assert_eq!(
            resolve_reference(&base(), "https://other.com/x").as_deref(),
            Some("https://other.com/x")
        );
    }

    #[test]
    fn test_root_relative_reference() {
        assert_eq!(
            resolve_reference(&base(), "/other").as_deref(),
            Some("https://example.com/other")
        );
    }

    #[test]
    fn test_path_relative_reference() {
        assert_eq!(
            resolve_reference(&base(), "sibling").as_deref(),
            Some("https://example.com/docs/sibling")
        );
        assert_eq!(
            resolve_reference(&base(), "../up").as_deref(),
            Some("https://example.com/up")
        );
    }

    #[test]
    fn test_protocol_relative_reference() {
        assert_eq!(
            resolve_reference(&base(), "//cdn.example.net/lib").as_deref(),
            Some("https://cdn.example.net/lib")
        );
    }

    #[test]
    fn test_fragment_reference_keeps_fragment() {
        assert_eq!(
            resolve_reference(&base(), "#section").as_deref(),
            Some("https://example.com/docs/page#section")
        );
    }

    #[test]
    fn test_query_reference() {
        assert_eq!(
            resolve_reference(&base(), "?q=1").as_deref(),
            Some("https://example.com/docs/page?q=1")
        );
    }

    #[test]
    fn test_non_http_schemes_dropped() {
        assert_eq!(resolve_reference(&base(), "mailto:test@example.com"), None);
        assert_eq!(resolve_reference(&base(), "javascript:void(0)"), None);
        assert_eq!(resolve_reference(&base(), "tel:+1234567890"), None);
        assert_eq!(resolve_reference(&base(), "data:text/html,hi"), None);
        assert_eq!(resolve_reference(&base(), "ftp://example.com/file"), None);
    }

    #[test]
    fn test_malformed_reference_dropped() {
        assert_eq!(resolve_reference(&base(), "http://[::1"), None);
        assert_eq!(resolve_reference(&base(), "https://exa mple.com/"), None);
    }
}
