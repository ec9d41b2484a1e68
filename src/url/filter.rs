use url::Url;

/// Checks that a URL is absolute and uses the HTTP or HTTPS scheme
///
/// # Examples
///
/// ```
/// use sumi_rank::url::has_http_scheme;
///
/// assert!(has_http_scheme("https://example.com/"));
/// assert!(!has_http_scheme("ftp://example.com/"));
/// assert!(!has_http_scheme("/relative"));
/// ```
pub fn has_http_scheme(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Checks a URL against the optional substring filter
///
/// Without a filter every URL matches.
pub fn matches_filter(url: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |pattern| url.contains(pattern))
}
