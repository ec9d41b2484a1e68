//! HTML parser for extracting links
//!
//! Only `<a href>` hyperlinks count as outbound links. Metadata such as
//! `<link rel="canonical">` never adds an edge.

use crate::url::resolve_reference;
use scraper::{Html, Selector};
use url::Url;

/// Parses HTML content and returns its outbound links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document, `download` anchors too
///
/// **Exclude:**
/// - `<link>` elements, including `rel="canonical"`
/// - References resolving to anything but HTTP(S) (`javascript:`, `mailto:`,
///   `tel:`, data URIs, ...)
/// - References that fail to resolve
///
/// Links come back as absolute URLs in document order. Duplicates are kept;
/// the link graph deduplicates edges per source.
///
/// # Example
///
/// ```
/// use sumi_rank::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(parse_html(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_reference(base_url, href))
        .collect()
}

/// Extracts the absolute links from an HTML document
///
/// A base URL that does not parse yields no links.
pub fn extract_links_from_html(html: &str, base_url: &str) -> Vec<String> {
    match Url::parse(base_url) {
        Ok(base) => parse_html(html, &base),
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", base_url, e);
            Vec::new()
        }
    }
}
