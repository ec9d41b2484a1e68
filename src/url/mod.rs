//! URL handling module for Sumi-Rank
//!
//! This module provides reference resolution against a base URL and the
//! admission checks the crawler applies before claiming a URL.
//!
//! URLs are compared as plain strings after resolution. No further
//! normalization happens: `https://a.com/x` and `https://a.com/x/` are
//! different pages, and so are two URLs differing only by fragment.

mod filter;
mod resolve;

pub use filter::{has_http_scheme, matches_filter};
pub use resolve::resolve_reference;
