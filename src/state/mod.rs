//! State module for tracking crawl progress
//!
//! This module provides the transient state shared by the workers of a crawl.
//!
//! # Components
//!
//! - `PageState`: Outcome of processing a single frontier entry
//! - `ClaimSet`: Atomic insert-if-absent gate that lets exactly one worker own a URL
//! - `VisitBudget`: Atomic counter enforcing the page cap

mod budget;
mod claims;
mod page_state;

// Re-export main types
pub use budget::VisitBudget;
pub use claims::ClaimSet;
pub use page_state::PageState;
