/// Page state definitions for tracking crawl progress
///
/// This module defines the outcome recorded for every frontier entry a
/// crawl round processes.
use crate::FetchError;
use std::fmt;

/// Final state of a frontier entry after a crawl round processed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Success =====
    /// Page was fetched and its links extracted; it becomes a graph node
    Processed,

    // ===== Skipped before claiming =====
    /// Entry was deeper than the configured maximum depth
    DepthExceeded,

    /// URL is not an absolute HTTP(S) URL
    UnsupportedScheme,

    /// URL does not contain the configured filter substring
    FilteredOut,

    /// Another worker already claimed this URL
    AlreadyClaimed,

    /// URL was claimed after the page cap was used up
    OverCap,

    // ===== Fetch failures =====
    /// Timeout or transport failure
    Unreachable,

    /// Server answered with a non-success status
    HttpError,

    /// Response was not HTML
    ContentMismatch,

    /// Response body could not be decoded, or the worker task died
    Failed,
}

impl PageState {
    /// Maps a fetch failure to the state it leaves the page in
    pub fn from_fetch_error(error: &FetchError) -> Self {
        match error {
            FetchError::Timeout { .. } | FetchError::Transport { .. } => Self::Unreachable,
            FetchError::Status { .. } => Self::HttpError,
            FetchError::ContentMismatch { .. } => Self::ContentMismatch,
            FetchError::Decode { .. } => Self::Failed,
        }
    }

    /// Returns true if this represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the entry was dropped without a fetch attempt
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::DepthExceeded
                | Self::UnsupportedScheme
                | Self::FilteredOut
                | Self::AlreadyClaimed
                | Self::OverCap
        )
    }

    /// Returns true if a fetch was attempted and failed
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Unreachable | Self::HttpError | Self::ContentMismatch | Self::Failed
        )
    }

    /// Returns true if the page consumed part of the page budget
    pub fn was_attempted(&self) -> bool {
        self.is_success() || self.is_error()
    }

    /// Converts the page state to a database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DepthExceeded => "depth_exceeded",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::FilteredOut => "filtered_out",
            Self::AlreadyClaimed => "already_claimed",
            Self::OverCap => "over_cap",
            Self::Unreachable => "unreachable",
            Self::HttpError => "http_error",
            Self::ContentMismatch => "content_mismatch",
            Self::Failed => "failed",
        }
    }

    /// Parses a page state from a database string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn from_db_string(s: &str) -> Option<Self> {
        Self::all_states()
            .into_iter()
            .find(|state| state.to_db_string() == s)
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Processed,
            Self::DepthExceeded,
            Self::UnsupportedScheme,
            Self::FilteredOut,
            Self::AlreadyClaimed,
            Self::OverCap,
            Self::Unreachable,
            Self::HttpError,
            Self::ContentMismatch,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
