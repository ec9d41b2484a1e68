use dashmap::DashSet;

/// Set of URLs owned by some worker
///
/// [`ClaimSet::claim`] is the only deduplication gate of a crawl: it inserts
/// the URL if absent and reports whether this caller was the one that
/// inserted it. A separate contains-then-insert would let two workers fetch
/// the same page.
#[derive(Debug, Default)]
pub struct ClaimSet {
    claimed: DashSet<String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url`, returning `true` only for the first caller
    pub fn claim(&self, url: &str) -> bool {
        self.claimed.insert(url.to_string())
    }

    /// Returns true if some worker already claimed `url`
    ///
    /// Only a hint for frontier pruning; the answer may be stale by the time
    /// it is used.
    pub fn is_claimed(&self, url: &str) -> bool {
        self.claimed.contains(url)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
