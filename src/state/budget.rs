use std::sync::atomic::{AtomicUsize, Ordering};

/// Global page budget shared by all workers of a crawl
///
/// Each worker that wins a URL claim takes one ticket. Tickets past the cap
/// are refused, so at most `max_pages` fetches are ever started; the claim
/// that drew a refused ticket still stands.
#[derive(Debug)]
pub struct VisitBudget {
    taken: AtomicUsize,
    max_pages: usize,
}

impl VisitBudget {
    pub fn new(max_pages: usize) -> Self {
        Self {
            taken: AtomicUsize::new(0),
            max_pages,
        }
    }

    /// Takes one ticket, returning its 1-based ordinal if within the cap
    pub fn try_take(&self) -> Option<usize> {
        let ordinal = self.taken.fetch_add(1, Ordering::SeqCst) + 1;
        (ordinal <= self.max_pages).then_some(ordinal)
    }

    /// Returns true once no further tickets will be granted
    pub fn is_exhausted(&self) -> bool {
        self.taken.load(Ordering::SeqCst) >= self.max_pages
    }

    /// Number of tickets granted so far
    pub fn granted(&self) -> usize {
        self.taken.load(Ordering::SeqCst).min(self.max_pages)
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}
