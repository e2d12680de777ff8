//! Listing page state definitions for the discovery worklist
use std::fmt;

/// Represents where a listing page is in the discovery process
///
/// A page is created `Queued` when first seen in any page's links and moves to
/// `Visited` exactly once, right before it is fetched. Pages are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Found in a link, waiting on the worklist
    Queued,

    /// Popped from the worklist and fetched (or being fetched)
    Visited,
}

impl PageState {
    /// Returns true once the page has been taken off the worklist
    pub fn is_visited(&self) -> bool {
        matches!(self, Self::Visited)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Visited => "visited",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
