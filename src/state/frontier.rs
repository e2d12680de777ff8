use crate::state::PageState;
use std::collections::HashMap;

/// Worklist of listing pages plus the state of every page seen so far
///
/// Owned by a single discovery run; nothing else writes to it. The worklist is
/// a stack: order does not matter because discovery only produces a set.
#[derive(Debug, Default)]
pub struct Frontier {
    pages: HashMap<String, PageState>,
    worklist: Vec<String>,
}

impl Frontier {
    /// Creates a frontier holding only the seed page
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(seed);
        frontier
    }

    /// Queues a page unless it is already queued or visited
    ///
    /// Returns true if the page was new.
    pub fn enqueue(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.pages.contains_key(&url) {
            return false;
        }
        self.pages.insert(url.clone(), PageState::Queued);
        self.worklist.push(url);
        true
    }

    /// Pops the next page and marks it visited
    pub fn next_page(&mut self) -> Option<String> {
        while let Some(url) = self.worklist.pop() {
            if let Some(state) = self.pages.get_mut(&url) {
                if state.is_visited() {
                    continue;
                }
                *state = PageState::Visited;
            }
            return Some(url);
        }
        None
    }

    pub fn state(&self, url: &str) -> Option<PageState> {
        self.pages.get(url).copied()
    }

    /// Number of pages still waiting on the worklist
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    pub fn visited_count(&self) -> usize {
        self.pages.values().filter(|s| s.is_visited()).count()
    }

    /// Visited pages in sorted order
    pub fn visited_pages(&self) -> Vec<String> {
        let mut pages: Vec<String> = self
            .pages
            .iter()
            .filter(|(_, state)| state.is_visited())
            .map(|(url, _)| url.clone())
            .collect();
        pages.sort();
        pages
    }
}
