use std::collections::{HashSet, VecDeque};

/// FIFO crawl frontier with constant-time membership checks.
///
/// First-in-first-out ordering gives a breadth-first traversal, bounding
/// crawl depth growth evenly across the site. The membership set prevents
/// the same pending URL from being enqueued twice.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    members: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it is already pending. Returns whether the URL
    /// was added.
    pub fn push(&mut self, url: &str) -> bool {
        if self.members.contains(url) {
            return false;
        }
        self.members.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Dequeues the oldest pending URL.
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.members.remove(&url);
        Some(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
