// src/search/frontier.rs
// =============================================================================
// This module holds the BFS frontier: the queue of articles waiting to be
// expanded, together with the path that first discovered each of them, plus
// the set of articles that have already been expanded.
//
// The rules:
// - push() always appends; the same article may be queued many times while
//   different pages discover it
// - drain_batch() empties the whole queue at once, drops every entry whose
//   article was already expanded, and marks the survivors as visited in the
//   same step - only the first queued copy of an article ever wins
//
// Draining the whole queue defines a BFS round: every article at distance d
// from the start is expanded before any article at distance d+1, which is
// what makes the first path to reach the target a shortest one.
//
// Rust concepts:
// - VecDeque: Double-ended queue, push_back/pop_front give FIFO order
// - HashSet::insert: Returns false when the value was already present,
//   so "check and mark" is a single call
// =============================================================================

use std::collections::{HashSet, VecDeque};

// One pending expansion: the article and the path that discovered it
type Pending = (String, Vec<String>);

// The BFS queue and visited set for one search
//
// Owned exclusively by the search controller; &mut access is what makes
// drain-and-mark atomic - nothing else can admit an article in between.
pub struct Frontier {
    queue: VecDeque<Pending>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
        }
    }

    // Queues an article for a later round
    //
    // No duplicate check here: suppression happens at drain time, so a
    // discovery racing ahead of a drain can never be lost, only ignored later.
    pub fn push(&mut self, article: String, path: Vec<String>) {
        self.queue.push_back((article, path));
    }

    // True if the article was already expanded in an earlier round
    pub fn is_visited(&self, article: &str) -> bool {
        self.visited.contains(article)
    }

    // Takes everything currently queued, in FIFO order, skipping articles
    // that were already expanded and marking the rest as expanded
    //
    // Returns an empty Vec when the queue is empty - the search is exhausted.
    pub fn drain_batch(&mut self) -> Vec<Pending> {
        let mut batch = Vec::new();

        while let Some((article, path)) = self.queue.pop_front() {
            // insert() returns false for an article that's already in the
            // set, so admitting and marking happen in one step
            if self.visited.insert(article.clone()) {
                batch.push((article, path));
            }
        }

        batch
    }
}
