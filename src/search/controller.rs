// src/search/controller.rs
// =============================================================================
// This module drives the breadth-first search over the link graph.
//
// One round:
// 1. Drain the frontier - everything queued, minus already-expanded articles
// 2. Hand the batch to the dispatcher, which fetches links concurrently
// 3. Consume results as they complete:
//    - the target itself was expanded -> done, its path is a shortest chain
//    - otherwise queue every unseen neighbor with its extended path
//    - a failed fetch is reported and treated as a dead end
// 4. When the batch is spent, start the next round
//
// The search ends in one of three ways: the target was found, the frontier
// ran dry (no chain exists), or the optional round bound was hit.
//
// Returning out of the consume loop drops the result stream, which cancels
// whatever was still queued or in flight - links from unobserved fetches
// never reach the frontier, so they can't corrupt the returned path.
//
// Rust concepts:
// - Generics over the LinkSource trait: the engine never names the network
// - pin!: Streams must be pinned before polling them in a loop
// - Tagged serde enums: One outcome type for text and JSON output
// =============================================================================

use std::pin::pin;

use futures::StreamExt;
use serde::Serialize;
use thiserror::Error;

use crate::wiki::{self, FormatError, LinkSource, WikiClient};

use super::dispatch::run_batch;
use super::frontier::Frontier;

// How a search ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A shortest chain of links, start first, target last
    Found { path: Vec<String> },
    /// Every reachable article was expanded without meeting the target
    Exhausted,
    /// The round bound was hit while articles were still waiting to expand
    DepthLimited { rounds: usize },
}

impl SearchOutcome {
    /// The found chain, if there is one
    pub fn path(&self) -> Option<&[String]> {
        match self {
            SearchOutcome::Found { path } => Some(path),
            _ => None,
        }
    }
}

// Failures that prevent a search from starting at all
//
// Per-article fetch failures are NOT here - those are absorbed during the
// search and only reported on stderr.
#[derive(Debug, Error)]
pub enum SearchError {
    /// An endpoint URL doesn't look like an article link
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The endpoints live on different wikis, so no chain can connect them
    #[error("articles live on different wikis: '{start}' vs '{target}'")]
    CrossNamespace { start: String, target: String },
    /// The HTTP client could not be built
    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// Finds the shortest chain of links between two article URLs
//
// Parameters:
//   start_url: where the search begins
//   target_url: the article to reach (same wiki as start_url)
//   max_connections: how many pages may be fetched at the same time
//   max_rounds: optional bound on BFS rounds; None searches until exhausted
//
// Returns: SearchOutcome, or a SearchError if the endpoints are unusable
pub async fn find_shortest_path(
    start_url: &str,
    target_url: &str,
    max_connections: usize,
    max_rounds: Option<usize>,
) -> Result<SearchOutcome, SearchError> {
    let (start_namespace, start) = wiki::parse_entry(start_url)?;
    let (target_namespace, target) = wiki::parse_entry(target_url)?;

    // A chain of in-wiki links can never cross language editions
    if start_namespace != target_namespace {
        return Err(SearchError::CrossNamespace {
            start: start_namespace.to_string(),
            target: target_namespace.to_string(),
        });
    }

    let client = WikiClient::new(start_namespace)?;

    Ok(run_search(&client, &start, &target, max_connections, max_rounds).await)
}

// The BFS engine behind find_shortest_path, generic over where links come
// from so tests can run it against in-memory graphs
pub async fn run_search<S: LinkSource>(
    source: &S,
    start: &str,
    target: &str,
    max_connections: usize,
    max_rounds: Option<usize>,
) -> SearchOutcome {
    // Searching for an article from itself needs no network at all
    if start == target {
        return SearchOutcome::Found {
            path: vec![start.to_string()],
        };
    }

    let mut frontier = Frontier::new();
    frontier.push(start.to_string(), vec![start.to_string()]);

    let mut rounds = 0usize;

    loop {
        let batch = frontier.drain_batch();
        if batch.is_empty() {
            return SearchOutcome::Exhausted;
        }
        if max_rounds.is_some_and(|bound| rounds >= bound) {
            return SearchOutcome::DepthLimited { rounds };
        }
        rounds += 1;

        println!("  Round {}: expanding {} article(s)", rounds, batch.len());

        let mut results = pin!(run_batch(source, batch, max_connections));
        while let Some(expansion) = results.next().await {
            match expansion.outcome {
                Ok(links) => {
                    // Returning drops the stream and with it the rest of the
                    // batch - nothing else gets awaited
                    if expansion.article == target {
                        return SearchOutcome::Found {
                            path: expansion.path,
                        };
                    }

                    for link in links {
                        if frontier.is_visited(&link) {
                            continue;
                        }
                        let mut path = expansion.path.clone();
                        path.push(link.clone());
                        frontier.push(link, path);
                    }
                }
                Err(err) => {
                    // A dead page is a dead end, not a reason to stop
                    eprintln!("  Warning: {}", err);
                }
            }
        }
    }
}
