// src/search/dispatch.rs
// =============================================================================
// This module runs one round's worth of fetches with a hard concurrency cap.
//
// How it works:
// 1. Turn the drained batch into a stream of per-article fetch futures
// 2. buffer_unordered(max_connections) polls at most that many at once;
//    the rest wait for a slot
// 3. Results come out in completion order, each tagged with the article and
//    the path that discovered it, failures included as data
//
// Cancellation is just dropping the stream: queued and in-flight fetches are
// abandoned without being awaited, and results already consumed are kept.
//
// Rust concepts:
// - Streams: Async iterators; next().await yields items as they finish
// - buffer_unordered: Like Promise.all() but with a concurrency limit and
//   results in completion order
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, Stream, StreamExt};

use crate::wiki::{FetchError, LinkSource};

// The outcome of expanding one article
//
// Carries the path alongside so the controller can extend it without keeping
// any per-article bookkeeping of its own.
pub struct Expansion {
    pub article: String,
    pub path: Vec<String>,
    pub outcome: Result<HashSet<String>, FetchError>,
}

// Fetches the links of every article in the batch, at most max_connections
// at a time, yielding results as they complete
//
// A failed fetch becomes an Expansion with an Err outcome; it never takes
// its siblings down with it. A limit of 0 is treated as 1.
pub fn run_batch<S: LinkSource>(
    source: &S,
    batch: Vec<(String, Vec<String>)>,
    max_connections: usize,
) -> impl Stream<Item = Expansion> + '_ {
    stream::iter(batch)
        .map(move |(article, path)| async move {
            let outcome = source.fetch_links(&article).await;
            Expansion {
                article,
                path,
                outcome,
            }
        })
        .buffer_unordered(max_connections.max(1))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Stream?
//    - The async version of an iterator
//    - next().await waits for the next item instead of blocking a thread
//    - Our stream yields Expansions as their fetches finish
//
// 2. What is buffer_unordered?
//    - Takes a stream of futures and keeps up to N of them running at once
//    - Yields results in COMPLETION order, not submission order
//    - It's like Promise.all() but with a concurrency limit
//
// 3. How does "drop the stream to cancel" work?
//    - Rust futures do nothing unless polled
//    - When the stream is dropped, its queued and in-flight futures are
//      dropped with it, so their requests simply never finish
//    - This is why the controller can return mid-batch without waiting
//
// 4. Why carry the path inside Expansion?
//    - Results arrive out of order, so "which article was this, and how did
//      we get here?" has to travel with the result itself
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    // Articles are named after their fetch latency in milliseconds, so tests
    // can script completion order
    #[derive(Default)]
    struct SleepSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl LinkSource for SleepSource {
        async fn fetch_links(&self, article: &str) -> Result<HashSet<String>, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let millis: u64 = article.parse().expect("article names are millis");
            sleep(Duration::from_millis(millis)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(HashSet::new())
        }
    }

    struct FlakySource;

    impl LinkSource for FlakySource {
        async fn fetch_links(&self, article: &str) -> Result<HashSet<String>, FetchError> {
            if article == "bad" {
                Err(FetchError::MissingContent {
                    article: article.to_string(),
                })
            } else {
                Ok(HashSet::from(["somewhere".to_string()]))
            }
        }
    }

    fn batch_of(articles: &[&str]) -> Vec<(String, Vec<String>)> {
        articles
            .iter()
            .map(|a| (a.to_string(), vec![a.to_string()]))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_never_exceeds_the_cap() {
        let source = SleepSource::default();
        let batch = batch_of(&["5"; 20]);

        let results: Vec<Expansion> = run_batch(&source, batch, 3).collect().await;

        assert_eq!(results.len(), 20);
        assert!(source.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_arrive_in_completion_order() {
        let source = SleepSource::default();
        let batch = batch_of(&["30", "20", "10"]);

        let order: Vec<String> = run_batch(&source, batch, 3)
            .map(|expansion| expansion.article)
            .collect()
            .await;

        // Submitted slowest-first, but the fastest fetch finishes first
        assert_eq!(order, vec!["10", "20", "30"]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_its_siblings() {
        let batch = batch_of(&["good", "bad", "also_good"]);

        let results: Vec<Expansion> = run_batch(&FlakySource, batch, 2).collect().await;

        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|e| e.outcome.is_ok()).count(), 2);
        assert_eq!(results.iter().filter(|e| e.outcome.is_err()).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_limit_still_makes_progress() {
        let source = SleepSource::default();
        let batch = batch_of(&["1", "1"]);

        let results: Vec<Expansion> = run_batch(&source, batch, 0).collect().await;

        assert_eq!(results.len(), 2);
        assert_eq!(source.peak.load(Ordering::SeqCst), 1);
    }
}
