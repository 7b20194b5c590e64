// src/wiki/mod.rs
// =============================================================================
// This module is the boundary to the wiki itself.
//
// Submodules:
// - article: Normalizes article URLs into (namespace, title) pairs
// - fetch: Fetches an article page and extracts the articles it links to
//
// The search core never talks to the network directly - it goes through the
// LinkSource trait exported here, which WikiClient implements over HTTP.
// =============================================================================

mod article;
mod fetch;

// Re-export the public API so callers write `wiki::parse_entry()` instead of
// `wiki::article::parse_entry()`
pub use article::{parse_entry, FormatError, Namespace};
pub use fetch::{FetchError, LinkSource, WikiClient};
