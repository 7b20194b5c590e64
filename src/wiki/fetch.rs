// src/wiki/fetch.rs
// =============================================================================
// This module fetches an article page and extracts the articles it links to.
//
// How it works:
// 1. GET <namespace>/wiki/<title> with a shared reqwest client
// 2. Parse the HTML and find the article body container (#bodyContent)
// 3. Keep every <a href="/wiki/..."> inside it, skipping namespace pages
//    (File:, Category:, Special:, ... - anything with a colon)
// 4. Strip section fragments, percent-decode, and return the titles as a set
//
// The search core only sees the LinkSource trait defined here, so tests can
// substitute an in-memory graph for the real network.
//
// Rust concepts:
// - Traits with async methods: The seam between search and network
// - scraper: CSS selectors over parsed HTML
// - Error enums with thiserror
// =============================================================================

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;

use super::article::Namespace;

// Per-article failures during a search
//
// These are recoverable: a page that can't be fetched is a dead end, not a
// reason to stop searching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, timeout, TLS, ...)
    #[error("request for '{article}' failed: {source}")]
    Request {
        article: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("'{article}' returned HTTP {status}")]
    BadStatus {
        article: String,
        status: StatusCode,
    },
    /// The page came back without an article body to extract links from
    #[error("'{article}' has no article body")]
    MissingContent { article: String },
}

// The contract the search core depends on: given an article title, produce
// the set of article titles it links to.
//
// Declared with an explicit `impl Future` return type (instead of `async fn`)
// so the trait can require the returned future to be Send; implementations
// still just write `async fn`.
pub trait LinkSource {
    fn fetch_links(
        &self,
        article: &str,
    ) -> impl Future<Output = Result<HashSet<String>, FetchError>> + Send;
}

// Fetches article links over HTTP from one wiki
//
// Clone is cheap (reqwest::Client is reference-counted internally), and the
// client may be used from many concurrent fetches at once.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    namespace: Namespace,
}

impl WikiClient {
    // Creates a client for one wiki namespace
    //
    // The timeout bounds every fetch the search issues; the dispatcher itself
    // imposes no wall-clock limit of its own.
    pub fn new(namespace: Namespace) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("wiki-pathfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, namespace })
    }
}

impl LinkSource for WikiClient {
    async fn fetch_links(&self, article: &str) -> Result<HashSet<String>, FetchError> {
        let url = self.namespace.article_url(article);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                article: article.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                article: article.to_string(),
                status,
            });
        }

        let html = response.text().await.map_err(|source| FetchError::Request {
            article: article.to_string(),
            source,
        })?;

        extract_article_links(&html).ok_or_else(|| FetchError::MissingContent {
            article: article.to_string(),
        })
    }
}

// Extracts linked article titles from an article page
//
// Returns None when the page has no #bodyContent container (not an article
// page at all), otherwise the set of decoded titles.
fn extract_article_links(html: &str) -> Option<HashSet<String>> {
    let document = Html::parse_document(html);

    // Selector::parse only fails on invalid CSS; these are constants
    let content = Selector::parse("#bodyContent").unwrap();
    let anchors = Selector::parse("a[href]").unwrap();

    let body = document.select(&content).next()?;

    let mut links = HashSet::new();
    for element in body.select(&anchors) {
        if let Some(href) = element.value().attr("href") {
            if let Some(title) = article_from_href(href) {
                links.insert(title);
            }
        }
    }

    Some(links)
}

// Turns an href into a decoded article title, or None if it doesn't point
// at an article
//
// Examples:
//   "/wiki/Rust_(programming_language)" -> Some("Rust_(programming_language)")
//   "/wiki/Moscow#History"              -> Some("Moscow")
//   "/wiki/File:Photo.jpg"              -> None (namespace page)
//   "/w/index.php?action=edit"          -> None (not under /wiki/)
//   "https://example.com"               -> None (external)
fn article_from_href(href: &str) -> Option<String> {
    let rest = href.strip_prefix("/wiki/")?;

    // Section links point into an article, not at a different one
    let rest = rest.split(['#', '?']).next()?;

    // A colon marks a namespace page, not an article
    if rest.is_empty() || rest.contains(':') {
        return None;
    }

    let decoded = percent_decode_str(rest).decode_utf8().ok()?;
    Some(decoded.into_owned())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait between search and network?
//    - The search only needs "article in, set of linked articles out"
//    - Tests implement LinkSource over an in-memory graph, so the whole
//      search engine runs without touching the network
//
// 2. Why `impl Future` instead of `async fn` in the trait?
//    - They desugar to the same thing, but spelling out the return type
//      lets us add `+ Send` so the futures can cross thread boundaries
//    - Implementations still write plain `async fn`
//
// 3. Why does WikiClient derive Clone?
//    - reqwest::Client is a handle around a shared connection pool
//    - Cloning it is just bumping a reference count, and all clones reuse
//      the same pooled connections
//
// 4. Why return a HashSet and not a Vec?
//    - A page often links to the same article many times
//    - The set collapses them, so one page contributes each neighbor once
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_inside_body_content() {
        let html = r#"
            <div id="bodyContent">
                <a href="/wiki/Alpha">Alpha</a>
                <a href="/wiki/Beta">Beta</a>
            </div>
        "#;
        let links = extract_article_links(html).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links.contains("Alpha"));
        assert!(links.contains("Beta"));
    }

    #[test]
    fn test_ignore_links_outside_body_content() {
        let html = r#"
            <div id="siteNav"><a href="/wiki/Main_Page">home</a></div>
            <div id="bodyContent"><a href="/wiki/Alpha">Alpha</a></div>
        "#;
        let links = extract_article_links(html).unwrap();
        assert_eq!(links.len(), 1);
        assert!(links.contains("Alpha"));
    }

    #[test]
    fn test_missing_body_content_is_none() {
        let html = r#"<div id="other"><a href="/wiki/Alpha">Alpha</a></div>"#;
        assert!(extract_article_links(html).is_none());
    }

    #[test]
    fn test_duplicate_links_collapse_into_set() {
        let html = r#"
            <div id="bodyContent">
                <a href="/wiki/Alpha">first mention</a>
                <a href="/wiki/Alpha">second mention</a>
            </div>
        "#;
        let links = extract_article_links(html).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_skip_namespace_pages() {
        assert_eq!(article_from_href("/wiki/File:Photo.jpg"), None);
        assert_eq!(article_from_href("/wiki/Category:Cities"), None);
        assert_eq!(article_from_href("/wiki/Special:Random"), None);
    }

    #[test]
    fn test_skip_external_and_non_article_links() {
        assert_eq!(article_from_href("https://example.com"), None);
        assert_eq!(article_from_href("/w/index.php?action=edit"), None);
        assert_eq!(article_from_href("#cite_note-1"), None);
        assert_eq!(article_from_href("/wiki/"), None);
    }

    #[test]
    fn test_strip_section_fragment() {
        assert_eq!(
            article_from_href("/wiki/Moscow#History"),
            Some("Moscow".to_string())
        );
    }

    #[test]
    fn test_decode_percent_encoded_title() {
        assert_eq!(
            article_from_href("/wiki/%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0"),
            Some("Москва".to_string())
        );
    }
}
