// src/wiki/article.rs
// =============================================================================
// This module normalizes article URLs into (namespace, title) pairs.
//
// A wiki article URL looks like:
//   https://en.wikipedia.org/wiki/Six_degrees_of_separation
//
// We split it into two parts:
// - Namespace: the scheme + authority ("https://en.wikipedia.org"), which
//   identifies one language edition of the wiki
// - Title: everything after "/wiki/", percent-decoded ("Москва", not
//   "%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0")
//
// Titles are compared as decoded strings everywhere in the search, and
// re-encoded only when we build a URL to fetch.
//
// Rust concepts:
// - Newtype structs: Namespace wraps a String to give it meaning
// - thiserror: Derive Display/Error for our error enum
// - Pattern matching on Option/Result
// =============================================================================

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;
use url::{Position, Url};

// Characters that can't appear raw in a URL path segment.
// Everything else (including '/', which real titles like "AS/400" contain)
// passes through unchanged.
const TITLE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%');

// Errors for endpoint URLs that don't look like article links
//
// These are fatal: they are reported before any search begins.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The string isn't a URL at all
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL doesn't have the https://<host>/wiki/<article> shape
    #[error("expected an article link like https://en.wikipedia.org/wiki/<article>, got '{0}'")]
    NotAnArticle(String),
    /// The article name doesn't decode as UTF-8
    #[error("article name in '{0}' is not valid UTF-8 after decoding")]
    BadEncoding(String),
}

// The base address of one wiki (scheme + authority)
//
// Start and target article must share a namespace, otherwise no chain of
// in-wiki links can possibly connect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    // Builds the fetchable URL for an article title
    //
    // Example:
    //   namespace = "https://en.wikipedia.org", title = "C Sharp (programming language)"
    //   -> "https://en.wikipedia.org/wiki/C%20Sharp%20(programming%20language)"
    pub fn article_url(&self, title: &str) -> String {
        format!(
            "{}/wiki/{}",
            self.0,
            utf8_percent_encode(title, TITLE_ENCODE_SET)
        )
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Parses an article URL into its namespace and decoded title
//
// Supported shape:
//   https://<host>/wiki/<article>
//
// Returns: (Namespace, title) tuple
//
// Example:
//   "https://en.wikipedia.org/wiki/Rust_(programming_language)"
//   -> (Namespace("https://en.wikipedia.org"), "Rust_(programming_language)")
pub fn parse_entry(entry: &str) -> Result<(Namespace, String), FormatError> {
    let parsed = Url::parse(entry).map_err(|source| FormatError::InvalidUrl {
        url: entry.to_string(),
        source,
    })?;

    // URLs without a host (file:, data:, ...) have no namespace to speak of
    if !parsed.has_host() {
        return Err(FormatError::NotAnArticle(entry.to_string()));
    }

    let encoded = match parsed.path().strip_prefix("/wiki/") {
        Some(rest) if !rest.is_empty() => rest,
        _ => return Err(FormatError::NotAnArticle(entry.to_string())),
    };

    let title = percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|_| FormatError::BadEncoding(entry.to_string()))?
        .into_owned();

    // Everything up to the path: scheme, host and (if present) the port
    let namespace = Namespace(parsed[..Position::BeforePath].to_string());

    Ok((namespace, title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_article() {
        let (namespace, title) =
            parse_entry("https://en.wikipedia.org/wiki/Six_degrees_of_separation").unwrap();
        assert_eq!(namespace.to_string(), "https://en.wikipedia.org");
        assert_eq!(title, "Six_degrees_of_separation");
    }

    #[test]
    fn test_parse_decodes_title() {
        let (_, title) = parse_entry(
            "https://ru.wikipedia.org/wiki/%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0",
        )
        .unwrap();
        assert_eq!(title, "Москва");
    }

    #[test]
    fn test_parse_keeps_slash_in_title() {
        let (_, title) = parse_entry("https://en.wikipedia.org/wiki/AS/400").unwrap();
        assert_eq!(title, "AS/400");
    }

    #[test]
    fn test_reject_non_article_path() {
        let result = parse_entry("https://en.wikipedia.org/w/index.php?title=Foo");
        assert!(matches!(result, Err(FormatError::NotAnArticle(_))));
    }

    #[test]
    fn test_reject_empty_title() {
        let result = parse_entry("https://en.wikipedia.org/wiki/");
        assert!(matches!(result, Err(FormatError::NotAnArticle(_))));
    }

    #[test]
    fn test_reject_not_a_url() {
        let result = parse_entry("not a url at all");
        assert!(matches!(result, Err(FormatError::InvalidUrl { .. })));
    }

    #[test]
    fn test_language_editions_are_different_namespaces() {
        let (en, _) = parse_entry("https://en.wikipedia.org/wiki/Berlin").unwrap();
        let (de, _) = parse_entry("https://de.wikipedia.org/wiki/Berlin").unwrap();
        assert_ne!(en, de);
    }

    #[test]
    fn test_same_edition_is_same_namespace() {
        let (a, _) = parse_entry("https://en.wikipedia.org/wiki/Berlin").unwrap();
        let (b, _) = parse_entry("https://en.wikipedia.org/wiki/Hamburg").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_article_url_reencodes_title() {
        let (namespace, title) =
            parse_entry("https://en.wikipedia.org/wiki/What%3F_%28film%29").unwrap();
        assert_eq!(title, "What?_(film)");
        assert_eq!(
            namespace.article_url(&title),
            "https://en.wikipedia.org/wiki/What%3F_(film)"
        );
    }
}
