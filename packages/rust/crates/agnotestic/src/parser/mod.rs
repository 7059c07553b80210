//! Reference extraction from note text: headers, links, and inline tags.
//!
//! Lines inside fenced code blocks are ignored by every extractor.

mod headers;
mod links;
mod patterns;
mod tags;

use serde::{Deserialize, Serialize};

pub use self::headers::{Header, extract_title};
pub use self::links::{Link, LinkKind};

/// Everything extracted from one note body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    /// ATX headings in document order.
    pub headers: Vec<Header>,
    /// Markdown and wiki links in document order.
    pub links: Vec<Link>,
    /// Unique inline tags in first-seen order.
    pub tags: Vec<String>,
}

/// Headings matching `^(#{1,6})\s(.*)$`.
#[must_use]
pub fn extract_headers(text: &str) -> Vec<Header> {
    headers::extract_headers(text)
}

/// `[label](target)` and `[[target]]` links.
#[must_use]
pub fn extract_links(text: &str) -> Vec<Link> {
    links::extract_links(text)
}

/// `#tag` tokens.
#[must_use]
pub fn extract_tags(text: &str) -> Vec<String> {
    tags::extract_tags(text)
}

/// Run all extractors over `text`.
#[must_use]
pub fn parse_references(text: &str) -> References {
    References {
        headers: extract_headers(text),
        links: extract_links(text),
        tags: extract_tags(text),
    }
}
